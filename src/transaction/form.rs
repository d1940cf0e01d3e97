//! The shared form used by the new and edit transaction pages.

use maud::{Markup, html};
use serde::Deserialize;
use time::Date;

use crate::{
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_RADIO_GROUP_STYLE, FORM_RADIO_INPUT_STYLE,
        FORM_RADIO_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
    },
    store::{DEFAULT_CATEGORY, Transaction, TransactionDraft, TransactionKind},
};

/// The form data for creating or updating a transaction.
///
/// The required fields are optional here so that an empty submission reaches
/// the store's validation instead of failing during deserialization; the
/// store reports every missing field at once.
#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    /// The value of the transaction in dollars.
    pub amount: Option<f64>,
    /// The date when the transaction occurred.
    pub date: Option<Date>,
    /// The category label. Blank values fall back to the default category.
    #[serde(default)]
    pub category: String,
    /// Whether the transaction is an income or an expense.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Text detailing the transaction.
    #[serde(default)]
    pub note: String,
}

impl TransactionForm {
    /// Convert the submitted fields into a draft for the store.
    pub(crate) fn into_draft(self) -> TransactionDraft {
        TransactionDraft {
            amount: self.amount,
            date: self.date,
            category: Some(self.category),
            kind: self.kind,
            note: self.note,
        }
    }
}

/// How the form submits: create a new transaction or update an existing one.
pub(crate) enum FormAction {
    /// POST to the transaction collection.
    Create,
    /// PUT to the given transaction endpoint.
    Update(String),
}

/// Renders the transaction form, pre-filled from `transaction` when editing.
///
/// `today` is used as the default date for new transactions.
pub(crate) fn transaction_form(
    action: FormAction,
    transaction: Option<&Transaction>,
    today: Date,
) -> Markup {
    let (post_url, put_url, submit_label) = match action {
        FormAction::Create => (Some(endpoints::TRANSACTIONS_API.to_owned()), None, "Create"),
        FormAction::Update(url) => (None, Some(url), "Save"),
    };

    let date_value = transaction.map_or_else(|| today.to_string(), |t| t.date.to_string());
    let kind = transaction.map_or(TransactionKind::Expense, |t| t.kind);

    html!(
        form
            hx-post=[post_url]
            hx-put=[put_url]
            hx-target-error="#alert-container"
            class="w-full max-w-md flex flex-col gap-4"
        {
            div {
                label for="date" class=(FORM_LABEL_STYLE) { "Date" }

                input
                    type="date"
                    name="date"
                    id="date"
                    class=(FORM_TEXT_INPUT_STYLE)
                    required
                    value=(date_value);
            }

            div {
                label for="category" class=(FORM_LABEL_STYLE) { "Category" }

                input
                    type="text"
                    name="category"
                    id="category"
                    class=(FORM_TEXT_INPUT_STYLE)
                    placeholder=(DEFAULT_CATEGORY)
                    value=(transaction.map_or("", |t| t.category.as_str()));
            }

            div {
                span class=(FORM_LABEL_STYLE) { "Type" }

                div class=(FORM_RADIO_GROUP_STYLE) {
                    (kind_radio(TransactionKind::Expense, kind))
                    (kind_radio(TransactionKind::Income, kind))
                }
            }

            div {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                div class="input-wrapper w-full" {
                    input
                        type="number"
                        name="amount"
                        id="amount"
                        class=(FORM_TEXT_INPUT_STYLE)
                        required
                        min="0.01"
                        step="0.01"
                        placeholder="0.00"
                        value=[transaction.map(|t| t.amount.to_string())];
                }
            }

            div {
                label for="note" class=(FORM_LABEL_STYLE) { "Note" }

                input
                    type="text"
                    name="note"
                    id="note"
                    class=(FORM_TEXT_INPUT_STYLE)
                    placeholder="What was this for?"
                    value=(transaction.map_or("", |t| t.note.as_str()));
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { (submit_label) }
        }
    )
}

fn kind_radio(option: TransactionKind, selected: TransactionKind) -> Markup {
    let label = match option {
        TransactionKind::Income => "Income",
        TransactionKind::Expense => "Expense",
    };
    let id = format!("type-{}", option.as_str());

    html!(
        div class="flex flex-1 items-center gap-2" {
            input
                type="radio"
                name="type"
                id=(id)
                value=(option.as_str())
                class=(FORM_RADIO_INPUT_STYLE)
                checked[option == selected];

            label for=(id) class=(FORM_RADIO_LABEL_STYLE) { (label) }
        }
    )
}

#[cfg(test)]
mod form_tests {
    use time::macros::date;

    use crate::store::TransactionKind;

    use super::TransactionForm;

    #[test]
    fn deserializes_a_full_submission() {
        let form: TransactionForm = serde_html_form::from_str(
            "amount=12.5&date=2026-08-01&category=Food&type=expense&note=Lunch",
        )
        .unwrap();

        assert_eq!(form.amount, Some(12.5));
        assert_eq!(form.date, Some(date!(2026 - 08 - 01)));
        assert_eq!(form.category, "Food");
        assert_eq!(form.kind, TransactionKind::Expense);
        assert_eq!(form.note, "Lunch");
    }

    #[test]
    fn empty_required_fields_deserialize_to_none() {
        // The browser submits empty strings for untouched inputs; they must
        // reach the store as missing values, not parse errors.
        let form: TransactionForm =
            serde_html_form::from_str("amount=&date=&category=&type=income&note=").unwrap();

        assert_eq!(form.amount, None);
        assert_eq!(form.date, None);
        assert_eq!(form.kind, TransactionKind::Income);
    }

    #[test]
    fn draft_passes_category_through_for_validation() {
        let form: TransactionForm =
            serde_html_form::from_str("amount=1&date=2026-08-01&category=&type=expense&note=")
                .unwrap();

        let draft = form.into_draft();

        // The store decides when to apply the default category.
        assert_eq!(draft.category, Some("".to_owned()));
    }
}
