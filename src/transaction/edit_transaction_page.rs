//! The page for editing an existing transaction.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use time::OffsetDateTime;

use crate::{
    AppState, Error,
    endpoints::{self, format_endpoint},
    html::{PAGE_CONTAINER_STYLE, base, dollar_input_styles},
    navigation::NavBar,
    store::TransactionStore,
    transaction::form::{FormAction, transaction_form},
};

/// The state needed for the edit transaction page.
#[derive(Debug, Clone)]
pub struct EditTransactionPageState {
    /// The transaction store the record is loaded from.
    pub store: Arc<Mutex<TransactionStore>>,
}

impl FromRef<AppState> for EditTransactionPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// Renders the page for editing the transaction matching `transaction_id`.
///
/// # Errors
/// Returns [Error::TransactionNotFound] if the ID does not match a stored
/// transaction, which renders as the 404 page.
pub async fn get_edit_transaction_page(
    State(state): State<EditTransactionPageState>,
    Path(transaction_id): Path<String>,
) -> Result<Response, Error> {
    let store = state
        .store
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire store lock: {error}"))
        .map_err(|_| Error::StoreLockError)?;

    let transaction = store
        .get(&transaction_id)
        .cloned()
        .ok_or_else(|| Error::TransactionNotFound(transaction_id.clone()))?;
    drop(store);

    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();
    let today = OffsetDateTime::now_utc().date();
    let update_url = format_endpoint(endpoints::TRANSACTION, &transaction.id);

    let content = maud::html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold mb-4" { "Edit Transaction" }

            (transaction_form(FormAction::Update(update_url), Some(&transaction), today))
        }
    );

    Ok(base("Edit Transaction", &[dollar_input_styles()], &content).into_response())
}

#[cfg(test)]
mod view_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        body::Body,
        extract::{Path, State},
        http::StatusCode,
        response::Response,
    };
    use rusqlite::Connection;
    use scraper::Html;
    use time::macros::date;

    use crate::{
        Error,
        endpoints::{self, format_endpoint},
        store::{Transaction, TransactionDraft, TransactionKind, TransactionStore},
    };

    use super::{EditTransactionPageState, get_edit_transaction_page};

    fn state_with_transaction() -> (EditTransactionPageState, Transaction) {
        let mut store = TransactionStore::new(Connection::open_in_memory().unwrap()).unwrap();
        let transaction = store
            .create(TransactionDraft {
                amount: Some(19.5),
                date: Some(date!(2026 - 07 - 20)),
                category: Some("Food".to_owned()),
                kind: TransactionKind::Expense,
                note: "Pizza night".to_owned(),
            })
            .unwrap();

        let state = EditTransactionPageState {
            store: Arc::new(Mutex::new(store)),
        };

        (state, transaction)
    }

    #[tokio::test]
    async fn edit_page_prefills_the_form() {
        let (state, transaction) = state_with_transaction();

        let response = get_edit_transaction_page(State(state), Path(transaction.id.clone()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html(response).await;

        assert_input_value(&html, "date", "2026-07-20");
        assert_input_value(&html, "category", "Food");
        assert_input_value(&html, "amount", "19.5");
        assert_input_value(&html, "note", "Pizza night");
    }

    #[tokio::test]
    async fn edit_form_submits_to_the_transaction_endpoint() {
        let (state, transaction) = state_with_transaction();

        let response = get_edit_transaction_page(State(state), Path(transaction.id.clone()))
            .await
            .unwrap();
        let html = parse_html(response).await;

        let form_selector = scraper::Selector::parse("form").unwrap();
        let form = html.select(&form_selector).next().unwrap();
        assert_eq!(
            form.value().attr("hx-put").map(str::to_owned),
            Some(format_endpoint(endpoints::TRANSACTION, &transaction.id))
        );
    }

    #[tokio::test]
    async fn unknown_id_returns_not_found() {
        let (state, _) = state_with_transaction();

        let result =
            get_edit_transaction_page(State(state), Path("no-such-id".to_owned())).await;

        assert_eq!(
            result.map(|_| ()),
            Err(Error::TransactionNotFound("no-such-id".to_owned()))
        );
    }

    #[track_caller]
    fn assert_input_value(html: &Html, name: &str, expected: &str) {
        let selector = scraper::Selector::parse(&format!("input[name={name}]")).unwrap();
        let input = html
            .select(&selector)
            .next()
            .unwrap_or_else(|| panic!("no input named {name}"));
        assert_eq!(
            input.value().attr("value"),
            Some(expected),
            "wrong value for input {name}"
        );
    }

    async fn parse_html(response: Response<Body>) -> Html {
        let body = response.into_body();
        let body = axum::body::to_bytes(body, usize::MAX).await.unwrap();
        let text = String::from_utf8_lossy(&body).to_string();

        Html::parse_document(&text)
    }
}
