//! Pure functions computing derived views over a transaction snapshot.
//!
//! Provides the income/expense/balance summary shown on the dashboard cards,
//! the per-category expense totals that drive the category chart, and the
//! type/search filter used by the transactions list. None of these touch
//! storage; they are recomputed on demand from the store's current snapshot.

use serde::Deserialize;

use crate::store::{Transaction, TransactionKind};

/// Income and expense totals with their net balance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    /// The sum of all income amounts.
    pub total_income: f64,
    /// The sum of all expense amounts.
    pub total_expense: f64,
    /// `total_income - total_expense`, rounded to the nearest cent.
    pub balance: f64,
}

/// Sum income and expenses separately and compute the net balance.
///
/// The balance is rounded to two decimal places, half away from zero on the
/// cent boundary. An empty snapshot yields an all-zero summary.
pub fn summarize(transactions: &[Transaction]) -> Summary {
    let total_income = total_for(transactions, TransactionKind::Income);
    let total_expense = total_for(transactions, TransactionKind::Expense);

    Summary {
        total_income,
        total_expense,
        balance: round_to_cents(total_income - total_expense),
    }
}

fn total_for(transactions: &[Transaction], kind: TransactionKind) -> f64 {
    transactions
        .iter()
        .filter(|transaction| transaction.kind == kind)
        .map(|transaction| transaction.amount)
        .sum()
}

// f64::round rounds half away from zero, which is the rounding mode used for
// displayed currency values throughout the app.
fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// The total amount spent in one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    /// The category label.
    pub category: String,
    /// The summed expense amount for the category.
    pub total: f64,
}

/// Group expense amounts by category, in first-seen order.
///
/// Income records are ignored. The ordering follows the snapshot order of the
/// expense records, not the totals and not the alphabet, so the chart slices
/// stay stable while a category's total grows. An empty result means there
/// are no expenses and the caller should render a placeholder instead of a
/// chart.
pub fn category_breakdown(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();

    for transaction in transactions
        .iter()
        .filter(|transaction| transaction.kind == TransactionKind::Expense)
    {
        match totals
            .iter_mut()
            .find(|entry| entry.category == transaction.category)
        {
            Some(entry) => entry.total += transaction.amount,
            None => totals.push(CategoryTotal {
                category: transaction.category.clone(),
                total: transaction.amount,
            }),
        }
    }

    totals
}

/// Which transaction types the transactions list should show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    /// Show every transaction.
    #[default]
    All,
    /// Show income records only.
    Income,
    /// Show expense records only.
    Expense,
}

impl TypeFilter {
    /// The lowercase name used in query strings.
    pub fn as_str(self) -> &'static str {
        match self {
            TypeFilter::All => "all",
            TypeFilter::Income => "income",
            TypeFilter::Expense => "expense",
        }
    }

    fn matches(self, kind: TransactionKind) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Income => kind == TransactionKind::Income,
            TypeFilter::Expense => kind == TransactionKind::Expense,
        }
    }
}

/// Select the transactions matching `type_filter` and `search_text`.
///
/// The search text is trimmed and matched case-insensitively as a substring
/// of the note or the category; an empty search matches everything. Both
/// predicates must hold. The snapshot order is preserved.
pub fn filter_transactions<'a>(
    transactions: &'a [Transaction],
    type_filter: TypeFilter,
    search_text: &str,
) -> Vec<&'a Transaction> {
    let query = search_text.trim().to_lowercase();

    transactions
        .iter()
        .filter(|transaction| type_filter.matches(transaction.kind))
        .filter(|transaction| {
            query.is_empty()
                || transaction.note.to_lowercase().contains(&query)
                || transaction.category.to_lowercase().contains(&query)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::store::{Transaction, TransactionKind};

    use super::{
        CategoryTotal, Summary, TypeFilter, category_breakdown, filter_transactions, summarize,
    };

    fn create_test_transaction(
        amount: f64,
        kind: TransactionKind,
        category: &str,
        note: &str,
    ) -> Transaction {
        Transaction {
            id: format!("{category}-{note}-{amount}"),
            date: date!(2026 - 07 - 15),
            category: category.to_owned(),
            amount,
            kind,
            note: note.to_owned(),
        }
    }

    #[test]
    fn summarize_empty_input_is_all_zero() {
        let result = summarize(&[]);

        assert_eq!(
            result,
            Summary {
                total_income: 0.0,
                total_expense: 0.0,
                balance: 0.0,
            }
        );
    }

    #[test]
    fn summarize_splits_totals_by_kind() {
        let transactions = vec![
            create_test_transaction(500.0, TransactionKind::Income, "Income", ""),
            create_test_transaction(25.5, TransactionKind::Expense, "Food", ""),
            create_test_transaction(5.0, TransactionKind::Expense, "Transport", ""),
        ];

        let result = summarize(&transactions);

        assert_eq!(result.total_income, 500.0);
        assert_eq!(result.total_expense, 30.5);
        assert_eq!(result.balance, 469.5);
    }

    #[test]
    fn summarize_rounds_balance_half_away_from_zero() {
        // 0.125 sits exactly on the cent boundary and is exact in binary.
        let income = vec![create_test_transaction(
            0.125,
            TransactionKind::Income,
            "Income",
            "",
        )];
        assert_eq!(summarize(&income).balance, 0.13);

        let expense = vec![create_test_transaction(
            0.125,
            TransactionKind::Expense,
            "Food",
            "",
        )];
        assert_eq!(summarize(&expense).balance, -0.13);
    }

    #[test]
    fn category_breakdown_groups_in_first_seen_order() {
        let transactions = vec![
            create_test_transaction(10.0, TransactionKind::Expense, "Food", ""),
            create_test_transaction(5.0, TransactionKind::Expense, "Transport", ""),
            create_test_transaction(15.0, TransactionKind::Expense, "Food", ""),
        ];

        let result = category_breakdown(&transactions);

        assert_eq!(
            result,
            vec![
                CategoryTotal {
                    category: "Food".to_owned(),
                    total: 25.0,
                },
                CategoryTotal {
                    category: "Transport".to_owned(),
                    total: 5.0,
                },
            ]
        );
    }

    #[test]
    fn category_breakdown_ignores_income() {
        let transactions = vec![
            create_test_transaction(500.0, TransactionKind::Income, "Income", ""),
            create_test_transaction(10.0, TransactionKind::Expense, "Food", ""),
        ];

        let result = category_breakdown(&transactions);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].category, "Food");
    }

    #[test]
    fn category_breakdown_is_empty_without_expenses() {
        let transactions = vec![create_test_transaction(
            500.0,
            TransactionKind::Income,
            "Income",
            "",
        )];

        assert!(category_breakdown(&transactions).is_empty());
        assert!(category_breakdown(&[]).is_empty());
    }

    #[test]
    fn filter_matches_search_against_note_and_category() {
        let transactions = vec![
            create_test_transaction(5.0, TransactionKind::Expense, "Transport", "Bus fare"),
            create_test_transaction(12.0, TransactionKind::Expense, "Busking gear", "New hat"),
            create_test_transaction(25.5, TransactionKind::Expense, "Food", "Lunch"),
            create_test_transaction(500.0, TransactionKind::Income, "Income", "Bus refund"),
        ];

        let result = filter_transactions(&transactions, TypeFilter::Expense, "bus");

        // "bus" matches the first record's note and the second's category;
        // the income record matches the search but not the type filter.
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].note, "Bus fare");
        assert_eq!(result[1].category, "Busking gear");
    }

    #[test]
    fn filter_search_is_case_insensitive_and_trimmed() {
        let transactions = vec![create_test_transaction(
            5.0,
            TransactionKind::Expense,
            "Transport",
            "Bus fare",
        )];

        assert_eq!(
            filter_transactions(&transactions, TypeFilter::All, "  BUS  ").len(),
            1
        );
    }

    #[test]
    fn filter_empty_search_matches_everything() {
        let transactions = vec![
            create_test_transaction(5.0, TransactionKind::Expense, "Transport", ""),
            create_test_transaction(500.0, TransactionKind::Income, "Income", ""),
        ];

        assert_eq!(
            filter_transactions(&transactions, TypeFilter::All, "").len(),
            2
        );
        assert_eq!(
            filter_transactions(&transactions, TypeFilter::Income, "").len(),
            1
        );
    }

    #[test]
    fn filter_preserves_input_order() {
        let transactions = vec![
            create_test_transaction(1.0, TransactionKind::Expense, "Food", "first"),
            create_test_transaction(2.0, TransactionKind::Expense, "Food", "second"),
            create_test_transaction(3.0, TransactionKind::Expense, "Food", "third"),
        ];

        let result = filter_transactions(&transactions, TypeFilter::All, "food");

        let notes: Vec<_> = result
            .iter()
            .map(|transaction| transaction.note.as_str())
            .collect();
        assert_eq!(notes, vec!["first", "second", "third"]);
    }

    #[test]
    fn type_filter_deserializes_from_lowercase_names() {
        #[derive(serde::Deserialize)]
        struct Query {
            filter: TypeFilter,
        }

        let query: Query = serde_html_form::from_str("filter=income").unwrap();
        assert_eq!(query.filter, TypeFilter::Income);

        let query: Query = serde_html_form::from_str("filter=expense").unwrap();
        assert_eq!(query.filter, TypeFilter::Expense);

        let query: Query = serde_html_form::from_str("filter=all").unwrap();
        assert_eq!(query.filter, TypeFilter::All);
    }
}
