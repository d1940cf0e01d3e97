//! The transaction list page with its live search and type filter.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState, Error,
    aggregation::{TypeFilter, filter_transactions},
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_DELETE_STYLE, CATEGORY_BADGE_STYLE, FORM_TEXT_INPUT_STYLE, LINK_STYLE,
        PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base,
        format_currency, link,
    },
    navigation::NavBar,
    store::{Transaction, TransactionKind, TransactionStore},
};

/// The state needed for displaying the transactions page.
#[derive(Debug, Clone)]
pub struct TransactionsPageState {
    /// The transaction store backing the list.
    pub store: Arc<Mutex<TransactionStore>>,
}

impl FromRef<AppState> for TransactionsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// The type filter and search text selected by the user.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionsQuery {
    /// Which transaction types to show.
    #[serde(default)]
    pub filter: TypeFilter,
    /// Search text matched against notes and categories.
    #[serde(default)]
    pub search: String,
}

/// Display the full transactions page.
pub async fn get_transactions_page(
    State(state): State<TransactionsPageState>,
    Query(query): Query<TransactionsQuery>,
) -> Result<Response, Error> {
    let store = state
        .store
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire store lock: {error}"))
        .map_err(|_| Error::StoreLockError)?;

    let visible = filter_transactions(store.list(), query.filter, &query.search);
    let table = transactions_table(&visible);
    drop(store);

    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW);

    Ok(transactions_view(nav_bar, &query, table).into_response())
}

/// Return just the transaction table, used by the live search.
pub async fn get_transactions_table(
    State(state): State<TransactionsPageState>,
    Query(query): Query<TransactionsQuery>,
) -> Result<Response, Error> {
    let store = state
        .store
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire store lock: {error}"))
        .map_err(|_| Error::StoreLockError)?;

    let visible = filter_transactions(store.list(), query.filter, &query.search);

    Ok(transactions_table(&visible).into_response())
}

/// Renders the transactions page around `table`.
fn transactions_view(nav_bar: NavBar, query: &TransactionsQuery, table: Markup) -> Markup {
    let nav_bar = nav_bar.into_html();
    let new_transaction_link = link(endpoints::NEW_TRANSACTION_VIEW, "Add transaction");

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-screen-lg"
            {
                div class="flex justify-between items-baseline mb-4"
                {
                    h2 class="text-xl font-bold" { "Transactions" }

                    (new_transaction_link)
                }

                (filter_buttons(query.filter))

                form
                    id="search-form"
                    class="mb-4"
                    hx-get=(endpoints::TRANSACTIONS_TABLE)
                    hx-trigger="input changed delay:300ms from:find input[name='search'], search from:find input[name='search']"
                    hx-target="#transactions-table"
                    hx-swap="outerHTML"
                {
                    input
                        type="search"
                        name="search"
                        value=(query.search)
                        placeholder="Search notes and categories"
                        class=(FORM_TEXT_INPUT_STYLE);

                    input type="hidden" name="filter" value=(query.filter.as_str());
                }

                (table)
            }
        }
    );

    base("Transactions", &[], &content)
}

/// Renders the all/income/expense segmented filter links.
fn filter_buttons(active: TypeFilter) -> Markup {
    let filters = [
        (TypeFilter::All, "All"),
        (TypeFilter::Income, "Income"),
        (TypeFilter::Expense, "Expenses"),
    ];

    let button_class = |is_active: bool| -> &'static str {
        if is_active {
            "px-4 py-1.5 text-sm font-medium rounded-full bg-blue-600 text-white"
        } else {
            "px-4 py-1.5 text-sm font-medium rounded-full text-gray-700
            hover:bg-gray-100 dark:text-gray-300 dark:hover:bg-gray-700"
        }
    };

    html!(
        div class="flex gap-2 mb-4"
        {
            @for (filter, label) in filters {
                a
                    href={ (endpoints::TRANSACTIONS_VIEW) "?filter=" (filter.as_str()) }
                    class=(button_class(filter == active))
                    aria-current=[(filter == active).then_some("page")]
                {
                    (label)
                }
            }
        }
    )
}

/// Renders the transaction table, or an empty-state message.
fn transactions_table(transactions: &[&Transaction]) -> Markup {
    html!(
        div id="transactions-table" class="relative overflow-x-auto rounded shadow-md"
        {
            @if transactions.is_empty() {
                p class="p-6 text-gray-600 dark:text-gray-400" { "No transactions to show." }
            } @else {
                table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Details" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                        }
                    }

                    tbody {
                        @for transaction in transactions {
                            (transaction_row(transaction))
                        }
                    }
                }
            }
        }
    )
}

/// Renders one transaction as a table row.
fn transaction_row(transaction: &Transaction) -> Markup {
    let (sign, amount_style) = match transaction.kind {
        TransactionKind::Income => ("+", "text-green-600 dark:text-green-400"),
        TransactionKind::Expense => ("-", "text-red-600 dark:text-red-400"),
    };

    // The note doubles as the row title; fall back to the category when the
    // note is blank.
    let title = if transaction.note.is_empty() {
        transaction.category.as_str()
    } else {
        transaction.note.as_str()
    };

    let edit_url = format_endpoint(endpoints::EDIT_TRANSACTION_VIEW, &transaction.id);
    let delete_url = format_endpoint(endpoints::TRANSACTION, &transaction.id);

    html!(
        tr class=(TABLE_ROW_STYLE)
        {
            td class=(TABLE_CELL_STYLE) { (transaction.date) }

            td class=(TABLE_CELL_STYLE)
            {
                div class="font-semibold text-gray-900 dark:text-white mb-1" { (title) }

                span class=(CATEGORY_BADGE_STYLE) { (transaction.category) }
            }

            td class={ (TABLE_CELL_STYLE) " font-semibold " (amount_style) }
            {
                (sign) (format_currency(transaction.amount))
            }

            td class=(TABLE_CELL_STYLE)
            {
                div class="flex gap-3"
                {
                    a href=(edit_url) class=(LINK_STYLE) { "Edit" }

                    button
                        type="button"
                        hx-delete=(delete_url)
                        hx-confirm="Delete this transaction?"
                        hx-target="closest tr"
                        hx-swap="outerHTML"
                        hx-target-error="#alert-container"
                        class=(BUTTON_DELETE_STYLE)
                    {
                        "Delete"
                    }
                }
            }
        }
    )
}

#[cfg(test)]
mod view_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        body::Body,
        extract::{Query, State},
        http::{Response, StatusCode},
    };
    use rusqlite::Connection;
    use scraper::{Html, Selector};

    use crate::{aggregation::TypeFilter, store::TransactionStore};

    use super::{TransactionsPageState, TransactionsQuery, get_transactions_page};

    fn seeded_state() -> TransactionsPageState {
        let store = TransactionStore::new(Connection::open_in_memory().unwrap()).unwrap();

        TransactionsPageState {
            store: Arc::new(Mutex::new(store)),
        }
    }

    fn query(filter: TypeFilter, search: &str) -> Query<TransactionsQuery> {
        Query(TransactionsQuery {
            filter,
            search: search.to_owned(),
        })
    }

    #[tokio::test]
    async fn page_lists_every_seeded_transaction() {
        let state = seeded_state();

        let response = get_transactions_page(State(state), query(TypeFilter::All, ""))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html(response).await;
        assert_valid_html(&html);
        assert_row_count(&html, 6);
    }

    #[tokio::test]
    async fn search_narrows_rows_to_matches() {
        let state = seeded_state();

        let response = get_transactions_page(State(state), query(TypeFilter::All, "bus"))
            .await
            .unwrap();

        let html = parse_html(response).await;
        assert_row_count(&html, 1);
        assert!(html.html().contains("Bus fare"));
    }

    #[tokio::test]
    async fn type_filter_narrows_rows_to_income() {
        let state = seeded_state();

        let response = get_transactions_page(State(state), query(TypeFilter::Income, ""))
            .await
            .unwrap();

        let html = parse_html(response).await;
        assert_row_count(&html, 2);
    }

    #[tokio::test]
    async fn shows_empty_message_when_nothing_matches() {
        let state = seeded_state();

        let response = get_transactions_page(State(state), query(TypeFilter::All, "zzz"))
            .await
            .unwrap();

        let html = parse_html(response).await;
        assert_row_count(&html, 0);
        assert!(html.html().contains("No transactions to show."));
    }

    async fn parse_html(response: Response<Body>) -> Html {
        let body = response.into_body();
        let body = axum::body::to_bytes(body, usize::MAX).await.unwrap();
        let text = String::from_utf8_lossy(&body).to_string();

        Html::parse_document(&text)
    }

    #[track_caller]
    fn assert_valid_html(html: &Html) {
        assert!(
            html.errors.is_empty(),
            "Got HTML parsing errors: {:?}",
            html.errors
        );
    }

    #[track_caller]
    fn assert_row_count(html: &Html, expected: usize) {
        let selector = Selector::parse("tbody tr").unwrap();
        let rows: Vec<_> = html.select(&selector).collect();
        assert_eq!(
            rows.len(),
            expected,
            "want {expected} table rows, got {}",
            rows.len()
        );
    }
}
