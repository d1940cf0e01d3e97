//! The page for recording a new transaction.

use axum::response::{IntoResponse, Response};
use time::OffsetDateTime;

use crate::{
    endpoints,
    html::{PAGE_CONTAINER_STYLE, base, dollar_input_styles},
    navigation::NavBar,
    transaction::form::{FormAction, transaction_form},
};

/// Renders the page for creating a transaction.
pub async fn get_new_transaction_page() -> Response {
    let nav_bar = NavBar::new(endpoints::NEW_TRANSACTION_VIEW).into_html();
    let today = OffsetDateTime::now_utc().date();

    let content = maud::html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold mb-4" { "Add Transaction" }

            (transaction_form(FormAction::Create, None, today))
        }
    );

    base("New Transaction", &[dollar_input_styles()], &content).into_response()
}
