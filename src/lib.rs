//! Pocket Ledger is a web app for tracking personal income and spending.
//!
//! It records income and expense transactions in a single local storage
//! slot, and serves HTML pages showing the transaction list, the running
//! balance, and a breakdown of spending by category.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod aggregation;
mod alert;
mod app_state;
mod dashboard;
mod endpoints;
mod html;
mod internal_server_error;
mod navigation;
mod not_found;
mod routing;
mod store;
mod transaction;

pub use aggregation::{
    CategoryTotal, Summary, TypeFilter, category_breakdown, filter_transactions, summarize,
};
pub use app_state::AppState;
pub use routing::build_router;
pub use store::{
    DEFAULT_CATEGORY, Transaction, TransactionDraft, TransactionKind, TransactionStore,
};

use crate::{
    alert::error_alert,
    internal_server_error::{InternalServerErrorPage, render_internal_server_error},
    not_found::get_404_not_found_response,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// One or more transaction fields failed validation at the write
    /// boundary. The string lists the offending field names for display.
    ///
    /// The mutation that produced this error did not happen.
    #[error("invalid transaction field(s): {0}")]
    InvalidTransaction(String),

    /// The requested transaction is not in the store.
    ///
    /// For HTTP request handlers, the client should check that the ID is
    /// correct and that the transaction has not been deleted.
    #[error("no transaction found with ID {0}")]
    TransactionNotFound(String),

    /// Could not acquire the transaction store lock.
    #[error("could not acquire the transaction store lock")]
    StoreLockError,

    /// The transaction collection could not be serialized for persistence.
    #[error("could not serialize transactions as JSON: {0}")]
    JsonSerialization(String),

    /// An unhandled/unexpected SQL error from the storage slot.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {value}");
        Error::SqlError(value)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::TransactionNotFound(_) => get_404_not_found_response(),
            Error::StoreLockError => render_internal_server_error(Default::default()),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {error}");
                render_internal_server_error(InternalServerErrorPage::default())
            }
        }
    }
}

impl Error {
    fn into_alert_response(self) -> Response {
        match self {
            Error::InvalidTransaction(fields) => (
                StatusCode::BAD_REQUEST,
                error_alert(
                    "Invalid transaction",
                    &format!("Check the following field(s) and try again: {fields}."),
                ),
            )
                .into_response(),
            Error::TransactionNotFound(_) => (
                StatusCode::NOT_FOUND,
                error_alert(
                    "Could not find transaction",
                    "The transaction could not be found. \
                    Try refreshing the page to see if it has already been deleted.",
                ),
            )
                .into_response(),
            error => {
                tracing::error!("An unexpected error occurred: {error}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    error_alert(
                        "Something went wrong",
                        "An unexpected error occurred, check the server logs for more details.",
                    ),
                )
                    .into_response()
            }
        }
    }
}
