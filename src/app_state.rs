//! Implements a struct that holds the state of the web server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{Error, store::TransactionStore};

/// The state of the web server.
///
/// Owns the one [TransactionStore]; route handlers borrow it through the
/// mutex for the duration of each request.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The transaction store shared by all route handlers.
    pub store: Arc<Mutex<TransactionStore>>,
}

impl AppState {
    /// Create a new [AppState] with a SQLite-backed transaction store.
    ///
    /// This function will initialize the storage slot and load any previously
    /// persisted transactions, seeding sample data on first run.
    ///
    /// # Errors
    /// Returns an error if the storage slot cannot be initialized.
    pub fn new(connection: Connection) -> Result<Self, Error> {
        let store = TransactionStore::new(connection)?;

        Ok(Self {
            store: Arc::new(Mutex::new(store)),
        })
    }
}
