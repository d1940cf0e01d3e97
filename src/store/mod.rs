//! Transaction storage for the budgeting application.
//!
//! This module contains the transaction model, the store that owns the
//! ordered collection, and the persistent key-value slot the collection is
//! saved to.

mod core;
pub(crate) mod slot;

pub use self::core::{
    DEFAULT_CATEGORY, Transaction, TransactionDraft, TransactionKind, TransactionStore,
};
