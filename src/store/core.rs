//! Defines the transaction model and the store that owns the collection.

use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::{Date, Duration, OffsetDateTime};
use uuid::Uuid;

use crate::{Error, store::slot};

/// The category assigned to transactions that were submitted without one.
pub const DEFAULT_CATEGORY: &str = "General";

/// Whether a transaction brought money in or sent money out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money earned, e.g. an allowance or freelance payment.
    Income,
    /// Money spent, e.g. groceries or a bus fare.
    Expense,
}

impl TransactionKind {
    /// The lowercase name used in forms and stored JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// Serializes with the stored field names `id`, `date`, `category`, `amount`,
/// `type` and `note`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The unique ID of the transaction. Assigned by the store, never reused.
    pub id: String,
    /// When the transaction happened.
    pub date: Date,
    /// A free-text label grouping similar transactions, e.g. "Food".
    pub category: String,
    /// The amount of money spent or earned in this transaction.
    pub amount: f64,
    /// Whether this transaction is an income or an expense.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// An optional text description of what the transaction was for.
    #[serde(default)]
    pub note: String,
}

impl Transaction {
    /// Validate `draft` and turn it into a transaction with the given `id`.
    ///
    /// # Errors
    /// Returns [Error::InvalidTransaction] naming the offending field(s) if
    /// the amount is missing, zero or non-finite, or if the date is missing.
    fn from_draft(id: String, draft: TransactionDraft) -> Result<Self, Error> {
        let amount = draft
            .amount
            .filter(|amount| amount.is_finite() && *amount != 0.0);

        match (amount, draft.date) {
            (Some(amount), Some(date)) => Ok(Self {
                id,
                date,
                category: draft
                    .category
                    .filter(|category| !category.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_CATEGORY.to_owned()),
                amount,
                kind: draft.kind,
                note: draft.note,
            }),
            (amount, date) => {
                let mut invalid_fields = Vec::new();

                if amount.is_none() {
                    invalid_fields.push("amount");
                }

                if date.is_none() {
                    invalid_fields.push("date");
                }

                Err(Error::InvalidTransaction(invalid_fields.join(", ")))
            }
        }
    }
}

/// The user-supplied fields for creating or updating a transaction.
///
/// A draft carries no ID: the store assigns a fresh one on create and keeps
/// the existing one on update. Optional fields are validated at the write
/// boundary rather than at the type level so that a single error can name
/// every field that failed.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    /// The amount of money spent or earned. Must be finite and non-zero.
    pub amount: Option<f64>,
    /// When the transaction happened. Required.
    pub date: Option<Date>,
    /// The category label. Blank or missing values fall back to
    /// [DEFAULT_CATEGORY].
    pub category: Option<String>,
    /// Whether this transaction is an income or an expense.
    pub kind: TransactionKind,
    /// An optional text description.
    pub note: String,
}

/// Owns the ordered transaction collection and its persistent slot.
///
/// The collection is held in memory and written whole to the slot after every
/// mutation. New records are prepended so the most recent entry comes first;
/// edits replace records in place.
#[derive(Debug)]
pub struct TransactionStore {
    connection: Connection,
    transactions: Vec<Transaction>,
}

impl TransactionStore {
    /// Open a store over `connection`, loading any previously persisted
    /// transactions.
    ///
    /// If the slot is empty or its content cannot be parsed, the store falls
    /// back to a fixed set of sample transactions and immediately persists
    /// that fallback. Parse failures are logged, not propagated.
    ///
    /// # Errors
    /// Returns an error if the slot table cannot be created.
    pub fn new(connection: Connection) -> Result<Self, Error> {
        slot::create_slot_table(&connection)?;

        match read_stored_transactions(&connection) {
            Some(transactions) => Ok(Self {
                connection,
                transactions,
            }),
            None => {
                let today = OffsetDateTime::now_utc().date();
                let store = Self {
                    connection,
                    transactions: seed_transactions(today),
                };
                store.persist();

                Ok(store)
            }
        }
    }

    /// The current collection, most recent first.
    pub fn list(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Look up a transaction by its `id`.
    pub fn get(&self, id: &str) -> Option<&Transaction> {
        self.transactions
            .iter()
            .find(|transaction| transaction.id == id)
    }

    /// Validate `draft` and add it to the front of the collection.
    ///
    /// # Errors
    /// Returns [Error::InvalidTransaction] if validation fails. The
    /// collection is not modified in that case.
    pub fn create(&mut self, draft: TransactionDraft) -> Result<Transaction, Error> {
        let transaction = Transaction::from_draft(new_transaction_id(), draft)?;

        self.transactions.insert(0, transaction.clone());
        self.persist();

        Ok(transaction)
    }

    /// Validate `draft` and replace the record matching `id` in place.
    ///
    /// The record keeps its position in the collection and its ID.
    ///
    /// # Errors
    /// Returns [Error::TransactionNotFound] if no record matches `id`, or
    /// [Error::InvalidTransaction] if validation fails. The collection is not
    /// modified in either case.
    pub fn update(&mut self, id: &str, draft: TransactionDraft) -> Result<Transaction, Error> {
        let index = self
            .transactions
            .iter()
            .position(|transaction| transaction.id == id)
            .ok_or_else(|| Error::TransactionNotFound(id.to_owned()))?;

        let transaction = Transaction::from_draft(id.to_owned(), draft)?;
        self.transactions[index] = transaction.clone();
        self.persist();

        Ok(transaction)
    }

    /// Remove the record matching `id`, permanently.
    ///
    /// Deleting an ID that is not in the collection is a no-op, not an error.
    pub fn delete(&mut self, id: &str) {
        self.transactions.retain(|transaction| transaction.id != id);
        self.persist();
    }

    /// Serialize the full collection and overwrite the slot unconditionally.
    ///
    /// # Errors
    /// Returns an error if serialization or the slot write fails.
    pub fn save(&self) -> Result<(), Error> {
        let raw = serde_json::to_string(&self.transactions)
            .map_err(|error| Error::JsonSerialization(error.to_string()))?;
        slot::write_slot(&self.connection, &raw)?;

        Ok(())
    }

    /// Save, logging failures instead of propagating them.
    ///
    /// A failed write leaves the in-memory collection correct and is retried
    /// implicitly on the next save.
    fn persist(&self) {
        if let Err(error) = self.save() {
            tracing::error!("could not persist transactions, keeping in-memory changes: {error}");
        }
    }
}

/// Read and parse the slot content.
///
/// Returns `None` if the slot is empty, unreadable or holds content that does
/// not parse as a transaction array. Failures are logged here so callers can
/// treat all three cases as "start from the sample data".
fn read_stored_transactions(connection: &Connection) -> Option<Vec<Transaction>> {
    let raw = match slot::read_slot(connection) {
        Ok(raw) => raw?,
        Err(error) => {
            tracing::error!("could not read the transaction slot: {error}");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(transactions) => Some(transactions),
        Err(error) => {
            tracing::error!("could not parse stored transactions, falling back to sample data: {error}");
            None
        }
    }
}

/// Generate a fresh transaction ID.
///
/// IDs only need to be unique within the collection.
fn new_transaction_id() -> String {
    Uuid::new_v4().to_string()
}

/// The sample transactions shown on first run, dated relative to `today`.
fn seed_transactions(today: Date) -> Vec<Transaction> {
    let sample = |days_ago: i64, category: &str, amount: f64, kind, note: &str| Transaction {
        id: new_transaction_id(),
        date: today - Duration::days(days_ago),
        category: category.to_owned(),
        amount,
        kind,
        note: note.to_owned(),
    };

    vec![
        sample(
            1,
            "Food",
            25.5,
            TransactionKind::Expense,
            "Lunch at the campus cafeteria",
        ),
        sample(2, "Transport", 5.0, TransactionKind::Expense, "Bus fare"),
        sample(
            4,
            "Income",
            500.0,
            TransactionKind::Income,
            "Monthly allowance",
        ),
        sample(
            6,
            "Books",
            120.0,
            TransactionKind::Expense,
            "Calculus textbook",
        ),
        sample(
            10,
            "Entertainment",
            45.0,
            TransactionKind::Expense,
            "Movies with friends",
        ),
        sample(
            12,
            "Income",
            300.0,
            TransactionKind::Income,
            "Freelance work",
        ),
    ]
}
