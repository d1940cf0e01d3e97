//! The persistent key-value slot backing the transaction store.
//!
//! The whole transaction collection is stored as one JSON document under a
//! single key, read whole at start-up and overwritten whole on every save.

use rusqlite::{Connection, OptionalExtension};

/// The key under which the transaction collection is stored.
pub(crate) const SLOT_KEY: &str = "pocket_ledger.transactions.v1";

/// Create the slot table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub(crate) fn create_slot_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS slot (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
                )",
        (),
    )?;

    Ok(())
}

/// Read the raw slot content, or `None` if nothing has been stored yet.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub(crate) fn read_slot(connection: &Connection) -> Result<Option<String>, rusqlite::Error> {
    connection
        .query_row("SELECT value FROM slot WHERE key = ?1", [SLOT_KEY], |row| {
            row.get(0)
        })
        .optional()
}

/// Overwrite the slot content unconditionally.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub(crate) fn write_slot(connection: &Connection, value: &str) -> Result<(), rusqlite::Error> {
    connection.execute(
        "INSERT INTO slot (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        (SLOT_KEY, value),
    )?;

    Ok(())
}

#[cfg(test)]
mod slot_tests {
    use rusqlite::Connection;

    use super::{create_slot_table, read_slot, write_slot};

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        create_slot_table(&conn).unwrap();
        conn
    }

    #[test]
    fn create_slot_table_is_idempotent() {
        let conn = get_test_connection();

        let result = create_slot_table(&conn);

        assert_eq!(result, Ok(()));
    }

    #[test]
    fn read_returns_none_on_empty_slot() {
        let conn = get_test_connection();

        let content = read_slot(&conn).unwrap();

        assert_eq!(content, None);
    }

    #[test]
    fn write_then_read_round_trips() {
        let conn = get_test_connection();

        write_slot(&conn, "[1, 2, 3]").unwrap();

        assert_eq!(read_slot(&conn).unwrap(), Some("[1, 2, 3]".to_owned()));
    }

    #[test]
    fn write_overwrites_previous_content() {
        let conn = get_test_connection();
        write_slot(&conn, "old").unwrap();

        write_slot(&conn, "new").unwrap();

        assert_eq!(read_slot(&conn).unwrap(), Some("new".to_owned()));
    }
}
