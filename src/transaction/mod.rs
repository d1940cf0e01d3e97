//! Transaction pages and endpoints for the budgeting application.
//!
//! This module contains everything the web UI does with transactions:
//! - The list page with its live search and type filter
//! - The new/edit form pages
//! - The create, update and delete endpoints

mod create_transaction_endpoint;
mod delete_transaction_endpoint;
mod edit_transaction_page;
mod form;
mod new_transaction_page;
mod transactions_page;
mod update_transaction_endpoint;

pub use create_transaction_endpoint::create_transaction_endpoint;
pub use delete_transaction_endpoint::delete_transaction_endpoint;
pub use edit_transaction_page::get_edit_transaction_page;
pub use new_transaction_page::get_new_transaction_page;
pub use transactions_page::{get_transactions_page, get_transactions_table};
pub use update_transaction_endpoint::update_transaction_endpoint;
