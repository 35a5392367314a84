//! Data acquisition: everything that turns outside input into a validated
//! [`crate::models::Dataset`] before the chart core runs.
//!
//! - [`table`]: two-column `label, value` tables
//! - [`bank`]: bank-account CSV exports and period comparison
//! - [`remote`]: the expense backend's JSON API
//! - [`loader`]: background acquisition, newest request wins

pub mod bank;
pub mod loader;
pub mod remote;
pub mod table;

pub use bank::{ImportSettings, compare_expenses, load_cost_items, load_cost_items_from_path};
pub use loader::{CancelToken, DatasetLoader, Ticket};
pub use remote::ExpenseClient;
pub use table::{dataset_from_rows, read_table_csv};
