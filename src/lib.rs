//! # Expense Tracker
//!
//! A personal expense ledger persisted as a CSV table, with derived
//! category, monthly, and budget reports.
//!
//! ## Design Principles
//!
//! - **Snapshot values**: ledger operations take a snapshot and return a
//!   new one instead of mutating shared state
//! - **Decimal arithmetic**: amounts use `rust_decimal` via [`Money`]
//! - **Whole-file rewrite**: every mutation persists the full table, written
//!   to a temp file and renamed into place
//! - **Deterministic reports**: category totals iterate in a fixed order
//!
//! ## Example
//!
//! ```no_run
//! use chrono::Local;
//! use expense_tracker::{report, LedgerStore};
//!
//! let store = LedgerStore::new("expense.csv");
//! let ledger = store.load().unwrap();
//!
//! let today = Local::now().date_naive();
//! let (ledger, id) = store.append(&ledger, "lunch", "Food", "12.50", today).unwrap();
//! println!("recorded #{id}: {:?}", report::category_totals(&ledger));
//! ```

pub mod error;
pub mod expense;
pub mod money;
pub mod report;
pub mod store;

pub use error::{LedgerError, Result};
pub use expense::{Category, Expense};
pub use money::Money;
pub use report::BudgetProjection;
pub use store::{Ledger, LedgerStore};
