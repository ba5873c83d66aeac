//! Report rendering for computed ledgers.
//!
//! Renderers only read a finalized ledger: one row per expense, a `Total Expenses`
//! row and a `Balances` row, with a debit and a credit column per participant.

pub mod csv_report;
pub mod grid;
pub mod text_report;

pub use csv_report::render_csv;
pub use grid::{ReportError, ReportOptions};
pub use text_report::render_text;
