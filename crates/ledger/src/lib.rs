//! Shared-expense ledger: typed model, balance computation and source loading.
//!
//! `model` and `stats` are pure domain logic (no IO). `source` reads the JSON record
//! format from disk and runs the whole pipeline.

pub mod model;
pub mod source;
pub mod stats;

pub use model::{DateRange, Expense, ExpenseTotals, Ledger, SplitGroup, build};
pub use source::{RawCreditor, RawDateRange, RawExpense, RawLedger, SourceError, open_ledger};
pub use stats::{Stats, compute_stats};
