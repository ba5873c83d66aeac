//! `iou-core`: building blocks shared by the ledger crates.
//!
//! This crate contains **pure domain** primitives (no IO): participant identifiers,
//! the exact money type and the ledger error model.

pub mod error;
pub mod id;
pub mod money;

pub use error::{ExpenseRef, LedgerError, LedgerResult};
pub use id::ParticipantId;
pub use money::{Amount, ParseAmountError};
