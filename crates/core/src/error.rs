//! Ledger error model.

use thiserror::Error;

/// Result type used across the ledger crates.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Position of an expense inside the source record, used to locate bad input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseRef {
    /// Zero-based position in the ledger's expense list.
    pub index: usize,
    pub title: String,
}

impl ExpenseRef {
    pub fn new(index: usize, title: impl Into<String>) -> Self {
        Self {
            index,
            title: title.into(),
        }
    }
}

impl core::fmt::Display for ExpenseRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "expense #{} ({:?})", self.index, self.title)
    }
}

/// Ledger-level error.
///
/// Every variant except `InvariantViolation` is raised while building a ledger from
/// its source record. All of them are terminal: no partial ledger is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// A creditor amount is not an exact number, or is negative.
    #[error("{expense}: malformed amount {amount:?} for creditor {creditor:?}: {reason}")]
    MalformedAmount {
        expense: ExpenseRef,
        creditor: String,
        amount: String,
        reason: String,
    },

    /// An expense resolved to an empty debtor set.
    #[error("{expense}: debtor split group is empty")]
    EmptySplitGroup { expense: ExpenseRef },

    /// The same creditor appears twice within one expense.
    #[error("{expense}: creditor {creditor:?} is listed more than once")]
    DuplicateCreditor { expense: ExpenseRef, creditor: String },

    /// A date literal could not be parsed.
    #[error("malformed date {value:?} in {field}")]
    MalformedDate { field: String, value: String },

    /// Computed stats do not close (debits, credits and total expenses disagree).
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

impl LedgerError {
    pub fn malformed_amount(
        expense: ExpenseRef,
        creditor: impl Into<String>,
        amount: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedAmount {
            expense,
            creditor: creditor.into(),
            amount: amount.into(),
            reason: reason.into(),
        }
    }

    pub fn malformed_date(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::MalformedDate {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }
}
