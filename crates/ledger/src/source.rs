//! Ledger source: the JSON record format and file loading.
//!
//! ```json
//! {
//!   "participants": ["ann", "bob"],
//!   "date": { "from": "2016-01-01", "to": "2016-01-31" },
//!   "expenses": [
//!     { "title": "Groceries", "date": "2016-01-02",
//!       "creditors": [ { "name": "ann", "amount": 12.50 } ],
//!       "debtorsSplit": ["ann", "bob"] }
//!   ]
//! }
//! ```
//!
//! Numbers are read with `serde_json`'s `arbitrary_precision`, so the literal text of
//! an amount reaches the exact parser untouched.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

use iou_core::LedgerError;

use crate::model::{Ledger, build};
use crate::stats::compute_stats;

/// Raw ledger record, as found in the source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLedger {
    pub participants: Vec<String>,
    pub date: RawDateRange,
    #[serde(default)]
    pub expenses: Vec<RawExpense>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDateRange {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawExpense {
    pub title: String,
    pub date: String,
    #[serde(default)]
    pub creditors: Vec<RawCreditor>,
    /// When absent, the expense is shared by every declared participant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debtors_split: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCreditor {
    pub name: String,
    /// Number or numeric string; validated by `build`.
    pub amount: serde_json::Value,
}

impl RawLedger {
    pub fn from_json_str(json: &str) -> Result<Self, SourceError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SourceError> {
        Ok(serde_json::from_reader(reader)?)
    }
}

/// Failure to load a ledger from its source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read ledger file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid ledger record: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Read, build and compute a ledger file in one step.
#[instrument(skip_all, fields(path = %path.as_ref().display()), err)]
pub fn open_ledger(path: impl AsRef<Path>) -> Result<Ledger, SourceError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let raw = RawLedger::from_reader(BufReader::new(file))?;
    let ledger = compute_stats(build(raw)?);

    tracing::info!(
        participants = ledger.participants_all().len(),
        expenses = ledger.expenses().len(),
        "ledger opened"
    );
    Ok(ledger)
}
