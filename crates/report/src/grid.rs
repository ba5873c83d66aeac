//! Cell grid shared by the renderers.

use thiserror::Error;

use iou_core::Amount;
use iou_ledger::Ledger;

/// Rendering options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// Fractional digits of every monetary cell.
    pub decimal_places: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self { decimal_places: 2 }
    }
}

#[derive(Debug, Error)]
pub enum ReportError {
    /// The ledger was built but `compute_stats` has not run on it.
    #[error("ledger stats have not been computed")]
    StatsNotComputed,

    #[error("csv output failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("report output failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("report output is not valid utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Report rows, each `1 + 2 * participants` cells wide.
///
/// Layout:
///
/// ```text
/// Event          | ann   |        | bob   |
///                | Debit | Credit | Debit | Credit
/// <title>        | paid  | share  | paid  | share     (one row per expense)
/// Total Expenses | debit | credit | debit | credit
/// Balances       | bal   |        | bal   |
/// ```
///
/// Expense cells are blank when the participant is not involved; aggregate cells are
/// blank when zero.
///
/// A ledger with no participants has no expenses either (every split group is
/// non-empty), so its grid is just the `Event`, `Total Expenses` and `Balances` labels.
pub fn build_grid(ledger: &Ledger, options: &ReportOptions) -> Result<Vec<Vec<String>>, ReportError> {
    let stats = ledger.stats().ok_or(ReportError::StatsNotComputed)?;
    let participants: Vec<&str> = ledger.participants_all().iter().map(|p| p.as_str()).collect();
    let places = options.decimal_places;
    let fmt = |amount: &Amount| amount.to_decimal(places);
    let fmt_nonzero = |amount: Option<&Amount>| match amount {
        Some(a) if !a.is_zero() => a.to_decimal(places),
        _ => String::new(),
    };

    let width = 1 + 2 * participants.len();
    let mut rows = Vec::with_capacity(ledger.expenses().len() + 4);

    let mut header = Vec::with_capacity(width);
    header.push("Event".to_string());
    for p in &participants {
        header.push(p.to_string());
        header.push(String::new());
    }
    rows.push(header);

    // Without participants this row would hold a single empty cell.
    if !participants.is_empty() {
        let mut columns = Vec::with_capacity(width);
        columns.push(String::new());
        for _ in &participants {
            columns.push("Debit".to_string());
            columns.push("Credit".to_string());
        }
        rows.push(columns);
    }

    for expense in ledger.expenses() {
        let split_debt = expense.split_debt().ok_or(ReportError::StatsNotComputed)?;
        let mut row = Vec::with_capacity(width);
        row.push(expense.title().to_string());
        for p in &participants {
            row.push(expense.contribution(p).map(fmt).unwrap_or_default());
            row.push(if expense.debtors_split().contains(p) {
                fmt(split_debt)
            } else {
                String::new()
            });
        }
        rows.push(row);
    }

    let mut totals = Vec::with_capacity(width);
    totals.push("Total Expenses".to_string());
    for p in &participants {
        totals.push(fmt_nonzero(stats.debit_of(p)));
        totals.push(fmt_nonzero(stats.credit_of(p)));
    }
    rows.push(totals);

    let mut balances = Vec::with_capacity(width);
    balances.push("Balances".to_string());
    for p in &participants {
        balances.push(fmt_nonzero(stats.balance_of(p)));
        balances.push(String::new());
    }
    rows.push(balances);

    Ok(rows)
}
