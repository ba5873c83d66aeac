//! Aligned plain-text report for terminals.

use iou_ledger::Ledger;

use crate::grid::{ReportError, ReportOptions, build_grid};

const COLUMN_GAP: &str = "  ";

/// Render the ledger report as a padded table.
///
/// The label column is left-aligned, amount columns are right-aligned.
pub fn render_text(ledger: &Ledger, options: &ReportOptions) -> Result<String, ReportError> {
    let rows = build_grid(ledger, options)?;

    let columns = rows.first().map_or(0, Vec::len);
    let widths: Vec<usize> = (0..columns)
        .map(|col| rows.iter().map(|r| r[col].chars().count()).max().unwrap_or(0))
        .collect();

    let mut out = String::new();
    for row in &rows {
        let line = row
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(col, (cell, &width))| {
                if col == 0 {
                    format!("{cell:<width$}")
                } else {
                    format!("{cell:>width$}")
                }
            })
            .collect::<Vec<_>>()
            .join(COLUMN_GAP);
        out.push_str(line.trim_end());
        out.push('\n');
    }
    Ok(out)
}
