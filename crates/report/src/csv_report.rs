//! Comma-separated report.

use csv::{Terminator, WriterBuilder};

use iou_ledger::Ledger;

use crate::grid::{ReportError, ReportOptions, build_grid};

/// Render the ledger report as CSV, one record per grid row.
///
/// Fields are quoted only when needed (a title containing a comma, say).
pub fn render_csv(ledger: &Ledger, options: &ReportOptions) -> Result<String, ReportError> {
    let rows = build_grid(ledger, options)?;

    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    for row in &rows {
        writer.write_record(row)?;
    }
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;

    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use iou_ledger::{RawLedger, build, compute_stats};

    fn ledger(json: &str) -> Ledger {
        compute_stats(build(RawLedger::from_json_str(json).unwrap()).unwrap())
    }

    #[test]
    fn renders_the_ledger_sheet() {
        let ledger = ledger(
            r#"{
                "participants": ["cat", "bob", "ann"],
                "date": { "from": "2016-01-01", "to": "2016-01-31" },
                "expenses": [
                    { "title": "Dinner", "date": "2016-01-02",
                      "creditors": [ { "name": "ann", "amount": 30 } ] },
                    { "title": "Wine", "date": "2016-01-02",
                      "creditors": [ { "name": "bob", "amount": 12 } ],
                      "debtorsSplit": ["bob", "cat"] }
                ]
            }"#,
        );

        let expected = "\
Event,ann,,bob,,cat,
,Debit,Credit,Debit,Credit,Debit,Credit
Dinner,30.00,10.00,,10.00,,10.00
Wine,,,12.00,6.00,,6.00
Total Expenses,30.00,10.00,12.00,16.00,,16.00
Balances,20.00,,-4.00,,-16.00,
";
        assert_eq!(render_csv(&ledger, &ReportOptions::default()).unwrap(), expected);
    }

    #[test]
    fn titles_with_commas_are_quoted() {
        let ledger = ledger(
            r#"{
                "participants": ["ann"],
                "date": { "from": "2016-01-01", "to": "2016-01-31" },
                "expenses": [
                    { "title": "Bread, milk", "date": "2016-01-02",
                      "creditors": [ { "name": "ann", "amount": "3.5" } ] }
                ]
            }"#,
        );

        let csv = render_csv(&ledger, &ReportOptions::default()).unwrap();
        assert_eq!(csv.lines().nth(2), Some("\"Bread, milk\",3.50,3.50"));
        // A sole payer and debtor closes at zero.
        assert_eq!(csv.lines().last(), Some("Balances,,"));
    }

    #[test]
    fn empty_ledger_has_label_rows_only() {
        let ledger = ledger(
            r#"{ "participants": [], "date": { "from": "2016-01-01", "to": "2016-01-31" }, "expenses": [] }"#,
        );

        let csv = render_csv(&ledger, &ReportOptions::default()).unwrap();
        assert_eq!(csv, "Event\nTotal Expenses\nBalances\n");
    }
}
