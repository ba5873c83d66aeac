use std::io::Write;

use anyhow::Context;

use iou_ledger::{Ledger, open_ledger};
use iou_report::{ReportOptions, render_csv, render_text};

use crate::cli::{CheckArgs, Cli, Command, OutputFormat, ReportArgs};

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(&cli.command, &mut out)?;
    out.flush()?;
    Ok(())
}

fn execute(command: &Command, out: &mut impl Write) -> anyhow::Result<()> {
    match command {
        Command::Report(args) => report(args, out),
        Command::Check(args) => check(args, out),
    }
}

fn load(file: &std::path::Path) -> anyhow::Result<Ledger> {
    open_ledger(file).with_context(|| format!("cannot load ledger {}", file.display()))
}

fn report(args: &ReportArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let ledger = load(&args.file)?;
    let options = ReportOptions {
        decimal_places: usize::from(args.places),
    };

    let rendered = match args.format {
        OutputFormat::Csv => render_csv(&ledger, &options)?,
        OutputFormat::Text => render_text(&ledger, &options)?,
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&ledger)?;
            json.push('\n');
            json
        }
    };
    out.write_all(rendered.as_bytes())?;
    Ok(())
}

fn check(args: &CheckArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let ledger = load(&args.file)?;
    let stats = ledger
        .stats()
        .context("stats missing after computation")?;
    stats
        .verify_conservation()
        .with_context(|| format!("balances of {} do not close", args.file.display()))?;

    tracing::info!(file = %args.file.display(), "ledger balances close");
    writeln!(
        out,
        "ok: {} participants, {} expenses, total {}",
        ledger.participants_all().len(),
        ledger.expenses().len(),
        stats.total_expenses.to_decimal(2)
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const LEDGER: &str = r#"{
        "participants": ["ann", "bob"],
        "date": { "from": "2016-01-01", "to": "2016-01-31" },
        "expenses": [
            { "title": "Pizza", "date": "2016-01-02",
              "creditors": [ { "name": "ann", "amount": 21.5 } ] }
        ]
    }"#;

    fn ledger_file(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("iou-cli-{name}-{}.json", std::process::id()));
        std::fs::write(&path, LEDGER).unwrap();
        path
    }

    fn run(command: Command) -> anyhow::Result<String> {
        let mut out = Vec::new();
        execute(&command, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn report_prints_csv() {
        let file = ledger_file("csv");
        let output = run(Command::Report(ReportArgs {
            file: file.clone(),
            format: OutputFormat::Csv,
            places: 2,
        }));
        std::fs::remove_file(&file).unwrap();

        let output = output.unwrap();
        assert!(output.starts_with("Event,ann,,bob,\n"));
        assert!(output.ends_with("Balances,10.75,,-10.75,\n"));
    }

    #[test]
    fn report_prints_exact_json() {
        let file = ledger_file("json");
        let output = run(Command::Report(ReportArgs {
            file: file.clone(),
            format: OutputFormat::Json,
            places: 2,
        }));
        std::fs::remove_file(&file).unwrap();

        let value: serde_json::Value = serde_json::from_str(&output.unwrap()).unwrap();
        assert_eq!(value["stats"]["totalExpenses"], "43/2");
        assert_eq!(value["expenses"][0]["splitDebt"], "43/4");
        assert_eq!(value["participantsAll"], serde_json::json!(["ann", "bob"]));
    }

    #[test]
    fn check_summarizes() {
        let file = ledger_file("check");
        let output = run(Command::Check(CheckArgs { file: file.clone() }));
        std::fs::remove_file(&file).unwrap();

        assert_eq!(output.unwrap(), "ok: 2 participants, 1 expenses, total 21.50\n");
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = run(Command::Check(CheckArgs {
            file: PathBuf::from("/nonexistent/ledger.json"),
        }))
        .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/ledger.json"));
    }
}
