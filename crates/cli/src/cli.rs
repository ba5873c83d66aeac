use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use iou_observability::LogFormat;

const MAX_PLACES: i64 = 12;

#[derive(Parser, Debug)]
#[command(
    name = "iou",
    about = "Who paid what, who owes what: exact balances for shared expenses",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log debug events to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, env = "IOU_LOG_FORMAT", default_value = "text")]
    pub log_format: LogFormatArg,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormatArg {
    Text,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(value: LogFormatArg) -> Self {
        match value {
            LogFormatArg::Text => LogFormat::Text,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Comma-separated sheet
    Csv,
    /// Aligned table
    Text,
    /// Full ledger with exact stats
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the expense report of a ledger file
    Report(ReportArgs),
    /// Validate a ledger file and check that balances close
    Check(CheckArgs),
}

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Ledger file (JSON)
    pub file: PathBuf,

    #[arg(short, long, env = "IOU_FORMAT", default_value = "csv")]
    pub format: OutputFormat,

    /// Decimal places of monetary cells (at most 12)
    #[arg(
        long,
        env = "IOU_PLACES",
        default_value_t = 2,
        value_parser = clap::value_parser!(u8).range(..=MAX_PLACES)
    )]
    pub places: u8,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Ledger file (JSON)
    pub file: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_defaults() {
        let cli = Cli::try_parse_from(["iou", "report", "trip.json"]).unwrap();
        match cli.command {
            Command::Report(args) => {
                assert_eq!(args.file, PathBuf::from("trip.json"));
                assert_eq!(args.places, 2);
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert!(!cli.verbose);
    }

    #[test]
    fn report_flags() {
        let cli = Cli::try_parse_from([
            "iou", "report", "trip.json", "--format", "text", "--places", "3", "-v", "--log-format", "json",
        ])
        .unwrap();
        let Command::Report(args) = cli.command else {
            panic!("expected report");
        };
        assert_eq!(args.format, OutputFormat::Text);
        assert_eq!(args.places, 3);
        assert!(cli.verbose);
        assert_eq!(cli.log_format, LogFormatArg::Json);
    }

    #[test]
    fn places_are_bounded() {
        let cli = Cli::try_parse_from(["iou", "report", "trip.json", "--places", "12"]).unwrap();
        let Command::Report(args) = cli.command else {
            panic!("expected report");
        };
        assert_eq!(args.places, 12);

        for places in ["13", "1000000", "-1"] {
            assert!(
                Cli::try_parse_from(["iou", "report", "trip.json", "--places", places]).is_err(),
                "--places {places} should be rejected"
            );
        }
    }

    #[test]
    fn unknown_format_is_rejected() {
        assert!(Cli::try_parse_from(["iou", "report", "trip.json", "--format", "xml"]).is_err());
    }

    #[test]
    fn check_requires_a_file() {
        assert!(Cli::try_parse_from(["iou", "check"]).is_err());
    }
}
