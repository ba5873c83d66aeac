use clap::Parser;

mod cli;
mod commands;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    iou_observability::init(cli.log_format.into(), default_filter);
    commands::run_command(cli)
}
