use anyhow::Result;
use clap::Parser;
use league_ledger::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.init_logging();
    cli.run()
}
