use anyhow::Result;
use clap::Parser;

use pathfinder_cli::commands::solve::{handle_solve, SolveCommandArgs};
use pathfinder_cli::logging::{init_logging, LogFormat, LoggingConfig};

#[derive(Parser, Debug)]
#[command(author, version, about = "Shortest route through a cave grid")]
struct Cli {
    /// Log output format.
    #[arg(long, value_enum, env = "PATHFINDER_LOG_FORMAT", default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(flatten)]
    solve: SolveCommandArgs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&LoggingConfig::default().with_format(cli.log_format));

    handle_solve(&cli.solve)
}
