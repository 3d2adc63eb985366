use anyhow::Result;
use clap::{CommandFactory, Parser};

use taskdash::cli::{self, Cli, Commands};

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Sheets(args)) => cli::sheets::run(args),
        Some(Commands::Kpi(args)) => cli::kpi::run(args),
        Some(Commands::Overdue(args)) => cli::overdue::run(args),
        Some(Commands::Export(args)) => cli::export::run(args),
        Some(Commands::Completion { shell }) => {
            clap_complete::generate(shell, &mut Cli::command(), "tdash", &mut std::io::stdout());
            Ok(())
        }
        None => taskdash::tui::run(cli.file),
    }
}

/// Logging is off by default so it never corrupts the TUI; set
/// TASKDASH_DEBUG=1 to get diagnostics on stderr (filter via RUST_LOG).
fn init_logging() {
    if std::env::var_os("TASKDASH_DEBUG").is_none() {
        return;
    }

    use tracing_subscriber::EnvFilter;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("taskdash=debug")),
        )
        .with_writer(std::io::stderr)
        .init();
}
