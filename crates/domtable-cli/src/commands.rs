use super::args::{Cli, Commands};
use super::handlers;
use crate::context::ExecutionContext;
use crate::logging::{LogConfig, init_logging};
use crate::types::WatchMode;
use anyhow::Result;
use domtable_runtime::{LOG_FILE, resolve_data_dir};
use is_terminal::IsTerminal;

pub fn run(mut cli: Cli) -> Result<()> {
    let data_dir = resolve_data_dir(cli.data_dir.as_deref())?;
    let command = cli.command.take().unwrap_or_default();

    // The TUI owns the terminal, so its logs go to a file
    let log_file = matches!(
        command,
        Commands::Watch {
            mode: WatchMode::Tui,
            ..
        }
    )
    .then(|| data_dir.join(LOG_FILE));
    init_logging(
        &LogConfig::default()
            .with_level(cli.log_level.into())
            .with_ansi(std::io::stderr().is_terminal())
            .with_log_file(log_file),
    )?;

    let ctx = ExecutionContext::new(&cli, data_dir)?;
    tracing::debug!(
        data_dir = %ctx.data_dir().display(),
        columns = ctx.columns().len(),
        "resolved execution context"
    );

    match command {
        Commands::Watch { mode, filter } => handlers::watch::handle(&ctx, &filter, mode),
        Commands::List { output, filter } => handlers::list::handle(&ctx, &filter, output),
        Commands::Columns => handlers::columns::handle(&ctx),
    }
}
