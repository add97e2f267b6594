use crate::args::FilterArgs;
use crate::context::ExecutionContext;
use crate::types::WatchMode;
use anyhow::Result;
use is_terminal::IsTerminal;

use super::{watch_console, watch_tui};

pub fn handle(ctx: &ExecutionContext, filter: &FilterArgs, mode: WatchMode) -> Result<()> {
    let use_tui = mode == WatchMode::Tui && std::io::stdout().is_terminal();
    if mode == WatchMode::Tui && !use_tui {
        tracing::warn!("stdout is not a terminal, falling back to console mode");
    }

    let effective = if use_tui {
        WatchMode::Tui
    } else {
        WatchMode::Console
    };
    tracing::info!(
        source = %ctx.source_path().display(),
        state_file = %ctx.state_file().display(),
        mode = %effective,
        "starting watch"
    );

    if use_tui {
        watch_tui::handle(ctx, filter)
    } else {
        watch_console::handle(ctx, filter)
    }
}
