/// Console watch handler - prints the table, then reprints it after every rebuild
use crate::args::FilterArgs;
use crate::context::ExecutionContext;
use crate::presentation::renderers::TableView;
use anyhow::Result;
use domtable_runtime::{DomainView, MonitorEvent, RefreshOutcome};
use is_terminal::IsTerminal;
use std::io::Write;
use std::sync::mpsc::channel;

pub fn handle(ctx: &ExecutionContext, filter: &FilterArgs) -> Result<()> {
    let mut view = ctx.open_view()?;
    view.set_filter(filter.resolve());
    let color = std::io::stdout().is_terminal();

    if let Some(err) = view.error() {
        eprintln!("Error: {}", err);
    }
    print_table(&view, color)?;

    // Without a monitor the channel never fires and the table stays as printed
    let (_monitor, _keepalive, rx) = match ctx.start_monitor() {
        Ok((monitor, rx)) => (Some(monitor), None, rx),
        Err(e) => {
            tracing::warn!(error = %e, "running without live updates");
            eprintln!("Warning: live updates unavailable: {}", e);
            let (tx, rx) = channel::<MonitorEvent>();
            (None, Some(tx), rx)
        }
    };

    while let Ok(event) = rx.recv() {
        match event {
            MonitorEvent::Changed { .. } => match view.refresh() {
                RefreshOutcome::Rebuilt { .. } => print_table(&view, color)?,
                RefreshOutcome::Failed(msg) => eprintln!("Error: {}", msg),
            },
            MonitorEvent::Error(msg) => eprintln!("Warning: {}", msg),
        }
    }

    Ok(())
}

fn print_table(view: &DomainView, color: bool) -> Result<()> {
    let refreshed = view
        .refreshed_at()
        .map(|at| at.with_timezone(&chrono::Local).format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "never".to_string());

    let mut stdout = std::io::stdout().lock();
    writeln!(
        stdout,
        "[{}] generation {}: {} of {} domains",
        refreshed,
        view.generation(),
        view.visible_rows().count(),
        view.table().len()
    )?;
    write!(
        stdout,
        "{}",
        TableView::new(view.columns(), view.visible_rows()).with_color(color)
    )?;
    writeln!(stdout)?;
    stdout.flush()?;
    Ok(())
}
