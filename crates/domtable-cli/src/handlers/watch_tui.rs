use crate::args::FilterArgs;
use crate::context::ExecutionContext;
use crate::presentation::renderers::TuiRenderer;
use crate::presentation::renderers::tui::App;
use anyhow::Result;

pub fn handle(ctx: &ExecutionContext, filter: &FilterArgs) -> Result<()> {
    let mut view = ctx.open_view()?;
    view.set_filter(filter.resolve());

    let (monitor, rx, warning) = match ctx.start_monitor() {
        Ok((monitor, rx)) => (Some(monitor), Some(rx), None),
        Err(e) => {
            tracing::warn!(error = %e, "running without live updates");
            (None, None, Some(format!("Live updates unavailable: {}", e)))
        }
    };

    let app = App::new(view).with_monitor_warning(warning);
    let result = TuiRenderer::run(app, rx);

    // Keep the subscription alive for the whole session
    drop(monitor);
    result
}
