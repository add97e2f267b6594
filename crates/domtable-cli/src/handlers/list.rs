use crate::args::FilterArgs;
use crate::context::ExecutionContext;
use crate::presentation::json::TableDocument;
use crate::presentation::renderers::TableView;
use crate::types::OutputFormat;
use anyhow::{Result, anyhow};
use is_terminal::IsTerminal;

pub fn handle(ctx: &ExecutionContext, filter: &FilterArgs, output: OutputFormat) -> Result<()> {
    let mut view = ctx.open_view()?;
    view.set_filter(filter.resolve());

    if let Some(err) = view.error() {
        return Err(anyhow!("{}", err));
    }

    match output {
        OutputFormat::Plain => {
            let color = std::io::stdout().is_terminal();
            print!(
                "{}",
                TableView::new(view.columns(), view.visible_rows()).with_color(color)
            );
        }
        OutputFormat::Json => {
            let document = TableDocument::from_view(&view);
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
    }

    Ok(())
}
