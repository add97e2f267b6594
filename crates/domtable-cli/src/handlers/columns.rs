use crate::context::ExecutionContext;
use anyhow::Result;
use domtable_engine::{CellKind, ColumnKind};

/// Print every registered column: name, header, how it is computed and drawn.
/// Columns in the active layout are marked with `*`.
pub fn handle(ctx: &ExecutionContext) -> Result<()> {
    let registry = ctx.registry();
    let active: Vec<&str> = ctx.columns().iter().map(|c| c.name()).collect();
    let name_width = registry
        .columns()
        .map(|c| c.name().chars().count())
        .max()
        .unwrap_or(0);

    for column in registry.columns() {
        let marker = if active.contains(&column.name()) { "*" } else { " " };
        let source = match column.kind() {
            ColumnKind::BuiltIn(_) => "built-in",
            ColumnKind::Property(_) => "property",
        };
        let cell = match column.cell_kind() {
            CellKind::Icon => "icon",
            CellKind::Text => "text",
        };
        println!(
            "{} {:<width$}  {:<8}  {:<4}  {}",
            marker,
            column.name(),
            source,
            cell,
            column.header(),
            width = name_width
        );
    }

    Ok(())
}
