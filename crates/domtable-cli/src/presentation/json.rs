use chrono::{DateTime, Utc};
use domtable_engine::{CellKind, FilterState, Row};
use domtable_runtime::DomainView;
use serde::Serialize;

/// `list --output json` document. Cells carry raw icon identifiers.
#[derive(Debug, Serialize)]
pub struct TableDocument<'a> {
    pub source: String,
    pub generation: u64,
    pub refreshed_at: Option<DateTime<Utc>>,
    pub columns: Vec<ColumnDocument<'a>>,
    pub filter: &'a FilterState,
    pub rows: Vec<&'a Row>,
}

#[derive(Debug, Serialize)]
pub struct ColumnDocument<'a> {
    pub name: &'a str,
    pub header: &'a str,
    pub kind: &'static str,
    pub property: bool,
}

impl<'a> TableDocument<'a> {
    pub fn from_view(view: &'a DomainView) -> Self {
        Self {
            source: view.source_description(),
            generation: view.generation(),
            refreshed_at: view.refreshed_at(),
            columns: view
                .columns()
                .iter()
                .map(|column| ColumnDocument {
                    name: column.name(),
                    header: column.header(),
                    kind: match column.cell_kind() {
                        CellKind::Icon => "icon",
                        CellKind::Text => "text",
                    },
                    property: column.is_property(),
                })
                .collect(),
            filter: view.filter(),
            rows: view.visible_rows().collect(),
        }
    }
}
