use chrono::{DateTime, Utc};
use domtable_engine::{ColumnDef, DomainTable, FilterState, Row};
use domtable_types::VmSource;

use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    Rebuilt { rows: usize },
    Failed(String),
}

/// The live table: owns the source, the column layout, the current table and
/// the user's filter. A failed rebuild keeps the last good table and is
/// reported through `error()` instead of tearing the view down.
pub struct DomainView {
    source: Box<dyn VmSource>,
    columns: Vec<ColumnDef>,
    table: DomainTable,
    filter: FilterState,
    error: Option<Error>,
    generation: u64,
    refreshed_at: Option<DateTime<Utc>>,
}

impl DomainView {
    /// Load the source and build the first table. Only an unreachable source
    /// is fatal here; a projection failure opens the view in the error state.
    pub fn open(source: Box<dyn VmSource>, columns: Vec<ColumnDef>) -> Result<Self> {
        let domains = source
            .load()
            .map_err(|e| Error::Source(format!("{}: {}", source.describe(), e)))?;

        let mut view = Self {
            table: DomainTable::empty(&columns),
            source,
            columns,
            filter: FilterState::default(),
            error: None,
            generation: 0,
            refreshed_at: None,
        };

        match DomainTable::build(&domains, &view.columns) {
            Ok(table) => view.install(table),
            Err(e) => {
                tracing::error!(error = %e, "initial table build failed");
                view.error = Some(Error::Engine(e));
            }
        }

        tracing::info!(
            source = %view.source.describe(),
            columns = view.columns.len(),
            rows = view.table.len(),
            "domain view opened"
        );
        Ok(view)
    }

    /// Reload the source and rebuild the table, keeping the filter
    pub fn refresh(&mut self) -> RefreshOutcome {
        match self.rebuild() {
            Ok(table) => {
                let rows = table.len();
                self.install(table);
                tracing::info!(generation = self.generation, rows, "table rebuilt");
                RefreshOutcome::Rebuilt { rows }
            }
            Err(e) => {
                let message = e.to_string();
                tracing::error!(error = %message, "table rebuild failed, keeping previous table");
                self.error = Some(e);
                RefreshOutcome::Failed(message)
            }
        }
    }

    fn rebuild(&self) -> Result<DomainTable> {
        let domains = self
            .source
            .load()
            .map_err(|e| Error::Source(format!("{}: {}", self.source.describe(), e)))?;
        Ok(DomainTable::build(&domains, &self.columns)?)
    }

    fn install(&mut self, table: DomainTable) {
        self.table = table;
        self.error = None;
        self.generation += 1;
        self.refreshed_at = Some(Utc::now());
    }

    pub fn toggle_state(&mut self, state: &str) -> bool {
        let hidden = self.filter.toggle_state(state);
        tracing::debug!(state, hidden, "state filter toggled");
        hidden
    }

    pub fn toggle_type(&mut self, vm_type: &str) -> bool {
        let hidden = self.filter.toggle_type(vm_type);
        tracing::debug!(vm_type, hidden, "type filter toggled");
        hidden
    }

    pub fn set_filter(&mut self, filter: FilterState) {
        self.filter = filter;
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn visible_rows(&self) -> impl Iterator<Item = &Row> {
        self.filter.visible_rows(&self.table)
    }

    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    pub fn table(&self) -> &DomainTable {
        &self.table
    }

    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// Number of successful builds so far
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.refreshed_at
    }

    pub fn source_description(&self) -> String {
        self.source.describe()
    }
}
