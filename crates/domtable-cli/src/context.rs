use anyhow::{Result, bail};
use domtable_engine::{ColumnDef, ColumnRegistry, ColumnSelection, Format};
use domtable_runtime::{
    ChangeMonitor, Config, DomainView, MonitorEvent, MonitorOptions, SnapshotSource,
};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Receiver;

use crate::args::Cli;

/// Everything a command needs, resolved once from flags and `config.toml`.
/// Flags win over config values.
pub struct ExecutionContext {
    data_dir: PathBuf,
    source_path: PathBuf,
    state_file: PathBuf,
    monitor_options: MonitorOptions,
    registry: ColumnRegistry,
    columns: Vec<ColumnDef>,
}

impl ExecutionContext {
    pub fn new(cli: &Cli, data_dir: PathBuf) -> Result<Self> {
        let selection = column_selection(cli.fields.as_deref(), cli.format.map(Format::from))?;
        let config = Config::load_from(&Config::path_in(&data_dir))?;

        let mut registry = ColumnRegistry::new();
        let columns = selection.resolve(&mut registry);

        Ok(Self {
            source_path: cli
                .source
                .clone()
                .unwrap_or_else(|| config.source_path(&data_dir)),
            state_file: cli
                .state_file
                .clone()
                .unwrap_or_else(|| config.state_file_path()),
            monitor_options: MonitorOptions::with_debounce_ms(config.debounce_ms),
            data_dir,
            registry,
            columns,
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn state_file(&self) -> &Path {
        &self.state_file
    }

    pub fn registry(&self) -> &ColumnRegistry {
        &self.registry
    }

    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    /// Load the snapshot and build the first table.
    pub fn open_view(&self) -> Result<DomainView> {
        let source = SnapshotSource::new(&self.source_path);
        Ok(DomainView::open(Box::new(source), self.columns.clone())?)
    }

    /// Start watching the state file; live views run without updates on failure.
    pub fn start_monitor(&self) -> Result<(ChangeMonitor, Receiver<MonitorEvent>)> {
        Ok(ChangeMonitor::channel(
            &self.state_file,
            self.monitor_options,
        )?)
    }
}

fn column_selection(fields: Option<&str>, format: Option<Format>) -> Result<ColumnSelection> {
    match (fields, format) {
        (Some(_), Some(_)) => bail!("--fields and --format cannot be used together"),
        (Some(fields), None) => Ok(ColumnSelection::parse_fields(fields)?),
        (None, format) => Ok(ColumnSelection::Preset(format.unwrap_or_default())),
    }
}
