// Runtime - configuration, snapshot loading, state-file monitoring and the
// live domain view that rebuilds the table when the monitor fires.

pub mod config;
pub mod error;
pub mod monitor;
pub mod source;
pub mod view;

pub use config::{Config, DEFAULT_STATE_FILE, LOG_FILE, expand_tilde, resolve_data_dir};
pub use error::{Error, Result};
pub use monitor::{ChangeMonitor, MonitorEvent, MonitorOptions};
pub use source::{Snapshot, SnapshotSource};
pub use view::{DomainView, RefreshOutcome};
