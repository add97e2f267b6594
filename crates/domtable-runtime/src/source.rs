use std::path::{Path, PathBuf};

use domtable_types::{Domains, SourceError, VmRecord, VmSource};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// On-disk snapshot document: `{ "domains": [ ... ] }`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub domains: Vec<VmRecord>,
}

/// Reads the domain collection from a JSON snapshot file on every load
#[derive(Debug, Clone)]
pub struct SnapshotSource {
    path: PathBuf,
}

impl SnapshotSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self) -> Result<Domains> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            Error::Source(format!("{}: {}", self.path.display(), e))
        })?;
        let snapshot: Snapshot =
            serde_json::from_str(&content).map_err(|source| Error::Parse {
                path: self.path.clone(),
                source,
            })?;

        tracing::debug!(
            path = %self.path.display(),
            domains = snapshot.domains.len(),
            "loaded snapshot"
        );
        Ok(Domains::new(snapshot.domains))
    }
}

impl VmSource for SnapshotSource {
    fn load(&self) -> std::result::Result<Domains, SourceError> {
        Ok(self.read()?)
    }

    fn describe(&self) -> String {
        format!("snapshot {}", self.path.display())
    }
}
