use crate::Domains;

/// Error returned by a [`VmSource`] that could not produce a snapshot
pub type SourceError = Box<dyn std::error::Error + Send + Sync>;

/// Provider of VM snapshots.
///
/// Implementations talk to whatever the management system exposes; the table
/// only ever sees the loaded [`Domains`]. A failed load is a connection error.
pub trait VmSource {
    fn load(&self) -> std::result::Result<Domains, SourceError>;

    /// Human-readable origin for logs and status lines
    fn describe(&self) -> String;
}

impl VmSource for Domains {
    fn load(&self) -> std::result::Result<Domains, SourceError> {
        Ok(self.clone())
    }

    fn describe(&self) -> String {
        format!("in-memory snapshot ({} domains)", self.len())
    }
}
