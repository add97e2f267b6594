use domtable_types::PowerState;
use std::fmt;

/// Result type for domtable-engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while building domain tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A column with the same (case-insensitive) name is already registered
    DuplicateColumn(String),

    /// The `state` column only knows Running, Transient and Halted
    UnsupportedPowerState { vm: String, state: PowerState },

    /// Attribute lookup on the VM record failed
    Lookup(domtable_types::Error),

    /// A column could not be extracted for a VM; no partial row is produced
    Projection {
        vm: String,
        column: String,
        source: Box<Error>,
    },

    /// `--fields` was given without any column name
    EmptyFieldList,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DuplicateColumn(name) => write!(f, "Column '{}' is already registered", name),
            Error::UnsupportedPowerState { vm, state } => {
                write!(f, "VM '{}' is in unsupported power state '{}'", vm, state)
            }
            Error::Lookup(err) => write!(f, "{}", err),
            Error::Projection { vm, column, source } => write!(
                f,
                "Cannot project column '{}' for VM '{}': {}",
                column, vm, source
            ),
            Error::EmptyFieldList => write!(f, "Field list is empty"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Lookup(err) => Some(err),
            Error::Projection { source, .. } => Some(source.as_ref()),
            Error::DuplicateColumn(_)
            | Error::UnsupportedPowerState { .. }
            | Error::EmptyFieldList => None,
        }
    }
}

impl From<domtable_types::Error> for Error {
    fn from(err: domtable_types::Error) -> Self {
        Error::Lookup(err)
    }
}
