use std::fmt;

/// Result type for domtable-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reading VM records
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The VM does not expose the requested property
    MissingProperty { vm: String, property: String },

    /// A VM references another VM that is not part of the snapshot
    UnknownDomain { vm: String, reference: String },

    /// Power state string outside the known enumeration
    InvalidPowerState(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MissingProperty { vm, property } => {
                write!(f, "VM '{}' has no property '{}'", vm, property)
            }
            Error::UnknownDomain { vm, reference } => {
                write!(f, "VM '{}' references unknown domain '{}'", vm, reference)
            }
            Error::InvalidPowerState(state) => write!(f, "Invalid power state: {}", state),
        }
    }
}

impl std::error::Error for Error {}
