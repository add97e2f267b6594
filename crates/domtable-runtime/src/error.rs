use std::fmt;
use std::path::PathBuf;

/// Result type for domtable-runtime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the runtime layer
#[derive(Debug)]
pub enum Error {
    /// Table engine error (projection, registry)
    Engine(domtable_engine::Error),

    /// IO operation failed
    Io(std::io::Error),

    /// Snapshot document could not be parsed
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// VM source could not be reached or read
    Source(String),

    /// File watcher error
    Watch(notify::Error),

    /// Configuration error
    Config(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Engine(err) => write!(f, "{}", err),
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Parse { path, source } => {
                write!(f, "Invalid snapshot {}: {}", path.display(), source)
            }
            Error::Source(msg) => write!(f, "Cannot read VM source: {}", msg),
            Error::Watch(err) => write!(f, "Watch error: {}", err),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Engine(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::Parse { source, .. } => Some(source),
            Error::Watch(err) => Some(err),
            Error::Source(_) | Error::Config(_) => None,
        }
    }
}

impl From<domtable_engine::Error> for Error {
    fn from(err: domtable_engine::Error) -> Self {
        Error::Engine(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<notify::Error> for Error {
    fn from(err: notify::Error) -> Self {
        Error::Watch(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}
