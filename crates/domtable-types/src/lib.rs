pub mod domain;
pub mod error;
pub mod source;

pub use domain::*;
pub use error::{Error, Result};
pub use source::{SourceError, VmSource};
