pub mod domains;
pub mod record;

pub use domains::*;
pub use record::*;
