// Engine - column registry, row projection, domain table and filtering.
// Pure functions over a VM snapshot; no I/O. The runtime layer owns when to rebuild.

pub mod columns;
pub mod error;
pub mod filter;
pub mod format;
pub mod projector;
pub mod table;

pub use columns::{
    CLASS_COLUMN, CellKind, ColumnDef, ColumnKind, ColumnRegistry, Extractor, NO_NETVM_ICON,
    STATE_COLUMN, STATE_ICONS, state_for_icon, state_icon,
};
pub use error::{Error, Result};
pub use filter::{FilterState, TOGGLES, Toggle};
pub use format::{ColumnSelection, Format};
pub use projector::{Row, project};
pub use table::DomainTable;

use domtable_types::Domains;

/// Resolve a column selection and build the table in one step
pub fn build_table(
    domains: &Domains,
    selection: &ColumnSelection,
    registry: &mut ColumnRegistry,
) -> Result<DomainTable> {
    let columns = selection.resolve(registry);
    DomainTable::build(domains, &columns)
}
