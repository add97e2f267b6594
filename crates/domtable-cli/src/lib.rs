// NOTE: domtable architecture
//
// The table is rebuilt from scratch on every change of the state file; there
// is no incremental patching. Rebuilds are cheap for a few dozen VMs and a
// full rebuild can never drift from the source.
//
// Filter toggles never touch the table. They only change which rows are
// visible, so toggling is instant and survives every rebuild.

mod args;
mod commands;
pub mod context;
mod handlers;
pub mod logging;
pub mod presentation;
pub mod types;

pub use args::{Cli, Commands, FilterArgs};
pub use commands::run;
