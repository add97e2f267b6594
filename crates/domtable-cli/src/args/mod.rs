// NOTE: `watch` is the default command. Running `domtable` with no arguments
// opens the live TUI, matching how the widget behaves when dropped into a panel.

mod commands;
mod common;

pub use commands::*;
pub use common::*;

use crate::types::{FormatPreset, LogLevel};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "domtable")]
#[command(about = "Live, filterable table of Qubes OS domains", long_about = None)]
#[command(version)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        value_name = "FIELDS",
        help = "Comma-separated column list (unknown names become property columns)"
    )]
    pub fields: Option<String>,

    #[arg(long, global = true, help = "Column preset [default: simple]")]
    pub format: Option<FormatPreset>,

    #[arg(
        long,
        global = true,
        value_name = "DIR",
        help = "Data directory [default: $DOMTABLE_PATH, XDG config dir, ~/.domtable]"
    )]
    pub data_dir: Option<String>,

    #[arg(long, global = true, value_name = "FILE", help = "Domain snapshot file")]
    pub source: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        value_name = "FILE",
        help = "File whose changes trigger a rebuild [default: /var/lib/qubes/qubes.xml]"
    )]
    pub state_file: Option<PathBuf>,

    #[arg(long, default_value = "info", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
