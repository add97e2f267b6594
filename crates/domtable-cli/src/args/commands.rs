use super::common::FilterArgs;
use crate::types::{OutputFormat, WatchMode};
use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Show the live domain table, rebuilt whenever the state file changes")]
    Watch {
        #[arg(
            long,
            default_value = "tui",
            help = "Display mode: tui (interactive) or console (reprints on change)"
        )]
        mode: WatchMode,

        #[command(flatten)]
        filter: FilterArgs,
    },

    #[command(about = "Print the filtered domain table once")]
    List {
        #[arg(long, default_value = "plain")]
        output: OutputFormat,

        #[command(flatten)]
        filter: FilterArgs,
    },

    #[command(about = "List every registered column")]
    Columns,
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Watch {
            mode: WatchMode::Tui,
            filter: FilterArgs::default(),
        }
    }
}
