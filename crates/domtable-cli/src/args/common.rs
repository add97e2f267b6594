use clap::Args;
use clap::builder::PossibleValuesParser;
use domtable_engine::{FilterState, TOGGLES, Toggle};

/// Only values with a filter button are accepted; matching is case-sensitive
fn state_values() -> PossibleValuesParser {
    PossibleValuesParser::new(TOGGLES.iter().filter_map(|toggle| match toggle {
        Toggle::State(state) => Some(*state),
        Toggle::Type(_) => None,
    }))
}

fn type_values() -> PossibleValuesParser {
    PossibleValuesParser::new(TOGGLES.iter().filter_map(|toggle| match toggle {
        Toggle::Type(vm_type) => Some(*vm_type),
        Toggle::State(_) => None,
    }))
}

#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    #[arg(
        long = "toggle-state",
        value_name = "STATE",
        value_parser = state_values(),
        help = "Flip a power state filter (repeatable; Halted starts hidden)"
    )]
    pub toggle_state: Vec<String>,

    #[arg(
        long = "toggle-type",
        value_name = "TYPE",
        value_parser = type_values(),
        help = "Flip a VM type filter (repeatable)"
    )]
    pub toggle_type: Vec<String>,

    #[arg(long, help = "Start from no exclusions instead of hiding halted VMs")]
    pub all: bool,
}

impl FilterArgs {
    pub fn resolve(&self) -> FilterState {
        let mut filter = if self.all {
            FilterState::show_all()
        } else {
            FilterState::default()
        };

        for state in &self.toggle_state {
            filter.toggle_state(state);
        }
        for vm_type in &self.toggle_type {
            filter.toggle_type(vm_type);
        }

        filter
    }
}
