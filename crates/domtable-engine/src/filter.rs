//! Row visibility.
//!
//! A row is hidden when its power state is excluded or its VM type is
//! excluded. The `state` and `class` cells are located by column name, so any
//! column layout filters correctly; a layout lacking one of them simply
//! skips that test.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::columns::{CLASS_COLUMN, STATE_COLUMN, state_for_icon};
use crate::projector::Row;
use crate::table::DomainTable;

/// Filter buttons offered to the user, in display order
pub const TOGGLES: [Toggle; 7] = [
    Toggle::State("Running"),
    Toggle::State("Transient"),
    Toggle::State("Halted"),
    Toggle::Type("AppVM"),
    Toggle::Type("StandaloneVM"),
    Toggle::Type("TemplateVM"),
    Toggle::Type("DispVM"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    State(&'static str),
    Type(&'static str),
}

impl Toggle {
    pub fn value(&self) -> &'static str {
        match self {
            Toggle::State(value) | Toggle::Type(value) => value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterState {
    excluded_states: BTreeSet<String>,
    excluded_types: BTreeSet<String>,
}

impl Default for FilterState {
    /// Halted VMs hidden, every type shown
    fn default() -> Self {
        Self {
            excluded_states: BTreeSet::from(["Halted".to_string()]),
            excluded_types: BTreeSet::new(),
        }
    }
}

impl FilterState {
    /// No exclusions at all
    pub fn show_all() -> Self {
        Self {
            excluded_states: BTreeSet::new(),
            excluded_types: BTreeSet::new(),
        }
    }

    /// Flip a power state between shown and hidden; returns true if now hidden
    pub fn toggle_state(&mut self, state: &str) -> bool {
        toggle(&mut self.excluded_states, state)
    }

    /// Flip a VM type between shown and hidden; returns true if now hidden
    pub fn toggle_type(&mut self, vm_type: &str) -> bool {
        toggle(&mut self.excluded_types, vm_type)
    }

    pub fn apply(&mut self, toggle: Toggle) -> bool {
        match toggle {
            Toggle::State(state) => self.toggle_state(state),
            Toggle::Type(vm_type) => self.toggle_type(vm_type),
        }
    }

    /// Whether the values selected by `toggle` are currently shown
    pub fn is_shown(&self, toggle: Toggle) -> bool {
        match toggle {
            Toggle::State(state) => !self.excluded_states.contains(state),
            Toggle::Type(vm_type) => !self.excluded_types.contains(vm_type),
        }
    }

    pub fn excluded_states(&self) -> &BTreeSet<String> {
        &self.excluded_states
    }

    pub fn excluded_types(&self) -> &BTreeSet<String> {
        &self.excluded_types
    }

    pub fn is_visible(&self, table: &DomainTable, row: &Row) -> bool {
        self.matcher(table).matches(row)
    }

    pub fn visible_rows<'t>(&'t self, table: &'t DomainTable) -> impl Iterator<Item = &'t Row> {
        let matcher = self.matcher(table);
        table.rows().iter().filter(move |row| matcher.matches(row))
    }

    fn matcher(&self, table: &DomainTable) -> RowMatcher<'_> {
        RowMatcher {
            filter: self,
            state_index: table.column_index(STATE_COLUMN),
            type_index: table.column_index(CLASS_COLUMN),
        }
    }
}

struct RowMatcher<'f> {
    filter: &'f FilterState,
    state_index: Option<usize>,
    type_index: Option<usize>,
}

impl RowMatcher<'_> {
    fn matches(&self, row: &Row) -> bool {
        let state_excluded = self
            .state_index
            .and_then(|i| row.cell(i))
            .is_some_and(|icon| {
                let state = state_for_icon(icon).map_or(icon, |state| state.as_str());
                self.filter.excluded_states.contains(state)
            });

        let type_excluded = self
            .type_index
            .and_then(|i| row.cell(i))
            .is_some_and(|vm_type| self.filter.excluded_types.contains(vm_type));

        !(state_excluded || type_excluded)
    }
}

fn toggle(set: &mut BTreeSet<String>, value: &str) -> bool {
    if set.remove(value) {
        false
    } else {
        set.insert(value.to_string());
        true
    }
}
