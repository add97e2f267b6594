use serde::{Deserialize, Serialize};
use std::fmt;

use crate::columns::{ColumnDef, ColumnRegistry};
use crate::{Error, Result};

/// Named column layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Simple,
    Network,
    Full,
    Disk,
}

impl Format {
    pub const ALL: [Format; 4] = [Format::Simple, Format::Network, Format::Full, Format::Disk];

    pub fn name(&self) -> &'static str {
        match self {
            Format::Simple => "simple",
            Format::Network => "network",
            Format::Full => "full",
            Format::Disk => "disk",
        }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Format::Simple => &[
                "state",
                "label",
                "name",
                "class",
                "template",
                "netvm_label",
                "netvm",
            ],
            Format::Network => &[
                "state",
                "label",
                "name",
                "netvm_label",
                "netvm",
                "ip",
                "ipback",
                "gateway",
            ],
            Format::Full => &["state", "label", "name", "class", "qid", "xid", "uuid"],
            Format::Disk => &[
                "state",
                "label",
                "name",
                "disk",
                "priv-curr",
                "priv-max",
                "priv-used",
                "root-curr",
                "root-max",
                "root-used",
            ],
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which columns to show: an explicit list or a preset
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnSelection {
    Fields(Vec<String>),
    Preset(Format),
}

impl Default for ColumnSelection {
    fn default() -> Self {
        ColumnSelection::Preset(Format::default())
    }
}

impl ColumnSelection {
    /// Parse a comma-separated field list; entries are trimmed, blanks dropped
    pub fn parse_fields(list: &str) -> Result<Self> {
        let fields: Vec<String> = list
            .split(',')
            .map(str::trim)
            .filter(|field| !field.is_empty())
            .map(str::to_string)
            .collect();

        if fields.is_empty() {
            return Err(Error::EmptyFieldList);
        }
        Ok(ColumnSelection::Fields(fields))
    }

    pub fn names(&self) -> Vec<String> {
        match self {
            ColumnSelection::Fields(fields) => fields.clone(),
            ColumnSelection::Preset(format) => {
                format.columns().iter().map(|c| c.to_string()).collect()
            }
        }
    }

    /// Resolve against the registry; unknown names become property columns
    pub fn resolve(&self, registry: &mut ColumnRegistry) -> Vec<ColumnDef> {
        registry.resolve_all(self.names())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_preset_resolves_to_known_columns() {
        let registry = ColumnRegistry::new();
        for format in Format::ALL {
            for name in format.columns() {
                assert!(registry.contains(name), "{format}: {name} not registered");
            }
        }
    }

    #[test]
    fn test_parse_fields_trims_entries() {
        let selection = ColumnSelection::parse_fields(" name, class ,,kernel ").unwrap();
        assert_eq!(selection.names(), vec!["name", "class", "kernel"]);
        assert_eq!(
            ColumnSelection::parse_fields(" , "),
            Err(Error::EmptyFieldList)
        );
    }

    #[test]
    fn test_default_selection_is_simple() {
        assert_eq!(
            ColumnSelection::default(),
            ColumnSelection::Preset(Format::Simple)
        );
        assert_eq!(ColumnSelection::default().names()[..3], ["state", "label", "name"]);
    }
}
