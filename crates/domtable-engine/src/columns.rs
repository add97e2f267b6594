//! Column registry.
//!
//! Every column is resolved once into a [`ColumnDef`]: either a built-in
//! extractor or a plain property lookup. Names are case-insensitive and stored
//! lower-case; any name the registry does not know becomes a property column.

use std::collections::BTreeMap;

use domtable_types::{Domain, NONE_VALUE, PowerState};

use crate::{Error, Result};

/// Extracts one display value from a VM
pub type Extractor = fn(&Domain<'_>) -> Result<String>;

pub const STATE_COLUMN: &str = "state";
pub const CLASS_COLUMN: &str = "class";
pub const LABEL_COLUMN: &str = "label";
pub const NETVM_LABEL_COLUMN: &str = "netvm_label";

/// Icon shown in `netvm_label` for VMs without networking
pub const NO_NETVM_ICON: &str = "process-stop";

/// Power states the `state` column can render, with their icon identifiers
pub const STATE_ICONS: [(PowerState, &str); 3] = [
    (PowerState::Running, "media-playback-start"),
    (PowerState::Transient, "system-run"),
    (PowerState::Halted, "media-playback-stop"),
];

const ICON_COLUMNS: [&str; 3] = [STATE_COLUMN, LABEL_COLUMN, NETVM_LABEL_COLUMN];

/// Property-backed columns of the standard VM catalog
const PROPERTY_COLUMNS: [&str; 13] = [
    "qid",
    "xid",
    "ip",
    "ipback",
    "gateway",
    "disk",
    "priv-curr",
    "priv-max",
    "priv-used",
    "root-curr",
    "root-max",
    "root-used",
    "memory",
];

/// Icon identifier for a power state, if the `state` column can render it
pub fn state_icon(state: PowerState) -> Option<&'static str> {
    STATE_ICONS
        .iter()
        .find(|(s, _)| *s == state)
        .map(|(_, icon)| *icon)
}

/// Reverse of [`state_icon`]: the state name behind a `state` cell
pub fn state_for_icon(icon: &str) -> Option<PowerState> {
    STATE_ICONS
        .iter()
        .find(|(_, i)| *i == icon)
        .map(|(state, _)| *state)
}

/// How a presenter should draw a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Icon,
    Text,
}

#[derive(Debug, Clone)]
pub enum ColumnKind {
    BuiltIn(Extractor),
    Property(String),
}

#[derive(Debug, Clone)]
pub struct ColumnDef {
    name: String,
    header: String,
    kind: ColumnKind,
}

impl ColumnDef {
    pub fn built_in(name: &str, header: &str, extractor: Extractor) -> Self {
        Self {
            name: normalize(name),
            header: header.to_string(),
            kind: ColumnKind::BuiltIn(extractor),
        }
    }

    /// Column reading `properties[name]`, header is the upper-cased name
    pub fn property(name: &str) -> Self {
        let key = normalize(name);
        Self {
            header: key.to_uppercase(),
            name: key.clone(),
            kind: ColumnKind::Property(key),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn kind(&self) -> &ColumnKind {
        &self.kind
    }

    pub fn cell_kind(&self) -> CellKind {
        if ICON_COLUMNS.contains(&self.name.as_str()) {
            CellKind::Icon
        } else {
            CellKind::Text
        }
    }

    pub fn is_property(&self) -> bool {
        matches!(self.kind, ColumnKind::Property(_))
    }

    pub fn extract(&self, domain: &Domain<'_>) -> Result<String> {
        match &self.kind {
            ColumnKind::BuiltIn(extractor) => extractor(domain),
            ColumnKind::Property(key) => Ok(domain.property(key)?),
        }
    }
}

/// Owned table of known columns, keyed by lower-case name
#[derive(Debug, Clone)]
pub struct ColumnRegistry {
    columns: BTreeMap<String, ColumnDef>,
}

impl Default for ColumnRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ColumnRegistry {
    /// Registry with the built-in and standard catalog columns
    pub fn new() -> Self {
        let mut registry = Self::empty();

        let built_ins: [(&str, Extractor); 8] = [
            (LABEL_COLUMN, label_icon),
            (STATE_COLUMN, state_icon_name),
            (NETVM_LABEL_COLUMN, netvm_label),
            ("name", vm_name),
            (CLASS_COLUMN, vm_class),
            ("template", vm_template),
            ("netvm", vm_netvm),
            ("uuid", vm_uuid),
        ];
        for (name, extractor) in built_ins {
            let def = ColumnDef::built_in(name, &name.to_uppercase(), extractor);
            registry.columns.insert(def.name.clone(), def);
        }

        for name in PROPERTY_COLUMNS {
            let def = ColumnDef::property(name);
            registry.columns.insert(def.name.clone(), def);
        }

        registry
    }

    pub fn empty() -> Self {
        Self {
            columns: BTreeMap::new(),
        }
    }

    /// Add a built-in column. Registering an existing name fails.
    pub fn register(&mut self, name: &str, extractor: Extractor, header: &str) -> Result<()> {
        let def = ColumnDef::built_in(name, header, extractor);
        if self.columns.contains_key(&def.name) {
            return Err(Error::DuplicateColumn(def.name));
        }
        self.columns.insert(def.name.clone(), def);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.get(&normalize(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Look a column up, registering a property column for unknown names
    pub fn resolve(&mut self, name: &str) -> ColumnDef {
        let key = normalize(name);
        self.columns
            .entry(key)
            .or_insert_with_key(|key| ColumnDef::property(key))
            .clone()
    }

    pub fn resolve_all<I, S>(&mut self, names: I) -> Vec<ColumnDef>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .map(|name| self.resolve(name.as_ref()))
            .collect()
    }

    /// All registered columns, sorted by name
    pub fn columns(&self) -> impl Iterator<Item = &ColumnDef> {
        self.columns.values()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

fn label_icon(domain: &Domain<'_>) -> Result<String> {
    Ok(domain.label().icon())
}

fn state_icon_name(domain: &Domain<'_>) -> Result<String> {
    let state = domain.power_state();
    state_icon(state)
        .map(str::to_string)
        .ok_or_else(|| Error::UnsupportedPowerState {
            vm: domain.name().to_string(),
            state,
        })
}

fn netvm_label(domain: &Domain<'_>) -> Result<String> {
    match domain.netvm()? {
        None => Ok(NO_NETVM_ICON.to_string()),
        Some(netvm) => Ok(netvm.label().icon()),
    }
}

fn vm_name(domain: &Domain<'_>) -> Result<String> {
    Ok(domain.name().to_string())
}

fn vm_class(domain: &Domain<'_>) -> Result<String> {
    Ok(domain.klass().to_string())
}

fn vm_template(domain: &Domain<'_>) -> Result<String> {
    Ok(or_none(domain.record().template.as_deref()))
}

fn vm_netvm(domain: &Domain<'_>) -> Result<String> {
    Ok(or_none(domain.record().netvm.as_deref()))
}

fn vm_uuid(domain: &Domain<'_>) -> Result<String> {
    Ok(domain
        .record()
        .uuid
        .map(|uuid| uuid.to_string())
        .unwrap_or_else(|| NONE_VALUE.to_string()))
}

fn or_none(value: Option<&str>) -> String {
    value.unwrap_or(NONE_VALUE).to_string()
}
