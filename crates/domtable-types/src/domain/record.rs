use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::{Error, Result};

/// Name of the privileged management domain
pub const ADMIN_DOMAIN: &str = "dom0";

/// Placeholder rendered for absent values
pub const NONE_VALUE: &str = "-";

/// Lifecycle state reported by the management system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerState {
    Running,
    Transient,
    Halted,
    Paused,
    Suspended,
    Crashed,
    Dying,
    #[serde(rename = "NA")]
    NA,
}

impl PowerState {
    pub const ALL: [PowerState; 8] = [
        PowerState::Running,
        PowerState::Transient,
        PowerState::Halted,
        PowerState::Paused,
        PowerState::Suspended,
        PowerState::Crashed,
        PowerState::Dying,
        PowerState::NA,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerState::Running => "Running",
            PowerState::Transient => "Transient",
            PowerState::Halted => "Halted",
            PowerState::Paused => "Paused",
            PowerState::Suspended => "Suspended",
            PowerState::Crashed => "Crashed",
            PowerState::Dying => "Dying",
            PowerState::NA => "NA",
        }
    }
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PowerState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        PowerState::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| Error::InvalidPowerState(s.to_string()))
    }
}

/// Color/icon identity assigned to a VM
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,

    /// Explicit icon identifier; derived from the label name when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl Label {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icon: None,
        }
    }

    /// Icon identifier, `appvm-<name>` unless overridden
    pub fn icon(&self) -> String {
        match &self.icon {
            Some(icon) => icon.clone(),
            None => format!("appvm-{}", self.name),
        }
    }
}

/// One VM as reported by the management system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VmRecord {
    pub name: String,

    #[serde(rename = "class")]
    pub klass: String,

    pub power_state: PowerState,

    pub label: Label,

    /// Name of the network-providing VM
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub netvm: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<Uuid>,

    #[serde(default)]
    pub properties: BTreeMap<String, Value>,
}

impl VmRecord {
    pub fn new(
        name: impl Into<String>,
        klass: impl Into<String>,
        power_state: PowerState,
        label: Label,
    ) -> Self {
        Self {
            name: name.into(),
            klass: klass.into(),
            power_state,
            label,
            netvm: None,
            template: None,
            uuid: None,
            properties: BTreeMap::new(),
        }
    }

    pub fn with_netvm(mut self, netvm: impl Into<String>) -> Self {
        self.netvm = Some(netvm.into());
        self
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn is_admin(&self) -> bool {
        self.name == ADMIN_DOMAIN
    }

    /// Property value rendered as a display string.
    ///
    /// Absent keys are an error; `null` values render as [`NONE_VALUE`].
    pub fn property(&self, key: &str) -> Result<String> {
        let value = self
            .properties
            .get(key)
            .ok_or_else(|| Error::MissingProperty {
                vm: self.name.clone(),
                property: key.to_string(),
            })?;

        Ok(display_value(value))
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Null => NONE_VALUE.to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
