//! Sample domain snapshots.
//!
//! The default snapshot resembles a small Qubes install: the admin domain,
//! a network chain, two app qubes, a template and a disposable.

use anyhow::Result;
use serde_json::{Value, json};
use std::fs;
use std::path::Path;

/// Names visible under the default filter (Halted hidden, dom0 never listed)
pub const DEFAULT_VISIBLE: [&str; 4] = ["sys-net", "sys-firewall", "work", "disp1234"];

/// Builder for one VM entry of a snapshot document.
#[derive(Debug, Clone)]
pub struct VmFixture {
    value: Value,
}

impl VmFixture {
    pub fn new(name: &str, class: &str, state: &str, label: &str) -> Self {
        Self {
            value: json!({
                "name": name,
                "class": class,
                "power_state": state,
                "label": { "name": label },
                "properties": {},
            }),
        }
    }

    pub fn netvm(mut self, netvm: &str) -> Self {
        self.value["netvm"] = json!(netvm);
        self
    }

    pub fn template(mut self, template: &str) -> Self {
        self.value["template"] = json!(template);
        self
    }

    pub fn property(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.value["properties"][key] = value.into();
        self
    }

    pub fn into_value(self) -> Value {
        self.value
    }
}

/// Wrap VM entries into a snapshot document.
pub fn snapshot(vms: impl IntoIterator<Item = VmFixture>) -> Value {
    let domains: Vec<Value> = vms.into_iter().map(VmFixture::into_value).collect();
    json!({ "domains": domains })
}

/// The default seven-domain snapshot.
pub fn sample_snapshot() -> Value {
    snapshot(sample_vms())
}

pub fn sample_vms() -> Vec<VmFixture> {
    vec![
        VmFixture::new("dom0", "AdminVM", "Running", "black").property("qid", 0),
        VmFixture::new("sys-net", "AppVM", "Running", "red")
            .template("fedora-40")
            .property("qid", 1)
            .property("xid", 2)
            .property("ip", "10.137.0.5")
            .property("ipback", Value::Null)
            .property("gateway", "10.137.0.1"),
        VmFixture::new("sys-firewall", "AppVM", "Running", "green")
            .netvm("sys-net")
            .template("fedora-40")
            .property("qid", 2)
            .property("xid", 3)
            .property("ip", "10.137.0.6")
            .property("ipback", "10.138.0.1")
            .property("gateway", "10.137.0.5"),
        VmFixture::new("work", "AppVM", "Running", "blue")
            .netvm("sys-firewall")
            .template("fedora-40")
            .property("qid", 3)
            .property("xid", 7)
            .property("ip", "10.137.0.7")
            .property("ipback", Value::Null)
            .property("gateway", "10.138.0.1"),
        VmFixture::new("personal", "AppVM", "Halted", "yellow")
            .netvm("sys-firewall")
            .template("fedora-40")
            .property("qid", 4)
            .property("xid", -1)
            .property("ip", "10.137.0.8")
            .property("ipback", Value::Null)
            .property("gateway", "10.138.0.1"),
        VmFixture::new("fedora-40", "TemplateVM", "Halted", "black")
            .property("qid", 5)
            .property("xid", -1)
            .property("ip", Value::Null)
            .property("ipback", Value::Null)
            .property("gateway", Value::Null),
        VmFixture::new("disp1234", "DispVM", "Transient", "red")
            .netvm("sys-firewall")
            .template("work")
            .property("qid", 6)
            .property("xid", 9)
            .property("ip", "10.137.0.9")
            .property("ipback", Value::Null)
            .property("gateway", "10.138.0.1"),
    ]
}

/// Write a snapshot document, creating parent directories as needed.
pub fn write_snapshot(path: &Path, snapshot: &Value) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(snapshot)?)?;
    Ok(())
}
