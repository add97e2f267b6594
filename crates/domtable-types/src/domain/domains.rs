use std::collections::HashMap;

use super::record::{Label, PowerState, VmRecord};
use crate::{Error, Result};

/// Snapshot of the VM collection in source iteration order
#[derive(Debug, Clone, Default)]
pub struct Domains {
    records: Vec<VmRecord>,
    index: HashMap<String, usize>,
}

impl Domains {
    pub fn new(records: Vec<VmRecord>) -> Self {
        let index = records
            .iter()
            .enumerate()
            .map(|(i, record)| (record.name.clone(), i))
            .collect();

        Self { records, index }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<Domain<'_>> {
        self.index.get(name).map(|&i| Domain {
            record: &self.records[i],
            domains: self,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = Domain<'_>> {
        self.records.iter().map(move |record| Domain {
            record,
            domains: self,
        })
    }

    pub fn records(&self) -> &[VmRecord] {
        &self.records
    }
}

impl From<Vec<VmRecord>> for Domains {
    fn from(records: Vec<VmRecord>) -> Self {
        Self::new(records)
    }
}

/// A VM record bound to the snapshot it came from, so references resolve
#[derive(Debug, Clone, Copy)]
pub struct Domain<'a> {
    record: &'a VmRecord,
    domains: &'a Domains,
}

impl<'a> Domain<'a> {
    pub fn record(&self) -> &'a VmRecord {
        self.record
    }

    pub fn name(&self) -> &'a str {
        &self.record.name
    }

    pub fn klass(&self) -> &'a str {
        &self.record.klass
    }

    pub fn power_state(&self) -> PowerState {
        self.record.power_state
    }

    pub fn label(&self) -> &'a Label {
        &self.record.label
    }

    /// Network-providing VM, resolved within the same snapshot
    pub fn netvm(&self) -> Result<Option<Domain<'a>>> {
        match &self.record.netvm {
            None => Ok(None),
            Some(name) => self
                .domains
                .get(name)
                .map(Some)
                .ok_or_else(|| Error::UnknownDomain {
                    vm: self.record.name.clone(),
                    reference: name.clone(),
                }),
        }
    }

    pub fn property(&self, key: &str) -> Result<String> {
        self.record.property(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vm(name: &str) -> VmRecord {
        VmRecord::new(name, "AppVM", PowerState::Running, Label::new("red"))
    }

    #[test]
    fn test_iteration_preserves_source_order() {
        let domains = Domains::new(vec![vm("b"), vm("a"), vm("c")]);
        let names: Vec<_> = domains.iter().map(|d| d.name()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_netvm_resolves_within_snapshot() {
        let domains = Domains::new(vec![
            vm("sys-net"),
            vm("work").with_netvm("sys-net"),
            vm("offline"),
        ]);

        let work = domains.get("work").unwrap();
        assert_eq!(work.netvm().unwrap().unwrap().name(), "sys-net");

        let offline = domains.get("offline").unwrap();
        assert!(offline.netvm().unwrap().is_none());
    }

    #[test]
    fn test_dangling_netvm_is_an_error() {
        let domains = Domains::new(vec![vm("work").with_netvm("sys-gone")]);
        let err = domains.get("work").unwrap().netvm().unwrap_err();
        assert_eq!(
            err,
            Error::UnknownDomain {
                vm: "work".to_string(),
                reference: "sys-gone".to_string(),
            }
        );
    }
}
