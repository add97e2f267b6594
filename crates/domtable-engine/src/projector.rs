use domtable_types::Domain;
use serde::Serialize;

use crate::columns::ColumnDef;
use crate::{Error, Result};

/// One VM projected onto an ordered column layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    vm: String,
    cells: Vec<String>,
}

impl Row {
    pub fn new(vm: impl Into<String>, cells: Vec<String>) -> Self {
        Self {
            vm: vm.into(),
            cells,
        }
    }

    pub fn vm(&self) -> &str {
        &self.vm
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Option<&str> {
        self.cells.get(index).map(String::as_str)
    }
}

/// Project a VM onto `columns`, in order.
///
/// The first failing column aborts the whole row.
pub fn project(domain: &Domain<'_>, columns: &[ColumnDef]) -> Result<Row> {
    let cells = columns
        .iter()
        .map(|column| {
            column.extract(domain).map_err(|err| Error::Projection {
                vm: domain.name().to_string(),
                column: column.name().to_string(),
                source: Box::new(err),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Row::new(domain.name(), cells))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::ColumnRegistry;
    use domtable_types::{Domains, Label, PowerState, VmRecord};

    #[test]
    fn test_cells_follow_requested_order() {
        let domains = Domains::new(vec![
            VmRecord::new("work", "AppVM", PowerState::Running, Label::new("blue"))
                .with_property("qid", 7),
        ]);
        let mut registry = ColumnRegistry::new();

        let columns = registry.resolve_all(["qid", "name", "class", "state"]);
        let row = project(&domains.get("work").unwrap(), &columns).unwrap();
        assert_eq!(row.vm(), "work");
        assert_eq!(row.cells(), ["7", "work", "AppVM", "media-playback-start"]);

        let reversed = registry.resolve_all(["state", "class", "name", "qid"]);
        let row = project(&domains.get("work").unwrap(), &reversed).unwrap();
        assert_eq!(row.cells(), ["media-playback-start", "AppVM", "work", "7"]);
    }

    #[test]
    fn test_missing_property_fails_the_row() {
        let domains = Domains::new(vec![VmRecord::new(
            "work",
            "AppVM",
            PowerState::Running,
            Label::new("blue"),
        )]);
        let columns = ColumnRegistry::new().resolve_all(["name", "nosuchfield"]);

        let err = project(&domains.get("work").unwrap(), &columns).unwrap_err();
        match err {
            Error::Projection { vm, column, source } => {
                assert_eq!(vm, "work");
                assert_eq!(column, "nosuchfield");
                assert!(matches!(
                    *source,
                    Error::Lookup(domtable_types::Error::MissingProperty { .. })
                ));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_projection_is_deterministic() {
        let domains = Domains::new(vec![
            VmRecord::new("work", "AppVM", PowerState::Halted, Label::new("blue"))
                .with_template("fedora-40"),
        ]);
        let columns = ColumnRegistry::new().resolve_all(["state", "label", "name", "template"]);
        let domain = domains.get("work").unwrap();

        assert_eq!(
            project(&domain, &columns).unwrap(),
            project(&domain, &columns).unwrap()
        );
    }
}
