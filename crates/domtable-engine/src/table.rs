use domtable_types::Domains;

use crate::Result;
use crate::columns::ColumnDef;
use crate::projector::{Row, project};

/// Projected rows for every VM except the admin domain, in source order
#[derive(Debug, Clone)]
pub struct DomainTable {
    columns: Vec<ColumnDef>,
    rows: Vec<Row>,
}

impl DomainTable {
    /// Project the whole snapshot. Any extraction failure fails the build.
    pub fn build(domains: &Domains, columns: &[ColumnDef]) -> Result<Self> {
        let rows = domains
            .iter()
            .filter(|domain| !domain.record().is_admin())
            .map(|domain| project(&domain, columns))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            columns: columns.to_vec(),
            rows,
        })
    }

    pub fn empty(columns: &[ColumnDef]) -> Self {
        Self {
            columns: columns.to_vec(),
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column in this layout, by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        let name = name.trim().to_lowercase();
        self.columns.iter().position(|column| column.name() == name)
    }

    pub fn row(&self, vm: &str) -> Option<&Row> {
        self.rows.iter().find(|row| row.vm() == vm)
    }
}
