use std::sync::Arc;

use serde::ser::{Serialize, SerializeSeq, Serializer};

use crate::bind::FromRow;
use crate::catalog::FieldCatalog;
use crate::error::RowError;
use crate::row::RowValues;
use crate::value::Value;

/// One materialised result set: a catalog and the rows that share it.
#[derive(Debug, Clone)]
pub struct Table {
    catalog: Arc<FieldCatalog>,
    rows: Vec<RowValues>,
}

impl Table {
    pub fn new<I, S>(names: I) -> Result<Self, RowError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self::with_catalog(FieldCatalog::new(names)?))
    }

    pub fn with_catalog(catalog: Arc<FieldCatalog>) -> Self {
        Self {
            catalog,
            rows: Vec::new(),
        }
    }

    pub fn catalog(&self) -> &Arc<FieldCatalog> {
        &self.catalog
    }

    pub fn field_names(&self) -> Vec<Arc<str>> {
        self.catalog.field_names()
    }

    /// Append a row built from positional values.
    pub fn push_row(&mut self, values: Vec<Value>) -> Result<&mut RowValues, RowError> {
        let row = RowValues::new(Arc::clone(&self.catalog), values)?;
        self.rows.push(row);
        let last = self.rows.len() - 1;
        Ok(&mut self.rows[last])
    }

    pub fn rows(&self) -> &[RowValues] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [RowValues] {
        &mut self.rows
    }

    pub fn row(&self, index: usize) -> Option<&RowValues> {
        self.rows.get(index)
    }

    pub fn row_mut(&mut self, index: usize) -> Option<&mut RowValues> {
        self.rows.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Tombstone `name` on every row. Returns how many rows held it live.
    pub fn remove_field_everywhere(&mut self, name: &str) -> usize {
        let mut removed = 0;
        for row in &mut self.rows {
            if row.remove(name) {
                removed += 1;
            }
        }
        tracing::debug!(field = name, rows = removed, "field removed from table");
        removed
    }

    /// Bind every row. The first row that does not fit the target aborts
    /// the whole call.
    pub fn bind_all<T: FromRow>(&self) -> Result<Vec<T>, RowError> {
        self.rows.iter().map(RowValues::bind::<T>).collect()
    }
}

impl Serialize for Table {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for row in &self.rows {
            seq.serialize_element(row)?;
        }
        seq.end()
    }
}
