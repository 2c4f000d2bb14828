use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::{RowError, check_name};

struct CatalogState {
    fields: Vec<Arc<str>>,
    index_of: HashMap<Arc<str>, usize>,
}

/// Ordered name → index registry shared by every row of one result set.
///
/// Append-only: existing entries are never removed or reordered, so a slot
/// index stays valid for the whole life of the catalog. Growth goes through
/// a write lock, which lets rows on different threads add fields without
/// racing each other.
pub struct FieldCatalog {
    state: RwLock<CatalogState>,
}

impl FieldCatalog {
    /// Build a catalog from the result set's column names.
    ///
    /// Duplicate names keep their first position: the index map is filled
    /// back to front, so the earliest occurrence is written last.
    pub fn new<I, S>(names: I) -> Result<Arc<Self>, RowError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut fields: Vec<Arc<str>> = Vec::new();
        for name in names {
            let name = name.as_ref();
            check_name(name)?;
            fields.push(Arc::from(name));
        }
        let mut index_of = HashMap::with_capacity(fields.len());
        for (i, name) in fields.iter().enumerate().rev() {
            index_of.insert(Arc::clone(name), i);
        }
        Ok(Arc::new(Self {
            state: RwLock::new(CatalogState { fields, index_of }),
        }))
    }

    pub fn empty() -> Arc<Self> {
        Arc::new(Self {
            state: RwLock::new(CatalogState {
                fields: Vec::new(),
                index_of: HashMap::new(),
            }),
        })
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.state.read().index_of.get(name).copied()
    }

    /// Exact match first, then the first field equal ignoring ASCII case.
    pub fn index_of_ignore_case(&self, name: &str) -> Option<usize> {
        let state = self.state.read();
        if let Some(&i) = state.index_of.get(name) {
            return Some(i);
        }
        state
            .fields
            .iter()
            .position(|f| f.eq_ignore_ascii_case(name))
    }

    /// Append a new field and return its index.
    pub fn add_field(&self, name: &str) -> Result<usize, RowError> {
        check_name(name)?;
        let mut state = self.state.write();
        if state.index_of.contains_key(name) {
            return Err(RowError::DuplicateField(name.to_string()));
        }
        Ok(Self::append(&mut state, name))
    }

    /// Look the field up, appending it when it is not there yet.
    ///
    /// The check and the append happen under one write lock, so two rows
    /// introducing the same name concurrently resolve to the same index.
    pub(crate) fn resolve_or_add(&self, name: &str) -> Result<usize, RowError> {
        check_name(name)?;
        if let Some(i) = self.index_of(name) {
            return Ok(i);
        }
        let mut state = self.state.write();
        if let Some(&i) = state.index_of.get(name) {
            return Ok(i);
        }
        Ok(Self::append(&mut state, name))
    }

    fn append(state: &mut CatalogState, name: &str) -> usize {
        let index = state.fields.len();
        let name: Arc<str> = Arc::from(name);
        state.fields.push(Arc::clone(&name));
        state.index_of.insert(name, index);
        tracing::debug!(field = %state.fields[index], index, "catalog field added");
        index
    }

    pub fn field_count(&self) -> usize {
        self.state.read().fields.len()
    }

    pub fn field_name(&self, index: usize) -> Option<Arc<str>> {
        self.state.read().fields.get(index).cloned()
    }

    /// Snapshot of the field names in index order.
    pub fn field_names(&self) -> Vec<Arc<str>> {
        self.state.read().fields.clone()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.state.read().index_of.contains_key(name)
    }
}

impl std::fmt::Debug for FieldCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldCatalog")
            .field("fields", &self.state.read().fields)
            .finish()
    }
}
