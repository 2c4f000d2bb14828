use std::fmt;
use std::sync::Arc;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::catalog::FieldCatalog;
use crate::error::RowError;
use crate::value::Value;

pub(crate) static NULL: Value = Value::Null;

/// One position of a row, aligned with the catalog index of the same number.
#[derive(Debug, Clone, PartialEq)]
pub enum Slot {
    Live(Value),
    /// The field was removed from this row only. Other rows and the catalog
    /// still know it.
    Dead,
}

/// Per-row value storage keyed by a shared [`FieldCatalog`].
///
/// Slot `i` holds the value of catalog field `i`. The slot array may be
/// shorter than the catalog: positions past its end are *absent* (never
/// written), which is different from *dead* (explicitly removed). Neither
/// is visible through iteration or counted by [`RowValues::len`].
///
/// Slots are never removed or reordered, only tombstoned, so alignment with
/// the catalog holds for the whole life of the row.
///
/// Lookups by name see the difference: an absent field is known to the
/// catalog and reads as `Null`, a dead one is not found.
#[derive(Debug, Clone)]
pub struct RowValues {
    catalog: Arc<FieldCatalog>,
    slots: Vec<Slot>,
}

impl RowValues {
    /// Build a row whose first `values.len()` fields are live.
    pub fn new(catalog: Arc<FieldCatalog>, values: Vec<Value>) -> Result<Self, RowError> {
        Self::from_slots(catalog, values.into_iter().map(Slot::Live).collect())
    }

    pub fn from_slots(catalog: Arc<FieldCatalog>, slots: Vec<Slot>) -> Result<Self, RowError> {
        let width = catalog.field_count();
        if slots.len() > width {
            return Err(RowError::invalid(format!(
                "row has {} values but the catalog has {width} fields",
                slots.len()
            )));
        }
        Ok(Self { catalog, slots })
    }

    pub fn catalog(&self) -> &Arc<FieldCatalog> {
        &self.catalog
    }

    /// Number of materialised slots, live or dead.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    fn live(&self, index: usize) -> Option<&Value> {
        match self.slots.get(index) {
            Some(Slot::Live(v)) => Some(v),
            _ => None,
        }
    }

    /// Field value by name.
    ///
    /// Unknown and dead fields are `None`. A field past the end of the slot
    /// array (added to the catalog through another row) is `Some(&Value::Null)`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        let index = self.catalog.index_of(name)?;
        match self.slots.get(index) {
            Some(Slot::Live(v)) => Some(v),
            Some(Slot::Dead) => None,
            None => Some(&NULL),
        }
    }

    /// Value only when the field holds a live slot in this row.
    pub(crate) fn get_live(&self, name: &str) -> Option<&Value> {
        self.catalog.index_of(name).and_then(|i| self.live(i))
    }

    pub fn try_get_value(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Indexer-style read: anything not live reads as `Null`.
    pub fn get_or_null(&self, name: &str) -> &Value {
        self.get(name).unwrap_or(&NULL)
    }

    /// Live value by catalog position.
    pub fn value_at(&self, index: usize) -> Option<&Value> {
        self.live(index)
    }

    /// Write a field, growing the shared catalog when `name` is new to it.
    ///
    /// With `is_add` the write fails if the field is already live in this
    /// row; a dead or absent field counts as not present.
    pub fn set(&mut self, name: &str, value: impl Into<Value>, is_add: bool) -> Result<(), RowError> {
        let index = self.catalog.resolve_or_add(name)?;
        if is_add && self.live(index).is_some() {
            return Err(RowError::DuplicateKey(name.to_string()));
        }
        if index >= self.slots.len() {
            // Untouched fields must read as absent, not as stored nulls.
            let width = self.catalog.field_count();
            tracing::trace!(from = self.slots.len(), to = width, "row slots grown");
            self.slots.resize(width, Slot::Dead);
        }
        self.slots[index] = Slot::Live(value.into());
        Ok(())
    }

    /// `set` that overwrites.
    pub fn insert(&mut self, name: &str, value: impl Into<Value>) -> Result<(), RowError> {
        self.set(name, value, false)
    }

    /// `set` that refuses to overwrite a live field.
    pub fn add(&mut self, name: &str, value: impl Into<Value>) -> Result<(), RowError> {
        self.set(name, value, true)
    }

    /// Tombstone a live field. The catalog keeps the name.
    pub fn remove(&mut self, name: &str) -> bool {
        match self.catalog.index_of(name) {
            Some(i) if self.live(i).is_some() => {
                self.slots[i] = Slot::Dead;
                true
            }
            _ => false,
        }
    }

    pub fn contains_entry(&self, name: &str, value: &Value) -> bool {
        self.get_live(name) == Some(value)
    }

    /// Remove the field only when it currently holds `value`.
    pub fn remove_entry(&mut self, name: &str, value: &Value) -> bool {
        self.contains_entry(name, value) && self.remove(name)
    }

    /// Tombstone every slot of this row.
    pub fn clear(&mut self) {
        self.slots.fill(Slot::Dead);
    }

    /// Number of live fields.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| matches!(s, Slot::Live(_))).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Live `(name, value)` pairs in catalog order.
    pub fn iter(&self) -> Iter<'_> {
        Iter { row: self, next: 0 }
    }

    fn iter_indexed(&self) -> impl Iterator<Item = (usize, Arc<str>, &Value)> + '_ {
        self.slots.iter().enumerate().filter_map(|(i, slot)| match slot {
            Slot::Live(v) => self.catalog.field_name(i).map(|name| (i, name, v)),
            Slot::Dead => None,
        })
    }

    pub fn keys(&self) -> impl Iterator<Item = Arc<str>> + '_ {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> + '_ {
        self.iter().map(|(_, v)| v)
    }
}

/// Lazy pass over the live fields of a row.
pub struct Iter<'r> {
    row: &'r RowValues,
    next: usize,
}

impl<'r> Iterator for Iter<'r> {
    type Item = (Arc<str>, &'r Value);

    fn next(&mut self) -> Option<Self::Item> {
        while self.next < self.row.slots.len() {
            let i = self.next;
            self.next += 1;
            if let Slot::Live(v) = &self.row.slots[i] {
                if let Some(name) = self.row.catalog.field_name(i) {
                    return Some((name, v));
                }
            }
        }
        None
    }
}

impl<'r> IntoIterator for &'r RowValues {
    type Item = (Arc<str>, &'r Value);
    type IntoIter = Iter<'r>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for RowValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{row")?;
        for (name, value) in self {
            write!(f, ", {name} = {value}")?;
        }
        write!(f, "}}")
    }
}

impl Serialize for RowValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Duplicate catalog names resolve to their first index; later slots
        // under the same name are shadowed and left out of the map.
        let entries: Vec<(usize, Arc<str>, &Value)> = self
            .iter_indexed()
            .filter(|(i, name, _)| self.catalog.index_of(name) == Some(*i))
            .collect();
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (_, name, value) in entries {
            map.serialize_entry(&*name, value)?;
        }
        map.end()
    }
}
