use std::sync::Arc;

use crate::error::RowError;
use crate::row::{NULL, RowValues};
use crate::value::Value;

/// Late-bound member access for callers that only know field names at
/// run time.
///
/// Looser than [`RowValues::get`]: a member is *handled* when the catalog
/// knows the name, even when this row has tombstoned it.
pub trait DynamicMembers {
    /// `None` when the name is unknown to the catalog. Dead and absent
    /// fields read as `Null`.
    fn get_member(&self, name: &str) -> Option<&Value>;

    /// Write a member, adding it to the shared catalog when new.
    fn set_member(&mut self, name: &str, value: Value) -> Result<(), RowError>;

    /// Every name the catalog knows, live in this row or not.
    fn member_names(&self) -> Vec<Arc<str>>;
}

impl DynamicMembers for RowValues {
    fn get_member(&self, name: &str) -> Option<&Value> {
        let index = self.catalog().index_of(name)?;
        Some(self.value_at(index).unwrap_or(&NULL))
    }

    fn set_member(&mut self, name: &str, value: Value) -> Result<(), RowError> {
        self.set(name, value, false)
    }

    fn member_names(&self) -> Vec<Arc<str>> {
        self.catalog().field_names()
    }
}
