//! Shared-schema row views over tabular result sets.
//!
//! A [`FieldCatalog`] maps field names to positions and is shared by every
//! row of one result set. Each [`RowValues`] owns its own slot array, can
//! tombstone fields locally and can grow the shared catalog by writing a
//! field it has never seen.

pub mod bind;
pub mod catalog;
pub mod dynamic;
pub mod error;
pub mod row;
pub mod table;
pub mod value;

pub use bind::{FromRow, FromValue};
pub use catalog::FieldCatalog;
pub use dynamic::DynamicMembers;
pub use error::RowError;
pub use row::{RowValues, Slot};
pub use table::Table;
pub use value::Value;
