//! Typed binding at the edge of the row view.
//!
//! Callers that want a struct out of a row implement [`FromRow`] and pull
//! each member with [`RowValues::bind_field`]. The row view itself stays
//! name/index based; nothing here inspects the target type.

use crate::error::RowError;
use crate::row::RowValues;
use crate::value::Value;

/// Typed extraction from a single value.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Result<Self, RowError>;

    /// Called when the row has no live value for the field.
    fn from_missing(field: &str) -> Result<Self, RowError> {
        Err(RowError::MissingField(field.to_string()))
    }
}

/// Build a typed object from a row.
pub trait FromRow: Sized {
    fn from_row(row: &RowValues) -> Result<Self, RowError>;
}

fn mismatch(expected: &'static str, value: &Value) -> RowError {
    RowError::Conversion {
        field: String::new(),
        expected,
        found: value.type_name(),
    }
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Result<Self, RowError> {
        Ok(value.clone())
    }

    fn from_missing(_field: &str) -> Result<Self, RowError> {
        Ok(Value::Null)
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Result<Self, RowError> {
        match value {
            Value::Int64(v) => Ok(*v),
            Value::UInt64(v) => i64::try_from(*v).map_err(|_| mismatch("int64", value)),
            _ => Err(mismatch("int64", value)),
        }
    }
}

impl FromValue for i32 {
    fn from_value(value: &Value) -> Result<Self, RowError> {
        let wide = i64::from_value(value).map_err(|_| mismatch("int32", value))?;
        i32::try_from(wide).map_err(|_| mismatch("int32", value))
    }
}

impl FromValue for u64 {
    fn from_value(value: &Value) -> Result<Self, RowError> {
        match value {
            Value::UInt64(v) => Ok(*v),
            Value::Int64(v) => u64::try_from(*v).map_err(|_| mismatch("uint64", value)),
            _ => Err(mismatch("uint64", value)),
        }
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Result<Self, RowError> {
        match value {
            Value::Float64(v) => Ok(*v),
            Value::Int64(v) => Ok(*v as f64),
            Value::UInt64(v) => Ok(*v as f64),
            _ => Err(mismatch("float64", value)),
        }
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Result<Self, RowError> {
        match value {
            Value::Bool(b) => Ok(*b),
            _ => Err(mismatch("bool", value)),
        }
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Result<Self, RowError> {
        match value {
            Value::String(s) => Ok(s.clone()),
            _ => Err(mismatch("string", value)),
        }
    }
}

impl FromValue for Vec<u8> {
    fn from_value(value: &Value) -> Result<Self, RowError> {
        match value {
            Value::Bytes(b) => Ok(b.clone()),
            _ => Err(mismatch("bytes", value)),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> Result<Self, RowError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }

    fn from_missing(_field: &str) -> Result<Self, RowError> {
        Ok(None)
    }
}

impl RowValues {
    /// Typed read of a live field by exact name. `Ok(None)` when the field
    /// is not live.
    pub fn try_get<T: FromValue>(&self, name: &str) -> Result<Option<T>, RowError> {
        self.get_live(name)
            .map(|v| T::from_value(v).map_err(|e| e.for_field(name)))
            .transpose()
    }

    /// Bind one member of a target type, matching the field name
    /// case-insensitively (an exact match wins).
    pub fn bind_field<T: FromValue>(&self, name: &str) -> Result<T, RowError> {
        let live = self
            .catalog()
            .index_of_ignore_case(name)
            .and_then(|i| self.value_at(i));
        match live {
            Some(v) => T::from_value(v).map_err(|e| e.for_field(name)),
            None => T::from_missing(name),
        }
    }

    pub fn bind<T: FromRow>(&self) -> Result<T, RowError> {
        T::from_row(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FieldCatalog;

    #[derive(Debug, PartialEq)]
    struct Person {
        id: i64,
        name: String,
        email: Option<String>,
    }

    impl FromRow for Person {
        fn from_row(row: &RowValues) -> Result<Self, RowError> {
            Ok(Person {
                id: row.bind_field("id")?,
                name: row.bind_field("name")?,
                email: row.bind_field("email")?,
            })
        }
    }

    fn person_row(values: Vec<Value>) -> RowValues {
        let catalog = FieldCatalog::new(["ID", "Name", "Email"]).unwrap();
        RowValues::new(catalog, values).unwrap()
    }

    #[test]
    fn binds_case_insensitively() {
        let row = person_row(vec![7.into(), "ann".into(), Value::Null]);
        let person: Person = row.bind().unwrap();
        assert_eq!(person, Person { id: 7, name: "ann".into(), email: None });
    }

    #[test]
    fn missing_required_field_fails() {
        let mut row = person_row(vec![7.into(), "ann".into()]);
        row.remove("Name");
        assert_eq!(row.bind::<Person>(), Err(RowError::MissingField("name".into())));
    }

    #[test]
    fn wrong_type_reports_field() {
        let row = person_row(vec!["seven".into(), "ann".into()]);
        assert_eq!(
            row.bind::<Person>(),
            Err(RowError::Conversion { field: "id".into(), expected: "int64", found: "string" })
        );
    }

    #[test]
    fn try_get_distinguishes_absent() {
        let row = person_row(vec![7.into()]);
        assert_eq!(row.try_get::<i64>("ID"), Ok(Some(7)));
        assert_eq!(row.try_get::<String>("Name"), Ok(None));
        assert_eq!(row.try_get::<f64>("ID"), Ok(Some(7.0)));
    }

    #[test]
    fn narrowing_checks_range() {
        assert_eq!(i32::from_value(&Value::Int64(5)), Ok(5));
        assert!(i32::from_value(&Value::Int64(i64::MAX)).is_err());
        assert!(u64::from_value(&Value::Int64(-1)).is_err());
    }
}
