/// Errors raised by catalog and row operations.
///
/// A field that is missing or tombstoned is never an error on its own:
/// lookups report it through `Option` / `bool`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RowError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("field '{0}' already exists in the catalog")]
    DuplicateField(String),

    #[error("field '{0}' is already present in this row")]
    DuplicateKey(String),

    #[error("field '{0}' not found")]
    MissingField(String),

    #[error("field '{field}': expected {expected}, found {found}")]
    Conversion {
        field: String,
        expected: &'static str,
        found: &'static str,
    },
}

impl RowError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        RowError::InvalidArgument(msg.into())
    }

    /// Attach the field name to a conversion error raised without one.
    pub fn for_field(self, name: &str) -> Self {
        match self {
            RowError::Conversion { field, expected, found } if field.is_empty() => {
                RowError::Conversion { field: name.to_string(), expected, found }
            }
            other => other,
        }
    }
}

/// Reject names that cannot identify a field.
pub(crate) fn check_name(name: &str) -> Result<(), RowError> {
    if name.is_empty() {
        return Err(RowError::invalid("field name must not be empty"));
    }
    Ok(())
}
