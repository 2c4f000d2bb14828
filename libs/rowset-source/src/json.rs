use rowset::{FieldCatalog, Table, Value};

use crate::error::SourceError;

/// Materialise JSON objects into a table.
///
/// Accepts a top-level array of objects or one object per line. The
/// catalog starts empty and grows as keys are first seen, so a record
/// without a key that a later record introduced reads it as absent.
pub fn read_json(text: &str) -> Result<Table, SourceError> {
    let records = parse_records(text)?;
    let mut table = Table::with_catalog(FieldCatalog::empty());

    for (record, value) in records {
        let serde_json::Value::Object(map) = value else {
            return Err(SourceError::parse(record, "expected a JSON object"));
        };
        let row = table.push_row(Vec::new())?;
        for (key, value) in map {
            row.insert(&key, Value::from_json(value))
                .map_err(|e| SourceError::parse(record, e.to_string()))?;
        }
    }

    tracing::debug!(rows = table.len(), fields = table.catalog().field_count(), "json parsed");
    Ok(table)
}

/// `(record number, value)` pairs, numbered from 1.
fn parse_records(text: &str) -> Result<Vec<(usize, serde_json::Value)>, SourceError> {
    if text.trim_start().starts_with('[') {
        let items: Vec<serde_json::Value> = serde_json::from_str(text)?;
        return Ok(items.into_iter().enumerate().map(|(i, v)| (i + 1, v)).collect());
    }

    let mut records = Vec::new();
    for (i, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let value = serde_json::from_str(line)
            .map_err(|e| SourceError::parse(i + 1, e.to_string()))?;
        records.push((i + 1, value));
    }
    Ok(records)
}
