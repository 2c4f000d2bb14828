//! Tabular sources that materialise a [`rowset::Table`] from CSV or JSON.

pub mod config;
pub mod csv;
pub mod error;
pub mod json;

use std::path::Path;

use rowset::Table;

pub use config::{SourceConfig, SourceFormat};
pub use error::SourceError;

/// Load a table from in-memory text.
pub fn load_str(config: &SourceConfig, text: &str) -> Result<Table, SourceError> {
    let table = match config.format {
        SourceFormat::Csv => csv::read_csv(text, config)?,
        SourceFormat::Json => json::read_json(text)?,
    };
    tracing::info!(
        format = ?config.format,
        rows = table.len(),
        fields = table.catalog().field_count(),
        "table loaded"
    );
    Ok(table)
}

/// Load a table from a file.
pub fn load_path(config: &SourceConfig, path: &Path) -> Result<Table, SourceError> {
    let text = std::fs::read_to_string(path).map_err(|source| SourceError::Read {
        path: path.display().to_string(),
        source,
    })?;
    load_str(config, &text).map_err(|e| e.with_context(path.display()))
}
