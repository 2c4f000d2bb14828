use std::path::Path;

use serde::Deserialize;

use crate::error::SourceError;

/// Input format of a tabular source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceFormat {
    #[default]
    Csv,
    /// Array of objects or one object per line.
    Json,
}

impl SourceFormat {
    /// Guess from a file extension; `None` when it is not recognised.
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" | "tsv" | "txt" => Some(SourceFormat::Csv),
            "json" | "jsonl" | "ndjson" => Some(SourceFormat::Json),
            _ => None,
        }
    }
}

/// How to read a source file. Parsed from TOML.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub format: SourceFormat,

    /// CSV field delimiter (default ",").
    pub delimiter: String,

    /// First CSV line names the columns (default true). Without it columns
    /// are named `col0`, `col1`, ...
    pub header: bool,

    /// RFC 4180 double-quote handling (default true).
    pub quoting: bool,

    /// CSV text that reads as null (default: the empty field).
    pub null_token: String,

    /// Parse CSV fields into bool/int/float; otherwise keep every field as text.
    pub infer_types: bool,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            format: SourceFormat::Csv,
            delimiter: ",".to_string(),
            header: true,
            quoting: true,
            null_token: String::new(),
            infer_types: true,
        }
    }
}

impl SourceConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self, SourceError> {
        let content = std::fs::read_to_string(path).map_err(|e| SourceError::Config {
            context: "read",
            detail: format!("'{path}': {e}"),
        })?;
        Self::parse(&content).map_err(|e| e.with_context(format!("'{path}'")))
    }

    /// Parse configuration from a TOML string.
    pub fn parse(toml_str: &str) -> Result<Self, SourceError> {
        toml::from_str(toml_str).map_err(|e| SourceError::Config {
            context: "parse",
            detail: e.to_string(),
        })
    }

    /// Defaults, with the format taken from the file extension.
    pub fn for_path(path: &Path) -> Self {
        Self {
            format: SourceFormat::from_extension(path).unwrap_or_default(),
            delimiter: match path.extension().and_then(|e| e.to_str()) {
                Some("tsv") => "\t".to_string(),
                _ => ",".to_string(),
            },
            ..Self::default()
        }
    }

    pub(crate) fn delimiter_char(&self) -> Result<char, SourceError> {
        match self.delimiter.as_str() {
            "\\t" | "\t" => Ok('\t'),
            s if s.chars().count() == 1 => s.chars().next().ok_or_else(|| bad_delimiter(s)),
            other => Err(bad_delimiter(other)),
        }
    }
}

fn bad_delimiter(s: &str) -> SourceError {
    SourceError::Config {
        context: "delimiter",
        detail: format!("must be a single character, got {s:?}"),
    }
}
