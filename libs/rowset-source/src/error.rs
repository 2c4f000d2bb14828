use rowset::RowError;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("config ({context}): {detail}")]
    Config { context: &'static str, detail: String },

    #[error("read '{path}': {source}")]
    Read { path: String, source: std::io::Error },

    #[error("record {record}: {detail}")]
    Parse { record: usize, detail: String },

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("row: {0}")]
    Row(#[from] RowError),
}

impl SourceError {
    pub fn parse(record: usize, detail: impl Into<String>) -> Self {
        SourceError::Parse { record, detail: detail.into() }
    }

    /// Add context to the error.
    ///
    /// Only message-carrying variants change; the others are returned as-is.
    pub fn with_context(self, ctx: impl std::fmt::Display) -> Self {
        match self {
            SourceError::Config { context, detail } => SourceError::Config {
                context,
                detail: format!("{ctx}: {detail}"),
            },
            SourceError::Parse { record, detail } => SourceError::Parse {
                record,
                detail: format!("{ctx}: {detail}"),
            },
            other => other,
        }
    }
}
