#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Source(#[from] rowset_source::SourceError),

    #[error("row: {0}")]
    Row(#[from] rowset::RowError),

    #[error("invalid --set '{0}': expected name=value")]
    BadAssignment(String),

    #[error("output: {0}")]
    Output(#[from] serde_json::Error),
}
