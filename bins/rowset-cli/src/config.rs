use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rowset::Table;
use rowset_source::SourceConfig;

use crate::error::CliError;

#[derive(Parser)]
#[command(name = "rowset", about = "Inspect tabular files as shared-schema rows")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print every row, optionally after editing it
    Show(ShowArgs),
    /// List catalog fields and how many rows hold each one
    Fields(InputArgs),
}

#[derive(Args, Clone, Debug)]
pub struct InputArgs {
    /// CSV or JSON file to load
    #[arg(long)]
    pub input: PathBuf,

    /// TOML source config; without it the format follows the file extension
    #[arg(long, env = "ROWSET_CONFIG")]
    pub config: Option<String>,
}

#[derive(Args, Clone, Debug)]
pub struct ShowArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Remove a field from every row (repeatable)
    #[arg(long = "drop", value_name = "FIELD")]
    pub drop: Vec<String>,

    /// Write `name=value` into every row (repeatable). The value is read as
    /// JSON when it parses, as text otherwise
    #[arg(long = "set", value_name = "NAME=VALUE")]
    pub set: Vec<String>,

    /// Print the table as a JSON array instead of one line per row
    #[arg(long)]
    pub json: bool,
}

impl InputArgs {
    pub fn source_config(&self) -> Result<SourceConfig, CliError> {
        match &self.config {
            Some(path) => Ok(SourceConfig::load(path)?),
            None => Ok(SourceConfig::for_path(&self.input)),
        }
    }

    pub fn load(&self) -> Result<Table, CliError> {
        let config = self.source_config()?;
        tracing::info!(input = %self.input.display(), format = ?config.format, "loading input");
        Ok(rowset_source::load_path(&config, &self.input)?)
    }
}
