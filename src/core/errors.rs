use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(Box<csv::Error>),

    #[error("Missing input file {}: {source}", path.display())]
    MissingInput { path: PathBuf, source: Box<std::io::Error> },

    #[error("Missing required column '{column}' in {}", path.display())]
    MissingColumn { path: PathBuf, column: String },

    #[error("Invalid value '{value}' for column '{column}' in {} (line {line})", path.display())]
    InvalidField { path: PathBuf, line: u64, column: String, value: String },

    #[error("Duplicate rank {rank} in category '{category}' in {}", path.display())]
    DuplicateRank { path: PathBuf, category: String, rank: u32 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<std::io::Error> for DashboardError {
    fn from(error: std::io::Error) -> Self {
        DashboardError::Io(Box::new(error))
    }
}

impl From<csv::Error> for DashboardError {
    fn from(error: csv::Error) -> Self {
        DashboardError::Csv(Box::new(error))
    }
}
