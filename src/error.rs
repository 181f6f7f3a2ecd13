// MIT License
// Copyright (c) 2024 Graham King

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PopulateError {
    #[error("{} not found!", .0.display())]
    SourceNotFound(PathBuf),

    #[error("error reading YAML file {}: {source}", path.display())]
    SourceRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("error parsing YAML file {}: {source}", path.display())]
    SourceParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("{reason}")]
    RecordInsert { label: String, reason: String },

    #[error("database error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("error writing output: {0}")]
    Output(#[from] std::io::Error),
}

impl PopulateError {
    pub fn record(label: &str, reason: impl Into<String>) -> PopulateError {
        PopulateError::RecordInsert {
            label: label.to_string(),
            reason: reason.into(),
        }
    }
}
