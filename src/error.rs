// src/error.rs

use arrow::error::ArrowError;
use std::path::PathBuf;
use thiserror::Error;
use tracing_appender::rolling::InitError;

/// Why the source file could not be turned into a table.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parse error: {0}")]
    Csv(#[from] ArrowError),
}

/// Why the processed copy could not be written.
#[derive(Error, Debug)]
pub enum PersistError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] ArrowError),

    #[error("output file already exists")]
    AlreadyExists,
}

/// Terminal failures of an ingestion run.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("failed to load {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: LoadError,
    },

    #[error("schema validation failed, missing required columns: {}", missing.join(", "))]
    SchemaValidation { missing: Vec<String> },

    #[error("dataset {} is empty", path.display())]
    EmptyDataset { path: PathBuf },

    #[error("failed to add ingestion metadata: {0}")]
    Enrich(#[source] ArrowError),

    #[error("failed to write {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: PersistError,
    },

    #[error("failed to create log directory {}: {source}", path.display())]
    LogDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to open run log: {0}")]
    Logging(#[from] InitError),
}

pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn schema_error_names_missing_columns() {
        let err = IngestError::SchemaValidation {
            missing: vec!["ITEM TYPE".into(), "WAREHOUSE SALES".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("ITEM TYPE, WAREHOUSE SALES"), "{msg}");
    }

    #[test]
    fn load_error_keeps_underlying_cause() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = IngestError::Load {
            path: PathBuf::from("data/raw/x.csv"),
            source: LoadError::from(io),
        };
        assert!(err.to_string().contains("data/raw/x.csv"));
        let cause = err.source().expect("load error has a source");
        assert!(cause.to_string().contains("no such file"));
    }
}
