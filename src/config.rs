// src/config.rs

use std::path::PathBuf;

pub const RAW_DATA_PATH: &str = "data/raw/Warehouse_and_Retail_Sales.csv";
pub const PROCESSED_DATA_DIR: &str = "data/processed";
pub const LOG_DIR: &str = "logs";

/// Output prefix of the validating pipeline.
pub const INGESTED_PREFIX: &str = "warehouse_retail_ingested";
/// Output prefix of the legacy load-only pipeline.
pub const LOADED_PREFIX: &str = "warehouse_retail_loaded";

/// Name of the column appended to every row of a run.
pub const INGESTION_TIMESTAMP_COLUMN: &str = "ingestion_timestamp";

/// Columns every raw sales file must carry, matched exactly.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    "YEAR",
    "MONTH",
    "SUPPLIER",
    "ITEM CODE",
    "ITEM DESCRIPTION",
    "ITEM TYPE",
    "RETAIL SALES",
    "RETAIL TRANSFERS",
    "WAREHOUSE SALES",
];

/// Fixed settings for one ingestion pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestConfig {
    pub source_path: PathBuf,
    pub processed_dir: PathBuf,
    pub log_dir: PathBuf,
    /// Qualifier placed in front of the output file's timestamp.
    pub output_prefix: String,
    /// When false, only the emptiness check runs.
    pub validate_schema: bool,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            source_path: PathBuf::from(RAW_DATA_PATH),
            processed_dir: PathBuf::from(PROCESSED_DATA_DIR),
            log_dir: PathBuf::from(LOG_DIR),
            output_prefix: INGESTED_PREFIX.to_string(),
            validate_schema: true,
        }
    }
}

impl IngestConfig {
    /// The older pipeline that skipped the required-column check.
    pub fn load_only() -> Self {
        Self {
            output_prefix: LOADED_PREFIX.to_string(),
            validate_schema: false,
            ..Self::default()
        }
    }

    pub fn with_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_path = path.into();
        self
    }

    pub fn with_processed_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.processed_dir = dir.into();
        self
    }

    pub fn with_log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = dir.into();
        self
    }

    pub fn with_output_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.output_prefix = prefix.into();
        self
    }

    pub fn with_schema_validation(mut self, enabled: bool) -> Self {
        self.validate_schema = enabled;
        self
    }
}
