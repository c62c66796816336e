// src/paths.rs

use std::path::{Path, PathBuf};

use crate::clock::RunStamp;
use crate::config::IngestConfig;

const LOG_PREFIX: &str = "ingestion";
pub const LOG_EXTENSION: &str = "log";
const OUTPUT_EXTENSION: &str = "csv";

/// File locations for one run, all keyed on the same `RunStamp`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPaths {
    pub log_file: PathBuf,
    pub output_file: PathBuf,
}

impl RunPaths {
    pub fn new(config: &IngestConfig, stamp: &RunStamp) -> Self {
        Self {
            log_file: log_file(&config.log_dir, stamp),
            output_file: output_file(&config.processed_dir, &config.output_prefix, stamp),
        }
    }
}

/// `ingestion_<YYYYMMDD_HHMMSS>`, the log file name without its extension.
pub fn log_file_stem(stamp: &RunStamp) -> String {
    format!("{}_{}", LOG_PREFIX, stamp.file_stamp())
}

/// Name of the log file without its directory, e.g. `ingestion_20240307_090502.log`.
pub fn log_file_name(stamp: &RunStamp) -> String {
    format!("{}.{}", log_file_stem(stamp), LOG_EXTENSION)
}

pub fn log_file(log_dir: &Path, stamp: &RunStamp) -> PathBuf {
    log_dir.join(log_file_name(stamp))
}

/// `<processed_dir>/<prefix>_<YYYYMMDD_HHMMSS>.csv`
pub fn output_file(processed_dir: &Path, prefix: &str, stamp: &RunStamp) -> PathBuf {
    processed_dir.join(format!(
        "{}_{}.{}",
        prefix,
        stamp.file_stamp(),
        OUTPUT_EXTENSION
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn stamp() -> RunStamp {
        RunStamp::from(Utc.with_ymd_and_hms(2024, 3, 7, 9, 5, 2).unwrap())
    }

    #[test]
    fn paths_follow_the_naming_patterns() {
        let cfg = IngestConfig::default()
            .with_processed_dir("out/processed")
            .with_log_dir("out/logs");
        let paths = RunPaths::new(&cfg, &stamp());

        assert_eq!(
            paths.log_file,
            PathBuf::from("out/logs/ingestion_20240307_090502.log")
        );
        assert_eq!(
            paths.output_file,
            PathBuf::from("out/processed/warehouse_retail_ingested_20240307_090502.csv")
        );
    }

    #[test]
    fn legacy_prefix_lands_in_output_name() {
        let cfg = IngestConfig::load_only();
        let paths = RunPaths::new(&cfg, &stamp());
        assert_eq!(
            paths.output_file.file_name().and_then(|s| s.to_str()),
            Some("warehouse_retail_loaded_20240307_090502.csv")
        );
    }
}
