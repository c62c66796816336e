// src/ingest.rs

use chrono::{DateTime, Utc};
use std::{fs, path::PathBuf};
use tracing::{debug, error, info};

use crate::{
    clock::{Clock, RunStamp},
    config::{IngestConfig, INGESTION_TIMESTAMP_COLUMN, REQUIRED_COLUMNS},
    error::{IngestError, PersistError, Result},
    logging::RunLogger,
    paths::RunPaths,
    table::{load_csv, write_csv},
};

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub output_path: PathBuf,
    pub rows: usize,
    /// Column count of the written file, `ingestion_timestamp` included.
    pub columns: usize,
    pub started_at: DateTime<Utc>,
    pub ingested_at: DateTime<Utc>,
}

/// Read → validate → enrich → write for one raw sales file.
///
/// An `Ingestor` belongs to exactly one run: its logger and output name are
/// both keyed on the logger's `RunStamp`.
pub struct Ingestor {
    config: IngestConfig,
    logger: RunLogger,
    clock: Box<dyn Clock>,
}

impl Ingestor {
    /// Wire up an ingestor, creating the processed-data directory if needed.
    pub fn new(config: IngestConfig, logger: RunLogger, clock: Box<dyn Clock>) -> Result<Self> {
        if let Err(source) = fs::create_dir_all(&config.processed_dir) {
            let err = IngestError::Persist {
                path: config.processed_dir.clone(),
                source: PersistError::Io(source),
            };
            logger.in_scope(|| error!(error = ?err, "failed to create processed data directory"));
            return Err(err);
        }
        Ok(Self {
            config,
            logger,
            clock,
        })
    }

    /// Capture the run start from `clock`, open the run's log file, then build the ingestor.
    pub fn for_run(config: IngestConfig, clock: Box<dyn Clock>) -> Result<Self> {
        let stamp = RunStamp::capture(clock.as_ref());
        let logger = RunLogger::create(&config.log_dir, stamp)?;
        Self::new(config, logger, clock)
    }

    pub fn logger(&self) -> &RunLogger {
        &self.logger
    }

    /// Run one ingestion pass. Every failure is logged before it is returned.
    pub fn run(&self) -> Result<RunReport> {
        self.logger.in_scope(|| self.ingest())
    }

    fn ingest(&self) -> Result<RunReport> {
        let stamp = self.logger.stamp();
        let paths = RunPaths::new(&self.config, &stamp);
        let source = &self.config.source_path;
        info!(source = %source.display(), "starting ingestion");

        // ─── 1) load ─────────────────────────────────────────────────────
        let table = load_csv(source).map_err(|e| {
            logged(
                IngestError::Load {
                    path: source.clone(),
                    source: e,
                },
                "failed to read raw csv",
            )
        })?;
        info!(
            rows = table.num_rows(),
            cols = table.num_columns(),
            "csv loaded"
        );

        // ─── 2) required columns ─────────────────────────────────────────
        if self.config.validate_schema {
            let missing = table.missing_columns(&REQUIRED_COLUMNS);
            if !missing.is_empty() {
                return Err(logged(
                    IngestError::SchemaValidation { missing },
                    "missing required columns",
                ));
            }
        } else {
            debug!("schema validation disabled");
        }

        // ─── 3) emptiness ────────────────────────────────────────────────
        if table.is_empty() {
            return Err(logged(
                IngestError::EmptyDataset {
                    path: source.clone(),
                },
                "dataset is empty",
            ));
        }
        info!("schema and basic validation passed");

        // ─── 4) ingestion metadata ───────────────────────────────────────
        // one capture for the whole table
        let ingested_at = self.clock.now();
        let table = table
            .with_constant_timestamp(INGESTION_TIMESTAMP_COLUMN, ingested_at)
            .map_err(|e| logged(IngestError::Enrich(e), "failed to add ingestion timestamp"))?;

        // ─── 5) persist ──────────────────────────────────────────────────
        let output_path = paths.output_file;
        write_csv(&table, &output_path).map_err(|e| {
            logged(
                IngestError::Persist {
                    path: output_path.clone(),
                    source: e,
                },
                "failed to write processed data",
            )
        })?;
        info!(path = %output_path.display(), "processed data written");

        info!(rows = table.num_rows(), "ingestion completed successfully");
        Ok(RunReport {
            output_path,
            rows: table.num_rows(),
            columns: table.num_columns(),
            started_at: stamp.at(),
            ingested_at,
        })
    }
}

/// Record `err` with its full source chain, then hand it back for propagation.
fn logged(err: IngestError, what: &str) -> IngestError {
    error!(error = ?err, "{}", what);
    err
}
