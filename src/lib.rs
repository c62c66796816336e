pub mod clock;
pub mod config;
pub mod error;
pub mod ingest;
pub mod logging;
pub mod paths;
pub mod table;

pub use clock::{Clock, FixedClock, RunStamp, SystemClock};
pub use config::{IngestConfig, INGESTION_TIMESTAMP_COLUMN, REQUIRED_COLUMNS};
pub use error::{IngestError, LoadError, PersistError};
pub use ingest::{Ingestor, RunReport};
pub use logging::RunLogger;
pub use table::Table;
