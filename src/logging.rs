// src/logging.rs

use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::Dispatch;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, fmt::MakeWriter, prelude::*, EnvFilter};

use crate::clock::RunStamp;
use crate::error::{IngestError, Result};
use crate::paths;

/// Log sink for a single run: one file under the log directory, mirrored to stdout.
///
/// Nothing is installed globally; events reach this sink only inside [`RunLogger::in_scope`].
pub struct RunLogger {
    dispatch: Dispatch,
    path: PathBuf,
    stamp: RunStamp,
}

impl RunLogger {
    /// Create `<log_dir>/ingestion_<YYYYMMDD_HHMMSS>.log`, making `log_dir` if needed.
    pub fn create(log_dir: &Path, stamp: RunStamp) -> Result<Self> {
        Self::with_console(log_dir, stamp, std::io::stdout)
    }

    /// Same as [`RunLogger::create`], but mirror lines to `console` instead of stdout.
    pub fn with_console<W>(log_dir: &Path, stamp: RunStamp, console: W) -> Result<Self>
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        fs::create_dir_all(log_dir).map_err(|source| IngestError::LogDir {
            path: log_dir.to_path_buf(),
            source,
        })?;

        let appender = RollingFileAppender::builder()
            .rotation(Rotation::NEVER)
            .filename_prefix(paths::log_file_stem(&stamp))
            .filename_suffix(paths::LOG_EXTENSION)
            .build(log_dir)?;

        // RUST_LOG still wins when set
        let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let file_layer = fmt::layer()
            .with_ansi(false)
            .with_target(false)
            .with_writer(appender);
        let console_layer = fmt::layer().with_target(false).with_writer(console);

        let subscriber = tracing_subscriber::registry()
            .with(env)
            .with(file_layer)
            .with(console_layer);

        Ok(Self {
            dispatch: Dispatch::new(subscriber),
            path: paths::log_file(log_dir, &stamp),
            stamp,
        })
    }

    /// Run `f` with this logger as the current default subscriber.
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        tracing::dispatcher::with_default(&self.dispatch, f)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Start instant of the run this logger belongs to.
    pub fn stamp(&self) -> RunStamp {
        self.stamp
    }
}

impl std::fmt::Debug for RunLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunLogger")
            .field("path", &self.path)
            .field("stamp", &self.stamp)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use chrono::{TimeZone, Utc};
    use std::{
        io::{self, Write},
        sync::{Arc, Mutex},
    };
    use tempfile::TempDir;
    use tracing::{error, info};

    fn stamp() -> RunStamp {
        RunStamp::from(Utc.with_ymd_and_hms(2024, 3, 7, 9, 5, 2).unwrap())
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn creates_named_log_file_in_missing_dir() -> Result<()> {
        let dir = TempDir::new()?;
        let log_dir = dir.path().join("logs");
        let logger = RunLogger::create(&log_dir, stamp())?;

        assert_eq!(logger.path(), log_dir.join("ingestion_20240307_090502.log"));
        assert!(logger.path().exists());
        Ok(())
    }

    #[test]
    fn scoped_events_land_in_the_file() -> Result<()> {
        let dir = TempDir::new()?;
        let logger = RunLogger::create(dir.path(), stamp())?;

        logger.in_scope(|| {
            info!(rows = 3, "loaded");
            error!("went wrong");
        });
        // outside the scope: goes nowhere near this file
        info!("not recorded");

        let text = fs::read_to_string(logger.path())?;
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2, "{text}");
        assert!(lines[0].contains("INFO") && lines[0].contains("loaded rows=3"));
        assert!(lines[1].contains("ERROR") && lines[1].contains("went wrong"));
        assert!(!text.contains('\u{1b}'), "file output must not carry ANSI codes");
        Ok(())
    }

    #[test]
    fn console_mirrors_every_file_line() -> Result<()> {
        let dir = TempDir::new()?;
        let console = Captured::default();
        let sink = console.clone();
        let logger = RunLogger::with_console(dir.path(), stamp(), move || sink.clone())?;

        logger.in_scope(|| {
            info!(rows = 3, "loaded");
            error!("went wrong");
        });

        let file = fs::read_to_string(logger.path())?;
        let shown = console.text();
        assert_eq!(shown.lines().count(), file.lines().count(), "{shown}");
        assert!(shown.contains("loaded"), "{shown}");
        assert!(shown.contains("went wrong"), "{shown}");
        Ok(())
    }
}
