// src/table/write.rs

use arrow::csv::WriterBuilder;
use std::{fs, path::Path};
use tracing::debug;

use super::Table;
use crate::error::PersistError;

/// Timestamps are written as UTC wall time with microseconds.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Write `table` as a headed CSV file at `path`.
///
/// The file is assembled next to the target as `<name>.tmp` and renamed into
/// place, so `path` only ever holds a complete file. An existing `path` is
/// never overwritten.
pub fn write_csv<P: AsRef<Path>>(table: &Table, path: P) -> Result<(), PersistError> {
    let path = path.as_ref();
    if path.exists() {
        return Err(PersistError::AlreadyExists);
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let buf = encode_csv(table)?;

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = Path::new(&tmp_name);

    if let Err(e) = fs::write(tmp_path, &buf).and_then(|_| fs::rename(tmp_path, path)) {
        let _ = fs::remove_file(tmp_path);
        return Err(e.into());
    }

    debug!(path = %path.display(), bytes = buf.len(), "wrote csv");
    Ok(())
}

/// Serialise the header plus every row, without any row index.
fn encode_csv(table: &Table) -> Result<Vec<u8>, PersistError> {
    let mut buf = Vec::new();
    {
        let mut writer = WriterBuilder::new()
            .with_header(true)
            .with_timestamp_format(TIMESTAMP_FORMAT.to_string())
            .build(&mut buf);
        writer.write(table.batch())?;
    }
    Ok(buf)
}
