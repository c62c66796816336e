// src/table/load.rs

use arrow::{
    compute::concat_batches,
    csv::{reader::Format, ReaderBuilder},
    datatypes::{DataType, Field, Schema},
    error::ArrowError,
    record_batch::RecordBatch,
};
use std::{
    fs::File,
    io::{BufReader, Seek},
    path::Path,
    sync::Arc,
};
use tracing::{debug, instrument};

use super::Table;
use crate::error::LoadError;

const BATCH_SIZE: usize = 64 * 1024;

/// Read a headed CSV file into a single table.
///
/// Integer and float columns are inferred from the whole file; every other
/// column stays text so its cells are written back byte for byte. Empty
/// cells load as nulls. Rows with a field count that differs from the
/// header are rejected.
#[instrument(level = "debug", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Table, LoadError> {
    let path = path.as_ref();
    let mut file = File::open(path)?;

    // 1) infer a schema from the header + every data row
    let format = Format::default().with_header(true);
    let (schema, records) = format.infer_schema(BufReader::new(&mut file), None)?;
    debug!(fields = schema.fields().len(), records, "inferred schema");

    // 2) parse again, dates/timestamps/booleans read as plain text
    file.rewind()?;
    let schema = Arc::new(make_read_schema(&schema));
    let reader = ReaderBuilder::new(schema.clone())
        .with_header(true)
        .with_batch_size(BATCH_SIZE)
        .build(BufReader::new(file))?;
    let batches = reader.collect::<Result<Vec<RecordBatch>, ArrowError>>()?;

    // 3) one batch per table
    let batch = concat_batches(&schema, &batches)?;
    Ok(Table::new(batch))
}

/// Keep numeric and all-null columns as inferred; anything else becomes `Utf8`.
fn make_read_schema(inferred: &Schema) -> Schema {
    let fields: Vec<Field> = inferred
        .fields()
        .iter()
        .map(|f| match f.data_type() {
            DataType::Int64 | DataType::Float64 | DataType::Null | DataType::Utf8 => {
                f.as_ref().clone()
            }
            _ => Field::new(f.name(), DataType::Utf8, true),
        })
        .collect();
    Schema::new_with_metadata(fields, inferred.metadata().clone())
}
