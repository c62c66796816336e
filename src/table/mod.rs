// src/table/mod.rs

use arrow::{
    array::{ArrayRef, TimestampMicrosecondArray},
    datatypes::{DataType, Field, FieldRef, Schema, TimeUnit},
    error::ArrowError,
    record_batch::RecordBatch,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;

pub mod load;
pub mod write;

pub use load::load_csv;
pub use write::write_csv;

/// An in-memory sales table: one record batch with a fixed column set.
#[derive(Debug, Clone)]
pub struct Table {
    batch: RecordBatch,
}

impl Table {
    pub fn new(batch: RecordBatch) -> Self {
        Self { batch }
    }

    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    pub fn num_columns(&self) -> usize {
        self.batch.num_columns()
    }

    pub fn is_empty(&self) -> bool {
        self.batch.num_rows() == 0
    }

    /// Header names, in file order.
    pub fn column_names(&self) -> Vec<String> {
        self.batch
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.batch.schema().column_with_name(name).is_some()
    }

    /// Entries of `required` this table lacks, in `required` order.
    /// Names must match exactly (case and spacing).
    pub fn missing_columns(&self, required: &[&str]) -> Vec<String> {
        required
            .iter()
            .filter(|name| !self.has_column(name))
            .map(|name| name.to_string())
            .collect()
    }

    /// Returns a copy with column `name` set to `at` on every row.
    /// An existing column of that name is replaced in place, otherwise it is appended.
    pub fn with_constant_timestamp(
        &self,
        name: &str,
        at: DateTime<Utc>,
    ) -> Result<Table, ArrowError> {
        let micros = at.timestamp_micros();
        let values: ArrayRef = Arc::new(TimestampMicrosecondArray::from(vec![
            micros;
            self.num_rows()
        ]));
        let field: FieldRef = Arc::new(Field::new(
            name,
            DataType::Timestamp(TimeUnit::Microsecond, None),
            false,
        ));

        let schema = self.batch.schema();
        let mut fields: Vec<FieldRef> = schema.fields().iter().cloned().collect();
        let mut columns: Vec<ArrayRef> = self.batch.columns().to_vec();

        match schema.index_of(name) {
            Ok(idx) => {
                fields[idx] = field;
                columns[idx] = values;
            }
            Err(_) => {
                fields.push(field);
                columns.push(values);
            }
        }

        let schema = Schema::new_with_metadata(fields, schema.metadata().clone());
        let batch = RecordBatch::try_new(Arc::new(schema), columns)?;
        Ok(Table::new(batch))
    }

    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }
}
