use super::raw::{Cell, RawRecord, RawTable};
use crate::error::SchemaError;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// A trait for sources that can be read into a [`RawTable`].
///
/// This is the seam between the transformation engine and whatever holds the PRD QC
/// sheet. The crate ships JSON records and (with the `xlsx` feature) spreadsheet
/// workbooks; other formats only need to implement this trait.
///
/// # Example
///
/// ```rust,no_run
/// use prd_template::error::SchemaError;
/// use prd_template::table::{Cell, IntoRawTable, RawRecord, RawTable};
///
/// struct CsvLines(Vec<Vec<String>>);
///
/// impl IntoRawTable for CsvLines {
///     fn into_raw_table(self) -> Result<RawTable, SchemaError> {
///         let mut lines = self.0.into_iter();
///         let columns = lines.next().unwrap_or_default();
///         let records = lines
///             .map(|line| {
///                 columns
///                     .iter()
///                     .cloned()
///                     .zip(line)
///                     .filter(|(_, value)| !value.is_empty())
///                     .map(|(column, value)| (column, Cell::Text(value)))
///                     .collect::<RawRecord>()
///             })
///             .collect();
///         Ok(RawTable::new(columns, records))
///     }
/// }
/// ```
pub trait IntoRawTable {
    /// Consumes the source and produces its header and records.
    fn into_raw_table(self) -> Result<RawTable, SchemaError>;
}

impl IntoRawTable for RawTable {
    fn into_raw_table(self) -> Result<RawTable, SchemaError> {
        Ok(self)
    }
}

/// A JSON array of flat objects, one object per row. `null` values are absent cells.
pub struct JsonRecords<'a> {
    text: &'a str,
}

impl<'a> JsonRecords<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }
}

impl IntoRawTable for JsonRecords<'_> {
    fn into_raw_table(self) -> Result<RawTable, SchemaError> {
        let objects: Vec<Map<String, Value>> = serde_json::from_str(self.text)
            .map_err(|e| SchemaError::JsonParseError(e.to_string()))?;

        let mut columns: Vec<String> = Vec::new();
        let mut records = Vec::with_capacity(objects.len());
        for object in objects {
            let mut record = RawRecord::default();
            for (key, value) in object {
                if !columns.contains(&key) {
                    columns.push(key.clone());
                }
                if let Some(cell) = cell_from_json(value) {
                    record.insert(key, cell);
                }
            }
            records.push(record);
        }

        Ok(RawTable::new(columns, records))
    }
}

fn cell_from_json(value: Value) -> Option<Cell> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(Cell::Bool(b)),
        Value::Number(n) => n.as_f64().map(Cell::Number),
        Value::String(s) => Some(Cell::Text(s)),
        other => Some(Cell::Text(other.to_string())),
    }
}

/// Reads a JSON records file from disk.
pub fn read_json_records(path: impl AsRef<Path>) -> Result<RawTable, SchemaError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| SchemaError::UnreadableSource {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    JsonRecords::new(&text).into_raw_table()
}
