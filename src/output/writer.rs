use super::row::OutputRow;
use crate::error::TransformError;
use std::fs;
use std::path::Path;

/// Renders rows as a pretty JSON array of records; every column is present, in order.
pub fn to_json_records(rows: &[OutputRow]) -> Result<String, TransformError> {
    serde_json::to_string_pretty(rows).map_err(|e| TransformError::Serialization(e.to_string()))
}

/// Writes rows to `path` as JSON records.
pub fn write_json_records(rows: &[OutputRow], path: impl AsRef<Path>) -> Result<(), TransformError> {
    let path = path.as_ref();
    let json = to_json_records(rows)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| output_error(path, e))?;
    }
    fs::write(path, json).map_err(|e| output_error(path, e))
}

/// Reads rows previously written with [`write_json_records`].
pub fn parse_json_records(text: &str) -> Result<Vec<OutputRow>, TransformError> {
    serde_json::from_str(text).map_err(|e| TransformError::Serialization(e.to_string()))
}

fn output_error(path: &Path, error: std::io::Error) -> TransformError {
    TransformError::Output {
        path: path.display().to_string(),
        message: error.to_string(),
    }
}
