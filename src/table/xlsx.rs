use super::conversion::IntoRawTable;
use super::raw::{Cell, RawRecord, RawTable};
use crate::error::SchemaError;
use calamine::{Data, Reader, open_workbook_auto};
use std::path::PathBuf;

/// A worksheet in an XLSX/XLS/ODS workbook. The first row is the header.
pub struct SpreadsheetSource {
    path: PathBuf,
    sheet: Option<String>,
}

impl SpreadsheetSource {
    /// Reads the first sheet of the workbook at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            sheet: None,
        }
    }

    pub fn with_sheet(mut self, sheet: &str) -> Self {
        self.sheet = Some(sheet.to_string());
        self
    }

    fn unreadable(&self, message: String) -> SchemaError {
        SchemaError::UnreadableSource {
            path: self.path.display().to_string(),
            message,
        }
    }
}

impl IntoRawTable for SpreadsheetSource {
    fn into_raw_table(self) -> Result<RawTable, SchemaError> {
        let mut workbook = open_workbook_auto(&self.path)
            .map_err(|e| self.unreadable(format!("Failed to open spreadsheet: {}", e)))?;

        let sheet = match &self.sheet {
            Some(sheet) => sheet.clone(),
            None => workbook
                .sheet_names()
                .first()
                .cloned()
                .ok_or_else(|| self.unreadable("Workbook has no sheets".to_string()))?,
        };

        let range = workbook
            .worksheet_range(&sheet)
            .map_err(|e| self.unreadable(format!("Failed to read sheet '{}': {}", sheet, e)))?;

        let mut rows = range.rows();
        let columns: Vec<String> = rows
            .next()
            .map(|header| header.iter().map(|c| c.to_string().trim().to_string()).collect())
            .unwrap_or_default();

        let records = rows
            .map(|row| {
                columns
                    .iter()
                    .zip(row)
                    .filter(|(column, _)| !column.is_empty())
                    .filter_map(|(column, data)| cell_from_data(data).map(|c| (column.clone(), c)))
                    .collect::<RawRecord>()
            })
            .collect();

        Ok(RawTable::new(
            columns.into_iter().filter(|c| !c.is_empty()).collect(),
            records,
        ))
    }
}

fn cell_from_data(data: &Data) -> Option<Cell> {
    match data {
        Data::Empty | Data::Error(_) => None,
        Data::Int(i) => Some(Cell::Number(*i as f64)),
        Data::Float(f) => Some(Cell::Number(*f)),
        Data::Bool(b) => Some(Cell::Bool(*b)),
        Data::String(s) => Some(Cell::Text(s.clone())),
        other => Some(Cell::Text(other.to_string())),
    }
}
