use super::conversion::IntoRawTable;
use super::definition::{Column, InputRow, RowTable, Section};
use super::raw::{Cell, RawRecord};
use crate::error::{FieldError, SchemaError};
use ahash::AHashMap;
use tracing::{debug, warn};

/// A parsed table together with every field-level problem found while parsing it.
#[derive(Debug, Clone, Default)]
pub struct LoadedTable {
    pub table: RowTable,
    pub field_errors: Vec<FieldError>,
}

/// Checks a raw table against the PRD QC schema and parses its records into [`InputRow`]s.
pub struct TableLoader {
    aliases: AHashMap<String, Column>,
}

impl Default for TableLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl TableLoader {
    pub fn new() -> Self {
        Self {
            aliases: AHashMap::new(),
        }
    }

    /// Accepts `user_column` as the header for the canonical column `column_name`.
    /// Unknown canonical names are ignored.
    pub fn with_column_alias(mut self, user_column: &str, column_name: &str) -> Self {
        if let Some(column) = Column::from_name(column_name) {
            self.aliases.insert(user_column.to_string(), column);
        }
        self
    }

    /// Reads `source` and parses every record.
    ///
    /// A missing required column is fatal. Malformed numeric cells are collected in
    /// [`LoadedTable::field_errors`] and the affected cells are treated as absent.
    pub fn load<S: IntoRawTable>(&self, source: S) -> Result<LoadedTable, SchemaError> {
        let raw = source.into_raw_table()?;
        if raw.columns.is_empty() && raw.records.is_empty() {
            debug!("Input has no header and no records");
            return Ok(LoadedTable::default());
        }
        let headers = self.resolve_headers(&raw.columns)?;
        debug!(
            rows = raw.records.len(),
            columns = raw.columns.len(),
            "Input schema accepted"
        );

        let mut field_errors = Vec::new();
        let rows = raw
            .records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let mut parser = RecordParser {
                    record,
                    headers: &headers,
                    row: index + 1,
                    errors: &mut field_errors,
                };
                parser.parse()
            })
            .collect();

        for error in &field_errors {
            warn!("{}", error);
        }

        Ok(LoadedTable {
            table: RowTable::new(rows),
            field_errors,
        })
    }

    /// Maps every canonical column to the header that carries it in this sheet.
    fn resolve_headers(&self, columns: &[String]) -> Result<Vec<String>, SchemaError> {
        let mut resolved = Vec::with_capacity(Column::ALL.len());
        let mut missing = Vec::new();

        for column in Column::ALL {
            let header = columns
                .iter()
                .find(|h| h.as_str() == column.name())
                .or_else(|| {
                    columns
                        .iter()
                        .find(|h| self.aliases.get(h.as_str()) == Some(&column))
                });
            match header {
                Some(header) => resolved.push(header.clone()),
                None => missing.push(column.name().to_string()),
            }
        }

        if missing.is_empty() {
            Ok(resolved)
        } else {
            Err(SchemaError::MissingColumns(missing))
        }
    }
}

struct RecordParser<'a> {
    record: &'a RawRecord,
    headers: &'a [String],
    row: usize,
    errors: &'a mut Vec<FieldError>,
}

impl<'a> RecordParser<'a> {
    fn parse(&mut self) -> InputRow {
        InputRow {
            section: Section::parse(self.text(Column::Section).as_deref()),
            intent: self.text(Column::Intent),
            loop_count: self.loop_count(),
            text: self.text(Column::TextVietnamese),
            mood: self.text(Column::Mood),
            servo_name: self.text(Column::ServoName),
            servo_duration: self.number(Column::ServoDuration),
            image: self.text(Column::Image),
            audio: self.text(Column::Audio),
            voice_speed: self.number(Column::VoiceSpeed),
            button: self.text(Column::Button),
            image_listening: self.text(Column::ImageListening),
            audio_listening: self.text(Column::AudioListening),
            user_examples: self.text(Column::UserExamples),
        }
    }

    fn cell(&self, column: Column) -> Option<&'a Cell> {
        self.record.get(&self.headers[column as usize])
    }

    fn text(&self, column: Column) -> Option<String> {
        self.cell(column)
            .map(Cell::as_text)
            .filter(|text| !text.is_empty())
    }

    fn number(&mut self, column: Column) -> Option<f64> {
        match self.cell(column)? {
            Cell::Number(n) => Some(*n),
            Cell::Text(s) if s.trim().is_empty() => None,
            Cell::Text(s) => match s.trim().parse::<f64>() {
                Ok(n) if n.is_finite() => Some(n),
                _ => {
                    let value = s.clone();
                    self.reject(column, value, "expected a number")
                }
            },
            Cell::Bool(b) => {
                let value = b.to_string();
                self.reject(column, value, "expected a number")
            }
        }
    }

    fn loop_count(&mut self) -> Option<u32> {
        let raw = self.cell(Column::Loop)?.as_text();
        let value = self.number(Column::Loop)?;
        if value.fract() == 0.0 && (0.0..=u32::MAX as f64).contains(&value) {
            Some(value as u32)
        } else {
            self.reject(Column::Loop, raw, "expected a non-negative whole number")
        }
    }

    fn reject<T>(&mut self, column: Column, value: String, reason: &str) -> Option<T> {
        self.errors.push(FieldError {
            row: self.row,
            column: column.name().to_string(),
            value,
            reason: reason.to_string(),
        });
        None
    }
}
