use itertools::Itertools;
use std::fmt::Display;
use thiserror::Error;

/// Errors raised while reading a source into a row table. These are fatal for the run.
#[derive(Error, Debug, Clone)]
pub enum SchemaError {
    #[error("Input table is missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Failed to parse table JSON: {0}")]
    JsonParseError(String),

    #[error("Could not read input '{path}': {message}")]
    UnreadableSource { path: String, message: String },

    #[error("Unsupported input format '{0}'")]
    UnsupportedFormat(String),
}

/// A single malformed cell. Field errors never abort loading on their own: the cell is
/// treated as absent and the error is reported with the result.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Row {row}, column '{column}': {reason} (found '{value}')")]
pub struct FieldError {
    /// 1-indexed data row, not counting the header.
    pub row: usize,
    pub column: String,
    pub value: String,
    pub reason: String,
}

/// What is wrong with an embedded image filename.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageLinkProblem {
    #[error("Image name contains spaces")]
    ContainsSpaces,

    #[error("Image name must end with {expected}")]
    BadExtension { expected: String },
}

/// An image filename in a produced utterance array that the downstream tool would reject.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Row {row} ({column}, item {item}): {problem}: {image}")]
pub struct ImageLinkViolation {
    /// 1-indexed output row.
    pub row: usize,
    pub column: &'static str,
    /// 1-indexed position inside the utterance array.
    pub item: usize,
    pub image: String,
    pub problem: ImageLinkProblem,
}

/// Errors that can occur while turning a row table into template rows.
#[derive(Error, Debug, Clone)]
pub enum TransformError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("Input has {} malformed field(s):\n{}", .0.len(), bullet_list(.0))]
    MalformedFields(Vec<FieldError>),

    #[error("Validation failed with {} image link violation(s):\n{}", .0.len(), bullet_list(.0))]
    ImageLinks(Vec<ImageLinkViolation>),

    #[error("No data to transform: the input has no Question or Intent_Response rows")]
    EmptyResult,

    #[error("Failed to serialize utterances: {0}")]
    Serialization(String),

    #[error("Could not write output '{path}': {message}")]
    Output { path: String, message: String },
}

fn bullet_list<T: Display>(items: &[T]) -> String {
    items.iter().map(|item| format!("  - {}", item)).join("\n")
}
