//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and functions from the crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use prd_template::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let table: RowTable = vec![
//!     InputRow::question("Bạn có muốn chơi không?"),
//!     InputRow::response("affirm", 1, "Tuyệt vời!").with_user_examples("có, được"),
//!     InputRow::question("Bắt đầu nhé!"),
//! ]
//! .into_iter()
//! .collect();
//!
//! let rows = transform(&table)?;
//! assert_eq!(rows.len(), 3);
//! # Ok(())
//! # }
//! ```

// Transformation
pub use crate::engine::{TransformEngine, Transformation, transform};
pub use crate::graph::{DialogueGraph, Node, QuestionNode, ResponseNode};

// Analysis
pub use crate::analysis::{QuestionBlock, QuestionBlocks, Turn, TurnLoopTable};

// Input tables
pub use crate::table::{
    Cell, Column, InputRow, IntoRawTable, JsonRecords, LoadedTable, RawTable, RowTable, Section,
    TableLoader,
};
#[cfg(feature = "xlsx")]
pub use crate::table::SpreadsheetSource;

// Utterances and descriptions
pub use crate::description::describe_intent;
pub use crate::utterance::{MoodDescriptor, Utterance, VoiceSpeed};

// Output and validation
pub use crate::output::{OUTPUT_COLUMNS, OutputRow, TransformSummary, write_json_records};
pub use crate::validation::{ImageLinkValidator, validate_images};

// Error types
pub use crate::error::{
    FieldError, ImageLinkProblem, ImageLinkViolation, SchemaError, TransformError,
};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
