//! # PRD Template - PRD QC to Dialogue Template Transformer
//!
//! **prd-template** turns a "PRD QC" sheet, where every row is one utterance of a scripted
//! conversation, into the template table a dialogue-authoring tool imports. Consecutive
//! question rows collapse into one question row; intent responses collapse into one row
//! per `(intent, loop)` pair; and the last loop of every intent in a turn is stitched to
//! the question that follows it, so the flat sheet becomes a connected dialogue.
//!
//! ## Core Workflow
//!
//! 1.  **Load Your Table**: Read a sheet into a [`table::RawTable`] through any
//!     [`table::IntoRawTable`] source (JSON records, or spreadsheets with the `xlsx` feature).
//! 2.  **Check the Schema**: A [`table::TableLoader`] verifies the required columns and
//!     parses each record into an [`table::InputRow`], collecting malformed fields.
//! 3.  **Transform**: A [`engine::TransformEngine`] scans question blocks and turns,
//!     materializes the [`graph::DialogueGraph`] and flattens it into [`output::OutputRow`]s.
//! 4.  **Validate**: Every embedded image filename is checked before the rows are handed back.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use prd_template::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let json = std::fs::read_to_string("prd_qc_table.json")?;
//!     let loaded = TableLoader::new().load(JsonRecords::new(&json))?;
//!
//!     let engine = TransformEngine::builder().strict_fields(true).build();
//!     let transformation = engine.transform_loaded(loaded)?;
//!
//!     let summary = TransformSummary::from_rows(&transformation.rows);
//!     println!(
//!         "{} rows ({} questions, {} intents)",
//!         summary.total_rows, summary.question_rows, summary.intent_rows
//!     );
//!     write_json_records(&transformation.rows, "template_output.json")?;
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod description;
pub mod engine;
pub mod error;
pub mod graph;
pub mod output;
pub mod prelude;
pub mod table;
pub mod utterance;
pub mod validation;
