use crate::analysis::{QuestionBlocks, TurnLoopTable};
use crate::error::{FieldError, TransformError};
use crate::graph::DialogueGraph;
use crate::output::OutputRow;
use crate::table::{LoadedTable, RowTable};
use crate::validation::ImageLinkValidator;
use tracing::{debug, info};

mod builder;
mod emitter;

use builder::GraphBuilder;
use emitter::emit_rows;

/// `MAX_LOOP` written on every question row.
pub const DEFAULT_QUESTION_MAX_LOOP: u32 = 2;

/// The accepted output of a run, with any field errors tolerated while loading.
#[derive(Debug, Clone)]
pub struct Transformation {
    pub rows: Vec<OutputRow>,
    pub field_errors: Vec<FieldError>,
}

/// Turns a PRD QC row table into template rows.
///
/// An engine holds only configuration. All per-table state (question blocks, turn
/// tables, the dialogue graph) lives inside a single call, so one engine can serve
/// many tables, including from several threads at once.
#[derive(Debug, Clone)]
pub struct TransformEngine {
    question_max_loop: u32,
    strict_fields: bool,
    validator: ImageLinkValidator,
}

pub struct TransformEngineBuilder {
    question_max_loop: u32,
    strict_fields: bool,
    validator: ImageLinkValidator,
}

impl Default for TransformEngineBuilder {
    fn default() -> Self {
        Self {
            question_max_loop: DEFAULT_QUESTION_MAX_LOOP,
            strict_fields: false,
            validator: ImageLinkValidator::default(),
        }
    }
}

impl TransformEngineBuilder {
    pub fn question_max_loop(mut self, max_loop: u32) -> Self {
        self.question_max_loop = max_loop;
        self
    }

    /// Refuse tables with any malformed field instead of treating those cells as absent.
    pub fn strict_fields(mut self, strict: bool) -> Self {
        self.strict_fields = strict;
        self
    }

    pub fn validator(mut self, validator: ImageLinkValidator) -> Self {
        self.validator = validator;
        self
    }

    pub fn build(self) -> TransformEngine {
        TransformEngine {
            question_max_loop: self.question_max_loop,
            strict_fields: self.strict_fields,
            validator: self.validator,
        }
    }
}

impl Default for TransformEngine {
    fn default() -> Self {
        TransformEngineBuilder::default().build()
    }
}

impl TransformEngine {
    pub fn builder() -> TransformEngineBuilder {
        TransformEngineBuilder::default()
    }

    /// Materializes the dialogue graph of `table` without serializing anything.
    pub fn build_graph(&self, table: &RowTable) -> DialogueGraph {
        let blocks = QuestionBlocks::scan(table);
        let turns = TurnLoopTable::analyze(table, &blocks);
        let graph = GraphBuilder::new(table, &blocks, &turns).build();
        debug!(
            questions = graph.questions.len(),
            responses = graph.responses.len(),
            edges = graph.edges().count(),
            "Built dialogue graph"
        );
        graph
    }

    /// Serializes a graph into template rows. No validation is applied.
    pub fn emit(&self, graph: &DialogueGraph) -> Result<Vec<OutputRow>, TransformError> {
        emit_rows(graph, self.question_max_loop)
    }

    /// Transforms `table` and validates the result.
    ///
    /// # Errors
    ///
    /// * [`TransformError::ImageLinks`] listing every image link violation.
    /// * [`TransformError::EmptyResult`] when the table yields no rows at all.
    pub fn transform(&self, table: &RowTable) -> Result<Vec<OutputRow>, TransformError> {
        let graph = self.build_graph(table);
        let rows = self.emit(&graph)?;

        let violations = self.validator.validate(&rows);
        if !violations.is_empty() {
            return Err(TransformError::ImageLinks(violations));
        }
        if rows.is_empty() {
            return Err(TransformError::EmptyResult);
        }

        info!(
            input_rows = table.len(),
            output_rows = rows.len(),
            "Transformation complete"
        );
        Ok(rows)
    }

    /// Transforms a loaded table, carrying its field errors along with the result.
    /// In strict mode any field error refuses the whole table.
    pub fn transform_loaded(&self, loaded: LoadedTable) -> Result<Transformation, TransformError> {
        if self.strict_fields && !loaded.field_errors.is_empty() {
            return Err(TransformError::MalformedFields(loaded.field_errors));
        }
        let rows = self.transform(&loaded.table)?;
        Ok(Transformation {
            rows,
            field_errors: loaded.field_errors,
        })
    }
}

/// Transforms `table` with the default configuration.
pub fn transform(table: &RowTable) -> Result<Vec<OutputRow>, TransformError> {
    TransformEngine::default().transform(table)
}
