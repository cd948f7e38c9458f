use super::row::OutputRow;
use itertools::Itertools;
use serde::Serialize;

/// Counts a front end shows next to a transformed table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TransformSummary {
    pub total_rows: usize,
    pub question_rows: usize,
    pub intent_rows: usize,
    /// Intent descriptions used by more than one intent row, in first-seen order.
    pub duplicate_descriptions: Vec<String>,
}

impl TransformSummary {
    pub fn from_rows(rows: &[OutputRow]) -> Self {
        let intent_rows: Vec<&OutputRow> = rows.iter().filter(|r| r.is_intent()).collect();
        Self {
            total_rows: rows.len(),
            question_rows: rows.iter().filter(|r| r.is_question()).count(),
            intent_rows: intent_rows.len(),
            duplicate_descriptions: intent_rows
                .iter()
                .filter_map(|r| r.intent_description.clone())
                .duplicates()
                .collect(),
        }
    }

    pub fn has_unique_descriptions(&self) -> bool {
        self.duplicate_descriptions.is_empty()
    }
}
