//! Checks the image filenames embedded in produced utterance arrays.

use crate::error::{ImageLinkProblem, ImageLinkViolation};
use crate::output::{OutputRow, QUESTION, RESPONSE_1};
use itertools::Itertools;
use serde_json::Value;
use tracing::warn;

/// Rejects image filenames with spaces or without an allowed extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageLinkValidator {
    extensions: Vec<String>,
}

impl Default for ImageLinkValidator {
    fn default() -> Self {
        Self {
            extensions: vec![".jpg".to_string(), ".gif".to_string()],
        }
    }
}

impl ImageLinkValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also accept `extension` (case-insensitive, leading dot optional).
    pub fn with_extension(mut self, extension: &str) -> Self {
        let extension = format!(".{}", extension.trim_start_matches('.').to_lowercase());
        if !self.extensions.contains(&extension) {
            self.extensions.push(extension);
        }
        self
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Checks one filename. Empty names pass; spaces are reported before extensions.
    pub fn check_image(&self, image: &str) -> Option<ImageLinkProblem> {
        if image.is_empty() {
            return None;
        }
        if image.contains(' ') {
            return Some(ImageLinkProblem::ContainsSpaces);
        }
        let lowered = image.to_lowercase();
        if self.extensions.iter().any(|ext| lowered.ends_with(ext.as_str())) {
            None
        } else {
            Some(ImageLinkProblem::BadExtension {
                expected: self.extensions.iter().join(" or "),
            })
        }
    }

    /// Every violation across the `QUESTION` and `RESPONSE_1` cells of `rows`, in order.
    pub fn validate(&self, rows: &[OutputRow]) -> Vec<ImageLinkViolation> {
        let mut violations = Vec::new();
        for (index, row) in rows.iter().enumerate() {
            for (column, cell) in [(QUESTION, &row.question), (RESPONSE_1, &row.response_1)] {
                let Some(cell) = cell.as_deref().filter(|c| !c.is_empty()) else {
                    continue;
                };
                let items: Vec<Value> = match serde_json::from_str(cell) {
                    Ok(items) => items,
                    Err(e) => {
                        warn!(row = index + 1, column, "Skipping unparseable cell: {}", e);
                        continue;
                    }
                };
                for (item, object) in items.iter().enumerate() {
                    let image = object.get("image").and_then(Value::as_str).unwrap_or("");
                    if let Some(problem) = self.check_image(image) {
                        violations.push(ImageLinkViolation {
                            row: index + 1,
                            column,
                            item: item + 1,
                            image: image.to_string(),
                            problem,
                        });
                    }
                }
            }
        }
        violations
    }
}

/// Validates `rows` against the default `.jpg`/`.gif` rule.
pub fn validate_images(rows: &[OutputRow]) -> Vec<ImageLinkViolation> {
    ImageLinkValidator::default().validate(rows)
}
