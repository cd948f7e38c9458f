use serde::{Deserialize, Serialize};

pub const QUESTION: &str = "QUESTION";
pub const RESPONSE_1: &str = "RESPONSE_1";

/// The template columns, in their fixed output order.
pub const OUTPUT_COLUMNS: [&str; 18] = [
    QUESTION,
    "INTENT_NAME",
    "INTENT_DESCRIPTION",
    "BUTTON",
    "TRIGGER",
    "LOOP_COUNT",
    "MAX_LOOP",
    "LANGUAGE",
    "LLM_ANSWERING",
    "SCORE",
    RESPONSE_1,
    "IMAGE_LISTENING",
    "AUDIO_LISTENING",
    "PRONUNCIATION_CHECKER_TOOL",
    "GRAMMAR_CHECKER_TOOL",
    "LISTENING_ANIMATIONS",
    "REGEX_POSITIVE",
    "REGEX_NEGATIVE",
];

/// One template row. Either a question row (`question` set) or an intent row
/// (`response_1` set); columns the transformer never fills stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct OutputRow {
    pub question: Option<String>,
    pub intent_name: Option<String>,
    pub intent_description: Option<String>,
    pub button: Option<String>,
    pub trigger: Option<String>,
    pub loop_count: Option<u32>,
    pub max_loop: Option<u32>,
    pub language: Option<String>,
    pub llm_answering: Option<String>,
    pub score: Option<f64>,
    #[serde(rename = "RESPONSE_1")]
    pub response_1: Option<String>,
    pub image_listening: Option<String>,
    pub audio_listening: Option<String>,
    pub pronunciation_checker_tool: Option<String>,
    pub grammar_checker_tool: Option<String>,
    pub listening_animations: Option<String>,
    pub regex_positive: Option<String>,
    pub regex_negative: Option<String>,
}

impl OutputRow {
    pub fn is_question(&self) -> bool {
        self.question.is_some()
    }

    pub fn is_intent(&self) -> bool {
        self.intent_name.is_some()
    }

    /// The row's cells as display text, aligned with [`OUTPUT_COLUMNS`].
    pub fn cells(&self) -> [Option<String>; 18] {
        [
            self.question.clone(),
            self.intent_name.clone(),
            self.intent_description.clone(),
            self.button.clone(),
            self.trigger.clone(),
            self.loop_count.map(|v| v.to_string()),
            self.max_loop.map(|v| v.to_string()),
            self.language.clone(),
            self.llm_answering.clone(),
            self.score.map(|v| v.to_string()),
            self.response_1.clone(),
            self.image_listening.clone(),
            self.audio_listening.clone(),
            self.pronunciation_checker_tool.clone(),
            self.grammar_checker_tool.clone(),
            self.listening_animations.clone(),
            self.regex_positive.clone(),
            self.regex_negative.clone(),
        ]
    }

    /// Looks a cell up by its column name.
    pub fn cell(&self, column: &str) -> Option<String> {
        let position = OUTPUT_COLUMNS.iter().position(|c| *c == column)?;
        self.cells()[position].clone()
    }
}
