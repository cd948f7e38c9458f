use std::ops::Index;

/// The required input columns, in the order they appear in a PRD QC sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Section,
    Intent,
    Loop,
    TextVietnamese,
    Mood,
    ServoName,
    ServoDuration,
    Image,
    Audio,
    VoiceSpeed,
    Button,
    ImageListening,
    AudioListening,
    UserExamples,
}

impl Column {
    pub const ALL: [Column; 14] = [
        Column::Section,
        Column::Intent,
        Column::Loop,
        Column::TextVietnamese,
        Column::Mood,
        Column::ServoName,
        Column::ServoDuration,
        Column::Image,
        Column::Audio,
        Column::VoiceSpeed,
        Column::Button,
        Column::ImageListening,
        Column::AudioListening,
        Column::UserExamples,
    ];

    /// The exact, case-sensitive header name.
    pub fn name(self) -> &'static str {
        match self {
            Column::Section => "Section",
            Column::Intent => "Intent",
            Column::Loop => "Loop",
            Column::TextVietnamese => "Text_Vietnamese",
            Column::Mood => "Mood",
            Column::ServoName => "Servo_Name",
            Column::ServoDuration => "Servo_Duration",
            Column::Image => "Image",
            Column::Audio => "Audio",
            Column::VoiceSpeed => "Voice_Speed",
            Column::Button => "Button",
            Column::ImageListening => "Image_Listening",
            Column::AudioListening => "Audio_Listening",
            Column::UserExamples => "User_Examples",
        }
    }

    pub fn from_name(name: &str) -> Option<Column> {
        Column::ALL.into_iter().find(|c| c.name() == name)
    }
}

/// The section tag of an input row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section {
    Question,
    IntentResponse,
    /// Any other tag, including an absent one (stored as an empty string).
    Other(String),
}

impl Section {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("Question") => Section::Question,
            Some("Intent_Response") => Section::IntentResponse,
            Some(other) => Section::Other(other.to_string()),
            None => Section::Other(String::new()),
        }
    }

    pub fn is_question(&self) -> bool {
        matches!(self, Section::Question)
    }

    pub fn is_intent_response(&self) -> bool {
        matches!(self, Section::IntentResponse)
    }
}

impl Default for Section {
    fn default() -> Self {
        Section::Other(String::new())
    }
}

/// One row of a PRD QC table. `None` means the cell was absent (or malformed).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputRow {
    pub section: Section,
    pub intent: Option<String>,
    pub loop_count: Option<u32>,
    pub text: Option<String>,
    pub mood: Option<String>,
    pub servo_name: Option<String>,
    pub servo_duration: Option<f64>,
    pub image: Option<String>,
    pub audio: Option<String>,
    pub voice_speed: Option<f64>,
    pub button: Option<String>,
    pub image_listening: Option<String>,
    pub audio_listening: Option<String>,
    pub user_examples: Option<String>,
}

impl InputRow {
    /// A `Question` row carrying only its text.
    pub fn question(text: &str) -> Self {
        Self {
            section: Section::Question,
            text: Some(text.to_string()),
            ..Default::default()
        }
    }

    /// An `Intent_Response` row for `intent` at `loop_count`.
    pub fn response(intent: &str, loop_count: u32, text: &str) -> Self {
        Self {
            section: Section::IntentResponse,
            intent: Some(intent.to_string()),
            loop_count: Some(loop_count),
            text: Some(text.to_string()),
            ..Default::default()
        }
    }

    pub fn with_mood(mut self, mood: &str) -> Self {
        self.mood = Some(mood.to_string());
        self
    }

    pub fn with_servo(mut self, servo_name: &str, duration: Option<f64>) -> Self {
        self.servo_name = Some(servo_name.to_string());
        self.servo_duration = duration;
        self
    }

    pub fn with_image(mut self, image: &str) -> Self {
        self.image = Some(image.to_string());
        self
    }

    pub fn with_audio(mut self, audio: &str) -> Self {
        self.audio = Some(audio.to_string());
        self
    }

    pub fn with_voice_speed(mut self, speed: f64) -> Self {
        self.voice_speed = Some(speed);
        self
    }

    pub fn with_button(mut self, button: &str) -> Self {
        self.button = Some(button.to_string());
        self
    }

    pub fn with_listening(mut self, image: Option<&str>, audio: Option<&str>) -> Self {
        self.image_listening = image.map(str::to_string);
        self.audio_listening = audio.map(str::to_string);
        self
    }

    pub fn with_user_examples(mut self, examples: &str) -> Self {
        self.user_examples = Some(examples.to_string());
        self
    }

    /// The `(intent, loop)` pair, when both are present.
    pub fn intent_loop(&self) -> Option<(&str, u32)> {
        Some((self.intent.as_deref()?, self.loop_count?))
    }
}

/// The read-only, ordered table the engine walks. Row position is significant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowTable {
    rows: Vec<InputRow>,
}

impl RowTable {
    pub fn new(rows: Vec<InputRow>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[InputRow] {
        &self.rows
    }

    pub fn get(&self, index: usize) -> Option<&InputRow> {
        self.rows.get(index)
    }

    pub fn last_index(&self) -> Option<usize> {
        self.rows.len().checked_sub(1)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, InputRow> {
        self.rows.iter()
    }
}

impl Index<usize> for RowTable {
    type Output = InputRow;

    fn index(&self, index: usize) -> &InputRow {
        &self.rows[index]
    }
}

impl FromIterator<InputRow> for RowTable {
    fn from_iter<I: IntoIterator<Item = InputRow>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
