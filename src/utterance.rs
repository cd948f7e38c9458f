//! The utterance object embedded in `QUESTION` and `RESPONSE_1` cells.

use crate::table::InputRow;
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Servo duration used when a row has a mood but no duration.
pub const DEFAULT_SERVO_DURATION: f64 = 2000.0;

/// Playback volume written into every utterance.
pub const DEFAULT_VOLUME: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodDescriptor {
    pub mood_name: String,
    pub servo_name: String,
    pub duration: f64,
}

/// Voice speed of an utterance. An unspecified speed serializes as `""`, never `null` or `0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum VoiceSpeed {
    #[default]
    Unspecified,
    Speed(f64),
}

impl From<Option<f64>> for VoiceSpeed {
    fn from(value: Option<f64>) -> Self {
        value.map_or(VoiceSpeed::Unspecified, VoiceSpeed::Speed)
    }
}

impl Serialize for VoiceSpeed {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            VoiceSpeed::Unspecified => serializer.serialize_str(""),
            VoiceSpeed::Speed(speed) => serializer.serialize_f64(*speed),
        }
    }
}

impl<'de> Deserialize<'de> for VoiceSpeed {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(speed) => Ok(VoiceSpeed::Speed(speed)),
            Raw::Text(text) if text.is_empty() => Ok(VoiceSpeed::Unspecified),
            Raw::Text(text) => Err(de::Error::custom(format!(
                "voice_speed must be a number or an empty string, found '{}'",
                text
            ))),
        }
    }
}

/// One spoken line with its presentation parameters. Field order is the wire order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Utterance {
    pub text: String,
    pub mood: String,
    pub image: String,
    pub video: String,
    pub moods: Vec<MoodDescriptor>,
    pub voice_speed: VoiceSpeed,
    pub text_viewer: String,
    pub volume: f64,
    pub audio: String,
    pub model: String,
}

impl Utterance {
    /// Builds the utterance for a single input row.
    pub fn from_row(row: &InputRow) -> Self {
        let moods = row
            .mood
            .as_deref()
            .filter(|mood| !mood.trim().is_empty())
            .map(|mood| MoodDescriptor {
                mood_name: mood.to_string(),
                servo_name: row.servo_name.clone().unwrap_or_default(),
                duration: row.servo_duration.unwrap_or(DEFAULT_SERVO_DURATION),
            })
            .into_iter()
            .collect();

        Self {
            text: row.text.clone().unwrap_or_default(),
            mood: row.mood.clone().unwrap_or_default(),
            image: row.image.clone().unwrap_or_default(),
            video: String::new(),
            moods,
            voice_speed: row.voice_speed.into(),
            text_viewer: String::new(),
            volume: DEFAULT_VOLUME,
            audio: row.audio.clone().unwrap_or_default(),
            model: String::new(),
        }
    }
}

/// Serializes utterances the way template cells hold them: pretty JSON, 2-space indent,
/// non-ASCII text left as is.
pub fn to_json_array(utterances: &[Utterance]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(utterances)
}

pub fn from_json_array(cell: &str) -> Result<Vec<Utterance>, serde_json::Error> {
    serde_json::from_str(cell)
}
