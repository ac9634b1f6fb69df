//! Mood filter sent alongside a recommendation query.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of tones the recommendation service understands.
///
/// `Any` is the empty selection and goes over the wire as `""`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    #[serde(rename = "")]
    Any,
    Happy,
    Sad,
    Angry,
    Surprising,
    Suspenseful,
}

/// Returned by the strict parser for values outside the enum
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tone '{0}' (expected one of: happy, sad, angry, surprising, suspenseful)")]
pub struct ToneParseError(pub String);

impl Tone {
    /// All tones in the order the selector shows them
    pub fn all() -> &'static [Tone] {
        &[
            Tone::Any,
            Tone::Happy,
            Tone::Sad,
            Tone::Angry,
            Tone::Surprising,
            Tone::Suspenseful,
        ]
    }

    /// Wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Any => "",
            Tone::Happy => "happy",
            Tone::Sad => "sad",
            Tone::Angry => "angry",
            Tone::Surprising => "surprising",
            Tone::Suspenseful => "suspenseful",
        }
    }

    /// Label for the tone selector
    pub fn label(&self) -> &'static str {
        match self {
            Tone::Any => "Select Emotion",
            Tone::Happy => "Happy",
            Tone::Sad => "Sad",
            Tone::Angry => "Angry",
            Tone::Surprising => "Surprise",
            Tone::Suspenseful => "Suspenseful",
        }
    }

    /// Lenient conversion used by free-text inputs.
    ///
    /// Anything outside the enum collapses to `Tone::Any`.
    pub fn coerce(value: &str) -> Tone {
        match value.parse() {
            Ok(tone) => tone,
            Err(ToneParseError(raw)) => {
                tracing::warn!("Ignoring unknown tone '{}', using no tone filter", raw);
                Tone::Any
            }
        }
    }
}

impl FromStr for Tone {
    type Err = ToneParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Tone::all()
            .iter()
            .copied()
            .find(|tone| tone.as_str() == normalized)
            .ok_or_else(|| ToneParseError(s.to_string()))
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tone::Any => f.write_str("any"),
            other => f.write_str(other.as_str()),
        }
    }
}
