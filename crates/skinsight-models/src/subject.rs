//! Detector inputs: raw skin scores and subject metadata.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Age assumed when the detector does not report one.
pub const DEFAULT_AGE: u32 = 25;

/// Raw skin attribute scores as reported by the detector.
///
/// Each score is nominally in `[0, 1]`. Missing fields deserialize to 0 and
/// out-of-range values are tolerated here; the classifier clamps them.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct RawSkinScores {
    pub acne: f64,
    pub dark_circle: f64,
    pub blackhead: f64,
    pub health: f64,
    pub stain: f64,
    pub clarity: f64,
}

impl RawSkinScores {
    /// Copy of the scores with every field clamped to `[0, 1]`.
    ///
    /// Non-finite values become 0.
    pub fn clamped(&self) -> Self {
        Self {
            acne: unit(self.acne),
            dark_circle: unit(self.dark_circle),
            blackhead: unit(self.blackhead),
            health: unit(self.health),
            stain: unit(self.stain),
            clarity: unit(self.clarity),
        }
    }
}

fn unit(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Subject gender as reported by the detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unknown,
}

impl Gender {
    /// Lenient conversion from a detector label. Unrecognised labels map to
    /// [`Gender::Unknown`].
    pub fn from_label(label: &str) -> Self {
        label.parse().unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Unknown => "Unknown",
        }
    }

    pub fn is_male(&self) -> bool {
        matches!(self, Gender::Male)
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Gender {
    type Err = GenderParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "unknown" | "" => Ok(Gender::Unknown),
            _ => Err(GenderParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown gender label: {0}")]
pub struct GenderParseError(String);

/// Who the scores belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SubjectMeta {
    pub gender: Gender,
    /// Estimated age in years. 0 means "not known".
    pub age: u32,
}

impl SubjectMeta {
    pub fn new(gender: Gender, age: u32) -> Self {
        Self { gender, age }
    }
}

impl Default for SubjectMeta {
    fn default() -> Self {
        Self {
            gender: Gender::Unknown,
            age: DEFAULT_AGE,
        }
    }
}
