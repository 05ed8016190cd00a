//! Skin report produced by the classifier.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::labels::{
    AcneSeverity, BlackheadCount, DarkCircleSeverity, Moisture, OverallCondition, PimpleCount,
    PoreVisibility, SkinGrade, SkinTone,
};

/// The scores a report was derived from, clamped and rounded to 3 decimals.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct RawScoreEcho {
    pub acne_score: f64,
    pub health_score: f64,
    pub clarity_score: f64,
    pub dark_circle_score: f64,
    pub blackhead_score: f64,
    pub stain_score: f64,
    pub combined_score: f64,
}

/// Human-readable skin report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SkinReport {
    pub acne: AcneSeverity,
    pub pimples: PimpleCount,
    pub dark_circles: DarkCircleSeverity,
    pub blackheads: BlackheadCount,
    pub skin_tone: SkinTone,
    pub overall_condition: OverallCondition,
    pub skin_grade: SkinGrade,
    pub skin_moisture: Moisture,
    pub pore_visibility: PoreVisibility,
    /// Percentage in `[0, 100]`, one decimal.
    pub analysis_confidence: f64,
    pub raw_scores: RawScoreEcho,
}
