//! Shared data models for the SkinSight backend.
//!
//! This crate provides Serde-serializable types for:
//! - Raw skin attribute scores and subject metadata from the detector
//! - Severity labels and the skin report produced by the classifier
//! - Image quality gate results
//! - The analysis payloads returned by the API

pub mod analysis;
pub mod labels;
pub mod quality;
pub mod report;
pub mod subject;

// Re-export common types
pub use analysis::{AnalysisResult, QualityRejection};
pub use labels::{
    AcneSeverity, BlackheadCount, DarkCircleSeverity, Moisture, OverallCondition, PimpleCount,
    PoreVisibility, SkinGrade, SkinTone,
};
pub use quality::QualityCheck;
pub use report::{RawScoreEcho, SkinReport};
pub use subject::{Gender, GenderParseError, RawSkinScores, SubjectMeta, DEFAULT_AGE};
