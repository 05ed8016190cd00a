//! API payloads for the skin analysis endpoint.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::quality::QualityCheck;
use crate::report::SkinReport;
use crate::subject::Gender;

/// A completed analysis, as returned to clients and stored in the cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AnalysisResult {
    #[serde(flatten)]
    pub report: SkinReport,
    pub gender: Gender,
    pub estimated_age: u32,
    /// Detector face confidence as a percentage, one decimal.
    pub face_confidence: f64,
    /// Unix time in seconds.
    pub timestamp: f64,
    /// Short prefix of the content hash, for log correlation.
    pub image_hash: String,
    /// 1-based attempt that produced this result.
    pub analysis_attempt: u32,
    /// Number of attempts that produced a usable result.
    #[serde(default)]
    pub analysis_attempts: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_quality: Option<QualityCheck>,
}

/// Returned instead of an analysis when the quality gate rejects an upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct QualityRejection {
    pub error: String,
    pub issues: Vec<String>,
    pub recommendations: Vec<String>,
    pub analysis_skipped: bool,
}

impl QualityRejection {
    pub fn from_check(check: QualityCheck) -> Self {
        Self {
            error: "Poor image quality detected".to_string(),
            issues: check.issues,
            recommendations: check.recommendations,
            analysis_skipped: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_from_check() {
        let check = QualityCheck {
            is_acceptable: false,
            resolution: "320x240".to_string(),
            issues: vec!["Low resolution".to_string()],
            recommendations: vec!["Avoid shadows and glare".to_string()],
            error: None,
        };

        let rejection = QualityRejection::from_check(check);
        assert!(rejection.analysis_skipped);
        assert_eq!(rejection.error, "Poor image quality detected");
        assert_eq!(rejection.issues, vec!["Low resolution"]);
        assert_eq!(rejection.recommendations.len(), 1);
    }
}
