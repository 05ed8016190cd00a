//! Image quality gate result.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Outcome of checking an upload before it is sent for analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct QualityCheck {
    pub is_acceptable: bool,
    /// `"{width}x{height}"`, or `"unknown"` when the image could not be read.
    pub resolution: String,
    pub issues: Vec<String>,
    pub recommendations: Vec<String>,
    /// Set when the check itself failed and the image was let through.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl QualityCheck {
    /// A passing check for an image that could not be inspected.
    pub fn unchecked(error: impl Into<String>) -> Self {
        Self {
            is_acceptable: true,
            resolution: "unknown".to_string(),
            issues: Vec::new(),
            recommendations: Vec::new(),
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unchecked_is_acceptable() {
        let check = QualityCheck::unchecked("decode failed");
        assert!(check.is_acceptable);
        assert!(check.issues.is_empty());
        assert_eq!(check.error.as_deref(), Some("decode failed"));
    }

    #[test]
    fn test_error_omitted_when_absent() {
        let check = QualityCheck {
            is_acceptable: true,
            resolution: "800x800".to_string(),
            issues: vec![],
            recommendations: vec![],
            error: None,
        };
        let json = serde_json::to_value(&check).unwrap();
        assert!(json.get("error").is_none());
        assert_eq!(json["resolution"], "800x800");
    }
}
