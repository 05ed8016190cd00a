//! Skin analysis orchestration.
//!
//! Quality gate, cache lookup, detector attempts, best-result selection and
//! caching, in that order.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use serde::Serialize;
use skinsight_analysis::{check_quality, classify, round_to};
use skinsight_facepp::FaceDetector;
use skinsight_models::{AnalysisResult, QualityRejection};
use tracing::{debug, info};

use crate::error::{ApiError, ApiResult};
use crate::metrics;
use crate::services::cache::{content_hash, ReportCache};
use crate::services::retry::{AttemptFailure, AttemptOutcome, RetryPolicy};

/// Length of the hash prefix echoed in results.
const HASH_PREFIX_LEN: usize = 16;

/// What an upload produced.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum AnalyzeOutcome {
    Analyzed(Box<AnalysisResult>),
    Rejected(QualityRejection),
}

/// Runs uploads through the quality gate, the detector and the classifier.
pub struct SkinAnalyzer {
    detector: Arc<dyn FaceDetector>,
    cache: Arc<ReportCache>,
    policy: RetryPolicy,
}

impl SkinAnalyzer {
    pub fn new(detector: Arc<dyn FaceDetector>, cache: Arc<ReportCache>, policy: RetryPolicy) -> Self {
        Self {
            detector,
            cache,
            policy,
        }
    }

    /// Analyze an uploaded image.
    pub async fn analyze(&self, image: &[u8]) -> ApiResult<AnalyzeOutcome> {
        let quality = check_quality(image);
        if !quality.is_acceptable {
            info!(issues = ?quality.issues, "Image rejected by quality gate");
            metrics::record_analysis("rejected");
            return Ok(AnalyzeOutcome::Rejected(QualityRejection::from_check(quality)));
        }

        let hash = content_hash(image);

        if let Some(cached) = self.cache.get(&hash).await {
            info!(image_hash = %&hash[..HASH_PREFIX_LEN], "Returning cached result for same image");
            metrics::record_cache_lookup(true);
            metrics::record_analysis("cached");
            return Ok(AnalyzeOutcome::Analyzed(Box::new(cached)));
        }
        metrics::record_cache_lookup(false);

        info!(image_hash = %&hash[..HASH_PREFIX_LEN], resolution = %quality.resolution, "Analyzing new image");

        let hash_ref = hash.as_str();
        let successes = match self
            .policy
            .run(move |attempt| self.attempt(image, hash_ref, attempt))
            .await
        {
            Ok(successes) => successes,
            Err(failure) => {
                metrics::record_analysis(failure.as_str());
                return Err(failure.into_api_error());
            }
        };

        let successful_attempts = successes.len() as u32;
        let mut best = select_best(successes)
            .ok_or_else(|| ApiError::internal("All analysis attempts failed"))?;
        best.analysis_attempts = successful_attempts;
        best.image_quality = Some(quality);

        let evicted = self.cache.insert(hash, best.clone()).await;
        if !evicted.is_empty() {
            debug!(evicted = evicted.len(), "Result cache at capacity");
        }
        metrics::set_cache_size(self.cache.len().await);
        metrics::record_analysis("analyzed");

        info!(
            grade = %best.report.skin_grade,
            condition = %best.report.overall_condition,
            confidence = best.report.analysis_confidence,
            attempt = best.analysis_attempt,
            "Final analysis result"
        );

        Ok(AnalyzeOutcome::Analyzed(Box::new(best)))
    }

    /// One detector call plus classification.
    async fn attempt(&self, image: &[u8], hash: &str, attempt: u32) -> AttemptOutcome<AnalysisResult> {
        let start = Instant::now();
        let result = self.detector.detect(image).await;
        let elapsed = start.elapsed().as_secs_f64();

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                let failure = AttemptFailure::from(&e);
                debug!(attempt, error = %e, "Detector call failed");
                metrics::record_detector_attempt(failure.as_str(), elapsed);
                return AttemptOutcome::Failure(failure);
            }
        };

        let Some(face) = response.primary_face() else {
            metrics::record_detector_attempt(AttemptFailure::NoFace.as_str(), elapsed);
            return AttemptOutcome::Failure(AttemptFailure::NoFace);
        };
        metrics::record_detector_attempt("face", elapsed);

        let subject = face.subject();
        let scores = face.skin_scores();
        info!(attempt, gender = %subject.gender, age = subject.age, "Face detected");
        debug!(?scores, "Raw skin scores");

        AttemptOutcome::Success(AnalysisResult {
            report: classify(&scores, &subject),
            gender: subject.gender,
            estimated_age: subject.age,
            face_confidence: round_to(face.confidence() * 100.0, 1),
            timestamp: unix_now(),
            image_hash: hash.chars().take(HASH_PREFIX_LEN).collect(),
            analysis_attempt: attempt,
            analysis_attempts: 0,
            image_quality: None,
        })
    }
}

/// Highest confidence wins; the earliest attempt wins ties.
fn select_best(results: Vec<AnalysisResult>) -> Option<AnalysisResult> {
    results.into_iter().reduce(|best, candidate| {
        if candidate.report.analysis_confidence > best.report.analysis_confidence {
            candidate
        } else {
            best
        }
    })
}

fn unix_now() -> f64 {
    Utc::now().timestamp_millis() as f64 / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use skinsight_models::{Gender, RawSkinScores, SubjectMeta};

    fn result(attempt: u32, health: f64) -> AnalysisResult {
        let scores = RawSkinScores {
            health,
            clarity: 0.5,
            ..Default::default()
        };
        AnalysisResult {
            report: classify(&scores, &SubjectMeta::default()),
            gender: Gender::Unknown,
            estimated_age: 25,
            face_confidence: 99.0,
            timestamp: 0.0,
            image_hash: "abc".to_string(),
            analysis_attempt: attempt,
            analysis_attempts: 0,
            image_quality: None,
        }
    }

    #[test]
    fn test_select_best_highest_confidence() {
        let best = select_best(vec![result(1, 0.2), result(2, 0.9)]).unwrap();
        assert_eq!(best.analysis_attempt, 2);
    }

    #[test]
    fn test_select_best_first_wins_ties() {
        let best = select_best(vec![result(1, 0.5), result(2, 0.5)]).unwrap();
        assert_eq!(best.analysis_attempt, 1);
    }

    #[test]
    fn test_select_best_empty() {
        assert!(select_best(Vec::new()).is_none());
    }

    #[test]
    fn test_rejected_serializes_flat() {
        let outcome = AnalyzeOutcome::Rejected(QualityRejection {
            error: "Poor image quality detected".to_string(),
            issues: vec!["Low resolution".to_string()],
            recommendations: vec![],
            analysis_skipped: true,
        });
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["analysis_skipped"], true);
        assert_eq!(json["issues"][0], "Low resolution");
    }

    #[test]
    fn test_analyzed_serializes_report_fields_at_top_level() {
        let outcome = AnalyzeOutcome::Analyzed(Box::new(result(1, 0.9)));
        let json = serde_json::to_value(&outcome).unwrap();
        assert!(json.get("skin_grade").is_some());
        assert!(json.get("raw_scores").is_some());
        assert_eq!(json["analysis_attempt"], 1);
        assert_eq!(json["gender"], "Unknown");
    }
}
