//! Application state.

use std::sync::Arc;

use skinsight_facepp::{FaceDetector, FaceppClient};

use crate::config::ApiConfig;
use crate::error::ApiResult;
use crate::services::{ReportCache, RetryPolicy, SkinAnalyzer};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub cache: Arc<ReportCache>,
    pub analyzer: Arc<SkinAnalyzer>,
}

impl AppState {
    /// Create application state backed by the Face++ API.
    pub fn new(config: ApiConfig) -> ApiResult<Self> {
        let detector = FaceppClient::from_env()?;
        Ok(Self::with_detector(config, Arc::new(detector)))
    }

    /// Create application state with an explicit detector.
    pub fn with_detector(config: ApiConfig, detector: Arc<dyn FaceDetector>) -> Self {
        let cache = Arc::new(ReportCache::new(config.cache_capacity));
        let analyzer = SkinAnalyzer::new(
            detector,
            Arc::clone(&cache),
            RetryPolicy::new(config.analysis_attempts),
        );

        Self {
            config,
            cache,
            analyzer: Arc::new(analyzer),
        }
    }
}
