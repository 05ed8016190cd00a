//! Face++ HTTP client.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use tracing::{debug, warn};

use crate::error::{FaceppError, FaceppResult};
use crate::types::{DetectResponse, RETURN_ATTRIBUTES};

/// Face++ US region detect endpoint.
pub const DEFAULT_DETECT_URL: &str = "https://api-us.faceplusplus.com/facepp/v3/detect";

/// Something that can find faces and skin attributes in an image.
#[async_trait]
pub trait FaceDetector: Send + Sync {
    /// Detect faces in an encoded image.
    ///
    /// An image without faces is a successful, empty response.
    async fn detect(&self, image: &[u8]) -> FaceppResult<DetectResponse>;
}

/// Configuration for the Face++ client.
#[derive(Debug, Clone)]
pub struct FaceppConfig {
    /// Full URL of the detect endpoint
    pub detect_url: String,
    pub api_key: String,
    pub api_secret: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for FaceppConfig {
    fn default() -> Self {
        Self {
            detect_url: DEFAULT_DETECT_URL.to_string(),
            api_key: String::new(),
            api_secret: String::new(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl FaceppConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            detect_url: std::env::var("FACEPP_API_URL")
                .unwrap_or_else(|_| DEFAULT_DETECT_URL.to_string()),
            api_key: std::env::var("FACEPP_API_KEY").unwrap_or_default(),
            api_secret: std::env::var("FACEPP_API_SECRET").unwrap_or_default(),
            timeout: Duration::from_secs(
                std::env::var("FACEPP_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
            ),
        }
    }
}

/// Client for the Face++ detect API.
pub struct FaceppClient {
    http: Client,
    config: FaceppConfig,
}

impl FaceppClient {
    /// Create a new client. Credentials must be present.
    pub fn new(config: FaceppConfig) -> FaceppResult<Self> {
        if config.api_key.is_empty() || config.api_secret.is_empty() {
            return Err(FaceppError::Config(
                "FACEPP_API_KEY and FACEPP_API_SECRET must be set".to_string(),
            ));
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(FaceppError::Network)?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> FaceppResult<Self> {
        Self::new(FaceppConfig::from_env())
    }

    pub fn config(&self) -> &FaceppConfig {
        &self.config
    }

    fn form(&self, image: &[u8]) -> Form {
        Form::new()
            .text("api_key", self.config.api_key.clone())
            .text("api_secret", self.config.api_secret.clone())
            .text("return_attributes", RETURN_ATTRIBUTES)
            .part(
                "image_file",
                Part::bytes(image.to_vec()).file_name("image.jpg"),
            )
    }

    fn map_send_error(&self, e: reqwest::Error) -> FaceppError {
        if e.is_timeout() {
            FaceppError::Timeout(self.config.timeout.as_secs())
        } else {
            FaceppError::Network(e)
        }
    }
}

#[async_trait]
impl FaceDetector for FaceppClient {
    async fn detect(&self, image: &[u8]) -> FaceppResult<DetectResponse> {
        debug!(bytes = image.len(), "Sending detect request to Face++");
        let start = Instant::now();

        let response = self
            .http
            .post(&self.config.detect_url)
            .multipart(self.form(image))
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.map_send_error(e))?;

        if !status.is_success() {
            // Face++ reports failures as {"error_message": "..."}
            let message = serde_json::from_str::<DetectResponse>(&body)
                .ok()
                .and_then(|r| r.error_message)
                .unwrap_or(body);
            warn!(status = status.as_u16(), error = %message, "Face++ detect failed");
            return Err(FaceppError::from_http_status(status.as_u16(), message));
        }

        let detect: DetectResponse = serde_json::from_str(&body)
            .map_err(|e| FaceppError::InvalidResponse(format!("{}: {}", e, body)))?;

        debug!(
            faces = detect.faces.len(),
            latency_ms = start.elapsed().as_millis() as u64,
            "Face++ detect completed"
        );

        Ok(detect)
    }
}
