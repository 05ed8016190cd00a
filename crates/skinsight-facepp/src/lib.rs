//! Client for the Face++ face detection API.
//!
//! This crate provides:
//! - A multipart client for the `detect` endpoint with skin attributes
//! - The [`FaceDetector`] trait the API server depends on, so the remote
//!   service can be swapped for a stub in tests
//! - Typed wire responses with lenient defaults

pub mod client;
pub mod error;
pub mod types;

pub use client::{FaceDetector, FaceppClient, FaceppConfig, DEFAULT_DETECT_URL};
pub use error::{FaceppError, FaceppResult, CONCURRENCY_LIMIT_EXCEEDED};
pub use types::{DetectResponse, Face, FaceAttributes, FaceRectangle, ValueAttr};
