//! Skin analysis core.
//!
//! This crate provides:
//! - The skin attribute classifier (raw scores to a human-readable report)
//! - The image quality gate run before an upload is analysed

pub mod classifier;
pub mod quality;

pub use classifier::{age_factor, classify, round_to, SkinIndices};
pub use quality::{check_dimensions, check_quality};
