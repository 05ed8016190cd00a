//! Image quality gate.
//!
//! Rejects uploads that are too small or too far from square for reliable
//! face analysis. The check is fail-open: an image that cannot be decoded is
//! let through with the error recorded, so a bug here never blocks analysis.

use std::io::Cursor;

use image::io::Reader as ImageReader;
use skinsight_models::QualityCheck;
use tracing::{debug, warn};

/// Minimum pixel count (VGA).
pub const MIN_PIXELS: u64 = 640 * 480;

/// Accepted width/height range.
pub const ASPECT_RANGE: (f64, f64) = (0.7, 1.3);

pub const ISSUE_LOW_RESOLUTION: &str = "Low resolution";
pub const ISSUE_POOR_ASPECT: &str = "Poor aspect ratio";

/// Capture tips returned with every inspected image.
pub const RECOMMENDATIONS: [&str; 5] = [
    "Use good lighting (natural light preferred)",
    "Ensure face is clearly visible and centered",
    "Avoid shadows and glare",
    "Use front camera with high resolution",
    "Keep neutral expression",
];

/// Check an encoded image.
pub fn check_quality(bytes: &[u8]) -> QualityCheck {
    match read_dimensions(bytes) {
        Ok((width, height)) => {
            let check = check_dimensions(width, height);
            debug!(
                resolution = %check.resolution,
                acceptable = check.is_acceptable,
                "Image quality checked"
            );
            check
        }
        Err(e) => {
            warn!(error = %e, "Image quality check failed, allowing image");
            QualityCheck::unchecked(e)
        }
    }
}

/// Apply the resolution and aspect rules to known dimensions.
pub fn check_dimensions(width: u32, height: u32) -> QualityCheck {
    let mut issues = Vec::new();

    if u64::from(width) * u64::from(height) < MIN_PIXELS {
        issues.push(ISSUE_LOW_RESOLUTION.to_string());
    }

    let aspect_ok = height > 0 && {
        let aspect = f64::from(width) / f64::from(height);
        (ASPECT_RANGE.0..=ASPECT_RANGE.1).contains(&aspect)
    };
    if !aspect_ok {
        issues.push(ISSUE_POOR_ASPECT.to_string());
    }

    QualityCheck {
        is_acceptable: issues.is_empty(),
        resolution: format!("{}x{}", width, height),
        issues,
        recommendations: RECOMMENDATIONS.iter().map(|s| s.to_string()).collect(),
        error: None,
    }
}

fn read_dimensions(bytes: &[u8]) -> Result<(u32, u32), String> {
    ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| format!("Failed to read image: {}", e))?
        .into_dimensions()
        .map_err(|e| format!("Failed to decode image: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageOutputFormat, RgbImage};

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::new(width, height));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageOutputFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_square_vga_is_acceptable() {
        let check = check_quality(&png(700, 700));
        assert!(check.is_acceptable);
        assert_eq!(check.resolution, "700x700");
        assert!(check.issues.is_empty());
        assert_eq!(check.recommendations.len(), 5);
        assert!(check.error.is_none());
    }

    #[test]
    fn test_low_resolution() {
        let check = check_quality(&png(300, 300));
        assert!(!check.is_acceptable);
        assert_eq!(check.issues, vec![ISSUE_LOW_RESOLUTION]);
    }

    #[test]
    fn test_poor_aspect_ratio() {
        let check = check_dimensions(1920, 1080);
        assert!(!check.is_acceptable);
        assert_eq!(check.issues, vec![ISSUE_POOR_ASPECT]);
    }

    #[test]
    fn test_both_issues() {
        let check = check_dimensions(400, 100);
        assert_eq!(check.issues, vec![ISSUE_LOW_RESOLUTION, ISSUE_POOR_ASPECT]);
    }

    #[test]
    fn test_aspect_bounds_inclusive() {
        assert!(check_dimensions(700, 1000).is_acceptable);
        assert!(check_dimensions(1300, 1000).is_acceptable);
        assert!(!check_dimensions(1310, 1000).is_acceptable);
    }

    #[test]
    fn test_zero_height() {
        let check = check_dimensions(640, 0);
        assert!(!check.is_acceptable);
        assert!(check.issues.contains(&ISSUE_POOR_ASPECT.to_string()));
    }

    #[test]
    fn test_garbage_fails_open() {
        let check = check_quality(b"definitely not an image");
        assert!(check.is_acceptable);
        assert_eq!(check.resolution, "unknown");
        assert!(check.error.is_some());
    }
}
