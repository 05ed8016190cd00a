//! Skin attribute classifier.
//!
//! Maps raw detector scores plus subject gender and age to a [`SkinReport`].
//! Each attribute is a weighted sum of scores, clamped to `[0, 1]`, then
//! bucketed against fixed cut points. The function is pure and never fails:
//! missing or out-of-range inputs are clamped rather than rejected.

use skinsight_models::{
    AcneSeverity, BlackheadCount, DarkCircleSeverity, Moisture, PimpleCount, PoreVisibility,
    RawScoreEcho, RawSkinScores, SkinGrade, SkinReport, SkinTone, SubjectMeta,
};

/// Age at which the age factor saturates.
const AGE_SATURATION: f64 = 80.0;

/// Age factor used when the subject's age is unknown.
const NEUTRAL_AGE_FACTOR: f64 = 0.5;

/// Extra acne weight for male subjects.
const MALE_ACNE_OFFSET: f64 = 0.1;

/// Ascending cut points: an index below `ACNE_CUTS[i]` gets label `i`.
const ACNE_CUTS: [f64; 4] = [0.40, 0.60, 0.75, 0.85];
const PIMPLE_CUTS: [f64; 3] = [0.40, 0.65, 0.80];
const DARK_CIRCLE_CUTS: [f64; 3] = [0.35, 0.60, 0.80];
const BLACKHEAD_CUTS: [f64; 3] = [0.30, 0.55, 0.75];

/// Descending cut points: a combined score above `GRADE_CUTS[i]` gets grade `i`.
const GRADE_CUTS: [f64; 3] = [0.80, 0.65, 0.50];

/// Intermediate indices computed from one set of scores.
///
/// Exposed so callers and tests can see why a label was chosen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkinIndices {
    pub age_factor: f64,
    pub acne: f64,
    pub pimple: f64,
    pub dark_circle: f64,
    pub blackhead: f64,
    pub combined: f64,
}

impl SkinIndices {
    /// Compute every index from clamped scores.
    pub fn compute(scores: &RawSkinScores, subject: &SubjectMeta) -> Self {
        let s = scores.clamped();
        let age_factor = age_factor(subject.age);

        let mut acne_adjustment = (1.0 - age_factor) * 0.2;
        if subject.gender.is_male() {
            acne_adjustment += MALE_ACNE_OFFSET;
        }

        Self {
            age_factor,
            acne: clamp_unit(s.acne * 0.6 + (1.0 - s.health) * 0.2 + acne_adjustment),
            pimple: clamp_unit(s.acne * 0.5 + s.stain * 0.3 + (1.0 - s.clarity) * 0.2),
            dark_circle: clamp_unit(s.dark_circle * 0.8 + age_factor * 0.15),
            blackhead: clamp_unit(s.blackhead * 0.7 + (1.0 - s.clarity) * 0.3),
            combined: clamp_unit(
                s.health * 0.4 + s.clarity * 0.3 + (1.0 - s.acne) * 0.2 + (1.0 - s.stain) * 0.1,
            ),
        }
    }
}

/// Classify raw scores into a skin report.
pub fn classify(scores: &RawSkinScores, subject: &SubjectMeta) -> SkinReport {
    let s = scores.clamped();
    let idx = SkinIndices::compute(&s, subject);
    let grade = grade_for(idx.combined);

    SkinReport {
        acne: AcneSeverity::ALL[bucket(idx.acne, &ACNE_CUTS)],
        pimples: PimpleCount::ALL[bucket(idx.pimple, &PIMPLE_CUTS)],
        dark_circles: DarkCircleSeverity::ALL[bucket(idx.dark_circle, &DARK_CIRCLE_CUTS)],
        blackheads: BlackheadCount::ALL[bucket(idx.blackhead, &BLACKHEAD_CUTS)],
        skin_tone: skin_tone(&s),
        overall_condition: grade.condition(),
        skin_grade: grade,
        skin_moisture: moisture(s.health),
        pore_visibility: pore_visibility(s.clarity),
        analysis_confidence: confidence(&s),
        raw_scores: RawScoreEcho {
            acne_score: round_to(s.acne, 3),
            health_score: round_to(s.health, 3),
            clarity_score: round_to(s.clarity, 3),
            dark_circle_score: round_to(s.dark_circle, 3),
            blackhead_score: round_to(s.blackhead, 3),
            stain_score: round_to(s.stain, 3),
            combined_score: round_to(idx.combined, 3),
        },
    }
}

/// `min(age / 80, 1)`, or the neutral factor when the age is unknown (0).
pub fn age_factor(age: u32) -> f64 {
    if age == 0 {
        NEUTRAL_AGE_FACTOR
    } else {
        (f64::from(age) / AGE_SATURATION).min(1.0)
    }
}

/// Ordered rule cascade; the first matching rule wins.
fn skin_tone(s: &RawSkinScores) -> SkinTone {
    if s.health > 0.75 && s.clarity > 0.7 {
        SkinTone::Radiant
    } else if s.health > 0.6 && s.stain < 0.3 {
        SkinTone::Healthy
    } else if s.stain > 0.5 || s.clarity < 0.4 {
        SkinTone::Uneven
    } else if s.health < 0.4 {
        SkinTone::Dull
    } else {
        SkinTone::Normal
    }
}

fn grade_for(combined: f64) -> SkinGrade {
    match GRADE_CUTS.iter().position(|&cut| combined > cut) {
        Some(i) => SkinGrade::ALL[i],
        None => SkinGrade::D,
    }
}

fn moisture(health: f64) -> Moisture {
    if health > 0.75 {
        Moisture::High
    } else if health > 0.5 {
        Moisture::Medium
    } else {
        Moisture::Low
    }
}

fn pore_visibility(clarity: f64) -> PoreVisibility {
    if clarity > 0.75 {
        PoreVisibility::Minimal
    } else if clarity > 0.45 {
        PoreVisibility::Visible
    } else {
        PoreVisibility::Prominent
    }
}

/// Mean of four factors as a percentage. High acne and stain scores are
/// penalised as likely false positives.
fn confidence(s: &RawSkinScores) -> f64 {
    let factors = [
        s.health,
        s.clarity,
        1.0 - (s.acne * 2.0).min(1.0),
        1.0 - (s.stain * 1.5).min(1.0),
    ];
    let mean = factors.iter().sum::<f64>() / factors.len() as f64;
    round_to(mean * 100.0, 1).clamp(0.0, 100.0)
}

/// Index of the first cut point the value falls below, or `cuts.len()`.
fn bucket(value: f64, cuts: &[f64]) -> usize {
    cuts.iter().position(|&cut| value < cut).unwrap_or(cuts.len())
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
