//! Weighted scoring of interview evaluations.

use serde::{Deserialize, Serialize};

/// Upper bound of every score axis.
pub const MAX_SCORE: f64 = 10.0;

/// Relative weight of each evaluation axis in the final score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub clarity: f64,
    pub technical_depth: f64,
    pub completeness: f64,
}

impl ScoreWeights {
    pub const STANDARD: ScoreWeights = ScoreWeights {
        clarity: 0.3,
        technical_depth: 0.4,
        completeness: 0.3,
    };
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Combine the three sub-scores into a final score in `[0, 10]`,
/// rounded to two decimals.
///
/// Sub-scores are not range-checked; a misbehaving model reporting values
/// above 10 still yields a final score of at most 10.
pub fn aggregate(clarity: f64, technical_depth: f64, completeness: f64) -> f64 {
    aggregate_with(ScoreWeights::STANDARD, clarity, technical_depth, completeness)
}

pub fn aggregate_with(
    weights: ScoreWeights,
    clarity: f64,
    technical_depth: f64,
    completeness: f64,
) -> f64 {
    let weighted = finite_or_zero(clarity) * weights.clarity
        + finite_or_zero(technical_depth) * weights.technical_depth
        + finite_or_zero(completeness) * weights.completeness;

    round2(weighted.clamp(0.0, MAX_SCORE))
}

/// Human-readable band for a final score
pub fn interpret(final_score: f64) -> &'static str {
    match final_score {
        s if s >= 9.0 => "Outstanding - Exceptional understanding and communication",
        s if s >= 8.0 => "Excellent - Strong technical knowledge and clarity",
        s if s >= 7.0 => "Good - Solid understanding with minor gaps",
        s if s >= 6.0 => "Satisfactory - Adequate knowledge, room for improvement",
        s if s >= 5.0 => "Fair - Basic understanding, needs more depth",
        _ => "Needs Improvement - Significant gaps in understanding",
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
