use thiserror::Error;

/// Reasons a client-reported performance is rejected before it is stored.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PerformanceError {
    #[error("wpm must be a non-negative number")]
    InvalidWpm,
    #[error("accuracy must be between 0 and 1")]
    InvalidAccuracy,
    #[error("wpm is too large to score")]
    ScoreOutOfRange,
}

pub struct ScoringEngine;

impl ScoringEngine {
    /// Point value of a run: floor(wpm × accuracy × 100).
    ///
    /// Callers run [`ScoringEngine::validate`] first so the product fits in an `i32`.
    pub fn points_for(wpm: f64, accuracy: f64) -> i32 {
        (wpm * accuracy * 100.0).floor() as i32
    }

    pub fn validate(wpm: f64, accuracy: f64) -> Result<(), PerformanceError> {
        if !wpm.is_finite() || wpm < 0.0 {
            return Err(PerformanceError::InvalidWpm);
        }
        if !accuracy.is_finite() || !(0.0..=1.0).contains(&accuracy) {
            return Err(PerformanceError::InvalidAccuracy);
        }
        if (wpm * accuracy * 100.0).floor() > f64::from(i32::MAX) {
            return Err(PerformanceError::ScoreOutOfRange);
        }
        Ok(())
    }

    /// Accuracy fraction expressed as a percentage with one decimal place.
    pub fn accuracy_percent(accuracy: f64) -> f64 {
        round_one_decimal(accuracy * 100.0)
    }
}

pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
