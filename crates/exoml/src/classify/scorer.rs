//! Fixed linear scoring of the three candidate classes.

use serde::{Deserialize, Serialize};

use super::features::{DerivedFeatures, near};
use super::probability::ClassLabel;

/// Unnormalized score per class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawScores {
    pub confirmed_planet: f64,
    pub false_positive: f64,
    pub candidate: f64,
}

impl RawScores {
    pub fn get(&self, label: ClassLabel) -> f64 {
        match label {
            ClassLabel::ConfirmedPlanet => self.confirmed_planet,
            ClassLabel::FalsePositive => self.false_positive,
            ClassLabel::Candidate => self.candidate,
        }
    }

    /// All scores offset by `k`.
    pub fn shifted(&self, k: f64) -> Self {
        Self {
            confirmed_planet: self.confirmed_planet + k,
            false_positive: self.false_positive + k,
            candidate: self.candidate + k,
        }
    }

    pub fn max(&self) -> f64 {
        self.confirmed_planet
            .max(self.false_positive)
            .max(self.candidate)
    }
}

/// Scores derived features with frozen hand-set weights.
///
/// The weights are not learned and must not be tuned: changing any of them
/// changes which label a given signal receives.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicScorer;

impl HeuristicScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, f: &DerivedFeatures) -> RawScores {
        let (ultra_short, ultra_long, moderate) = f.regime_weights();

        let confirmed_planet = 1.1 * f.depth_consistency
            + 0.9 * f.snr_norm
            + 0.5 * f.duty_good
            + 0.35 * moderate
            + 0.25 * f.depth_strength
            - 0.35 * ultra_short
            - 0.2 * ultra_long;

        let false_positive = 0.8 * (1.0 - f.snr_norm)
            + 0.55 * (1.0 - f.depth_consistency)
            + 0.35 * ultra_short
            + 0.3 * ultra_long
            - 0.25 * moderate;

        let atypical_duty = if f.duty_good < 0.35 { 1.0 } else { 0.0 };
        let candidate = 0.35
            + 0.45 * near(f.depth_strength, 0.4, 0.25)
            + 0.35 * near(f.snr_norm, 0.35, 0.25)
            + 0.25 * atypical_duty;

        RawScores {
            confirmed_planet,
            false_positive,
            candidate,
        }
    }
}
