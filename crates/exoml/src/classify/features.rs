//! Physically motivated features derived from the raw measurements.

use serde::{Deserialize, Serialize};

use super::input::ClassificationInput;

/// Earth radius expressed in solar radii.
const EARTH_TO_SOLAR_RADIUS: f64 = 0.0091577;
/// Stellar radius floor when forming the radius ratio.
const MIN_STELLAR_RADIUS: f64 = 0.05;
/// Duty cycle the fitness score peaks at.
const TYPICAL_DUTY_CYCLE: f64 = 0.03;
/// Depth at which depth strength saturates.
const DEPTH_SATURATION: f64 = 0.02;
/// SNR at which normalized SNR saturates.
const SNR_SATURATION: f64 = 50.0;

/// Clamp to the unit interval.
pub fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

/// Triangular closeness of `x` to `center`, reaching zero at `width` away.
pub fn near(x: f64, center: f64, width: f64) -> f64 {
    clamp01(1.0 - (x - center).abs() / width)
}

/// Period regime indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodRegime {
    /// Period under half a day.
    pub ultra_short: bool,
    /// Period over 500 days.
    pub ultra_long: bool,
    /// Period strictly between 0.8 and 120 days.
    pub moderate: bool,
}

impl PeriodRegime {
    pub fn from_period(period: f64) -> Self {
        Self {
            ultra_short: period < 0.5,
            ultra_long: period > 500.0,
            moderate: period > 0.8 && period < 120.0,
        }
    }
}

/// Derived feature bundle, a pure function of a [`ClassificationInput`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedFeatures {
    /// Fraction of the orbit spent in transit.
    pub duty_cycle: f64,
    pub duty_good: f64,
    /// Planet-to-star radius ratio.
    pub radius_ratio: f64,
    /// Depth predicted by (Rp/Rs)^2.
    pub depth_expected: f64,
    pub depth_consistency: f64,
    pub depth_strength: f64,
    pub snr_norm: f64,
    pub regime: PeriodRegime,
}

impl DerivedFeatures {
    pub fn derive(input: &ClassificationInput) -> Self {
        let duration_days = input.duration / 24.0;
        let duty_cycle = if input.period > 0.0 {
            duration_days / input.period
        } else {
            0.0
        };
        let duty_good = near(duty_cycle, TYPICAL_DUTY_CYCLE, TYPICAL_DUTY_CYCLE);

        let radius_ratio =
            (input.radius * EARTH_TO_SOLAR_RADIUS) / input.stellar_radius.max(MIN_STELLAR_RADIUS);
        let depth_expected = clamp01(radius_ratio * radius_ratio);
        let depth_consistency = near(
            input.depth,
            depth_expected,
            (depth_expected * 0.6).max(0.001),
        );

        Self {
            duty_cycle,
            duty_good,
            radius_ratio,
            depth_expected,
            depth_consistency,
            depth_strength: clamp01(input.depth / DEPTH_SATURATION),
            snr_norm: clamp01(input.snr / SNR_SATURATION),
            regime: PeriodRegime::from_period(input.period),
        }
    }

    /// Regime flags as 0/1 weights: (ultra_short, ultra_long, moderate).
    pub fn regime_weights(&self) -> (f64, f64, f64) {
        (
            indicator(self.regime.ultra_short),
            indicator(self.regime.ultra_long),
            indicator(self.regime.moderate),
        )
    }
}

fn indicator(flag: bool) -> f64 {
    if flag { 1.0 } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_clamp_and_near() {
        assert_eq!(clamp01(-0.5), 0.0);
        assert_eq!(clamp01(1.5), 1.0);
        assert_eq!(near(0.4, 0.4, 0.25), 1.0);
        assert!((near(0.5, 0.35, 0.25) - 0.4).abs() < EPS);
        assert_eq!(near(1.0, 0.35, 0.25), 0.0);
    }

    #[test]
    fn test_reference_scenario() {
        let f = DerivedFeatures::derive(&ClassificationInput::new(3.5, 2.8, 0.008, 2.1, 25.0, 0.95));

        let ratio: f64 = 2.1 * 0.0091577 / 0.95;
        assert!((f.depth_expected - ratio * ratio).abs() < EPS);
        assert!((f.depth_expected - 0.000412).abs() < 1e-5);
        assert_eq!(f.depth_consistency, 0.0);
        assert!((f.depth_strength - 0.4).abs() < EPS);
        assert!((f.snr_norm - 0.5).abs() < EPS);
        assert!((f.duty_cycle - 2.8 / 24.0 / 3.5).abs() < EPS);
        assert!((f.duty_good - (1.0 - (f.duty_cycle - 0.03).abs() / 0.03)).abs() < EPS);
        assert!(f.regime.moderate);
        assert!(!f.regime.ultra_short && !f.regime.ultra_long);
    }

    #[test]
    fn test_depth_consistency_peaks_on_geometry() {
        let radius_ratio: f64 = 10.0 * 0.0091577;
        let depth = radius_ratio * radius_ratio;
        let f = DerivedFeatures::derive(&ClassificationInput::new(10.0, 3.0, depth, 10.0, 30.0, 1.0));
        assert!((f.depth_consistency - 1.0).abs() < EPS);
    }

    #[test]
    fn test_stellar_radius_floor() {
        let a = DerivedFeatures::derive(&ClassificationInput::new(10.0, 3.0, 0.01, 1.0, 30.0, 0.01));
        let b = DerivedFeatures::derive(&ClassificationInput::new(10.0, 3.0, 0.01, 1.0, 30.0, 0.05));
        assert_eq!(a.radius_ratio, b.radius_ratio);
    }

    #[test]
    fn test_zero_period_gives_zero_duty() {
        let f = DerivedFeatures::derive(&ClassificationInput::new(0.0, 3.0, 0.01, 1.0, 30.0, 1.0));
        assert_eq!(f.duty_cycle, 0.0);
        assert!(f.regime.ultra_short);
    }

    #[test]
    fn test_period_regimes() {
        assert!(PeriodRegime::from_period(0.3).ultra_short);
        assert!(!PeriodRegime::from_period(0.8).moderate);
        assert!(PeriodRegime::from_period(0.81).moderate);
        assert!(!PeriodRegime::from_period(120.0).moderate);
        assert!(!PeriodRegime::from_period(500.0).ultra_long);
        assert!(PeriodRegime::from_period(500.5).ultra_long);
    }
}
