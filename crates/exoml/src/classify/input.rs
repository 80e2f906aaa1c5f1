//! The six physical measurements a classification request carries.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ExomlError, InputViolation, Result, ViolationKind};

/// Inclusive range a measurement must fall in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputRange {
    pub min: f64,
    pub max: f64,
}

impl InputRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// One of the six classification measurements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputField {
    Period,
    Duration,
    Depth,
    Radius,
    Snr,
    StellarRadius,
}

impl InputField {
    pub const ALL: [InputField; 6] = [
        InputField::Period,
        InputField::Duration,
        InputField::Depth,
        InputField::Radius,
        InputField::Snr,
        InputField::StellarRadius,
    ];

    /// Display label including the unit.
    pub fn label(&self) -> &'static str {
        match self {
            InputField::Period => "Orbital Period (days)",
            InputField::Duration => "Transit Duration (hours)",
            InputField::Depth => "Transit Depth (fraction)",
            InputField::Radius => "Planet Radius (Earth radii)",
            InputField::Snr => "Signal-to-Noise Ratio (SNR)",
            InputField::StellarRadius => "Stellar Radius (solar radii)",
        }
    }

    /// Accepted range.
    pub fn range(&self) -> InputRange {
        match self {
            InputField::Period => InputRange::new(0.05, 2000.0),
            InputField::Duration => InputRange::new(0.2, 40.0),
            InputField::Depth => InputRange::new(0.00001, 0.1),
            InputField::Radius => InputRange::new(0.2, 30.0),
            InputField::Snr => InputRange::new(0.0, 100.0),
            InputField::StellarRadius => InputRange::new(0.05, 20.0),
        }
    }

    fn check(&self, value: f64) -> Option<ViolationKind> {
        if !value.is_finite() {
            return Some(ViolationKind::NotNumeric {
                raw: value.to_string(),
            });
        }
        let range = self.range();
        if range.contains(value) {
            None
        } else {
            Some(ViolationKind::OutOfRange {
                value,
                min: range.min,
                max: range.max,
            })
        }
    }
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Measurements in string form, as typed into a form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawInputs {
    pub period: String,
    pub duration: String,
    pub depth: String,
    pub radius: String,
    pub snr: String,
    pub stellar_radius: String,
}

impl RawInputs {
    /// Text entered for one field.
    pub fn get(&self, field: InputField) -> &str {
        match field {
            InputField::Period => &self.period,
            InputField::Duration => &self.duration,
            InputField::Depth => &self.depth,
            InputField::Radius => &self.radius,
            InputField::Snr => &self.snr,
            InputField::StellarRadius => &self.stellar_radius,
        }
    }
}

/// Measurements of a transit-like signal.
///
/// Construction does not validate; [`ClassificationInput::validate`] does,
/// and the classifier refuses anything that fails it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationInput {
    /// Orbital period in days.
    pub period: f64,
    /// Transit duration in hours.
    pub duration: f64,
    /// Transit depth as a fraction of stellar flux.
    pub depth: f64,
    /// Planet radius in Earth radii.
    pub radius: f64,
    pub snr: f64,
    /// Stellar radius in solar radii.
    pub stellar_radius: f64,
}

impl ClassificationInput {
    pub fn new(
        period: f64,
        duration: f64,
        depth: f64,
        radius: f64,
        snr: f64,
        stellar_radius: f64,
    ) -> Self {
        Self {
            period,
            duration,
            depth,
            radius,
            snr,
            stellar_radius,
        }
    }

    /// Value of one measurement.
    pub fn get(&self, field: InputField) -> f64 {
        match field {
            InputField::Period => self.period,
            InputField::Duration => self.duration,
            InputField::Depth => self.depth,
            InputField::Radius => self.radius,
            InputField::Snr => self.snr,
            InputField::StellarRadius => self.stellar_radius,
        }
    }

    /// Every violation, in field order. Empty when the input is valid.
    pub fn violations(&self) -> Vec<InputViolation> {
        InputField::ALL
            .into_iter()
            .filter_map(|field| {
                field
                    .check(self.get(field))
                    .map(|kind| InputViolation { field, kind })
            })
            .collect()
    }

    /// Whether every value is finite and within range.
    pub fn is_valid(&self) -> bool {
        self.violations().is_empty()
    }

    /// Check every value, reporting all violations at once.
    pub fn validate(&self) -> Result<()> {
        let violations = self.violations();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(ExomlError::InvalidClassificationInput { violations })
        }
    }

    /// Parse and validate string inputs; any bad field rejects the whole request.
    pub fn parse(raw: &RawInputs) -> Result<Self> {
        let mut values = [0.0; 6];
        let mut violations = Vec::new();

        for (slot, field) in values.iter_mut().zip(InputField::ALL) {
            let text = raw.get(field).trim();
            if text.is_empty() {
                violations.push(InputViolation {
                    field,
                    kind: ViolationKind::Missing,
                });
                continue;
            }

            match text.parse::<f64>() {
                Ok(value) if value.is_finite() => match field.check(value) {
                    Some(kind) => violations.push(InputViolation { field, kind }),
                    None => *slot = value,
                },
                _ => violations.push(InputViolation {
                    field,
                    kind: ViolationKind::NotNumeric {
                        raw: text.to_string(),
                    },
                }),
            }
        }

        if !violations.is_empty() {
            return Err(ExomlError::InvalidClassificationInput { violations });
        }

        let [period, duration, depth, radius, snr, stellar_radius] = values;
        Ok(Self::new(period, duration, depth, radius, snr, stellar_radius))
    }
}
