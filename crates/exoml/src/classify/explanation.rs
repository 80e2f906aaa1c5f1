//! Rule-based justification of a predicted label.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::features::DerivedFeatures;
use super::probability::ClassLabel;

/// A justification bullet and the condition that selects it.
struct Rule {
    applies: fn(&DerivedFeatures) -> bool,
    text: &'static str,
}

const CONFIRMED_RULES: &[Rule] = &[
    Rule {
        applies: |f| f.depth_consistency > 0.55,
        text: "Transit depth matches the expected (Rp/Rs)^2 geometry.",
    },
    Rule {
        applies: |f| f.snr_norm > 0.5,
        text: "High SNR strengthens confidence in a real transit.",
    },
    Rule {
        applies: |f| f.duty_good > 0.5,
        text: "Transit duration relative to period (duty cycle) is physically plausible.",
    },
    Rule {
        applies: |f| f.regime.moderate,
        text: "Orbital period is within a well-observed range.",
    },
];
const CONFIRMED_FALLBACK: &str = "Overall feature balance matches typical confirmed exoplanets.";

const FALSE_POSITIVE_RULES: &[Rule] = &[
    Rule {
        applies: |f| f.snr_norm < 0.35,
        text: "Low SNR: signal likely dominated by noise or systematics.",
    },
    Rule {
        applies: |f| f.depth_consistency < 0.35,
        text: "Depth inconsistent with (Rp/Rs)^2 geometry for the given sizes.",
    },
    Rule {
        applies: |f| f.regime.ultra_short,
        text: "Ultra-short orbital period is prone to aliases or systematics.",
    },
    Rule {
        applies: |f| f.regime.ultra_long,
        text: "Very long period yields weak coverage and uncertain events.",
    },
];
const FALSE_POSITIVE_FALLBACK: &str = "Indicators lean toward spurious or non-planetary origins.";

const CANDIDATE_RULES: &[Rule] = &[
    Rule {
        applies: |f| f.depth_strength > 0.35 && f.snr_norm >= 0.35 && f.snr_norm < 0.65,
        text: "Intermediate depth and SNR lead to an ambiguous classification.",
    },
    Rule {
        applies: |f| f.duty_good < 0.45,
        text: "Transit duration vs. period is atypical.",
    },
];
const CANDIDATE_FALLBACK: &str = "Mixed indicators; features do not decisively favour one class.";

/// Bulleted explanation of a classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    pub bullets: Vec<String>,
    /// No rule fired and the generic sentence was used.
    pub fallback: bool,
}

impl fmt::Display for Explanation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Why this result?")?;
        for bullet in &self.bullets {
            write!(f, "\n\u{2022} {}", bullet)?;
        }
        Ok(())
    }
}

/// Picks justification bullets for the predicted label.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplanationGenerator;

impl ExplanationGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate the label's rules top to bottom, keeping every one that holds.
    pub fn explain(&self, features: &DerivedFeatures, label: ClassLabel) -> Explanation {
        let (rules, fallback) = match label {
            ClassLabel::ConfirmedPlanet => (CONFIRMED_RULES, CONFIRMED_FALLBACK),
            ClassLabel::FalsePositive => (FALSE_POSITIVE_RULES, FALSE_POSITIVE_FALLBACK),
            ClassLabel::Candidate => (CANDIDATE_RULES, CANDIDATE_FALLBACK),
        };

        let bullets: Vec<String> = rules
            .iter()
            .filter(|rule| (rule.applies)(features))
            .map(|rule| rule.text.to_string())
            .collect();

        if bullets.is_empty() {
            Explanation {
                bullets: vec![fallback.to_string()],
                fallback: true,
            }
        } else {
            Explanation {
                bullets,
                fallback: false,
            }
        }
    }
}
