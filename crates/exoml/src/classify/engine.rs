//! End-to-end classification: validate, derive, score, normalize, explain.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::explanation::{Explanation, ExplanationGenerator};
use super::features::DerivedFeatures;
use super::input::{ClassificationInput, RawInputs};
use super::probability::{ClassLabel, ClassProbabilities, normalize};
use super::scorer::{HeuristicScorer, RawScores};
use crate::error::Result;

/// Outcome of classifying one signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub label: ClassLabel,
    /// Probability of `label`.
    pub confidence: f64,
    pub probabilities: ClassProbabilities,
    pub explanation: Explanation,
    pub features: DerivedFeatures,
    pub scores: RawScores,
}

/// Stateless heuristic classifier. Safe to share across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct Classifier {
    scorer: HeuristicScorer,
    explainer: ExplanationGenerator,
}

impl Classifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify a validated input. Invalid input yields no result at all.
    pub fn classify(&self, input: &ClassificationInput) -> Result<ClassificationResult> {
        input.validate()?;

        let features = DerivedFeatures::derive(input);
        let scores = self.scorer.score(&features);
        let probabilities = normalize(&scores);
        let (label, confidence) = probabilities.most_likely();
        let explanation = self.explainer.explain(&features, label);

        debug!(%label, confidence, ?scores, "signal classified");

        Ok(ClassificationResult {
            label,
            confidence,
            probabilities,
            explanation,
            features,
            scores,
        })
    }

    /// Parse string inputs and classify them.
    pub fn classify_raw(&self, raw: &RawInputs) -> Result<ClassificationResult> {
        let input = ClassificationInput::parse(raw)?;
        self.classify(&input)
    }
}
