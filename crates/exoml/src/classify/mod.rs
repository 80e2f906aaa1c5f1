//! Heuristic transit-signal classification.

mod engine;
mod explanation;
mod features;
mod input;
mod probability;
mod scorer;

pub use engine::{ClassificationResult, Classifier};
pub use explanation::{Explanation, ExplanationGenerator};
pub use features::{DerivedFeatures, PeriodRegime, clamp01, near};
pub use input::{ClassificationInput, InputField, InputRange, RawInputs};
pub use probability::{ClassLabel, ClassProbabilities, normalize};
pub use scorer::{HeuristicScorer, RawScores};
