//! Human-readable classification report.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::classify::{
    ClassLabel, ClassProbabilities, ClassificationInput, ClassificationResult, Explanation,
    InputField,
};
use crate::error::Result;

/// One measurement as shown in a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportInput {
    pub field: InputField,
    pub label: String,
    pub value: f64,
}

/// A classification and the inputs it was made from, ready to display or save.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationReport {
    pub generated_at: DateTime<Utc>,
    pub inputs: Vec<ReportInput>,
    pub prediction: ClassLabel,
    pub confidence: f64,
    pub probabilities: ClassProbabilities,
    pub explanation: Explanation,
}

impl ClassificationReport {
    pub fn new(input: &ClassificationInput, result: &ClassificationResult) -> Self {
        let inputs = InputField::ALL
            .into_iter()
            .map(|field| ReportInput {
                field,
                label: field.label().to_string(),
                value: input.get(field),
            })
            .collect();

        Self {
            generated_at: Utc::now(),
            inputs,
            prediction: result.label,
            confidence: result.confidence,
            probabilities: result.probabilities.clone(),
            explanation: result.explanation.clone(),
        }
    }

    /// Plain-text rendering.
    pub fn render_text(&self) -> String {
        self.to_string()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ExoML - Classification Report")?;
        writeln!(
            f,
            "Generated: {}",
            self.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(f)?;

        writeln!(f, "Inputs")?;
        for input in &self.inputs {
            writeln!(f, "  \u{2022} {}: {}", input.label, input.value)?;
        }
        writeln!(f)?;

        writeln!(f, "Prediction")?;
        writeln!(
            f,
            "  Class: {}  (confidence {:.1}%)",
            self.prediction,
            self.confidence * 100.0
        )?;
        for (label, p) in self.probabilities.iter() {
            writeln!(f, "  {:<18} {:>5.1}%", label.as_str(), p * 100.0)?;
        }
        writeln!(f)?;

        writeln!(f, "{}", self.explanation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Classifier;

    fn report() -> ClassificationReport {
        let input = ClassificationInput::new(3.5, 2.8, 0.008, 2.1, 25.0, 0.95);
        let result = Classifier::new().classify(&input).unwrap();
        ClassificationReport::new(&input, &result)
    }

    #[test]
    fn test_render_text_sections() {
        let text = report().render_text();
        assert!(text.starts_with("ExoML - Classification Report\n"));
        assert!(text.contains("Orbital Period (days): 3.5"));
        assert!(text.contains("Class: Confirmed Planet"));
        assert!(text.contains("Why this result?"));
    }

    #[test]
    fn test_json_round_trip_keeps_prediction() {
        let report = report();
        let json = report.to_json().unwrap();
        let back: ClassificationReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.prediction, report.prediction);
        assert_eq!(back.inputs.len(), 6);
    }
}
