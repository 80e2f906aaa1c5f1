//! Integration tests for signal classification and reports.

use exoml::classify::{DerivedFeatures, HeuristicScorer, normalize};
use exoml::{
    ClassLabel, ClassificationInput, ClassificationReport, Exoml, ExomlError, InputField,
    RawInputs, ViolationKind,
};

const EPS: f64 = 1e-9;

fn reference_input() -> ClassificationInput {
    ClassificationInput::new(3.5, 2.8, 0.008, 2.1, 25.0, 0.95)
}

fn raw(values: [&str; 6]) -> RawInputs {
    RawInputs {
        period: values[0].to_string(),
        duration: values[1].to_string(),
        depth: values[2].to_string(),
        radius: values[3].to_string(),
        snr: values[4].to_string(),
        stellar_radius: values[5].to_string(),
    }
}

// =============================================================================
// Labels and Probabilities
// =============================================================================

#[test]
fn test_reference_signal_is_confirmed_planet() {
    let result = Exoml::new().classify(&reference_input()).unwrap();

    assert_eq!(result.label, ClassLabel::ConfirmedPlanet);
    assert!((result.probabilities.sum() - 1.0).abs() < EPS);
    for (_, p) in result.probabilities.iter() {
        assert!(p > 0.0 && p < 1.0);
    }
    assert!(!result.explanation.fallback);
    assert!(!result.explanation.bullets.is_empty());
}

#[test]
fn test_confidence_is_winning_probability() {
    let result = Exoml::new().classify(&reference_input()).unwrap();
    let (label, p) = result.probabilities.most_likely();
    assert_eq!(label, result.label);
    assert_eq!(p, result.confidence);
}

#[test]
fn test_classification_is_deterministic() {
    let exoml = Exoml::new();
    let a = exoml.classify(&reference_input()).unwrap();
    let b = exoml.classify(&reference_input()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_silent_signal_scores_false_positive() {
    // Zero SNR and zero depth never reach classify; score them directly.
    let features = DerivedFeatures::derive(&ClassificationInput::new(3.5, 2.8, 0.0, 10.0, 0.0, 1.0));
    let probabilities = normalize(&HeuristicScorer::new().score(&features));
    let (label, _) = probabilities.most_likely();
    assert_eq!(label, ClassLabel::FalsePositive);
}

#[test]
fn test_faint_large_planet_is_false_positive() {
    let input = ClassificationInput::new(3.5, 2.8, 0.00001, 10.0, 0.0, 1.0);
    let result = Exoml::new().classify(&input).unwrap();
    assert_eq!(result.label, ClassLabel::FalsePositive);
    assert!(result.explanation.bullets.iter().any(|b| b.starts_with("Low SNR")));
}

#[test]
fn test_ambiguous_long_period_signal_is_candidate() {
    let input = ClassificationInput::new(50.0, 2.0, 0.008, 2.1, 20.0, 0.95);
    let result = Exoml::new().classify(&input).unwrap();

    assert_eq!(result.label, ClassLabel::Candidate);
    assert!(!result.explanation.fallback);
    assert_eq!(result.explanation.bullets.len(), 2);
    assert!(result.explanation.bullets[0].starts_with("Intermediate depth and SNR"));
    assert_eq!(
        result.explanation.bullets[1],
        "Transit duration vs. period is atypical."
    );
}

#[test]
fn test_ultra_short_period_lowers_confirmed_probability() {
    let exoml = Exoml::new();
    let base = exoml.classify(&reference_input()).unwrap();
    let short = exoml
        .classify(&ClassificationInput::new(0.3, 2.8, 0.008, 2.1, 25.0, 0.95))
        .unwrap();
    assert!(
        short.probabilities.get(ClassLabel::ConfirmedPlanet)
            < base.probabilities.get(ClassLabel::ConfirmedPlanet)
    );
}

// =============================================================================
// Validation
// =============================================================================

#[test]
fn test_out_of_range_period_rejected() {
    let input = ClassificationInput::new(5000.0, 2.8, 0.008, 2.1, 25.0, 0.95);
    let err = Exoml::new().classify(&input).unwrap_err();
    match err {
        ExomlError::InvalidClassificationInput { violations } => {
            assert_eq!(violations.len(), 1);
            assert_eq!(violations[0].field, InputField::Period);
            assert!(matches!(violations[0].kind, ViolationKind::OutOfRange { .. }));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_range_bounds_are_inclusive() {
    let low = ClassificationInput::new(0.05, 0.2, 0.00001, 0.2, 0.0, 0.05);
    let high = ClassificationInput::new(2000.0, 40.0, 0.1, 30.0, 100.0, 20.0);
    assert!(Exoml::new().classify(&low).is_ok());
    assert!(Exoml::new().classify(&high).is_ok());
}

#[test]
fn test_raw_inputs_report_every_problem() {
    let err = Exoml::new()
        .classify_raw(&raw(["3.5", "", "abc", "2.1", "inf", "0.95"]))
        .unwrap_err();
    match err {
        ExomlError::InvalidClassificationInput { violations } => {
            let fields: Vec<InputField> = violations.iter().map(|v| v.field).collect();
            assert_eq!(
                fields,
                vec![InputField::Duration, InputField::Depth, InputField::Snr]
            );
            assert_eq!(violations[0].kind, ViolationKind::Missing);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_raw_inputs_accept_surrounding_whitespace() {
    let result = Exoml::new()
        .classify_raw(&raw([" 3.5", "2.8 ", "0.008", "2.1", "25", "0.95"]))
        .unwrap();
    assert_eq!(result.label, ClassLabel::ConfirmedPlanet);
}

// =============================================================================
// Reports
// =============================================================================

#[test]
fn test_report_text() {
    let input = reference_input();
    let result = Exoml::new().classify(&input).unwrap();
    let text = ClassificationReport::new(&input, &result).render_text();

    assert!(text.starts_with("ExoML - Classification Report"));
    assert!(text.contains("Orbital Period (days)"));
    assert!(text.contains("Confirmed Planet"));
    assert!(text.contains("Why this result?"));
}

#[test]
fn test_report_json() {
    let input = reference_input();
    let result = Exoml::new().classify(&input).unwrap();
    let json = ClassificationReport::new(&input, &result).to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["prediction"], "Confirmed Planet");
    assert_eq!(value["inputs"].as_array().unwrap().len(), 6);
    assert!(value["probabilities"]["False Positive"].is_number());
}
