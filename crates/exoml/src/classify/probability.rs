//! Class labels and softmax normalization of raw scores.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::scorer::RawScores;

/// Candidate class of a transit-like signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassLabel {
    #[serde(rename = "Confirmed Planet")]
    ConfirmedPlanet,
    #[serde(rename = "False Positive")]
    FalsePositive,
    #[serde(rename = "Candidate")]
    Candidate,
}

impl ClassLabel {
    /// Declaration order. Exact probability ties go to the earlier label.
    pub const ALL: [ClassLabel; 3] = [
        ClassLabel::ConfirmedPlanet,
        ClassLabel::FalsePositive,
        ClassLabel::Candidate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClassLabel::ConfirmedPlanet => "Confirmed Planet",
            ClassLabel::FalsePositive => "False Positive",
            ClassLabel::Candidate => "Candidate",
        }
    }
}

impl fmt::Display for ClassLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Probability per class, stored in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassProbabilities(IndexMap<ClassLabel, f64>);

impl ClassProbabilities {
    pub fn get(&self, label: ClassLabel) -> f64 {
        self.0.get(&label).copied().unwrap_or(0.0)
    }

    /// Labels and probabilities in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (ClassLabel, f64)> + '_ {
        ClassLabel::ALL.into_iter().map(|label| (label, self.get(label)))
    }

    pub fn sum(&self) -> f64 {
        self.iter().map(|(_, p)| p).sum()
    }

    /// The most probable label and its probability.
    ///
    /// Walks [`ClassLabel::ALL`] and only replaces the current best on a
    /// strictly greater probability, so ties resolve to Confirmed Planet,
    /// then False Positive, then Candidate.
    pub fn most_likely(&self) -> (ClassLabel, f64) {
        let mut best = (ClassLabel::ConfirmedPlanet, f64::NEG_INFINITY);
        for (label, p) in self.iter() {
            if p > best.1 {
                best = (label, p);
            }
        }
        best
    }
}

/// Numerically stable softmax over the three raw scores.
pub fn normalize(scores: &RawScores) -> ClassProbabilities {
    let max = scores.max();
    let exps: Vec<(ClassLabel, f64)> = ClassLabel::ALL
        .into_iter()
        .map(|label| (label, (scores.get(label) - max).exp()))
        .collect();
    let total: f64 = exps.iter().map(|(_, e)| e).sum();

    ClassProbabilities(
        exps.into_iter()
            .map(|(label, e)| (label, e / total))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(c: f64, f: f64, k: f64) -> RawScores {
        RawScores {
            confirmed_planet: c,
            false_positive: f,
            candidate: k,
        }
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let p = normalize(&scores(1.3, 0.7, 0.94));
        assert!((p.sum() - 1.0).abs() < 1e-12);
        assert!(p.iter().all(|(_, v)| v > 0.0 && v < 1.0));
    }

    #[test]
    fn test_shift_invariance() {
        let a = normalize(&scores(1.3, 0.7, 0.94));
        let b = normalize(&scores(1.3, 0.7, 0.94).shifted(250.0));
        for label in ClassLabel::ALL {
            assert!((a.get(label) - b.get(label)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_large_scores_do_not_overflow() {
        let p = normalize(&scores(1000.0, 999.0, -1000.0));
        assert!(p.get(ClassLabel::ConfirmedPlanet).is_finite());
        assert!((p.sum() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_three_way_tie_picks_confirmed() {
        let p = normalize(&scores(0.5, 0.5, 0.5));
        assert_eq!(p.most_likely().0, ClassLabel::ConfirmedPlanet);
    }

    #[test]
    fn test_tie_between_false_positive_and_candidate() {
        let p = normalize(&scores(0.1, 0.9, 0.9));
        let (label, prob) = p.most_likely();
        assert_eq!(label, ClassLabel::FalsePositive);
        assert_eq!(prob, p.get(ClassLabel::Candidate));
    }

    #[test]
    fn test_serializes_in_declaration_order() {
        let p = normalize(&scores(0.0, 0.0, 0.0));
        let json = serde_json::to_string(&p).unwrap();
        let confirmed = json.find("Confirmed Planet").unwrap();
        let false_pos = json.find("False Positive").unwrap();
        let candidate = json.find("Candidate").unwrap();
        assert!(confirmed < false_pos && false_pos < candidate);
    }
}
