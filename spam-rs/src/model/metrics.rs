//! Held-out evaluation

use serde::Serialize;
use std::fmt;

use crate::dataset::Label;

/// Precision / recall / F1 for one class
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

/// Binary classification report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationReport {
    pub accuracy: f64,
    pub ham: ClassMetrics,
    pub spam: ClassMetrics,
}

impl ClassificationReport {
    /// Returns `None` when there is nothing to compare
    pub fn compute(y_true: &[Label], y_pred: &[Label]) -> Option<Self> {
        if y_true.is_empty() || y_true.len() != y_pred.len() {
            return None;
        }

        let correct = y_true.iter().zip(y_pred).filter(|(t, p)| t == p).count();

        Some(Self {
            accuracy: correct as f64 / y_true.len() as f64,
            ham: class_metrics(y_true, y_pred, Label::Ham),
            spam: class_metrics(y_true, y_pred, Label::Spam),
        })
    }
}

fn class_metrics(y_true: &[Label], y_pred: &[Label], class: Label) -> ClassMetrics {
    let pairs = || y_true.iter().zip(y_pred);
    let tp = pairs().filter(|(t, p)| **t == class && **p == class).count() as f64;
    let predicted = pairs().filter(|(_, p)| **p == class).count() as f64;
    let support = pairs().filter(|(t, _)| **t == class).count();

    let precision = if predicted > 0.0 { tp / predicted } else { 0.0 };
    let recall = if support > 0 { tp / support as f64 } else { 0.0 };
    let f1 = if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    };

    ClassMetrics {
        precision,
        recall,
        f1,
        support,
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<10} {:>10} {:>10} {:>10} {:>10}", "", "precision", "recall", "f1-score", "support")?;
        for (name, m) in [("ham", &self.ham), ("spam", &self.spam)] {
            writeln!(
                f,
                "{:<10} {:>10.2} {:>10.2} {:>10.2} {:>10}",
                name, m.precision, m.recall, m.f1, m.support
            )?;
        }
        write!(
            f,
            "{:<10} {:>10} {:>10} {:>10.2} {:>10}",
            "accuracy",
            "",
            "",
            self.accuracy,
            self.ham.support + self.spam.support
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Label::{Ham, Spam};

    #[test]
    fn test_report() {
        let y_true = [Spam, Spam, Ham, Ham];
        let y_pred = [Spam, Ham, Ham, Ham];

        let report = ClassificationReport::compute(&y_true, &y_pred).unwrap();
        assert_eq!(report.accuracy, 0.75);
        assert_eq!(report.spam.precision, 1.0);
        assert_eq!(report.spam.recall, 0.5);
        assert_eq!(report.spam.support, 2);
        assert!((report.ham.precision - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(report.ham.recall, 1.0);

        let text = report.to_string();
        assert!(text.contains("precision"));
        assert!(text.contains("spam"));
    }

    #[test]
    fn test_missing_class_scores_zero() {
        let report = ClassificationReport::compute(&[Ham, Ham], &[Ham, Ham]).unwrap();
        assert_eq!(report.spam.support, 0);
        assert_eq!(report.spam.f1, 0.0);
        assert_eq!(report.accuracy, 1.0);
    }

    #[test]
    fn test_empty_or_mismatched() {
        assert!(ClassificationReport::compute(&[], &[]).is_none());
        assert!(ClassificationReport::compute(&[Spam], &[]).is_none());
    }
}
