//! L2-regularized logistic regression
//!
//! Binary classifier over sparse TF-IDF rows. Fitting minimizes
//!
//! ```text
//! 0.5 * (||w||^2 + b^2) + C * sum_i s_i * ln(1 + exp(-y_i * (w.x_i + b)))
//! ```
//!
//! with `y_i` in {-1, +1} (ham, spam) and `s_i` the class weight of sample
//! `i`. The intercept is regularized together with the weights. The
//! optimizer is deterministic full-batch gradient descent with Armijo
//! backtracking, so the same data always yields the same model.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::vectorizer::SparseVector;
use crate::config::{ClassWeight, ModelConfig};
use crate::dataset::Label;
use crate::error::{Result, SpamError};

/// Armijo sufficient-decrease constant
const ARMIJO_C: f64 = 1e-4;
/// Smallest step tried before giving up on an iteration
const MIN_STEP: f64 = 1e-12;

/// Outcome of [`LogisticRegression::fit`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitSummary {
    pub iterations: usize,
    pub converged: bool,
    pub final_loss: f64,
    pub n_samples: usize,
    pub n_spam: usize,
    pub n_ham: usize,
}

/// Logistic regression classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    config: ModelConfig,
    weights: Vec<f64>,
    intercept: f64,
}

impl LogisticRegression {
    pub fn new(config: ModelConfig) -> Self {
        Self {
            config,
            weights: Vec::new(),
            intercept: 0.0,
        }
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    pub fn n_features(&self) -> usize {
        self.weights.len()
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Fit on `x` (rows over `n_features` columns) and labels `y`
    pub fn fit(&mut self, x: &[SparseVector], y: &[Label], n_features: usize) -> Result<FitSummary> {
        if x.is_empty() {
            return Err(SpamError::Training("no training samples".into()));
        }
        if x.len() != y.len() {
            return Err(SpamError::Training(format!(
                "{} rows but {} labels",
                x.len(),
                y.len()
            )));
        }
        if let Some(bad) = x.iter().flatten().find(|(idx, _)| *idx >= n_features) {
            return Err(SpamError::Training(format!(
                "column {} out of range for {} features",
                bad.0, n_features
            )));
        }

        let n_spam = y.iter().filter(|l| **l == Label::Spam).count();
        let n_ham = y.len() - n_spam;
        if n_spam == 0 || n_ham == 0 {
            return Err(SpamError::Training(format!(
                "training partition needs both classes (spam: {}, ham: {})",
                n_spam, n_ham
            )));
        }

        let targets: Vec<f64> = y
            .iter()
            .map(|l| if *l == Label::Spam { 1.0 } else { -1.0 })
            .collect();
        let sample_weights = self.sample_weights(y, n_spam, n_ham);

        let problem = Problem {
            x,
            targets: &targets,
            sample_weights: &sample_weights,
            c: self.config.c,
        };

        // params[..n_features] = w, params[n_features] = b
        let mut params = vec![0.0; n_features + 1];
        let mut loss = problem.loss(&params);
        let mut step: f64 = 1.0;
        let mut converged = false;
        let mut iterations = 0;

        while iterations < self.config.max_iter {
            let grad = problem.gradient(&params);
            let grad_sq: f64 = grad.iter().map(|g| g * g).sum();
            if grad_sq.sqrt() < self.config.tol {
                converged = true;
                break;
            }

            iterations += 1;

            // backtracking line search, restarting from a slightly larger step
            step = (step * 2.0).min(1e3);
            let mut accepted = None;
            while step > MIN_STEP {
                let candidate: Vec<f64> = params
                    .iter()
                    .zip(&grad)
                    .map(|(p, g)| p - step * g)
                    .collect();
                let candidate_loss = problem.loss(&candidate);
                if candidate_loss <= loss - ARMIJO_C * step * grad_sq {
                    accepted = Some((candidate, candidate_loss));
                    break;
                }
                step *= 0.5;
            }

            match accepted {
                Some((candidate, candidate_loss)) => {
                    params = candidate;
                    loss = candidate_loss;
                }
                None => {
                    debug!("Line search stalled at iteration {}", iterations);
                    break;
                }
            }
        }

        if !converged {
            warn!(
                "Logistic regression stopped after {} iterations without reaching tol={}",
                iterations, self.config.tol
            );
        }

        self.intercept = params.pop().unwrap_or(0.0);
        self.weights = params;

        debug!(
            "Fitted logistic regression: {} features, loss {:.6}, {} iterations",
            n_features, loss, iterations
        );

        Ok(FitSummary {
            iterations,
            converged,
            final_loss: loss,
            n_samples: x.len(),
            n_spam,
            n_ham,
        })
    }

    fn sample_weights(&self, y: &[Label], n_spam: usize, n_ham: usize) -> Vec<f64> {
        match self.config.class_weight {
            ClassWeight::None => vec![1.0; y.len()],
            ClassWeight::Balanced => {
                let n = y.len() as f64;
                let spam_weight = n / (2.0 * n_spam as f64);
                let ham_weight = n / (2.0 * n_ham as f64);
                y.iter()
                    .map(|l| if *l == Label::Spam { spam_weight } else { ham_weight })
                    .collect()
            }
        }
    }

    /// Signed distance to the decision boundary; positive means spam
    pub fn decision_function(&self, row: &SparseVector) -> Result<f64> {
        let mut z = self.intercept;
        for &(idx, value) in row {
            let weight = self.weights.get(idx).ok_or_else(|| {
                SpamError::Prediction(format!(
                    "feature {} out of range for a model with {} features",
                    idx,
                    self.weights.len()
                ))
            })?;
            z += weight * value;
        }
        Ok(z)
    }

    /// Probability that `row` is spam
    pub fn predict_proba(&self, row: &SparseVector) -> Result<f64> {
        Ok(sigmoid(self.decision_function(row)?))
    }

    pub fn predict(&self, row: &SparseVector) -> Result<Label> {
        if self.decision_function(row)? > 0.0 {
            Ok(Label::Spam)
        } else {
            Ok(Label::Ham)
        }
    }
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self::new(ModelConfig::default())
    }
}

/// Training data bound to one objective
struct Problem<'a> {
    x: &'a [SparseVector],
    targets: &'a [f64],
    sample_weights: &'a [f64],
    c: f64,
}

impl Problem<'_> {
    fn margin(&self, params: &[f64], i: usize) -> f64 {
        let b = params[params.len() - 1];
        let z = self.x[i].iter().fold(b, |acc, &(idx, v)| acc + params[idx] * v);
        self.targets[i] * z
    }

    fn loss(&self, params: &[f64]) -> f64 {
        let reg = 0.5 * params.iter().map(|p| p * p).sum::<f64>();
        let data: f64 = (0..self.x.len())
            .map(|i| self.sample_weights[i] * softplus(-self.margin(params, i)))
            .sum();
        reg + self.c * data
    }

    fn gradient(&self, params: &[f64]) -> Vec<f64> {
        let bias = params.len() - 1;
        let mut grad = params.to_vec();

        for i in 0..self.x.len() {
            // d/dz of ln(1 + exp(-y z)) = -y * sigmoid(-y z)
            let coef = -self.c
                * self.sample_weights[i]
                * self.targets[i]
                * sigmoid(-self.margin(params, i));
            for &(idx, v) in &self.x[i] {
                grad[idx] += coef * v;
            }
            grad[bias] += coef;
        }

        grad
    }
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// ln(1 + exp(z)) without overflow
fn softplus(z: f64) -> f64 {
    if z > 0.0 {
        z + (-z).exp().ln_1p()
    } else {
        z.exp().ln_1p()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spam_row() -> SparseVector {
        vec![(0, 1.0)]
    }

    fn ham_row() -> SparseVector {
        vec![(1, 1.0)]
    }

    #[test]
    fn test_separable_data() {
        let x = vec![spam_row(), spam_row(), spam_row(), ham_row(), ham_row(), ham_row()];
        let y = vec![Label::Spam, Label::Spam, Label::Spam, Label::Ham, Label::Ham, Label::Ham];

        let mut model = LogisticRegression::default();
        let summary = model.fit(&x, &y, 2).unwrap();

        assert!(summary.converged);
        assert_eq!(summary.n_spam, 3);
        assert_eq!(summary.n_ham, 3);
        assert!(model.weights()[0] > 0.0);
        assert!(model.weights()[1] < 0.0);
        assert!(model.intercept().abs() < 1e-3);
        assert_eq!(model.predict(&spam_row()).unwrap(), Label::Spam);
        assert_eq!(model.predict(&ham_row()).unwrap(), Label::Ham);
        assert!(model.predict_proba(&spam_row()).unwrap() > 0.5);
    }

    #[test]
    fn test_balanced_weights_help_minority_class() {
        let mut x = vec![spam_row()];
        let mut y = vec![Label::Spam];
        for _ in 0..9 {
            x.push(ham_row());
            y.push(Label::Ham);
        }

        let mut balanced = LogisticRegression::default();
        balanced.fit(&x, &y, 2).unwrap();

        let mut unweighted = LogisticRegression::new(ModelConfig {
            class_weight: ClassWeight::None,
            ..ModelConfig::default()
        });
        unweighted.fit(&x, &y, 2).unwrap();

        assert_eq!(balanced.predict(&spam_row()).unwrap(), Label::Spam);
        assert!(
            balanced.predict_proba(&spam_row()).unwrap()
                > unweighted.predict_proba(&spam_row()).unwrap()
        );
    }

    #[test]
    fn test_deterministic() {
        let x = vec![vec![(0, 0.6), (2, 0.8)], vec![(1, 1.0)], vec![(0, 1.0)], vec![(1, 0.7), (2, 0.7)]];
        let y = vec![Label::Spam, Label::Ham, Label::Spam, Label::Ham];

        let mut a = LogisticRegression::default();
        let mut b = LogisticRegression::default();
        a.fit(&x, &y, 3).unwrap();
        b.fit(&x, &y, 3).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn test_rejects_bad_input() {
        let mut model = LogisticRegression::default();

        assert!(matches!(model.fit(&[], &[], 2), Err(SpamError::Training(_))));
        assert!(model.fit(&[spam_row()], &[], 2).is_err());
        assert!(model.fit(&[spam_row(), spam_row()], &[Label::Spam, Label::Spam], 2).is_err());
        assert!(model.fit(&[vec![(5, 1.0)], ham_row()], &[Label::Spam, Label::Ham], 2).is_err());
    }

    #[test]
    fn test_out_of_range_feature_is_prediction_error() {
        let mut model = LogisticRegression::default();
        model
            .fit(&[spam_row(), ham_row()], &[Label::Spam, Label::Ham], 2)
            .unwrap();

        let err = model.predict(&vec![(7, 1.0)]).unwrap_err();
        assert!(matches!(err, SpamError::Prediction(_)));
    }

    #[test]
    fn test_numerically_stable_helpers() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-12);
        assert!(sigmoid(-1000.0) >= 0.0);
        assert!(sigmoid(1000.0) <= 1.0);
        assert!(softplus(1000.0).is_finite());
        assert!((softplus(0.0) - 2f64.ln()).abs() < 1e-12);
    }
}
