//! Training pipeline
//!
//! dataset -> TF-IDF -> 80/20 split -> logistic regression -> bundle.
//! Every run starts from the full dataset and replaces the saved bundle.

use std::path::Path;
use tracing::{info, warn};

use crate::config::{CleanerConfig, Config, ModelConfig, SplitConfig, VectorizerConfig};
use crate::dataset::{self, CleanedRecord, Label};
use crate::error::{Result, SpamError};
use crate::model::{
    train_test_split, ClassificationReport, FitSummary, LogisticRegression, ModelBundle,
    TfidfVectorizer, TrainingStats,
};

/// Hyperparameters for one training run
#[derive(Debug, Clone, Default)]
pub struct TrainerConfig {
    pub cleaner: CleanerConfig,
    pub vectorizer: VectorizerConfig,
    pub model: ModelConfig,
    pub split: SplitConfig,
}

impl From<&Config> for TrainerConfig {
    fn from(config: &Config) -> Self {
        Self {
            cleaner: config.cleaner,
            vectorizer: config.vectorizer,
            model: config.model,
            split: config.split,
        }
    }
}

/// Result of [`Trainer::train`]
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    pub bundle: ModelBundle,
    pub fit: FitSummary,
    /// Held-out evaluation, when it could be computed
    pub report: Option<ClassificationReport>,
}

pub struct Trainer {
    config: TrainerConfig,
}

impl Trainer {
    pub fn new(config: TrainerConfig) -> Self {
        Self { config }
    }

    /// Fit a fresh vectorizer and classifier on `records`
    pub fn train(&self, records: &[CleanedRecord]) -> Result<TrainingOutcome> {
        if records.is_empty() {
            return Err(SpamError::EmptyDataset);
        }

        let documents: Vec<String> = records.iter().map(|r| r.clean_text.clone()).collect();
        let labels: Vec<Label> = records.iter().map(|r| r.label).collect();

        let mut vectorizer = TfidfVectorizer::new(self.config.vectorizer);
        let features = vectorizer.fit_transform(&documents)?;
        info!(
            "TF-IDF fitted: {} documents, {} terms",
            documents.len(),
            vectorizer.vocabulary_len()
        );

        let (train_idx, test_idx) =
            train_test_split(records.len(), self.config.split.test_size, self.config.split.seed);

        let x_train: Vec<_> = train_idx.iter().map(|&i| features[i].clone()).collect();
        let y_train: Vec<Label> = train_idx.iter().map(|&i| labels[i]).collect();

        let mut classifier = LogisticRegression::new(self.config.model);
        let fit = classifier.fit(&x_train, &y_train, vectorizer.vocabulary_len())?;
        info!(
            "Classifier fitted on {} rows (spam: {}, ham: {}) in {} iterations",
            fit.n_samples, fit.n_spam, fit.n_ham, fit.iterations
        );

        let report = evaluate(&classifier, &features, &labels, &test_idx);

        let stats = TrainingStats {
            n_records: records.len(),
            n_train: train_idx.len(),
            n_test: test_idx.len(),
            n_spam: labels.iter().filter(|l| **l == Label::Spam).count(),
            n_ham: labels.iter().filter(|l| **l == Label::Ham).count(),
        };

        Ok(TrainingOutcome {
            bundle: ModelBundle::new(self.config.cleaner, vectorizer, classifier, stats),
            fit,
            report,
        })
    }

    /// Train from the dataset file and save the bundle to `model_path`
    pub fn train_from_file(&self, dataset_path: &Path, model_path: &Path) -> Result<TrainingOutcome> {
        let records = dataset::read_dataset(dataset_path)?;
        info!("Loaded {} records from {}", records.len(), dataset_path.display());

        let outcome = self.train(&records)?;
        outcome.bundle.save(model_path)?;

        Ok(outcome)
    }
}

impl Default for Trainer {
    fn default() -> Self {
        Self::new(TrainerConfig::default())
    }
}

/// Best-effort evaluation on the held-out rows
fn evaluate(
    classifier: &LogisticRegression,
    features: &[crate::model::SparseVector],
    labels: &[Label],
    test_idx: &[usize],
) -> Option<ClassificationReport> {
    if test_idx.is_empty() {
        warn!("Held-out partition is empty, skipping evaluation");
        return None;
    }

    let mut y_true = Vec::with_capacity(test_idx.len());
    let mut y_pred = Vec::with_capacity(test_idx.len());
    for &i in test_idx {
        match classifier.predict(&features[i]) {
            Ok(label) => {
                y_true.push(labels[i]);
                y_pred.push(label);
            }
            Err(e) => {
                warn!("Evaluation skipped: {}", e);
                return None;
            }
        }
    }

    let report = ClassificationReport::compute(&y_true, &y_pred)?;
    info!("Held-out evaluation:\n{}", report);
    Some(report)
}
