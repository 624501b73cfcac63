//! Inference service
//!
//! Loads a saved [`ModelBundle`] and classifies single emails with the
//! same cleaning settings the bundle was trained with.

use serde::Serialize;
use std::fmt;
use std::path::Path;
use tracing::debug;

use crate::dataset::Label;
use crate::error::{Result, SpamError};
use crate::model::ModelBundle;
use crate::text::TextCleaner;

/// Classification outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Spam,
    NotSpam,
    /// Input was empty or whitespace only; the model was not consulted
    EmptyInput,
}

impl Verdict {
    /// Text shown to the user
    pub fn message(&self) -> &'static str {
        match self {
            Verdict::Spam => "SPAM",
            Verdict::NotSpam => "NOT SPAM",
            Verdict::EmptyInput => "Please enter some email text.",
        }
    }

    pub fn label(&self) -> Option<Label> {
        match self {
            Verdict::Spam => Some(Label::Spam),
            Verdict::NotSpam => Some(Label::Ham),
            Verdict::EmptyInput => None,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub verdict: Verdict,
    /// `None` when the model was not consulted
    pub spam_probability: Option<f64>,
    pub clean_text: String,
}

/// Spam detector backed by one model bundle
pub struct SpamDetector {
    bundle: ModelBundle,
    cleaner: TextCleaner,
}

impl SpamDetector {
    /// Load the bundle at `model_path`
    pub fn load(model_path: &Path) -> Result<Self> {
        Ok(Self::from_bundle(ModelBundle::load(model_path)?))
    }

    pub fn from_bundle(bundle: ModelBundle) -> Self {
        let cleaner = TextCleaner::new(bundle.cleaner);
        Self { bundle, cleaner }
    }

    pub fn bundle(&self) -> &ModelBundle {
        &self.bundle
    }

    /// Classify one raw email
    pub fn classify(&self, text: &str) -> Result<Prediction> {
        if text.trim().is_empty() {
            return Ok(Prediction {
                verdict: Verdict::EmptyInput,
                spam_probability: None,
                clean_text: String::new(),
            });
        }

        let clean_text = self.cleaner.clean(text);
        let features = self.bundle.vectorizer.transform(&clean_text);
        let probability = self.bundle.classifier.predict_proba(&features)?;
        let label = self.bundle.classifier.predict(&features)?;

        debug!(
            "Classified email: {} known features, p(spam) = {:.3}",
            features.len(),
            probability
        );

        let verdict = match label {
            Label::Spam => Verdict::Spam,
            Label::Ham => Verdict::NotSpam,
        };

        Ok(Prediction {
            verdict,
            spam_probability: Some(probability),
            clean_text,
        })
    }
}

/// Read the email to classify from `path`
pub fn load_email(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(SpamError::NotFound(path.to_path_buf()));
    }
    Ok(std::fs::read_to_string(path)?)
}
