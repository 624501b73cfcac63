//! Model bundle persistence
//!
//! The fitted vectorizer and classifier are only meaningful together, so
//! they are stored as one JSON artifact. Saving goes through a temporary
//! file in the destination directory followed by a rename, so readers see
//! either the previous bundle or the new one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::info;
use uuid::Uuid;

use super::logistic::LogisticRegression;
use super::vectorizer::TfidfVectorizer;
use crate::config::CleanerConfig;
use crate::error::{Result, SpamError};

/// Bumped whenever the on-disk layout changes
pub const FORMAT_VERSION: u32 = 1;

/// Dataset counts recorded at training time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingStats {
    pub n_records: usize,
    pub n_train: usize,
    pub n_test: usize,
    pub n_spam: usize,
    pub n_ham: usize,
}

/// Vectorizer + classifier from one training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelBundle {
    pub format_version: u32,
    pub bundle_id: Uuid,
    pub trained_at: DateTime<Utc>,
    /// Cleaner settings the dataset was built with
    pub cleaner: CleanerConfig,
    pub vectorizer: TfidfVectorizer,
    pub classifier: LogisticRegression,
    pub stats: TrainingStats,
}

impl ModelBundle {
    pub fn new(
        cleaner: CleanerConfig,
        vectorizer: TfidfVectorizer,
        classifier: LogisticRegression,
        stats: TrainingStats,
    ) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            bundle_id: Uuid::new_v4(),
            trained_at: Utc::now(),
            cleaner,
            vectorizer,
            classifier,
            stats,
        }
    }

    /// Check that the vectorizer and classifier belong together
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.format_version != FORMAT_VERSION {
            return Err(format!(
                "unsupported format version {} (expected {})",
                self.format_version, FORMAT_VERSION
            ));
        }
        if !self.vectorizer.is_fitted() {
            return Err("vectorizer is not fitted".to_string());
        }
        self.vectorizer.validate()?;
        if self.vectorizer.vocabulary_len() != self.classifier.n_features() {
            return Err(format!(
                "vectorizer has {} terms but classifier has {} weights",
                self.vectorizer.vocabulary_len(),
                self.classifier.n_features()
            ));
        }
        Ok(())
    }

    /// Write the bundle to `path`, replacing any previous bundle
    pub fn save(&self, path: &Path) -> Result<()> {
        let save_err = |reason: String| SpamError::ArtifactSave {
            path: path.to_path_buf(),
            reason,
        };

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir).map_err(|e| save_err(e.to_string()))?;

        let tmp = NamedTempFile::new_in(dir).map_err(|e| save_err(e.to_string()))?;
        {
            let mut writer = BufWriter::new(tmp.as_file());
            serde_json::to_writer(&mut writer, self).map_err(|e| save_err(e.to_string()))?;
            writer.flush().map_err(|e| save_err(e.to_string()))?;
        }
        tmp.as_file().sync_all().map_err(|e| save_err(e.to_string()))?;
        tmp.persist(path).map_err(|e| save_err(e.error.to_string()))?;

        info!("Model bundle {} saved to {}", self.bundle_id, path.display());
        Ok(())
    }

    /// Load and validate a bundle written by [`ModelBundle::save`]
    pub fn load(path: &Path) -> Result<Self> {
        let load_err = |reason: String| SpamError::ArtifactLoad {
            path: path.to_path_buf(),
            reason,
        };

        let content = std::fs::read_to_string(path).map_err(|e| load_err(e.to_string()))?;
        let bundle: ModelBundle =
            serde_json::from_str(&content).map_err(|e| load_err(e.to_string()))?;
        bundle.validate().map_err(load_err)?;

        info!(
            "Loaded model bundle {} (trained {}, {} terms)",
            bundle.bundle_id,
            bundle.trained_at.to_rfc3339(),
            bundle.vectorizer.vocabulary_len()
        );
        Ok(bundle)
    }
}
