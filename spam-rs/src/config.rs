//! Configuration for spam-rs
//!
//! Every section is optional in the TOML file; missing fields fall back to
//! the defaults below, which mirror the fixed layout of the project
//! (`data/raw/{spam,ham}`, `data/processed_data.csv`, `model/`).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, SpamError};

/// Main configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub cleaner: CleanerConfig,
    pub vectorizer: VectorizerConfig,
    pub model: ModelConfig,
    pub split: SplitConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

/// File system layout
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Folder of raw spam emails (`*.txt`)
    pub spam_dir: PathBuf,
    /// Folder of raw ham emails (`*.txt`)
    pub ham_dir: PathBuf,
    /// Processed dataset (CSV)
    pub dataset_path: PathBuf,
    /// Model bundle (vectorizer + classifier)
    pub model_path: PathBuf,
    /// Single email read by `spam-rs predict`
    pub email_path: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            spam_dir: PathBuf::from("data/raw/spam"),
            ham_dir: PathBuf::from("data/raw/ham"),
            dataset_path: PathBuf::from("data/processed_data.csv"),
            model_path: PathBuf::from("model/spam_model.json"),
            email_path: PathBuf::from("email.txt"),
        }
    }
}

/// Text cleaning switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CleanerConfig {
    /// Reduce tokens to their stem
    pub stem: bool,
    /// Drop English stop words
    pub remove_stopwords: bool,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            stem: true,
            remove_stopwords: true,
        }
    }
}

/// TF-IDF vectorizer parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct VectorizerConfig {
    pub max_features: usize,
    /// Inclusive (min_n, max_n)
    pub ngram_range: (usize, usize),
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            max_features: 5000,
            ngram_range: (1, 2),
        }
    }
}

/// Regularization penalty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Penalty {
    L2,
}

/// Optimizer used to fit the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Solver {
    /// Full-batch gradient descent with backtracking line search
    GradientDescent,
}

/// Per-class sample weighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassWeight {
    /// n_samples / (n_classes * n_samples_in_class)
    Balanced,
    None,
}

/// Logistic regression parameters
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ModelConfig {
    pub penalty: Penalty,
    /// Inverse regularization strength
    pub c: f64,
    pub solver: Solver,
    pub class_weight: ClassWeight,
    pub max_iter: usize,
    /// Stop when the gradient norm drops below this
    pub tol: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            penalty: Penalty::L2,
            c: 1.0,
            solver: Solver::GradientDescent,
            class_weight: ClassWeight::Balanced,
            max_iter: 1000,
            tol: 1e-4,
        }
    }
}

/// Train / held-out split
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SplitConfig {
    pub test_size: f64,
    pub seed: u64,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            test_size: 0.2,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:7860".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SpamError::Config(e.to_string()))?;

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(content).map_err(|e| SpamError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Reject hyperparameters the trainer cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.vectorizer.max_features == 0 {
            return Err(SpamError::Config("vectorizer.max_features must be > 0".into()));
        }

        let (min_n, max_n) = self.vectorizer.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(SpamError::Config(format!(
                "vectorizer.ngram_range ({}, {}) is invalid",
                min_n, max_n
            )));
        }

        if !(self.model.c > 0.0) {
            return Err(SpamError::Config("model.c must be > 0".into()));
        }

        if !(self.split.test_size > 0.0 && self.split.test_size < 1.0) {
            return Err(SpamError::Config("split.test_size must be in (0, 1)".into()));
        }

        Ok(())
    }
}
