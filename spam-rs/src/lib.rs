//! spam-rs: email spam classifier
//!
//! Text cleaning, TF-IDF features and an L2-regularized logistic regression,
//! with a command line front end and a small web form.
//!
//! # Pipeline
//!
//! ```text
//! data/raw/{spam,ham}/*.txt -> data/processed_data.csv -> model/spam_model.json -> verdict
//! ```
//!
//! # Example
//!
//! ```no_run
//! use spam_rs::config::Config;
//! use spam_rs::dataset::Preprocessor;
//! use spam_rs::inference::SpamDetector;
//! use spam_rs::text::TextCleaner;
//! use spam_rs::trainer::{Trainer, TrainerConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let paths = &config.paths;
//!
//!     Preprocessor::new(TextCleaner::new(config.cleaner))
//!         .run(&paths.spam_dir, &paths.ham_dir, &paths.dataset_path)?;
//!
//!     Trainer::new(TrainerConfig::from(&config))
//!         .train_from_file(&paths.dataset_path, &paths.model_path)?;
//!
//!     let detector = SpamDetector::load(&paths.model_path)?;
//!     println!("{}", detector.classify("Claim your free prize now!")?.verdict);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration management
//! - [`error`]: Error types and handling
//! - [`text`]: Text cleaning
//! - [`dataset`]: Preprocessing and the dataset file
//! - [`model`]: Vectorizer, classifier and the saved bundle
//! - [`trainer`]: Training pipeline
//! - [`inference`]: Classifying single emails
//! - [`web`]: Interactive form

pub mod config;
pub mod dataset;
pub mod error;
pub mod inference;
pub mod model;
pub mod text;
pub mod trainer;
pub mod web;

// Re-export commonly used types
pub use config::Config;
pub use error::{Result, SpamError};
