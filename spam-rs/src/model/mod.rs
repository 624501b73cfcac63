//! Model module
//!
//! TF-IDF features, the logistic regression classifier, evaluation helpers
//! and the persisted bundle that ties them together.

pub mod bundle;
pub mod logistic;
pub mod metrics;
pub mod split;
pub mod vectorizer;

pub use bundle::{ModelBundle, TrainingStats};
pub use logistic::{FitSummary, LogisticRegression};
pub use metrics::ClassificationReport;
pub use split::train_test_split;
pub use vectorizer::{SparseVector, TfidfVectorizer};
