//! Text processing module
//!
//! Normalization of raw email text ahead of vectorization.

pub mod cleaner;
pub mod stopwords;

pub use cleaner::TextCleaner;
