//! Email text normalization
//!
//! Turns raw email text into a lowercase string of stemmed, space-separated
//! alphabetic tokens. The same cleaner (and the same [`CleanerConfig`]) is
//! used when building the dataset and when classifying a new email.

use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;

use super::stopwords;
use crate::config::CleanerConfig;

/// Text cleaner
pub struct TextCleaner {
    config: CleanerConfig,
    html_tag: Regex,
    url: Regex,
    email_address: Regex,
    non_alpha: Regex,
    stop_words: HashSet<&'static str>,
    stemmer: Stemmer,
}

impl TextCleaner {
    /// Create a new cleaner
    pub fn new(config: CleanerConfig) -> Self {
        Self {
            config,
            html_tag: Regex::new(r"<[^>]+>").expect("static regex"),
            url: Regex::new(r"http\S+|www\S+").expect("static regex"),
            email_address: Regex::new(r"\S+@\S+").expect("static regex"),
            non_alpha: Regex::new(r"[^a-z\s]").expect("static regex"),
            stop_words: stopwords::english(),
            stemmer: Stemmer::create(Algorithm::English),
        }
    }

    pub fn config(&self) -> CleanerConfig {
        self.config
    }

    /// Clean one document. Empty or whitespace-only input yields `""`.
    pub fn clean(&self, text: &str) -> String {
        if text.trim().is_empty() {
            return String::new();
        }

        let text = text.to_lowercase();
        let text = self.html_tag.replace_all(&text, "");
        let text = self.url.replace_all(&text, "");
        let text = self.email_address.replace_all(&text, "");
        let text = self.non_alpha.replace_all(&text, "");

        text.split_whitespace()
            .filter(|token| !self.is_stop_word(token))
            .map(|token| {
                if self.config.stem {
                    self.stem_fully(token)
                } else {
                    token.to_string()
                }
            })
            // stemming can land on a stop word ("haves" -> "have")
            .filter(|token| !token.is_empty() && !self.is_stop_word(token))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn is_stop_word(&self, token: &str) -> bool {
        self.config.remove_stopwords && self.stop_words.contains(token)
    }

    /// Stem until the token is a fixed point of the stemmer, so cleaning
    /// already-cleaned text is a no-op ("universities" -> "univers" -> "univ").
    fn stem_fully(&self, token: &str) -> String {
        let mut current = token.to_string();
        for _ in 0..token.len() {
            let next = self.stemmer.stem(&current);
            if next == current {
                break;
            }
            current = next.into_owned();
        }
        current
    }
}

impl Default for TextCleaner {
    fn default() -> Self {
        Self::new(CleanerConfig::default())
    }
}
