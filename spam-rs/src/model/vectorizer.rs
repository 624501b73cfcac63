//! TF-IDF vectorizer
//!
//! Bag of word n-grams over cleaned text, capped at `max_features` terms.
//! Weights are raw term counts times a smoothed idf, L2-normalized per row:
//!
//! ```text
//! idf(t) = ln((1 + n) / (1 + df(t))) + 1
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::config::VectorizerConfig;
use crate::error::{Result, SpamError};

/// Sparse row: `(column, weight)` pairs sorted by column
pub type SparseVector = Vec<(usize, f64)>;

/// Fitted (or unfitted) TF-IDF vectorizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    max_features: usize,
    ngram_range: (usize, usize),
    /// Term to column index
    vocabulary: HashMap<String, usize>,
    /// Inverse document frequency per column
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    pub fn new(config: VectorizerConfig) -> Self {
        let min_n = config.ngram_range.0.max(1);
        let max_n = config.ngram_range.1.max(min_n);
        Self {
            max_features: config.max_features,
            ngram_range: (min_n, max_n),
            vocabulary: HashMap::new(),
            idf: Vec::new(),
        }
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    pub fn is_fitted(&self) -> bool {
        !self.vocabulary.is_empty()
    }

    /// Check the internal tables of a deserialized vectorizer
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.ngram_range.0 == 0 || self.ngram_range.0 > self.ngram_range.1 {
            return Err(format!("invalid ngram range {:?}", self.ngram_range));
        }
        if self.idf.len() != self.vocabulary.len() {
            return Err(format!(
                "vocabulary has {} terms but idf has {} entries",
                self.vocabulary.len(),
                self.idf.len()
            ));
        }

        let mut seen = vec![false; self.idf.len()];
        for (term, &idx) in &self.vocabulary {
            match seen.get_mut(idx) {
                Some(slot) if !*slot => *slot = true,
                Some(_) => return Err(format!("duplicate column {} for term {:?}", idx, term)),
                None => return Err(format!("column {} for term {:?} is out of range", idx, term)),
            }
        }
        if let Some(idx) = self.idf.iter().position(|v| !v.is_finite()) {
            return Err(format!("idf weight {} is not finite", idx));
        }
        Ok(())
    }

    /// Split a cleaned document into its n-gram terms
    fn analyze(&self, document: &str) -> Vec<String> {
        let tokens: Vec<&str> = document
            .split_whitespace()
            .filter(|t| t.chars().count() >= 2)
            .collect();

        let (min_n, max_n) = self.ngram_range;
        let mut terms = Vec::new();
        for n in min_n..=max_n {
            for gram in tokens.windows(n) {
                terms.push(gram.join(" "));
            }
        }
        terms
    }

    /// Learn vocabulary and idf weights
    pub fn fit(&mut self, documents: &[String]) -> Result<()> {
        if documents.is_empty() {
            return Err(SpamError::Vectorizer("cannot fit on an empty corpus".into()));
        }

        let mut term_freq: HashMap<String, usize> = HashMap::new();
        let mut doc_freq: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let terms = self.analyze(doc);
            let unique: HashSet<&String> = terms.iter().collect();
            for term in unique {
                *doc_freq.entry(term.clone()).or_insert(0) += 1;
            }
            for term in terms {
                *term_freq.entry(term).or_insert(0) += 1;
            }
        }

        if term_freq.is_empty() {
            return Err(SpamError::Vectorizer(
                "empty vocabulary; documents contain no terms".into(),
            ));
        }

        // most frequent first, ties alphabetical
        let mut ranked: Vec<(String, usize)> = term_freq.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(self.max_features);

        // columns are assigned in alphabetical order of the kept terms
        let kept: BTreeMap<String, usize> = ranked.into_iter().collect();

        let n_docs = documents.len() as f64;
        self.vocabulary = HashMap::with_capacity(kept.len());
        self.idf = Vec::with_capacity(kept.len());

        for (idx, term) in kept.into_keys().enumerate() {
            let df = doc_freq.get(&term).copied().unwrap_or(0) as f64;
            self.idf.push(((1.0 + n_docs) / (1.0 + df)).ln() + 1.0);
            self.vocabulary.insert(term, idx);
        }

        Ok(())
    }

    /// Vectorize one document. Terms outside the vocabulary are ignored.
    pub fn transform(&self, document: &str) -> SparseVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for term in self.analyze(document) {
            if let Some(&idx) = self.vocabulary.get(&term) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut row: SparseVector = counts
            .into_iter()
            .map(|(idx, count)| (idx, count * self.idf[idx]))
            .collect();

        let norm = row.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, v) in &mut row {
                *v /= norm;
            }
        }

        row
    }

    pub fn transform_all(&self, documents: &[String]) -> Vec<SparseVector> {
        documents.iter().map(|d| self.transform(d)).collect()
    }

    pub fn fit_transform(&mut self, documents: &[String]) -> Result<Vec<SparseVector>> {
        self.fit(documents)?;
        Ok(self.transform_all(documents))
    }
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new(VectorizerConfig::default())
    }
}
