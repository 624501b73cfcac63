//! Dataset types and data structures

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Email class. Stored as `1` (spam) / `0` (ham) in the dataset file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Label {
    Ham,
    Spam,
}

impl Label {
    pub fn as_u8(self) -> u8 {
        match self {
            Label::Ham => 0,
            Label::Spam => 1,
        }
    }
}

impl From<Label> for u8 {
    fn from(label: Label) -> Self {
        label.as_u8()
    }
}

impl TryFrom<u8> for Label {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Label::Ham),
            1 => Ok(Label::Spam),
            other => Err(format!("invalid label {}, expected 0 (ham) or 1 (spam)", other)),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Ham => write!(f, "ham"),
            Label::Spam => write!(f, "spam"),
        }
    }
}

/// One email as read from a labeled folder
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub text: String,
    pub label: Label,
}

/// One dataset row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanedRecord {
    /// Raw email text
    pub text: String,
    /// Output of the text cleaner
    pub clean_text: String,
    pub label: Label,
}

/// Why a file did not make it into the dataset
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// The file could not be read
    Unreadable(String),
    /// Cleaning left no tokens
    EmptyAfterCleaning,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Unreadable(e) => write!(f, "unreadable: {}", e),
            SkipReason::EmptyAfterCleaning => write!(f, "no text left after cleaning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FileStatus {
    Kept,
    Skipped(SkipReason),
}

/// Per-file result of a preprocessing run
#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub label: Label,
    pub status: FileStatus,
}

impl FileOutcome {
    pub fn is_kept(&self) -> bool {
        self.status == FileStatus::Kept
    }
}

/// A class folder that could not be processed at all
#[derive(Debug, Clone)]
pub struct FolderError {
    pub label: Label,
    pub path: PathBuf,
    pub error: String,
}

/// Summary of a preprocessing run
#[derive(Debug, Clone)]
pub struct PreprocessReport {
    /// Where the dataset was written
    pub output_path: PathBuf,
    pub spam_count: usize,
    pub ham_count: usize,
    pub outcomes: Vec<FileOutcome>,
    pub folder_errors: Vec<FolderError>,
}

impl PreprocessReport {
    pub fn total(&self) -> usize {
        self.spam_count + self.ham_count
    }

    /// Files that were read but not kept
    pub fn skipped(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes.iter().filter(|o| !o.is_kept())
    }
}
