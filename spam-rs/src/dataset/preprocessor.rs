//! Preprocessing pipeline
//!
//! Walks the spam and ham folders, cleans every `.txt` email and writes the
//! labeled dataset. Problems with individual files are recorded as
//! [`FileOutcome`]s and the run continues; a missing folder only aborts
//! that class.

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::csv_io;
use super::types::*;
use crate::error::{Result, SpamError};
use crate::text::TextCleaner;

/// Records and per-file outcomes for one class folder
#[derive(Debug, Clone)]
pub struct FolderScan {
    pub records: Vec<CleanedRecord>,
    pub outcomes: Vec<FileOutcome>,
}

/// Email preprocessor
pub struct Preprocessor {
    cleaner: TextCleaner,
}

impl Preprocessor {
    pub fn new(cleaner: TextCleaner) -> Self {
        Self { cleaner }
    }

    pub fn cleaner(&self) -> &TextCleaner {
        &self.cleaner
    }

    /// Read and clean every `.txt` file in `folder`
    pub fn read_folder(&self, folder: &Path, label: Label) -> Result<FolderScan> {
        if !folder.is_dir() {
            return Err(SpamError::DirectoryNotFound(folder.to_path_buf()));
        }

        let mut paths: Vec<PathBuf> = std::fs::read_dir(folder)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "txt"))
            .collect();

        if paths.is_empty() {
            return Err(SpamError::NoMatchingFiles(folder.to_path_buf()));
        }

        paths.sort();

        Ok(self.clean_files(paths, label, read_lossy))
    }

    /// Clean each file in order; a file that `read` fails on is skipped
    fn clean_files<F>(&self, paths: Vec<PathBuf>, label: Label, read: F) -> FolderScan
    where
        F: Fn(&Path) -> std::io::Result<String>,
    {
        let mut records = Vec::new();
        let mut outcomes = Vec::with_capacity(paths.len());

        for path in paths {
            let status = match read(&path) {
                Ok(text) => {
                    let document = RawDocument { text, label };
                    let clean_text = self.cleaner.clean(&document.text);

                    if clean_text.is_empty() {
                        debug!("Skipping {}: empty after cleaning", path.display());
                        FileStatus::Skipped(SkipReason::EmptyAfterCleaning)
                    } else {
                        records.push(CleanedRecord {
                            text: document.text,
                            clean_text,
                            label: document.label,
                        });
                        FileStatus::Kept
                    }
                }
                Err(e) => {
                    warn!("Error reading {}: {}", path.display(), e);
                    FileStatus::Skipped(SkipReason::Unreadable(e.to_string()))
                }
            };

            outcomes.push(FileOutcome { path, label, status });
        }

        FolderScan { records, outcomes }
    }

    /// Build the dataset from both class folders and write it to `output`
    pub fn run(&self, spam_dir: &Path, ham_dir: &Path, output: &Path) -> Result<PreprocessReport> {
        info!("Looking for spam emails in: {}", spam_dir.display());
        info!("Looking for ham emails in: {}", ham_dir.display());

        let mut records = Vec::new();
        let mut outcomes = Vec::new();
        let mut folder_errors = Vec::new();
        let mut spam_count = 0;
        let mut ham_count = 0;

        for (folder, label) in [(spam_dir, Label::Spam), (ham_dir, Label::Ham)] {
            match self.read_folder(folder, label) {
                Ok(scan) => {
                    match label {
                        Label::Spam => spam_count = scan.records.len(),
                        Label::Ham => ham_count = scan.records.len(),
                    }
                    records.extend(scan.records);
                    outcomes.extend(scan.outcomes);
                }
                Err(e) => {
                    warn!("Error processing {} folder {}: {}", label, folder.display(), e);
                    folder_errors.push(FolderError {
                        label,
                        path: folder.to_path_buf(),
                        error: e.to_string(),
                    });
                }
            }
        }

        if records.is_empty() {
            let details = if folder_errors.is_empty() {
                "every email was empty after cleaning".to_string()
            } else {
                folder_errors
                    .iter()
                    .map(|f| f.error.clone())
                    .collect::<Vec<_>>()
                    .join("; ")
            };
            return Err(SpamError::EmptyCorpus(format!(
                "no emails found in either folder ({})",
                details
            )));
        }

        csv_io::write_dataset(output, &records)?;

        info!("Processed data saved to {}", output.display());
        info!(
            "Total emails processed: {} (Spam: {}, Ham: {})",
            records.len(),
            spam_count,
            ham_count
        );

        Ok(PreprocessReport {
            output_path: output.to_path_buf(),
            spam_count,
            ham_count,
            outcomes,
            folder_errors,
        })
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new(TextCleaner::default())
    }
}

/// Read a file as UTF-8, dropping invalid byte sequences
fn read_lossy(path: &Path) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).replace(char::REPLACEMENT_CHARACTER, ""))
}
