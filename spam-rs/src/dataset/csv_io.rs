//! Dataset file (CSV: `text,clean_text,label`)

use std::path::Path;
use tracing::debug;

use super::types::CleanedRecord;
use crate::error::{Result, SpamError};

/// Write the dataset, replacing any existing file and creating the parent
/// directory if needed.
pub fn write_dataset(path: &Path, records: &[CleanedRecord]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    debug!("Wrote {} rows to {}", records.len(), path.display());
    Ok(())
}

/// Read a dataset written by [`write_dataset`]
pub fn read_dataset(path: &Path) -> Result<Vec<CleanedRecord>> {
    if !path.exists() {
        return Err(SpamError::NotFound(path.to_path_buf()));
    }

    let mut reader = csv::Reader::from_path(path)?;
    let records = reader
        .deserialize()
        .collect::<std::result::Result<Vec<CleanedRecord>, csv::Error>>()?;

    debug!("Read {} rows from {}", records.len(), path.display());
    Ok(records)
}
