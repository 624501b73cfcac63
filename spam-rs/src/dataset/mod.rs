//! Dataset module
//!
//! Builds the labeled dataset from raw email folders and reads/writes it.

pub mod csv_io;
pub mod preprocessor;
pub mod types;

pub use csv_io::{read_dataset, write_dataset};
pub use preprocessor::{FolderScan, Preprocessor};
pub use types::*;
