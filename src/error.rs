//! Error handling for report generation.
//!
//! Every failure is fatal for the current run. The variants map onto the
//! stages of the pipeline: locating the source, interpreting its layout,
//! and writing the reports.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RackError {
    #[error("Source not found: {path} - {reason}")]
    SourceNotFound { path: PathBuf, reason: String },

    #[error("Invalid spreadsheet format in {path}: {reason}")]
    SourceFormat { path: PathBuf, reason: String },

    #[error("Misaligned columns in {path} at row {row}: blank {missing} while other columns are populated")]
    MisalignedColumns {
        path: PathBuf,
        row: u32,
        missing: String,
    },

    #[error("Failed to write report {path}: {source}")]
    IoWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl RackError {
    pub(crate) fn io_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoWrite {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RackError>;
