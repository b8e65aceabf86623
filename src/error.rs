//! Error types for the SLCSP pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading the reference tables or writing the report.
///
/// Every variant is fatal: the pipeline never produces partial output.
#[derive(Debug, Error)]
pub enum SlcspError {
    /// The input file could not be opened
    #[error("cannot open {source_name} ({}): {source}", .path.display())]
    Open {
        source_name: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV syntax or I/O failure while reading rows
    #[error("failed reading {source_name}{}: {source}", format_line(.line))]
    SourceRead {
        source_name: String,
        line: Option<u64>,
        #[source]
        source: csv::Error,
    },

    /// The source had no header row
    #[error("{source_name} is empty, expected a header row")]
    MissingHeader { source_name: String },

    /// A row did not have the fixed column count for its table
    #[error("{source_name}{}: expected {expected} fields, found {found}", format_line(.line))]
    FieldCount {
        source_name: String,
        line: Option<u64>,
        expected: usize,
        found: usize,
    },

    /// The plan rate column was not a finite decimal number
    #[error("{source_name}{}: invalid rate {value:?}", format_line(.line))]
    RateParse {
        source_name: String,
        line: Option<u64>,
        value: String,
    },

    /// Writing the report failed
    #[error("failed writing report: {0}")]
    Write(#[from] csv::Error),

    #[error("failed flushing report: {0}")]
    Flush(#[from] std::io::Error),
}

impl SlcspError {
    /// True for the row/file-level read failures (as opposed to a bad rate value).
    pub fn is_source_read(&self) -> bool {
        matches!(
            self,
            SlcspError::Open { .. }
                | SlcspError::SourceRead { .. }
                | SlcspError::MissingHeader { .. }
                | SlcspError::FieldCount { .. }
        )
    }
}

fn format_line(line: &Option<u64>) -> String {
    match line {
        Some(line) => format!(" line {}", line),
        None => String::new(),
    }
}

pub type Result<T> = std::result::Result<T, SlcspError>;
