//! SLCSP - second lowest cost Silver plan lookup
//!
//! This library provides:
//! - Header-skipping, column-checked CSV record sources for the reference tables
//! - Zip to rating area resolution with ambiguity detection
//! - Silver plan rate aggregation per rating area
//! - Second lowest rate selection and report output (CSV or JSON)

pub mod config;
pub mod error;
pub mod pipeline;
pub mod rating;
pub mod report;
pub mod source;

// Re-export commonly used types
pub use config::InputPaths;
pub use error::{Result, SlcspError};
pub use pipeline::{run_pipeline, run_pipeline_from_readers, PipelineOutput, RunSummary, SlcspRow, TargetSet};
pub use rating::{AreaResolution, RateArea, RateRecord, TARGET_TIER};
pub use report::{write_report, ReportFormat};
