//! Output projections for the filtered descriptor sequence
//!
//! Each output mode is an independent projection function over the same
//! immutable descriptor slice; this module only dispatches on the
//! configured mode and owns the write path. Every projection assembles its
//! full document in memory before the first byte is written, so a caller
//! can never observe a truncated output file.

pub mod console;
pub mod csv;
pub mod json;

use std::fmt;
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};

use crate::config::{OutputMode, QueryConfiguration};
use crate::types::RepositoryDescriptor;

/// Errors raised while rendering or writing a projection
#[derive(Debug)]
pub enum ProjectionError {
    /// The descriptor sequence could not be serialized
    Serialization(String),

    /// The output destination could not be written
    Io(String),
}

impl fmt::Display for ProjectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectionError::Serialization(details) => {
                write!(f, "Serialization error: {}", details)
            }
            ProjectionError::Io(details) => write!(f, "Output error: {}", details),
        }
    }
}

impl std::error::Error for ProjectionError {}

/// Render the filtered sequence into the configured representation and
/// write it out.
///
/// The console projection always goes to stdout; JSON and CSV honor
/// `out_file` when set.
pub fn write_report(
    descriptors: &[RepositoryDescriptor],
    config: &QueryConfiguration,
) -> Result<(), ProjectionError> {
    match config.output_mode {
        OutputMode::Console => write_stdout(&console::render(descriptors)),
        OutputMode::Json => write_document(&json::render(descriptors)?, config.out_file.as_deref()),
        OutputMode::Csv => write_document(&csv::render(descriptors), config.out_file.as_deref()),
    }
}

fn write_document(document: &str, out_file: Option<&Path>) -> Result<(), ProjectionError> {
    match out_file {
        Some(path) => {
            std::fs::write(path, document).map_err(|e| {
                ProjectionError::Io(format!("failed to write {}: {}", path.display(), e))
            })?;
            tracing::info!("Wrote report to {}", path.display());
            Ok(())
        }
        None => write_stdout(document),
    }
}

fn write_stdout(document: &str) -> Result<(), ProjectionError> {
    std::io::stdout()
        .write_all(document.as_bytes())
        .map_err(|e| ProjectionError::Io(format!("failed to write to stdout: {}", e)))
}

/// Format a UTC instant for the console table
pub(crate) fn format_datetime(dt: DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M UTC").to_string()
}
