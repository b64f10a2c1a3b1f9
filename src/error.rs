//! Error types for mysql-add-schema

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while generating schema-qualified scripts
///
/// Every variant is recoverable: the caller fixes the offending input and
/// retries. The splitter and the qualifier themselves never fail.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("No input SQL file was selected")]
    NoInputSelected,

    #[error("No schema was selected; pick at least one schema")]
    NoSchemaSelected,

    #[error("Failed to read SQL file: {path}")]
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write generated SQL to {path}")]
    OutputUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read schema list: {path}")]
    SchemaListUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid schema name '{name}': {reason}")]
    InvalidSchemaName { name: String, reason: &'static str },

    #[error("Unknown text encoding label: {label}")]
    UnknownEncoding { label: String },
}
