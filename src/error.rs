//! Error handling for RINEX decoding operations.
//!
//! The first three variants are the decoding taxonomy surfaced by the
//! filename and header decoders. The remaining variants belong to the
//! scanner and CLI layers that read files from disk.

use crate::models::RecordKind;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RinexError {
    #[error("Filename does not match RINEX formatting: {file_name}")]
    InvalidFilename { file_name: String },

    #[error("Header of {record_kind} file is missing required field: {label}")]
    HeaderMissingField {
        label: String,
        record_kind: RecordKind,
    },

    #[error("Could not convert header field '{label}' to expected type: '{value}'")]
    HeaderFieldTypeError { label: String, value: String },

    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid file pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Processing interrupted: {reason}")]
    Interrupted { reason: String },
}

impl RinexError {
    /// Create an invalid filename error
    pub fn invalid_filename(file_name: impl Into<String>) -> Self {
        Self::InvalidFilename {
            file_name: file_name.into(),
        }
    }

    /// Create a missing header field error
    pub fn missing_field(label: impl Into<String>, record_kind: RecordKind) -> Self {
        Self::HeaderMissingField {
            label: label.into(),
            record_kind,
        }
    }

    /// Create a header field type error
    pub fn field_type(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self::HeaderFieldTypeError {
            label: label.into(),
            value: value.into(),
        }
    }

    /// Create an I/O error tied to a path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid glob pattern error
    pub fn pattern(pattern: impl Into<String>, source: glob::PatternError) -> Self {
        Self::Pattern {
            pattern: pattern.into(),
            message: source.to_string(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a processing interrupted error
    pub fn interrupted(reason: impl Into<String>) -> Self {
        Self::Interrupted {
            reason: reason.into(),
        }
    }

    /// Whether this error came from decoding a file's name or content,
    /// as opposed to reading it
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidFilename { .. }
                | Self::HeaderMissingField { .. }
                | Self::HeaderFieldTypeError { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, RinexError>;
