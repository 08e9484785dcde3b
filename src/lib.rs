//! RINEX QC Library
//!
//! Decodes the metadata a GNSS quality-check pipeline needs from RINEX files:
//! the station, start time, record kind and cadence encoded in the file name,
//! and the receiver, antenna and sensor details recorded in the file header.
//!
//! This library provides tools for:
//! - Parsing long (RINEX 3) and short (RINEX 2) file names
//! - Extracting labelled fields from the fixed-column header
//! - Locating the header and body sections inside the raw file bytes
//! - Deriving quality-check windows and storage keys
//! - Scanning directories of files with bounded concurrency

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod filename;
pub mod header;
pub mod models;
pub mod processor;
pub mod qc;
pub mod report;
pub mod rinex;

#[cfg(test)]
mod fixtures;

// Re-export commonly used types
pub use config::ScanConfig;
pub use error::{Result, RinexError};
pub use filename::{FilenameInfo, is_rinex_filename, parse_filename};
pub use header::{HeaderFields, parse_header};
pub use models::{
    Cadence, Constellation, KindHeader, MeteorologicalHeader, NamingConvention,
    ObservationHeader, ParsedFile, RecordKind,
};
pub use processor::{RinexScanner, ScanReport};
pub use qc::QcWindow;
pub use rinex::parse_rinex;
