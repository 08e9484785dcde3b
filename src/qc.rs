//! Values quality-check tooling derives from a parsed file.
//!
//! The checker is configured with a time window, a site code and the data
//! body; results are stored under a key built from the same metadata.

use crate::constants::{KEY_TIME_FORMAT, QC_TIME_FORMAT};
use crate::models::ParsedFile;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// Inclusive time span a quality check should cover
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QcWindow {
    pub begin: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl QcWindow {
    /// Window from the file's start time through the last second of its period
    pub fn for_file(parsed: &ParsedFile) -> Self {
        let begin = parsed.start_time();
        let end = begin + parsed.period() - Duration::seconds(1);
        Self { begin, end }
    }

    pub fn begin_string(&self) -> String {
        self.begin.format(QC_TIME_FORMAT).to_string()
    }

    pub fn end_string(&self) -> String {
        self.end.format(QC_TIME_FORMAT).to_string()
    }
}

impl ParsedFile {
    /// Identifier for persisting results: marker, start time and kind letter,
    /// e.g. `ALIC20161280000O`
    pub fn storage_key(&self) -> String {
        format!(
            "{}{}{}",
            self.marker_name(),
            self.start_time().format(KEY_TIME_FORMAT),
            self.record_kind().code()
        )
    }

    /// Whether the body must be Hatanaka-decompressed before use
    pub fn needs_decompression(&self) -> bool {
        self.is_hatanaka_compressed()
    }

    pub fn qc_window(&self) -> QcWindow {
        QcWindow::for_file(self)
    }
}
