//! Batch scanning engine.
//!
//! Discovers RINEX files, reads them, and decodes each name and header
//! with bounded concurrency. Per-file failures are collected rather than
//! aborting the scan unless fail-fast is configured.

pub mod discovery;

#[cfg(test)]
pub mod tests;

use self::discovery::FileDiscovery;

use crate::config::ScanConfig;
use crate::constants::PROGRESS_TEMPLATE;
use crate::error::{Result, RinexError};
use crate::filename::parse_filename;
use crate::models::{ParsedFile, ScanEntry, ScanFailure, ScanStats};
use crate::rinex::parse_rinex;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Instant;
use tokio::fs;
use tokio::task;
use tracing::{debug, info, warn};

/// Outcome of scanning a set of inputs
#[derive(Debug, Default)]
pub struct ScanReport {
    /// Successfully parsed files, ordered by path
    pub entries: Vec<ScanEntry>,
    /// Files that could not be read or decoded, ordered by path
    pub failures: Vec<ScanFailure>,
    pub stats: ScanStats,
    /// Distinct site markers among discovered files
    pub site_count: usize,
}

impl ScanReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Main scanner for RINEX inputs
#[derive(Debug)]
pub struct RinexScanner {
    config: ScanConfig,
    file_discovery: FileDiscovery,
}

impl RinexScanner {
    /// Create a scanner over files, directories or glob patterns
    pub fn new(inputs: Vec<String>, config: ScanConfig) -> Result<Self> {
        if inputs.is_empty() {
            return Err(RinexError::configuration("no input paths given"));
        }
        config.validate()?;

        Ok(Self {
            file_discovery: FileDiscovery::new(inputs, &config),
            config,
        })
    }

    /// Main scanning entry point
    pub async fn scan(&mut self) -> Result<ScanReport> {
        let start_time = Instant::now();

        let files = self.file_discovery.discover_files()?;
        info!(
            "Found {} files from {} sites",
            files.len(),
            self.file_discovery.site_count()
        );

        let mut report = ScanReport {
            site_count: self.file_discovery.site_count(),
            ..ScanReport::default()
        };
        report.stats.files_discovered = files.len();

        if files.is_empty() {
            report.stats.processing_time_ms = start_time.elapsed().as_millis();
            return Ok(report);
        }

        let pb = if self.config.show_progress {
            let pb = ProgressBar::new(files.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template(PROGRESS_TEMPLATE)
                    .map_err(|e| RinexError::configuration(e.to_string()))?
                    .progress_chars("#>-"),
            );
            pb
        } else {
            ProgressBar::hidden()
        };

        let max_file_size = self.config.max_file_size;

        // At most max_concurrent_files reads and parses in flight
        let mut outcomes = stream::iter(files)
            .map(|path| async move {
                let outcome = scan_file(&path, max_file_size).await;
                (path, outcome)
            })
            .buffer_unordered(self.config.max_concurrent_files);

        while let Some((path, outcome)) = outcomes.next().await {
            pb.inc(1);
            match outcome {
                Ok((parsed, bytes)) => {
                    report.stats.record_parsed(&parsed, bytes);
                    report.entries.push(ScanEntry { path, parsed });
                }
                Err(error) => {
                    warn!("Failed to parse {}: {}", path.display(), error);
                    report.stats.record_failed();

                    if self.config.fail_fast {
                        pb.abandon_with_message("Stopped at first failure");
                        return Err(error);
                    }
                    report.failures.push(ScanFailure {
                        path,
                        error: error.to_string(),
                    });
                }
            }
        }

        pb.finish_with_message("All files scanned");

        report.entries.sort_by(|a, b| a.path.cmp(&b.path));
        report.failures.sort_by(|a, b| a.path.cmp(&b.path));
        report.stats.processing_time_ms = start_time.elapsed().as_millis();

        debug!(
            "Scan finished: {} parsed, {} failed in {}ms",
            report.stats.files_parsed, report.stats.files_failed, report.stats.processing_time_ms
        );

        Ok(report)
    }
}

/// Read one file and decode it, returning the parsed metadata and file size
async fn scan_file(path: &Path, max_file_size: u64) -> Result<(ParsedFile, u64)> {
    let file_name = file_name_of(path);

    // Reject bad names before touching the file
    parse_filename(&file_name)?;

    let size = fs::metadata(path)
        .await
        .map_err(|e| RinexError::io(path, e))?
        .len();
    if size > max_file_size {
        return Err(RinexError::io(
            path,
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("file is {} bytes, limit is {}", size, max_file_size),
            ),
        ));
    }

    let data = fs::read(path).await.map_err(|e| RinexError::io(path, e))?;
    let bytes = data.len() as u64;

    let parsed = task::spawn_blocking(move || parse_rinex(&file_name, &data))
        .await
        .map_err(|e| RinexError::interrupted(format!("parse task failed: {}", e)))??;

    Ok((parsed, bytes))
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
