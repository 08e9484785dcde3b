//! Configuration for scanning RINEX files.
//!
//! Controls how input paths are expanded into files and how many files are
//! read and parsed at once.

use crate::constants::{DEFAULT_MAX_CONCURRENT_FILES, DEFAULT_MAX_FILE_SIZE_BYTES};
use crate::error::{Result, RinexError};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Global configuration for a scan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Threads available to the runtime for blocking parse work
    pub workers: usize,

    /// Maximum files read and parsed concurrently
    pub max_concurrent_files: usize,

    /// Descend into subdirectories of directory inputs
    pub recursive: bool,

    /// Follow symbolic links while walking directories
    pub follow_links: bool,

    /// Stop at the first file that fails to parse
    pub fail_fast: bool,

    /// Skip files larger than this many bytes
    pub max_file_size: u64,

    /// Show a progress bar while scanning
    pub show_progress: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            workers: num_cpus::get(),
            max_concurrent_files: DEFAULT_MAX_CONCURRENT_FILES,
            recursive: false,
            follow_links: false,
            fail_fast: false,
            max_file_size: DEFAULT_MAX_FILE_SIZE_BYTES,
            show_progress: true,
        }
    }
}

impl ScanConfig {
    /// Create configuration with custom worker count
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Set maximum concurrent files
    pub fn with_max_concurrent_files(mut self, max_files: usize) -> Self {
        self.max_concurrent_files = max_files;
        self
    }

    /// Enable recursive directory traversal
    pub fn with_recursive(mut self) -> Self {
        self.recursive = true;
        self
    }

    /// Follow symbolic links during traversal
    pub fn with_follow_links(mut self) -> Self {
        self.follow_links = true;
        self
    }

    /// Stop on the first failure
    pub fn with_fail_fast(mut self) -> Self {
        self.fail_fast = true;
        self
    }

    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }

    /// Disable the progress bar (tests, JSON output)
    pub fn without_progress(mut self) -> Self {
        self.show_progress = false;
        self
    }

    /// Reject settings the scanner cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(RinexError::configuration("workers must be at least 1"));
        }
        if self.max_concurrent_files == 0 {
            return Err(RinexError::configuration(
                "max_concurrent_files must be at least 1",
            ));
        }
        if self.max_file_size == 0 {
            return Err(RinexError::configuration("max_file_size must be non-zero"));
        }

        debug!(
            "Scan configuration: workers={}, max_concurrent_files={}, recursive={}",
            self.workers, self.max_concurrent_files, self.recursive
        );
        Ok(())
    }
}
