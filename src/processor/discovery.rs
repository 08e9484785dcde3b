//! File discovery for RINEX scans
//!
//! Expands the inputs given to a scan (files, directories, glob patterns)
//! into a sorted list of files and counts the distinct sites among them.

use crate::config::ScanConfig;
use crate::error::{Result, RinexError};
use crate::filename::{is_rinex_filename, parse_filename};
use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// File discovery component for RINEX scans
#[derive(Debug)]
pub struct FileDiscovery {
    inputs: Vec<String>,
    recursive: bool,
    follow_links: bool,
    site_count: usize,
    skipped: usize,
}

impl FileDiscovery {
    /// Create a new file discovery instance
    pub fn new(inputs: Vec<String>, config: &ScanConfig) -> Self {
        Self {
            inputs,
            recursive: config.recursive,
            follow_links: config.follow_links,
            site_count: 0,
            skipped: 0,
        }
    }

    /// Distinct four character markers among the discovered RINEX names
    pub fn site_count(&self) -> usize {
        self.site_count
    }

    /// Directory entries passed over because they are not RINEX names
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Expand every input into files.
    ///
    /// - an existing file is always included, whatever its name;
    /// - a directory contributes the RINEX-named files inside it, and
    ///   those of its subdirectories when scanning recursively;
    /// - anything else is treated as a glob pattern and contributes every
    ///   file it matches.
    pub fn discover_files(&mut self) -> Result<Vec<PathBuf>> {
        let mut files = BTreeSet::new();
        self.skipped = 0;

        for input in &self.inputs {
            let path = Path::new(input);

            if path.is_file() {
                files.insert(path.to_path_buf());
            } else if path.is_dir() {
                let (found, skipped) = self.discover_directory(path)?;
                self.skipped += skipped;
                files.extend(found);
            } else {
                files.extend(discover_pattern(input)?);
            }
        }

        let sites: HashSet<String> = files
            .iter()
            .filter_map(|path| path.file_name().and_then(|n| n.to_str()))
            .filter_map(|name| parse_filename(name).ok())
            .map(|info| info.marker_name)
            .collect();
        self.site_count = sites.len();

        debug!(
            "Found {} files from {} sites ({} non-RINEX entries skipped)",
            files.len(),
            self.site_count,
            self.skipped
        );

        Ok(files.into_iter().collect())
    }

    /// RINEX-named files in a directory, plus the count of entries passed over
    fn discover_directory(&self, dir: &Path) -> Result<(Vec<PathBuf>, usize)> {
        let max_depth = if self.recursive { usize::MAX } else { 1 };
        let mut files = Vec::new();
        let mut skipped = 0;

        debug!("Searching for RINEX files in: {}", dir.display());

        for entry in WalkDir::new(dir)
            .max_depth(max_depth)
            .follow_links(self.follow_links)
        {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(dir).to_path_buf();
                RinexError::io(path, std::io::Error::other(e.to_string()))
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            let is_rinex = entry.file_name().to_str().is_some_and(is_rinex_filename);
            if is_rinex {
                files.push(entry.into_path());
            } else {
                skipped += 1;
            }
        }

        Ok((files, skipped))
    }
}

/// Files matched by a glob pattern.
///
/// A pattern with no wildcard that matches nothing names a missing file.
fn discover_pattern(pattern: &str) -> Result<Vec<PathBuf>> {
    let entries = glob::glob(pattern).map_err(|e| RinexError::pattern(pattern, e))?;

    let mut files = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(_) => {}
            Err(e) => warn!("Could not read {}: {}", e.path().display(), e),
        }
    }

    if files.is_empty() && !has_wildcard(pattern) {
        return Err(RinexError::io(
            pattern,
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file or directory"),
        ));
    }

    Ok(files)
}

fn has_wildcard(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}
