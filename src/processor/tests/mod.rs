//! Integration tests for the processor module
//!
//! Tests the complete scan pipeline over temporary directories of RINEX
//! files.


use crate::fixtures::{meteorological_header, navigation_header, observation_header, with_body};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Helper to create a directory holding one valid file of each kind
pub fn create_rinex_dir(temp_dir: &TempDir) -> PathBuf {
    let dir = temp_dir.path().join("rinex");
    fs::create_dir_all(&dir).unwrap();

    write_file(&dir, "ALIC00AUS_R_20161280000_01D_30S_MO.rnx", &observation_header());
    write_file(&dir, "bula1280.16d", &observation_header());
    write_file(&dir, "alby028g.16n", &navigation_header());
    write_file(&dir, "alic1280.16m", &meteorological_header());

    dir
}

/// Write a header plus a short body under `name`
pub fn write_file(dir: &Path, name: &str, header: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, with_body(header)).unwrap();
    path
}
