//! RINEX format constants
//!
//! Header labels, fixed column layout and scanner defaults used throughout
//! the crate.

// =============================================================================
// Header Layout
// =============================================================================

/// Literal that ends the header section
pub const HEADER_TERMINATOR: &str = "END OF HEADER";

/// Label reported when the terminator itself is missing
pub const TERMINATOR_LABEL: &str = "terminator";

/// Columns 1-60 of every header line hold the value, the rest hold the label
pub const HEADER_VALUE_WIDTH: usize = 60;

/// Header record labels
pub mod labels {
    pub const VERSION_TYPE: &str = "RINEX VERSION / TYPE";
    pub const MARKER_NUMBER: &str = "MARKER NUMBER";
    pub const RECEIVER: &str = "REC # / TYPE / VERS";
    pub const ANTENNA: &str = "ANT # / TYPE";
    pub const ANTENNA_DELTA: &str = "ANTENNA: DELTA H/E/N";
    pub const SENSOR_TYPE: &str = "SENSOR MOD/TYPE/ACC";
    pub const SENSOR_POSITION: &str = "SENSOR POS XYZ/H";
}

/// Column ranges within the concatenated value of a header record
pub mod columns {
    use std::ops::Range;

    pub const VERSION: Range<usize> = 0..20;
    pub const FILE_TYPE: Range<usize> = 20..21;
    pub const MARKER_NUMBER: Range<usize> = 0..20;

    pub const RECEIVER_NUMBER: Range<usize> = 0..20;
    pub const RECEIVER_TYPE: Range<usize> = 20..40;
    pub const RECEIVER_VERSION: Range<usize> = 40..60;

    pub const ANTENNA_NUMBER: Range<usize> = 0..20;
    pub const ANTENNA_TYPE: Range<usize> = 20..40;

    pub const DELTA_HEIGHT: Range<usize> = 0..14;
    pub const DELTA_EAST: Range<usize> = 14..28;
    pub const DELTA_NORTH: Range<usize> = 28..42;

    pub const SENSOR_TYPE: Range<usize> = 0..40;
    pub const SENSOR_HEIGHT: Range<usize> = 42..56;
}

// =============================================================================
// Filename Grammar
// =============================================================================

/// Long (RINEX 3) filename, matched against the lower-cased name.
/// ASCII only, so every matched name can be sliced by byte offset.
pub const LONG_NAME_PATTERN: &str =
    r"^[a-z0-9]{9}_r_[0-9]{11}_[0-9]{2}[dhm]_([0-9]{2}[a-z]_)?[megjr][mon]\.[cr][rn]x$";

/// Short (RINEX 2) filename, matched against the lower-cased name
pub const SHORT_NAME_PATTERN: &str =
    r"^[a-z0-9]{4}[0-9]{3}[a-x0-9]([0-9]{2})?\.[0-9]{2}[gndmo]$";

/// Two-digit years below this pivot belong to the 2000s
pub const TWO_DIGIT_YEAR_PIVOT: i32 = 69;

/// Format of the time stamps handed to quality-check tooling
pub const QC_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Time stamp format embedded in storage keys (year, day of year, hour, minute)
pub const KEY_TIME_FORMAT: &str = "%Y%j%H%M";

// =============================================================================
// Scanner Defaults
// =============================================================================

/// Default upper bound on files read and parsed at once
pub const DEFAULT_MAX_CONCURRENT_FILES: usize = 16;

/// Files larger than this are not read
pub const DEFAULT_MAX_FILE_SIZE_BYTES: u64 = 512 * 1024 * 1024; // 512MB

/// Progress bar template for scans
pub const PROGRESS_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}";
