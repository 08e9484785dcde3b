//! RINEX filename decoding.
//!
//! Classifies a filename as a RINEX long (version 3) or short (version 2)
//! name and derives the record kind, cadence, nominal start time and site
//! marker from it. Decoding is a pure function of the name.
//!
//! Example names:
//!
//! ```text
//! ALIC00AUS_R_20161280000_01D_30S_MO.rnx   long, sample rate present
//! EDSV00AUS_R_20161280000_01D_EN.rnx       long, no sample rate
//! bula1280.16d                             short, daily (digit session)
//! alby028g.16n                             short, hourly (alpha hour a-x)
//! ALBY124V00.16d                           short, high rate (hour + minute)
//! ```

use crate::constants::{LONG_NAME_PATTERN, SHORT_NAME_PATTERN, TWO_DIGIT_YEAR_PIVOT};
use crate::error::{Result, RinexError};
use crate::models::{Cadence, Constellation, NamingConvention, RecordKind};
use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;

static LONG_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(LONG_NAME_PATTERN).expect("long name pattern compiles"));

static SHORT_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(SHORT_NAME_PATTERN).expect("short name pattern compiles"));

/// Everything a filename says about its file
#[derive(Debug, Clone, PartialEq)]
pub struct FilenameInfo {
    /// Basename, case preserved
    pub file_name: String,
    pub naming: NamingConvention,
    pub record_kind: RecordKind,
    pub cadence: Cadence,
    pub start_time: DateTime<Utc>,
    pub marker_name: String,
    /// Short `d` suffix or long `.crx` extension
    pub hatanaka_compressed: bool,
    pub constellation: Option<Constellation>,
    /// Long-name sample rate block, e.g. `30S`
    pub sampling: Option<String>,
    /// Long-name period count in cadence units, e.g. 5 for `05M`
    pub period_count: Option<u32>,
}

/// Decode a RINEX filename.
///
/// Accepts a bare name or a path; only the basename is decoded. Fails with
/// [`RinexError::InvalidFilename`] when the name matches neither grammar or
/// names a date that does not exist.
pub fn parse_filename(name: &str) -> Result<FilenameInfo> {
    let file_name = basename(name);
    let lowered = file_name.to_lowercase();

    let info = if LONG_NAME.is_match(&lowered) {
        parse_long_name(&file_name, &lowered)?
    } else if SHORT_NAME.is_match(&lowered) {
        parse_short_name(&file_name, &lowered)?
    } else {
        return Err(RinexError::invalid_filename(file_name));
    };

    debug!(
        "Decoded {:?} name {}: marker={}, kind={}, cadence={}, start={}",
        info.naming,
        info.file_name,
        info.marker_name,
        info.record_kind,
        info.cadence,
        info.start_time
    );

    Ok(info)
}

/// Whether a name follows either RINEX naming grammar
pub fn is_rinex_filename(name: &str) -> bool {
    let lowered = basename(name).to_lowercase();
    LONG_NAME.is_match(&lowered) || SHORT_NAME.is_match(&lowered)
}

fn basename(name: &str) -> String {
    Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(name)
        .to_string()
}

/// `SSSSMRCCC_R_YYYYDDDHHMM_PPU[_FFU]_CK.ext`
fn parse_long_name(file_name: &str, lowered: &str) -> Result<FilenameInfo> {
    let invalid = || RinexError::invalid_filename(file_name);

    let (stem, extension) = lowered.rsplit_once('.').ok_or_else(invalid)?;
    let parts: Vec<&str> = stem.split('_').collect();

    let marker_name = stem[..4].to_uppercase();

    // Constellation letter then kind letter, e.g. "mo"
    let kind_token = parts.last().ok_or_else(invalid)?;
    let mut kind_chars = kind_token.chars();
    let constellation = kind_chars.next().and_then(Constellation::from_code);
    let record_kind = kind_chars
        .next_back()
        .and_then(RecordKind::from_code)
        .ok_or_else(invalid)?;

    let period = parts.get(3).ok_or_else(invalid)?;
    let cadence = period
        .chars()
        .last()
        .and_then(Cadence::from_unit)
        .ok_or_else(invalid)?;
    // `00` carries no span, fall back to the nominal cadence period
    let period_count = period
        .get(..2)
        .and_then(|count| count.parse::<u32>().ok())
        .filter(|&count| count > 0);

    let date_time = parts.get(2).ok_or_else(invalid)?;
    let start_time = long_name_start(date_time).ok_or_else(invalid)?;

    let sampling = if parts.len() == 6 {
        Some(parts[4].to_uppercase())
    } else {
        None
    };

    Ok(FilenameInfo {
        file_name: file_name.to_string(),
        naming: NamingConvention::Long,
        record_kind,
        cadence,
        start_time,
        marker_name,
        // Compact RINEX only exists for observation data
        hatanaka_compressed: extension == "crx" && record_kind == RecordKind::Observation,
        constellation,
        sampling,
        period_count,
    })
}

/// `YYYYDDDHHMM`
fn long_name_start(block: &str) -> Option<DateTime<Utc>> {
    let year = block.get(0..4)?.parse().ok()?;
    let day = block.get(4..7)?.parse().ok()?;
    let hour = block.get(7..9)?.parse().ok()?;
    let minute = block.get(9..11)?.parse().ok()?;
    start_time(year, day, hour, minute)
}

/// `ssssdddh[mm].yyt`
fn parse_short_name(file_name: &str, lowered: &str) -> Result<FilenameInfo> {
    let invalid = || RinexError::invalid_filename(file_name);

    let (stem, extension) = lowered.split_once('.').ok_or_else(invalid)?;
    let marker_name = stem[..4].to_uppercase();
    let day: u32 = stem[4..7].parse().map_err(|_| invalid())?;

    let session = stem.as_bytes()[7];
    let (cadence, hour, minute) = if session.is_ascii_digit() {
        // Numbered session: the file covers the whole day
        (Cadence::Daily, 0, 0)
    } else {
        // a-x encodes hours 0-23
        let hour = u32::from(session - b'a');
        match stem.get(8..10) {
            Some(minutes) => {
                let minute: u32 = minutes.parse().map_err(|_| invalid())?;
                (Cadence::HighRate, hour, minute)
            }
            None => (Cadence::Hourly, hour, 0),
        }
    };

    let two_digit_year: i32 = extension[..2].parse().map_err(|_| invalid())?;
    let year = if two_digit_year < TWO_DIGIT_YEAR_PIVOT {
        2000 + two_digit_year
    } else {
        1900 + two_digit_year
    };

    let (record_kind, hatanaka_compressed, constellation) = match extension.as_bytes()[2] {
        b'o' => (RecordKind::Observation, false, None),
        b'd' => (RecordKind::Observation, true, None),
        b'n' => (RecordKind::Navigation, false, Some(Constellation::Gps)),
        b'g' => (RecordKind::Navigation, false, Some(Constellation::Glonass)),
        b'm' => (RecordKind::Meteorological, false, None),
        _ => return Err(invalid()),
    };

    let start_time = start_time(year, day, hour, minute).ok_or_else(invalid)?;

    Ok(FilenameInfo {
        file_name: file_name.to_string(),
        naming: NamingConvention::Short,
        record_kind,
        cadence,
        start_time,
        marker_name,
        hatanaka_compressed,
        constellation,
        sampling: None,
        period_count: None,
    })
}

/// Build a UTC instant from year, day of year, hour and minute.
/// `None` if any component is out of range.
fn start_time(year: i32, day_of_year: u32, hour: u32, minute: u32) -> Option<DateTime<Utc>> {
    NaiveDate::from_yo_opt(year, day_of_year)?
        .and_hms_opt(hour, minute, 0)
        .map(|dt| dt.and_utc())
}
