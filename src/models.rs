//! Core data structures and types for RINEX decoding.
//!
//! Defines record kinds, file cadences, the kind-specific header structures
//! and the immutable [`ParsedFile`] produced by a successful parse.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use std::path::PathBuf;

/// Type of data carried by a RINEX file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Observation,
    Navigation,
    Meteorological,
}

impl RecordKind {
    /// Map a RINEX type letter (`o`, `n`, `m`, either case) to a record kind
    pub fn from_code(code: char) -> Option<Self> {
        match code.to_ascii_lowercase() {
            'o' => Some(RecordKind::Observation),
            'n' => Some(RecordKind::Navigation),
            'm' => Some(RecordKind::Meteorological),
            _ => None,
        }
    }

    /// Upper-case type letter used in identifiers
    pub fn code(&self) -> char {
        match self {
            RecordKind::Observation => 'O',
            RecordKind::Navigation => 'N',
            RecordKind::Meteorological => 'M',
        }
    }

    /// Whether the header must carry a `MARKER NUMBER` record
    pub fn requires_marker_number(&self) -> bool {
        matches!(
            self,
            RecordKind::Observation | RecordKind::Meteorological
        )
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordKind::Observation => "observation",
            RecordKind::Navigation => "navigation",
            RecordKind::Meteorological => "meteorological",
        };
        f.write_str(name)
    }
}

/// Batching granularity implied by a filename
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cadence {
    Daily,
    Hourly,
    HighRate,
}

impl Cadence {
    /// Map a long-name period unit (`d`, `h`, `m`) to a cadence
    pub fn from_unit(unit: char) -> Option<Self> {
        match unit.to_ascii_lowercase() {
            'd' => Some(Cadence::Daily),
            'h' => Some(Cadence::Hourly),
            'm' => Some(Cadence::HighRate),
            _ => None,
        }
    }

    /// Nominal span of data covered by one file of this cadence
    pub fn period(&self) -> Duration {
        match self {
            Cadence::Daily => Duration::days(1),
            Cadence::Hourly => Duration::hours(1),
            Cadence::HighRate => Duration::minutes(15),
        }
    }

    /// Length of one period unit in a long filename (`D`, `H` or `M`)
    pub fn unit(&self) -> Duration {
        match self {
            Cadence::Daily => Duration::days(1),
            Cadence::Hourly => Duration::hours(1),
            Cadence::HighRate => Duration::minutes(1),
        }
    }
}

impl fmt::Display for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Cadence::Daily => "daily",
            Cadence::Hourly => "hourly",
            Cadence::HighRate => "highrate",
        };
        f.write_str(name)
    }
}

/// Which of the two RINEX naming grammars a filename follows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamingConvention {
    /// RINEX 3 style, e.g. `ALIC00AUS_R_20161280000_01D_30S_MO.rnx`
    Long,
    /// RINEX 2 style, e.g. `bula1280.16d`
    Short,
}

/// Satellite system named by a filename
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Constellation {
    Mixed,
    Gps,
    Glonass,
    Galileo,
    Qzss,
}

impl Constellation {
    pub fn from_code(code: char) -> Option<Self> {
        match code.to_ascii_lowercase() {
            'm' => Some(Constellation::Mixed),
            'g' => Some(Constellation::Gps),
            'r' => Some(Constellation::Glonass),
            'e' => Some(Constellation::Galileo),
            'j' => Some(Constellation::Qzss),
            _ => None,
        }
    }
}

/// Receiver and antenna details required in observation headers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationHeader {
    pub receiver_number: String,
    pub receiver_type: String,
    pub receiver_version: String,
    pub antenna_number: String,
    pub antenna_type: String,
    /// Antenna height above marker, meters
    pub antenna_height: f64,
    /// Eccentricity east, meters
    pub antenna_east: f64,
    /// Eccentricity north, meters
    pub antenna_north: f64,
}

/// Sensor details required in meteorological headers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeteorologicalHeader {
    pub sensor_type: String,
    /// Sensor height, meters
    pub sensor_height: f64,
}

/// Header fields that only exist for one record kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum KindHeader {
    Observation(ObservationHeader),
    Navigation,
    Meteorological(MeteorologicalHeader),
}

impl KindHeader {
    pub fn record_kind(&self) -> RecordKind {
        match self {
            KindHeader::Observation(_) => RecordKind::Observation,
            KindHeader::Navigation => RecordKind::Navigation,
            KindHeader::Meteorological(_) => RecordKind::Meteorological,
        }
    }
}

/// Metadata recovered from a RINEX file's name and header.
///
/// Built once by [`crate::parse_rinex`]; there is no way to construct a
/// partially populated value or to mutate one afterwards. The byte ranges
/// index into the buffer the file was parsed from, which the parser does
/// not keep.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedFile {
    pub(crate) file_name: String,
    pub(crate) naming: NamingConvention,
    pub(crate) record_kind: RecordKind,
    pub(crate) cadence: Cadence,
    pub(crate) start_time: DateTime<Utc>,
    pub(crate) marker_name: String,
    pub(crate) hatanaka_compressed: bool,
    pub(crate) constellation: Option<Constellation>,
    pub(crate) sampling: Option<String>,
    pub(crate) period_count: Option<u32>,
    pub(crate) version: f64,
    pub(crate) marker_number: Option<String>,
    pub(crate) header: KindHeader,
    pub(crate) header_bytes: Range<usize>,
    pub(crate) body_bytes: Range<usize>,
}

impl ParsedFile {
    /// Basename of the source file, case preserved
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn naming(&self) -> NamingConvention {
        self.naming
    }

    pub fn record_kind(&self) -> RecordKind {
        self.record_kind
    }

    pub fn cadence(&self) -> Cadence {
        self.cadence
    }

    /// Nominal first epoch, taken from the filename
    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    /// Four character upper-case site code
    pub fn marker_name(&self) -> &str {
        &self.marker_name
    }

    /// Whether the content is Hatanaka (compact RINEX) compressed
    pub fn is_hatanaka_compressed(&self) -> bool {
        self.hatanaka_compressed
    }

    pub fn constellation(&self) -> Option<Constellation> {
        self.constellation
    }

    /// Sample-rate block of a long filename, e.g. `30S`
    pub fn sampling(&self) -> Option<&str> {
        self.sampling.as_deref()
    }

    /// Span of data the file covers.
    ///
    /// Long names state it (`05M`, `01H`, `02D`); short names get the
    /// nominal period of their cadence.
    pub fn period(&self) -> Duration {
        match self.period_count {
            Some(count) => self.cadence.unit() * count as i32,
            None => self.cadence.period(),
        }
    }

    /// RINEX format version from the header
    pub fn version(&self) -> f64 {
        self.version
    }

    /// Site DOMES number, present for observation and meteorological files
    pub fn marker_number(&self) -> Option<&str> {
        self.marker_number.as_deref()
    }

    pub fn kind_header(&self) -> &KindHeader {
        &self.header
    }

    pub fn observation(&self) -> Option<&ObservationHeader> {
        match &self.header {
            KindHeader::Observation(obs) => Some(obs),
            _ => None,
        }
    }

    pub fn meteorological(&self) -> Option<&MeteorologicalHeader> {
        match &self.header {
            KindHeader::Meteorological(met) => Some(met),
            _ => None,
        }
    }

    /// Byte range of the header, terminator line included
    pub fn header_bytes(&self) -> Range<usize> {
        self.header_bytes.clone()
    }

    /// Byte range of everything after the header
    pub fn body_bytes(&self) -> Range<usize> {
        self.body_bytes.clone()
    }

    /// Resolve the header range against the buffer this file was parsed from
    pub fn header_slice<'a>(&self, data: &'a [u8]) -> Option<&'a [u8]> {
        data.get(self.header_bytes.clone())
    }

    /// Resolve the body range against the buffer this file was parsed from
    pub fn body_slice<'a>(&self, data: &'a [u8]) -> Option<&'a [u8]> {
        data.get(self.body_bytes.clone())
    }
}

/// Statistics for one scan over a set of files
#[derive(Debug, Default, Clone, Serialize)]
pub struct ScanStats {
    pub files_discovered: usize,
    pub files_parsed: usize,
    pub files_failed: usize,
    pub observation_files: usize,
    pub navigation_files: usize,
    pub meteorological_files: usize,
    pub compressed_files: usize,
    pub bytes_read: u64,
    pub processing_time_ms: u128,
}

impl ScanStats {
    /// Count a successfully parsed file
    pub fn record_parsed(&mut self, parsed: &ParsedFile, bytes: u64) {
        self.files_parsed += 1;
        self.bytes_read += bytes;
        match parsed.record_kind() {
            RecordKind::Observation => self.observation_files += 1,
            RecordKind::Navigation => self.navigation_files += 1,
            RecordKind::Meteorological => self.meteorological_files += 1,
        }
        if parsed.is_hatanaka_compressed() {
            self.compressed_files += 1;
        }
    }

    pub fn record_failed(&mut self) {
        self.files_failed += 1;
    }
}

/// One parsed file from a scan, with where it came from
#[derive(Debug, Clone, Serialize)]
pub struct ScanEntry {
    pub path: PathBuf,
    pub parsed: ParsedFile,
}

/// One file a scan could not parse
#[derive(Debug, Clone, Serialize)]
pub struct ScanFailure {
    pub path: PathBuf,
    pub error: String,
}
