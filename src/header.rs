//! RINEX header decoding and typed field extraction.
//!
//! A RINEX header is a block of 80-column text lines. Columns 1-60 carry
//! the value and columns 61-80 carry a label naming the record. The block
//! ends at the `END OF HEADER` line; everything after it is the body,
//! which is left untouched.

use crate::constants::{HEADER_TERMINATOR, HEADER_VALUE_WIDTH, TERMINATOR_LABEL, columns, labels};
use crate::error::{Result, RinexError};
use crate::models::{KindHeader, MeteorologicalHeader, ObservationHeader, RecordKind};
use std::collections::HashMap;
use std::ops::Range;
use tracing::{debug, warn};

/// Typed header content for one file
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedHeader {
    pub version: f64,
    pub marker_number: Option<String>,
    pub kind: KindHeader,
    /// Start of file through the terminator line, newline included
    pub header_bytes: Range<usize>,
    pub body_bytes: Range<usize>,
}

/// Decode the header of `data` for a file of the given kind.
///
/// Fails with [`RinexError::HeaderMissingField`] when the terminator or a
/// label required for `record_kind` is absent, and with
/// [`RinexError::HeaderFieldTypeError`] when a numeric field does not parse.
pub fn parse_header(data: &[u8], record_kind: RecordKind) -> Result<DecodedHeader> {
    let (header_bytes, body_bytes) = split_header(data)
        .ok_or_else(|| RinexError::missing_field(TERMINATOR_LABEL, record_kind))?;

    let fields = HeaderFields::from_bytes(&data[header_bytes.clone()]);

    let version = fields.float(labels::VERSION_TYPE, columns::VERSION, record_kind)?;
    check_file_type(&fields, record_kind);

    let marker_number = if record_kind.requires_marker_number() {
        Some(fields.text(labels::MARKER_NUMBER, columns::MARKER_NUMBER, record_kind)?)
    } else {
        None
    };

    let kind = match record_kind {
        RecordKind::Observation => KindHeader::Observation(observation_header(&fields)?),
        RecordKind::Navigation => KindHeader::Navigation,
        RecordKind::Meteorological => KindHeader::Meteorological(meteorological_header(&fields)?),
    };

    debug!(
        "Parsed {} header: version={}, {} labels, header={:?}, body={:?}",
        record_kind,
        version,
        fields.len(),
        header_bytes,
        body_bytes
    );

    Ok(DecodedHeader {
        version,
        marker_number,
        kind,
        header_bytes,
        body_bytes,
    })
}

/// Locate the header terminator and split `data` into header and body ranges.
///
/// The header range runs through the end of the terminator line. Returns
/// `None` when the terminator does not occur.
pub fn split_header(data: &[u8]) -> Option<(Range<usize>, Range<usize>)> {
    let terminator = HEADER_TERMINATOR.as_bytes();
    let found = data
        .windows(terminator.len())
        .position(|window| window == terminator)?;

    let after = found + terminator.len();
    let end = match data[after..].iter().position(|&b| b == b'\n') {
        Some(offset) => after + offset + 1,
        None => data.len(),
    };

    Some((0..end, end..data.len()))
}

fn observation_header(fields: &HeaderFields) -> Result<ObservationHeader> {
    let kind = RecordKind::Observation;

    let receiver = fields.require(labels::RECEIVER, kind)?;
    let antenna = fields.require(labels::ANTENNA, kind)?;
    let delta = fields.require(labels::ANTENNA_DELTA, kind)?;

    Ok(ObservationHeader {
        receiver_number: collapse_whitespace(column(&receiver, columns::RECEIVER_NUMBER)),
        receiver_type: collapse_whitespace(column(&receiver, columns::RECEIVER_TYPE)),
        receiver_version: collapse_whitespace(column(&receiver, columns::RECEIVER_VERSION)),
        antenna_number: collapse_whitespace(column(&antenna, columns::ANTENNA_NUMBER)),
        // Model and radome are column positioned, keep the inner spacing
        antenna_type: column(&antenna, columns::ANTENNA_TYPE).trim_end().to_string(),
        antenna_height: parse_float(labels::ANTENNA_DELTA, column(&delta, columns::DELTA_HEIGHT))?,
        antenna_east: parse_float(labels::ANTENNA_DELTA, column(&delta, columns::DELTA_EAST))?,
        antenna_north: parse_float(labels::ANTENNA_DELTA, column(&delta, columns::DELTA_NORTH))?,
    })
}

fn meteorological_header(fields: &HeaderFields) -> Result<MeteorologicalHeader> {
    let kind = RecordKind::Meteorological;

    // Repeated per sensor; the concatenation starts with the first one
    let sensor_type = fields.text(labels::SENSOR_TYPE, columns::SENSOR_TYPE, kind)?;
    let sensor_height = fields.float(labels::SENSOR_POSITION, columns::SENSOR_HEIGHT, kind)?;

    Ok(MeteorologicalHeader {
        sensor_type,
        sensor_height,
    })
}

/// Warn when the header's own file type letter disagrees with the filename
fn check_file_type(fields: &HeaderFields, record_kind: RecordKind) {
    let Some(value) = fields.value(labels::VERSION_TYPE) else {
        return;
    };

    let declared = match column(&value, columns::FILE_TYPE) {
        "O" => RecordKind::Observation,
        "M" => RecordKind::Meteorological,
        // GPS, GLONASS and SBAS navigation
        "N" | "G" | "H" => RecordKind::Navigation,
        _ => return,
    };

    if declared != record_kind {
        warn!(
            "Header declares {} data but filename indicates {}; using filename",
            declared, record_kind
        );
    }
}

/// Header values keyed by label.
///
/// Every physical line is kept; lines sharing a label are stored in file
/// order and concatenated on lookup. A label that never occurs is absent,
/// which is distinct from a label whose value is blank.
#[derive(Debug, Clone, Default)]
pub struct HeaderFields {
    fields: HashMap<String, Vec<String>>,
}

impl HeaderFields {
    /// Build the label map from the header section of a file
    pub fn from_bytes(header: &[u8]) -> Self {
        let mut fields = Self::default();
        for line in header.split(|&b| b == b'\n') {
            let line = line.strip_suffix(b"\r").unwrap_or(line);
            fields.parse_line(line);
        }
        fields
    }

    /// Split at character 60, the same unit [`column`] slices values in
    fn parse_line(&mut self, line: &[u8]) {
        let line = String::from_utf8_lossy(line);
        let (value, label) = line.split_at(char_offset(&line, HEADER_VALUE_WIDTH));

        self.fields
            .entry(collapse_whitespace(label))
            .or_default()
            .push(value.to_string());
    }

    /// Number of distinct labels
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.fields.contains_key(label)
    }

    /// The 60-column values of every line carrying `label`, in file order
    pub fn values(&self, label: &str) -> Option<&[String]> {
        self.fields.get(label).map(Vec::as_slice)
    }

    /// All values of `label` joined in file order
    pub fn value(&self, label: &str) -> Option<String> {
        self.values(label).map(|values| values.concat())
    }

    fn require(&self, label: &str, record_kind: RecordKind) -> Result<String> {
        self.value(label)
            .ok_or_else(|| RinexError::missing_field(label, record_kind))
    }

    /// Whitespace-collapsed text at `range` of a required label
    fn text(&self, label: &str, range: Range<usize>, record_kind: RecordKind) -> Result<String> {
        let value = self.require(label, record_kind)?;
        Ok(collapse_whitespace(column(&value, range)))
    }

    /// Float at `range` of a required label
    fn float(&self, label: &str, range: Range<usize>, record_kind: RecordKind) -> Result<f64> {
        let value = self.require(label, record_kind)?;
        parse_float(label, column(&value, range))
    }
}

/// Slice character columns out of a value, clamped to its length
fn column(value: &str, range: Range<usize>) -> &str {
    let start = char_offset(value, range.start);
    let end = char_offset(value, range.end).max(start);
    &value[start..end]
}

fn char_offset(value: &str, chars: usize) -> usize {
    value
        .char_indices()
        .nth(chars)
        .map_or(value.len(), |(offset, _)| offset)
}

fn parse_float(label: &str, raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| RinexError::field_type(label, raw))
}

fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{
        header_line, meteorological_header as met_fixture, navigation_header,
        observation_header as obs_fixture, with_body, without_label,
    };

    #[test]
    fn test_observation_header() {
        let data = with_body(&obs_fixture());
        let header = parse_header(data.as_bytes(), RecordKind::Observation).unwrap();

        assert_eq!(header.version, 2.11);
        assert_eq!(header.marker_number.as_deref(), Some("50137M001"));

        let KindHeader::Observation(obs) = header.kind else {
            panic!("Expected observation header");
        };
        assert_eq!(obs.receiver_number, "5249K43695");
        assert_eq!(obs.receiver_type, "TRIMBLE NETR9");
        assert_eq!(obs.receiver_version, "5.10");
        assert_eq!(obs.antenna_number, "1441112501");
        assert_eq!(obs.antenna_type, "TRM59800.00     NONE");
        assert_eq!(obs.antenna_height, 0.1234);
        assert_eq!(obs.antenna_east, 0.0010);
        assert_eq!(obs.antenna_north, -0.0020);
    }

    #[test]
    fn test_antenna_delta_columns() {
        let header = [
            header_line("     2.11           OBSERVATION DATA    G (GPS)", "RINEX VERSION / TYPE"),
            header_line("A1", "MARKER NUMBER"),
            header_line("1                   RX                  1", "REC # / TYPE / VERS"),
            header_line("2                   ANT", "ANT # / TYPE"),
            header_line("        0.1234        0.0010       -0.0020", "ANTENNA: DELTA H/E/N"),
            header_line("", "END OF HEADER"),
        ]
        .concat();

        let decoded = parse_header(header.as_bytes(), RecordKind::Observation).unwrap();
        let KindHeader::Observation(obs) = decoded.kind else {
            panic!("Expected observation header");
        };
        assert_eq!(obs.antenna_height, 0.1234);
        assert_eq!(obs.antenna_east, 0.0010);
        assert_eq!(obs.antenna_north, -0.0020);
        assert_eq!(obs.antenna_type, "ANT");
    }

    #[test]
    fn test_multibyte_value_keeps_label_alignment() {
        // Every field filled to its last column, with a two-byte character inside
        let receiver = format!(
            "{:<20}{:<20}{:<20}",
            "5249K43695", "NETR9 \u{DC}BER", "5.10/6.523/ABCDEFGHI"
        );
        let header = obs_fixture().replace(
            &header_line("5249K43695          TRIMBLE NETR9       5.10", "REC # / TYPE / VERS"),
            &header_line(&receiver, "REC # / TYPE / VERS"),
        );

        let decoded = parse_header(header.as_bytes(), RecordKind::Observation).unwrap();
        let KindHeader::Observation(obs) = decoded.kind else {
            panic!("Expected observation header");
        };
        assert_eq!(obs.receiver_number, "5249K43695");
        assert_eq!(obs.receiver_type, "NETR9 \u{DC}BER");
        assert_eq!(obs.receiver_version, "5.10/6.523/ABCDEFGHI");
    }

    #[test]
    fn test_navigation_header_needs_only_version() {
        let data = with_body(&navigation_header());
        let header = parse_header(data.as_bytes(), RecordKind::Navigation).unwrap();

        assert_eq!(header.version, 2.11);
        assert_eq!(header.marker_number, None);
        assert_eq!(header.kind, KindHeader::Navigation);
    }

    #[test]
    fn test_meteorological_header_uses_first_sensor() {
        let data = with_body(&met_fixture());
        let header = parse_header(data.as_bytes(), RecordKind::Meteorological).unwrap();

        assert_eq!(header.marker_number.as_deref(), Some("50137M001"));
        let KindHeader::Meteorological(met) = header.kind else {
            panic!("Expected meteorological header");
        };
        assert_eq!(met.sensor_type, "PAROSCIENTIFIC 6016B");
        assert_eq!(met.sensor_height, 603.2);
    }

    #[test]
    fn test_missing_terminator() {
        let header = without_label(&obs_fixture(), "END OF HEADER");
        match parse_header(header.as_bytes(), RecordKind::Observation) {
            Err(RinexError::HeaderMissingField { label, record_kind }) => {
                assert_eq!(label, "terminator");
                assert_eq!(record_kind, RecordKind::Observation);
            }
            other => panic!("Expected HeaderMissingField, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_required_labels() {
        let cases = [
            (obs_fixture(), RecordKind::Observation, "REC # / TYPE / VERS"),
            (obs_fixture(), RecordKind::Observation, "ANT # / TYPE"),
            (obs_fixture(), RecordKind::Observation, "ANTENNA: DELTA H/E/N"),
            (obs_fixture(), RecordKind::Observation, "MARKER NUMBER"),
            (obs_fixture(), RecordKind::Observation, "RINEX VERSION / TYPE"),
            (met_fixture(), RecordKind::Meteorological, "SENSOR MOD/TYPE/ACC"),
            (met_fixture(), RecordKind::Meteorological, "SENSOR POS XYZ/H"),
            (met_fixture(), RecordKind::Meteorological, "MARKER NUMBER"),
            (navigation_header(), RecordKind::Navigation, "RINEX VERSION / TYPE"),
        ];

        for (fixture, kind, missing) in cases {
            let header = without_label(&fixture, missing);
            match parse_header(header.as_bytes(), kind) {
                Err(RinexError::HeaderMissingField { label, record_kind }) => {
                    assert_eq!(label, missing);
                    assert_eq!(record_kind, kind);
                }
                other => panic!("Expected {} to be missing, got {:?}", missing, other),
            }
        }
    }

    #[test]
    fn test_navigation_ignores_observation_labels() {
        let header = without_label(&navigation_header(), "MARKER NUMBER");
        assert!(parse_header(header.as_bytes(), RecordKind::Navigation).is_ok());
    }

    #[test]
    fn test_non_numeric_field() {
        let header = obs_fixture().replace("       -0.0020", "          n/a ");
        match parse_header(header.as_bytes(), RecordKind::Observation) {
            Err(RinexError::HeaderFieldTypeError { label, value }) => {
                assert_eq!(label, "ANTENNA: DELTA H/E/N");
                assert_eq!(value, "          n/a ");
            }
            other => panic!("Expected HeaderFieldTypeError, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_numeric_field_is_a_type_error() {
        let header = [
            header_line("", "RINEX VERSION / TYPE"),
            header_line("", "END OF HEADER"),
        ]
        .concat();
        assert!(matches!(
            parse_header(header.as_bytes(), RecordKind::Navigation),
            Err(RinexError::HeaderFieldTypeError { .. })
        ));
    }

    #[test]
    fn test_split_header_ranges() {
        let header = navigation_header();
        let data = with_body(&header);
        let (head, body) = split_header(data.as_bytes()).unwrap();

        assert_eq!(head, 0..header.len());
        assert_eq!(body, header.len()..data.len());
        assert!(data[head].ends_with("END OF HEADER\n"));
        assert!(data[body].starts_with(" 1 16  5  7"));
    }

    #[test]
    fn test_split_header_without_trailing_newline() {
        let data = b"     2.11           N: GPS NAV DATA                         RINEX VERSION / TYPE\n                                                            END OF HEADER";
        let (head, body) = split_header(data).unwrap();
        assert_eq!(head, 0..data.len());
        assert!(body.is_empty());
        assert_eq!(split_header(b"no terminator here"), None);
    }

    #[test]
    fn test_crlf_line_endings() {
        let data = obs_fixture().replace('\n', "\r\n");
        let header = parse_header(data.as_bytes(), RecordKind::Observation).unwrap();
        let KindHeader::Observation(obs) = header.kind else {
            panic!("Expected observation header");
        };
        assert_eq!(obs.receiver_version, "5.10");
        assert_eq!(header.header_bytes.end, data.len());
    }

    #[test]
    fn test_repeated_labels_concatenate_in_order() {
        let header = [
            header_line("first comment", "COMMENT"),
            header_line("second comment", "COMMENT"),
            header_line("", "  END  OF   HEADER "),
        ]
        .concat();
        let fields = HeaderFields::from_bytes(header.as_bytes());

        let values = fields.values("COMMENT").unwrap();
        assert_eq!(values.len(), 2);
        assert_eq!(values[0].trim(), "first comment");
        assert_eq!(values[1].trim(), "second comment");
        assert_eq!(fields.value("COMMENT").unwrap().len(), 120);
        assert!(fields.contains("END OF HEADER"));
        assert!(!fields.contains("MARKER NUMBER"));
    }

    #[test]
    fn test_blank_value_is_present() {
        let header = header_line("", "MARKER NUMBER");
        let fields = HeaderFields::from_bytes(header.as_bytes());
        assert_eq!(fields.value("MARKER NUMBER").unwrap().trim(), "");
        assert_eq!(fields.value("MARKER NAME"), None);
    }

    #[test]
    fn test_column_clamps_like_slicing() {
        assert_eq!(column("abcdef", 2..4), "cd");
        assert_eq!(column("abc", 2..10), "c");
        assert_eq!(column("abc", 5..10), "");
        assert_eq!(column("äbc", 1..3), "bc");
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  TRIMBLE   NETR9  "), "TRIMBLE NETR9");
        assert_eq!(collapse_whitespace("   "), "");
    }
}
