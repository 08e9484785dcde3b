//! Filename and header decoding composed into a single parse.

use crate::error::{Result, RinexError};
use crate::filename::{FilenameInfo, parse_filename};
use crate::header::{DecodedHeader, parse_header};
use crate::models::ParsedFile;
use std::fs;
use std::path::Path;

/// Parse a RINEX file from its name and full content.
///
/// The filename is decoded first; the header is only read if the name is
/// valid. Either stage failing aborts the parse, so a returned
/// [`ParsedFile`] always carries every field its record kind requires.
/// `data` is only borrowed for the duration of the call.
pub fn parse_rinex(file_name: &str, data: &[u8]) -> Result<ParsedFile> {
    let info = parse_filename(file_name)?;
    let header = parse_header(data, info.record_kind)?;
    Ok(ParsedFile::from_parts(info, header))
}

impl ParsedFile {
    /// Read a file from disk and parse it under its own basename.
    ///
    /// The name is checked before the file is opened.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| RinexError::invalid_filename(path.display().to_string()))?;

        parse_filename(&file_name)?;
        let data = fs::read(path).map_err(|e| RinexError::io(path, e))?;
        parse_rinex(&file_name, &data)
    }

    fn from_parts(info: FilenameInfo, header: DecodedHeader) -> Self {
        debug_assert_eq!(info.record_kind, header.kind.record_kind());

        Self {
            file_name: info.file_name,
            naming: info.naming,
            record_kind: info.record_kind,
            cadence: info.cadence,
            start_time: info.start_time,
            marker_name: info.marker_name,
            hatanaka_compressed: info.hatanaka_compressed,
            constellation: info.constellation,
            sampling: info.sampling,
            period_count: info.period_count,
            version: header.version,
            marker_number: header.marker_number,
            header: header.kind,
            header_bytes: header.header_bytes,
            body_bytes: header.body_bytes,
        }
    }
}
