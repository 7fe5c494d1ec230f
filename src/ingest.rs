use crate::normalize::{parse_workbook, NormalizerConfig, ParseResult};
use crate::payload::{build_payload, UploadPayload};
use crate::spreadsheet::{decode_workbook, DecodeError, WorkbookFormat};
use chrono::{DateTime, Utc};
use log::debug;
use thiserror::Error;

/// Upload byte-size ceiling (15 MiB), matching the transport's limit.
pub const MAX_WORKBOOK_BYTES: usize = 15 * 1024 * 1024;

/// Column names suggested to the user when an upload has no usable data.
pub const EXPECTED_COLUMNS: [&str; 6] = ["Section", "Day", "Time", "Subject", "Faculty", "Room"];

/// Errors that fail an ingest outright. Sheet- and row-level problems are
/// advisory and live inside the parse result instead.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Workbook is {size} bytes; the limit is {} bytes", MAX_WORKBOOK_BYTES)]
    TooLarge { size: usize },

    #[error("{0}")]
    Decode(#[from] DecodeError),

    #[error("No valid timetable data found. Please check column names: Section, Day, Time, Subject, Faculty, Room")]
    NoValidData,
}

/// A successful ingest: the parse outcome plus the persistence payload.
#[derive(Clone, Debug, PartialEq)]
pub struct IngestOutcome {
    pub parse: ParseResult,
    pub payload: UploadPayload,
}

/// Decodes, normalizes and packages one uploaded workbook.
///
/// Fails when the upload exceeds the size ceiling, cannot be decoded, or
/// yields zero records across every sheet. An individual sheet with no
/// usable rows is unremarkable; a whole workbook without any is a user
/// error, reported as [`IngestError::NoValidData`].
pub fn ingest(
    bytes: &[u8],
    format: WorkbookFormat,
    config: &NormalizerConfig,
    now: DateTime<Utc>,
) -> Result<IngestOutcome, IngestError> {
    if bytes.len() > MAX_WORKBOOK_BYTES {
        return Err(IngestError::TooLarge { size: bytes.len() });
    }
    let workbook = decode_workbook(bytes, format)?;
    let parse = parse_workbook(&workbook, config);
    if parse.is_empty() {
        return Err(IngestError::NoValidData);
    }
    debug!(
        "ingested {} records across {} sheets ({} issues)",
        parse.records.len(),
        parse.summaries.len(),
        parse.issues.len()
    );
    let payload = build_payload(&parse.records, now);
    Ok(IngestOutcome { parse, payload })
}
