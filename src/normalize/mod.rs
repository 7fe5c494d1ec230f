//! # Timetable Normalization Module
//!
//! The core of the crate: locating header rows in messy sheets, mapping
//! arbitrary header text onto the seven logical timetable fields, building
//! canonical records, and reporting per-sheet acceptance statistics and
//! data-quality issues.

pub(crate) mod fields;
pub(crate) mod filter;
pub(crate) mod header;
pub(crate) mod parse;
pub(crate) mod record;

pub use fields::{normalize_key, LogicalField, SynonymTable};
pub use filter::RecordFilter;
pub use header::{
    detect_field_mapping, find_header_row, FieldMapping, HEADER_CONFIDENCE_THRESHOLD,
    HEADER_SCAN_LIMIT,
};
pub use parse::{parse_bytes, parse_workbook, Issue, IssueKind, ParseResult, SheetSummary};
pub use record::{TimetableRecord, TBA};

/// Tunables for header detection and synonym matching.
///
/// The defaults reproduce the production synonym table and thresholds;
/// alternate tables make the locator and matcher unit-testable in isolation.
#[derive(Clone, Debug)]
pub struct NormalizerConfig {
    pub synonyms: SynonymTable,
    /// Rows scanned while locating the header row
    pub header_scan_limit: usize,
    /// Matched-field count that short-circuits the header scan
    pub header_confidence: usize,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            synonyms: SynonymTable::default(),
            header_scan_limit: HEADER_SCAN_LIMIT,
            header_confidence: HEADER_CONFIDENCE_THRESHOLD,
        }
    }
}
