//! # Timegrid
//!
//! A library for ingesting university timetable spreadsheets and normalizing
//! them into clean, queryable schedule data.
//!
//! ## Features
//!
//! - **Multi-format support**: Read Excel files (`.xls`, `.xlsx`, `.xlsm`,
//!   `.xlsb`, `.xla`, `.xlam`), OpenDocument spreadsheets (`.ods`) and CSV
//!   uploads from in-memory bytes
//! - **Header detection**: Locate the real header row beneath titles and
//!   blank rows, and map free-form header text onto the seven logical
//!   timetable fields via a synonym table
//! - **Validation and diagnostics**: Per-sheet acceptance statistics,
//!   missing-column advisories and per-row missing-field reports that never
//!   abort the run
//! - **Aggregation**: Fold records into per-section weekly schedules with
//!   normalized section identifiers and last-write-wins collision handling
//! - **Persistence payloads**: Upsert-ready timetable, faculty and room
//!   documents shaped for the collaborating web backend
//! - **Filtering**: Case-insensitive, AND-composed substring queries over
//!   normalized records
//! - **Template export**: The fixed timetable template as CSV text or an
//!   XLSX download
//!
//! The crate is synchronous and side-effect free: one workbook in, records,
//! summaries, issues and payloads out. Transports and databases stay outside.

mod aggregate;
mod error;
mod ingest;
mod normalize;
mod payload;
mod spreadsheet;
mod template;

pub use aggregate::{group_by_section, normalize_section_id, SectionSchedule};
pub use error::TimegridError;
pub use ingest::{ingest, IngestError, IngestOutcome, EXPECTED_COLUMNS, MAX_WORKBOOK_BYTES};
pub use normalize::{
    detect_field_mapping, find_header_row, normalize_key, parse_bytes, parse_workbook,
    FieldMapping, Issue, IssueKind, LogicalField, NormalizerConfig, ParseResult, RecordFilter,
    SheetSummary, SynonymTable, TimetableRecord, HEADER_CONFIDENCE_THRESHOLD, HEADER_SCAN_LIMIT,
    TBA,
};
pub use payload::{
    build_payload, FacultyDoc, RoomDoc, TimetableDoc, UploadPayload, DEFAULT_DEPARTMENT,
    DEFAULT_ROOM_CAPACITY, DEFAULT_ROOM_TYPE, ROOM_STATUS_AVAILABLE,
};
pub use spreadsheet::{
    decode_workbook, CellValue, DecodeError, RawSheet, Workbook, WorkbookFormat, CSV_SHEET_NAME,
};
pub use template::{template_csv, template_xlsx, TEMPLATE_ROWS, TEMPLATE_SHEET_NAME};
