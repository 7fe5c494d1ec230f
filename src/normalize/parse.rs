use crate::normalize::fields::LogicalField;
use crate::normalize::header::{detect_field_mapping, find_header_row};
use crate::normalize::record::{collect_row_fields, TimetableRecord};
use crate::normalize::NormalizerConfig;
use crate::spreadsheet::{
    decode_workbook, is_blank_row, CellValue, RawSheet, Workbook, WorkbookFormat,
};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-sheet acceptance counters. Blank rows do not count.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetSummary {
    pub sheet_name: String,
    /// Non-blank data rows below the header
    pub total_rows: usize,
    /// Rows that produced a record
    pub accepted_rows: usize,
    /// Rows rejected for missing mandatory fields
    pub rejected_rows: usize,
}

/// Kind of a data-quality diagnostic.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// A sheet's header lacks one or more logical fields (advisory)
    MissingColumns,
    /// A data row lacks a mandatory field value (advisory, row skipped)
    MissingFields,
    /// The workbook itself could not be read (fatal to the upload)
    Error,
}

/// A diagnostic raised during parsing. Advisory issues never stop
/// processing of subsequent rows or sheets.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    #[serde(rename = "type")]
    pub kind: IssueKind,
    /// Absent for structural failures that precede any sheet
    pub sheet_name: Option<String>,
    pub message: String,
}

impl Issue {
    fn missing_columns(sheet_name: &str, fields: &[LogicalField]) -> Self {
        Self {
            kind: IssueKind::MissingColumns,
            sheet_name: Some(sheet_name.to_owned()),
            message: format!(
                "Sheet \"{sheet_name}\" is missing columns for: {}",
                field_list(fields)
            ),
        }
    }

    fn missing_fields(sheet_name: &str, row_number: usize, fields: &[LogicalField]) -> Self {
        Self {
            kind: IssueKind::MissingFields,
            sheet_name: Some(sheet_name.to_owned()),
            message: format!(
                "Row {row_number} in sheet \"{sheet_name}\" is missing: {}",
                field_list(fields)
            ),
        }
    }

    fn structural(message: String) -> Self {
        Self {
            kind: IssueKind::Error,
            sheet_name: None,
            message,
        }
    }
}

fn field_list(fields: &[LogicalField]) -> String {
    fields
        .iter()
        .map(|field| field.name())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Everything one parse invocation produces.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseResult {
    /// Accepted records, sheet order then row order
    pub records: Vec<TimetableRecord>,
    /// One summary per sheet, in workbook sheet order
    pub summaries: Vec<SheetSummary>,
    /// Diagnostics, in the order they were raised
    pub issues: Vec<Issue>,
}

impl ParseResult {
    /// Accepted rows across every sheet.
    pub fn accepted_rows(&self) -> usize {
        self.summaries.iter().map(|summary| summary.accepted_rows).sum()
    }

    /// True when the whole workbook yielded no usable records. Callers
    /// surface this as a user error, unlike an empty individual sheet.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Normalizes every sheet of a decoded workbook.
///
/// Each sheet goes through header detection, synonym mapping and record
/// building. Sheets missing mapped columns and rows missing mandatory values
/// are reported as advisory issues and skipped over, never aborting the run.
pub fn parse_workbook(workbook: &Workbook, config: &NormalizerConfig) -> ParseResult {
    let mut result = ParseResult::default();
    for sheet in &workbook.sheets {
        parse_sheet(sheet, config, &mut result);
    }
    result
}

/// Decodes and normalizes workbook bytes in one step.
///
/// A structurally unreadable workbook does not fail the call: it yields an
/// empty result carrying a single `error` issue.
pub fn parse_bytes(bytes: &[u8], format: WorkbookFormat, config: &NormalizerConfig) -> ParseResult {
    match decode_workbook(bytes, format) {
        Ok(workbook) => parse_workbook(&workbook, config),
        Err(error) => {
            let issue = Issue::structural(format!("Failed to read workbook: {error}"));
            warn!("{}", issue.message);
            ParseResult {
                issues: vec![issue],
                ..ParseResult::default()
            }
        }
    }
}

fn parse_sheet(sheet: &RawSheet, config: &NormalizerConfig, result: &mut ParseResult) {
    if sheet.rows.is_empty() {
        result.summaries.push(SheetSummary {
            sheet_name: sheet.name.clone(),
            total_rows: 0,
            accepted_rows: 0,
            rejected_rows: 0,
        });
        return;
    }

    let header_row_index = find_header_row(&sheet.rows, config);
    let header_row = &sheet.rows[header_row_index];
    let mapping = detect_field_mapping(header_row, &config.synonyms);
    debug!(
        "sheet {:?}: header at row {}, {} of {} fields mapped",
        sheet.name,
        header_row_index,
        mapping.matched_count(),
        LogicalField::ALL.len()
    );

    let header_index = header_index_table(header_row);

    let missing_columns = mapping.missing_mandatory();
    if !missing_columns.is_empty() {
        let issue = Issue::missing_columns(&sheet.name, &missing_columns);
        warn!("{}", issue.message);
        result.issues.push(issue);
    }

    let mut total_rows = 0;
    let mut accepted_rows = 0;
    for (offset, row) in sheet.rows[header_row_index + 1..].iter().enumerate() {
        if is_blank_row(row) {
            continue;
        }
        total_rows += 1;
        // 1-based position within the sheet, counting the header row
        let row_number = header_row_index + offset + 2;
        let fields = collect_row_fields(row, &mapping, &header_index);
        let missing = fields.missing_mandatory();
        if !missing.is_empty() {
            let issue = Issue::missing_fields(&sheet.name, row_number, &missing);
            warn!("{}", issue.message);
            result.issues.push(issue);
            continue;
        }
        if let Some(record) = fields.into_record(&sheet.name, row_number) {
            accepted_rows += 1;
            result.records.push(record);
        }
    }

    result.summaries.push(SheetSummary {
        sheet_name: sheet.name.clone(),
        total_rows,
        accepted_rows,
        rejected_rows: total_rows - accepted_rows,
    });
}

/// Header text to column index. Duplicate header texts keep the last column.
fn header_index_table(header_row: &[CellValue]) -> HashMap<String, usize> {
    let mut table = HashMap::new();
    for (index, cell) in header_row.iter().enumerate() {
        if let Some(text) = cell.header_text() {
            table.insert(text, index);
        }
    }
    table
}
