use crate::normalize::fields::LogicalField;
use crate::normalize::header::FieldMapping;
use crate::spreadsheet::CellValue;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Placeholder for faculty and room values the upload left blank.
pub const TBA: &str = "TBA";

/// One canonical class-session entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableRecord {
    /// Stable per-upload id: "<sheetName>-<rowNumber>"
    pub id: String,
    pub sheet_name: String,
    pub section: String,
    pub class_name: String,
    pub subject: String,
    pub faculty: String,
    pub room: String,
    pub day: String,
    pub time: String,
}

/// Field values collected from one data row, before validation.
#[derive(Debug, Default)]
pub(crate) struct RowFields {
    values: [Option<String>; 7],
}

impl RowFields {
    pub(crate) fn get(&self, field: LogicalField) -> Option<&str> {
        self.values[field.index()].as_deref()
    }

    /// Mandatory fields with no usable value, in reporting order.
    pub(crate) fn missing_mandatory(&self) -> Vec<LogicalField> {
        LogicalField::MANDATORY
            .into_iter()
            .filter(|field| self.get(*field).is_none())
            .collect()
    }

    /// Builds the canonical record, defaulting faculty/room to [`TBA`] and
    /// the class name to the section. Returns None when a mandatory field
    /// is absent.
    pub(crate) fn into_record(self, sheet_name: &str, row_number: usize) -> Option<TimetableRecord> {
        let section = self.get(LogicalField::Section)?.to_owned();
        let day = self.get(LogicalField::Day)?.to_owned();
        let time = self.get(LogicalField::Time)?.to_owned();
        let subject = self.get(LogicalField::Subject)?.to_owned();
        let class_name = self
            .get(LogicalField::ClassName)
            .map(str::to_owned)
            .unwrap_or_else(|| section.clone());
        let faculty = self.get(LogicalField::Faculty).unwrap_or(TBA).to_owned();
        let room = self.get(LogicalField::Room).unwrap_or(TBA).to_owned();
        Some(TimetableRecord {
            id: format!("{sheet_name}-{row_number}"),
            sheet_name: sheet_name.to_owned(),
            section,
            class_name,
            subject,
            faculty,
            room,
            day,
            time,
        })
    }
}

/// Reads the mapped columns of one data row into trimmed field values.
/// Empty cells and whitespace-only text contribute nothing.
pub(crate) fn collect_row_fields(
    row: &[CellValue],
    mapping: &FieldMapping,
    header_index: &HashMap<String, usize>,
) -> RowFields {
    let mut fields = RowFields::default();
    for field in LogicalField::ALL {
        let Some(header) = mapping.get(field) else {
            continue;
        };
        let Some(column) = header_index.get(header) else {
            continue;
        };
        if let Some(value) = row.get(*column).and_then(CellValue::field_text) {
            fields.values[field.index()] = Some(value);
        }
    }
    fields
}
