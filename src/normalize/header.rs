use crate::normalize::fields::{normalize_key, LogicalField, SynonymTable};
use crate::normalize::NormalizerConfig;
use crate::spreadsheet::{is_blank_row, CellValue};

/// Rows scanned from the top of a sheet while hunting for the header row.
pub const HEADER_SCAN_LIMIT: usize = 20;

/// Matching this many of the seven fields is confident enough to stop the
/// header scan early.
pub const HEADER_CONFIDENCE_THRESHOLD: usize = 5;

/// Which literal header text was matched for each logical field.
///
/// Partial by design: fields with no matching header stay absent. Per field,
/// the leftmost matching column wins and is never overwritten.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldMapping {
    headers: [Option<String>; 7],
}

impl FieldMapping {
    /// The header text matched for a field, if any.
    pub fn get(&self, field: LogicalField) -> Option<&str> {
        self.headers[field.index()].as_deref()
    }

    /// Number of logical fields with a matched header.
    pub fn matched_count(&self) -> usize {
        self.headers.iter().filter(|header| header.is_some()).count()
    }

    /// Fields with no matched header, in declaration order.
    pub fn missing(&self) -> Vec<LogicalField> {
        LogicalField::ALL
            .into_iter()
            .filter(|field| self.headers[field.index()].is_none())
            .collect()
    }

    /// Mandatory fields with no matched header, in reporting order.
    pub fn missing_mandatory(&self) -> Vec<LogicalField> {
        LogicalField::MANDATORY
            .into_iter()
            .filter(|field| self.headers[field.index()].is_none())
            .collect()
    }

    /// True when every logical field found a header.
    pub fn is_complete(&self) -> bool {
        self.headers.iter().all(Option::is_some)
    }

    fn claim(&mut self, field: LogicalField, header: &str) {
        self.headers[field.index()] = Some(header.to_owned());
    }
}

/// Maps header cells to logical fields by synonym containment.
///
/// Scanning columns left to right, each header claims at most one field:
/// among the fields it matches that no earlier column claimed, the one with
/// the longest matching synonym wins ("Course Title" is a subject, not a
/// class name), with declaration order breaking ties. A claimed field never
/// changes hands.
pub fn detect_field_mapping(headers: &[CellValue], synonyms: &SynonymTable) -> FieldMapping {
    let mut mapping = FieldMapping::default();
    for cell in headers {
        let Some(text) = cell.header_text() else {
            continue;
        };
        let normalized = normalize_key(&text);
        let mut best: Option<(usize, LogicalField)> = None;
        for field in LogicalField::ALL {
            if mapping.get(field).is_some() {
                continue;
            }
            let Some(length) = synonyms.longest_match(field, &normalized) else {
                continue;
            };
            if best.map(|(best_length, _)| length > best_length).unwrap_or(true) {
                best = Some((length, field));
            }
        }
        if let Some((_, field)) = best {
            mapping.claim(field, &text);
        }
    }
    mapping
}

/// Finds the row index most likely to be the header row.
///
/// Scans at most `config.header_scan_limit` rows, skipping blank ones. Each
/// candidate is scored by how many logical fields its mapping covers; the
/// earliest best score wins ties, and a score reaching
/// `config.header_confidence` returns immediately. Always returns an index:
/// row 0 when nothing beats the initial sentinel.
pub fn find_header_row(rows: &[Vec<CellValue>], config: &NormalizerConfig) -> usize {
    let mut best_index = 0;
    let mut best_score: i64 = -1;
    for (index, row) in rows.iter().take(config.header_scan_limit).enumerate() {
        if is_blank_row(row) {
            continue;
        }
        let score = detect_field_mapping(row, &config.synonyms).matched_count() as i64;
        if score > best_score {
            best_score = score;
            best_index = index;
        }
        if score >= config.header_confidence as i64 {
            return index;
        }
    }
    best_index
}
