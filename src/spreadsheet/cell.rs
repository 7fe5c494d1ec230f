use calamine::{Data, ExcelDateTime};

/// A spreadsheet cell normalized at the decode boundary.
///
/// Every format-specific value (shared strings, booleans, serial dates,
/// ISO strings) collapses into one of these three variants before any field
/// logic runs. Date- and time-formatted cells are rendered to ISO-style text.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum CellValue {
    #[default]
    Empty,
    /// Free text, kept exactly as decoded
    Text(String),
    /// Numeric cells, integers widened to f64
    Number(f64),
}

impl CellValue {
    /// True for cells that contribute nothing to a row: absent cells and
    /// zero-length text.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(value) => value.is_empty(),
            Self::Number(_) => false,
        }
    }

    /// Literal header text for column mapping: untrimmed for text cells,
    /// rendered for numbers, absent for empty cells.
    pub fn header_text(&self) -> Option<String> {
        match self {
            Self::Empty => None,
            Self::Text(value) => Some(value.to_owned()),
            Self::Number(value) => Some(format_number(*value)),
        }
    }

    /// Record field value: trimmed text or a rendered number.
    /// Whitespace-only text counts as absent.
    pub fn field_text(&self) -> Option<String> {
        match self {
            Self::Empty => None,
            Self::Text(value) => {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_owned())
                }
            }
            Self::Number(value) => Some(format_number(*value)),
        }
    }

    pub(crate) fn from_data(data: &Data) -> CellValue {
        match data {
            Data::Empty => Self::Empty,
            Data::String(value) => Self::Text(value.to_owned()),
            Data::Int(value) => Self::Number(*value as f64),
            Data::Float(value) => Self::Number(*value),
            Data::Bool(value) => Self::Text(value.to_string()),
            Data::DateTime(value) => from_excel_datetime(value),
            Data::DateTimeIso(value) => Self::Text(value.to_owned()),
            Data::DurationIso(value) => Self::Text(format_iso_duration(value)),
            // Error cells must not surface "#DIV/0!" as a field value
            Data::Error(_) => Self::Empty,
        }
    }
}

/// Renders serial date/time cells to text: time-of-day for fractions below
/// one day, a date for whole days, otherwise a full datetime.
fn from_excel_datetime(value: &ExcelDateTime) -> CellValue {
    let serial = value.as_f64();
    match value.as_datetime() {
        Some(datetime) if serial < 1.0 => CellValue::Text(datetime.format("%H:%M").to_string()),
        Some(datetime) if serial.fract() == 0.0 => {
            CellValue::Text(datetime.format("%Y-%m-%d").to_string())
        }
        Some(datetime) => CellValue::Text(datetime.format("%Y-%m-%d %H:%M").to_string()),
        None => CellValue::Number(serial),
    }
}

/// Renders ISO 8601 durations as clock-style text ("PT9H30M0S" -> "9:30:0").
fn format_iso_duration(value: &str) -> String {
    value
        .replace("PT", "")
        .replace('H', ":")
        .replace('M', ":")
        .replace('S', "")
}

/// Renders a number as field text: integral values lose the trailing ".0"
/// so room 101 never shows up as "101.0".
pub(crate) fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 9_007_199_254_740_992f64 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}
