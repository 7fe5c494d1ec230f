use crate::spreadsheet::cell::CellValue;

/// One worksheet decoded into a dense, ragged-tolerant row-major grid.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawSheet {
    /// Sheet name as declared in the workbook
    pub name: String,
    /// Cell grid, rows in sheet order
    pub rows: Vec<Vec<CellValue>>,
}

impl RawSheet {
    /// Creates an empty sheet.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            rows: Vec::new(),
        }
    }

    /// Creates a sheet from pre-built rows.
    pub fn from_rows(name: &str, rows: Vec<Vec<CellValue>>) -> Self {
        Self {
            name: name.to_owned(),
            rows,
        }
    }

    /// Returns true if the sheet contains no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// True when every cell of the row is empty.
pub(crate) fn is_blank_row(row: &[CellValue]) -> bool {
    row.iter().all(CellValue::is_empty)
}
