//! CSV uploads decode as a single-sheet workbook, mirroring how the
//! collaborating spreadsheet stack presents them.

use crate::spreadsheet::cell::CellValue;
use crate::spreadsheet::sheet::RawSheet;
use crate::spreadsheet::DecodeError;
use crate::spreadsheet::Workbook;

/// Name given to the CSV pseudo-sheet.
pub const CSV_SHEET_NAME: &str = "Sheet1";

/// Decodes CSV bytes into a one-sheet workbook.
///
/// Byte-order marks (UTF-8/UTF-16) are honored; anything else decodes as
/// UTF-8 with replacement. Ragged rows are allowed.
pub(crate) fn decode_csv(bytes: &[u8]) -> Result<Workbook, DecodeError> {
    let (text, _, _) = encoding_rs::UTF_8.decode(bytes);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let row = record
            .iter()
            .map(|field| {
                if field.is_empty() {
                    CellValue::Empty
                } else {
                    CellValue::Text(field.to_owned())
                }
            })
            .collect();
        rows.push(row);
    }

    Ok(Workbook {
        sheets: vec![RawSheet::from_rows(CSV_SHEET_NAME, rows)],
    })
}
