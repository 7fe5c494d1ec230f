//! # Workbook Decoding Module
//!
//! Decodes uploaded spreadsheet bytes into a uniform in-memory model: a
//! [`Workbook`] of [`RawSheet`] grids whose cells are normalized to
//! [`CellValue`] before any timetable logic runs. Excel formats (.xlsx,
//! .xlsm, .xlsb, .xls, .xla, .xlam, .ods) are read through calamine range
//! readers; CSV files decode as a single pseudo-sheet.

pub(crate) mod cell;
mod csv;
pub(crate) mod sheet;

pub use cell::CellValue;
pub use csv::CSV_SHEET_NAME;
pub use sheet::RawSheet;

pub(crate) use sheet::is_blank_row;

use calamine::{Data, Ods, Range, Reader, Xls, Xlsb, Xlsx};
use std::ffi::OsStr;
use std::io::{Cursor, Read, Seek};
use std::path::Path;
use thiserror::Error;

/// Errors raised while decoding workbook bytes.
///
/// Any of these is a structural failure: the whole upload is unreadable and
/// no records can be produced from it.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// Error in Excel 2007+ format (.xlsx, .xlsm, .xlam)
    #[error("Invalid xlsx file format: {0}")]
    InvalidXlsxFileFormat(#[from] calamine::XlsxError),

    /// Error in Excel Binary format (.xlsb)
    #[error("Invalid xlsb file format: {0}")]
    InvalidXlsbFileFormat(#[from] calamine::XlsbError),

    /// Error in legacy Excel format (.xls, .xla)
    #[error("Invalid xls file format: {0}")]
    InvalidXlsFileFormat(#[from] calamine::XlsError),

    /// Error in OpenDocument format (.ods)
    #[error("Invalid ods file format: {0}")]
    InvalidOdsFileFormat(#[from] calamine::OdsError),

    /// Error in comma-separated text (.csv)
    #[error("Invalid csv file format: {0}")]
    InvalidCsvFileFormat(#[from] ::csv::Error),
}

/// Upload formats the decoder accepts.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WorkbookFormat {
    Xlsx,
    Xlsb,
    Xls,
    Ods,
    Csv,
}

impl WorkbookFormat {
    /// Detects the format from a file name extension (case-insensitive).
    pub fn from_file_name(name: &str) -> Option<Self> {
        let extension = Path::new(name)
            .extension()
            .and_then(OsStr::to_str)?
            .to_ascii_lowercase();
        match extension.as_str() {
            "xlsx" | "xlsm" | "xlam" => Some(Self::Xlsx),
            "xlsb" => Some(Self::Xlsb),
            "xls" | "xla" => Some(Self::Xls),
            "ods" => Some(Self::Ods),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }

    /// Detects the format from a MIME type.
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet" => Some(Self::Xlsx),
            "application/vnd.ms-excel" => Some(Self::Xls),
            "application/vnd.oasis.opendocument.spreadsheet" => Some(Self::Ods),
            "text/csv" | "application/csv" => Some(Self::Csv),
            _ => None,
        }
    }

    /// Detects the format from whichever signal is available, MIME type
    /// first. Upload transports often send a generic MIME type, so the
    /// extension acts as the fallback.
    pub fn detect(file_name: &str, mime: Option<&str>) -> Option<Self> {
        mime.and_then(Self::from_mime)
            .or_else(|| Self::from_file_name(file_name))
    }
}

/// A decoded workbook: every sheet materialized as a cell grid, in
/// workbook sheet order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Workbook {
    pub sheets: Vec<RawSheet>,
}

/// Decodes workbook bytes in the given format.
///
/// # Arguments
/// * `bytes` - The uploaded file content
/// * `format` - Format to decode as, from [`WorkbookFormat::detect`]
///
/// # Returns
/// The decoded workbook, or a [`DecodeError`] when the bytes are corrupt or
/// not actually in the claimed format.
pub fn decode_workbook(bytes: &[u8], format: WorkbookFormat) -> Result<Workbook, DecodeError> {
    match format {
        WorkbookFormat::Xlsx => read_excel(Xlsx::new(Cursor::new(bytes))?),
        WorkbookFormat::Xlsb => read_excel(Xlsb::new(Cursor::new(bytes))?),
        WorkbookFormat::Xls => read_excel(Xls::new(Cursor::new(bytes))?),
        WorkbookFormat::Ods => read_excel(Ods::new(Cursor::new(bytes))?),
        WorkbookFormat::Csv => csv::decode_csv(bytes),
    }
}

/// Reads every sheet of an Excel-family workbook through a calamine reader.
fn read_excel<RS, R>(mut reader: R) -> Result<Workbook, DecodeError>
where
    RS: Read + Seek,
    R: Reader<RS>,
    DecodeError: From<R::Error>,
{
    let mut sheets = Vec::new();
    for name in reader.sheet_names().to_vec() {
        let range = reader.worksheet_range(&name)?;
        sheets.push(range_to_sheet(&name, &range));
    }
    Ok(Workbook { sheets })
}

/// Materializes a calamine range into a dense grid.
///
/// Rows above the first populated row are dropped so row numbering matches
/// what the uploader sees in their spreadsheet tool; columns keep their
/// absolute indexes, padded with empty cells on the left.
fn range_to_sheet(name: &str, range: &Range<Data>) -> RawSheet {
    let (Some(start), Some(end)) = (range.start(), range.end()) else {
        return RawSheet::new(name);
    };
    let width = end.1 as usize + 1;
    let height = end.0 as usize - start.0 as usize + 1;
    let mut rows = vec![vec![CellValue::Empty; width]; height];
    for (row, col, data) in range.used_cells() {
        rows[row][start.1 as usize + col] = CellValue::from_data(data);
    }
    RawSheet::from_rows(name, rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_detection_by_extension() {
        assert_eq!(WorkbookFormat::from_file_name("timetable.XLSX"), Some(WorkbookFormat::Xlsx));
        assert_eq!(WorkbookFormat::from_file_name("timetable.xls"), Some(WorkbookFormat::Xls));
        assert_eq!(WorkbookFormat::from_file_name("timetable.csv"), Some(WorkbookFormat::Csv));
        assert_eq!(WorkbookFormat::from_file_name("timetable.pdf"), None);
        assert_eq!(WorkbookFormat::from_file_name("timetable"), None);
    }

    #[test]
    fn format_detection_prefers_mime() {
        assert_eq!(
            WorkbookFormat::detect("export.bin", Some("text/csv")),
            Some(WorkbookFormat::Csv)
        );
        assert_eq!(
            WorkbookFormat::detect("export.xlsx", Some("text/plain")),
            Some(WorkbookFormat::Xlsx)
        );
        assert_eq!(WorkbookFormat::detect("export.bin", None), None);
    }

    #[test]
    fn corrupt_bytes_fail_decoding() {
        let result = decode_workbook(b"definitely not a zip archive", WorkbookFormat::Xlsx);
        assert!(result.is_err());
    }
}
