use crate::error::TimegridError;
use rust_xlsxwriter::{Workbook, Worksheet};

/// Sheet name of the downloadable template workbook.
pub const TEMPLATE_SHEET_NAME: &str = "Timetable Template";

/// Fixed template content: header row plus four example sessions.
pub const TEMPLATE_ROWS: [[&str; 7]; 5] = [
    ["Section", "Day", "Time", "Subject", "Faculty", "Room", "Department"],
    ["III-CSE-A", "Monday", "09:00-10:00", "Data Structures", "Dr. Smith", "Room-101", "CSE"],
    ["III-CSE-A", "Monday", "10:00-11:00", "Algorithms", "Prof. Johnson", "Room-102", "CSE"],
    ["III-CSE-B", "Tuesday", "09:00-10:00", "Database Systems", "Dr. Brown", "Room-103", "CSE"],
    ["III-ECE-A", "Wednesday", "11:00-12:00", "Digital Circuits", "Prof. Davis", "Room-201", "ECE"],
];

/// Renders the template as CSV text.
pub fn template_csv() -> String {
    let mut text = String::new();
    for row in TEMPLATE_ROWS {
        text.push_str(&row.join(","));
        text.push('\n');
    }
    text
}

/// Renders the template as an XLSX workbook, ready to serve as a download.
pub fn template_xlsx() -> Result<Vec<u8>, TimegridError> {
    let mut workbook = Workbook::new();
    let mut worksheet = Worksheet::new();
    worksheet.set_name(TEMPLATE_SHEET_NAME)?;
    for (row, values) in TEMPLATE_ROWS.iter().enumerate() {
        for (col, value) in values.iter().enumerate() {
            worksheet.write_string(row as u32, col as u16, *value)?;
        }
    }
    workbook.push_worksheet(worksheet);
    Ok(workbook.save_to_buffer()?)
}
