use anyhow::Result;
use chrono::Utc;
use timegrid::{
    ingest, parse_bytes, IngestError, IssueKind, NormalizerConfig, RecordFilter, WorkbookFormat,
    CSV_SHEET_NAME,
};

const CSV_UPLOAD: &[u8] = b"Sec,Day,Time Slot,Course Title,Instructor,Room No\n\
CSE-A,Monday,09:00-10:00,Data Structures,Dr. Smith,101\n\
CSE-A,Monday,10:00-11:00,Algorithms,Prof. Johnson,101\n\
CSE-B,Tuesday,09:00-10:00,Database Systems,Dr. Brown,204\n";

#[test]
fn csv_uploads_parse_as_one_sheet() {
    let result = parse_bytes(CSV_UPLOAD, WorkbookFormat::Csv, &NormalizerConfig::default());
    assert_eq!(result.records.len(), 3);
    assert_eq!(result.summaries.len(), 1);
    assert_eq!(result.summaries[0].sheet_name, CSV_SHEET_NAME);
    assert_eq!(result.summaries[0].accepted_rows, 3);
    assert!(result.issues.is_empty());
    assert_eq!(result.records[0].id, "Sheet1-2");
    assert_eq!(result.records[0].subject, "Data Structures");
    assert_eq!(result.records[0].class_name, "CSE-A");
}

#[test]
fn filters_compose_over_parsed_records() {
    let result = parse_bytes(CSV_UPLOAD, WorkbookFormat::Csv, &NormalizerConfig::default());

    let by_day = RecordFilter {
        day: "mon".to_owned(),
        ..RecordFilter::default()
    };
    assert_eq!(by_day.apply(&result.records).len(), 2);

    let impossible = RecordFilter {
        day: "mon".to_owned(),
        subject: "zzz".to_owned(),
        ..RecordFilter::default()
    };
    assert!(impossible.apply(&result.records).is_empty());
}

#[test]
fn sections_aggregate_across_rows() -> Result<()> {
    let outcome = ingest(
        CSV_UPLOAD,
        WorkbookFormat::Csv,
        &NormalizerConfig::default(),
        Utc::now(),
    )?;
    assert_eq!(outcome.payload.timetables.len(), 2);
    let cse_a = &outcome.payload.timetables[0];
    assert_eq!(cse_a.section, "CSE-A");
    assert_eq!(cse_a.schedule["Monday"].len(), 2);
    assert_eq!(cse_a.schedule["Monday"]["10:00-11:00"], "Algorithms");
    assert_eq!(outcome.payload.faculty.len(), 3);
    assert_eq!(outcome.payload.rooms.len(), 2);
    Ok(())
}

#[test]
fn rows_missing_mandatory_values_are_flagged_not_fatal() {
    let csv = b"Section,Day,Time,Subject\n\
CSE-A,Monday,09:00-10:00,Math\n\
CSE-A,,09:00-10:00,Physics\n";
    let result = parse_bytes(csv, WorkbookFormat::Csv, &NormalizerConfig::default());
    assert_eq!(result.records.len(), 1);
    assert_eq!(result.issues.len(), 1);
    assert_eq!(result.issues[0].kind, IssueKind::MissingFields);
    assert_eq!(
        result.issues[0].message,
        "Row 3 in sheet \"Sheet1\" is missing: day"
    );
    assert_eq!(result.summaries[0].total_rows, 2);
    assert_eq!(result.summaries[0].rejected_rows, 1);
}

#[test]
fn a_workbook_with_no_usable_rows_is_a_user_error() {
    let csv = b"Announcements\nWelcome back!\n";
    let error = ingest(
        csv,
        WorkbookFormat::Csv,
        &NormalizerConfig::default(),
        Utc::now(),
    )
    .expect_err("no valid data");
    assert!(matches!(error, IngestError::NoValidData));
    // The advisory surface still explains what went wrong
    let result = parse_bytes(csv, WorkbookFormat::Csv, &NormalizerConfig::default());
    assert!(result.is_empty());
    assert!(result
        .issues
        .iter()
        .any(|issue| issue.kind == IssueKind::MissingColumns));
}

#[test]
fn parse_results_serialize_for_the_web_boundary() {
    let result = parse_bytes(CSV_UPLOAD, WorkbookFormat::Csv, &NormalizerConfig::default());
    let json = serde_json::to_value(&result).expect("serialize parse result");
    assert_eq!(json["records"][0]["sheetName"], "Sheet1");
    assert_eq!(json["records"][0]["className"], "CSE-A");
    assert_eq!(json["summaries"][0]["totalRows"], 3);
    assert_eq!(json["summaries"][0]["acceptedRows"], 3);
    assert!(json["issues"].as_array().expect("issues array").is_empty());
}
