use crate::aggregate::group_by_section;
use crate::normalize::{TimetableRecord, TBA};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Department recorded for faculty when the upload names none.
pub const DEFAULT_DEPARTMENT: &str = "General";

/// Seat count recorded for rooms discovered through uploads.
pub const DEFAULT_ROOM_CAPACITY: u32 = 60;

/// Room classification recorded for uploaded rooms.
pub const DEFAULT_ROOM_TYPE: &str = "Classroom";

/// Initial availability recorded for uploaded rooms.
pub const ROOM_STATUS_AVAILABLE: &str = "available";

/// Upsert-by-section schedule document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableDoc {
    pub section: String,
    pub room_number: String,
    pub schedule: BTreeMap<String, BTreeMap<String, String>>,
    pub faculty: BTreeMap<String, String>,
    pub last_updated: DateTime<Utc>,
}

/// Upsert-by-name faculty document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacultyDoc {
    pub name: String,
    pub department: String,
    /// Subjects taught, in first-seen order
    pub subjects: Vec<String>,
    pub last_updated: DateTime<Utc>,
}

/// Upsert-by-number room document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDoc {
    pub room_number: String,
    pub capacity: u32,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
    pub last_updated: DateTime<Utc>,
}

/// Everything the persistence collaborator upserts after one upload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadPayload {
    pub timetables: Vec<TimetableDoc>,
    pub faculty: Vec<FacultyDoc>,
    pub rooms: Vec<RoomDoc>,
}

/// Builds the persistence payload from accepted records.
///
/// Faculty documents are deduplicated by name with subjects accumulated in
/// first-seen order; rooms are deduplicated by number; `TBA` placeholders
/// produce no documents. Every document carries the same `lastUpdated`
/// stamp, supplied by the caller.
pub fn build_payload(records: &[TimetableRecord], now: DateTime<Utc>) -> UploadPayload {
    let timetables = group_by_section(records)
        .into_iter()
        .map(|group| TimetableDoc {
            section: group.section,
            room_number: group.room_number,
            schedule: group.schedule,
            faculty: group.faculty,
            last_updated: now,
        })
        .collect();

    let mut faculty: Vec<FacultyDoc> = Vec::new();
    for record in records {
        if record.faculty == TBA {
            continue;
        }
        match faculty.iter_mut().find(|doc| doc.name == record.faculty) {
            Some(doc) => {
                if !doc.subjects.contains(&record.subject) {
                    doc.subjects.push(record.subject.clone());
                }
            }
            None => faculty.push(FacultyDoc {
                name: record.faculty.clone(),
                department: DEFAULT_DEPARTMENT.to_owned(),
                subjects: vec![record.subject.clone()],
                last_updated: now,
            }),
        }
    }

    let mut rooms: Vec<RoomDoc> = Vec::new();
    for record in records {
        if record.room == TBA {
            continue;
        }
        if rooms.iter().any(|doc| doc.room_number == record.room) {
            continue;
        }
        rooms.push(RoomDoc {
            room_number: record.room.clone(),
            capacity: DEFAULT_ROOM_CAPACITY,
            kind: DEFAULT_ROOM_TYPE.to_owned(),
            status: ROOM_STATUS_AVAILABLE.to_owned(),
            last_updated: now,
        });
    }

    UploadPayload {
        timetables,
        faculty,
        rooms,
    }
}
