use crate::normalize::{TimetableRecord, TBA};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

/// Weekly schedule aggregate for one section.
///
/// `schedule` maps day to time slot to subject; `faculty` maps subject to
/// the name teaching it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionSchedule {
    /// Normalized section identifier (see [`normalize_section_id`])
    pub section: String,
    pub room_number: String,
    pub schedule: BTreeMap<String, BTreeMap<String, String>>,
    pub faculty: BTreeMap<String, String>,
}

/// Canonical bucket key for section identifiers: trimmed, uppercased, with
/// every run of characters outside `A-Z0-9` collapsed to a single dash and
/// leading/trailing dashes stripped. "cse-a", "CSE a" and "CSE/A" all
/// become "CSE-A".
pub fn normalize_section_id(raw: &str) -> String {
    static SEPARATORS: OnceLock<Regex> = OnceLock::new();
    let separators =
        SEPARATORS.get_or_init(|| Regex::new(r"[^A-Z0-9]+").expect("Hardcode regex pattern"));
    let upper = raw.trim().to_uppercase();
    separators.replace_all(&upper, "-").trim_matches('-').to_owned()
}

/// Folds accepted records into per-section aggregates.
///
/// Buckets are keyed by the normalized section id and ordered by first
/// appearance. Collisions are last-write-wins: a later record overwrites the
/// subject in its day/time slot and the faculty entry for its subject. The
/// room number sticks to the last non-TBA value seen for the section.
pub fn group_by_section(records: &[TimetableRecord]) -> Vec<SectionSchedule> {
    let mut groups: Vec<SectionSchedule> = Vec::new();
    let mut indexes: HashMap<String, usize> = HashMap::new();
    for record in records {
        let section = normalize_section_id(&record.section);
        let index = *indexes.entry(section.clone()).or_insert_with(|| {
            groups.push(SectionSchedule {
                section,
                room_number: record.room.clone(),
                schedule: BTreeMap::new(),
                faculty: BTreeMap::new(),
            });
            groups.len() - 1
        });
        let group = &mut groups[index];
        group
            .schedule
            .entry(record.day.clone())
            .or_default()
            .insert(record.time.clone(), record.subject.clone());
        group.faculty.insert(record.subject.clone(), record.faculty.clone());
        if record.room != TBA {
            group.room_number = record.room.clone();
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(section: &str, day: &str, time: &str, subject: &str, faculty: &str, room: &str) -> TimetableRecord {
        TimetableRecord {
            id: format!("{section}-{day}-{time}"),
            sheet_name: "Sheet1".to_owned(),
            section: section.to_owned(),
            class_name: section.to_owned(),
            subject: subject.to_owned(),
            faculty: faculty.to_owned(),
            room: room.to_owned(),
            day: day.to_owned(),
            time: time.to_owned(),
        }
    }

    #[test]
    fn section_ids_converge_on_one_form() {
        assert_eq!(normalize_section_id("cse-a"), "CSE-A");
        assert_eq!(normalize_section_id("CSE a"), "CSE-A");
        assert_eq!(normalize_section_id("CSE/A"), "CSE-A");
        assert_eq!(normalize_section_id("  CSE  A  "), "CSE-A");
        assert_eq!(normalize_section_id("III-CSE-A"), "III-CSE-A");
    }

    #[test]
    fn spelling_variants_share_one_bucket() {
        let records = vec![
            record("cse-a", "Monday", "09:00-10:00", "Math", "Dr. Smith", "101"),
            record("CSE a", "Tuesday", "09:00-10:00", "Physics", "Dr. Jones", "101"),
            record("CSE/A", "Monday", "10:00-11:00", "Chemistry", "Dr. Brown", "101"),
        ];
        let groups = group_by_section(&records);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].section, "CSE-A");
        assert_eq!(groups[0].schedule["Monday"].len(), 2);
    }

    #[test]
    fn later_records_overwrite_slot_and_faculty() {
        let records = vec![
            record("CSE-A", "Monday", "09:00-10:00", "Math", "Dr. Smith", "101"),
            record("CSE-A", "Monday", "09:00-10:00", "Physics", "Dr. Jones", "101"),
        ];
        let groups = group_by_section(&records);
        assert_eq!(groups[0].schedule["Monday"]["09:00-10:00"], "Physics");
        assert_eq!(groups[0].faculty["Physics"], "Dr. Jones");
        // The earlier subject's faculty entry survives under its own key.
        assert_eq!(groups[0].faculty["Math"], "Dr. Smith");
    }

    #[test]
    fn room_keeps_last_non_placeholder_value() {
        let records = vec![
            record("CSE-A", "Monday", "09:00", "Math", "Dr. Smith", TBA),
            record("CSE-A", "Tuesday", "09:00", "Physics", "Dr. Jones", "204"),
            record("CSE-A", "Wednesday", "09:00", "Chemistry", "Dr. Brown", TBA),
        ];
        let groups = group_by_section(&records);
        assert_eq!(groups[0].room_number, "204");
    }

    #[test]
    fn buckets_follow_first_appearance() {
        let records = vec![
            record("CSE-B", "Monday", "09:00", "Math", "Dr. Smith", "101"),
            record("CSE-A", "Monday", "09:00", "Math", "Dr. Smith", "102"),
            record("CSE-B", "Tuesday", "09:00", "Math", "Dr. Smith", "101"),
        ];
        let groups = group_by_section(&records);
        let sections: Vec<&str> = groups.iter().map(|group| group.section.as_str()).collect();
        assert_eq!(sections, vec!["CSE-B", "CSE-A"]);
    }
}
