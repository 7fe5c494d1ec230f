use crate::normalize::record::TimetableRecord;
use serde::{Deserialize, Serialize};

/// Per-field substring constraints over normalized records.
///
/// Empty values impose no constraint; set values AND together, each matched
/// case-insensitively against the corresponding record field.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecordFilter {
    pub section: String,
    pub class_name: String,
    pub subject: String,
    pub faculty: String,
    pub room: String,
    pub day: String,
    pub time: String,
}

impl RecordFilter {
    /// True when no field constrains anything.
    pub fn is_empty(&self) -> bool {
        self.values().into_iter().all(str::is_empty)
    }

    /// True when the record satisfies every non-empty filter value.
    pub fn matches(&self, record: &TimetableRecord) -> bool {
        let fields = [
            &record.section,
            &record.class_name,
            &record.subject,
            &record.faculty,
            &record.room,
            &record.day,
            &record.time,
        ];
        self.values()
            .into_iter()
            .zip(fields)
            .all(|(filter, value)| {
                filter.is_empty() || value.to_lowercase().contains(&filter.to_lowercase())
            })
    }

    /// Keeps matching records, preserving their original order.
    pub fn apply<'a>(&self, records: &'a [TimetableRecord]) -> Vec<&'a TimetableRecord> {
        records.iter().filter(|record| self.matches(record)).collect()
    }

    fn values(&self) -> [&str; 7] {
        [
            &self.section,
            &self.class_name,
            &self.subject,
            &self.faculty,
            &self.room,
            &self.day,
            &self.time,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::record::TBA;

    fn record(section: &str, subject: &str, day: &str) -> TimetableRecord {
        TimetableRecord {
            id: format!("{section}-{day}"),
            sheet_name: section.to_owned(),
            section: section.to_owned(),
            class_name: section.to_owned(),
            subject: subject.to_owned(),
            faculty: TBA.to_owned(),
            room: TBA.to_owned(),
            day: day.to_owned(),
            time: "09:00-10:00".to_owned(),
        }
    }

    #[test]
    fn empty_filter_matches_everything_in_order() {
        let records = vec![
            record("CSE-A", "Math", "Monday"),
            record("CSE-B", "Physics", "Tuesday"),
        ];
        let filter = RecordFilter::default();
        assert!(filter.is_empty());
        let matched = filter.apply(&records);
        assert_eq!(matched.len(), 2);
        assert_eq!(matched[0].section, "CSE-A");
    }

    #[test]
    fn filters_are_case_insensitive_substrings() {
        let records = vec![
            record("CSE-A", "Math", "Monday"),
            record("CSE-A", "Physics", "Tuesday"),
            record("CSE-B", "Math", "Wednesday"),
        ];
        let filter = RecordFilter {
            day: "mon".to_owned(),
            ..RecordFilter::default()
        };
        let matched = filter.apply(&records);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].day, "Monday");
    }

    #[test]
    fn filters_compose_with_logical_and() {
        let records = vec![
            record("CSE-A", "Math", "Monday"),
            record("CSE-A", "Physics", "Tuesday"),
            record("CSE-B", "Math", "Wednesday"),
        ];
        let filter = RecordFilter {
            day: "mon".to_owned(),
            subject: "zzz".to_owned(),
            ..RecordFilter::default()
        };
        assert!(filter.apply(&records).is_empty());
    }
}
