use regex::Regex;
use std::sync::OnceLock;

/// The seven canonical timetable attributes, in matching priority order.
///
/// Declaration order is load-bearing: header matching, diagnostics and
/// reporting all walk fields in this order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LogicalField {
    Section,
    ClassName,
    Subject,
    Faculty,
    Room,
    Day,
    Time,
}

impl LogicalField {
    /// Every field, in declaration order.
    pub const ALL: [LogicalField; 7] = [
        LogicalField::Section,
        LogicalField::ClassName,
        LogicalField::Subject,
        LogicalField::Faculty,
        LogicalField::Room,
        LogicalField::Day,
        LogicalField::Time,
    ];

    /// Fields a row cannot be accepted without.
    pub const MANDATORY: [LogicalField; 4] = [
        LogicalField::Section,
        LogicalField::Day,
        LogicalField::Time,
        LogicalField::Subject,
    ];

    /// Field name as used in diagnostics and serialized records.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Section => "section",
            Self::ClassName => "className",
            Self::Subject => "subject",
            Self::Faculty => "faculty",
            Self::Room => "room",
            Self::Day => "day",
            Self::Time => "time",
        }
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

/// Lowercase phrases that identify each logical field in arbitrary headers.
///
/// Matching is substring containment over [`normalize_key`]-normalized header
/// text. The default table is the production one; swap lists per field to
/// test or localize.
#[derive(Clone, Debug)]
pub struct SynonymTable {
    synonyms: [Vec<String>; 7],
}

impl Default for SynonymTable {
    fn default() -> Self {
        let mut table = Self {
            synonyms: Default::default(),
        };
        table.set(LogicalField::Section, &["section", "section name", "sec"]);
        table.set(
            LogicalField::ClassName,
            &["class", "class name", "course", "batch", "class id"],
        );
        table.set(
            LogicalField::Subject,
            &["subject", "subject name", "course title"],
        );
        table.set(
            LogicalField::Faculty,
            &["faculty", "faculty name", "teacher", "lecturer", "instructor"],
        );
        table.set(
            LogicalField::Room,
            &["room", "room number", "classroom", "hall", "room no", "room id"],
        );
        table.set(LogicalField::Day, &["day", "weekday", "day of week"]);
        table.set(
            LogicalField::Time,
            &["time", "time slot", "slot", "period", "timing"],
        );
        table
    }
}

impl SynonymTable {
    /// Replaces the synonym list for one field.
    pub fn set(&mut self, field: LogicalField, phrases: &[&str]) {
        self.synonyms[field.index()] = phrases.iter().map(|phrase| phrase.to_string()).collect();
    }

    /// True when the normalized header contains any phrase registered for
    /// the field.
    pub fn matches(&self, field: LogicalField, normalized_header: &str) -> bool {
        self.synonyms[field.index()]
            .iter()
            .any(|phrase| normalized_header.contains(phrase.as_str()))
    }

    /// Length of the longest phrase for the field contained in the header.
    /// None when no phrase matches. Longer matches identify a field more
    /// specifically ("course title" beats "course").
    pub fn longest_match(&self, field: LogicalField, normalized_header: &str) -> Option<usize> {
        self.synonyms[field.index()]
            .iter()
            .filter(|phrase| normalized_header.contains(phrase.as_str()))
            .map(|phrase| phrase.len())
            .max()
    }
}

/// Normalizes header text for synonym matching: trims, lowercases and
/// collapses every run of non-alphanumeric characters to a single space,
/// so "Room No." and "room_no" compare equal.
pub fn normalize_key(raw: &str) -> String {
    static SEPARATORS: OnceLock<Regex> = OnceLock::new();
    let separators =
        SEPARATORS.get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("Hardcode regex pattern"));
    let lowered = raw.trim().to_lowercase();
    separators.replace_all(&lowered, " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_normalization_collapses_separators() {
        assert_eq!(normalize_key("  Faculty Name "), "faculty name");
        assert_eq!(normalize_key("Room_No."), "room no ");
        assert_eq!(normalize_key("DAY-OF--WEEK"), "day of week");
        assert_eq!(normalize_key("Time Slot"), "time slot");
    }

    #[test]
    fn default_table_matches_known_synonyms() {
        let table = SynonymTable::default();
        assert!(table.matches(LogicalField::Faculty, &normalize_key("Faculty Name")));
        assert!(table.matches(LogicalField::Faculty, &normalize_key("FACULTY")));
        assert!(table.matches(LogicalField::Faculty, &normalize_key("Instructor")));
        assert!(table.matches(LogicalField::Room, &normalize_key("Room No.")));
        assert!(table.matches(LogicalField::Time, &normalize_key("Period")));
        assert!(table.matches(LogicalField::Section, &normalize_key("Sec")));
        assert!(!table.matches(LogicalField::Day, &normalize_key("Date")));
    }

    #[test]
    fn custom_tables_replace_field_lists() {
        let mut table = SynonymTable::default();
        table.set(LogicalField::Day, &["wochentag"]);
        assert!(table.matches(LogicalField::Day, &normalize_key("Wochentag")));
        assert!(!table.matches(LogicalField::Day, &normalize_key("Day")));
    }
}
