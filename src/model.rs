//! Source records as they appear in the leaderboard documents.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::lenient;
use crate::tier::PointsByTier;

/// Handle to a teacher inside a loaded [`DataSet`]: its position in the
/// teachers list. Views use it to ask for a teacher's detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeacherRef(pub usize);

/// A single teacher from the teachers document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub range: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub description: Option<String>,
    /// Category name to raw tier label.
    #[serde(default, deserialize_with = "lenient::text_map")]
    pub categories: BTreeMap<String, Option<String>>,
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub lessons_missed: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub absent_days: Option<f64>,
}

impl Teacher {
    /// Absence count carried on the record itself (single-document layout).
    pub fn embedded_absence(&self) -> f64 {
        self.lessons_missed.or(self.absent_days).unwrap_or(0.0)
    }

    /// Raw tier assigned for `category`, if any.
    pub fn tier_for(&self, category: &str) -> Option<&str> {
        self.categories.get(category).and_then(|t| t.as_deref())
    }
}

/// The teachers document: scoring rule, category order and the teachers.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeachersDocument {
    #[serde(default)]
    pub points_by_tier: PointsByTier,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub categories: Vec<String>,
    #[serde(default, deserialize_with = "lenient::records")]
    pub teachers: Vec<Teacher>,
}

/// One row of the absence document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbsenceRecord {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub teacher_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::number_or_zero")]
    pub absent_days: f64,
}

/// The separate absence document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AbsenceDocument {
    #[serde(default, deserialize_with = "lenient::records")]
    pub teachers: Vec<AbsenceRecord>,
}

/// Everything one load produces. Immutable after construction.
#[derive(Debug, Clone)]
pub struct DataSet {
    pub teachers: TeachersDocument,
    pub absence: Option<AbsenceDocument>,
    pub teachers_by_id: HashMap<String, TeacherRef>,
}

impl DataSet {
    pub fn new(teachers: TeachersDocument, absence: Option<AbsenceDocument>) -> Self {
        let teachers_by_id = crate::leaderboard::join::index_by_id(&teachers.teachers);
        Self {
            teachers,
            absence,
            teachers_by_id,
        }
    }

    pub fn teacher(&self, teacher: TeacherRef) -> Option<&Teacher> {
        self.teachers.teachers.get(teacher.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_embedded_absence_prefers_lessons_missed() {
        let t: Teacher =
            serde_json::from_value(json!({"name": "A", "lessonsMissed": 4, "absentDays": 9}))
                .unwrap();
        assert_eq!(t.embedded_absence(), 4.0);

        let t: Teacher = serde_json::from_value(json!({"name": "A", "absentDays": "9"})).unwrap();
        assert_eq!(t.embedded_absence(), 9.0);

        let t: Teacher = serde_json::from_value(json!({"name": "A"})).unwrap();
        assert_eq!(t.embedded_absence(), 0.0);
    }

    #[test]
    fn test_numeric_id_becomes_text() {
        let t: Teacher = serde_json::from_value(json!({"id": 12, "name": "A"})).unwrap();
        assert_eq!(t.id.as_deref(), Some("12"));
    }

    #[test]
    fn test_tier_for_ignores_null_tiers() {
        let t: Teacher = serde_json::from_value(
            json!({"name": "A", "categories": {"Math": "t1", "Science": null}}),
        )
        .unwrap();
        assert_eq!(t.tier_for("Math"), Some("t1"));
        assert_eq!(t.tier_for("Science"), None);
        assert_eq!(t.tier_for("Art"), None);
    }
}
