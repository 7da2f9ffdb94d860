//! JSON parsers for the teachers and absence documents.

use anyhow::{Context, Result, bail};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::model::{AbsenceDocument, TeachersDocument};

fn parse_object<T: DeserializeOwned>(bytes: &[u8], what: &str) -> Result<T> {
    let value: Value =
        serde_json::from_slice(bytes).with_context(|| format!("{what} document is not valid JSON"))?;
    if !value.is_object() {
        bail!("{what} document must be a JSON object");
    }
    serde_json::from_value(value).with_context(|| format!("{what} document could not be decoded"))
}

/// Decodes the teachers document.
///
/// # Errors
///
/// Returns an error if the bytes are not JSON or the top level is not an
/// object. Problems inside individual fields fall back to defaults.
pub fn parse_teachers(bytes: &[u8]) -> Result<TeachersDocument> {
    parse_object(bytes, "teachers")
}

/// Decodes the absence document. Same failure rules as [`parse_teachers`].
pub fn parse_absence(bytes: &[u8]) -> Result<AbsenceDocument> {
    parse_object(bytes, "absence")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_object_gives_empty_document() {
        let doc = parse_teachers(b"{}").unwrap();
        assert!(doc.teachers.is_empty());
        assert!(doc.categories.is_empty());
        assert!(doc.points_by_tier.is_empty());

        let doc = parse_absence(b"{}").unwrap();
        assert!(doc.teachers.is_empty());
    }

    #[test]
    fn test_parse_invalid_bytes() {
        assert!(parse_teachers(b"{not json").is_err());
        assert!(parse_absence(&[0xFF, 0xFE, 0x00]).is_err());
    }

    #[test]
    fn test_parse_non_object_top_level() {
        assert!(parse_teachers(b"[1, 2]").is_err());
        assert!(parse_absence(b"\"teachers\"").is_err());
    }

    #[test]
    fn test_parse_degrades_bad_fields() {
        let doc = parse_teachers(
            br#"{
                "pointsByTier": {"t1": "10", "T2": "lots", "T3": 1.5},
                "categories": ["Math", null, 7],
                "teachers": [
                    {"id": 1, "name": "Amy", "categories": {"Math": "t1", "7": 3}},
                    "not a teacher",
                    {"name": "Bob", "categories": ["Math"], "lessonsMissed": "2"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(doc.points_by_tier.points_for(Some("T1")), 10.0);
        assert_eq!(doc.points_by_tier.points_for(Some("T2")), 0.0);
        assert_eq!(doc.points_by_tier.points_for(Some("T3")), 1.5);
        assert_eq!(doc.categories, vec!["Math", "7"]);
        assert_eq!(doc.teachers.len(), 2);
        assert_eq!(doc.teachers[0].id.as_deref(), Some("1"));
        assert_eq!(doc.teachers[0].tier_for("7"), Some("3"));
        assert!(doc.teachers[1].categories.is_empty());
        assert_eq!(doc.teachers[1].embedded_absence(), 2.0);
    }

    #[test]
    fn test_parse_absence_records() {
        let doc = parse_absence(
            br#"{"teachers": [
                {"teacherId": "t-1", "absentDays": 3},
                {"teacherId": 2},
                {"absentDays": 4}
            ]}"#,
        )
        .unwrap();

        assert_eq!(doc.teachers.len(), 3);
        assert_eq!(doc.teachers[1].teacher_id.as_deref(), Some("2"));
        assert_eq!(doc.teachers[1].absent_days, 0.0);
        assert_eq!(doc.teachers[2].teacher_id, None);
    }
}
