use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::debug;

use crate::leaderboard::aggregate::aggregate_all;
use crate::leaderboard::join::{embedded_absence, join_absence};
use crate::leaderboard::medal::medal;
use crate::leaderboard::rank::{Rankable, rank_by_absence, rank_by_points};
use crate::leaderboard::types::{
    AbsenceEntry, AggregatedTeacher, DetailRow, Leaderboard, LeaderboardEntry, Ranked,
    TeacherDetail, format_metric,
};
use crate::model::{DataSet, TeacherRef};
use crate::tier::{PLACEHOLDER, label};

pub const SCHEMA_VERSION: u8 = 1;

/// How many entries the podium lists hold.
pub const TOP_N: usize = 3;

/// Builds every list a view needs from one loaded data set.
pub fn build(data: &DataSet) -> Leaderboard {
    build_at(data, Utc::now())
}

pub fn build_at(data: &DataSet, generated_at: DateTime<Utc>) -> Leaderboard {
    let aggregated = aggregate_all(data);
    let absence = absence_entries(data);

    let points: Vec<LeaderboardEntry> = rank_by_points(&aggregated)
        .iter()
        .map(|r| entry(r, format!("Points: {}", format_metric(r.item.total_points))))
        .collect();

    let absence_list: Vec<LeaderboardEntry> = rank_by_absence(&absence)
        .iter()
        .map(|r| entry(r, format!("Absent: {}", format_metric(r.item.absent_days))))
        .collect();

    let details = details(data, &aggregated, &absence);

    debug!(
        teachers = aggregated.len(),
        absence_entries = absence_list.len(),
        "Leaderboard built"
    );

    Leaderboard {
        schema_version: SCHEMA_VERSION,
        generated_at,
        top_points: points.iter().take(TOP_N).cloned().collect(),
        top_absence: absence_list.iter().take(TOP_N).cloned().collect(),
        points,
        absence: absence_list,
        details,
    }
}

/// Joined records when an absence document was loaded, else the counts on
/// the teacher records.
fn absence_entries(data: &DataSet) -> Vec<AbsenceEntry> {
    let teachers = &data.teachers.teachers;
    match &data.absence {
        Some(doc) => join_absence(&doc.teachers, teachers, &data.teachers_by_id),
        None => embedded_absence(teachers),
    }
}

fn entry<T: Rankable>(ranked: &Ranked<&T>, label: String) -> LeaderboardEntry {
    LeaderboardEntry {
        rank: ranked.rank,
        name: ranked.item.name().to_string(),
        value: ranked.item.metric(),
        label,
        medal: medal(ranked.rank),
        teacher: ranked.item.teacher(),
    }
}

fn details(
    data: &DataSet,
    aggregated: &[AggregatedTeacher],
    absence: &[AbsenceEntry],
) -> Vec<TeacherDetail> {
    // Several records for one teacher: the last one wins.
    let joined: HashMap<TeacherRef, f64> = absence
        .iter()
        .map(|a| (a.teacher, a.absent_days))
        .collect();

    aggregated
        .iter()
        .filter_map(|agg| {
            let teacher = data.teacher(agg.teacher)?;
            Some(TeacherDetail {
                teacher: agg.teacher,
                name: teacher.name.clone(),
                id: teacher.id.clone().unwrap_or_else(|| PLACEHOLDER.to_string()),
                range: teacher
                    .range
                    .clone()
                    .unwrap_or_else(|| PLACEHOLDER.to_string()),
                absent_days: joined
                    .get(&agg.teacher)
                    .copied()
                    .unwrap_or_else(|| teacher.embedded_absence()),
                description: teacher.description.clone().unwrap_or_default(),
                rows: agg
                    .per_category
                    .iter()
                    .map(|c| DetailRow {
                        category: c.category.clone(),
                        tier: label(c.tier.as_deref()),
                        points: c.points,
                    })
                    .collect(),
                total_points: agg.total_points,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaderboard::medal::Medal;
    use crate::leaderboard::types::TeacherDetails;
    use crate::model::{AbsenceDocument, TeachersDocument};
    use serde_json::json;

    fn teachers_doc() -> TeachersDocument {
        serde_json::from_value(json!({
            "pointsByTier": {"T1": 10, "T2": 5, "T3": 1},
            "categories": ["Math", "Science"],
            "teachers": [
                {"id": "a", "name": "Zed", "categories": {"Math": "T1"}, "lessonsMissed": 1},
                {"id": "b", "name": "Amy", "categories": {"Math": "t2", "Science": "T2"}},
                {"id": "c", "name": "Cal", "range": "Y7-9", "categories": {"Science": "T3"}},
                {"id": "d", "name": "Dee", "categories": {}, "lessonsMissed": 6},
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_lists_and_labels() {
        let board = build(&DataSet::new(teachers_doc(), None));

        let names: Vec<_> = board.points.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Amy", "Zed", "Cal", "Dee"]);
        assert_eq!(board.points[0].label, "Points: 10");
        assert_eq!(board.points[0].medal, Some(Medal::Gold));
        assert_eq!(board.points[3].medal, None);
        assert_eq!(board.top_points.len(), 3);
        assert_eq!(board.top_points[..], board.points[..3]);

        assert_eq!(board.absence[0].name, "Dee");
        assert_eq!(board.absence[0].label, "Absent: 6");
        assert_eq!(board.top_absence.len(), 3);
    }

    #[test]
    fn test_joined_absence_replaces_embedded_counts() {
        let absence: AbsenceDocument = serde_json::from_value(json!({
            "teachers": [
                {"teacherId": "c", "absentDays": 4},
                {"teacherId": "zz", "absentDays": 50},
            ]
        }))
        .unwrap();
        let board = build(&DataSet::new(teachers_doc(), Some(absence)));

        assert_eq!(board.absence.len(), 1);
        assert_eq!(board.absence[0].name, "Cal");
        assert_eq!(board.absence[0].rank, 1);
        assert_eq!(board.top_absence.len(), 1);
    }

    #[test]
    fn test_detail_lookup_by_reference() {
        let board = build(&DataSet::new(teachers_doc(), None));
        let top = &board.points[0];
        let detail = board.detail(top.teacher).unwrap();

        assert_eq!(detail.name, "Amy");
        assert_eq!(detail.id, "b");
        assert_eq!(detail.range, "-");
        assert_eq!(detail.description, "");
        assert_eq!(detail.total_points, 10.0);
        assert_eq!(detail.rows.len(), 2);
        assert_eq!(detail.rows[0].tier, "T2");

        let cal = board.detail(TeacherRef(2)).unwrap();
        assert_eq!(cal.range, "Y7-9");
        assert_eq!(cal.rows[0].tier, "-");
        assert_eq!(cal.rows[0].points, 0.0);

        assert!(board.detail(TeacherRef(99)).is_none());
    }

    #[test]
    fn test_empty_data_set() {
        let board = build(&DataSet::new(TeachersDocument::default(), None));
        assert!(board.points.is_empty());
        assert!(board.top_absence.is_empty());
        assert!(board.details.is_empty());
    }
}
