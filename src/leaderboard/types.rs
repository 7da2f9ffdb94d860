//! Data types produced by the leaderboard pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::leaderboard::medal::Medal;
use crate::model::TeacherRef;

/// Points earned in one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: String,
    /// Normalized tier, `None` when the category has no assignment.
    pub tier: Option<String>,
    pub points: f64,
}

/// A teacher with the per-category breakdown and total applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedTeacher {
    pub teacher: TeacherRef,
    pub name: String,
    pub per_category: Vec<CategoryScore>,
    pub total_points: f64,
}

/// An absence count resolved to a known teacher.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AbsenceEntry {
    pub teacher: TeacherRef,
    pub name: String,
    pub absent_days: f64,
}

/// An item at its 1-based position in a ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranked<T> {
    pub rank: usize,
    pub item: T,
}

/// A ready-to-render leaderboard row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub name: String,
    /// Total points or absence count the row was ranked by.
    pub value: f64,
    /// `"Points: N"` or `"Absent: N"`.
    pub label: String,
    pub medal: Option<Medal>,
    pub teacher: TeacherRef,
}

/// One row of the detail table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailRow {
    pub category: String,
    pub tier: String,
    pub points: f64,
}

/// Everything the detail view shows for one teacher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeacherDetail {
    pub teacher: TeacherRef,
    pub name: String,
    pub id: String,
    pub range: String,
    pub absent_days: f64,
    pub description: String,
    pub rows: Vec<DetailRow>,
    pub total_points: f64,
}

/// Complete leaderboard for one load, written out as JSON by `render`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leaderboard {
    pub schema_version: u8,
    pub generated_at: DateTime<Utc>,
    pub top_points: Vec<LeaderboardEntry>,
    pub top_absence: Vec<LeaderboardEntry>,
    pub points: Vec<LeaderboardEntry>,
    pub absence: Vec<LeaderboardEntry>,
    /// Indexed by [`TeacherRef`].
    pub details: Vec<TeacherDetail>,
}

/// Detail lookup handed to views alongside the ranked lists.
pub trait TeacherDetails {
    fn detail(&self, teacher: TeacherRef) -> Option<&TeacherDetail>;
}

impl TeacherDetails for Leaderboard {
    fn detail(&self, teacher: TeacherRef) -> Option<&TeacherDetail> {
        self.details.get(teacher.0)
    }
}

/// Formats a metric the way labels show it: `10`, `2.5`.
pub fn format_metric(value: f64) -> String {
    // avoid "-0"
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{value}")
}
