use std::cmp::Ordering;

use crate::leaderboard::types::{AbsenceEntry, AggregatedTeacher, Ranked};
use crate::model::TeacherRef;

/// Something that can be placed on a leaderboard.
pub trait Rankable {
    /// Higher ranks first.
    fn metric(&self) -> f64;
    /// Ties on the metric are broken by ascending name.
    fn name(&self) -> &str;
    fn teacher(&self) -> TeacherRef;
}

impl Rankable for AggregatedTeacher {
    fn metric(&self) -> f64 {
        self.total_points
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn teacher(&self) -> TeacherRef {
        self.teacher
    }
}

impl Rankable for AbsenceEntry {
    fn metric(&self) -> f64 {
        self.absent_days
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn teacher(&self) -> TeacherRef {
        self.teacher
    }
}

/// Descending metric, then ordinal name comparison. `-0` and `0` tie.
pub fn compare<T: Rankable>(a: &T, b: &T) -> Ordering {
    let (a_metric, b_metric) = (a.metric() + 0.0, b.metric() + 0.0);
    b_metric
        .total_cmp(&a_metric)
        .then_with(|| a.name().cmp(b.name()))
}

/// Orders `items` and numbers them from 1. The sort is stable, so entries
/// equal on both metric and name keep their input order.
pub fn rank<T: Rankable>(items: &[T]) -> Vec<Ranked<&T>> {
    let mut sorted: Vec<&T> = items.iter().collect();
    sorted.sort_by(|a, b| compare(*a, *b));

    sorted
        .into_iter()
        .enumerate()
        .map(|(i, item)| Ranked { rank: i + 1, item })
        .collect()
}

pub fn rank_by_points(aggregated: &[AggregatedTeacher]) -> Vec<Ranked<&AggregatedTeacher>> {
    rank(aggregated)
}

/// Ranks joined absence entries. Unresolvable records must already have
/// been dropped by the join.
pub fn rank_by_absence(entries: &[AbsenceEntry]) -> Vec<Ranked<&AbsenceEntry>> {
    rank(entries)
}
