use std::collections::HashMap;
use tracing::debug;

use crate::leaderboard::types::AbsenceEntry;
use crate::model::{AbsenceRecord, Teacher, TeacherRef};

/// Indexes teachers by id in one pass. A repeated id points at its last
/// occurrence; teachers without an id are left out.
pub fn index_by_id(teachers: &[Teacher]) -> HashMap<String, TeacherRef> {
    teachers
        .iter()
        .enumerate()
        .filter_map(|(i, t)| t.id.clone().map(|id| (id, TeacherRef(i))))
        .collect()
}

/// Pairs absence records with their teachers, keeping record order.
///
/// Records whose teacher id is missing or unknown are dropped without an
/// error; absence history can outlive the teachers list.
pub fn join_absence(
    records: &[AbsenceRecord],
    teachers: &[Teacher],
    teachers_by_id: &HashMap<String, TeacherRef>,
) -> Vec<AbsenceEntry> {
    records
        .iter()
        .filter_map(|record| {
            let found = record
                .teacher_id
                .as_ref()
                .and_then(|id| teachers_by_id.get(id))
                .and_then(|r| teachers.get(r.0).map(|t| (*r, t)));

            match found {
                Some((teacher, t)) => Some(AbsenceEntry {
                    teacher,
                    name: t.name.clone(),
                    absent_days: record.absent_days,
                }),
                None => {
                    debug!(teacher_id = ?record.teacher_id, "Dropping absence record with unknown teacher");
                    None
                }
            }
        })
        .collect()
}

/// Absence entries for documents that carry the count on each teacher.
pub fn embedded_absence(teachers: &[Teacher]) -> Vec<AbsenceEntry> {
    teachers
        .iter()
        .enumerate()
        .map(|(i, t)| AbsenceEntry {
            teacher: TeacherRef(i),
            name: t.name.clone(),
            absent_days: t.embedded_absence(),
        })
        .collect()
}
