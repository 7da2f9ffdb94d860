use crate::leaderboard::types::{AggregatedTeacher, CategoryScore};
use crate::model::{DataSet, Teacher, TeacherRef};
use crate::tier::{PointsByTier, normalize};

/// Scores a teacher across `categories`, in that order.
///
/// Categories the teacher has no tier for contribute 0 points. Categories the
/// teacher carries but that are not listed in `categories` are ignored.
pub fn aggregate(
    teacher_ref: TeacherRef,
    teacher: &Teacher,
    categories: &[String],
    points_by_tier: &PointsByTier,
) -> AggregatedTeacher {
    let per_category: Vec<CategoryScore> = categories
        .iter()
        .map(|category| {
            let raw = teacher.tier_for(category);
            CategoryScore {
                category: category.clone(),
                tier: normalize(raw),
                points: points_by_tier.points_for(raw),
            }
        })
        .collect();

    let total_points = per_category.iter().map(|c| c.points).sum();

    AggregatedTeacher {
        teacher: teacher_ref,
        name: teacher.name.clone(),
        per_category,
        total_points,
    }
}

/// Aggregates every teacher in the data set, in document order.
pub fn aggregate_all(data: &DataSet) -> Vec<AggregatedTeacher> {
    let doc = &data.teachers;
    doc.teachers
        .iter()
        .enumerate()
        .map(|(i, teacher)| aggregate(TeacherRef(i), teacher, &doc.categories, &doc.points_by_tier))
        .collect()
}
