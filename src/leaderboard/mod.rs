//! Leaderboard scoring and ranking.
//!
//! This module folds per-category tier assignments into point totals, joins
//! absence records back to teachers, orders both metrics with a name
//! tie-break, and packages the results as the lists and per-teacher details
//! a view renders.

pub mod aggregate;
pub mod board;
pub mod join;
pub mod medal;
pub mod rank;
pub mod types;

pub use board::build;
pub use types::{Leaderboard, LeaderboardEntry, TeacherDetail, TeacherDetails};
