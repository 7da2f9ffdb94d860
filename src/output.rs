//! Rendering and export of a computed leaderboard.
//!
//! Supports a plain-text terminal view, JSON (optionally gzip-compressed) and
//! a flat CSV of both rankings.

use anyhow::{Context, Result};
use csv::WriterBuilder;
use flate2::Compression;
use flate2::write::GzEncoder;
use serde::Serialize;
use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::leaderboard::types::{
    Leaderboard, LeaderboardEntry, TeacherDetail, TeacherDetails, format_metric,
};
use crate::model::TeacherRef;

/// Which ranking a CSV row or a detail lookup refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Board {
    Points,
    Absence,
}

impl Board {
    pub fn entries(self, leaderboard: &Leaderboard) -> &[LeaderboardEntry] {
        match self {
            Board::Points => &leaderboard.points,
            Board::Absence => &leaderboard.absence,
        }
    }
}

fn write_entries(out: &mut String, title: &str, entries: &[LeaderboardEntry]) {
    let _ = writeln!(out, "## {title}");
    if entries.is_empty() {
        let _ = writeln!(out, "No teachers to rank.");
        return;
    }
    for entry in entries {
        let medal = entry
            .medal
            .map(|m| format!(" [{}]", m.as_str()))
            .unwrap_or_default();
        let _ = writeln!(out, "#{} {}{}  {}", entry.rank, entry.name, medal, entry.label);
    }
}

/// Plain-text rendering of the podiums and the full rankings, the latter cut
/// to `limit` rows when given.
pub fn format_leaderboard(leaderboard: &Leaderboard, limit: Option<usize>) -> String {
    let take = |entries: &[LeaderboardEntry]| -> Vec<LeaderboardEntry> {
        entries
            .iter()
            .take(limit.unwrap_or(usize::MAX))
            .cloned()
            .collect()
    };

    let mut out = String::new();
    write_entries(&mut out, "Top 3 by Points", &leaderboard.top_points);
    let _ = writeln!(out);
    write_entries(&mut out, "Top 3 by Absence", &leaderboard.top_absence);
    let _ = writeln!(out);
    write_entries(&mut out, "Points Leaderboard", &take(&leaderboard.points));
    let _ = writeln!(out);
    write_entries(&mut out, "Absence Leaderboard", &take(&leaderboard.absence));
    out
}

/// Plain-text rendering of one teacher's detail.
pub fn format_detail(detail: &TeacherDetail) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {}", detail.name);
    let _ = writeln!(out, "ID: {}", detail.id);
    let _ = writeln!(out, "Range: {}", detail.range);
    let _ = writeln!(out, "Lessons Missed: {}", format_metric(detail.absent_days));
    if !detail.description.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", detail.description);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "| Category | Tier | Points |");
    let _ = writeln!(out, "|----------|------|--------|");
    for row in &detail.rows {
        let _ = writeln!(
            out,
            "| {} | {} | {} |",
            row.category,
            row.tier,
            format_metric(row.points)
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Total points: {}", format_metric(detail.total_points));
    out
}

/// Prints the leaderboard to stdout.
pub fn print_leaderboard(leaderboard: &Leaderboard, limit: Option<usize>) {
    print!("{}", format_leaderboard(leaderboard, limit));
}

/// Prints one teacher's detail to stdout.
pub fn print_detail(details: &impl TeacherDetails, teacher: TeacherRef) -> Result<()> {
    let detail = details
        .detail(teacher)
        .with_context(|| format!("no teacher at position {}", teacher.0))?;
    print!("{}", format_detail(detail));
    Ok(())
}

/// Adds `.gz` to `path` unless it is already there.
pub fn gz_path(path: &Path) -> PathBuf {
    if path.extension().and_then(|e| e.to_str()) == Some("gz") {
        path.to_path_buf()
    } else {
        let mut name = path.as_os_str().to_owned();
        name.push(".gz");
        PathBuf::from(name)
    }
}

/// Writes the leaderboard as pretty JSON, gzip-compressed when `gzip` is set.
/// Returns the path actually written.
#[tracing::instrument(skip_all, fields(path = %path.display(), gzip = gzip))]
pub fn write_json(path: &Path, leaderboard: &Leaderboard, gzip: bool) -> Result<PathBuf> {
    let body = serde_json::to_vec_pretty(leaderboard)?;

    let target = if gzip { gz_path(path) } else { path.to_path_buf() };
    let file = File::create(&target)
        .with_context(|| format!("failed to create {}", target.display()))?;

    if gzip {
        let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
        encoder.write_all(&body)?;
        encoder.finish()?.flush()?;
    } else {
        let mut writer = BufWriter::new(file);
        writer.write_all(&body)?;
        writer.flush()?;
    }

    info!(path = %target.display(), bytes = body.len(), gzip, "Leaderboard JSON written");
    Ok(target)
}

#[derive(Serialize)]
struct CsvRow<'a> {
    board: Board,
    rank: usize,
    name: &'a str,
    metric: String,
    medal: &'a str,
}

/// Writes both full rankings to a CSV file, replacing any existing file.
pub fn write_rankings_csv(path: &Path, leaderboard: &Leaderboard) -> Result<()> {
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(file);

    let mut rows = 0usize;
    for board in [Board::Points, Board::Absence] {
        for entry in board.entries(leaderboard) {
            writer.serialize(CsvRow {
                board,
                rank: entry.rank,
                name: &entry.name,
                metric: format_metric(entry.value),
                medal: entry.medal.map(|m| m.as_str()).unwrap_or(""),
            })?;
            rows += 1;
        }
    }
    writer.flush()?;

    debug!(path = %path.display(), rows, "Rankings CSV written");
    Ok(())
}
