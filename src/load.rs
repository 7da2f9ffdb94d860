//! One-shot loading of a leaderboard data set.

use anyhow::{Context, Result};
use tracing::{error, info};

use crate::fetch::{HttpClient, Source, read_source};
use crate::model::{AbsenceDocument, DataSet};
use crate::parser::{parse_absence, parse_teachers};

/// Error shown in place of the leaderboard when a load fails.
pub const LOAD_FAILED: &str = "Failed to load leaderboard data.";

/// Fetches and parses the teachers document and, when given, the absence
/// document. Both reads run concurrently.
///
/// The load succeeds or fails as a unit: if either source cannot be read or
/// parsed, no data set is produced. There are no retries.
#[tracing::instrument(skip_all, fields(teachers = %teachers, absence = tracing::field::Empty))]
pub async fn load<C: HttpClient>(
    client: &C,
    teachers: &Source,
    absence: Option<&Source>,
) -> Result<DataSet> {
    if let Some(source) = absence {
        tracing::Span::current().record("absence", tracing::field::display(source));
    }

    let result = load_inner(client, teachers, absence).await;
    if let Err(e) = &result {
        error!(error = %format!("{e:#}"), "{LOAD_FAILED}");
    }
    result.context(LOAD_FAILED)
}

async fn load_inner<C: HttpClient>(
    client: &C,
    teachers: &Source,
    absence: Option<&Source>,
) -> Result<DataSet> {
    let absence_read = async {
        match absence {
            Some(source) => read_source(client, source).await.map(Some),
            None => Ok(None),
        }
    };

    let (teacher_bytes, absence_bytes) =
        tokio::try_join!(read_source(client, teachers), absence_read)?;

    let teachers_doc = parse_teachers(&teacher_bytes)?;
    let absence_doc: Option<AbsenceDocument> =
        absence_bytes.as_deref().map(parse_absence).transpose()?;

    info!(
        teachers = teachers_doc.teachers.len(),
        categories = teachers_doc.categories.len(),
        tiers = teachers_doc.points_by_tier.len(),
        absence_records = absence_doc.as_ref().map(|d| d.teachers.len()),
        "Leaderboard data loaded"
    );

    Ok(DataSet::new(teachers_doc, absence_doc))
}
