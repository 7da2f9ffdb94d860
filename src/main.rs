//! CLI entry point for the teacher leaderboard.
//!
//! Loads the teachers document (and optionally a separate absence document),
//! ranks teachers by points and by absence, and renders the result to the
//! terminal, a JSON file or a CSV file.

use anyhow::{Result, bail};
use clap::{ArgGroup, Args, Parser, Subcommand};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use teacher_leaderboard::fetch::{BasicClient, Source};
use teacher_leaderboard::leaderboard::{self, Leaderboard};
use teacher_leaderboard::load::load;
use teacher_leaderboard::model::DataSet;
use teacher_leaderboard::output::{
    Board, print_detail, print_leaderboard, write_json, write_rankings_csv,
};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "teacher_leaderboard")]
#[command(about = "Rank teachers by tier points and absences", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SourceArgs {
    /// Teachers document: a file path or URL
    #[arg(
        short,
        long,
        value_name = "FILE_OR_URL",
        default_value = "data/teacher_leaderboard.json"
    )]
    teachers: String,

    /// Absence document: a file path or URL. Without it, absence counts are
    /// read from the teacher records
    #[arg(short, long, value_name = "FILE_OR_URL")]
    absence: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the podiums and full rankings
    Show {
        #[command(flatten)]
        sources: SourceArgs,

        /// Only print the first N rows of each full ranking
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Print one teacher's category breakdown
    #[command(group(
        ArgGroup::new("target")
            .args(["id", "rank"])
            .required(true)
    ))]
    Detail {
        #[command(flatten)]
        sources: SourceArgs,

        /// Teacher id
        #[arg(long)]
        id: Option<String>,

        /// 1-based position on the chosen board
        #[arg(long)]
        rank: Option<usize>,

        /// Board that --rank refers to
        #[arg(long, value_enum, default_value_t = Board::Points)]
        board: Board,
    },
    /// Write the computed leaderboard as JSON
    Render {
        #[command(flatten)]
        sources: SourceArgs,

        /// Output file
        #[arg(short, long, default_value = "leaderboard.json")]
        output: PathBuf,

        /// Gzip compress the JSON (".gz" is appended to the file name)
        #[arg(long, default_value_t = false)]
        gzip: bool,
    },
    /// Write both full rankings to a CSV file
    Export {
        #[command(flatten)]
        sources: SourceArgs,

        /// Output file
        #[arg(short, long, default_value = "rankings.csv")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/teacher_leaderboard.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("teacher_leaderboard.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Show { sources, limit } => {
            let (_, board) = load_leaderboard(&sources).await?;
            print_leaderboard(&board, limit);
        }
        Commands::Detail {
            sources,
            id,
            rank,
            board: which,
        } => {
            let (data, board) = load_leaderboard(&sources).await?;

            let teacher = match (id, rank) {
                (Some(id), _) => match data.teachers_by_id.get(&id) {
                    Some(teacher) => *teacher,
                    None => bail!("no teacher with id '{id}'"),
                },
                (None, Some(rank)) => {
                    let entries = which.entries(&board);
                    match rank.checked_sub(1).and_then(|i| entries.get(i)) {
                        Some(entry) => entry.teacher,
                        None => bail!(
                            "rank {rank} is out of range (the {which:?} board has {} entries)",
                            entries.len()
                        ),
                    }
                }
                (None, None) => bail!("either --id or --rank is required"),
            };

            print_detail(&board, teacher)?;
        }
        Commands::Render {
            sources,
            output,
            gzip,
        } => {
            let (_, board) = load_leaderboard(&sources).await?;
            let written = write_json(&output, &board, gzip)?;
            info!(path = %written.display(), "Leaderboard rendered");
        }
        Commands::Export { sources, output } => {
            let (_, board) = load_leaderboard(&sources).await?;
            write_rankings_csv(&output, &board)?;
            info!(
                path = %output.display(),
                points = board.points.len(),
                absence = board.absence.len(),
                "Rankings exported"
            );
        }
    }

    Ok(())
}

/// Loads both documents and computes the leaderboard.
async fn load_leaderboard(sources: &SourceArgs) -> Result<(DataSet, Leaderboard)> {
    let client = BasicClient::new();
    let teachers = Source::parse(&sources.teachers);
    let absence = sources.absence.as_deref().map(Source::parse);

    let data = load(&client, &teachers, absence.as_ref()).await?;
    let board = leaderboard::build(&data);

    info!(
        teachers = board.details.len(),
        ranked_absences = board.absence.len(),
        "Leaderboard computed"
    );
    Ok((data, board))
}
