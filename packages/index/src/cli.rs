//! Command-line interface for the statute index.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use statute_harvester::{Chunker, EditionWindow, HttpFetcher, SourceLayout};

use crate::config::{EmbedderKind, IndexConfig};
use crate::embedding::Embedder;
use crate::error::Result;
use crate::index::MemoryIndex;
use crate::ingest::ingest_editions;
use crate::store::{StoreSettings, TemporalStore};

/// Statute index - Answer questions about a statute as in force on a date.
#[derive(Parser)]
#[command(name = "statute-index")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Index snapshot file (default: $STATUTE_STORE_PATH or statute-index.json)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Embedder backing the index: hashing or openai (default: $STATUTE_EMBEDDER)
    #[arg(long, global = true)]
    pub embedder: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch and index consolidated editions.
    Ingest {
        /// Portal URLs of the editions
        #[arg(required = true)]
        urls: Vec<String>,
    },

    /// Find the sections most relevant to a question.
    Query {
        text: String,

        /// Date in YYYY-MM-DD format (default: today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// List amending acts introduced by the edition in force on a date.
    Changes {
        /// Date in YYYY-MM-DD format (default: today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Print the full text of an article.
    Article {
        /// Article number, e.g. 5, 10.1(2) or 37-1
        number: String,

        /// Date in YYYY-MM-DD format (default: today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// List the stored editions and their validity windows.
    Editions,
}

/// One stored edition as printed by `editions`.
#[derive(Serialize)]
struct EditionRange {
    effective_from: String,
    effective_to: String,
    title: String,
}

impl From<EditionWindow> for EditionRange {
    fn from(window: EditionWindow) -> Self {
        Self {
            effective_from: window.from_date(),
            effective_to: window.to_date(),
            title: window.title(),
        }
    }
}

type CliStore = TemporalStore<MemoryIndex<Box<dyn Embedder>>>;

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = IndexConfig::from_env()?;
    if let Some(store) = cli.store {
        config = config.with_store_path(store);
    }
    if let Some(embedder) = cli.embedder.as_deref() {
        config = config.with_embedder(embedder.parse::<EmbedderKind>()?);
    }

    let mut store = open_store(&config)?;

    match cli.command {
        Commands::Ingest { urls } => ingest_command(&mut store, &urls),
        Commands::Query { text, date } => print_json(&store.query(&text, &date_or_today(date))?),
        Commands::Changes { date } => print_json(&store.changes(&date_or_today(date))?),
        Commands::Article { number, date } => {
            print_json(&store.full_section(&number, &date_or_today(date))?)
        }
        Commands::Editions => {
            let ranges: Vec<EditionRange> =
                store.edition_ranges()?.into_iter().map(Into::into).collect();
            print_json(&ranges)
        }
    }
}

fn open_store(config: &IndexConfig) -> Result<CliStore> {
    let index = MemoryIndex::open(&config.store_path, config.build_embedder()?)?;
    Ok(TemporalStore::with_settings(index, StoreSettings::from(config)))
}

fn date_or_today(date: Option<String>) -> String {
    date.unwrap_or_else(|| chrono::Local::now().format("%Y-%m-%d").to_string())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message(message);
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Execute the ingest command.
fn ingest_command(store: &mut CliStore, urls: &[String]) -> Result<()> {
    println!("{} {} edition(s)", style("Ingesting").bold(), urls.len());
    println!();

    let pb = spinner("Fetching and indexing editions...");
    let fetcher = HttpFetcher::new()?;
    let report = ingest_editions(
        &fetcher,
        &SourceLayout::eseimas(),
        &Chunker::default(),
        store,
        urls,
    );
    pb.finish_and_clear();

    for edition in &report.succeeded {
        let window = edition
            .window
            .map_or_else(|| "-".to_string(), |w| w.to_string());
        println!(
            "  {} {} ({window}, {} sections, {} chunks)",
            style("✓").green(),
            edition.url,
            edition.sections,
            edition.chunks
        );
    }
    for failure in &report.failed {
        println!(
            "  {} {}: {}",
            style("✗").red(),
            failure.url,
            failure.error
        );
    }

    println!();
    println!(
        "{} {} chunk(s) in {}",
        style("Indexed").green().bold(),
        report.total_chunks(),
        store
            .index()
            .path()
            .map_or_else(|| "memory".to_string(), |p| p.display().to_string())
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_ingest() {
        let cli = Cli::parse_from([
            "statute-index",
            "ingest",
            "https://e-seimas.lrs.lt/portal/legalAct/lt/TAD/A/asr",
            "https://e-seimas.lrs.lt/portal/legalAct/lt/TAD/B/asr",
        ]);

        let Commands::Ingest { urls } = cli.command else {
            panic!("expected ingest command");
        };
        assert_eq!(urls.len(), 2);
    }

    #[test]
    fn test_cli_parse_ingest_requires_url() {
        assert!(Cli::try_parse_from(["statute-index", "ingest"]).is_err());
    }

    #[test]
    fn test_cli_parse_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "statute-index",
            "query",
            "duomenų apsauga",
            "--date",
            "2020-07-15",
            "--store",
            "/tmp/x.json",
        ]);

        assert_eq!(cli.store, Some(PathBuf::from("/tmp/x.json")));
        let Commands::Query { text, date } = cli.command else {
            panic!("expected query command");
        };
        assert_eq!(text, "duomenų apsauga");
        assert_eq!(date.as_deref(), Some("2020-07-15"));
    }

    #[test]
    fn test_cli_parse_article() {
        let cli = Cli::parse_from(["statute-index", "article", "10.1(2)", "-d", "2021-01-01"]);
        let Commands::Article { number, date } = cli.command else {
            panic!("expected article command");
        };
        assert_eq!(number, "10.1(2)");
        assert_eq!(date.as_deref(), Some("2021-01-01"));
    }

    #[test]
    fn test_date_defaults_to_today() {
        let today = date_or_today(None);
        assert!(statute_harvester::validate_date(&today).is_ok());
        assert_eq!(date_or_today(Some("2020-01-01".into())), "2020-01-01");
    }

    #[test]
    fn test_edition_range_view() {
        let range = EditionRange::from(EditionWindow::open_ended(20200701));
        assert_eq!(range.effective_from, "2020-07-01");
        assert_eq!(range.effective_to, "3000-00-00");
        assert_eq!(range.title, "Suvestinė redakcija nuo 2020-07-01");
    }
}
