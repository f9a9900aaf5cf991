//! Command-line interface for the harvester.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::chunker::Chunker;
use crate::dump::{save_yaml, EditionDump};
use crate::error::Result;
use crate::harvester::{fetch_statute_text, harvest_edition};
use crate::http::HttpFetcher;
use crate::layout::SourceLayout;

/// Statute harvester - Split consolidated e-seimas editions into dated sections.
#[derive(Parser)]
#[command(name = "statute-harvester")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch one edition and write its sections and chunks as YAML.
    Dump {
        /// Portal URL of the edition
        url: String,

        /// Output file (default: edition.yaml)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the plain text of a statute page (e.g. an amending act).
    Text {
        /// Portal URL of the page
        url: String,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Dump { url, output } => dump_command(&url, output.as_deref()),
        Commands::Text { url } => text_command(&url),
    }
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

/// Execute the dump command.
fn dump_command(url: &str, output: Option<&Path>) -> Result<()> {
    let output = output.unwrap_or(Path::new("edition.yaml"));
    let layout = SourceLayout::eseimas();

    println!("{} {}", style("Harvesting").bold(), style(url).cyan());
    println!();

    let pb = spinner("Fetching edition...");

    let fetcher = HttpFetcher::new()?;
    let sections = match harvest_edition(&fetcher, &layout, url) {
        Ok(sections) => sections,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.set_message("Chunking sections...");
    let chunks = Chunker::default().chunk_all(&sections);
    let dump = EditionDump::new(url, &sections, &chunks);

    pb.set_message("Saving YAML...");
    let saved = save_yaml(&dump, output);
    pb.finish_and_clear();
    let saved = saved?;

    println!("  Edition: {}", style(&dump.edition).green());
    println!("  Sections: {}", sections.len());
    println!("  Chunks: {}", chunks.len());
    println!();
    println!("{} {}", style("Saved to:").green().bold(), saved.display());

    Ok(())
}

/// Execute the text command.
fn text_command(url: &str) -> Result<()> {
    let fetcher = HttpFetcher::new()?;
    let text = fetch_statute_text(&fetcher, &SourceLayout::eseimas(), url)?;
    println!("{text}");
    Ok(())
}
