//! docxgen CLI - Word document generation tool
//!
//! A command-line tool for building DOCX files from JSON page content and
//! checking the structure of the result.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use colored::*;
use docxgen::package::{PackageReader, DOCUMENT_PATH};
use docxgen::ContentSource;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

/// Word document generation from structured page content
#[derive(Parser)]
#[command(
    name = "docxgen",
    author = "iyulab",
    version,
    about = "Generate Word documents from structured content",
    long_about = "docxgen - Dependency-light DOCX generation.\n\n\
                  Renders titled pages of text lines from a JSON content file into a\n\
                  valid Office Open XML word-processing package."
)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a DOCX file from a JSON content file
    Build {
        /// Input content file (JSON)
        input: PathBuf,

        /// Output file path (default: input with .docx extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Creation date (YYYY-MM-DD), overriding the content file; also
        /// fills `{date}` placeholders in page text
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Fill page and word counts from the content
        #[arg(long)]
        counts: bool,
    },

    /// List the parts, content types and relationships of a DOCX file
    Inspect {
        /// Input file path
        input: PathBuf,
    },

    /// Check the package structure of a DOCX file
    Verify {
        /// Input file path
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(2),
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

/// Run a command; `Ok(false)` means the command ran but found problems.
fn run(cli: Cli) -> Result<bool, Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Build {
            input,
            output,
            date,
            counts,
        } => {
            let pb = create_spinner("Loading content...");

            let mut source = ContentSource::from_path(&input)?;
            if let Some(date) = date {
                source.metadata = source.metadata.with_date(date);
            }
            if counts {
                source.metadata = source.metadata.with_counts_from(&source.pages);
            }
            log::debug!(
                "Loaded {} pages from {}",
                source.pages.len(),
                input.display()
            );

            pb.set_message("Writing document...");
            let output = output.unwrap_or_else(|| input.with_extension("docx"));
            docxgen::generate_from_source(&source, &output)?;

            pb.finish_and_clear();
            println!(
                "{} Wrote {} pages to {}",
                "✓".green().bold(),
                source.pages.len(),
                output.display()
            );
        }

        Commands::Inspect { input } => {
            let reader = PackageReader::open(&input)?;
            let types = reader.content_types()?;

            println!("{}", "Parts".cyan().bold());
            println!("{}", "─".repeat(40));
            for name in reader.entry_names() {
                let content_type = types.content_type_for(&name).unwrap_or("-");
                println!("{}  {}", name.bold(), content_type.dimmed());
            }

            for part in ["", DOCUMENT_PATH] {
                let rels = reader.relationships(part)?;
                let label = if part.is_empty() { "package" } else { part };
                println!("\n{} ({})", "Relationships".cyan().bold(), label);
                println!("{}", "─".repeat(40));
                if rels.is_empty() {
                    println!("{}", "(none)".dimmed());
                }
                for rel in rels.iter() {
                    println!("{}: {} {}", rel.id.bold(), rel.target, rel.rel_type.dimmed());
                }
            }

            let paragraphs = reader.paragraph_texts()?;
            let words: usize = paragraphs.iter().map(|p| p.split_whitespace().count()).sum();
            println!("\n{}", "Content Statistics".cyan().bold());
            println!("{}", "─".repeat(40));
            println!("{}: {}", "Paragraphs".bold(), paragraphs.len());
            println!("{}: {}", "Words".bold(), words);
        }

        Commands::Verify { input } => {
            let report = PackageReader::open(&input)?.verify()?;
            if report.is_ok() {
                println!(
                    "{} {} ({} parts)",
                    "✓".green().bold(),
                    input.display(),
                    report.entries.len()
                );
            } else {
                println!("{} {}", "✗".red().bold(), input.display());
                for problem in report.summary().split("; ") {
                    println!("  {}", problem);
                }
                return Ok(false);
            }
        }

        Commands::Version => {
            print_version();
        }
    }

    Ok(true)
}

fn print_version() {
    println!("{} {}", "docxgen".green().bold(), env!("CARGO_PKG_VERSION"));
    println!("Word document generation from structured page content");
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
