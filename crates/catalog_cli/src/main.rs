//! Command-line front end for a catalogue snapshot.
//!
//! # Responsibility
//! - Parse commands and map them onto `CatalogService` calls.
//! - Save the snapshot after every successful mutation.
//!
//! # Invariants
//! - Read-only commands never write the snapshot.
//! - Failures print to stderr and exit non-zero.

use catalog_core::{
    default_log_level, init_logging, CatalogConfig, CatalogService, Summary,
};
use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[clap(name = "catalog", about = "Summary catalogue indexed by title, author and keyword", version)]
struct Cli {
    #[clap(subcommand)]
    command: Command,

    /// Directory holding the snapshot file
    #[clap(long, default_value = ".")]
    data_dir: PathBuf,

    /// Write rolling log files into this directory
    #[clap(long)]
    log_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); needs --log-dir
    #[clap(long, requires = "log_dir")]
    log_level: Option<String>,

    /// Bucket count for the title table
    #[clap(long)]
    title_buckets: Option<usize>,

    /// Bucket count for the keyword table
    #[clap(long)]
    keyword_buckets: Option<usize>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List titles alphabetically
    Titles {
        /// Show a one-line preview of each body
        #[clap(long)]
        preview: bool,
    },
    /// List authors alphabetically with their titles
    Authors,
    /// List registered keywords
    Keywords,
    /// List titles in storage order
    AllTitles,
    /// Show one summary in full
    Show { title: String },
    /// List summaries by an author (case-insensitive)
    Author { name: String },
    /// List summaries tagged with a keyword
    Keyword { word: String },
    /// Add a summary
    Add {
        #[clap(long)]
        title: String,
        #[clap(long = "author", required = true)]
        authors: Vec<String>,
        #[clap(long = "keyword")]
        keywords: Vec<String>,
        #[clap(long, default_value = "")]
        body: String,
    },
    /// Remove a summary and everything only it referenced
    Remove { title: String },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_ref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        if let Err(err) = init_logging(level, log_dir) {
            eprintln!("warning: logging disabled: {err}");
        }
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let mut config = CatalogConfig::default();
    if let Some(buckets) = cli.title_buckets {
        config.title_buckets = buckets;
    }
    if let Some(buckets) = cli.keyword_buckets {
        config.keyword_buckets = buckets;
    }

    let service = CatalogService::open(config, &cli.data_dir);
    info!(
        "event=cli_command module=cli status=start summaries={}",
        service.len()
    );

    match &cli.command {
        Command::Titles { preview } => {
            if *preview {
                for item in service.previews_sorted() {
                    println!("{} | {}", item.title, item.preview.unwrap_or_default());
                }
            } else {
                print_lines(service.titles_sorted());
            }
        }
        Command::Authors => {
            for author in service.authors_sorted() {
                println!("{} ({})", author.name, author.titles.join(", "));
            }
        }
        Command::Keywords => print!("{}", ensure_newline(service.keyword_listing())),
        Command::AllTitles => print_lines(service.all_titles_unsorted()),
        Command::Show { title } => {
            let details = service.details(title).map_err(|err| err.to_string())?;
            println!("{details}");
        }
        Command::Author { name } => {
            let found = service
                .summaries_by_author(name)
                .ok_or_else(|| format!("author not found: `{name}`"))?;
            print_lines(found.iter().map(|summary| summary.title().to_string()));
        }
        Command::Keyword { word } => {
            let found = service
                .summaries_by_keyword(word)
                .ok_or_else(|| format!("keyword not found: `{word}`"))?;
            print_lines(found.iter().map(|summary| summary.title().to_string()));
        }
        Command::Add {
            title,
            authors,
            keywords,
            body,
        } => {
            let summary = Summary::new(title.as_str(), authors, body.as_str(), keywords)
                .map_err(|err| err.to_string())?;
            if !service.add_summary(summary) {
                return Err(format!("title already catalogued: `{title}`"));
            }
            service.save().map_err(|err| err.to_string())?;
            println!("added `{title}`");
        }
        Command::Remove { title } => {
            if !service.remove_summary(title) {
                return Err(format!("summary not found: `{title}`"));
            }
            service.save().map_err(|err| err.to_string())?;
            println!("removed `{title}`");
        }
    }
    Ok(())
}

fn print_lines(lines: impl IntoIterator<Item = String>) {
    for line in lines {
        println!("{line}");
    }
}

fn ensure_newline(mut text: String) -> String {
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}
