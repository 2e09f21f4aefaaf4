use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::indexer::build_corpus;
use crate::models::{AnalysisConfig, SearchOptions};
use crate::parsers::parse_transcript;
use crate::render::render_session;
use crate::search::search;
use crate::utils::{get_transcripts_dir, read_transcript};

#[derive(Parser)]
#[command(name = "transcript-insights")]
#[command(version = "0.1.0")]
#[command(about = "Parse and search AI coding session transcripts", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show statistics about the transcript corpus
    Stats,
    /// Search parsed sessions with filters and keyword ranking
    Search {
        /// Relevance keyword; sessions that never mention it are dropped
        #[arg(short, long)]
        keyword: Option<String>,
        /// Project name substring (case-insensitive)
        #[arg(short, long)]
        project: Option<String>,
        /// Minimum session duration in seconds (inclusive)
        #[arg(long)]
        min_duration: Option<u64>,
        /// Maximum session duration in seconds (inclusive)
        #[arg(long)]
        max_duration: Option<u64>,
        /// Only sessions with (true) or without (false) struggle signals
        #[arg(long)]
        has_struggle: Option<bool>,
        /// Exact struggle indicator, e.g. long-session or high-error-rate
        #[arg(long)]
        struggle_pattern: Option<String>,
        /// Page size (default 10)
        #[arg(short, long)]
        limit: Option<usize>,
        /// Results to skip before the page
        #[arg(short, long)]
        offset: Option<usize>,
        /// Emit results as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Parse one transcript file and display it
    Show {
        /// Path to the transcript markdown file
        file: PathBuf,
        /// Emit the parsed session as JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Stats) => show_stats(),
        Some(Commands::Search {
            keyword,
            project,
            min_duration,
            max_duration,
            has_struggle,
            struggle_pattern,
            limit,
            offset,
            json,
        }) => {
            let options = SearchOptions {
                keyword,
                project,
                min_duration,
                max_duration,
                has_struggle,
                struggle_pattern,
                limit,
                offset,
            };
            run_search(&options, json)
        }
        Some(Commands::Show { file, json }) => show_transcript(&file, json),
        None => {
            println!("Use --help for usage information");
            Ok(())
        }
    }
}

fn show_stats() -> Result<()> {
    let dir = get_transcripts_dir()?;
    let corpus = build_corpus(&dir, &AnalysisConfig::default())?;

    let total_tools: usize = corpus.iter().map(|s| s.metadata.tool_count).sum();
    let total_messages: usize = corpus.iter().map(|s| s.conversation.len()).sum();
    let struggling = corpus
        .iter()
        .filter(|s| s.has_struggle(&AnalysisConfig::default()))
        .count();

    println!("Session Transcript Statistics");
    println!("================================");
    println!("Sessions: {}", corpus.len());
    println!("  Messages: {}", total_messages);
    println!("  Tool operations: {}", total_tools);
    println!("  Sessions with struggles: {}", struggling);
    println!();
    println!("Transcripts directory: {}", dir.display());

    Ok(())
}

fn run_search(options: &SearchOptions, json: bool) -> Result<()> {
    let dir = get_transcripts_dir()?;
    let corpus = build_corpus(&dir, &AnalysisConfig::default())?;
    let results = search(&corpus, options)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("No matching sessions");
        return Ok(());
    }
    for result in &results {
        println!("{} [{:.1}] {}", result.session_id, result.relevance_score, result.summary);
        if !result.match_context.is_empty() {
            println!("    {}", result.match_context);
        }
    }
    Ok(())
}

fn show_transcript(file: &Path, json: bool) -> Result<()> {
    let body = read_transcript(file)?;
    let session = parse_transcript(&file.to_string_lossy(), &body);

    if json {
        println!("{}", serde_json::to_string_pretty(&session)?);
    } else {
        print!("{}", render_session(&session));
    }
    Ok(())
}
