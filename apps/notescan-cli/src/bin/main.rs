use std::env;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use notescan_cohort::report::{ConsolePreviewSink, JsonShortlistSink, PreviewRenderer};
use notescan_cohort::CohortPipeline;
use notescan_core::config::{expand_path, resolve_with_base, Config};
use notescan_core::source::JsonlSource;
use notescan_core::traits::RecordSink;
use notescan_core::types::ScanSettings;

#[derive(Parser)]
#[command(name = "notescan")]
#[command(about = "Negation-aware condition scoring and review shortlists for clinical notes")]
struct Cli {
    /// Extra TOML config layered over notescan.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a JSON-lines file or directory and shortlist each condition
    Scan {
        /// Input .jsonl file, or a directory of them
        input: String,
        /// Directory for the <condition>_top_<limit>.json files
        #[arg(long)]
        out_dir: Option<String>,
        /// Preview this many records per condition
        #[arg(long)]
        samples: Option<usize>,
        /// Only run these conditions (repeatable)
        #[arg(long = "condition")]
        conditions: Vec<String>,
        /// Print counts and previews without writing files
        #[arg(long)]
        no_write: bool,
    },
    /// Show how one piece of text scores for every condition
    Score {
        text: String,
    },
    /// List the configured conditions and their term categories
    Conditions,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load_with(cli.config.as_deref()).map_err(|e| { eprintln!("Error loading config: {}", e); e })?;
    let mut settings = config.settings()?;

    match cli.command {
        Commands::Scan { input, out_dir, samples, conditions, no_write } => {
            if let Some(dir) = out_dir { settings.report.out_dir = dir; }
            if let Some(n) = samples { settings.report.samples = n; }
            scan(&settings, &input, &conditions, no_write)
        }
        Commands::Score { text } => score(&settings, &text),
        Commands::Conditions => {
            list_conditions(&settings);
            Ok(())
        }
    }
}

fn scan(settings: &ScanSettings, input: &str, only: &[String], no_write: bool) -> anyhow::Result<()> {
    let source = JsonlSource::new(expand_path(input));
    println!("notescan\n========");
    println!("Input: {}", source.root().display());
    let (records, stats) = source.load_with_stats()?;
    println!("Total records loaded: {} ({} files, {} lines skipped)", records.len(), stats.files, stats.skipped);

    let pipeline = CohortPipeline::from_settings(settings)?.only(only)?;
    debug!(conditions = pipeline.len(), window = settings.negation.window, "scoring");
    let pb = ProgressBar::new((records.len() * pipeline.len()) as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
            .context("progress template")?
            .progress_chars("#>-"),
    );
    let cohorts = pipeline.run_with(&records, |condition| {
        if pb.message() != condition.name { pb.set_message(condition.name.clone()); }
        pb.inc(1);
    });
    pb.finish_and_clear();

    println!();
    for cohort in &cohorts {
        let s = &cohort.shortlist;
        println!(
            "{} shortlisted: {} (of {} scoring >= {}; {} records skipped)",
            cohort.condition.display_label(), s.len(), s.qualified, cohort.condition.threshold, s.skipped
        );
    }

    if no_write {
        println!("\nSkipping output files (--no-write)");
    } else {
        let out_dir = resolve_with_base(&env::current_dir()?, &settings.report.out_dir);
        let sink = JsonShortlistSink::new(out_dir);
        for cohort in &cohorts {
            sink.write(&cohort.condition, &cohort.shortlist.records())?;
            println!("Saved {}", sink.path_for(&cohort.condition).display());
        }
    }

    if settings.report.samples > 0 {
        let preview = ConsolePreviewSink::new(PreviewRenderer::from(&settings.report));
        for cohort in &cohorts {
            preview.write(&cohort.condition, &cohort.shortlist.records())?;
        }
    }
    Ok(())
}

fn score(settings: &ScanSettings, text: &str) -> anyhow::Result<()> {
    let pipeline = CohortPipeline::from_settings(settings)?;
    for scorer in pipeline.scorers() {
        let condition = scorer.condition();
        let breakdown = scorer.evaluate(text);
        println!(
            "{}: {}/{} ({})",
            condition.display_label(), breakdown.score, scorer.max_score(), verdict(breakdown.score, condition.threshold)
        );
        for hit in &breakdown.hits {
            println!("  +{} {} via \"{}\"", hit.weight, hit.category, hit.term);
        }
    }
    Ok(())
}

/// `score` sees one text, so it can only compare against the threshold.
fn verdict(score: u32, threshold: u32) -> &'static str {
    if score >= threshold { "meets threshold" } else { "below threshold" }
}

fn list_conditions(settings: &ScanSettings) {
    println!("Negation window: {} chars, {} cues", settings.negation.window, settings.negation.cues.len());
    for condition in &settings.conditions {
        println!(
            "\n{} [{}] threshold={} limit={} max={}",
            condition.display_label(), condition.name, condition.threshold, condition.limit, condition.max_score()
        );
        for category in &condition.categories {
            println!("  +{} {}: {}", category.weight, category.name, category.terms.join(", "));
        }
    }
}
