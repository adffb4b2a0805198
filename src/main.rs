mod config;
mod index;
mod model;
mod parser;
mod store;

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use config::QuizMeta;
use index::Merge;
use model::QuizDocument;
use parser::Extraction;

#[derive(Parser)]
#[command(name = "quizbank", about = "Quiz page extractor and JSON catalog builder")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract questions from a rendered quiz page into a JSON document
    Extract {
        /// Quiz page markup
        #[arg(default_value = config::DEFAULT_INPUT)]
        input: PathBuf,
        /// Output document
        #[arg(short, long, default_value = config::DEFAULT_OUTPUT)]
        output: PathBuf,
        #[arg(long, env = "QUIZ_TITLE", default_value = config::QUIZ_TITLE)]
        title: String,
        #[arg(long, env = "QUIZ_DESCRIPTION", default_value = config::QUIZ_DESCRIPTION, hide_default_value = true)]
        description: String,
        /// Questions served per quiz round
        #[arg(long = "per-quiz", env = "QUESTIONS_PER_QUIZ", default_value_t = config::QUESTIONS_PER_QUIZ)]
        questions_per_quiz: usize,
    },
    /// Add or update every JSON document of a directory in the catalog
    Index(CatalogArgs),
    /// Show catalog statistics
    Stats(CatalogArgs),
}

#[derive(Args)]
struct CatalogArgs {
    /// Directory holding the quiz documents
    #[arg(short, long, default_value = ".")]
    dir: PathBuf,
    /// Catalog file name inside the directory
    #[arg(long, default_value = config::INDEX_FILE)]
    index_file: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Extract {
            input,
            output,
            title,
            description,
            questions_per_quiz,
        } => {
            let meta = QuizMeta {
                title,
                description,
                questions_per_quiz,
            };
            match run_extract(&input, &output, &meta)? {
                ExtractOutcome::MissingInput => {
                    println!("Error: {} not found", input.display());
                    println!("Make sure the quiz page is in the current directory.");
                }
                ExtractOutcome::Empty(extraction) => {
                    log_extraction(&extraction);
                    println!("No questions found in {}", input.display());
                }
                ExtractOutcome::Written(doc, extraction) => {
                    log_extraction(&extraction);
                    println!(
                        "\nExtracted {} questions and saved them to {}",
                        doc.total_questions,
                        output.display()
                    );
                    print_extract_summary(&doc);
                }
            }
            Ok(())
        }
        Commands::Index(args) => {
            let pb = ProgressBar::new(0);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len}")?
                    .progress_chars("#>-"),
            );
            match index::reconcile(&args.dir, &args.index_file, &pb)? {
                None => {
                    println!(
                        "No JSON files found in {} (besides {})",
                        args.dir.display(),
                        args.index_file
                    );
                }
                Some(r) => {
                    for d in &r.diagnostics {
                        warn!("{}", d);
                    }
                    print_reconciliation(&r, &args.dir.join(&args.index_file));
                }
            }
            Ok(())
        }
        Commands::Stats(args) => {
            print_catalog_stats(&args.dir.join(&args.index_file));
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

enum ExtractOutcome {
    MissingInput,
    Empty(Extraction),
    Written(QuizDocument, Extraction),
}

/// Read markup, extract, and write the document only when questions were found.
fn run_extract(input: &Path, output: &Path, meta: &QuizMeta) -> anyhow::Result<ExtractOutcome> {
    let Some(html) = store::read_markup(input)? else {
        return Ok(ExtractOutcome::MissingInput);
    };

    let mut extraction = parser::extract_questions(&html);
    if extraction.questions.is_empty() {
        return Ok(ExtractOutcome::Empty(extraction));
    }

    let questions = std::mem::take(&mut extraction.questions);
    let doc = parser::assemble::build_document(questions, meta);
    store::write_document(output, &doc)?;
    Ok(ExtractOutcome::Written(doc, extraction))
}

fn log_extraction(extraction: &Extraction) {
    match extraction.strategy {
        Some(strategy) => info!(
            "Found {} question containers ({:?})",
            extraction.containers, strategy
        ),
        None => info!("Found no question containers"),
    }
    for d in &extraction.diagnostics {
        warn!("{}", d);
    }
}

fn print_extract_summary(doc: &QuizDocument) {
    println!("\n=== Extraction summary ===");
    println!("Total questions: {}", doc.total_questions);

    let incomplete = doc.incomplete();
    if !incomplete.is_empty() {
        println!("Incomplete questions: {}", incomplete.len());
        for (id, reason) in &incomplete {
            println!("  #{}: {}", id, reason);
        }
    }

    println!("\n=== First questions ===");
    for q in doc.questions.iter().take(3) {
        println!("\n{}. {}", q.id, q.question);
        for o in &q.options {
            let mark = if o.is_correct { "✓" } else { " " };
            println!("   {} {}. {}", mark, o.letter, o.text);
        }
        let answer = q
            .correct_answer
            .map(|l| l.to_string())
            .unwrap_or_else(|| "unknown".into());
        println!("   Answer: {}", answer);
    }
}

fn print_reconciliation(r: &index::Reconciliation, index_path: &Path) {
    for (file, title, outcome) in &r.merged {
        let verb = match outcome {
            Merge::Added => "added",
            Merge::Updated => "updated",
        };
        println!("✓ {}: {} -> {}", verb, file, title);
    }

    println!("\n{}", "=".repeat(50));
    println!("Catalog updated: {}", index_path.display());
    println!(
        "Scanned {} files: {} added, {} updated, {} failed",
        r.scanned,
        r.count(Merge::Added),
        r.count(Merge::Updated),
        r.scanned - r.merged.len(),
    );
    println!("Total quizzes: {}", r.catalog.index_info.total_quizzes);

    println!(
        "\n{:>3} | {:<40} | {:>9} | {}",
        "#", "Quiz", "Questions", "File"
    );
    println!("{}", "-".repeat(80));
    for (i, e) in r.catalog.quizzes.iter().enumerate() {
        println!(
            "{:>3} | {:<40} | {:>4}/{:<4} | {}",
            i + 1,
            truncate(&e.quiz_title, 40),
            e.actual_questions,
            e.total_questions,
            e.source_file
        );
    }
}

fn print_catalog_stats(index_path: &Path) {
    let catalog = match store::load_catalog(index_path) {
        Ok(Some(c)) => c,
        Ok(None) => {
            println!("No catalog at {}", index_path.display());
            return;
        }
        Err(e) => {
            println!("Could not read catalog: {:#}", e);
            return;
        }
    };

    let info = &catalog.index_info;
    println!("Created:      {}", info.created_at.format("%Y-%m-%d %H:%M:%S"));
    println!("Last updated: {}", info.last_updated.format("%Y-%m-%d %H:%M:%S"));
    println!("Quizzes:      {}", info.total_quizzes);

    if catalog.quizzes.is_empty() {
        return;
    }
    println!();
    for e in &catalog.quizzes {
        let title = if e.quiz_title.is_empty() { "(untitled)" } else { &e.quiz_title };
        println!("  - {}", title);
        println!("    Description: {}", truncate(&e.description, 60));
        println!("    File:        {}", e.source_file);
        println!("    Questions:   {}/{}", e.actual_questions, e.total_questions);
        println!("    Modified:    {}", e.last_modified.format("%Y-%m-%d %H:%M:%S"));
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
