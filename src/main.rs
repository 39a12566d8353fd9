use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};

use scout::export::{self, AnalysisExport};
use scout::models::{ProfileRecord, ScoreReport};
use scout::store::Database;
use scout::{Config, Extractor, Scorer};

#[derive(Parser)]
#[command(name = "scout")]
#[command(about = "Profile analysis - extract a profile page and score its growth potential")]
struct Cli {
    /// Path to a JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Path to the SQLite store
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the store
    Init,

    /// Extract and score a saved profile page
    Analyze {
        /// HTML file, or - for stdin
        input: String,

        /// Save the extracted profile as the last analysis
        #[arg(long)]
        save: bool,

        /// Write a JSON export into this directory
        #[arg(long)]
        export: Option<PathBuf>,

        /// Print the profile and report as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Extract a profile page and print the record as JSON
    Extract {
        /// HTML file, or - for stdin
        input: String,
    },

    /// Score a profile record or an earlier export
    Score {
        /// JSON file holding a profile record or an analysis export
        record: PathBuf,
    },

    /// Score the last saved profile
    Last,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;
    let extractor = Extractor::new(config.extraction.clone());
    let scorer = Scorer::from_config(&config);

    match cli.command {
        Commands::Init => {
            let db = open_store(cli.db.as_deref())?;
            db.init()?;
            println!("Store initialized at {}", db.path().display());
        }

        Commands::Analyze { input, save, export: export_dir, json } => {
            let record = extract(&extractor, &input)?;
            let report = scorer.score(&record).context("Extracted profile failed validation")?;

            if save {
                let db = open_store(cli.db.as_deref())?;
                db.ensure_initialized()?;
                db.save_last(&record)?;
            }

            let analysis = AnalysisExport::new(record, report);
            if json {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            } else {
                print_report(&analysis.profile, &analysis.analysis);
                if save {
                    println!("\nSaved as last analysis.");
                }
            }

            if let Some(dir) = export_dir {
                let path = export::write_export(&dir, &analysis)?;
                println!("Exported to {}", path.display());
            }
        }

        Commands::Extract { input } => {
            let record = extract(&extractor, &input)?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }

        Commands::Score { record } => {
            let record = load_record(&record)?;
            let report = scorer.score(&record)?;
            print_report(&record, &report);
        }

        Commands::Last => {
            let db = open_store(cli.db.as_deref())?;
            db.ensure_initialized()?;
            match db.load_last()? {
                Some(saved) => {
                    println!("Saved {}\n", saved.saved_at.format("%Y-%m-%d %H:%M UTC"));
                    let report = scorer.score(&saved.record)?;
                    print_report(&saved.record, &report);
                }
                None => println!("No saved analysis. Run 'scout analyze <FILE> --save' first."),
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn open_store(path: Option<&Path>) -> Result<Database> {
    match path {
        Some(path) => Database::open_at(path),
        None => Database::open(),
    }
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(input).with_context(|| format!("Failed to read {}", input))
    }
}

fn extract(extractor: &Extractor, input: &str) -> Result<ProfileRecord> {
    let source = read_input(input)?;
    let record = extractor
        .extract_str(&source)
        .with_context(|| format!("Could not read {} as a profile page", input))?;
    tracing::debug!(
        name = ?record.name,
        experience = record.experience.len(),
        skills = record.skills.len(),
        "extracted profile"
    );
    Ok(record)
}

/// Accepts either an export (record plus report) or a bare record.
fn load_record(path: &Path) -> Result<ProfileRecord> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    if let Ok(export) = serde_json::from_str::<AnalysisExport>(&raw) {
        return Ok(export.profile);
    }
    serde_json::from_str(&raw).with_context(|| format!("Not a profile record: {}", path.display()))
}

fn print_report(record: &ProfileRecord, report: &ScoreReport) {
    match &record.name {
        Some(name) => println!("{}", name),
        None => println!("(no name found)"),
    }
    if let Some(headline) = &record.headline {
        println!("{}", headline);
    }
    if let Some(location) = &record.location {
        println!("{}", location);
    }
    println!(
        "Experience: {:.1} yrs across {} roles   Skills: {}   Recommendations: {}",
        record.total_experience_years,
        record.experience.len(),
        record.skills.len(),
        record.recommendations.count
    );
    if !record.top_skills.is_empty() {
        println!("Top skills: {}", record.top_skills.join(", "));
    }

    println!();
    println!("{:<24} {:>7}", "CATEGORY", "SCORE");
    println!("{}", "-".repeat(32));
    for (category, score) in &report.categories {
        println!(
            "{:<24} {:>7}",
            truncate(category.label(), 24),
            format!("{}/{}", score.score, score.max)
        );
    }
    println!("{}", "-".repeat(32));
    println!(
        "{:<24} {:>7}  {}",
        "OVERALL",
        format!("{}/{}", report.aggregate, report.max_aggregate),
        report.verdict
    );

    if !report.findings.is_empty() {
        println!("\nFindings:");
        for finding in &report.findings {
            println!("  {:<12} {}", format!("[{}]", finding.icon.as_str()), finding.text);
        }
    }
    if !report.concerns.is_empty() {
        println!("\nConcerns:");
        for concern in &report.concerns {
            println!("  - {}", concern);
        }
    }

    println!("\nReasoning:");
    for line in textwrap::fill(&report.reasoning, 76).lines() {
        println!("  {}", line);
    }

    if record.name.is_none() {
        println!("\nHint: no profile name was found. Is this a saved profile page?");
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
