use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::io::Read;
use std::path::PathBuf;
use tracing::info;

use folio::config::Config;
use folio::output::{self, terminal};
use folio::pipeline::Analyzer;

/// Folio: theme, genre and keyword analysis for written work.
///
/// Classifies text with a zero-shot model when one is available and falls
/// back to lexical heuristics when it is not.
#[derive(Parser)]
#[command(name = "folio", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct InputArgs {
    /// File to analyze (reads stdin when omitted)
    file: Option<PathBuf>,

    /// Print JSON instead of bar charts
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Theme percentages (Love, Nature, War/Conflict, ...)
    Themes(InputArgs),

    /// Genre percentages (Poetry, Essay, Story, Letter, ...)
    Genres(InputArgs),

    /// Up to 15 salient keywords
    Keywords(InputArgs),

    /// Themes, genres and keywords together
    Analyze(InputArgs),

    /// Download the ONNX zero-shot model (BART-MNLI, quantized)
    DownloadModel,

    /// Show classifier backend, model files and lexicon
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("folio=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Themes(args) => {
            let analyzer = load_analyzer()?;
            let text = read_input(args.file.as_ref())?.unwrap_or_default();
            let scored = analyzer.analyze_themes_scored(&text).await;
            if args.json {
                println!("{}", output::to_json(&scored.value)?);
            } else {
                terminal::display_distribution("Themes", &scored.value);
                terminal::display_source(&scored);
            }
        }

        Commands::Genres(args) => {
            let analyzer = load_analyzer()?;
            let text = read_input(args.file.as_ref())?.unwrap_or_default();
            let scored = analyzer.analyze_genres_scored(&text).await;
            if args.json {
                println!("{}", output::to_json(&scored.value)?);
            } else {
                terminal::display_distribution("Genres", &scored.value);
                terminal::display_source(&scored);
            }
        }

        Commands::Keywords(args) => {
            let analyzer = load_analyzer()?;
            let text = read_input(args.file.as_ref())?.unwrap_or_default();
            let scored = analyzer.extract_keywords_scored(&text);
            if args.json {
                println!("{}", output::to_json(&scored.value)?);
            } else {
                terminal::display_keywords(&scored.value);
                terminal::display_source(&scored);
            }
        }

        Commands::Analyze(args) => {
            let analyzer = load_analyzer()?;
            let text = read_input(args.file.as_ref())?;
            let analysis = analyzer.analyze_text(text.as_deref()).await;
            if args.json {
                println!("{}", output::to_json(&analysis)?);
            } else {
                terminal::display_analysis(&analysis);
            }
        }

        Commands::DownloadModel => {
            let config = Config::load()?;
            let model_dir = &config.model_dir;

            println!("Downloading ONNX zero-shot model...");
            println!("  Destination: {}", model_dir.display());

            folio::classifier::download::download_model(model_dir).await?;

            println!("\n{}", "Model downloaded successfully.".bold());
            println!("You can now run `folio analyze <file>` with the local classifier.");
        }

        Commands::Status => {
            let config = Config::load()?;
            folio::status::show(&config)?;
        }
    }

    Ok(())
}

fn load_analyzer() -> Result<Analyzer> {
    let config = Config::load()?;
    let analyzer = Analyzer::from_config(&config)?;
    info!(
        classifier = analyzer.classifier_name().unwrap_or("none"),
        "Analyzer ready"
    );
    Ok(analyzer)
}

/// Read the whole input. `None` means no text was supplied at all.
fn read_input(file: Option<&PathBuf>) -> Result<Option<String>> {
    let text = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };
    Ok(if text.is_empty() { None } else { Some(text) })
}
