mod commands;
mod config;

use clap::{Parser, Subcommand};
use config::RagkitConfig;
use ragkit_agent::meal::{Base, CuisineType, Heaviness, MealTime};
use ragkit_agent::MealPreferences;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ragkit", about = "ragkit — word counts, healthcare RAG and Iranian meal ideas")]
struct Cli {
    /// Path to config file (defaults to ./ragkit.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count non-stop-word tokens in a text file and save them as JSON
    Wordcount {
        /// Text file to analyze
        input: PathBuf,
        /// Output JSON path (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Word-per-line stop-word file (replaces the builtin list)
        #[arg(long)]
        stop_words: Option<PathBuf>,
        /// Also print the N most frequent words
        #[arg(long, default_value_t = 0)]
        top: usize,
    },
    /// Ask a healthcare question against the builtin knowledge base
    Ask {
        /// Question text; read from stdin when omitted
        question: Option<String>,
    },
    /// Recommend Iranian meals from ingredients and preferences
    Meal {
        /// Comma-separated ingredients
        #[arg(long, default_value = "")]
        ingredients: String,
        #[arg(long, default_value = "any")]
        meal_time: MealTime,
        #[arg(long, default_value = "any")]
        cuisine: CuisineType,
        #[arg(long, default_value = "any")]
        heaviness: Heaviness,
        #[arg(long, default_value = "any")]
        base: Base,
        /// Skip the quick recipe/tips
        #[arg(long)]
        no_recipe: bool,
        /// Extra preferences passed to the model
        #[arg(long, default_value = "")]
        notes: String,
        /// Maximum recommendations to ask for
        #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(1..=3))]
        max_results: u8,
        /// Keep asking for preferences until end of input
        #[arg(short, long)]
        interactive: bool,
    },
    /// Interactive greeting
    Hello,
}

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.log_json);

    let mut config = RagkitConfig::load(cli.config.as_deref()).await?;
    config.apply_env();
    debug!(top_k = config.retrieval.top_k, "Configuration loaded");

    match cli.command {
        Commands::Wordcount {
            input,
            output,
            stop_words,
            top,
        } => commands::wordcount(&config, &input, output, stop_words.as_deref(), top)?,
        Commands::Ask { question } => commands::ask(&config, question).await?,
        Commands::Meal {
            ingredients,
            meal_time,
            cuisine,
            heaviness,
            base,
            no_recipe,
            notes,
            max_results,
            interactive,
        } => {
            let prefs = MealPreferences {
                ingredients,
                meal_time,
                cuisine_type: cuisine,
                heaviness,
                base,
                include_recipe: !no_recipe,
                notes,
                max_results,
            };
            commands::meal(&config, prefs, interactive).await?;
        }
        Commands::Hello => commands::hello().await?,
    }

    Ok(())
}
