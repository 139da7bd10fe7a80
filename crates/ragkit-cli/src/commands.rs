use crate::config::RagkitConfig;
use ragkit_agent::meal::{Base, CuisineType, Heaviness, MealTime};
use ragkit_agent::{History, LlmClient, MealPreferences, MealRecommender, RagAnswer, RagPipeline};
use ragkit_core::{RagkitError, Role};
use ragkit_memory::healthcare_documents;
use ragkit_text::{StopWords, TextProcessor};
use std::fmt::Write as _;
use std::io::{BufRead, Write as _};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{info, warn};

/// Age reported by `hello` when the answer is left blank.
const DEFAULT_AGE: u8 = 25;
const MAX_AGE: u8 = 100;

/// Print `prompt` and read one line from stdin. `None` on end of input.
async fn read_line(prompt: &str) -> anyhow::Result<Option<String>> {
    print!("{prompt}");
    std::io::stdout().flush()?;

    let line = tokio::task::spawn_blocking(|| read_stdin_line(&mut std::io::stdin().lock()))
        .await??;
    Ok(line)
}

/// One trimmed line from `reader`. `None` on end of input.
fn read_stdin_line<R: BufRead>(reader: &mut R) -> std::io::Result<Option<String>> {
    let mut input = String::new();
    if reader.read_line(&mut input)? == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim().to_string()))
}

/// Ask until the answer parses as `T`. Blank input selects `T::default()`.
async fn read_choice<T>(prompt: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr<Err = RagkitError> + Default,
{
    loop {
        let Some(answer) = read_line(prompt).await? else {
            return Ok(None);
        };
        if answer.is_empty() {
            return Ok(Some(T::default()));
        }
        match answer.parse() {
            Ok(choice) => return Ok(Some(choice)),
            Err(e) => println!("{e}"),
        }
    }
}

/// `yes`/`no` answer with a default for blank input. `None` if unrecognised.
pub fn parse_yes_no(input: &str, default: bool) -> Option<bool> {
    match input.trim().to_ascii_lowercase().as_str() {
        "" => Some(default),
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Age in `0..=100`; blank input means [`DEFAULT_AGE`].
pub fn parse_age(input: &str) -> Option<u8> {
    let input = input.trim();
    if input.is_empty() {
        return Some(DEFAULT_AGE);
    }
    input.parse::<u8>().ok().filter(|age| *age <= MAX_AGE)
}

/// Stop words for `wordcount`: an explicit file wins over the config
/// list, which wins over the builtin Persian list. Config extras are
/// always added.
pub fn resolve_stop_words(
    config: &RagkitConfig,
    file: Option<&Path>,
) -> anyhow::Result<StopWords> {
    let mut stop_words = match (file, &config.text.stop_words) {
        (Some(path), _) => StopWords::load(path)?,
        (None, Some(words)) => StopWords::new(words),
        (None, None) => StopWords::persian(),
    };
    stop_words.extend(&config.text.extra_stop_words);
    Ok(stop_words)
}

pub fn wordcount(
    config: &RagkitConfig,
    input: &Path,
    output: Option<PathBuf>,
    stop_words: Option<&Path>,
    top: usize,
) -> anyhow::Result<()> {
    let stop_words = resolve_stop_words(config, stop_words)?;
    let output = output.unwrap_or_else(|| config.text.output.clone());

    let processor = TextProcessor::new(stop_words)?;
    let counts = processor.process(input, &output)?;

    println!("Processing complete! Output saved to {}", output.display());
    if top > 0 && !counts.is_empty() {
        println!();
        for (word, count) in counts.top(top) {
            println!("{count:>6}  {word}");
        }
    }
    Ok(())
}

pub async fn ask(config: &RagkitConfig, question: Option<String>) -> anyhow::Result<()> {
    println!(
        "Welcome to the Healthcare Query System powered by Retrieval-Augmented Generation (RAG)."
    );

    let question = match question {
        Some(q) => q,
        None => read_line("Please enter your healthcare-related question: ")
            .await?
            .unwrap_or_default(),
    };
    let question = question.trim();
    if question.is_empty() {
        println!("No question given.");
        return Ok(());
    }

    let embedder = config.embedding.build()?;
    let store = config.vector_store.build()?;
    let pipeline = RagPipeline::new(embedder, store, LlmClient::new(config.model.clone()))
        .with_top_k(config.retrieval.top_k);

    let stored = pipeline.ingest(healthcare_documents()).await?;
    info!(stored, "Knowledge base ready");

    match pipeline.answer(question).await? {
        RagAnswer::NoDocuments => println!("Sorry, no relevant documents found."),
        RagAnswer::Answered { answer, sources } => {
            info!(?sources, "Answer generated");
            println!("\nGenerated Answer:");
            println!("{answer}");
        }
    }
    Ok(())
}

/// The last `limit` history entries, newest first.
pub fn format_conversation(history: &History, limit: usize) -> String {
    let mut out = String::from("Conversation\n");
    for message in history.recent(limit) {
        // writing into a String cannot fail
        let _ = match message.role {
            Role::User => writeln!(out, "You: {}", message.content),
            _ => writeln!(out, "Bot:\n{}", message.content),
        };
    }
    out
}

async fn recommend_and_show(bot: &mut MealRecommender, prefs: &MealPreferences) {
    let mut rng = rand::thread_rng();
    match bot.recommend(prefs, &mut rng).await {
        Ok(_) => {
            let limit = bot.settings().history_limit;
            println!("\n{}", format_conversation(bot.history(), limit));
        }
        Err(e) => {
            warn!(error = %e, "Meal recommendation failed");
            println!("LLM initialization or call failed: {e}");
        }
    }
}

pub async fn meal(
    config: &RagkitConfig,
    prefs: MealPreferences,
    interactive: bool,
) -> anyhow::Result<()> {
    let mut bot = MealRecommender::from_env(config.meal.clone());

    if !interactive {
        recommend_and_show(&mut bot, &prefs).await;
        return Ok(());
    }

    println!("Iranian Meal Recommender. Leave a field blank for \"any\"; Ctrl-D quits.");
    while let Some(prefs) = read_preferences(prefs.max_results).await? {
        recommend_and_show(&mut bot, &prefs).await;
    }
    Ok(())
}

/// One round of interactive questions. `None` once stdin is exhausted.
async fn read_preferences(max_results: u8) -> anyhow::Result<Option<MealPreferences>> {
    let Some(ingredients) =
        read_line("\nImportant ingredients (comma-separated, e.g. egg, tomato): ").await?
    else {
        return Ok(None);
    };
    let Some(meal_time) = read_choice::<MealTime>("Meal time [any/lunch/dinner]: ").await? else {
        return Ok(None);
    };
    let Some(cuisine_type) =
        read_choice::<CuisineType>("Cuisine type [any/traditional/fast-food]: ").await?
    else {
        return Ok(None);
    };
    let Some(heaviness) = read_choice::<Heaviness>("Heaviness [any/heavy/light]: ").await? else {
        return Ok(None);
    };
    let Some(base) = read_choice::<Base>("Base [any/rice/bread/other]: ").await? else {
        return Ok(None);
    };

    let include_recipe = loop {
        let Some(answer) = read_line("Include quick 3-step recipe/tips? [Y/n]: ").await? else {
            return Ok(None);
        };
        if let Some(yes) = parse_yes_no(&answer, true) {
            break yes;
        }
    };
    let Some(notes) = read_line("Notes / extra preferences (optional): ").await? else {
        return Ok(None);
    };

    Ok(Some(MealPreferences {
        ingredients,
        meal_time,
        cuisine_type,
        heaviness,
        base,
        include_recipe,
        notes,
        max_results,
    }))
}

pub async fn hello() -> anyhow::Result<()> {
    println!("Hello, ragkit!");

    let name = read_line("What's your name? ").await?.unwrap_or_default();
    if !name.is_empty() {
        println!("Hello, {name}! 👋");
    }

    let age = loop {
        let Some(answer) = read_line("Select your age (0-100) [25]: ").await? else {
            break DEFAULT_AGE;
        };
        match parse_age(&answer) {
            Some(age) => break age,
            None => println!("Please enter a whole number between 0 and {MAX_AGE}."),
        }
    };
    println!("Your age is: {age}");
    Ok(())
}
