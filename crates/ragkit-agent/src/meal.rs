//! Iranian meal recommender.
//!
//! Preferences are scored for how much information they carry. Sparse
//! input gets a random traditional meal chosen locally; anything richer
//! goes to the configured model with a fixed chef prompt.

use crate::config::ModelConfig;
use crate::history::History;
use crate::llm::LlmClient;
use crate::template;
use rand::seq::SliceRandom;
use rand::Rng;
use ragkit_core::{Message, RagkitError, RagkitResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{info, warn};

/// Declares a preference enum whose first variant is the `any` choice.
macro_rules! choice {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        pub enum $name {
            #[default]
            Any,
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$name::Any, $($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $name::Any => "any",
                    $($name::$variant => $text),+
                }
            }

            pub fn is_any(self) -> bool {
                self == $name::Any
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = RagkitError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim().to_ascii_lowercase();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|choice| choice.as_str() == wanted)
                    .ok_or_else(|| {
                        let options: Vec<&str> = $name::ALL.iter().map(|c| c.as_str()).collect();
                        RagkitError::Config(format!(
                            "invalid {} '{}': expected one of {}",
                            stringify!($name),
                            s,
                            options.join(", ")
                        ))
                    })
            }
        }
    };
}

choice!(
    /// Lunch or dinner.
    MealTime { Lunch => "lunch", Dinner => "dinner" }
);
choice!(
    CuisineType { Traditional => "traditional", FastFood => "fast-food" }
);
choice!(
    Heaviness { Heavy => "heavy", Light => "light" }
);
choice!(
    /// What the meal is served with or built on.
    Base { Rice => "rice", Bread => "bread", Other => "other" }
);

/// Everything the user can tell the recommender in one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealPreferences {
    /// Comma-separated ingredient list, free text.
    pub ingredients: String,
    pub meal_time: MealTime,
    pub cuisine_type: CuisineType,
    pub heaviness: Heaviness,
    pub base: Base,
    pub include_recipe: bool,
    pub notes: String,
    /// 1..=3.
    pub max_results: u8,
}

impl Default for MealPreferences {
    fn default() -> Self {
        Self {
            ingredients: String::new(),
            meal_time: MealTime::Any,
            cuisine_type: CuisineType::Any,
            heaviness: Heaviness::Any,
            base: Base::Any,
            include_recipe: true,
            notes: String::new(),
            max_results: 3,
        }
    }
}

impl MealPreferences {
    /// Non-empty, trimmed entries of the ingredient list.
    pub fn ingredient_list(&self) -> Vec<&str> {
        self.ingredients
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect()
    }

    /// One-line form stored as the user's turn in history.
    pub fn summary(&self) -> String {
        format!(
            "Ingredients: {} | meal_time: {} | cuisine_type: {} | heaviness: {} | base: {}",
            self.ingredients, self.meal_time, self.cuisine_type, self.heaviness, self.base
        )
    }
}

/// `[meal]` section of the configuration file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealSettings {
    /// Scores strictly below this fall back to a random meal.
    #[serde(default = "default_fallback_threshold")]
    pub fallback_threshold: u32,
    /// Most points the ingredient list alone can contribute.
    #[serde(default = "default_max_ingredient_score")]
    pub max_ingredient_score: u32,
    /// Messages shown by the conversation view.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

fn default_fallback_threshold() -> u32 {
    2
}

fn default_max_ingredient_score() -> u32 {
    5
}

fn default_history_limit() -> usize {
    10
}

impl Default for MealSettings {
    fn default() -> Self {
        Self {
            fallback_threshold: default_fallback_threshold(),
            max_ingredient_score: default_max_ingredient_score(),
            history_limit: default_history_limit(),
        }
    }
}

/// How much usable information `prefs` carries.
///
/// One point per listed ingredient up to `max_ingredient_score`, plus one
/// for each of meal time, cuisine type, heaviness and base that is not `any`.
pub fn info_score(prefs: &MealPreferences, max_ingredient_score: u32) -> u32 {
    let ingredients = u32::try_from(prefs.ingredient_list().len()).unwrap_or(u32::MAX);
    let specified = [
        !prefs.meal_time.is_any(),
        !prefs.cuisine_type.is_any(),
        !prefs.heaviness.is_any(),
        !prefs.base.is_any(),
    ]
    .into_iter()
    .filter(|&set| set)
    .count() as u32;
    ingredients.min(max_ingredient_score) + specified
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraditionalMeal {
    pub name: &'static str,
    pub base: Base,
}

pub const IRANIAN_MEALS: &[TraditionalMeal] = &[
    TraditionalMeal { name: "Ghormeh Sabzi", base: Base::Rice },
    TraditionalMeal { name: "Chelo Kebab", base: Base::Rice },
    TraditionalMeal { name: "Gheymeh", base: Base::Rice },
    TraditionalMeal { name: "Fesenjan", base: Base::Rice },
    TraditionalMeal { name: "Tahcheen", base: Base::Rice },
    TraditionalMeal { name: "Mirza Ghasemi", base: Base::Bread },
    TraditionalMeal { name: "Kookoo Sabzi", base: Base::Bread },
    TraditionalMeal { name: "Adas Polo", base: Base::Rice },
    TraditionalMeal { name: "Kashk-e Bademjan", base: Base::Bread },
    TraditionalMeal { name: "Zereshk Polo", base: Base::Rice },
];

pub fn fallback_text(meal: &TraditionalMeal) -> String {
    format!(
        "FALLBACK RECOMMENDATION:\n\
         1) {} — ({}, traditional)\n   \
         - Why: Classic, widely-liked, uses common pantry ingredients.\n   \
         - Recipe: 1) Prepare ingredients. 2) Cook slowly. 3) Serve with rice or bread.\n\n\
         (You provided very little info; showing a random Iranian traditional meal.)",
        meal.name, meal.base
    )
}

const CHEF_TEMPLATE: &str = "\
You are an Iranian virtual chef assistant. The user will provide:
- important ingredients (not necessarily exhaustive),
- desired meal_time (lunch/dinner/any),
- cuisine_type (traditional/fast-food/any),
- heaviness (heavy/light/any),
- base (rice/bread/other/any).

Task:
1) Based on the inputs, produce a succinct list of the **top {max_results} recommended meals**, each with:
   - meal name (Iranian name preferred if applicable),
   - why it fits the user's ingredients and preferences (1-2 short sentences),
   - a very short 3-step recipe or quick tips for preparing it (each step 6-12 words).
2) If the user provided *very little* information (ingredients empty or info score low), choose a random Iranian traditional meal and explain briefly why it is recommended.
3) Be concise. Use bullet points or numbered list. No extra commentary.
4) If some requested option contradicts (e.g., asks \"fast-food\" but wants \"rice-based heavy traditional stew\"), prefer to ask the user to clarify only if the instructions are insufficient. Otherwise make a best-fitting recommendation and say \"best fit\" in parenthesis.

User inputs:
Ingredients: {ingredients}
Meal time: {meal_time}
Cuisine type: {cuisine_type}
Heaviness: {heaviness}
Base: {base}
Include_recipe: {include_recipe}
Notes: {notes}

Output format:
- For each recommendation:
  1) Meal name — short parenthetical tags (base, heavy/light, traditional/fast-food)
     - Why: <one short sentence>
     - Recipe: 1) ... 2) ... 3) ...

If fallback (random): start with \"FALLBACK RECOMMENDATION:\" and then the same format for one meal.
";

pub fn render_prompt(prefs: &MealPreferences) -> String {
    let notes = if prefs.notes.trim().is_empty() {
        "none"
    } else {
        prefs.notes.trim()
    };
    let max_results = prefs.max_results.clamp(1, 3).to_string();
    template::fill(
        CHEF_TEMPLATE,
        &[
            ("max_results", &max_results),
            ("ingredients", prefs.ingredients.trim()),
            ("meal_time", prefs.meal_time.as_str()),
            ("cuisine_type", prefs.cuisine_type.as_str()),
            ("heaviness", prefs.heaviness.as_str()),
            ("base", prefs.base.as_str()),
            ("include_recipe", if prefs.include_recipe { "True" } else { "False" }),
            ("notes", notes),
        ],
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recommendation {
    /// Local random pick; no model was called.
    Fallback { meal: TraditionalMeal, text: String },
    Generated { text: String },
}

impl Recommendation {
    pub fn text(&self) -> &str {
        match self {
            Recommendation::Fallback { text, .. } | Recommendation::Generated { text } => text,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Recommendation::Fallback { .. })
    }
}

enum Backend {
    Ready(LlmClient),
    /// Configuration failed; the reason is reported when a model call is needed.
    Unavailable(String),
}

pub struct MealRecommender {
    settings: MealSettings,
    backend: Backend,
    history: History,
}

impl MealRecommender {
    pub fn new(settings: MealSettings, client: LlmClient) -> Self {
        Self {
            settings,
            backend: Backend::Ready(client),
            history: History::new(),
        }
    }

    /// A recommender that can only produce fallbacks.
    pub fn without_backend(settings: MealSettings, reason: impl Into<String>) -> Self {
        Self {
            settings,
            backend: Backend::Unavailable(reason.into()),
            history: History::new(),
        }
    }

    /// Backend from the `PROVIDER` family of environment variables.
    pub fn from_env(settings: MealSettings) -> Self {
        match ModelConfig::from_env() {
            Ok(config) => Self::new(settings, LlmClient::new(config)),
            Err(e) => {
                warn!(error = %e, "Meal backend not configured; only fallbacks are available");
                Self::without_backend(settings, e.to_string())
            }
        }
    }

    pub fn settings(&self) -> &MealSettings {
        &self.settings
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn info_score(&self, prefs: &MealPreferences) -> u32 {
        info_score(prefs, self.settings.max_ingredient_score)
    }

    /// Recommend meals for `prefs`, recording the exchange in history.
    ///
    /// A fallback records only the reply. Nothing is recorded when the
    /// model call fails.
    pub async fn recommend<R>(
        &mut self,
        prefs: &MealPreferences,
        rng: &mut R,
    ) -> RagkitResult<Recommendation>
    where
        R: Rng + ?Sized,
    {
        let score = self.info_score(prefs);
        if score < self.settings.fallback_threshold {
            let meal = *IRANIAN_MEALS
                .choose(rng)
                .ok_or_else(|| RagkitError::Config("no fallback meals defined".to_string()))?;
            info!(score, meal = meal.name, "Sparse preferences; using fallback meal");
            let recommendation = Recommendation::Fallback {
                text: fallback_text(&meal),
                meal,
            };
            // fallbacks record only the bot's reply
            self.history.push(Message::assistant(recommendation.text()));
            return Ok(recommendation);
        }

        let client = match &self.backend {
            Backend::Ready(client) => client,
            Backend::Unavailable(reason) => return Err(RagkitError::Config(reason.clone())),
        };
        info!(score, model = client.model_id(), "Requesting meal recommendations");
        let text = client.prompt(&render_prompt(prefs)).await?;
        let recommendation = Recommendation::Generated { text };

        self.history.push(Message::user(prefs.summary()));
        self.history.push(Message::assistant(recommendation.text()));
        Ok(recommendation)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use ragkit_core::Role;

    fn prefs(ingredients: &str) -> MealPreferences {
        MealPreferences {
            ingredients: ingredients.to_string(),
            ..MealPreferences::default()
        }
    }

    #[test]
    fn test_info_score_all_any_is_zero() {
        assert_eq!(info_score(&prefs(""), 5), 0);
        assert_eq!(info_score(&prefs(" , ,  "), 5), 0);
    }

    #[test]
    fn test_info_score_counts_ingredients_with_cap() {
        assert_eq!(info_score(&prefs("egg, tomato"), 5), 2);
        assert_eq!(info_score(&prefs("a,b,c,d,e,f,g"), 5), 5);
        assert_eq!(info_score(&prefs("a,b,c,d,e,f,g"), 3), 3);
    }

    #[test]
    fn test_info_score_counts_fields() {
        let p = MealPreferences {
            meal_time: MealTime::Dinner,
            cuisine_type: CuisineType::Traditional,
            heaviness: Heaviness::Heavy,
            base: Base::Rice,
            ..prefs("rice, saffron, chicken")
        };
        assert_eq!(info_score(&p, 5), 7);
    }

    #[test]
    fn test_choice_parsing() {
        assert_eq!("Dinner".parse::<MealTime>().unwrap(), MealTime::Dinner);
        assert_eq!("fast-food".parse::<CuisineType>().unwrap(), CuisineType::FastFood);
        assert_eq!(" any ".parse::<Base>().unwrap(), Base::Any);
        let err = "brunch".parse::<MealTime>().unwrap_err();
        assert!(err.to_string().contains("any, lunch, dinner"));
    }

    #[test]
    fn test_fallback_text_format() {
        let text = fallback_text(&IRANIAN_MEALS[5]);
        assert!(text.starts_with("FALLBACK RECOMMENDATION:\n1) Mirza Ghasemi — (bread, traditional)\n"));
        assert!(text.contains("\n   - Why: Classic"));
        assert!(text.contains("\n   - Recipe: 1) Prepare ingredients."));
        assert!(text.ends_with("showing a random Iranian traditional meal.)"));
    }

    #[test]
    fn test_render_prompt() {
        let p = MealPreferences {
            meal_time: MealTime::Lunch,
            base: Base::Bread,
            include_recipe: false,
            max_results: 2,
            ..prefs("egg, tomato")
        };
        let prompt = render_prompt(&p);
        assert!(prompt.contains("Ingredients: egg, tomato\n"));
        assert!(prompt.contains("Meal time: lunch\n"));
        assert!(prompt.contains("Cuisine type: any\n"));
        assert!(prompt.contains("Base: bread\n"));
        assert!(prompt.contains("Include_recipe: False\n"));
        assert!(prompt.contains("Notes: none\n"));
        assert!(prompt.contains("**top 2 recommended meals**"));
        assert!(!prompt.contains('{'));
    }

    #[test]
    fn test_render_prompt_keeps_braces_in_user_text() {
        let p = MealPreferences {
            base: Base::Rice,
            notes: "spicy".to_string(),
            ..prefs("{base} and {notes}")
        };
        let prompt = render_prompt(&p);
        assert!(prompt.contains("Ingredients: {base} and {notes}\n"));
        assert!(prompt.contains("Base: rice\n"));
        assert!(prompt.contains("Notes: spicy\n"));
        assert!(prompt.contains("Include_recipe: True\n"));
    }

    #[test]
    fn test_summary() {
        let p = MealPreferences {
            heaviness: Heaviness::Light,
            ..prefs("eggplant")
        };
        assert_eq!(
            p.summary(),
            "Ingredients: eggplant | meal_time: any | cuisine_type: any | heaviness: light | base: any"
        );
    }

    #[tokio::test]
    async fn test_sparse_input_falls_back_without_backend() {
        let mut bot = MealRecommender::without_backend(MealSettings::default(), "no model");
        let mut rng = StdRng::seed_from_u64(7);

        let rec = bot.recommend(&prefs(""), &mut rng).await.unwrap();
        assert!(rec.is_fallback());
        let Recommendation::Fallback { meal, text } = &rec else {
            panic!("expected fallback");
        };
        assert!(IRANIAN_MEALS.contains(meal));
        assert!(text.contains(meal.name));
        let roles: Vec<Role> = bot.history().messages().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::Assistant]);
        assert_eq!(bot.history().messages()[0].content, rec.text());
    }

    #[tokio::test]
    async fn test_fallback_is_reproducible_with_seed() {
        let mut a = MealRecommender::without_backend(MealSettings::default(), "x");
        let mut b = MealRecommender::without_backend(MealSettings::default(), "x");
        let ra = a.recommend(&prefs("egg"), &mut StdRng::seed_from_u64(42)).await.unwrap();
        let rb = b.recommend(&prefs("egg"), &mut StdRng::seed_from_u64(42)).await.unwrap();
        assert_eq!(ra, rb);
    }

    #[tokio::test]
    async fn test_rich_input_without_backend_reports_reason() {
        let mut bot = MealRecommender::without_backend(
            MealSettings::default(),
            "HuggingFace provider selected but HUGGINGFACEHUB_API_TOKEN or LLAMA_MODEL is not set.",
        );
        let err = bot
            .recommend(&prefs("egg, tomato"), &mut StdRng::seed_from_u64(1))
            .await
            .unwrap_err();
        assert!(matches!(err, RagkitError::Config(ref m) if m.contains("HUGGINGFACEHUB_API_TOKEN")));
        assert!(bot.history().is_empty());
    }

    #[tokio::test]
    async fn test_threshold_is_configurable() {
        let settings = MealSettings {
            fallback_threshold: 0,
            ..MealSettings::default()
        };
        let mut bot = MealRecommender::without_backend(settings, "offline");
        // threshold 0: nothing falls back, so the missing backend is hit
        assert!(bot.recommend(&prefs(""), &mut StdRng::seed_from_u64(3)).await.is_err());
    }
}
