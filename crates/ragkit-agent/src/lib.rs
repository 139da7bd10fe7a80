pub mod backends;
pub mod config;
pub mod history;
pub mod llm;
pub mod meal;
pub mod rag;
mod template;

pub use config::{LlmProvider, ModelConfig};
pub use history::History;
pub use llm::LlmClient;
pub use meal::{MealPreferences, MealRecommender, MealSettings, Recommendation};
pub use rag::{build_context, RagAnswer, RagPipeline};
