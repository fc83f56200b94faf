//! AI service boundary: client trait, OpenAI-compatible implementation,
//! prompts, and the generation/assistant operations built on them.
//!
//! # Configuration
//!
//! - `COOK_AGENT_KEY` (required for the real client): API key
//! - `SKILLET_AI_MODEL` (optional): model name (default "mistral-large-latest")
//! - `SKILLET_AI_BASE_URL` (optional): OpenAI-compatible base URL
//!   (default "https://api.mistral.ai/v1")

pub mod assistant;
mod client;
mod fake;
mod generate;
pub mod prompts;
mod types;

pub use client::{AiClient, AiConfig, AiError, OpenAiCompatClient};
pub use fake::FakeAiClient;
pub use generate::{
    generate_dish_ideas, generate_recipe, parse_fenced_json, GenerateError, GenerateOptions,
    PromptMode, MAX_DISH_IDEAS,
};
pub use types::{ChatMessage, ChatRequest, ChatResponse, Role, Usage};
