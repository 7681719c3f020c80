//! OpenAI-compatible provider module
//!
//! Chat Completions API (api.openai.com or any compatible base URL).

mod convert;
mod provider;
mod types;

pub use provider::OpenAiProvider;
pub use types::{OpenAiConfig, OpenAiRequest, OpenAiResponse};
