//! odinx_llms — provider-agnostic text completions.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                  ProviderRegistry                    │
//! │  ┌──────────────────────────────────────────────┐   │
//! │  │  HashMap<String, Arc<dyn Provider>>           │   │
//! │  └──────────────────────────────────────────────┘   │
//! │                       │                              │
//! │            ┌──────────┴──────────┐                  │
//! │            ▼                     ▼                  │
//! │      ┌───────────┐        ┌───────────┐            │
//! │      │  Gemini   │        │  OpenAI   │            │
//! │      │ Provider  │        │ Provider  │            │
//! │      └───────────┘        └───────────┘            │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! One request, one response: no streaming and no retries. Callers get the
//! completion text back and decide how to parse it.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use odinx_llms::{GeminiProvider, GenerateRequest, Provider};
//!
//! # async fn run() -> odinx_llms::Result<()> {
//! let provider = GeminiProvider::from_env()?;
//! let request = GenerateRequest::new("gemini-2.5-pro", "Hola")
//!     .with_system("Responde con JSON.");
//! let response = provider.generate(request).await?;
//! println!("{}", response.text);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod provider;
pub mod providers;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export core abstractions
pub use error::{Error, Result};
pub use provider::{Provider, ProviderRegistry};

// Re-export provider implementations
pub use providers::GeminiProvider;
pub use providers::OpenAiProvider;

// Re-export commonly used types
pub use types::{
    FinishReason, FinishReasonKind, GenerateOptions, GenerateRequest, GenerateResponse, Headers,
    Usage,
};
