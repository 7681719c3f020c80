use async_trait::async_trait;

use crate::error::Result;
use crate::types::{GenerateRequest, GenerateResponse, Headers};

/// A remote completion backend.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Stable identifier ("gemini", "openai").
    fn provider_id(&self) -> &str;

    /// Auth and content headers, with `custom_headers` applied last.
    fn build_headers(&self, custom_headers: Option<&Headers>) -> Headers;

    /// Models the provider can serve. Defaults to none known.
    async fn list_models(&self) -> Result<Vec<String>> {
        Ok(Vec::new())
    }

    /// One request, one completion.
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse>;
}
