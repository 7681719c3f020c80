//! Gemini provider implementation

use super::convert::{from_gemini_response, to_gemini_request};
use super::types::{GeminiConfig, GeminiErrorEnvelope, GeminiModelList, GeminiResponse};
use crate::error::{Error, Result};
use crate::provider::Provider;
use crate::types::{GenerateRequest, GenerateResponse, Headers};
use async_trait::async_trait;
use reqwest::Client;

/// Google Gemini provider
pub struct GeminiProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiProvider {
    /// Environment variable for API key
    pub const API_KEY_ENV: &'static str = "GEMINI_API_KEY";
    /// Fallback variable name
    pub const LEGACY_API_KEY_ENV: &'static str = "API_KEY";

    /// Create a new Gemini provider
    pub fn new(config: GeminiConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(Error::MissingApiKey("gemini".to_string()));
        }

        let client = Client::new();
        Ok(Self { config, client })
    }

    /// Create provider from environment
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(Self::API_KEY_ENV)
            .or_else(|_| std::env::var(Self::LEGACY_API_KEY_ENV))
            .map_err(|_| Error::MissingApiKey("gemini".to_string()))?;

        Self::new(GeminiConfig::new(api_key))
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    async fn error_from(response: reqwest::Response) -> Error {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<GeminiErrorEnvelope>(&text)
            .map(|e| match e.error.status {
                Some(code) => format!("{} ({})", e.error.message, code),
                None => e.error.message,
            })
            .unwrap_or(text);
        Error::provider_error(format!("Gemini API error {}: {}", status, message))
    }
}

#[async_trait]
impl Provider for GeminiProvider {
    fn provider_id(&self) -> &str {
        "gemini"
    }

    fn build_headers(&self, custom_headers: Option<&Headers>) -> Headers {
        let mut headers = Headers::new();
        headers.insert("x-goog-api-key", self.config.api_key.clone());
        headers.insert("Content-Type", "application/json");

        if let Some(custom) = custom_headers {
            headers.merge_with(custom);
        }

        headers
    }

    async fn list_models(&self) -> Result<Vec<String>> {
        let url = format!("{}models", self.config.base_url);
        let response = self
            .client
            .get(&url)
            .headers(self.build_headers(None).to_reqwest_headers())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        let list: GeminiModelList = response.json().await?;
        Ok(list
            .models
            .into_iter()
            .map(|m| m.name.trim_start_matches("models/").to_string())
            .collect())
    }

    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse> {
        let url = format!("{}models/{}:generateContent", self.config.base_url, request.model);
        let body = to_gemini_request(&request);
        let headers = self.build_headers(request.options.headers.as_ref());

        tracing::debug!(model = %request.model, "gemini generateContent");

        let response = self
            .client
            .post(&url)
            .headers(headers.to_reqwest_headers())
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        let gemini_resp: GeminiResponse = response.json().await?;
        from_gemini_response(gemini_resp, &request.model)
    }
}
