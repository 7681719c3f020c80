//! Runtime configuration for the lab

use std::str::FromStr;
use std::sync::Arc;

use odinx_llms::{
    Error as LlmError, GeminiProvider, GenerateOptions, OpenAiProvider, Provider, ProviderRegistry,
};

use crate::error::LabError;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-pro";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

/// Completion backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderKind {
    #[default]
    Gemini,
    OpenAi,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 2] = [ProviderKind::Gemini, ProviderKind::OpenAi];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini",
            ProviderKind::OpenAi => "openai",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => DEFAULT_GEMINI_MODEL,
            ProviderKind::OpenAi => DEFAULT_OPENAI_MODEL,
        }
    }

    /// Variables that can hold this provider's key, in lookup order.
    pub fn key_vars(&self) -> &'static [&'static str] {
        match self {
            ProviderKind::Gemini => &[
                GeminiProvider::API_KEY_ENV,
                GeminiProvider::LEGACY_API_KEY_ENV,
            ],
            ProviderKind::OpenAi => &[OpenAiProvider::API_KEY_ENV],
        }
    }
}

impl FromStr for ProviderKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gemini" | "google" => Ok(ProviderKind::Gemini),
            "openai" => Ok(ProviderKind::OpenAi),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lab configuration
#[derive(Debug, Clone, PartialEq)]
pub struct LabConfig {
    pub provider: ProviderKind,
    pub model: String,
    /// Override for the provider's API root (proxies, tests)
    pub base_url: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl LabConfig {
    pub fn new() -> Self {
        Self {
            provider: ProviderKind::default(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: None,
            temperature: None,
            max_tokens: None,
        }
    }

    /// Switching provider also switches the model while it is still the
    /// previous provider's default.
    pub fn with_provider(mut self, provider: ProviderKind) -> Self {
        if self.model == self.provider.default_model() {
            self.model = provider.default_model().to_string();
        }
        self.provider = provider;
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as [LabConfig::from_env] with an explicit variable source.
    /// Unparseable values are ignored.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let has_key = |kind: ProviderKind| {
            kind.key_vars()
                .iter()
                .any(|key| var(key).is_some_and(|v| !v.is_empty()))
        };

        let provider = match var("ODINX_PROVIDER").and_then(|p| p.parse::<ProviderKind>().ok()) {
            Some(provider) => provider,
            // Without ODINX_PROVIDER, infer from whichever key exists; Gemini wins ties.
            None if !has_key(ProviderKind::Gemini) && has_key(ProviderKind::OpenAi) => {
                ProviderKind::OpenAi
            }
            None => ProviderKind::Gemini,
        };

        let mut config = Self::new().with_provider(provider);

        if let Some(model) = var("ODINX_MODEL").filter(|m| !m.trim().is_empty()) {
            config.model = model.trim().to_string();
        }
        if let Some(url) = var("ODINX_BASE_URL").filter(|u| !u.trim().is_empty()) {
            config.base_url = Some(url.trim().to_string());
        }
        if let Some(t) = var("ODINX_TEMPERATURE").and_then(|t| t.trim().parse::<f32>().ok())
            && t.is_finite()
        {
            config.temperature = Some(t);
        }
        if let Some(n) = var("ODINX_MAX_TOKENS").and_then(|n| n.trim().parse::<u32>().ok()) {
            config.max_tokens = Some(n);
        }

        config
    }

    /// Options sent with every request. JSON mode is always on.
    pub fn generate_options(&self) -> GenerateOptions {
        GenerateOptions {
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            json_mode: true,
            headers: None,
        }
    }

    /// Build the configured provider, reading its key from the environment.
    pub fn create_provider(&self) -> Result<Arc<dyn Provider>, LabError> {
        create_provider(self.provider, self.base_url.as_deref())
    }
}

/// Build one provider from its environment key, with an optional base URL override.
pub fn create_provider(
    kind: ProviderKind,
    base_url: Option<&str>,
) -> Result<Arc<dyn Provider>, LabError> {
    let provider: Arc<dyn Provider> = match kind {
        ProviderKind::Gemini => {
            let config = GeminiProvider::from_env()
                .map_err(config_error)?
                .config()
                .clone();
            let config = match base_url {
                Some(url) => config.with_base_url(url),
                None => config,
            };
            Arc::new(GeminiProvider::new(config).map_err(config_error)?)
        }
        ProviderKind::OpenAi => {
            let config = OpenAiProvider::from_env()
                .map_err(config_error)?
                .config()
                .clone();
            let config = match base_url {
                Some(url) => config.with_base_url(url),
                None => config,
            };
            Arc::new(OpenAiProvider::new(config).map_err(config_error)?)
        }
    };
    Ok(provider)
}

/// Registry of every provider whose key is present in the environment.
pub fn registry_from_env() -> ProviderRegistry {
    let mut registry = ProviderRegistry::new();
    for kind in ProviderKind::ALL {
        match create_provider(kind, None) {
            Ok(provider) => registry = registry.register_arc(kind.as_str(), provider),
            Err(e) => tracing::debug!(provider = kind.as_str(), error = %e, "provider unavailable"),
        }
    }
    registry
}

fn config_error(err: LlmError) -> LabError {
    match err {
        LlmError::MissingApiKey(provider) => {
            let vars = provider
                .parse::<ProviderKind>()
                .map(|kind| kind.key_vars().join(" o "))
                .unwrap_or_default();
            LabError::Config(format!("falta la clave de API de {provider} ({vars})"))
        }
        other => LabError::Config(other.to_string()),
    }
}
