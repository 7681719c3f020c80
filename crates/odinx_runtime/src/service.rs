//! Formulation service: one provider call per submission, parsed into a typed result.

use std::sync::Arc;
use std::time::Instant;

use odinx_core::{FormulaInput, MixInput, Mode};
use odinx_llms::{GenerateOptions, GenerateRequest, Provider};
use odinx_observability::{formulation_span, record_duration, record_error};
use tracing::Instrument;

use crate::config::LabConfig;
use crate::error::Result;
use crate::parse::{parse_formula, parse_playground};
use crate::prompt::{Prompt, formula_prompt, playground_prompt};
use crate::result::{FormulaResult, LabResult, PlaygroundResult};

/// A provider bound to a model and request options.
#[derive(Clone)]
pub struct FormulationService {
    provider: Arc<dyn Provider>,
    model: String,
    options: GenerateOptions,
}

impl std::fmt::Debug for FormulationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormulationService")
            .field("provider", &self.provider.provider_id())
            .field("model", &self.model)
            .finish()
    }
}

impl FormulationService {
    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            options: GenerateOptions {
                json_mode: true,
                ..Default::default()
            },
        }
    }

    /// Build the configured provider and bind it to the configured model.
    pub fn from_config(config: &LabConfig) -> Result<Self> {
        let provider = config.create_provider()?;
        Ok(Self::new(provider, config.model.clone()).with_options(config.generate_options()))
    }

    pub fn with_options(mut self, options: GenerateOptions) -> Self {
        self.options = options;
        self
    }

    pub fn provider_id(&self) -> &str {
        self.provider.provider_id()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send a prompt, return the raw completion text.
    pub async fn complete(&self, prompt: &Prompt) -> Result<String> {
        tracing::debug!(
            system_chars = prompt.system.chars().count(),
            user_chars = prompt.user.chars().count(),
            "sending prompt"
        );
        let request = GenerateRequest::new(&self.model, &prompt.user)
            .with_system(&prompt.system)
            .with_options(self.options.clone());
        let response = self.provider.generate(request).await?;
        tracing::debug!(
            model = %response.model,
            finish_reason = ?response.finish_reason.unified,
            total_tokens = response.usage.total_tokens,
            "completion received"
        );
        Ok(response.text)
    }

    pub async fn formulate(&self, input: &FormulaInput) -> Result<FormulaResult> {
        let span = formulation_span!(Mode::Formula.as_str(), self.provider_id(), self.model.as_str());
        async {
            tracing::info!(current = input.current.code, desired = input.desired.code, "formulating");
            let prompt = formula_prompt(input);
            self.timed(async { parse_formula(&self.complete(&prompt).await?) })
                .await
        }
        .instrument(span)
        .await
    }

    pub async fn analyze(&self, input: &MixInput) -> Result<PlaygroundResult> {
        let span = formulation_span!(
            Mode::Playground.as_str(),
            self.provider_id(),
            self.model.as_str()
        );
        async {
            tracing::info!(base = input.base.code, tones = input.mix.len(), "analyzing mix");
            let prompt = playground_prompt(input);
            self.timed(async { parse_playground(&self.complete(&prompt).await?) })
                .await
        }
        .instrument(span)
        .await
    }

    /// Dispatch on the input's mode; used by surfaces holding a [crate::Ticket].
    pub async fn run(&self, input: &crate::lab::LabInput) -> Result<LabResult> {
        match input {
            crate::lab::LabInput::Formula(i) => self.formulate(i).await.map(LabResult::from),
            crate::lab::LabInput::Playground(i) => self.analyze(i).await.map(LabResult::from),
        }
    }

    async fn timed<T>(&self, fut: impl std::future::Future<Output = Result<T>>) -> Result<T> {
        let start = Instant::now();
        let result = fut.await;
        record_duration("duration_ms", start.elapsed());
        if let Err(err) = &result {
            record_error(err);
            if let Some(raw) = err.raw_response() {
                tracing::error!(raw = %raw, "model returned an unexpected format");
            }
        }
        result
    }
}
