//! End-to-end lab flows against a scripted provider.
//!
//! Run with: cargo test -p odinx-runtime --test lab_flow

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use odinx_core::{GrayPercentage, HairCondition, Mode, ValidationError, catalog};
use odinx_llms::{FinishReason, GenerateRequest, GenerateResponse, Headers, Provider, Usage};
use odinx_runtime::{FormulationService, Lab, LabError, LabResult, Outcome, render};

/// Replies with a fixed completion and records every request.
struct ScriptedProvider {
    reply: String,
    calls: AtomicUsize,
    last: Mutex<Option<GenerateRequest>>,
}

impl ScriptedProvider {
    fn new(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.to_string(),
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    fn provider_id(&self) -> &str {
        "scripted"
    }

    fn build_headers(&self, _custom_headers: Option<&Headers>) -> Headers {
        Headers::new()
    }

    async fn generate(&self, request: GenerateRequest) -> odinx_llms::Result<GenerateResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let model = request.model.clone();
        *self.last.lock().unwrap() = Some(request);
        Ok(GenerateResponse {
            text: self.reply.clone(),
            model,
            finish_reason: FinishReason::other(),
            usage: Usage::default(),
        })
    }
}

/// Always fails like a rejected key would.
struct FailingProvider;

#[async_trait]
impl Provider for FailingProvider {
    fn provider_id(&self) -> &str {
        "failing"
    }

    fn build_headers(&self, _custom_headers: Option<&Headers>) -> Headers {
        Headers::new()
    }

    async fn generate(&self, _request: GenerateRequest) -> odinx_llms::Result<GenerateResponse> {
        Err(odinx_llms::Error::provider_error("Gemini API error 403: API key not valid"))
    }
}

const FORMULA_REPLY: &str = "```json\n{\"estimated_result\":{\"hex_color\":\"#DCC389\",\"description\":\"Rubio muy claro dorado\"},\"formula\":{\"tones\":[{\"tone\":\"9.3\",\"grams\":40}],\"developer\":{\"volume\":30,\"ratio\":\"1+1.5\",\"oxidant_grams\":60},\"processing_time\":\"35min\",\"notes\":\"Neutralizar el naranja con un toque de azul.\"}}\n```";

const PLAYGROUND_REPLY: &str = r##"{"estimated_result":{"hex_color":"#A08060","description":"Rubio medio beige"},"dominant_reflex":".1 Ceniza","undertone_movement":"Suaviza la calidez del 6","neutralization_warning":"Neutraliza reflejos naranjas leves"}"##;

fn tone(code: &str) -> odinx_core::Tone {
    *catalog::find(code).unwrap()
}

#[tokio::test]
async fn test_formula_round_trip() {
    let provider = ScriptedProvider::new(FORMULA_REPLY);
    let service = FormulationService::new(provider.clone(), "gemini-2.5-pro");

    let mut lab = Lab::new();
    lab.selection_mut().select_tone(tone("6"));
    lab.selection_mut().select_tone(tone("9.3"));
    lab.selection_mut().set_gray_percentage(GrayPercentage::UpTo50);
    lab.selection_mut().set_hair_condition(HairCondition::Healthy);

    let result = lab.submit_formula(&service).await.unwrap();
    assert_eq!(provider.calls(), 1);

    let request = provider.last.lock().unwrap().clone().unwrap();
    assert_eq!(request.model, "gemini-2.5-pro");
    assert!(request.options.json_mode);
    for needle in ["6", "9.3", "26-50%", "Sano"] {
        assert!(request.user.contains(needle), "user prompt lacks {needle}");
    }
    assert!(request.system.unwrap().contains(&catalog::whitelist()));

    let view = render(&result);
    assert_eq!(view.swatch.hex, "#DCC389");
    assert_eq!(view.sections[0].lines, ["40g 9.3"]);
    assert_eq!(view.sections[1].lines, ["60g de 30vol (Proporción: 1+1.5)"]);
    assert!(view.warnings.is_empty());
    assert!(matches!(lab.outcome(), Outcome::Ready(LabResult::Formula(_))));
}

#[tokio::test]
async fn test_missing_tone_never_calls_provider() {
    let provider = ScriptedProvider::new(FORMULA_REPLY);
    let service = FormulationService::new(provider.clone(), "m");

    let mut lab = Lab::new();
    lab.selection_mut().select_tone(tone("6"));
    let err = lab.submit_formula(&service).await.unwrap_err();

    assert!(matches!(err, LabError::Validation(ValidationError::MissingSelection)));
    assert_eq!(provider.calls(), 0);
    assert!(!lab.is_pending());
}

#[tokio::test]
async fn test_incomplete_mix_never_calls_provider() {
    let provider = ScriptedProvider::new(PLAYGROUND_REPLY);
    let service = FormulationService::new(provider.clone(), "m");

    let mut lab = Lab::with_mode(Mode::Playground);
    lab.mixing_mut().add_to_mix(tone("7.1"));
    let err = lab.submit_playground(&service).await.unwrap_err();

    assert!(matches!(err, LabError::Validation(ValidationError::IncompleteMix)));
    assert_eq!(provider.calls(), 0);
    assert_eq!(
        lab.failure().map(|f| f.message.as_str()),
        Some("Por favor, establece un color base y añade al menos un tono a la fórmula para analizar.")
    );
}

#[tokio::test]
async fn test_playground_round_trip() {
    let provider = ScriptedProvider::new(PLAYGROUND_REPLY);
    let service = FormulationService::new(provider.clone(), "m");

    let mut lab = Lab::with_mode(Mode::Playground);
    lab.mixing_mut().set_base(tone("6"));
    assert!(lab.mixing_mut().add_to_mix(tone("7.1")));
    assert!(!lab.mixing_mut().add_to_mix(tone("7.1")));
    lab.mixing_mut().add_to_mix(tone("9.3"));
    lab.mixing_mut().update_grams_input("9.3", "45");

    let result = lab.submit_playground(&service).await.unwrap();
    let request = provider.last.lock().unwrap().clone().unwrap();
    assert!(request.user.contains("\"30g de 7.1 + 45g de 9.3\""));
    assert!(request.user.contains("\"6 (Rubio Oscuro)\""));

    let view = render(&result);
    assert_eq!(view.sections[0].lines, [".1 Ceniza"]);
}

#[tokio::test]
async fn test_malformed_reply_fails_and_releases_pending() {
    let provider = ScriptedProvider::new("not json");
    let service = FormulationService::new(provider.clone(), "m");

    let mut lab = Lab::new();
    lab.selection_mut().select_tone(tone("6"));
    lab.selection_mut().select_tone(tone("9.3"));
    let err = lab.submit_formula(&service).await.unwrap_err();

    assert!(matches!(err, LabError::MalformedResponse { .. }));
    assert!(!lab.is_pending());
    assert!(lab.can_submit());
    assert_eq!(
        lab.failure().map(|f| f.message.as_str()),
        Some("No se pudo generar la fórmula. El modelo devolvió un formato inesperado.")
    );
}

#[tokio::test]
async fn test_service_error_then_mode_toggle_clears_it() {
    let service = FormulationService::new(Arc::new(FailingProvider), "m");

    let mut lab = Lab::with_mode(Mode::Playground);
    lab.mixing_mut().set_base(tone("6"));
    lab.mixing_mut().add_to_mix(tone("Blue"));
    let err = lab.submit_playground(&service).await.unwrap_err();
    assert!(matches!(err, LabError::Service(msg) if msg.contains("403")));
    assert!(lab.failure().is_some());

    lab.toggle_mode().unwrap();
    assert_eq!(lab.outcome(), &Outcome::Idle);
}

#[tokio::test]
async fn test_clear_disables_analysis() {
    let mut lab = Lab::with_mode(Mode::Playground);
    lab.mixing_mut().set_base(tone("6"));
    lab.mixing_mut().add_to_mix(tone("7.1"));
    assert!(lab.can_submit());
    lab.mixing_mut().clear();
    assert!(!lab.can_submit());
}

#[tokio::test]
async fn test_ticket_through_spawned_task() {
    let provider = ScriptedProvider::new(PLAYGROUND_REPLY);
    let service = FormulationService::new(provider, "m");

    let mut lab = Lab::with_mode(Mode::Playground);
    lab.mixing_mut().set_base(tone("8"));
    lab.mixing_mut().add_to_mix(tone("Violet"));

    let ticket = lab.begin().unwrap();
    let (tx, mut rx) = tokio::sync::mpsc::channel(1);
    let worker = service.clone();
    tokio::spawn(async move {
        let result = worker.run(ticket.input()).await;
        let _ = tx.send((ticket, result)).await;
    });

    let (ticket, result) = rx.recv().await.unwrap();
    assert!(lab.is_pending());
    lab.finish(ticket, result).unwrap();
    assert!(matches!(lab.result(), Some(LabResult::Playground(_))));
}

#[test]
fn test_mode_toggle_resets_selection_and_bowl() {
    let mut lab = Lab::new();
    lab.selection_mut().select_tone(tone("6"));
    lab.selection_mut().select_tone(tone("9.3"));
    assert!(lab.can_submit());

    lab.toggle_mode().unwrap();
    assert_eq!(lab.selection().current(), None);
    assert_eq!(lab.selection().desired(), None);

    lab.mixing_mut().set_base(tone("6"));
    lab.mixing_mut().add_to_mix(tone("7.1"));
    lab.toggle_mode().unwrap();
    lab.toggle_mode().unwrap();
    assert_eq!(lab.mode(), Mode::Playground);
    assert_eq!(lab.mixing().base(), None);
    assert!(lab.mixing().mix().is_empty());
    assert!(!lab.can_submit());
}
