//! Conversion between unified types and OpenAI types

use super::types::{OpenAiMessage, OpenAiRequest, OpenAiResponse, OpenAiResponseFormat};
use crate::error::{Error, Result};
use crate::types::{FinishReason, FinishReasonKind, GenerateRequest, GenerateResponse, Usage};

/// Convert unified request to a chat completion request
pub fn to_openai_request(req: &GenerateRequest) -> OpenAiRequest {
    let mut messages = Vec::with_capacity(2);
    if let Some(system) = &req.system {
        messages.push(OpenAiMessage {
            role: "system".to_string(),
            content: Some(system.clone()),
        });
    }
    messages.push(OpenAiMessage {
        role: "user".to_string(),
        content: Some(req.user.clone()),
    });

    OpenAiRequest {
        model: req.model.clone(),
        messages,
        temperature: req.options.temperature,
        max_tokens: req.options.max_tokens,
        response_format: req.options.json_mode.then(|| OpenAiResponseFormat {
            type_: "json_object".to_string(),
        }),
    }
}

/// Convert chat completion response to unified response
pub fn from_openai_response(resp: OpenAiResponse, requested_model: &str) -> Result<GenerateResponse> {
    let choice = resp
        .choices
        .first()
        .ok_or_else(|| Error::invalid_response("No choices in OpenAI response"))?;

    let text = choice.message.content.clone().unwrap_or_default();
    if text.trim().is_empty() {
        return Err(Error::invalid_response("No content in OpenAI response"));
    }

    let usage = resp
        .usage
        .as_ref()
        .map(|u| Usage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        })
        .unwrap_or_default();

    Ok(GenerateResponse {
        text,
        model: resp.model.clone().unwrap_or_else(|| requested_model.to_string()),
        finish_reason: parse_finish_reason(&choice.finish_reason),
        usage,
    })
}

/// Parse OpenAI finish reason to unified finish reason
pub fn parse_finish_reason(reason: &Option<String>) -> FinishReason {
    match reason.as_deref() {
        Some("stop") => FinishReason::with_raw(FinishReasonKind::Stop, "stop"),
        Some("length") => FinishReason::with_raw(FinishReasonKind::Length, "length"),
        Some("content_filter") => {
            FinishReason::with_raw(FinishReasonKind::ContentFilter, "content_filter")
        }
        Some(raw) => FinishReason::with_raw(FinishReasonKind::Other, raw),
        None => FinishReason::other(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_finish_reason() {
        assert_eq!(
            parse_finish_reason(&Some("stop".to_string())).unified,
            FinishReasonKind::Stop
        );
        assert_eq!(
            parse_finish_reason(&Some("length".to_string())).unified,
            FinishReasonKind::Length
        );
        assert_eq!(parse_finish_reason(&None).unified, FinishReasonKind::Other);
    }

    #[test]
    fn test_request_has_system_then_user() {
        let req = GenerateRequest::new("gpt-4o-mini", "u").with_system("s").json_mode(true);
        let body = serde_json::to_value(to_openai_request(&req)).unwrap();
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "u");
        assert_eq!(body["response_format"]["type"], "json_object");
    }

    #[test]
    fn test_without_system_message() {
        let req = GenerateRequest::new("m", "u");
        let body = to_openai_request(&req);
        assert_eq!(body.messages.len(), 1);
        assert!(body.response_format.is_none());
    }

    #[test]
    fn test_empty_choices_is_invalid() {
        let resp: OpenAiResponse = serde_json::from_value(serde_json::json!({ "choices": [] })).unwrap();
        assert!(matches!(
            from_openai_response(resp, "m"),
            Err(Error::InvalidResponse(_))
        ));
    }
}
