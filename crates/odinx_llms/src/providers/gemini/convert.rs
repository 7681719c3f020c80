//! Conversion between unified types and Gemini types

use super::types::{
    GeminiContent, GeminiGenerationConfig, GeminiPart, GeminiRequest, GeminiResponse,
};
use crate::error::{Error, Result};
use crate::types::{FinishReason, FinishReasonKind, GenerateRequest, GenerateResponse, Usage};

/// Convert unified request to a generateContent body
pub fn to_gemini_request(req: &GenerateRequest) -> GeminiRequest {
    let system_instruction = req.system.as_ref().map(|system| GeminiContent {
        role: None,
        parts: vec![GeminiPart::text(system.clone())],
    });

    let opts = &req.options;
    let generation_config = if opts.temperature.is_some() || opts.max_tokens.is_some() || opts.json_mode {
        Some(GeminiGenerationConfig {
            temperature: opts.temperature,
            max_output_tokens: opts.max_tokens,
            response_mime_type: opts.json_mode.then(|| "application/json".to_string()),
        })
    } else {
        None
    };

    GeminiRequest {
        contents: vec![GeminiContent {
            role: Some("user".to_string()),
            parts: vec![GeminiPart::text(req.user.clone())],
        }],
        system_instruction,
        generation_config,
    }
}

/// Convert a generateContent response to the unified response.
/// Text parts of the first candidate are joined; thought parts are dropped.
pub fn from_gemini_response(resp: GeminiResponse, requested_model: &str) -> Result<GenerateResponse> {
    let Some(candidate) = resp.candidates.first() else {
        let reason = resp
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref());
        return Err(match reason {
            Some(reason) => Error::invalid_response(format!("Gemini blocked the prompt: {}", reason)),
            None => Error::invalid_response("No candidates in Gemini response"),
        });
    };

    let text: String = candidate
        .content
        .as_ref()
        .map(|content| {
            content
                .parts
                .iter()
                .filter(|p| p.thought != Some(true))
                .filter_map(|p| p.text.as_deref())
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(Error::invalid_response(format!(
            "No content in Gemini response (finish reason: {})",
            candidate.finish_reason.as_deref().unwrap_or("unknown")
        )));
    }

    let usage = resp
        .usage_metadata
        .as_ref()
        .map(|u| {
            let prompt = u.prompt_token_count.unwrap_or(0);
            let completion = u.candidates_token_count.unwrap_or(0);
            Usage {
                prompt_tokens: prompt,
                completion_tokens: completion,
                total_tokens: u.total_token_count.unwrap_or(prompt + completion),
            }
        })
        .unwrap_or_default();

    Ok(GenerateResponse {
        text,
        model: resp
            .model_version
            .clone()
            .unwrap_or_else(|| requested_model.to_string()),
        finish_reason: parse_finish_reason(&candidate.finish_reason),
        usage,
    })
}

/// Parse Gemini finish reason to unified finish reason
pub fn parse_finish_reason(reason: &Option<String>) -> FinishReason {
    match reason.as_deref() {
        Some("STOP") => FinishReason::with_raw(FinishReasonKind::Stop, "STOP"),
        Some("MAX_TOKENS") => FinishReason::with_raw(FinishReasonKind::Length, "MAX_TOKENS"),
        Some(raw @ ("SAFETY" | "RECITATION" | "BLOCKLIST" | "PROHIBITED_CONTENT" | "SPII")) => {
            FinishReason::with_raw(FinishReasonKind::ContentFilter, raw)
        }
        Some(raw) => FinishReason::with_raw(FinishReasonKind::Other, raw),
        None => FinishReason::other(),
    }
}
