//! Response parser: fence stripping, JSON decode, schema validation.

use odinx_core::parse_hex;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{LabError, Result};
use crate::result::{EstimatedResult, FormulaResult, PlaygroundResult};

/// Drop a leading ```` ``` ```` / ```` ```json ```` marker and a trailing
/// ```` ``` ````, then trim.
pub fn strip_code_fence(text: &str) -> &str {
    let mut s = text.trim();
    if let Some(rest) = s.strip_prefix("```") {
        s = rest
            .strip_prefix("json")
            .or_else(|| rest.strip_prefix("JSON"))
            .unwrap_or(rest);
    }
    if let Some(rest) = s.trim_end().strip_suffix("```") {
        s = rest;
    }
    s.trim()
}

/// Strip fences and decode any JSON value.
pub fn parse_json(text: &str) -> Result<Value> {
    serde_json::from_str(strip_code_fence(text))
        .map_err(|e| LabError::malformed(format!("invalid JSON: {e}"), text))
}

pub fn parse_formula(text: &str) -> Result<FormulaResult> {
    let result: FormulaResult = decode(text)?;
    validate_formula(&result).map_err(|reason| LabError::malformed(reason, text))?;
    Ok(result)
}

pub fn parse_playground(text: &str) -> Result<PlaygroundResult> {
    let result: PlaygroundResult = decode(text)?;
    validate_playground(&result).map_err(|reason| LabError::malformed(reason, text))?;
    Ok(result)
}

fn decode<T: DeserializeOwned>(text: &str) -> Result<T> {
    let value = parse_json(text)?;
    if !value.is_object() {
        return Err(LabError::malformed("expected a JSON object", text));
    }
    serde_json::from_value(value)
        .map_err(|e| LabError::malformed(format!("unexpected shape: {e}"), text))
}

fn validate_formula(result: &FormulaResult) -> std::result::Result<(), String> {
    validate_estimated(&result.estimated_result)?;
    let formula = &result.formula;
    if formula.tones.is_empty() {
        return Err("formula.tones is empty".to_string());
    }
    for (i, tone) in formula.tones.iter().enumerate() {
        non_empty(&format!("formula.tones[{i}].tone"), &tone.tone)?;
        non_negative(&format!("formula.tones[{i}].grams"), tone.grams)?;
    }
    non_negative("formula.developer.volume", formula.developer.volume)?;
    non_negative("formula.developer.oxidant_grams", formula.developer.oxidant_grams)?;
    non_empty("formula.developer.ratio", &formula.developer.ratio)?;
    non_empty("formula.processing_time", &formula.processing_time)?;
    non_empty("formula.notes", &formula.notes)
}

fn validate_playground(result: &PlaygroundResult) -> std::result::Result<(), String> {
    validate_estimated(&result.estimated_result)?;
    non_empty("dominant_reflex", &result.dominant_reflex)?;
    non_empty("undertone_movement", &result.undertone_movement)?;
    non_empty("neutralization_warning", &result.neutralization_warning)
}

fn validate_estimated(estimated: &EstimatedResult) -> std::result::Result<(), String> {
    if parse_hex(&estimated.hex_color).is_none() {
        return Err(format!(
            "estimated_result.hex_color is not a hex colour: {:?}",
            estimated.hex_color
        ));
    }
    non_empty("estimated_result.description", &estimated.description)
}

fn non_empty(field: &str, value: &str) -> std::result::Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{field} is empty"))
    } else {
        Ok(())
    }
}

fn non_negative(field: &str, value: f64) -> std::result::Result<(), String> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(format!("{field} must be a non-negative number, got {value}"))
    }
}
