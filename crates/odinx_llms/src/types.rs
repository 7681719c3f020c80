//! Provider-neutral request and response types.

use serde::{Deserialize, Serialize};

/// Extra HTTP headers, kept in insertion order. Keys compare case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a header.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self
            .entries
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(&key))
        {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Copy every entry of `other` over this map.
    pub fn merge_with(&mut self, other: &Headers) {
        for (k, v) in &other.entries {
            self.insert(k.clone(), v.clone());
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries with invalid names or values are skipped.
    pub fn to_reqwest_headers(&self) -> reqwest::header::HeaderMap {
        let mut map = reqwest::header::HeaderMap::new();
        for (k, v) in &self.entries {
            let (Ok(name), Ok(value)) = (
                reqwest::header::HeaderName::from_bytes(k.as_bytes()),
                reqwest::header::HeaderValue::from_str(v),
            ) else {
                continue;
            };
            map.insert(name, value);
        }
        map
    }
}

/// Per-request knobs. All optional; providers ignore what they do not support.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    /// Ask the provider for a JSON-only answer when it supports that.
    pub json_mode: bool,
    pub headers: Option<Headers>,
}

/// A single completion request: one system instruction, one user turn.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub model: String,
    pub system: Option<String>,
    pub user: String,
    pub options: GenerateOptions,
}

impl GenerateRequest {
    pub fn new(model: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            system: None,
            user: user.into(),
            options: GenerateOptions::default(),
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn with_options(mut self, options: GenerateOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.options.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.options.max_tokens = Some(max_tokens);
        self
    }

    pub fn json_mode(mut self, on: bool) -> Self {
        self.options.json_mode = on;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReasonKind {
    Stop,
    Length,
    ContentFilter,
    Other,
}

/// Why generation stopped, unified plus the provider's raw value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinishReason {
    pub unified: FinishReasonKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

impl FinishReason {
    pub fn with_raw(unified: FinishReasonKind, raw: impl Into<String>) -> Self {
        Self {
            unified,
            raw: Some(raw.into()),
        }
    }

    pub fn other() -> Self {
        Self {
            unified: FinishReasonKind::Other,
            raw: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Completion text (all text parts joined).
    pub text: String,
    /// Model that answered, as reported by the provider.
    pub model: String,
    pub finish_reason: FinishReason,
    pub usage: Usage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_insert_replaces_case_insensitively() {
        let mut headers = Headers::new();
        headers.insert("Content-Type", "text/plain");
        headers.insert("content-type", "application/json");
        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("CONTENT-TYPE"), Some("application/json"));
    }

    #[test]
    fn test_headers_merge() {
        let mut base = Headers::new();
        base.insert("Authorization", "Bearer a");
        let mut custom = Headers::new();
        custom.insert("Authorization", "Bearer b");
        custom.insert("X-Trace", "1");
        base.merge_with(&custom);
        assert_eq!(base.get("authorization"), Some("Bearer b"));
        assert_eq!(base.len(), 2);
    }

    #[test]
    fn test_invalid_headers_are_skipped() {
        let mut headers = Headers::new();
        headers.insert("bad header", "x");
        headers.insert("X-Ok", "yes");
        let map = headers.to_reqwest_headers();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("x-ok").unwrap(), "yes");
    }

    #[test]
    fn test_request_builder() {
        let req = GenerateRequest::new("m", "hi")
            .with_system("sys")
            .with_temperature(0.4)
            .json_mode(true);
        assert_eq!(req.system.as_deref(), Some("sys"));
        assert_eq!(req.options.temperature, Some(0.4));
        assert!(req.options.json_mode);
        assert_eq!(req.options.max_tokens, None);
    }
}
