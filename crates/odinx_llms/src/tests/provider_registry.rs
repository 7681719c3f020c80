use std::sync::Arc;

use crate::error::Error;
use crate::provider::{Provider, ProviderRegistry};
use crate::types::{FinishReason, GenerateRequest, GenerateResponse, Headers, Usage};
use async_trait::async_trait;

/// Mock provider for testing
struct MockProvider {
    id: &'static str,
}

#[async_trait]
impl Provider for MockProvider {
    fn provider_id(&self) -> &str {
        self.id
    }

    fn build_headers(&self, _custom_headers: Option<&Headers>) -> Headers {
        Headers::new()
    }

    async fn generate(&self, request: GenerateRequest) -> crate::error::Result<GenerateResponse> {
        if request.user.is_empty() {
            return Err(Error::Other("mock".to_string()));
        }
        Ok(GenerateResponse {
            text: request.user,
            model: request.model,
            finish_reason: FinishReason::other(),
            usage: Usage::default(),
        })
    }
}

#[test]
fn test_register_and_get_provider() {
    let registry = ProviderRegistry::new()
        .register("test", MockProvider { id: "test" });

    let provider = registry.get_provider("test");
    assert!(provider.is_ok());
    assert_eq!(provider.unwrap().provider_id(), "test");
}

#[test]
fn test_provider_not_found() {
    let registry = ProviderRegistry::new();
    let result = registry.get_provider("nonexistent");
    assert!(matches!(result, Err(Error::ProviderNotFound(id)) if id == "nonexistent"));
}

#[test]
fn test_list_providers() {
    let registry = ProviderRegistry::new()
        .register("alpha", MockProvider { id: "alpha" })
        .register_arc("beta", Arc::new(MockProvider { id: "beta" }));

    let mut ids = registry.list_providers();
    ids.sort();
    assert_eq!(ids, vec!["alpha", "beta"]);
}

#[tokio::test]
async fn test_default_list_models_is_empty() {
    let provider = MockProvider { id: "test" };
    assert!(provider.list_models().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_generate_through_registry() {
    let registry = ProviderRegistry::new().register("echo", MockProvider { id: "echo" });
    let provider = registry.get_provider("echo").unwrap();
    let response = provider
        .generate(GenerateRequest::new("m", "hola"))
        .await
        .unwrap();
    assert_eq!(response.text, "hola");
    assert_eq!(response.model, "m");
}
