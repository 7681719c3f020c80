//! Runtime error types

use odinx_core::{Mode, ValidationError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LabError {
    /// Input rejected before any request was issued
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Transport, auth or quota failure from the provider
    #[error("Service error: {0}")]
    Service(String),

    /// The completion did not decode into the expected shape
    #[error("Malformed response: {reason}")]
    MalformedResponse { reason: String, raw: String },

    #[error("A request is already pending")]
    Busy,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<odinx_llms::Error> for LabError {
    fn from(err: odinx_llms::Error) -> Self {
        LabError::Service(err.to_string())
    }
}

impl LabError {
    pub fn malformed(reason: impl Into<String>, raw: impl Into<String>) -> Self {
        LabError::MalformedResponse {
            reason: reason.into(),
            raw: raw.into(),
        }
    }

    /// Banner text for the stylist. Request failures are reported per mode
    /// without provider details; those go to the log.
    pub fn user_message(&self, mode: Mode) -> String {
        match (self, mode) {
            (LabError::Validation(err), _) => err.user_message(),
            (LabError::Busy, _) => "Espera a que termine la solicitud en curso.".to_string(),
            (LabError::Config(msg), _) => format!("Configuración incompleta: {msg}"),
            (_, Mode::Formula) => {
                "No se pudo generar la fórmula. El modelo devolvió un formato inesperado."
                    .to_string()
            }
            (_, Mode::Playground) => {
                "No se pudo analizar la mezcla. Por favor, revisa tu selección.".to_string()
            }
        }
    }

    /// Raw completion text, when the failure kept it.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            LabError::MalformedResponse { raw, .. } => Some(raw),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, LabError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_failure_message_depends_on_mode() {
        let err = LabError::Service("Gemini API error 503".to_string());
        assert!(err.user_message(Mode::Formula).starts_with("No se pudo generar la fórmula"));
        assert!(err.user_message(Mode::Playground).starts_with("No se pudo analizar la mezcla"));
    }

    #[test]
    fn test_validation_message_passes_through() {
        let err = LabError::from(ValidationError::IncompleteMix);
        assert_eq!(
            err.user_message(Mode::Playground),
            ValidationError::IncompleteMix.user_message()
        );
    }

    #[test]
    fn test_llm_error_maps_to_service() {
        let err: LabError = odinx_llms::Error::provider_error("quota").into();
        assert!(matches!(err, LabError::Service(msg) if msg.contains("quota")));
    }

    #[test]
    fn test_malformed_keeps_raw_text() {
        let err = LabError::malformed("expected value at line 1", "not json");
        assert_eq!(err.to_string(), "Malformed response: expected value at line 1");
        assert_eq!(err.raw_response(), Some("not json"));
        assert_eq!(LabError::Busy.raw_response(), None);
    }
}
