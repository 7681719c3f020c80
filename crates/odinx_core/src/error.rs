use thiserror::Error;

/// Input problems detected before any request is issued.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("select both a current and a desired tone")]
    MissingSelection,

    #[error("set a base color and add at least one tone")]
    IncompleteMix,

    #[error("unknown tone code: {0}")]
    UnknownTone(String),

    #[error("invalid {kind}: {value}")]
    InvalidOption { kind: &'static str, value: String },
}

impl ValidationError {
    /// Message shown inline to the stylist.
    pub fn user_message(&self) -> String {
        match self {
            ValidationError::MissingSelection => {
                "Selecciona un tono actual y un tono deseado para generar la fórmula.".to_string()
            }
            ValidationError::IncompleteMix => {
                "Por favor, establece un color base y añade al menos un tono a la fórmula para analizar."
                    .to_string()
            }
            ValidationError::UnknownTone(code) => {
                format!("El tono {code} no existe en el catálogo.")
            }
            ValidationError::InvalidOption { kind, value } => {
                format!("Valor no válido para {kind}: {value}")
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ValidationError>;
