//! Prompt builder: validated inputs in, system + user instruction out.
//!
//! Deterministic and side-effect free; the catalog whitelist is generated
//! from [odinx_core::catalog] on each call.

use odinx_core::constants::{DISPLAY_NAME, PRODUCT_LINE};
use odinx_core::{FormulaInput, MixInput, catalog};
use serde::Serialize;

/// One request's instructions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

const RULES: &str = r#"REGLAS:
1.  Nunca inventes tonos. Cíñete a la lista proporcionada.
2.  Las fórmulas deben ser en gramos.
3.  Especifica el volumen del oxidante (10, 20, 30, 40 vol) según las necesidades de aclaración/depósito.
4.  La proporción de mezcla estándar es 1+1.5 (ej: 40g de color + 60g de oxidante).
5.  Usa la lógica del círculo cromático para la neutralización (Azul para naranja, Violeta para amarillo).
6.  Tu respuesta DEBE SER un único objeto JSON válido y sin formato. Sin explicaciones, sin markdown."#;

pub const FORMULA_SCHEMA: &str = r#"La estructura de salida JSON DEBE SER:
{
  "estimated_result": {
    "hex_color": "string (ej: #B5651D)",
    "description": "string (ej: Cobre dorado cálido con suave profundidad roja)"
  },
  "formula": {
    "tones": [
      {"tone": "string", "grams": number}
    ],
    "developer": {
      "volume": number,
      "ratio": "1+1.5",
      "oxidant_grams": number
    },
    "processing_time": "string (ej: 30-45min)",
    "notes": "string (Proporciona aquí guías de neutralización o intensificación)"
  }
}"#;

pub const PLAYGROUND_SCHEMA: &str = r#"La estructura JSON DEBE SER:
{
  "estimated_result": {
    "hex_color": "string (ej: #C57544)",
    "description": "string (ej: Un cobre rojizo vibrante y cálido a una altura 7)"
  },
  "dominant_reflex": "string (ej: .46 Cobre-Rojizo)",
  "undertone_movement": "string (ej: La mezcla potencia fuertemente la calidez y la vitalidad sobre la base existente)",
  "neutralization_warning": "string (ej: Esta fórmula es para añadir calidez, no para neutralizar. Para reducir la calidez, considera añadir un tono de la serie .1)"
}"#;

const FORMULA_TASK: &str = "Calcula la aclaración necesaria, considera el fondo de aclaración natural en el nivel de partida y selecciona el oxidante apropiado. Formula la mezcla de color para alcanzar el tono deseado, neutralizando cualquier calidez no deseada si es necesario. Además, proporciona un color hexadecimal y una breve descripción para una vista previa visual del resultado estimado.";

/// Persona, catalog whitelist and formulation rules shared by the formula prompt.
pub fn base_instruction() -> String {
    format!(
        "Eres \"{DISPLAY_NAME}\", un asistente profesional de formulación de color de cabello de clase mundial, especializado en el sistema de color {PRODUCT_LINE}. Tu propósito es ayudar a los estilistas generando fórmulas precisas basadas en selecciones visuales.\n\n\
         DEBES usar SIEMPRE y ÚNICAMENTE los tonos que existen en el catálogo de CAV. Aquí está la lista completa:\n\
         {whitelist}\n\n\
         {RULES}",
        whitelist = catalog::whitelist(),
    )
}

pub fn formula_prompt(input: &FormulaInput) -> Prompt {
    let system = format!("{}\n\n{}", base_instruction(), FORMULA_SCHEMA);
    let user = format!(
        "Genera una fórmula de color de cabello basada en estas selecciones:\n\
         - Cabello actual: nivel/tono {} ({})\n\
         - Cabello final deseado: nivel/tono {} ({})\n\
         - Porcentaje de canas: {}\n\
         - Condición del cabello: {}\n\n\
         {FORMULA_TASK}",
        input.current.code,
        input.current.name,
        input.desired.code,
        input.desired.name,
        input.gray.label(),
        input.condition.label(),
    );
    Prompt { system, user }
}

pub fn playground_prompt(input: &MixInput) -> Prompt {
    let system = format!(
        "Eres el analista de {DISPLAY_NAME}. Tu rol es analizar una mezcla de color de cabello introducida manualmente de la línea {PRODUCT_LINE} y describir el resultado probable, incluyendo una simulación visual. La mezcla se aplica sobre un color base ya existente.\n\
         Tonos del catálogo, para nombrar el reflejo dominante:\n\
         {whitelist}\n\
         Tu respuesta debe ser ÚNICAMENTE un solo objeto JSON válido y sin formato. Sin texto extra ni markdown.\n\
         {PLAYGROUND_SCHEMA}",
        whitelist = catalog::whitelist(),
    );
    let user = format!(
        "Analiza el resultado de aplicar la siguiente fórmula: \"{}\" sobre un cabello con el color base: \"{} ({})\". Considera el color base como el punto de partida, calcula cómo la fórmula lo alterará y describe el resultado final.",
        input.mix_string(),
        input.base.code,
        input.base.name,
    );
    Prompt { system, user }
}
