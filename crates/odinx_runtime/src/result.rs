//! Result shapes returned by the model

use odinx_core::{Mode, catalog};
use serde::{Deserialize, Serialize};

/// Visual preview of the outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimatedResult {
    pub hex_color: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormulaTone {
    /// Catalog code as written by the model
    pub tone: String,
    pub grams: f64,
}

/// Developer (oxidant) mix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Developer {
    pub volume: f64,
    pub ratio: String,
    pub oxidant_grams: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Formula {
    pub tones: Vec<FormulaTone>,
    pub developer: Developer,
    pub processing_time: String,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormulaResult {
    pub estimated_result: EstimatedResult,
    pub formula: Formula,
}

impl FormulaResult {
    /// Tone codes the model used that are not in the catalog. Advisory only.
    pub fn unknown_tones(&self) -> Vec<&str> {
        self.formula
            .tones
            .iter()
            .map(|t| t.tone.as_str())
            .filter(|code| !catalog::contains(code))
            .collect()
    }

    pub fn total_color_grams(&self) -> f64 {
        self.formula.tones.iter().map(|t| t.grams).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaygroundResult {
    pub estimated_result: EstimatedResult,
    pub dominant_reflex: String,
    pub undertone_movement: String,
    pub neutralization_warning: String,
}

/// Either result, tagged by the mode that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "result", rename_all = "snake_case")]
pub enum LabResult {
    Formula(FormulaResult),
    Playground(PlaygroundResult),
}

impl LabResult {
    pub fn mode(&self) -> Mode {
        match self {
            LabResult::Formula(_) => Mode::Formula,
            LabResult::Playground(_) => Mode::Playground,
        }
    }

    pub fn estimated_result(&self) -> &EstimatedResult {
        match self {
            LabResult::Formula(r) => &r.estimated_result,
            LabResult::Playground(r) => &r.estimated_result,
        }
    }
}

impl From<FormulaResult> for LabResult {
    fn from(result: FormulaResult) -> Self {
        LabResult::Formula(result)
    }
}

impl From<PlaygroundResult> for LabResult {
    fn from(result: PlaygroundResult) -> Self {
        LabResult::Playground(result)
    }
}
