//! odinx-runtime — everything between a validated selection and a rendered result.
//!
//! ```text
//! Selection / Mixing ──snapshot──▶ prompt ──▶ FormulationService ──▶ parse ──▶ render
//!                                               (dyn Provider)
//! ```
//!
//! [Lab] owns the per-mode state and the request lifecycle; surfaces drive it
//! and draw [ResultView]s.

pub mod config;
pub mod error;
pub mod lab;
pub mod parse;
pub mod prompt;
pub mod render;
pub mod result;
pub mod service;

pub use config::{LabConfig, ProviderKind};
pub use error::{LabError, Result};
pub use lab::{Lab, LabFailure, LabInput, Outcome, Ticket};
pub use prompt::{Prompt, formula_prompt, playground_prompt};
pub use render::{ResultView, Section, Swatch, render};
pub use result::{
    Developer, EstimatedResult, Formula, FormulaResult, FormulaTone, LabResult, PlaygroundResult,
};
pub use service::FormulationService;
