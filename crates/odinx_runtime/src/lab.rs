//! Lab controller: per-mode state plus the request lifecycle.
//!
//! ```text
//! Idle ──begin──▶ Pending(mode) ──finish(Ok)──▶ Ready(result)
//!   ▲                  │
//!   │                  └──finish(Err)──▶ Failed(failure)
//!   └──toggle_mode (refused while pending)
//! ```
//!
//! `begin_*` hands out a [Ticket]; `finish` consumes it on every path, so
//! pending is always released.

use odinx_core::{FormulaInput, MixInput, Mixing, Mode, Selection, ValidationError};
use serde::Serialize;

use crate::error::{LabError, Result};
use crate::result::LabResult;
use crate::service::FormulationService;

/// Failure shown in place of a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabFailure {
    pub mode: Mode,
    /// Banner text
    pub message: String,
    /// Technical cause, for logs and `--verbose`
    pub detail: String,
}

impl LabFailure {
    fn from_error(mode: Mode, err: &LabError) -> Self {
        Self {
            mode,
            message: err.user_message(mode),
            detail: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Outcome {
    #[default]
    Idle,
    Pending(Mode),
    Ready(LabResult),
    Failed(LabFailure),
}

/// Validated input for either mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "input", rename_all = "snake_case")]
pub enum LabInput {
    Formula(FormulaInput),
    Playground(MixInput),
}

impl LabInput {
    pub fn mode(&self) -> Mode {
        match self {
            LabInput::Formula(_) => Mode::Formula,
            LabInput::Playground(_) => Mode::Playground,
        }
    }
}

/// Proof that a request was started. Only [Lab] creates tickets.
#[derive(Debug)]
#[must_use = "a ticket must be passed to Lab::finish to release the pending state"]
pub struct Ticket<I> {
    id: u64,
    mode: Mode,
    input: I,
}

impl<I> Ticket<I> {
    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn input(&self) -> &I {
        &self.input
    }
}

#[derive(Debug, Default)]
pub struct Lab {
    mode: Mode,
    selection: Selection,
    mixing: Mixing,
    outcome: Outcome,
    /// Id of the live ticket, if any
    pending: Option<u64>,
    issued: u64,
}

impl Lab {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start in the given mode.
    pub fn with_mode(mode: Mode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut Selection {
        &mut self.selection
    }

    pub fn mixing(&self) -> &Mixing {
        &self.mixing
    }

    pub fn mixing_mut(&mut self) -> &mut Mixing {
        &mut self.mixing
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    pub fn result(&self) -> Option<&LabResult> {
        match &self.outcome {
            Outcome::Ready(result) => Some(result),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&LabFailure> {
        match &self.outcome {
            Outcome::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Whether the current mode's submit action is enabled.
    pub fn can_submit(&self) -> bool {
        !self.is_pending()
            && match self.mode {
                Mode::Formula => self.selection.can_submit(),
                Mode::Playground => self.mixing.can_submit(),
            }
    }

    /// Flip between formula and playground. Clears result and error and
    /// resets both the tone selection and the mixing bowl. Refused while a
    /// request is pending.
    pub fn toggle_mode(&mut self) -> Result<Mode> {
        if self.is_pending() {
            tracing::warn!(mode = self.mode.as_str(), "mode switch refused while pending");
            return Err(LabError::Busy);
        }
        self.enter(self.mode.toggled());
        self.selection.clear();
        self.mixing.clear();
        Ok(self.mode)
    }

    /// Switch to `mode`, dropping the outcome and the state of the mode being left.
    fn enter(&mut self, mode: Mode) {
        match self.mode {
            Mode::Formula => self.selection.clear(),
            Mode::Playground => self.mixing.clear(),
        }
        self.mode = mode;
        self.outcome = Outcome::Idle;
        tracing::debug!(mode = self.mode.as_str(), "mode switched");
    }

    /// Drop a shown result or error.
    pub fn dismiss(&mut self) {
        if !self.is_pending() {
            self.outcome = Outcome::Idle;
        }
    }

    /// Validate the formula selection and mark formula mode pending.
    /// Switches to formula mode first when needed.
    pub fn begin_formula(&mut self) -> Result<Ticket<FormulaInput>> {
        self.begin_with(Mode::Formula, |lab| lab.selection.snapshot())
    }

    /// Validate the mix and mark playground mode pending.
    pub fn begin_playground(&mut self) -> Result<Ticket<MixInput>> {
        self.begin_with(Mode::Playground, |lab| lab.mixing.snapshot())
    }

    /// Begin whichever mode is active.
    pub fn begin(&mut self) -> Result<Ticket<LabInput>> {
        match self.mode {
            Mode::Formula => self.begin_formula().map(|t| t.map(LabInput::Formula)),
            Mode::Playground => self.begin_playground().map(|t| t.map(LabInput::Playground)),
        }
    }

    fn begin_with<I>(
        &mut self,
        mode: Mode,
        snapshot: impl FnOnce(&Lab) -> std::result::Result<I, ValidationError>,
    ) -> Result<Ticket<I>> {
        if self.is_pending() {
            return Err(LabError::Busy);
        }
        // Implicit switch: the target mode's state was set up by the caller.
        if self.mode != mode {
            self.enter(mode);
        }
        let input = match snapshot(self) {
            Ok(input) => input,
            Err(err) => {
                let err = LabError::Validation(err);
                tracing::info!(mode = mode.as_str(), error = %err, "submit rejected");
                self.outcome = Outcome::Failed(LabFailure::from_error(mode, &err));
                return Err(err);
            }
        };

        self.issued += 1;
        self.pending = Some(self.issued);
        self.outcome = Outcome::Pending(mode);
        tracing::info!(mode = mode.as_str(), ticket = self.issued, "request started");
        Ok(Ticket {
            id: self.issued,
            mode,
            input,
        })
    }

    /// Release pending and store the outcome. The error or a copy of the
    /// result is handed back to the caller.
    pub fn finish<I>(&mut self, ticket: Ticket<I>, result: Result<LabResult>) -> Result<LabResult> {
        if self.pending != Some(ticket.id) {
            tracing::warn!(ticket = ticket.id, "ignoring result for a stale ticket");
            return result;
        }
        self.pending = None;
        match &result {
            Ok(value) => {
                tracing::info!(mode = ticket.mode.as_str(), "request finished");
                self.outcome = Outcome::Ready(value.clone());
            }
            Err(err) => {
                tracing::warn!(mode = ticket.mode.as_str(), error = %err, "request failed");
                self.outcome = Outcome::Failed(LabFailure::from_error(ticket.mode, err));
            }
        }
        result
    }

    pub async fn submit_formula(&mut self, service: &FormulationService) -> Result<LabResult> {
        let ticket = self.begin_formula()?;
        let result = service.formulate(ticket.input()).await.map(LabResult::from);
        self.finish(ticket, result)
    }

    pub async fn submit_playground(&mut self, service: &FormulationService) -> Result<LabResult> {
        let ticket = self.begin_playground()?;
        let result = service.analyze(ticket.input()).await.map(LabResult::from);
        self.finish(ticket, result)
    }
}

impl<I> Ticket<I> {
    fn map<J>(self, f: impl FnOnce(I) -> J) -> Ticket<J> {
        Ticket {
            id: self.id,
            mode: self.mode,
            input: f(self.input),
        }
    }
}

#[cfg(test)]
mod tests {
    use odinx_core::{GrayPercentage, catalog};

    use super::*;
    use crate::result::{EstimatedResult, PlaygroundResult};

    fn tone(code: &str) -> odinx_core::Tone {
        *catalog::find(code).unwrap()
    }

    fn playground_result() -> LabResult {
        LabResult::Playground(PlaygroundResult {
            estimated_result: EstimatedResult {
                hex_color: "#907D6B".to_string(),
                description: "Ceniza".to_string(),
            },
            dominant_reflex: ".1".to_string(),
            undertone_movement: "Enfría".to_string(),
            neutralization_warning: "Ninguno".to_string(),
        })
    }

    #[test]
    fn test_begin_without_selection_fails_without_pending() {
        let mut lab = Lab::new();
        lab.selection_mut().select_tone(tone("6"));
        let err = lab.begin_formula().unwrap_err();
        assert!(matches!(err, LabError::Validation(ValidationError::MissingSelection)));
        assert!(!lab.is_pending());
        assert!(matches!(lab.outcome(), Outcome::Failed(f) if f.mode == Mode::Formula));
    }

    #[test]
    fn test_pending_blocks_submit_and_toggle() {
        let mut lab = Lab::with_mode(Mode::Playground);
        lab.mixing_mut().set_base(tone("6"));
        lab.mixing_mut().add_to_mix(tone("7.1"));
        assert!(lab.can_submit());

        let ticket = lab.begin_playground().unwrap();
        assert_eq!(lab.outcome(), &Outcome::Pending(Mode::Playground));
        assert!(!lab.can_submit());
        assert!(matches!(lab.begin_playground(), Err(LabError::Busy)));
        assert!(matches!(lab.toggle_mode(), Err(LabError::Busy)));
        assert_eq!(ticket.input().mix_string(), "30g de 7.1");

        lab.finish(ticket, Ok(playground_result())).unwrap();
        assert!(!lab.is_pending());
        assert_eq!(lab.result(), Some(&playground_result()));
    }

    #[test]
    fn test_failure_replaces_previous_result() {
        let mut lab = Lab::with_mode(Mode::Playground);
        lab.mixing_mut().set_base(tone("6"));
        lab.mixing_mut().add_to_mix(tone("7.1"));

        let ticket = lab.begin_playground().unwrap();
        lab.finish(ticket, Ok(playground_result())).unwrap();

        let ticket = lab.begin_playground().unwrap();
        assert!(lab.result().is_none());
        let err = lab
            .finish(ticket, Err(LabError::Service("timeout".to_string())))
            .unwrap_err();
        assert!(matches!(err, LabError::Service(_)));
        let failure = lab.failure().unwrap();
        assert_eq!(
            failure.message,
            "No se pudo analizar la mezcla. Por favor, revisa tu selección."
        );
        assert!(failure.detail.contains("timeout"));
        assert!(!lab.is_pending());
    }

    #[test]
    fn test_toggle_resets_outcome_and_selections() {
        let mut lab = Lab::new();
        lab.selection_mut().select_tone(tone("6"));
        lab.selection_mut().set_gray_percentage(GrayPercentage::UpTo50);
        let _ = lab.begin_formula();
        assert!(lab.failure().is_some());

        assert_eq!(lab.toggle_mode().unwrap(), Mode::Playground);
        assert_eq!(lab.outcome(), &Outcome::Idle);
        assert_eq!(lab.selection().current(), None);
        assert_eq!(lab.selection().gray_percentage(), GrayPercentage::UpTo50);

        lab.mixing_mut().set_base(tone("6"));
        lab.mixing_mut().add_to_mix(tone("7.1"));
        assert_eq!(lab.toggle_mode().unwrap(), Mode::Formula);
        assert_eq!(lab.mixing().base(), None);
        assert!(lab.mixing().mix().is_empty());
    }

    #[test]
    fn test_begin_switches_mode() {
        let mut lab = Lab::new();
        lab.mixing_mut().set_base(tone("6"));
        lab.mixing_mut().add_to_mix(tone("9.3"));
        let ticket = lab.begin().unwrap_err();
        assert!(matches!(ticket, LabError::Validation(ValidationError::MissingSelection)));

        let ticket = lab.begin_playground().unwrap();
        assert_eq!(lab.mode(), Mode::Playground);
        assert_eq!(ticket.mode(), Mode::Playground);
        lab.finish(ticket, Ok(playground_result())).unwrap();
    }

    #[test]
    fn test_begin_wraps_input_by_mode() {
        let mut lab = Lab::new();
        lab.selection_mut().select_tone(tone("6"));
        lab.selection_mut().select_tone(tone("9.3"));
        let ticket = lab.begin().unwrap();
        assert_eq!(ticket.input().mode(), Mode::Formula);
        let _ = lab.finish(ticket, Err(LabError::Service("x".to_string())));
        assert_eq!(
            lab.failure().map(|f| f.message.as_str()),
            Some("No se pudo generar la fórmula. El modelo devolvió un formato inesperado.")
        );
    }
}
