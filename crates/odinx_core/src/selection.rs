//! Formula-mode selection: current tone, desired tone and context inputs.

use serde::Serialize;

use crate::error::ValidationError;
use crate::tone::{GrayPercentage, HairCondition, Tone};

/// Which slot a click filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneSlot {
    Current,
    Desired,
}

/// How a palette entry relates to the selection (drives highlighting).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneRole {
    None,
    Current,
    Desired,
    /// Same tone picked as current and desired.
    Both,
}

/// Validated formula request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FormulaInput {
    pub current: Tone,
    pub desired: Tone,
    pub gray: GrayPercentage,
    pub condition: HairCondition,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    current: Option<Tone>,
    desired: Option<Tone>,
    gray: GrayPercentage,
    condition: HairCondition,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Palette click. Fills `current` while it is empty or when the clicked
    /// tone is the current one; every other click fills `desired`.
    pub fn select_tone(&mut self, tone: Tone) -> ToneSlot {
        match self.current {
            Some(current) if current.code != tone.code => {
                self.desired = Some(tone);
                ToneSlot::Desired
            }
            _ => {
                self.current = Some(tone);
                ToneSlot::Current
            }
        }
    }

    pub fn set_gray_percentage(&mut self, gray: GrayPercentage) {
        self.gray = gray;
    }

    pub fn set_hair_condition(&mut self, condition: HairCondition) {
        self.condition = condition;
    }

    /// Drop both tones; the context inputs keep their values.
    pub fn clear(&mut self) {
        self.current = None;
        self.desired = None;
    }

    pub fn current(&self) -> Option<Tone> {
        self.current
    }

    pub fn desired(&self) -> Option<Tone> {
        self.desired
    }

    pub fn gray_percentage(&self) -> GrayPercentage {
        self.gray
    }

    pub fn hair_condition(&self) -> HairCondition {
        self.condition
    }

    pub fn can_submit(&self) -> bool {
        self.current.is_some() && self.desired.is_some()
    }

    pub fn role_of(&self, code: &str) -> ToneRole {
        let is_current = self.current.is_some_and(|t| t.code == code);
        let is_desired = self.desired.is_some_and(|t| t.code == code);
        match (is_current, is_desired) {
            (true, true) => ToneRole::Both,
            (true, false) => ToneRole::Current,
            (false, true) => ToneRole::Desired,
            (false, false) => ToneRole::None,
        }
    }

    /// The request this selection would submit.
    pub fn snapshot(&self) -> Result<FormulaInput, ValidationError> {
        match (self.current, self.desired) {
            (Some(current), Some(desired)) => Ok(FormulaInput {
                current,
                desired,
                gray: self.gray,
                condition: self.condition,
            }),
            _ => Err(ValidationError::MissingSelection),
        }
    }
}
