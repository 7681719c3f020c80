//! Mode: formula lab / playground

use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Pick current and desired tones, ask for a formula.
    #[default]
    Formula,
    /// Compose a gram-weighted mix over a base colour, ask for an analysis.
    Playground,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Formula => "formula",
            Mode::Playground => "playground",
        }
    }

    /// Screen title shown to the stylist.
    pub fn title(&self) -> &'static str {
        match self {
            Mode::Formula => "Laboratorio Visual",
            Mode::Playground => "Playground Interactivo",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Mode::Formula => Mode::Playground,
            Mode::Playground => Mode::Formula,
        }
    }
}

impl FromStr for Mode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "formula" | "fórmula" => Ok(Mode::Formula),
            "playground" | "mix" => Ok(Mode::Playground),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_round_trips() {
        assert_eq!(Mode::Formula.toggled(), Mode::Playground);
        assert_eq!(Mode::Formula.toggled().toggled(), Mode::Formula);
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("Formula".parse(), Ok(Mode::Formula));
        assert_eq!("playground".parse(), Ok(Mode::Playground));
        assert!("other".parse::<Mode>().is_err());
    }

    #[test]
    fn test_mode_serializes_snake_case() {
        let json = serde_json::to_string(&Mode::Playground).unwrap();
        assert_eq!(json, "\"playground\"");
    }
}
