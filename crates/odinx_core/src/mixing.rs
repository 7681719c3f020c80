//! Playground mixing bowl: a base colour plus gram-weighted tones.

use serde::Serialize;

use crate::error::ValidationError;
use crate::tone::Tone;

/// Grams assigned to a tone when it is dropped into the bowl.
pub const DEFAULT_GRAMS: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MixedTone {
    pub tone: Tone,
    pub grams: u32,
}

/// Validated playground request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MixInput {
    pub base: Tone,
    pub mix: Vec<MixedTone>,
}

impl MixInput {
    /// `"30g de 7.1 + 45g de 9.3"`
    pub fn mix_string(&self) -> String {
        mix_string(&self.mix)
    }
}

fn mix_string(mix: &[MixedTone]) -> String {
    mix.iter()
        .map(|m| format!("{}g de {}", m.grams, m.tone.code))
        .collect::<Vec<_>>()
        .join(" + ")
}

/// Parse a grams field the way a numeric text input does: leading digits
/// count, anything non-numeric is 0, negatives clamp to 0.
pub fn parse_grams(input: &str) -> u32 {
    let s = input.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits: &str = {
        let end = rest
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        &rest[..end]
    };
    if digits.is_empty() || negative {
        return 0;
    }
    digits.parse::<u32>().unwrap_or(u32::MAX)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mixing {
    base: Option<Tone>,
    mix: Vec<MixedTone>,
}

impl Mixing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_base(&mut self, tone: Tone) {
        self.base = Some(tone);
    }

    pub fn remove_base(&mut self) {
        self.base = None;
    }

    /// Append `tone` at [DEFAULT_GRAMS]. A tone already in the bowl is left
    /// untouched and `false` is returned.
    pub fn add_to_mix(&mut self, tone: Tone) -> bool {
        if self.position(tone.code).is_some() {
            return false;
        }
        self.mix.push(MixedTone {
            tone,
            grams: DEFAULT_GRAMS,
        });
        true
    }

    /// Returns `false` when no entry has `code`.
    pub fn update_grams(&mut self, code: &str, grams: u32) -> bool {
        match self.position(code) {
            Some(idx) => {
                self.mix[idx].grams = grams;
                true
            }
            None => false,
        }
    }

    /// [update_grams](Self::update_grams) from raw user text; see [parse_grams].
    pub fn update_grams_input(&mut self, code: &str, input: &str) -> bool {
        self.update_grams(code, parse_grams(input))
    }

    pub fn remove_from_mix(&mut self, code: &str) -> bool {
        let before = self.mix.len();
        self.mix.retain(|m| m.tone.code != code);
        self.mix.len() != before
    }

    pub fn clear(&mut self) {
        self.base = None;
        self.mix.clear();
    }

    pub fn base(&self) -> Option<Tone> {
        self.base
    }

    pub fn mix(&self) -> &[MixedTone] {
        &self.mix
    }

    pub fn grams_of(&self, code: &str) -> Option<u32> {
        self.position(code).map(|idx| self.mix[idx].grams)
    }

    pub fn total_grams(&self) -> u64 {
        self.mix.iter().map(|m| u64::from(m.grams)).sum()
    }

    pub fn mix_string(&self) -> String {
        mix_string(&self.mix)
    }

    pub fn can_submit(&self) -> bool {
        self.base.is_some() && !self.mix.is_empty()
    }

    /// Whether there is anything for `clear` to remove.
    pub fn can_clear(&self) -> bool {
        self.base.is_some() || !self.mix.is_empty()
    }

    pub fn snapshot(&self) -> Result<MixInput, ValidationError> {
        match self.base {
            Some(base) if !self.mix.is_empty() => Ok(MixInput {
                base,
                mix: self.mix.clone(),
            }),
            _ => Err(ValidationError::IncompleteMix),
        }
    }

    fn position(&self, code: &str) -> Option<usize> {
        self.mix.iter().position(|m| m.tone.code == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    fn tone(code: &str) -> Tone {
        *catalog::find(code).unwrap()
    }

    #[test]
    fn test_add_defaults_to_thirty_grams() {
        let mut mixing = Mixing::new();
        assert!(mixing.add_to_mix(tone("7.1")));
        assert_eq!(mixing.grams_of("7.1"), Some(DEFAULT_GRAMS));
    }

    #[test]
    fn test_duplicate_add_is_ignored() {
        let mut mixing = Mixing::new();
        mixing.add_to_mix(tone("7.1"));
        mixing.update_grams("7.1", 45);
        assert!(!mixing.add_to_mix(tone("7.1")));
        assert_eq!(mixing.mix().len(), 1);
        assert_eq!(mixing.grams_of("7.1"), Some(45));
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let mut mixing = Mixing::new();
        mixing.add_to_mix(tone("9.3"));
        mixing.add_to_mix(tone("7.1"));
        mixing.add_to_mix(tone("Violet"));
        let codes: Vec<_> = mixing.mix().iter().map(|m| m.tone.code).collect();
        assert_eq!(codes, vec!["9.3", "7.1", "Violet"]);
    }

    #[test]
    fn test_update_grams_input_coerces() {
        let mut mixing = Mixing::new();
        mixing.add_to_mix(tone("7.1"));
        assert!(mixing.update_grams_input("7.1", "abc"));
        assert_eq!(mixing.grams_of("7.1"), Some(0));
        mixing.update_grams_input("7.1", "45");
        assert_eq!(mixing.grams_of("7.1"), Some(45));
        mixing.update_grams_input("7.1", "");
        assert_eq!(mixing.grams_of("7.1"), Some(0));
        assert!(!mixing.update_grams_input("9.3", "10"));
    }

    #[test]
    fn test_parse_grams() {
        assert_eq!(parse_grams("30"), 30);
        assert_eq!(parse_grams(" 12.7"), 12);
        assert_eq!(parse_grams("15g"), 15);
        assert_eq!(parse_grams("-5"), 0);
        assert_eq!(parse_grams("NaN"), 0);
        assert_eq!(parse_grams("+8"), 8);
        assert_eq!(parse_grams("99999999999"), u32::MAX);
    }

    #[test]
    fn test_remove_from_mix() {
        let mut mixing = Mixing::new();
        mixing.add_to_mix(tone("7.1"));
        mixing.add_to_mix(tone("9.3"));
        assert!(mixing.remove_from_mix("7.1"));
        assert!(!mixing.remove_from_mix("7.1"));
        assert_eq!(mixing.mix().len(), 1);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut mixing = Mixing::new();
        mixing.set_base(tone("6"));
        mixing.add_to_mix(tone("7.1"));
        assert!(mixing.can_submit());
        mixing.clear();
        assert_eq!(mixing.base(), None);
        assert!(mixing.mix().is_empty());
        assert!(!mixing.can_submit());
        assert!(!mixing.can_clear());
    }

    #[test]
    fn test_snapshot_requires_base_and_tones() {
        let mut mixing = Mixing::new();
        mixing.add_to_mix(tone("7.1"));
        assert_eq!(mixing.snapshot(), Err(ValidationError::IncompleteMix));
        mixing.remove_from_mix("7.1");
        mixing.set_base(tone("6"));
        assert_eq!(mixing.snapshot(), Err(ValidationError::IncompleteMix));
        mixing.add_to_mix(tone("7.1"));
        mixing.add_to_mix(tone("9.3"));
        mixing.update_grams("9.3", 45);
        let input = mixing.snapshot().unwrap();
        assert_eq!(input.base.code, "6");
        assert_eq!(input.mix_string(), "30g de 7.1 + 45g de 9.3");
    }

    #[test]
    fn test_set_base_replaces() {
        let mut mixing = Mixing::new();
        mixing.set_base(tone("6"));
        mixing.set_base(tone("8"));
        assert_eq!(mixing.base(), Some(tone("8")));
        mixing.remove_base();
        assert!(mixing.can_clear() == !mixing.mix().is_empty());
    }

    #[test]
    fn test_total_grams() {
        let mut mixing = Mixing::new();
        mixing.add_to_mix(tone("7.1"));
        mixing.add_to_mix(tone("9.3"));
        mixing.update_grams("9.3", 45);
        assert_eq!(mixing.total_grams(), 75);
    }
}
