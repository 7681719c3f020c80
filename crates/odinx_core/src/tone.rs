//! Tone records and the auxiliary enumerations supplied alongside a selection.

use std::str::FromStr;

use serde::Serialize;

use crate::error::ValidationError;

/// One catalog entry: a colour product identified by its code.
///
/// Tones only exist as `'static` catalog records, so the type is `Copy` and
/// equality is by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Tone {
    /// Unique catalog key (e.g. "7.1", "Violet").
    pub code: &'static str,
    /// Approximate display colour, `#RRGGBB`.
    pub color: &'static str,
    /// Display label.
    pub name: &'static str,
}

impl Tone {
    pub const fn new(code: &'static str, color: &'static str, name: &'static str) -> Self {
        Self { code, color, name }
    }

    /// Display colour as RGB channels.
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        parse_hex(self.color)
    }

    /// `"6 (Rubio Oscuro)"`, the form used in prompts and summaries.
    pub fn label(&self) -> String {
        format!("{} ({})", self.code, self.name)
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code)
    }
}

/// A named group of tones; slice order is display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToneFamily {
    pub name: &'static str,
    pub tones: &'static [Tone],
}

/// Parse `#RRGGBB` or `#RGB` into channels. The leading `#` is required.
pub fn parse_hex(input: &str) -> Option<(u8, u8, u8)> {
    let value = input.trim().strip_prefix('#')?;
    if !value.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match value.len() {
        6 => {
            let channel = |i: usize| u8::from_str_radix(&value[i..i + 2], 16).ok();
            Some((channel(0)?, channel(2)?, channel(4)?))
        }
        3 => {
            let channel = |i: usize| {
                u8::from_str_radix(&value[i..i + 1], 16)
                    .ok()
                    .map(|v| v * 17)
            };
            Some((channel(0)?, channel(1)?, channel(2)?))
        }
        _ => None,
    }
}

/// Share of gray hair, bucketed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum GrayPercentage {
    #[default]
    #[serde(rename = "0%")]
    None,
    #[serde(rename = "1-25%")]
    UpTo25,
    #[serde(rename = "26-50%")]
    UpTo50,
    #[serde(rename = "51-75%")]
    UpTo75,
    #[serde(rename = "76-100%")]
    UpTo100,
}

impl GrayPercentage {
    pub const ALL: [GrayPercentage; 5] = [
        GrayPercentage::None,
        GrayPercentage::UpTo25,
        GrayPercentage::UpTo50,
        GrayPercentage::UpTo75,
        GrayPercentage::UpTo100,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            GrayPercentage::None => "0%",
            GrayPercentage::UpTo25 => "1-25%",
            GrayPercentage::UpTo50 => "26-50%",
            GrayPercentage::UpTo75 => "51-75%",
            GrayPercentage::UpTo100 => "76-100%",
        }
    }

    /// Next bucket, wrapping around. Used by selector widgets.
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|g| *g == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl FromStr for GrayPercentage {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|g| g.label() == s || g.label().trim_end_matches('%') == s)
            .ok_or_else(|| ValidationError::InvalidOption {
                kind: "gray percentage",
                value: s.to_string(),
            })
    }
}

impl std::fmt::Display for GrayPercentage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Condition of the hair fibre.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum HairCondition {
    #[default]
    #[serde(rename = "Sano")]
    Healthy,
    #[serde(rename = "Poroso")]
    Porous,
    #[serde(rename = "Decolorado")]
    Bleached,
    #[serde(rename = "Dañado")]
    Damaged,
}

impl HairCondition {
    pub const ALL: [HairCondition; 4] = [
        HairCondition::Healthy,
        HairCondition::Porous,
        HairCondition::Bleached,
        HairCondition::Damaged,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            HairCondition::Healthy => "Sano",
            HairCondition::Porous => "Poroso",
            HairCondition::Bleached => "Decolorado",
            HairCondition::Damaged => "Dañado",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl FromStr for HairCondition {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let wanted = s.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| {
                c.label().to_lowercase() == wanted
                    || (wanted == "danado" && *c == HairCondition::Damaged)
            })
            .ok_or_else(|| ValidationError::InvalidOption {
                kind: "hair condition",
                value: s.to_string(),
            })
    }
}

impl std::fmt::Display for HairCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_long_and_short() {
        assert_eq!(parse_hex("#D2A877"), Some((0xD2, 0xA8, 0x77)));
        assert_eq!(parse_hex("#fff"), Some((255, 255, 255)));
        assert_eq!(parse_hex(" #100F0F "), Some((0x10, 0x0F, 0x0F)));
    }

    #[test]
    fn test_parse_hex_rejects_garbage() {
        assert_eq!(parse_hex("D2A877"), None);
        assert_eq!(parse_hex("#D2A87"), None);
        assert_eq!(parse_hex("#GGGGGG"), None);
        assert_eq!(parse_hex("#ÀÀÀ"), None);
        assert_eq!(parse_hex(""), None);
    }

    #[test]
    fn test_gray_percentage_labels_parse_back() {
        for gray in GrayPercentage::ALL {
            assert_eq!(gray.label().parse::<GrayPercentage>(), Ok(gray));
        }
        assert_eq!("0".parse::<GrayPercentage>(), Ok(GrayPercentage::None));
        assert!("40%".parse::<GrayPercentage>().is_err());
    }

    #[test]
    fn test_hair_condition_parse() {
        assert_eq!("poroso".parse::<HairCondition>(), Ok(HairCondition::Porous));
        assert_eq!("Dañado".parse::<HairCondition>(), Ok(HairCondition::Damaged));
        assert_eq!("danado".parse::<HairCondition>(), Ok(HairCondition::Damaged));
        assert_eq!("DAÑADO".parse::<HairCondition>(), Ok(HairCondition::Damaged));
        assert_eq!(" SANO ".parse::<HairCondition>(), Ok(HairCondition::Healthy));
        assert!("Graso".parse::<HairCondition>().is_err());
    }

    #[test]
    fn test_next_wraps() {
        assert_eq!(GrayPercentage::UpTo100.next(), GrayPercentage::None);
        assert_eq!(HairCondition::Damaged.next(), HairCondition::Healthy);
    }

    #[test]
    fn test_enums_serialize_as_labels() {
        assert_eq!(serde_json::to_string(&GrayPercentage::UpTo50).unwrap(), "\"26-50%\"");
        assert_eq!(serde_json::to_string(&HairCondition::Damaged).unwrap(), "\"Dañado\"");
    }

    #[test]
    fn test_tone_label() {
        let tone = Tone::new("6", "#5D4233", "Rubio Oscuro");
        assert_eq!(tone.label(), "6 (Rubio Oscuro)");
        assert_eq!(tone.rgb(), Some((0x5D, 0x42, 0x33)));
    }
}
