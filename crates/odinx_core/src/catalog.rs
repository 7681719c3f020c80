//! Static CAV Professional tone catalog.
//!
//! Read-only. Families and tones are listed in display order; tone codes are
//! unique across the whole catalog.

use crate::error::ValidationError;
use crate::tone::{Tone, ToneFamily};

const NATURALES: &[Tone] = &[
    Tone::new("1", "#100F0F", "Negro"),
    Tone::new("3", "#2D221E", "Castaño Oscuro"),
    Tone::new("4", "#3E2A21", "Castaño"),
    Tone::new("5", "#4C3528", "Castaño Claro"),
    Tone::new("6", "#5D4233", "Rubio Oscuro"),
    Tone::new("7", "#7E5B43", "Rubio"),
    Tone::new("8", "#A37F5B", "Rubio Claro"),
    Tone::new("9", "#D2A877", "Rubio Muy Claro"),
    Tone::new("10", "#E8C395", "Rubio Extra Claro"),
    Tone::new("11.0", "#F0D4AA", "Super Aclarante Natural"),
];

const CENIZAS: &[Tone] = &[
    Tone::new("11.1", "#E2D0B9", "Super Aclarante Ceniza"),
    Tone::new("11.2", "#E3CDBE", "Super Aclarante Irisado"),
    Tone::new("10.1", "#D9C5B0", "Rubio Extra Claro Ceniza"),
    Tone::new("9.1", "#C1AB95", "Rubio Muy Claro Ceniza"),
    Tone::new("9.21", "#BFAFB0", "Rubio Muy Claro Irisado Ceniza"),
    Tone::new("9.2", "#C0AAB1", "Rubio Muy Claro Irisado"),
    Tone::new("8.1", "#A99480", "Rubio Claro Ceniza"),
    Tone::new("8.21", "#A49697", "Rubio Claro Irisado Ceniza"),
    Tone::new("7.1", "#907D6B", "Rubio Ceniza"),
    Tone::new("7.21", "#8F7F81", "Rubio Irisado Ceniza"),
    Tone::new("7.2", "#8C7781", "Rubio Irisado"),
    Tone::new("6.1", "#746253", "Rubio Oscuro Ceniza"),
    Tone::new("5.1", "#5A4A40", "Castaño Claro Ceniza"),
    Tone::new("5.22", "#5A3F50", "Violeta Indigo"),
];

const DORADOS: &[Tone] = &[
    Tone::new("9.3", "#DCC389", "Rubio Muy Claro Dorado"),
    Tone::new("8.3", "#C9A96B", "Rubio Claro Dorado"),
    Tone::new("7.3", "#B79553", "Rubio Dorado"),
    Tone::new("7.34", "#B68B57", "Rubio Dorado Cobrizo"),
    Tone::new("6.3", "#9F7C45", "Rubio Oscuro Dorado"),
    Tone::new("6.34", "#9A7045", "Rubio Oscuro Dorado Cobrizo"),
    Tone::new("5.3", "#755836", "Castaño Claro Dorado"),
];

const COBRIZOS: &[Tone] = &[
    Tone::new("7.44", "#D98347", "Rubio Cobrizo Intenso"),
    Tone::new("7.43", "#C88752", "Rubio Cobrizo Dorado"),
    Tone::new("6.46", "#B96147", "Rubio Oscuro Cobrizo Rojizo"),
    Tone::new("6.43", "#B57E52", "Rubio Oscuro Cobrizo Dorado"),
    Tone::new("5.4", "#935639", "Castaño Claro Cobrizo"),
];

const ROJIZOS: &[Tone] = &[
    Tone::new("7.62", "#A95260", "Rojo Borgoña"),
    Tone::new("6.60", "#B0413D", "Rojo Intenso"),
    Tone::new("5.62", "#793B4A", "Rojo Borgoña Oscuro"),
    Tone::new("5.6", "#96413C", "Rojo Caoba"),
    Tone::new("5.46", "#A04D41", "Rojo Cobrizo"),
    Tone::new("4.5", "#5E343A", "Caoba"),
];

const MOKA: &[Tone] = &[
    Tone::new("8.31", "#B09A7F", "Beige"),
    Tone::new("8.23", "#A99480", "Marron Nacarado"),
    Tone::new("7.7", "#7D695A", "Natural Profundo"),
    Tone::new("7.17", "#817163", "Natural Profundo"),
    Tone::new("6.7", "#68564A", "Natural Profundo"),
    Tone::new("6.5", "#664A45", "Marrón"),
    Tone::new("6.21", "#706461", "Ceniza Profundo"),
    Tone::new("6.17", "#6A5C51", "Natural Profundo"),
    Tone::new("5.7", "#56473E", "Natural Profundo"),
];

const ESPECIALES: &[Tone] = &[
    Tone::new("Red", "#E53E3E", "Rojo"),
    Tone::new("Blue", "#3B82F6", "Azul"),
    Tone::new("Yellow", "#FBBF24", "Amarillo"),
    Tone::new("Violet", "#8B5CF6", "Violeta"),
    Tone::new("Perla", "#CAD1D8", "Perla"),
];

static FAMILIES: [ToneFamily; 7] = [
    ToneFamily { name: "NATURALES", tones: NATURALES },
    ToneFamily { name: "CENIZAS / IRISADOS", tones: CENIZAS },
    ToneFamily { name: "DORADOS", tones: DORADOS },
    ToneFamily { name: "COBRIZOS", tones: COBRIZOS },
    ToneFamily { name: "ROJIZOS", tones: ROJIZOS },
    ToneFamily { name: "MOKA / MARRONES", tones: MOKA },
    ToneFamily { name: "ESPECIALES / CORRECTORES", tones: ESPECIALES },
];

/// All families in display order.
pub fn families() -> &'static [ToneFamily] {
    &FAMILIES
}

/// All tones in display order.
pub fn tones() -> impl Iterator<Item = &'static Tone> {
    FAMILIES.iter().flat_map(|family| family.tones.iter())
}

/// Exact code lookup.
pub fn find(code: &str) -> Option<&'static Tone> {
    let code = code.trim();
    tones().find(|tone| tone.code == code)
}

/// Like [find] but as a validation step.
pub fn lookup(code: &str) -> Result<Tone, ValidationError> {
    find(code)
        .copied()
        .ok_or_else(|| ValidationError::UnknownTone(code.trim().to_string()))
}

pub fn contains(code: &str) -> bool {
    find(code).is_some()
}

/// Family lookup by name, case-insensitive.
pub fn family(name: &str) -> Option<&'static ToneFamily> {
    let name = name.trim();
    FAMILIES.iter().find(|f| f.name.eq_ignore_ascii_case(name))
}

/// Family that owns `code`.
pub fn family_of(code: &str) -> Option<&'static ToneFamily> {
    FAMILIES
        .iter()
        .find(|f| f.tones.iter().any(|t| t.code == code))
}

/// Enumerated code whitelist, one line per family:
/// `- NATURALES: 1, 3, 4, ...`
pub fn whitelist() -> String {
    FAMILIES
        .iter()
        .map(|family| {
            let codes: Vec<&str> = family.tones.iter().map(|t| t.code).collect();
            format!("- {}: {}", family.name, codes.join(", "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_codes_are_unique() {
        let mut seen = HashSet::new();
        for tone in tones() {
            assert!(seen.insert(tone.code), "duplicate tone code {}", tone.code);
        }
        assert_eq!(seen.len(), 56);
    }

    #[test]
    fn test_every_color_is_valid_hex() {
        for tone in tones() {
            assert!(tone.rgb().is_some(), "bad colour for {}", tone.code);
        }
    }

    #[test]
    fn test_family_order() {
        let names: Vec<_> = families().iter().map(|f| f.name).collect();
        assert_eq!(names.first(), Some(&"NATURALES"));
        assert_eq!(names.last(), Some(&"ESPECIALES / CORRECTORES"));
        assert_eq!(names.len(), 7);
    }

    #[test]
    fn test_find_and_lookup() {
        assert_eq!(find("9.3").map(|t| t.name), Some("Rubio Muy Claro Dorado"));
        assert_eq!(find(" 6 ").map(|t| t.color), Some("#5D4233"));
        assert!(find("12.9").is_none());
        assert_eq!(
            lookup("12.9"),
            Err(ValidationError::UnknownTone("12.9".to_string()))
        );
        assert!(contains("Violet"));
    }

    #[test]
    fn test_family_lookups() {
        assert_eq!(family("dorados").map(|f| f.tones.len()), Some(7));
        assert_eq!(family_of("4.5").map(|f| f.name), Some("ROJIZOS"));
        assert!(family_of("nope").is_none());
    }

    #[test]
    fn test_whitelist_lists_every_code() {
        let list = whitelist();
        assert!(list.starts_with("- NATURALES: 1, 3, 4, 5, 6, 7, 8, 9, 10, 11.0"));
        assert!(list.contains("- ESPECIALES / CORRECTORES: Red, Blue, Yellow, Violet, Perla"));
        assert_eq!(list.lines().count(), families().len());
    }
}
