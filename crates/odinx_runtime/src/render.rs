//! Result renderer: pure projection of a [LabResult] into display blocks.

use odinx_core::parse_hex;
use serde::Serialize;

use crate::result::{FormulaResult, LabResult, PlaygroundResult};

/// Colour preview block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Swatch {
    pub hex: String,
    pub rgb: Option<(u8, u8, u8)>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub label: &'static str,
    pub lines: Vec<String>,
}

/// What a surface draws for one result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultView {
    pub title: &'static str,
    pub swatch: Swatch,
    pub description: String,
    pub sections: Vec<Section>,
    /// Advisory notes, e.g. tone codes outside the catalog.
    pub warnings: Vec<String>,
}

pub fn render(result: &LabResult) -> ResultView {
    match result {
        LabResult::Formula(r) => render_formula(r),
        LabResult::Playground(r) => render_playground(r),
    }
}

fn swatch(hex: &str) -> Swatch {
    Swatch {
        hex: hex.to_string(),
        rgb: parse_hex(hex),
    }
}

fn render_formula(result: &FormulaResult) -> ResultView {
    let formula = &result.formula;
    let developer = &formula.developer;

    let tones = formula
        .tones
        .iter()
        .map(|t| format!("{}g {}", format_number(t.grams), t.tone))
        .collect();
    let oxidant = format!(
        "{}g de {}vol (Proporción: {})",
        format_number(developer.oxidant_grams),
        format_number(developer.volume),
        developer.ratio
    );

    let warnings = result
        .unknown_tones()
        .into_iter()
        .map(|code| format!("El tono {code} no figura en el catálogo"))
        .collect();

    ResultView {
        title: "Fórmula Generada y Previsualización",
        swatch: swatch(&result.estimated_result.hex_color),
        description: result.estimated_result.description.clone(),
        sections: vec![
            Section {
                label: "Tonos",
                lines: tones,
            },
            Section {
                label: "Oxidante",
                lines: vec![oxidant],
            },
            Section {
                label: "Tiempo de Exposición",
                lines: vec![formula.processing_time.clone()],
            },
            Section {
                label: "Notas y Guía",
                lines: text_lines(&formula.notes),
            },
        ],
        warnings,
    }
}

fn render_playground(result: &PlaygroundResult) -> ResultView {
    ResultView {
        title: "Análisis del Playground",
        swatch: swatch(&result.estimated_result.hex_color),
        description: result.estimated_result.description.clone(),
        sections: vec![
            Section {
                label: "Reflejo Dominante",
                lines: vec![result.dominant_reflex.clone()],
            },
            Section {
                label: "Tendencia del Fondo",
                lines: text_lines(&result.undertone_movement),
            },
            Section {
                label: "Aviso de Neutralización",
                lines: text_lines(&result.neutralization_warning),
            },
        ],
        warnings: Vec::new(),
    }
}

/// Whole numbers without a fractional part, others as written.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

fn text_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::{parse_formula, parse_playground};

    #[test]
    fn test_render_formula() {
        let result = parse_formula(
            r##"{"estimated_result":{"hex_color":"#B5651D","description":"Cobre dorado"},
                "formula":{"tones":[{"tone":"7.44","grams":30},{"tone":"7.3","grams":10},{"tone":"13.0","grams":2.5}],
                "developer":{"volume":20,"ratio":"1+1.5","oxidant_grams":60},
                "processing_time":"30-45min","notes":"Aplicar en raíces.\nLuego medios y puntas."}}"##,
        )
        .unwrap();
        let view = render(&LabResult::Formula(result));

        assert_eq!(view.swatch.rgb, Some((0xB5, 0x65, 0x1D)));
        assert_eq!(view.description, "Cobre dorado");
        let labels: Vec<_> = view.sections.iter().map(|s| s.label).collect();
        assert_eq!(labels, ["Tonos", "Oxidante", "Tiempo de Exposición", "Notas y Guía"]);
        assert_eq!(view.sections[0].lines, ["30g 7.44", "10g 7.3", "2.5g 13.0"]);
        assert_eq!(view.sections[1].lines, ["60g de 20vol (Proporción: 1+1.5)"]);
        assert_eq!(view.sections[3].lines.len(), 2);
        assert_eq!(view.warnings.len(), 1);
        assert!(view.warnings[0].contains("13.0"));
    }

    #[test]
    fn test_render_playground() {
        let result = parse_playground(
            r##"{"estimated_result":{"hex_color":"#abc","description":"Ceniza suave"},
                "dominant_reflex":".1 Ceniza","undertone_movement":"Enfría el fondo",
                "neutralization_warning":"Neutraliza el amarillo"}"##,
        )
        .unwrap();
        let view = render(&LabResult::Playground(result));
        assert_eq!(view.swatch.rgb, Some((0xAA, 0xBB, 0xCC)));
        let labels: Vec<_> = view.sections.iter().map(|s| s.label).collect();
        assert_eq!(
            labels,
            ["Reflejo Dominante", "Tendencia del Fondo", "Aviso de Neutralización"]
        );
        assert!(view.warnings.is_empty());
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(40.0), "40");
        assert_eq!(format_number(63.75), "63.75");
        assert_eq!(format_number(0.0), "0");
    }
}
