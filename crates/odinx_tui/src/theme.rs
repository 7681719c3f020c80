//! Lab palette: semantic colour roles for the dark terminal theme.

use ratatui::style::{Color, Modifier, Style};

/// Convert a catalog hex colour; unknown values fall back to `fallback`.
pub fn hex_color(hex: &str, fallback: Color) -> Color {
    match odinx_core::parse_hex(hex) {
        Some((r, g, b)) => Color::Rgb(r, g, b),
        None => fallback,
    }
}

/// Black or white, whichever reads better on `(r, g, b)`.
pub fn contrast_text(rgb: Option<(u8, u8, u8)>) -> Color {
    match rgb {
        Some((r, g, b)) => {
            let luma = 0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32;
            if luma > 140.0 { Color::Black } else { Color::White }
        }
        None => Color::White,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LabPalette {
    pub background: Color,
    pub surface: Color,
    pub border: Color,
    pub border_focused: Color,
    pub text: Color,
    pub text_muted: Color,
    pub accent: Color,
    pub danger: Color,
    pub success: Color,
    pub warning: Color,
    /// Marker for the current tone (cyan ring in the web palette)
    pub role_current: Color,
    /// Marker for the desired tone (amber ring)
    pub role_desired: Color,
    /// Tone that is both current and desired (pink ring)
    pub role_both: Color,
}

impl LabPalette {
    pub fn dark() -> Self {
        Self {
            background: Color::Rgb(17, 24, 39),
            surface: Color::Rgb(31, 41, 55),
            border: Color::Rgb(75, 85, 99),
            border_focused: Color::Rgb(139, 92, 246),
            text: Color::Rgb(229, 231, 235),
            text_muted: Color::Rgb(156, 163, 175),
            accent: Color::Rgb(236, 72, 153),
            danger: Color::Rgb(248, 113, 113),
            success: Color::Rgb(52, 211, 153),
            warning: Color::Rgb(251, 191, 36),
            role_current: Color::Rgb(34, 211, 238),
            role_desired: Color::Rgb(251, 191, 36),
            role_both: Color::Rgb(236, 72, 153),
        }
    }

    pub fn text(&self) -> Style {
        Style::default().fg(self.text)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.text_muted)
    }

    pub fn title(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn border(&self, focused: bool) -> Style {
        Style::default().fg(if focused { self.border_focused } else { self.border })
    }
}

impl Default for LabPalette {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color() {
        assert_eq!(hex_color("#5D4233", Color::Reset), Color::Rgb(0x5D, 0x42, 0x33));
        assert_eq!(hex_color("oops", Color::Reset), Color::Reset);
    }

    #[test]
    fn test_contrast_text() {
        assert_eq!(contrast_text(Some((250, 240, 200))), Color::Black);
        assert_eq!(contrast_text(Some((30, 20, 20))), Color::White);
    }
}
