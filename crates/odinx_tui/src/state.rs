//! TUI state: the [Lab], palette cursor, mix list cursor, status and log lines.
//!
//! Key handling in [crate::run] calls the methods here; nothing in this module
//! touches the terminal, so the interaction rules are unit-testable.

use std::time::Instant;

use odinx_core::{Mode, Tone, ToneSlot, catalog};
use odinx_runtime::{Lab, LabError, LabInput, LabResult, Ticket};

use crate::theme::LabPalette;

/// Which screen is shown (lab vs log lines).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Main,
    DebugTraces,
}

/// Which playground list arrow keys move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Palette,
    Mix,
}

/// Tones per palette row.
pub const PALETTE_COLUMNS: usize = 6;
const MAX_TRACE_LINES: usize = 2000;
const GRAMS_STEP: i64 = 5;

#[derive(Debug)]
pub struct TuiState {
    pub lab: Lab,
    /// Catalog tones in display order.
    pub tones: Vec<Tone>,
    /// Index into `tones`.
    pub cursor: usize,
    pub focus: Focus,
    /// Index into the mix list.
    pub mix_cursor: usize,
    /// Digits typed while editing the selected entry's grams.
    pub grams_edit: Option<String>,
    pub palette: LabPalette,
    /// "gemini · gemini-2.5-pro"
    pub provider_label: String,
    pub status: String,
    pub status_is_error: bool,
    pub status_set_at: Option<Instant>,
    pub screen: Screen,
    /// Log lines, newest at end.
    pub trace_lines: Vec<String>,
    /// Lines scrolled up from the bottom of the log screen.
    pub trace_scroll: usize,
    pub needs_redraw: bool,
    pub frame_count: u64,
}

impl TuiState {
    pub fn new(provider_label: impl Into<String>) -> Self {
        Self {
            lab: Lab::new(),
            tones: catalog::tones().copied().collect(),
            cursor: 0,
            focus: Focus::Palette,
            mix_cursor: 0,
            grams_edit: None,
            palette: LabPalette::dark(),
            provider_label: provider_label.into(),
            status: String::new(),
            status_is_error: false,
            status_set_at: None,
            screen: Screen::Main,
            trace_lines: Vec::new(),
            trace_scroll: 0,
            needs_redraw: true,
            frame_count: 0,
        }
    }

    pub fn mode(&self) -> Mode {
        self.lab.mode()
    }

    pub fn cursor_tone(&self) -> Tone {
        self.tones[self.cursor.min(self.tones.len() - 1)]
    }

    pub fn set_status(&mut self, text: impl Into<String>, is_error: bool) {
        self.status = text.into();
        self.status_is_error = is_error;
        self.status_set_at = Some(Instant::now());
        self.needs_redraw = true;
    }

    pub fn clear_status(&mut self) {
        self.status.clear();
        self.status_is_error = false;
        self.status_set_at = None;
        self.needs_redraw = true;
    }

    // ── Cursor movement ────────────────────────────────────────────

    /// Move the palette cursor, clamped to the catalog.
    pub fn move_cursor(&mut self, delta: isize) {
        let last = self.tones.len().saturating_sub(1) as isize;
        self.cursor = (self.cursor as isize + delta).clamp(0, last) as usize;
        self.needs_redraw = true;
    }

    pub fn move_up(&mut self) {
        match self.focus {
            Focus::Palette => self.move_cursor(-(PALETTE_COLUMNS as isize)),
            Focus::Mix => self.move_mix_cursor(-1),
        }
    }

    pub fn move_down(&mut self) {
        match self.focus {
            Focus::Palette => self.move_cursor(PALETTE_COLUMNS as isize),
            Focus::Mix => self.move_mix_cursor(1),
        }
    }

    fn move_mix_cursor(&mut self, delta: isize) {
        let len = self.lab.mixing().mix().len();
        if len == 0 {
            self.mix_cursor = 0;
        } else {
            self.mix_cursor = (self.mix_cursor as isize + delta).clamp(0, len as isize - 1) as usize;
        }
        self.needs_redraw = true;
    }

    /// Switch arrow keys between palette and mix list (playground only).
    pub fn toggle_focus(&mut self) {
        if self.mode() != Mode::Playground {
            return;
        }
        self.focus = match self.focus {
            Focus::Palette => Focus::Mix,
            Focus::Mix => Focus::Palette,
        };
        self.move_mix_cursor(0);
    }

    // ── Formula / playground edits ─────────────────────────────────

    /// Enter on the palette: pick a tone (formula) or add it to the bowl (playground).
    pub fn activate_cursor(&mut self) {
        let tone = self.cursor_tone();
        match self.mode() {
            Mode::Formula => {
                let slot = self.lab.selection_mut().select_tone(tone);
                let label = match slot {
                    ToneSlot::Current => "Cabello actual",
                    ToneSlot::Desired => "Cabello deseado",
                };
                self.set_status(format!("{label}: {}", tone.label()), false);
            }
            Mode::Playground => {
                if self.lab.mixing_mut().add_to_mix(tone) {
                    self.mix_cursor = self.lab.mixing().mix().len() - 1;
                    self.set_status(format!("Añadido {}", tone.label()), false);
                } else {
                    self.set_status(format!("{} ya está en la mezcla", tone.code), false);
                }
            }
        }
    }

    pub fn set_base_from_cursor(&mut self) {
        if self.mode() != Mode::Playground {
            return;
        }
        let tone = self.cursor_tone();
        self.lab.mixing_mut().set_base(tone);
        self.set_status(format!("Color base: {}", tone.label()), false);
    }

    pub fn remove_base(&mut self) {
        if self.mode() == Mode::Playground && self.lab.mixing().base().is_some() {
            self.lab.mixing_mut().remove_base();
            self.set_status("Color base quitado", false);
        }
    }

    pub fn cycle_gray(&mut self) {
        let next = self.lab.selection().gray_percentage().next();
        self.lab.selection_mut().set_gray_percentage(next);
        self.needs_redraw = true;
    }

    pub fn cycle_condition(&mut self) {
        let next = self.lab.selection().hair_condition().next();
        self.lab.selection_mut().set_hair_condition(next);
        self.needs_redraw = true;
    }

    /// Formula: drop both tones. Playground: "Limpiar Todo".
    pub fn clear(&mut self) {
        match self.mode() {
            Mode::Formula => self.lab.selection_mut().clear(),
            Mode::Playground => {
                if !self.lab.mixing().can_clear() {
                    return;
                }
                self.lab.mixing_mut().clear();
                self.mix_cursor = 0;
                self.grams_edit = None;
            }
        }
        self.set_status("Selección borrada", false);
    }

    fn selected_mix_code(&self) -> Option<&'static str> {
        self.lab
            .mixing()
            .mix()
            .get(self.mix_cursor)
            .map(|entry| entry.tone.code)
    }

    /// Step the selected entry's grams, never below zero.
    pub fn adjust_grams(&mut self, steps: i64) {
        let Some(code) = self.selected_mix_code() else {
            return;
        };
        let current = self.lab.mixing().grams_of(code).unwrap_or(0) as i64;
        let next = (current + steps * GRAMS_STEP).clamp(0, u32::MAX as i64) as u32;
        self.lab.mixing_mut().update_grams(code, next);
        self.needs_redraw = true;
    }

    pub fn remove_selected_mix(&mut self) {
        let Some(code) = self.selected_mix_code() else {
            return;
        };
        self.lab.mixing_mut().remove_from_mix(code);
        self.move_mix_cursor(0);
        if self.lab.mixing().mix().is_empty() {
            self.focus = Focus::Palette;
        }
        self.set_status(format!("Quitado {code}"), false);
    }

    pub fn begin_grams_edit(&mut self) {
        if let Some(code) = self.selected_mix_code() {
            let grams = self.lab.mixing().grams_of(code).unwrap_or(0);
            self.grams_edit = Some(grams.to_string());
            self.needs_redraw = true;
        }
    }

    pub fn grams_edit_push(&mut self, c: char) {
        if let Some(buf) = &mut self.grams_edit {
            buf.push(c);
            self.needs_redraw = true;
        }
    }

    pub fn grams_edit_backspace(&mut self) {
        if let Some(buf) = &mut self.grams_edit {
            buf.pop();
            self.needs_redraw = true;
        }
    }

    /// Apply the typed text the way the web number input does (non-numeric → 0).
    pub fn commit_grams_edit(&mut self) {
        let Some(buf) = self.grams_edit.take() else {
            return;
        };
        if let Some(code) = self.selected_mix_code() {
            self.lab.mixing_mut().update_grams_input(code, &buf);
        }
        self.needs_redraw = true;
    }

    pub fn cancel_grams_edit(&mut self) {
        self.grams_edit = None;
        self.needs_redraw = true;
    }

    // ── Lifecycle ──────────────────────────────────────────────────

    pub fn toggle_mode(&mut self) {
        match self.lab.toggle_mode() {
            Ok(mode) => {
                self.focus = Focus::Palette;
                self.mix_cursor = 0;
                self.grams_edit = None;
                self.set_status(format!("Modo: {}", mode.title()), false);
            }
            Err(err) => {
                let message = err.user_message(self.mode());
                self.set_status(message, true);
            }
        }
    }

    /// Start a request for the active mode. `None` when validation or the
    /// pending guard refused it; the reason is in the status line.
    pub fn submit(&mut self) -> Option<Ticket<LabInput>> {
        match self.lab.begin() {
            Ok(ticket) => {
                let text = match ticket.mode() {
                    Mode::Formula => "Generando fórmula…",
                    Mode::Playground => "Analizando mezcla…",
                };
                self.set_status(text, false);
                Some(ticket)
            }
            Err(err) => {
                let message = err.user_message(self.mode());
                self.set_status(message, true);
                None
            }
        }
    }

    /// Apply a finished request.
    pub fn finish(&mut self, ticket: Ticket<LabInput>, result: Result<LabResult, LabError>) {
        match self.lab.finish(ticket, result) {
            Ok(_) => self.set_status("Listo", false),
            Err(err) => {
                let message = err.user_message(self.mode());
                self.set_status(message, true);
            }
        }
    }

    // ── Log screen ─────────────────────────────────────────────────

    pub fn push_trace_line(&mut self, line: String) {
        self.trace_lines.push(line);
        if self.trace_lines.len() > MAX_TRACE_LINES {
            self.trace_lines.drain(0..self.trace_lines.len() - MAX_TRACE_LINES);
        }
        self.needs_redraw = true;
    }

    pub fn trace_scroll_up(&mut self, delta: usize) {
        self.trace_scroll = self.trace_scroll.saturating_add(delta);
        self.needs_redraw = true;
    }

    pub fn trace_scroll_down(&mut self, delta: usize) {
        self.trace_scroll = self.trace_scroll.saturating_sub(delta);
        self.needs_redraw = true;
    }

    pub fn toggle_screen(&mut self) {
        self.screen = match self.screen {
            Screen::Main => Screen::DebugTraces,
            Screen::DebugTraces => Screen::Main,
        };
        self.needs_redraw = true;
    }
}

#[cfg(test)]
mod tests {
    use odinx_core::{GrayPercentage, HairCondition, ToneRole};
    use odinx_runtime::{EstimatedResult, Outcome, PlaygroundResult};

    use super::*;

    fn cursor_to(state: &mut TuiState, code: &str) {
        state.cursor = state.tones.iter().position(|t| t.code == code).unwrap();
    }

    #[test]
    fn test_cursor_is_clamped() {
        let mut state = TuiState::new("test");
        state.move_up();
        assert_eq!(state.cursor, 0);
        state.move_cursor(10_000);
        assert_eq!(state.cursor, state.tones.len() - 1);
        state.move_down();
        assert_eq!(state.cursor, state.tones.len() - 1);
    }

    #[test]
    fn test_formula_clicks_fill_current_then_desired() {
        let mut state = TuiState::new("test");
        cursor_to(&mut state, "6");
        state.activate_cursor();
        cursor_to(&mut state, "9.3");
        state.activate_cursor();
        assert_eq!(state.lab.selection().role_of("6"), ToneRole::Current);
        assert_eq!(state.lab.selection().role_of("9.3"), ToneRole::Desired);
        assert!(state.lab.can_submit());

        state.cycle_gray();
        state.cycle_condition();
        assert_eq!(state.lab.selection().gray_percentage(), GrayPercentage::UpTo25);
        assert_eq!(state.lab.selection().hair_condition(), HairCondition::Porous);

        state.clear();
        assert!(!state.lab.can_submit());
    }

    #[test]
    fn test_playground_bowl_editing() {
        let mut state = TuiState::new("test");
        state.toggle_mode();
        assert_eq!(state.mode(), Mode::Playground);

        cursor_to(&mut state, "6");
        state.set_base_from_cursor();
        cursor_to(&mut state, "7.1");
        state.activate_cursor();
        state.activate_cursor();
        cursor_to(&mut state, "9.3");
        state.activate_cursor();
        assert_eq!(state.lab.mixing().mix().len(), 2);
        assert_eq!(state.mix_cursor, 1);

        state.adjust_grams(3);
        assert_eq!(state.lab.mixing().grams_of("9.3"), Some(45));
        state.adjust_grams(-100);
        assert_eq!(state.lab.mixing().grams_of("9.3"), Some(0));

        state.begin_grams_edit();
        state.grams_edit_backspace();
        for c in "12x".chars() {
            state.grams_edit_push(c);
        }
        state.commit_grams_edit();
        assert_eq!(state.lab.mixing().grams_of("9.3"), Some(12));

        state.toggle_focus();
        state.move_up();
        state.remove_selected_mix();
        assert_eq!(state.lab.mixing().mix_string(), "12g de 9.3");
        assert_eq!(state.mix_cursor, 0);
    }

    #[test]
    fn test_mode_toggle_empties_bowl_and_cursor() {
        let mut state = TuiState::new("test");
        cursor_to(&mut state, "6");
        state.activate_cursor();
        state.toggle_mode();
        assert_eq!(state.lab.selection().role_of("6"), ToneRole::None);

        state.set_base_from_cursor();
        cursor_to(&mut state, "7.1");
        state.activate_cursor();
        cursor_to(&mut state, "9.3");
        state.activate_cursor();
        state.toggle_focus();
        assert_eq!(state.mix_cursor, 1);

        state.toggle_mode();
        state.toggle_mode();
        assert_eq!(state.mode(), Mode::Playground);
        assert_eq!(state.focus, Focus::Palette);
        assert_eq!(state.mix_cursor, 0);
        assert!(state.lab.mixing().mix().is_empty());
        assert!(state.lab.mixing().base().is_none());
    }

    #[test]
    fn test_submit_refused_without_base() {
        let mut state = TuiState::new("test");
        state.toggle_mode();
        cursor_to(&mut state, "7.1");
        state.activate_cursor();
        assert!(state.submit().is_none());
        assert!(state.status_is_error);
        assert!(state.status.contains("color base"));
        assert!(!state.lab.is_pending());
    }

    #[test]
    fn test_mode_toggle_refused_while_pending() {
        let mut state = TuiState::new("test");
        state.toggle_mode();
        cursor_to(&mut state, "6");
        state.set_base_from_cursor();
        state.activate_cursor();

        let ticket = state.submit().unwrap();
        state.toggle_mode();
        assert_eq!(state.mode(), Mode::Playground);
        assert!(state.status_is_error);

        let result = LabResult::Playground(PlaygroundResult {
            estimated_result: EstimatedResult {
                hex_color: "#5D4233".to_string(),
                description: "Sin cambios".to_string(),
            },
            dominant_reflex: "Natural".to_string(),
            undertone_movement: "Ninguno".to_string(),
            neutralization_warning: "Ninguno".to_string(),
        });
        state.finish(ticket, Ok(result));
        assert!(matches!(state.lab.outcome(), Outcome::Ready(_)));

        state.toggle_mode();
        assert_eq!(state.mode(), Mode::Formula);
        assert_eq!(state.lab.outcome(), &Outcome::Idle);
    }

    #[test]
    fn test_trace_lines_are_capped() {
        let mut state = TuiState::new("test");
        for i in 0..(MAX_TRACE_LINES + 10) {
            state.push_trace_line(format!("line {i}"));
        }
        assert_eq!(state.trace_lines.len(), MAX_TRACE_LINES);
        assert_eq!(state.trace_lines[0], "line 10");
    }
}
