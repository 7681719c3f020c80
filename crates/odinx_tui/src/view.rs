//! TUI view: header (fixed top), palette grid and lab panels, shortcut line (fixed bottom).

use odinx_core::constants::DISPLAY_NAME;
use odinx_core::{Mode, Tone, ToneRole, catalog};
use odinx_runtime::{LabFailure, Outcome, ResultView, render};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::state::{Focus, PALETTE_COLUMNS, Screen, TuiState};
use crate::theme::{LabPalette, contrast_text, hex_color};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
/// Code column width inside a palette cell.
const CELL_WIDTH: usize = 7;

/// Draw the full TUI: lab or log lines depending on `state.screen`.
pub fn draw(frame: &mut Frame, state: &mut TuiState, area: Rect) {
    match state.screen {
        Screen::DebugTraces => draw_debug_traces(frame, state, area),
        Screen::Main => draw_main(frame, state, area),
    }
}

/// Log screen: scrollable tracing output. Ctrl+D to close.
fn draw_debug_traces(frame: &mut Frame, state: &mut TuiState, area: Rect) {
    let palette = &state.palette;
    let block = Block::default()
        .title(" Registro (Ctrl+D para cerrar) ")
        .borders(Borders::ALL)
        .border_style(palette.border(false))
        .style(Style::default().bg(palette.background));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let viewport = inner.height as usize;
    let max_scroll = state.trace_lines.len().saturating_sub(viewport);
    state.trace_scroll = state.trace_scroll.min(max_scroll);
    let start = max_scroll - state.trace_scroll;

    let lines: Vec<Line> = state
        .trace_lines
        .iter()
        .skip(start)
        .take(viewport)
        .map(|s| Line::from(Span::styled(s.clone(), palette.muted())))
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

fn draw_main(frame: &mut Frame, state: &mut TuiState, area: Rect) {
    frame.render_widget(Block::default().style(Style::default().bg(state.palette.background)), area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(6), Constraint::Length(1)])
        .split(area);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(52), Constraint::Percentage(48)])
        .split(rows[1]);
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(input_panel_height(state)), Constraint::Min(4)])
        .split(columns[1]);

    draw_header(frame, state, rows[0]);
    draw_palette(frame, state, columns[0]);
    match state.mode() {
        Mode::Formula => draw_formula_panel(frame, state, right[0]),
        Mode::Playground => draw_mix_panel(frame, state, right[0]),
    }
    draw_outcome(frame, state, right[1]);
    frame.render_widget(Paragraph::new(shortcut_line(state)), rows[2]);
}

/// Title left, then a coloured dot with the status (or provider) right-aligned.
pub fn header_line(state: &TuiState, width: u16) -> Line<'static> {
    let palette = &state.palette;
    let title = format!("{DISPLAY_NAME} · {}", state.mode().title());
    let (dot, right) = if state.lab.is_pending() {
        let frame = SPINNER[(state.frame_count as usize / 2) % SPINNER.len()];
        let text = if state.status.is_empty() { "Procesando…" } else { state.status.as_str() };
        (Span::styled(format!("{frame} "), Style::default().fg(palette.warning)), text.to_string())
    } else if state.status_is_error {
        (Span::styled("● ", Style::default().fg(palette.danger)), state.status.clone())
    } else if !state.status.is_empty() {
        (Span::styled("● ", Style::default().fg(palette.success)), state.status.clone())
    } else {
        (Span::styled("● ", Style::default().fg(palette.success)), state.provider_label.clone())
    };
    let used = title.chars().count() + 2 + right.chars().count();
    let gap = (width as usize).saturating_sub(used).max(1);
    Line::from(vec![
        Span::styled(title, palette.text().add_modifier(Modifier::BOLD)),
        Span::raw(" ".repeat(gap)),
        dot,
        Span::styled(right, palette.muted()),
    ])
}

fn draw_header(frame: &mut Frame, state: &TuiState, area: Rect) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(state.palette.border(false))
        .style(Style::default().bg(state.palette.surface));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(Paragraph::new(header_line(state, inner.width)), inner);
}

fn role_color(palette: &LabPalette, role: ToneRole) -> Option<ratatui::style::Color> {
    match role {
        ToneRole::None => None,
        ToneRole::Current => Some(palette.role_current),
        ToneRole::Desired => Some(palette.role_desired),
        ToneRole::Both => Some(palette.role_both),
    }
}

/// Marker for a palette cell: formula roles, or bowl membership in the playground.
fn cell_marker(state: &TuiState, tone: &Tone) -> Span<'static> {
    let palette = &state.palette;
    match state.mode() {
        Mode::Formula => match role_color(palette, state.lab.selection().role_of(tone.code)) {
            Some(color) => Span::styled("●", Style::default().fg(color)),
            None => Span::raw(" "),
        },
        Mode::Playground => {
            let mixing = state.lab.mixing();
            if mixing.base().is_some_and(|b| b.code == tone.code) {
                Span::styled("◆", Style::default().fg(palette.role_current))
            } else if mixing.grams_of(tone.code).is_some() {
                Span::styled("+", Style::default().fg(palette.accent))
            } else {
                Span::raw(" ")
            }
        }
    }
}

fn palette_cell(state: &TuiState, index: usize, tone: &Tone) -> Vec<Span<'static>> {
    let mut style = Style::default()
        .bg(hex_color(tone.color, state.palette.surface))
        .fg(contrast_text(tone.rgb()));
    if index == state.cursor {
        style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
    }
    let code = if index == state.cursor {
        format!("▸{:<width$}", tone.code, width = CELL_WIDTH - 1)
    } else {
        format!(" {:<width$}", tone.code, width = CELL_WIDTH - 1)
    };
    vec![cell_marker(state, tone), Span::styled(code, style), Span::raw(" ")]
}

fn draw_palette(frame: &mut Frame, state: &TuiState, area: Rect) {
    let palette = &state.palette;
    let tone = state.cursor_tone();
    let family = catalog::family_of(tone.code).map(|f| f.name).unwrap_or("");
    let block = Block::default()
        .title(Span::styled(format!(" Paleta CAV · {family} "), palette.title()))
        .borders(Borders::ALL)
        .border_style(palette.border(state.focus == Focus::Palette));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Last line shows the cursor tone.
    let grid_height = inner.height.saturating_sub(2) as usize;
    let cursor_row = state.cursor / PALETTE_COLUMNS;
    let first_row = cursor_row.saturating_sub(grid_height.saturating_sub(1));

    let mut lines: Vec<Line> = state
        .tones
        .chunks(PALETTE_COLUMNS)
        .enumerate()
        .skip(first_row)
        .take(grid_height)
        .map(|(row, chunk)| {
            let spans = chunk
                .iter()
                .enumerate()
                .flat_map(|(col, t)| palette_cell(state, row * PALETTE_COLUMNS + col, t))
                .collect::<Vec<_>>();
            Line::from(spans)
        })
        .collect();
    lines.push(Line::default());
    lines.push(Line::from(vec![
        Span::styled(
            "      ",
            Style::default().bg(hex_color(tone.color, palette.surface)),
        ),
        Span::styled(format!(" {} {}", tone.label(), tone.color), palette.text()),
    ]));
    frame.render_widget(Paragraph::new(lines), inner);
}

fn input_panel_height(state: &TuiState) -> u16 {
    match state.mode() {
        Mode::Formula => 6,
        Mode::Playground => (state.lab.mixing().mix().len().max(1) as u16 + 6).min(14),
    }
}

fn tone_line(label: &str, tone: Option<Tone>, role: ratatui::style::Color, palette: &LabPalette) -> Line<'static> {
    let mut spans = vec![Span::styled(format!("{label:<18}"), palette.muted())];
    match tone {
        Some(t) => {
            spans.push(Span::styled("● ", Style::default().fg(role)));
            spans.push(Span::styled("   ", Style::default().bg(hex_color(t.color, palette.surface))));
            spans.push(Span::styled(format!(" {}", t.label()), palette.text()));
        }
        None => spans.push(Span::styled("—", palette.muted())),
    }
    Line::from(spans)
}

fn draw_formula_panel(frame: &mut Frame, state: &TuiState, area: Rect) {
    let palette = &state.palette;
    let selection = state.lab.selection();
    let block = Block::default()
        .title(Span::styled(" Selección ", palette.title()))
        .borders(Borders::ALL)
        .border_style(palette.border(false));
    let lines = vec![
        tone_line("Cabello actual", selection.current(), palette.role_current, palette),
        tone_line("Cabello deseado", selection.desired(), palette.role_desired, palette),
        Line::from(vec![
            Span::styled(format!("{:<18}", "Canas (g)"), palette.muted()),
            Span::styled(selection.gray_percentage().label().to_string(), palette.text()),
        ]),
        Line::from(vec![
            Span::styled(format!("{:<18}", "Condición (c)"), palette.muted()),
            Span::styled(selection.hair_condition().label().to_string(), palette.text()),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_mix_panel(frame: &mut Frame, state: &TuiState, area: Rect) {
    let palette = &state.palette;
    let mixing = state.lab.mixing();
    let block = Block::default()
        .title(Span::styled(" Playground ", palette.title()))
        .borders(Borders::ALL)
        .border_style(palette.border(state.focus == Focus::Mix));

    let mut lines: Vec<Line> = vec![Span::styled("1. Color Base del Cliente", palette.text()).into()];
    lines.push(tone_line("   Base", mixing.base(), palette.role_current, palette));
    lines.push(Span::styled("2. Recipiente de Mezcla", palette.text()).into());
    if mixing.mix().is_empty() {
        lines.push(Span::styled("   Arrastra un tono aquí (Enter)", palette.muted()).into());
    }
    for (i, entry) in mixing.mix().iter().enumerate() {
        let selected = state.focus == Focus::Mix && i == state.mix_cursor;
        let grams = match (&state.grams_edit, selected) {
            (Some(buf), true) => format!("{buf}▏g"),
            _ => format!("{}g", entry.grams),
        };
        let style = if selected {
            palette.text().add_modifier(Modifier::REVERSED)
        } else {
            palette.text()
        };
        lines.push(Line::from(vec![
            Span::raw(if selected { " ▸ " } else { "   " }),
            Span::styled("   ", Style::default().bg(hex_color(entry.tone.color, palette.surface))),
            Span::styled(format!(" {:>6} ", grams), style),
            Span::styled(entry.tone.label(), palette.muted()),
        ]));
    }
    lines.push(Span::styled(format!("   Total: {}g", mixing.total_grams()), palette.muted()).into());
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Lines for a rendered result: swatch, description, sections, warnings.
pub fn result_lines(view: &ResultView, palette: &LabPalette) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                "        ",
                Style::default().bg(match view.swatch.rgb {
                    Some((r, g, b)) => ratatui::style::Color::Rgb(r, g, b),
                    None => palette.surface,
                }),
            ),
            Span::styled(format!(" {}", view.swatch.hex), palette.muted()),
        ]),
        Line::from(Span::styled(view.description.clone(), palette.text())),
    ];
    for section in &view.sections {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            section.label.to_string(),
            palette.text().add_modifier(Modifier::BOLD),
        )));
        for l in &section.lines {
            lines.push(Line::from(Span::styled(format!("  {l}"), palette.text())));
        }
    }
    for warning in &view.warnings {
        lines.push(Line::from(Span::styled(
            format!("⚠ {warning}"),
            Style::default().fg(palette.warning),
        )));
    }
    lines
}

fn failure_lines(failure: &LabFailure, palette: &LabPalette) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            failure.message.clone(),
            Style::default().fg(palette.danger).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(Span::styled("Esc para descartar · Ctrl+D para ver el registro", palette.muted())),
    ]
}

fn draw_outcome(frame: &mut Frame, state: &TuiState, area: Rect) {
    let palette = &state.palette;
    let (title, lines) = match state.lab.outcome() {
        Outcome::Idle => {
            let hint = match state.mode() {
                Mode::Formula => "Elige el tono actual y el deseado, luego pulsa s.",
                Mode::Playground => "Fija una base (b), añade tonos (Enter) y pulsa s para analizar.",
            };
            (" Resultado ", vec![Line::from(Span::styled(hint, palette.muted()))])
        }
        Outcome::Pending(mode) => {
            let frame_glyph = SPINNER[(state.frame_count as usize / 2) % SPINNER.len()];
            let text = match mode {
                Mode::Formula => "Generando fórmula…",
                Mode::Playground => "Analizando mezcla…",
            };
            (
                " Resultado ",
                vec![Line::from(Span::styled(
                    format!("{frame_glyph} {text}"),
                    Style::default().fg(palette.warning),
                ))],
            )
        }
        Outcome::Ready(result) => {
            let view = render(result);
            (view.title, result_lines(&view, palette))
        }
        Outcome::Failed(failure) => (" Error ", failure_lines(failure, palette)),
    };
    let block = Block::default()
        .title(Span::styled(format!(" {} ", title.trim()), palette.title()))
        .borders(Borders::ALL)
        .border_style(palette.border(false));
    frame.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), area);
}

/// Footer hints for the active mode.
pub fn shortcut_line(state: &TuiState) -> Line<'static> {
    let hint = if state.grams_edit.is_some() {
        "0-9: gramos  ·  Enter: aplicar  ·  Esc: cancelar"
    } else if state.lab.is_pending() {
        "Esperando respuesta…  ·  Ctrl+D: registro  ·  q: salir"
    } else {
        match (state.mode(), state.focus) {
            (Mode::Formula, _) => {
                "←↑↓→: mover  ·  Enter: elegir  ·  g/c: canas/condición  ·  s: generar  ·  x: limpiar  ·  Tab: playground  ·  q: salir"
            }
            (Mode::Playground, Focus::Palette) => {
                "Enter: añadir  ·  b/r: base  ·  m: mezcla  ·  s: analizar  ·  x: limpiar todo  ·  Tab: fórmula  ·  q: salir"
            }
            (Mode::Playground, Focus::Mix) => {
                "↑↓: tono  ·  +/-: ±5g  ·  e: editar  ·  d: quitar  ·  m: paleta  ·  s: analizar  ·  q: salir"
            }
        }
    };
    Line::from(Span::styled(hint.to_string(), state.palette.muted()))
}
