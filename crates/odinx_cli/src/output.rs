//! Terminal output helpers. Styled text for humans, one JSON object per line for scripts.
//!
//! Uses:
//! - `console` for colors (respects NO_COLOR, auto-disables when piped)
//! - `comfy-table` for tables and colour swatches
//! - `indicatif` for spinners

use std::sync::atomic::{AtomicBool, Ordering};

use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use odinx_runtime::{LabFailure, ResultView, Swatch};
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::cli::OutputFormat;

// ── Global format flag ─────────────────────────────────────────────

static JSON_MODE: AtomicBool = AtomicBool::new(false);

pub fn init(format: OutputFormat) {
    if matches!(format, OutputFormat::Json) {
        JSON_MODE.store(true, Ordering::Relaxed);
    }
}

pub fn is_json() -> bool {
    JSON_MODE.load(Ordering::Relaxed)
}

// ── JSON envelope ──────────────────────────────────────────────────

#[derive(Serialize)]
struct Msg<'a> {
    level: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a JsonValue>,
}

fn emit_json(level: &str, message: &str, data: Option<&JsonValue>) {
    let msg = Msg {
        level,
        message,
        data,
    };
    match serde_json::to_string(&msg) {
        Ok(json) => println!("{json}"),
        Err(_) => println!("{{\"level\":{level:?},\"message\":{message:?}}}"),
    }
}

// ── Public helpers ─────────────────────────────────────────────────

pub fn header(text: &str) {
    if is_json() {
        emit_json("info", text, None);
    } else {
        println!("{}", style(text).bold().cyan());
    }
}

pub fn success(text: &str) {
    if is_json() {
        emit_json("success", text, None);
    } else {
        println!("{} {}", style("✓").green(), style(text).bright());
    }
}

pub fn error(text: &str) {
    if is_json() {
        let msg = Msg {
            level: "error",
            message: text,
            data: None,
        };
        eprintln!("{}", serde_json::to_string(&msg).unwrap_or_default());
    } else {
        eprintln!("{} {}", style("✗").red(), style(text).bright());
    }
}

pub fn warning(text: &str) {
    if is_json() {
        emit_json("warning", text, None);
    } else {
        println!("{} {}", style("!").yellow(), style(text).bright());
    }
}

pub fn dim(text: &str) {
    if is_json() {
        emit_json("info", text, None);
    } else {
        println!("{}", style(text).dim());
    }
}

/// Emit a serializable value. Text mode prints it pretty.
pub fn data<T: Serialize>(label: &str, value: &T) {
    let json_val = serde_json::to_value(value).unwrap_or(JsonValue::Null);
    if is_json() {
        emit_json("data", label, Some(&json_val));
    } else {
        let formatted =
            serde_json::to_string_pretty(&json_val).unwrap_or_else(|_| format!("{label}: <?>"));
        println!("{formatted}");
    }
}

/// Print a key-value pair with styled key.
pub fn kv(key: &str, value: &str) {
    if is_json() {
        let data = serde_json::json!({ key: value });
        emit_json("info", key, Some(&data));
    } else {
        println!("  {} {}", style(key).cyan().bold(), value);
    }
}

/// A titled block of text (prompt previews).
pub fn block(title: &str, body: &str) {
    if is_json() {
        let data = serde_json::json!({ "text": body });
        emit_json("data", title, Some(&data));
    } else {
        println!("{}", style(format!("── {title} ──")).bold().cyan());
        println!("{body}");
        println!();
    }
}

// ── Tables ─────────────────────────────────────────────────────────

pub fn table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn header_cell(text: &str) -> Cell {
    Cell::new(text).fg(Color::Cyan).add_attribute(Attribute::Bold)
}

pub fn table_header(table: &mut Table, columns: &[&str]) {
    table.set_header(columns.iter().map(|c| header_cell(c)).collect::<Vec<_>>());
}

/// A blank cell painted with the given colour; plain hex when it does not parse.
pub fn swatch_cell(hex: &str, rgb: Option<(u8, u8, u8)>) -> Cell {
    match rgb {
        Some((r, g, b)) => Cell::new("      ").bg(Color::Rgb { r, g, b }),
        None => Cell::new(hex),
    }
}

/// Print a table, or the given items as one JSON list.
pub fn table_print<T: Serialize>(table: &Table, items: &[T]) {
    if is_json() {
        let data = serde_json::json!({ "items": items });
        emit_json("list", "", Some(&data));
    } else {
        println!("{table}");
    }
}

// ── Lab results ────────────────────────────────────────────────────

fn swatch_line(swatch: &Swatch) -> String {
    match swatch.rgb {
        Some((r, g, b)) => format!("rgb({r}, {g}, {b})"),
        None => "colour not recognised".to_string(),
    }
}

/// Draw a rendered result: swatch + description, then one row per section.
pub fn render_view(view: &ResultView) {
    if is_json() {
        let data = serde_json::to_value(view).unwrap_or(JsonValue::Null);
        emit_json("result", view.title, Some(&data));
        return;
    }

    header(view.title);
    let mut table = table();
    table.add_row(vec![
        swatch_cell(&view.swatch.hex, view.swatch.rgb),
        Cell::new(format!(
            "{}\n{}",
            view.swatch.hex,
            style(swatch_line(&view.swatch)).dim()
        )),
        Cell::new(&view.description).add_attribute(Attribute::Bold),
    ]);
    for section in &view.sections {
        table.add_row(vec![
            Cell::new(""),
            Cell::new(section.label).fg(Color::Cyan),
            Cell::new(section.lines.join("\n")),
        ]);
    }
    println!("{table}");

    for warning_text in &view.warnings {
        warning(warning_text);
    }
}

/// Error banner for a failed request. `detail` only with `--verbose`.
pub fn failure(failure: &LabFailure, raw: Option<&str>, verbose: bool) {
    if is_json() {
        let mut data = serde_json::to_value(failure).unwrap_or(JsonValue::Null);
        if let (Some(raw), JsonValue::Object(map)) = (raw, &mut data) {
            map.insert("raw".to_string(), JsonValue::String(raw.to_string()));
        }
        let msg = Msg {
            level: "error",
            message: &failure.message,
            data: Some(&data),
        };
        eprintln!("{}", serde_json::to_string(&msg).unwrap_or_default());
        return;
    }
    eprintln!(
        "{} {}",
        style("Error:").red().bold(),
        style(&failure.message).bright()
    );
    if verbose {
        eprintln!("  {}", style(&failure.detail).dim());
        if let Some(raw) = raw {
            eprintln!("  {}", style("respuesta del modelo:").dim());
            eprintln!("{}", style(raw).dim());
        }
    }
}

// ── Spinners ───────────────────────────────────────────────────────

/// Spinner for async operations. Hidden in JSON mode.
pub fn spinner(message: &str) -> ProgressBar {
    if is_json() {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}

pub fn spinner_success(spinner: &ProgressBar, message: &str) {
    spinner.finish_and_clear();
    success(message);
}

pub fn spinner_error(spinner: &ProgressBar, message: &str) {
    spinner.finish_and_clear();
    if is_json() {
        emit_json("error", message, None);
    } else {
        eprintln!("{} {}", style("✗").red(), message);
    }
}
