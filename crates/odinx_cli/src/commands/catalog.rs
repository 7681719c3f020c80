//! `odinx catalog` — the tone catalog with swatches.

use anyhow::{Result, anyhow};
use comfy_table::{Cell, Color};
use odinx_core::{ToneFamily, catalog};
use serde::Serialize;

use crate::output;

#[derive(Serialize)]
struct ToneItem<'a> {
    family: &'a str,
    code: &'a str,
    name: &'a str,
    color: &'a str,
}

pub fn handle(family: Option<&str>) -> Result<()> {
    let families: Vec<&ToneFamily> = match family {
        Some(name) => vec![
            catalog::family(name).ok_or_else(|| anyhow!("unknown family '{name}'"))?,
        ],
        None => catalog::families().iter().collect(),
    };

    output::header("Catálogo CAV Professional");

    let mut table = output::table();
    output::table_header(&mut table, &["Familia", "Código", "Nombre", "Color", ""]);

    let mut items = Vec::new();
    for family in families {
        for tone in family.tones {
            table.add_row(vec![
                Cell::new(family.name).fg(Color::DarkGrey),
                Cell::new(tone.code).fg(Color::Green),
                Cell::new(tone.name),
                Cell::new(tone.color),
                output::swatch_cell(tone.color, tone.rgb()),
            ]);
            items.push(ToneItem {
                family: family.name,
                code: tone.code,
                name: tone.name,
                color: tone.color,
            });
        }
    }

    output::table_print(&table, &items);
    Ok(())
}
