//! CLI entry point for OdinX Color Lab.

mod cli;
mod commands;
mod output;

use std::path::{Path, PathBuf};

use clap::Parser;
use odinx_core::constants::DATA_DIR;

use crate::cli::Cli;

/// Walk up from `start` and return the first existing `relative` path.
fn find_upwards(start: &Path, relative: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .take(32)
        .map(|dir| dir.join(relative))
        .find(|candidate| candidate.exists())
}

/// Load env files. dotenvy never overrides a variable that is already set, so
/// the process environment wins, then earlier files.
/// Order: 1) ~/.odinx/env  2) nearest .odinx/env  3) nearest .env
fn load_odinx_config() {
    if let Some(home) = dirs::home_dir() {
        let global = home.join(DATA_DIR).join("env");
        if global.exists() {
            let _ = dotenvy::from_path(&global);
        }
    }
    if let Ok(cwd) = std::env::current_dir() {
        if let Some(project) = find_upwards(&cwd, &Path::new(DATA_DIR).join("env")) {
            let _ = dotenvy::from_path(&project);
        }
        if let Some(env_file) = find_upwards(&cwd, Path::new(".env")) {
            let _ = dotenvy::from_path(&env_file);
        }
    }
}

#[tokio::main]
async fn main() {
    load_odinx_config();
    let cli = Cli::parse();
    output::init(cli.output);

    let result = commands::handle(cli).await;
    odinx_observability::shutdown();

    if let Err(e) = result {
        if !commands::is_reported(&e) {
            output::error(&format!("{e:#}"));
        }
        std::process::exit(1);
    }
}
