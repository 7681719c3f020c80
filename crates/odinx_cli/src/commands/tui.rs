//! `odinx tui` — interactive lab.

use std::sync::Arc;

use anyhow::Result;
use odinx_observability::{LogSink, ObservabilityConfig};
use odinx_runtime::FormulationService;
use tokio::sync::mpsc;

use super::lab_config;
use crate::cli::LlmArgs;
use crate::output;

pub async fn handle(llm: &LlmArgs, verbose: bool) -> Result<()> {
    let config = lab_config(llm)?;
    let service = FormulationService::from_config(&config)?;

    // Tracing goes to the log screen (Ctrl+D), not the terminal the TUI owns.
    let (log_tx, log_rx) = mpsc::channel::<String>(512);
    let log_sink: LogSink = Arc::new(move |line| {
        let _ = log_tx.try_send(line);
    });
    let mut obs_config = ObservabilityConfig::from_env()
        .with_version(odinx_core::constants::VERSION)
        .with_console(false)
        .with_log_sink(log_sink);
    if obs_config.log_level.is_none() || verbose {
        obs_config = obs_config.with_log_level("info,odinx_runtime=debug,odinx_llms=debug");
    }
    if let Err(e) = odinx_observability::init(obs_config) {
        output::warning(&format!("Observability init failed (continuing): {e}"));
    }

    let handle = tokio::runtime::Handle::current();
    tokio::task::spawn_blocking(move || odinx_tui::run_tui(service, Some(log_rx), handle)).await??;
    Ok(())
}
