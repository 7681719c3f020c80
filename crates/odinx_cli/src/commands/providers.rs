//! `odinx providers` subcommands.

use anyhow::{Result, anyhow};
use comfy_table::{Cell, Color};
use odinx_runtime::ProviderKind;
use odinx_runtime::config::{create_provider, registry_from_env};
use serde::Serialize;

use crate::cli::ProvidersAction;
use crate::output;

#[derive(Serialize)]
struct ProviderInfo {
    id: &'static str,
    configured: bool,
    default_model: &'static str,
    key_vars: &'static [&'static str],
}

fn provider_infos() -> Vec<ProviderInfo> {
    let registry = registry_from_env();
    let configured = registry.list_providers();
    ProviderKind::ALL
        .iter()
        .map(|kind| ProviderInfo {
            id: kind.as_str(),
            configured: configured.iter().any(|id| id == kind.as_str()),
            default_model: kind.default_model(),
            key_vars: kind.key_vars(),
        })
        .collect()
}

fn parse_kind(provider_id: &str) -> Result<ProviderKind> {
    provider_id
        .parse::<ProviderKind>()
        .map_err(|_| anyhow!("unknown provider '{provider_id}' (expected gemini or openai)"))
}

pub async fn handle(action: ProvidersAction) -> Result<()> {
    match action {
        ProvidersAction::List => list(),
        ProvidersAction::Test { provider } => test(&provider).await,
        ProvidersAction::Models { provider } => models(&provider).await,
    }
}

fn list() -> Result<()> {
    let infos = provider_infos();

    output::header("Providers");
    let mut table = output::table();
    output::table_header(&mut table, &["Provider", "Status", "Default model", "Key"]);
    for info in &infos {
        let status = if info.configured {
            Cell::new("configured").fg(Color::Green)
        } else {
            Cell::new("missing API key").fg(Color::Yellow)
        };
        table.add_row(vec![
            Cell::new(info.id).fg(Color::Green),
            status,
            Cell::new(info.default_model),
            Cell::new(info.key_vars.join(" | ")),
        ]);
    }
    output::table_print(&table, &infos);
    Ok(())
}

async fn test(provider_id: &str) -> Result<()> {
    let provider = create_provider(parse_kind(provider_id)?, None)?;
    let spinner = output::spinner(&format!("Testing {provider_id} connectivity..."));

    match provider.list_models().await {
        Ok(models) => {
            output::spinner_success(
                &spinner,
                &format!("{provider_id} is reachable ({} models)", models.len()),
            );
            Ok(())
        }
        Err(e) => {
            output::spinner_error(&spinner, &format!("{provider_id} connection failed"));
            Err(anyhow!("Provider test failed: {e}"))
        }
    }
}

async fn models(provider_id: &str) -> Result<()> {
    let provider = create_provider(parse_kind(provider_id)?, None)?;
    let spinner = output::spinner(&format!("Fetching models for {provider_id}..."));

    let models = match provider.list_models().await {
        Ok(models) => models,
        Err(e) => {
            output::spinner_error(&spinner, "Failed to fetch models");
            return Err(anyhow!("Failed to list models: {e}"));
        }
    };
    spinner.finish_and_clear();

    output::header(&format!("Models for {provider_id}"));
    if models.is_empty() {
        output::dim("No models returned");
        return Ok(());
    }

    let mut table = output::table();
    output::table_header(&mut table, &["Model"]);
    for model in &models {
        table.add_row(vec![Cell::new(model)]);
    }
    output::table_print(&table, &models);
    Ok(())
}
