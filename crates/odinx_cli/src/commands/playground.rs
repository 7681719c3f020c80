//! `odinx playground` — analyze a mix over a base colour.

use std::time::Instant;

use anyhow::Result;
use odinx_core::Mode;
use odinx_runtime::{FormulationService, Lab, render};

use super::{apply_mix_args, lab_config, report_failure};
use crate::cli::{LlmArgs, MixArgs};
use crate::output;

pub async fn handle(args: &MixArgs, llm: &LlmArgs, verbose: bool) -> Result<()> {
    let mut lab = Lab::with_mode(Mode::Playground);
    apply_mix_args(args, lab.mixing_mut())?;

    let service = FormulationService::from_config(&lab_config(llm)?)?;
    if verbose {
        output::kv("Proveedor", service.provider_id());
        output::kv("Modelo", service.model());
    }
    let started = Instant::now();
    let spinner = output::spinner(&format!(
        "Analizando \"{}\" sobre {} ({} g en total)…",
        lab.mixing().mix_string(),
        args.base,
        lab.mixing().total_grams()
    ));

    match lab.submit_playground(&service).await {
        Ok(result) => {
            spinner.finish_and_clear();
            output::render_view(&render(&result));
            output::success(&format!("Análisis completado en {:.1}s", started.elapsed().as_secs_f64()));
            Ok(())
        }
        Err(err) => {
            spinner.finish_and_clear();
            Err(report_failure(&lab, err, verbose))
        }
    }
}
