//! `odinx formula` — one formula request.

use std::time::Instant;

use anyhow::Result;
use odinx_runtime::{FormulationService, Lab, render};

use super::{apply_formula_args, lab_config, report_failure};
use crate::cli::{FormulaArgs, LlmArgs};
use crate::output;

pub async fn handle(args: &FormulaArgs, llm: &LlmArgs, verbose: bool) -> Result<()> {
    let mut lab = Lab::new();
    apply_formula_args(args, lab.selection_mut())?;

    let service = FormulationService::from_config(&lab_config(llm)?)?;
    if verbose {
        output::kv("Proveedor", service.provider_id());
        output::kv("Modelo", service.model());
    }
    let started = Instant::now();
    let spinner = output::spinner(&format!(
        "Generando fórmula {} → {} con {} ({})…",
        args.current,
        args.desired,
        service.provider_id(),
        service.model()
    ));

    match lab.submit_formula(&service).await {
        Ok(result) => {
            spinner.finish_and_clear();
            output::render_view(&render(&result));
            output::success(&format!("Fórmula generada en {:.1}s", started.elapsed().as_secs_f64()));
            Ok(())
        }
        Err(err) => {
            spinner.finish_and_clear();
            Err(report_failure(&lab, err, verbose))
        }
    }
}
