//! Command dispatch and argument conversion shared by the subcommands.

pub mod catalog;
pub mod formula;
pub mod playground;
pub mod prompt;
pub mod providers;
pub mod tui;

use anyhow::{Context, Result, anyhow};
use odinx_core::{
    FormulaInput, GrayPercentage, HairCondition, MixInput, Mixing, Selection, Tone, catalog as tones,
};
use odinx_observability::ObservabilityConfig;
use odinx_runtime::{Lab, LabConfig, LabError, ProviderKind};

use crate::cli::{Cli, Command, FormulaArgs, LlmArgs, MixArgs};
use crate::output;

pub async fn handle(cli: Cli) -> Result<()> {
    let verbose = cli.verbose;
    // The TUI installs its own subscriber that feeds the log screen.
    if !matches!(cli.command, Command::Tui { .. }) {
        init_console_logging(verbose);
    }

    match cli.command {
        Command::Catalog { family } => catalog::handle(family.as_deref()),
        Command::Formula { input, llm } => formula::handle(&input, &llm, verbose).await,
        Command::Playground { input, llm } => playground::handle(&input, &llm, verbose).await,
        Command::Prompt { kind } => prompt::handle(kind),
        Command::Providers { action } => providers::handle(action).await,
        Command::Tui { llm } => tui::handle(&llm, verbose).await,
    }
}

fn init_console_logging(verbose: bool) {
    let mut config = ObservabilityConfig::from_env().with_version(odinx_core::constants::VERSION);
    if verbose {
        config = config.with_log_level("info,odinx_runtime=debug,odinx_llms=debug");
    }
    if let Err(e) = odinx_observability::init(config) {
        output::warning(&format!("Observability init failed (continuing): {e}"));
    }
}

/// Environment config with `--provider` / `--model` applied on top.
pub fn lab_config(llm: &LlmArgs) -> Result<LabConfig> {
    let mut config = LabConfig::from_env();
    if let Some(p) = llm.provider.as_deref() {
        let provider = p
            .parse::<ProviderKind>()
            .map_err(|_| anyhow!("unknown provider '{p}' (expected gemini or openai)"))?;
        config = config.with_provider(provider);
    }
    if let Some(m) = &llm.model {
        config = config.with_model(m.clone());
    }
    Ok(config)
}

fn tone(code: &str) -> Result<Tone> {
    Ok(tones::lookup(code)?)
}

/// Fill a selection the way two palette clicks would.
pub fn apply_formula_args(args: &FormulaArgs, selection: &mut Selection) -> Result<()> {
    let current = tone(&args.current).context("--current")?;
    let desired = tone(&args.desired).context("--desired")?;
    selection.select_tone(current);
    selection.select_tone(desired);
    selection.set_gray_percentage(args.gray.parse::<GrayPercentage>()?);
    selection.set_hair_condition(args.condition.parse::<HairCondition>()?);
    Ok(())
}

/// `CODE` or `CODE:GRAMS`.
pub fn parse_mix_entry(entry: &str) -> Result<(Tone, Option<&str>)> {
    let (code, grams) = match entry.rsplit_once(':') {
        Some((code, grams)) => (code, Some(grams)),
        None => (entry, None),
    };
    Ok((tone(code).with_context(|| format!("--mix {entry}"))?, grams))
}

pub fn apply_mix_args(args: &MixArgs, mixing: &mut Mixing) -> Result<()> {
    mixing.set_base(tone(&args.base).context("--base")?);
    for entry in &args.mix {
        let (tone, grams) = parse_mix_entry(entry)?;
        if !mixing.add_to_mix(tone) {
            output::warning(&format!("{} ya está en la mezcla; se ignora", tone.code));
            continue;
        }
        if let Some(grams) = grams {
            mixing.update_grams_input(tone.code, grams);
        }
    }
    Ok(())
}

pub fn formula_input(args: &FormulaArgs) -> Result<FormulaInput> {
    let mut selection = Selection::new();
    apply_formula_args(args, &mut selection)?;
    Ok(selection.snapshot()?)
}

pub fn mix_input(args: &MixArgs) -> Result<MixInput> {
    let mut mixing = Mixing::new();
    apply_mix_args(args, &mut mixing)?;
    Ok(mixing.snapshot()?)
}

/// A failed request whose banner was already printed. `main` only sets the
/// exit code for it.
#[derive(Debug)]
pub struct Reported(pub LabError);

impl std::fmt::Display for Reported {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "request failed: {}", self.0)
    }
}

impl std::error::Error for Reported {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

pub fn is_reported(err: &anyhow::Error) -> bool {
    err.is::<Reported>()
}

/// Print the lab's failure banner and turn `err` into a [Reported] error.
/// Errors the lab did not record (e.g. `Busy`) are returned as is.
pub fn report_failure(lab: &Lab, err: LabError, verbose: bool) -> anyhow::Error {
    match lab.failure() {
        Some(failure) => {
            output::failure(failure, err.raw_response(), verbose);
            Reported(err).into()
        }
        None => anyhow!(err),
    }
}

#[cfg(test)]
mod tests {
    use odinx_core::Mode;

    use super::*;

    fn formula_args(current: &str, desired: &str) -> FormulaArgs {
        FormulaArgs {
            current: current.to_string(),
            desired: desired.to_string(),
            gray: "26-50%".to_string(),
            condition: "poroso".to_string(),
        }
    }

    #[test]
    fn test_formula_input_from_args() {
        let input = formula_input(&formula_args("6", "9.3")).unwrap();
        assert_eq!(input.current.code, "6");
        assert_eq!(input.desired.code, "9.3");
        assert_eq!(input.gray, GrayPercentage::UpTo50);
        assert_eq!(input.condition, HairCondition::Porous);
    }

    #[test]
    fn test_same_tone_twice_is_incomplete() {
        // Second click on the current tone re-assigns current.
        assert!(formula_input(&formula_args("6", "6")).is_err());
    }

    #[test]
    fn test_unknown_code_is_rejected() {
        let err = formula_input(&formula_args("6", "99")).unwrap_err();
        assert!(format!("{err:#}").contains("99"));
    }

    #[test]
    fn test_parse_mix_entry() {
        let (tone, grams) = parse_mix_entry("9.3:45").unwrap();
        assert_eq!(tone.code, "9.3");
        assert_eq!(grams, Some("45"));
        let (tone, grams) = parse_mix_entry("Blue").unwrap();
        assert_eq!(tone.code, "Blue");
        assert_eq!(grams, None);
        assert!(parse_mix_entry("azul:10").is_err());
    }

    #[test]
    fn test_mix_input_from_args() {
        let input = mix_input(&MixArgs {
            base: "6".to_string(),
            mix: vec!["7.1".to_string(), "9.3:45".to_string(), "Violet:abc".to_string()],
        })
        .unwrap();
        assert_eq!(input.mix_string(), "30g de 7.1 + 45g de 9.3 + 0g de Violet");
    }

    #[test]
    fn test_lab_config_rejects_unknown_provider() {
        let llm = LlmArgs {
            provider: Some("claude".to_string()),
            model: None,
        };
        assert!(lab_config(&llm).is_err());
    }

    #[test]
    fn test_recorded_failure_is_reported_once() {
        let mut lab = Lab::new();
        let err = lab.begin_formula().unwrap_err();
        let reported = report_failure(&lab, err, false);
        assert!(is_reported(&reported));
        assert!(reported.to_string().starts_with("request failed"));
    }

    #[test]
    fn test_unrecorded_error_is_not_reported() {
        let lab = Lab::with_mode(Mode::Playground);
        let err = report_failure(&lab, LabError::Busy, false);
        assert!(!is_reported(&err));
    }
}
