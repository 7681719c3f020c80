//! CLI argument definitions using clap derive macros.

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Visual hair-colour formulation assistant for the CAV Professional line
#[derive(Parser)]
#[command(name = "odinx", about, version, propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output (debug logs, raw model replies on failure)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format: text (human-readable) or json (machine-readable)
    #[arg(short, long, global = true, default_value = "text")]
    pub output: OutputFormat,
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    /// Colored terminal output for humans
    #[default]
    Text,
    /// Structured JSON for scripts
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the tone catalog
    Catalog {
        /// Only this family (e.g. "DORADOS")
        #[arg(long)]
        family: Option<String>,
    },
    /// Generate a formula from a current and a desired tone
    Formula {
        #[command(flatten)]
        input: FormulaArgs,
        #[command(flatten)]
        llm: LlmArgs,
    },
    /// Analyze a gram-weighted mix over a base colour
    Playground {
        #[command(flatten)]
        input: MixArgs,
        #[command(flatten)]
        llm: LlmArgs,
    },
    /// Print the prompts that would be sent, without calling the model
    Prompt {
        #[command(subcommand)]
        kind: PromptKind,
    },
    /// Inspect and test completion providers
    Providers {
        #[command(subcommand)]
        action: ProvidersAction,
    },
    /// Run the interactive lab
    Tui {
        #[command(flatten)]
        llm: LlmArgs,
    },
}

#[derive(Args, Clone, Debug)]
pub struct FormulaArgs {
    /// Current hair tone code (e.g. 6)
    #[arg(long)]
    pub current: String,
    /// Desired tone code (e.g. 9.3)
    #[arg(long)]
    pub desired: String,
    /// Gray percentage: 0%, 1-25%, 26-50%, 51-75%, 76-100%
    #[arg(long, default_value = "0%")]
    pub gray: String,
    /// Hair condition: Sano, Poroso, Decolorado, Dañado
    #[arg(long, default_value = "Sano")]
    pub condition: String,
}

#[derive(Args, Clone, Debug)]
pub struct MixArgs {
    /// Base colour tone code
    #[arg(long)]
    pub base: String,
    /// Tone to add, as CODE or CODE:GRAMS (grams default to 30). Repeatable.
    #[arg(long = "mix", required = true)]
    pub mix: Vec<String>,
}

#[derive(Args, Clone, Debug, Default)]
pub struct LlmArgs {
    /// Provider to use (gemini, openai). Uses ODINX_PROVIDER env if not set.
    #[arg(long)]
    pub provider: Option<String>,
    /// Model to use. Uses ODINX_MODEL env if not set.
    #[arg(long)]
    pub model: Option<String>,
}

#[derive(Subcommand)]
pub enum PromptKind {
    /// Formula prompt
    Formula {
        #[command(flatten)]
        input: FormulaArgs,
    },
    /// Playground prompt
    Playground {
        #[command(flatten)]
        input: MixArgs,
    },
}

#[derive(Subcommand)]
pub enum ProvidersAction {
    /// List known providers and whether a key is configured
    List,
    /// Test provider connectivity
    Test {
        /// Provider ID
        provider: String,
    },
    /// List models the provider serves
    Models {
        /// Provider ID
        provider: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_playground_args() {
        let cli = Cli::try_parse_from([
            "odinx", "playground", "--base", "6", "--mix", "7.1", "--mix", "9.3:45", "-o", "json",
        ])
        .unwrap();
        assert!(matches!(cli.output, OutputFormat::Json));
        match cli.command {
            Command::Playground { input, llm } => {
                assert_eq!(input.base, "6");
                assert_eq!(input.mix, vec!["7.1", "9.3:45"]);
                assert!(llm.provider.is_none());
            }
            _ => panic!("expected playground"),
        }
    }

    #[test]
    fn test_playground_requires_mix() {
        assert!(Cli::try_parse_from(["odinx", "playground", "--base", "6"]).is_err());
    }

    #[test]
    fn test_formula_defaults() {
        let cli =
            Cli::try_parse_from(["odinx", "formula", "--current", "6", "--desired", "9.3"]).unwrap();
        match cli.command {
            Command::Formula { input, .. } => {
                assert_eq!(input.gray, "0%");
                assert_eq!(input.condition, "Sano");
            }
            _ => panic!("expected formula"),
        }
    }
}
