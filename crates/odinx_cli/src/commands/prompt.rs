//! `odinx prompt` — preview the prompts without calling a provider.

use anyhow::Result;
use odinx_runtime::{Prompt, formula_prompt, playground_prompt};

use super::{formula_input, mix_input};
use crate::cli::PromptKind;
use crate::output;

pub fn handle(kind: PromptKind) -> Result<()> {
    let prompt = match kind {
        PromptKind::Formula { input } => formula_prompt(&formula_input(&input)?),
        PromptKind::Playground { input } => playground_prompt(&mix_input(&input)?),
    };
    print_prompt(&prompt);
    Ok(())
}

fn print_prompt(prompt: &Prompt) {
    if output::is_json() {
        output::data("prompt", prompt);
        return;
    }
    output::block("system", &prompt.system);
    output::block("user", &prompt.user);
    output::dim(&format!(
        "{} + {} caracteres",
        prompt.system.chars().count(),
        prompt.user.chars().count()
    ));
}
