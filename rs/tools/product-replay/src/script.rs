//! Event scripts: one JSON object per line, `{"at": <ms>, "event": <action>}`.
//! Blank lines and lines starting with `#` are skipped.

use anyhow::{anyhow, Context, Result};
use product_page_core::Action;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Step {
    #[serde(default)]
    pub at: u64,
    pub event: Action,
}

pub fn parse_script(text: &str) -> Result<Vec<Step>> {
    let mut steps = Vec::new();
    let mut last = 0u64;
    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let lineno = i + 1;
        let step: Step = serde_json::from_str(line).with_context(|| format!("line {}: bad event", lineno))?;
        if step.at < last {
            return Err(anyhow!("line {}: time goes backwards ({} < {})", lineno, step.at, last));
        }
        last = step.at;
        steps.push(step);
    }
    Ok(steps)
}
