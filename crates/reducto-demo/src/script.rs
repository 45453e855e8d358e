//! Input script parsing
//!
//! One entry per line:
//! - a JSON action, e.g. `{"type": "counter/add", "amount": 2}`
//! - `:replace` swaps in the root reducer with the stats slice
//! - `:state` prints the current state
//! - blank lines and lines starting with `#` are skipped

use anyhow::{bail, Context, Result};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Line {
    Action(Value),
    Replace,
    PrintState,
    Skip,
}

pub fn parse_line(line: &str) -> Result<Line> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(Line::Skip);
    }

    if let Some(directive) = line.strip_prefix(':') {
        return match directive.trim() {
            "replace" => Ok(Line::Replace),
            "state" => Ok(Line::PrintState),
            other => bail!("unknown directive \":{}\"", other),
        };
    }

    let value = serde_json::from_str(line).context("line is neither a directive nor valid JSON")?;
    Ok(Line::Action(value))
}
