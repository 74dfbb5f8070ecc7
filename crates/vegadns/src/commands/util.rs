//! Shared helpers for command handlers.

use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// Fails instead of prompting when stdin is not a terminal.
pub fn confirm(message: &str, action: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|_| CliError::NonInteractiveRequiresYes {
            action: action.into(),
        })
}

/// Render `key: value` lines for single-item table views.
pub fn detail(fields: &[(&str, String)]) -> String {
    let width = fields.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    fields
        .iter()
        .map(|(k, v)| format!("{k:<width$}  {v}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_aligns_values() {
        let out = detail(&[("ID", "1".into()), ("Domain", "example.com".into())]);
        assert_eq!(out, "ID      1\nDomain  example.com");
    }

    #[test]
    fn yes_flag_skips_prompt() {
        assert!(matches!(confirm("Delete?", "delete record", true), Ok(true)));
    }
}
