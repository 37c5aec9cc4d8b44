//! Prompts for login and signup

use crate::error::{CliError, CliResult};
use dialoguer::{Confirm, Input, Password};
use regex::Regex;

const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

/// Prompts need a terminal on stdin and somewhere visible to draw.
pub fn is_interactive() -> bool {
    atty::is(atty::Stream::Stdin) && atty::is(atty::Stream::Stderr)
}

fn require_terminal(what: &str) -> CliResult<()> {
    if is_interactive() {
        return Ok(());
    }
    Err(CliError::Prompt(format!(
        "{what} must be entered interactively, but no terminal is attached"
    )))
}

pub fn is_valid_email(input: &str) -> bool {
    Regex::new(EMAIL_PATTERN)
        .map(|re| re.is_match(input.trim()))
        .unwrap_or(false)
}

pub fn prompt_email() -> CliResult<String> {
    require_terminal("Email")?;
    let email: String = Input::new()
        .with_prompt("Email")
        .validate_with(|input: &String| -> Result<(), String> {
            if is_valid_email(input) {
                Ok(())
            } else {
                Err("Please provide a valid email".to_string())
            }
        })
        .interact_text()?;
    Ok(email.trim().to_string())
}

pub fn prompt_password(prompt: &str) -> CliResult<String> {
    require_terminal("Password")?;
    let password = Password::new()
        .with_prompt(prompt)
        .validate_with(|input: &String| -> Result<(), String> {
            if input.is_empty() {
                Err("Password cannot be empty".to_string())
            } else {
                Ok(())
            }
        })
        .interact()?;
    Ok(password)
}

/// Ask before a destructive action; non-interactive sessions get `default`.
pub fn confirm(prompt: &str, default: bool) -> CliResult<bool> {
    if !is_interactive() {
        return Ok(default);
    }
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}
