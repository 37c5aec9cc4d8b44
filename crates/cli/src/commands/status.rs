//! Status command implementation
//!
//! Shows the effective settings and the current session. Makes no requests.

use crate::commands::report;
use crate::error::CliResult;
use crate::utils::config::{read_token, settings_dir, Settings};
use crate::utils::jwt::{decode_claims, expiry, is_expired};
use chrono::Utc;

pub struct Options {
    pub account: Option<String>,
    pub project: Option<String>,
}

pub fn run(options: &Options) -> i32 {
    match run_inner(options) {
        Ok(()) => 0,
        Err(e) => report(&e),
    }
}

/// Show the first and last four characters only
fn mask(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}…{tail}")
}

fn run_inner(options: &Options) -> CliResult<()> {
    let settings = Settings::load()?;
    let unset = || "(not set)".to_string();

    println!("--- Settings ---");
    println!("Settings directory: {}", settings_dir()?.display());
    println!("Admin server URL: {}", settings.server_url());
    println!(
        "Default account: {}",
        settings
            .account_or(options.account.as_deref())
            .unwrap_or_else(unset)
    );
    println!(
        "Default project: {}",
        settings
            .project_or(options.project.as_deref())
            .unwrap_or_else(unset)
    );
    println!("Request timeout: {}s", settings.timeout().as_secs());

    println!("--- API key ---");
    println!(
        "API key: {}",
        settings.api_key().map(|k| mask(&k)).unwrap_or_else(unset)
    );
    println!("API key type: {}", settings.key_type().unwrap_or_else(unset));

    println!("--- Session ---");
    let Some(token) = read_token()? else {
        println!("Not logged in. Run 'sf login'");
        return Ok(());
    };
    let Some(claims) = decode_claims(&token) else {
        println!("Session token present but unreadable");
        return Ok(());
    };
    for key in ["email", "sub", "account"] {
        if let Some(value) = claims.get(key).and_then(|v| v.as_str()) {
            println!("{key}: {value}");
        }
    }
    match expiry(&claims) {
        Some(exp) if is_expired(&claims, Utc::now()) => {
            println!("Expired: {} (run 'sf login')", exp.to_rfc3339())
        }
        Some(exp) => println!("Expires: {}", exp.to_rfc3339()),
        None => println!("Expires: never"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_hides_middle_of_key() {
        assert_eq!(mask("sf-1234567890abcd"), "sf-1…abcd");
        assert_eq!(mask("short"), "*****");
    }
}
