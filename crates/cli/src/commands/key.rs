//! API key command implementation

use crate::api::connect;
use crate::commands::{project_scope, report};
use crate::error::CliResult;
use crate::utils::args::{parse_all, parse_permission};
use crate::utils::config::Settings;
use simpleflags_compiler::permissions::known_keys;
use simpleflags_compiler::workflow::{create_api_key, ApiKeyRequest};
use simpleflags_compiler::{AdminApi, PermissionCompilation};
use strsim::levenshtein;

pub struct Options {
    pub account: Option<String>,
    pub project: Option<String>,
    pub environment: Option<String>,
    pub identifier: String,
    pub name: Option<String>,
    /// `key:bool` permission grants
    pub permissions: Vec<String>,
    pub set_env: bool,
    pub remove: bool,
}

pub fn run(options: &Options) -> i32 {
    match run_inner(options) {
        Ok(()) => 0,
        Err(e) => report(&e),
    }
}

fn run_inner(options: &Options) -> CliResult<()> {
    let permissions = parse_all(&options.permissions, parse_permission)?;

    let mut settings = Settings::load()?;
    let scope = project_scope(
        &settings,
        options.account.as_deref(),
        options.project.as_deref(),
    )?;
    let environment = options.environment.clone().filter(|env| !env.is_empty());
    let api = connect(&settings)?;

    if options.remove {
        api.delete_api_key(&scope, environment.as_deref(), &options.identifier)?;
        println!(
            "✓ API key '{}' removed from project '{}'{}",
            options.identifier,
            scope.project,
            environment
                .as_deref()
                .map(|env| format!(" and environment '{env}'"))
                .unwrap_or_default()
        );
        return Ok(());
    }

    let request = ApiKeyRequest {
        scope,
        environment,
        identifier: options.identifier.clone(),
        name: options.name.clone().unwrap_or_default(),
        permissions,
    };
    let outcome = create_api_key(&api, &request)?;
    print_warnings(&outcome.compilation);

    println!("✓ API key {} created", outcome.response.key);
    if options.set_env {
        settings.api_key = Some(outcome.response.key.clone());
        settings.key_type = Some(
            if request.environment.is_some() {
                "environment"
            } else {
                "project"
            }
            .to_string(),
        );
        settings.save()?;
        println!("  API key stored in settings (used by 'sf eval')");
    }
    Ok(())
}

fn print_warnings(compilation: &PermissionCompilation) {
    let known = known_keys();
    for key in &compilation.ignored_keys {
        match closest_key(key, &known) {
            Some(suggestion) => eprintln!(
                "  Warning: unknown permission '{key}' ignored\n  Did you mean: {suggestion}?"
            ),
            None => eprintln!("  Warning: unknown permission '{key}' ignored"),
        }
    }
    for o in &compilation.overrides {
        eprintln!(
            "  Warning: {} {} set to {} by '{}' (overrides '{}')",
            o.resource, o.action, o.value, o.winning_key, o.overridden_key
        );
    }
}

/// Closest known key within half the key length, if any
fn closest_key<'a>(key: &str, known: &'a [String]) -> Option<&'a str> {
    known
        .iter()
        .map(|candidate| (candidate, levenshtein(key, candidate)))
        .filter(|(candidate, distance)| {
            *distance > 0 && *distance <= key.len().max(candidate.len()) / 2
        })
        .min_by_key(|(_, distance)| *distance)
        .map(|(candidate, _)| candidate.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closest_key_suggests_typo_fix() {
        let known = known_keys();
        assert_eq!(closest_key("delete_flg", &known), Some("delete_flag"));
        assert_eq!(closest_key("zzzzzzzzzzzzzzzz", &known), None);
    }

    #[test]
    fn test_invalid_permission_value_fails_before_network() {
        let options = Options {
            account: Some("acme".to_string()),
            project: Some("web".to_string()),
            environment: None,
            identifier: "ci".to_string(),
            name: Some("CI".to_string()),
            permissions: vec!["flag:maybe".to_string()],
            set_env: false,
            remove: false,
        };
        let err = run_inner(&options).unwrap_err();
        assert!(err.to_string().contains("is not a boolean"));
    }
}
