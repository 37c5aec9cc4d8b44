//! CLI commands

pub mod account;
pub mod completion;
pub mod env;
pub mod eval;
pub mod flag;
pub mod key;
pub mod login;
pub mod logout;
pub mod project;
pub mod set;
pub mod signup;
pub mod status;
pub mod tags;
pub mod variable;

use crate::error::{CliError, CliResult};
use crate::utils::config::Settings;
use simpleflags_compiler::model::ProjectScope;
use simpleflags_compiler::{CompilerError, RemoteError, StatusCategory, UsageError};

/// Print a failed command and return its exit code.
pub(crate) fn report(e: &CliError) -> i32 {
    eprintln!("✗ Error: {e}");
    let remote = match e {
        CliError::Remote(remote) | CliError::Compiler(CompilerError::Remote(remote)) => Some(remote),
        _ => None,
    };
    if let Some(hint) = remote.and_then(hint_for) {
        eprintln!("  {hint}");
    }
    1
}

fn hint_for(e: &RemoteError) -> Option<&'static str> {
    match e.category() {
        StatusCategory::Unauthorized => Some("Suggestion: Run 'sf login' to start a new session"),
        StatusCategory::Timeout | StatusCategory::Transport => {
            Some("Suggestion: Check the server URL with 'sf status'")
        }
        _ => None,
    }
}

pub(crate) fn require_account(settings: &Settings, flag: Option<&str>) -> CliResult<String> {
    settings.account_or(flag).ok_or_else(|| {
        UsageError::MissingField {
            field: "account",
            hint: "-a or --acc",
        }
        .into()
    })
}

pub(crate) fn require_project(settings: &Settings, flag: Option<&str>) -> CliResult<String> {
    settings.project_or(flag).ok_or_else(|| {
        UsageError::MissingField {
            field: "project",
            hint: "-p or --project",
        }
        .into()
    })
}

pub(crate) fn project_scope(
    settings: &Settings,
    account: Option<&str>,
    project: Option<&str>,
) -> CliResult<ProjectScope> {
    Ok(ProjectScope::new(
        require_account(settings, account)?,
        require_project(settings, project)?,
    ))
}
