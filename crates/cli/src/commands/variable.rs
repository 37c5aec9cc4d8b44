//! Variable management command implementation

use crate::api::connect;
use crate::commands::{report, require_account, require_project};
use crate::error::CliResult;
use crate::utils::args::{parse_all, parse_pair};
use crate::utils::config::Settings;
use crate::utils::output::{print_listing, OutputFormat, Table};
use simpleflags_compiler::model::{Variable, VariableScope};
use simpleflags_compiler::workflow::{upsert_variable, VariableOutcome, VariableRequest};
use simpleflags_compiler::AdminApi;

pub struct Options {
    pub account: Option<String>,
    pub project: Option<String>,
    pub global: bool,
    pub identifier: Option<String>,
    pub remove: bool,
    pub description: Option<String>,
    /// `env:value` pairs
    pub values: Vec<String>,
    /// Adds a value column for this environment when listing
    pub environment: Option<String>,
    pub format: String,
}

pub fn run(options: &Options) -> i32 {
    match run_inner(options) {
        Ok(()) => 0,
        Err(e) => report(&e),
    }
}

fn scope(settings: &Settings, options: &Options) -> CliResult<VariableScope> {
    let account = require_account(settings, options.account.as_deref())?;
    if options.global {
        return Ok(VariableScope::global(account));
    }
    let project = require_project(settings, options.project.as_deref())?;
    Ok(VariableScope::project(account, project))
}

fn scope_label(scope: &VariableScope) -> String {
    match &scope.project {
        Some(project) => format!("project '{project}'"),
        None => format!("account '{}'", scope.account),
    }
}

fn run_inner(options: &Options) -> CliResult<()> {
    let format = OutputFormat::from_str(&options.format)?;
    let values = parse_all(&options.values, parse_pair)?;

    let settings = Settings::load()?;
    let scope = scope(&settings, options)?;
    let api = connect(&settings)?;

    let Some(identifier) = options.identifier.as_deref() else {
        let variables = api.get_variables(&scope, None)?;
        return print_listing(format, &variables, || {
            variable_table(&variables, options.environment.as_deref())
        });
    };

    if options.remove {
        api.delete_variable(&scope, identifier)?;
        println!("✓ Variable '{identifier}' removed from {}", scope_label(&scope));
        return Ok(());
    }

    let description = options.description.clone().filter(|d| !d.is_empty());
    if values.is_empty() && description.is_none() {
        let variables = api.get_variables(&scope, Some(identifier))?;
        return print_listing(format, &variables, || {
            variable_table(&variables, options.environment.as_deref())
        });
    }

    let request = VariableRequest {
        scope,
        identifier: identifier.to_string(),
        description,
        values,
    };
    match upsert_variable(&api, &request)? {
        VariableOutcome::Created { values } => {
            println!(
                "✓ Variable '{identifier}' created in {}",
                scope_label(&request.scope)
            );
            for (environment, value) in values {
                println!("  {environment}: {value}");
            }
        }
        VariableOutcome::Patched { environments } if environments.is_empty() => {
            println!("  Variable '{identifier}' exists; no values to update");
        }
        VariableOutcome::Patched { environments } => {
            println!(
                "✓ Variable '{identifier}' updated in {} for: {}",
                scope_label(&request.scope),
                environments.join(", ")
            );
        }
    }
    Ok(())
}

fn variable_table(variables: &[Variable], environment: Option<&str>) -> Table {
    let mut headers = vec!["Account", "Project", "Identifier"];
    if environment.is_some() {
        headers.push("Value");
    }
    let mut table = Table::new(headers);
    for variable in variables {
        let mut row = vec![
            variable.account.clone(),
            variable.project.clone().unwrap_or_else(|| "(global)".to_string()),
            variable.identifier.clone(),
        ];
        if let Some(env) = environment {
            row.push(
                variable
                    .value
                    .get(env)
                    .map(ToString::to_string)
                    .unwrap_or_default(),
            );
        }
        table.row(row);
    }
    table
}
