//! Flag management command implementation
//!
//! Without an identifier the command lists flags. With one it prints the
//! flag, deletes it (`--rm`), or creates/patches it from the given changes.

use crate::api::connect;
use crate::commands::{project_scope, report};
use crate::error::CliResult;
use crate::utils::args::{parse_all, parse_rule};
use crate::utils::config::Settings;
use crate::utils::output::{print_listing, OutputFormat, Table};
use simpleflags_compiler::model::Flag;
use simpleflags_compiler::workflow::{upsert_flag, FlagOutcome, FlagRequest};
use simpleflags_compiler::{AdminApi, EntityExistence, FlagChanges};

pub struct Options {
    pub account: Option<String>,
    pub project: Option<String>,
    pub identifier: Option<String>,
    pub remove: bool,
    pub name: Option<String>,
    pub description: Option<String>,
    pub permanent: Option<bool>,
    pub deprecated: Option<bool>,
    pub environment: Option<String>,
    pub on: bool,
    pub off: bool,
    pub off_value: Option<String>,
    pub rules: Vec<String>,
    pub tags: Vec<String>,
    pub format: String,
}

impl Options {
    fn changes(&self) -> CliResult<FlagChanges> {
        Ok(FlagChanges {
            name: self.name.clone(),
            description: self.description.clone(),
            permanent: self.permanent,
            deprecated: self.deprecated,
            environment: self.environment.clone(),
            on: self.on,
            off: self.off,
            off_value: self.off_value.clone(),
            rules: parse_all(&self.rules, parse_rule)?,
            tags: self.tags.clone(),
        })
    }
}

pub fn run(options: &Options) -> i32 {
    match run_inner(options) {
        Ok(()) => 0,
        Err(e) => report(&e),
    }
}

fn run_inner(options: &Options) -> CliResult<()> {
    let format = OutputFormat::from_str(&options.format)?;
    let changes = options.changes()?;
    changes.check_on_off()?;

    let settings = Settings::load()?;
    let scope = project_scope(
        &settings,
        options.account.as_deref(),
        options.project.as_deref(),
    )?;
    let api = connect(&settings)?;

    let Some(identifier) = options.identifier.as_deref() else {
        let flags = api.get_flags(&scope)?;
        return print_listing(format, &flags, || flag_table(&flags));
    };

    if options.remove {
        api.delete_flag(&scope, identifier)?;
        println!("✓ Flag '{identifier}' deleted from project '{}'", scope.project);
        return Ok(());
    }

    if changes.is_empty() {
        let flag = api.get_flag(&scope, identifier)?;
        return print_listing(format, &flag, || flag_details(&flag));
    }

    let request = FlagRequest {
        scope,
        identifier: identifier.to_string(),
        changes,
    };
    match upsert_flag(&api, &request)? {
        FlagOutcome::Created { environments } => {
            println!(
                "✓ Flag '{identifier}' created in project '{}'",
                request.scope.project
            );
            println!("  Environments: {}", environments.join(", "));
        }
        FlagOutcome::Patched {
            existence: EntityExistence::ExistsByTag { tag },
            ..
        } => {
            println!(
                "✓ Flags tagged '{tag}' updated in project '{}'",
                request.scope.project
            );
        }
        FlagOutcome::Patched { .. } => {
            println!(
                "✓ Flag '{identifier}' updated in project '{}'",
                request.scope.project
            );
        }
    }
    Ok(())
}

fn flag_table(flags: &[Flag]) -> Table {
    let mut table = Table::new([
        "Project",
        "Name",
        "Identifier",
        "Permanent",
        "Deprecated",
        "Version",
    ]);
    for flag in flags {
        table.row([
            flag.project.clone(),
            flag.name.clone(),
            flag.identifier.clone(),
            flag.permanent.to_string(),
            flag.deprecated.to_string(),
            flag.version.to_string(),
        ]);
    }
    table
}

fn flag_details(flag: &Flag) -> Table {
    let mut table = Table::new(["Field", "Value"]);
    table
        .row(["Identifier", flag.identifier.as_str()])
        .row(["Name", flag.name.as_str()])
        .row(["Description", flag.description.as_deref().unwrap_or("")])
        .row(["Project", flag.project.as_str()])
        .row(["Permanent", &flag.permanent.to_string()])
        .row(["Deprecated", &flag.deprecated.to_string()])
        .row(["Version", &flag.version.to_string()])
        .row(["Tags", &flag.tags.join(", ")]);
    for (environment, configuration) in &flag.environments {
        table.row([format!("env:{environment}"), configuration.to_string()]);
    }
    table
}
