//! Environment management command implementation

use crate::api::connect;
use crate::commands::report;
use crate::error::CliResult;
use crate::utils::config::Settings;
use crate::utils::output::{print_listing, OutputFormat, Table};
use simpleflags_compiler::model::Environment;
use simpleflags_compiler::workflow::{create_environment, remove_environment};
use simpleflags_compiler::AdminApi;

pub struct Options {
    pub account: Option<String>,
    pub identifier: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub production: bool,
    pub remove: bool,
    pub format: String,
}

pub fn run(options: &Options) -> i32 {
    match run_inner(options) {
        Ok(()) => 0,
        Err(e) => report(&e),
    }
}

fn run_inner(options: &Options) -> CliResult<()> {
    let format = OutputFormat::from_str(&options.format)?;
    let settings = Settings::load()?;
    let account = settings.account_or(options.account.as_deref());
    let api = connect(&settings)?;

    let Some(identifier) = options.identifier.as_deref() else {
        let environments = api.get_environments(account.as_deref())?;
        return print_listing(format, &environments, || environment_table(&environments));
    };

    let account = account.unwrap_or_default();
    if options.remove {
        remove_environment(&api, &account, identifier)?;
        println!("✓ Environment '{identifier}' removed from account '{account}'");
        return Ok(());
    }

    let environment = Environment {
        account: account.clone(),
        identifier: identifier.to_string(),
        name: options.name.clone().unwrap_or_default(),
        description: options.description.clone().unwrap_or_default(),
        production: options.production,
    };
    create_environment(&api, &environment)?;
    println!("✓ Environment '{identifier}' created in account '{account}'");
    Ok(())
}

fn environment_table(environments: &[Environment]) -> Table {
    let mut table = Table::new(["Identifier", "Name", "Description", "Production", "Account"]);
    for env in environments {
        table.row([
            env.identifier.clone(),
            env.name.clone(),
            env.description.clone(),
            env.production.to_string(),
            env.account.clone(),
        ]);
    }
    table
}
