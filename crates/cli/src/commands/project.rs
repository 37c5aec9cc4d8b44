//! Project management command implementation

use crate::api::connect;
use crate::commands::report;
use crate::error::CliResult;
use crate::utils::config::Settings;
use crate::utils::output::{print_listing, OutputFormat, Table};
use simpleflags_compiler::model::Project;
use simpleflags_compiler::workflow::{create_project, remove_project};
use simpleflags_compiler::AdminApi;

pub struct Options {
    pub account: Option<String>,
    pub identifier: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
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
        let projects = api.get_projects(account.as_deref())?;
        return print_listing(format, &projects, || project_table(&projects));
    };

    let account = account.unwrap_or_default();
    if options.remove {
        remove_project(&api, &account, identifier)?;
        println!("✓ Project '{identifier}' removed from account '{account}'");
        return Ok(());
    }

    let project = Project {
        account: account.clone(),
        identifier: identifier.to_string(),
        name: options.name.clone().unwrap_or_default(),
        description: options.description.clone().unwrap_or_default(),
    };
    create_project(&api, &project)?;
    println!("✓ Project '{identifier}' created in account '{account}'");
    Ok(())
}

fn project_table(projects: &[Project]) -> Table {
    let mut table = Table::new(["Identifier", "Name", "Description", "Account"]);
    for project in projects {
        table.row([
            project.identifier.as_str(),
            project.name.as_str(),
            project.description.as_str(),
            project.account.as_str(),
        ]);
    }
    table
}
