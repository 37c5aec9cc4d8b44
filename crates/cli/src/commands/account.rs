//! Account management command implementation

use crate::api::connect;
use crate::commands::report;
use crate::error::{CliError, CliResult};
use crate::utils::config::Settings;
use crate::utils::output::{print_listing, OutputFormat, Table};
use crate::ui::prompts::confirm;
use simpleflags_compiler::model::Account;
use simpleflags_compiler::workflow::create_account;
use simpleflags_compiler::AdminApi;

pub struct Options {
    /// Name for a new account, or identifier with `--rm`
    pub name: Option<String>,
    pub remove: bool,
    pub force: bool,
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
    let api = connect(&settings)?;

    let Some(name) = options.name.as_deref() else {
        let accounts = api.get_accounts()?;
        return print_listing(format, &accounts, || account_table(&accounts));
    };

    if options.remove {
        if !options.force
            && !confirm(
                &format!("Delete account '{name}' and everything in it?"),
                false,
            )?
        {
            return Err(CliError::Message(format!(
                "Account '{name}' was not deleted. Pass --force to skip the confirmation"
            )));
        }
        api.delete_account(name)?;
        println!("✓ Account '{name}' deleted");
        return Ok(());
    }

    let account = create_account(&api, name)?;
    println!(
        "✓ Account created with identifier {}",
        account.identifier
    );
    Ok(())
}

fn account_table(accounts: &[Account]) -> Table {
    let mut table = Table::new(["Identifier", "Name", "Owner"]);
    for account in accounts {
        table.row([
            account.identifier.as_str(),
            account.name.as_str(),
            account.owner.as_str(),
        ]);
    }
    table
}
