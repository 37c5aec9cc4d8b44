//! Shell completion command implementation

use crate::commands::report;
use crate::error::{CliError, CliResult};
use crate::get_cli_command;
use clap_complete::{generate, Shell};
use std::io;

pub struct Options {
    pub shell: String,
}

pub fn run(options: &Options) -> i32 {
    match run_inner(options) {
        Ok(()) => 0,
        Err(e) => report(&e),
    }
}

fn parse_shell(name: &str) -> CliResult<Shell> {
    if name.is_empty() {
        return Err(CliError::Message(
            "Shell name is required. Supported shells: bash, zsh, fish, powershell, elvish"
                .to_string(),
        ));
    }
    name.to_lowercase().parse::<Shell>().map_err(|_| {
        CliError::Message(format!(
            "Unsupported shell: {name}. Supported shells: bash, zsh, fish, powershell, elvish"
        ))
    })
}

fn run_inner(options: &Options) -> CliResult<()> {
    let shell = parse_shell(&options.shell)?;
    let mut cmd = get_cli_command();
    generate(shell, &mut cmd, "sf", &mut io::stdout());
    Ok(())
}
