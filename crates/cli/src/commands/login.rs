//! Login command implementation

use crate::api::connect_anonymous;
use crate::commands::report;
use crate::error::{CliError, CliResult};
use crate::ui::prompts::{is_valid_email, prompt_email, prompt_password};
use crate::utils::config::{write_token, Settings};
use simpleflags_compiler::model::LoginRequest;
use simpleflags_compiler::AdminApi;

pub struct Options {
    pub email: Option<String>,
}

pub fn run(options: &Options) -> i32 {
    match run_inner(options) {
        Ok(()) => 0,
        Err(e) => report(&e),
    }
}

fn run_inner(options: &Options) -> CliResult<()> {
    let email = match options.email.as_deref().map(str::trim) {
        Some(email) if !is_valid_email(email) => {
            return Err(CliError::Message(format!("'{email}' is not a valid email")));
        }
        Some(email) => email.to_string(),
        None => prompt_email()?,
    };
    let password = prompt_password("Password")?;

    let settings = Settings::load()?;
    println!("Authenticating...");
    let response = connect_anonymous(&settings)?.authenticate(&LoginRequest {
        email: email.clone(),
        password,
    })?;
    write_token(&response.token)?;
    tracing::debug!("session token stored");
    println!("✓ Welcome {email}, how are you doing today?");
    Ok(())
}
