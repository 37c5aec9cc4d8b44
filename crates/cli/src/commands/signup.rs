//! Signup command implementation

use crate::api::connect_anonymous;
use crate::commands::report;
use crate::error::CliResult;
use crate::ui::prompts::{prompt_email, prompt_password};
use crate::utils::config::Settings;
use simpleflags_compiler::model::SignupBody;
use simpleflags_compiler::{AdminApi, UsageError};

pub fn run() -> i32 {
    match run_inner() {
        Ok(()) => 0,
        Err(e) => report(&e),
    }
}

fn signup_body(email: String, password: String, repeat: String) -> Result<SignupBody, UsageError> {
    if password != repeat {
        return Err(UsageError::PasswordMismatch);
    }
    Ok(SignupBody {
        email,
        password,
        repeat_password: repeat,
    })
}

fn run_inner() -> CliResult<()> {
    let email = prompt_email()?;
    let password = prompt_password("Password")?;
    let repeat = prompt_password("Repeat password")?;
    let body = signup_body(email, password, repeat)?;

    let settings = Settings::load()?;
    connect_anonymous(&settings)?.signup(&body)?;
    println!("✓ User with email {} successfully registered", body.email);
    println!("  Next: run 'sf login {}'", body.email);
    Ok(())
}
