//! Logout command implementation

use crate::commands::report;
use crate::error::CliResult;
use crate::utils::config::remove_token;

pub fn run() -> i32 {
    match run_inner() {
        Ok(()) => 0,
        Err(e) => report(&e),
    }
}

fn run_inner() -> CliResult<()> {
    if remove_token()? {
        println!("✓ Successfully logged out. Good Bye");
    } else {
        println!("  No active session");
    }
    Ok(())
}
