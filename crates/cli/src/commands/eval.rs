//! Server-side flag evaluation command implementation

use crate::api::connect_anonymous;
use crate::commands::report;
use crate::error::{CliError, CliResult};
use crate::utils::args::{parse_all, parse_pair};
use crate::utils::config::Settings;
use crate::utils::output::to_json;
use serde_json::{Map, Value};
use simpleflags_compiler::coerce;

pub struct Options {
    pub identifiers: Vec<String>,
    /// `property:value` target attributes
    pub targets: Vec<String>,
}

pub fn run(options: &Options) -> i32 {
    match run_inner(options) {
        Ok(()) => 0,
        Err(e) => report(&e),
    }
}

/// Target attributes with coerced values; a repeated property keeps the last value.
fn build_target(raw: &[String]) -> CliResult<Map<String, Value>> {
    Ok(parse_all(raw, parse_pair)?
        .into_iter()
        .map(|(property, value)| (property, coerce(&value).into_json()))
        .collect())
}

fn run_inner(options: &Options) -> CliResult<()> {
    let target = build_target(&options.targets)?;
    let settings = Settings::load()?;
    let api_key = settings.api_key().ok_or_else(|| {
        CliError::Message(
            "No API key available. Set SF_API_KEY or run 'sf key <id> --set-env'".to_string(),
        )
    })?;

    let result = connect_anonymous(&settings)?.evaluate(&api_key, &options.identifiers, &target)?;
    println!("{}", to_json(&result)?);
    Ok(())
}
