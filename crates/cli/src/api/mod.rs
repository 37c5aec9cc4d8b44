//! Connection to the SimpleFlags service

mod client;
mod deadline;

pub use client::HttpAdminApi;

use crate::error::CliResult;
use crate::utils::config::{read_token, Settings};

/// Client for the admin API using the stored session token.
pub fn connect(settings: &Settings) -> CliResult<HttpAdminApi> {
    let token = read_token()?;
    if token.is_none() {
        tracing::debug!("no session token stored; requests are sent unauthenticated");
    }
    let url = settings.server_url();
    tracing::debug!(url = %url, timeout_secs = settings.timeout().as_secs(), "connecting");
    Ok(HttpAdminApi::new(&url, token, settings.timeout())?)
}

/// Client that sends no session token (login, signup, evaluation).
pub fn connect_anonymous(settings: &Settings) -> CliResult<HttpAdminApi> {
    Ok(HttpAdminApi::new(
        &settings.server_url(),
        None,
        settings.timeout(),
    )?)
}
