//! Session token claims
//!
//! The token is only decoded for display. Its signature is never checked
//! here; the service does that on every request.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{Map, Value};

/// Decode the payload segment of a JWT into its claims.
pub fn decode_claims(token: &str) -> Option<Map<String, Value>> {
    let payload = token.split('.').nth(1)?;
    // Some issuers keep the padding
    let bytes = match URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::debug!(error = %e, "token payload is not base64url");
            return None;
        }
    };
    match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Object(claims)) => Some(claims),
        Ok(_) => None,
        Err(e) => {
            tracing::debug!(error = %e, "token payload is not a JSON object");
            None
        }
    }
}

/// Expiry from the `exp` claim
pub fn expiry(claims: &Map<String, Value>) -> Option<DateTime<Utc>> {
    let seconds = claims.get("exp")?.as_i64()?;
    Utc.timestamp_opt(seconds, 0).single()
}

pub fn is_expired(claims: &Map<String, Value>, now: DateTime<Utc>) -> bool {
    expiry(claims).is_some_and(|exp| exp <= now)
}
