/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */
//! Command workflows: coerce, assemble, resolve, dispatch
//!
//! Each workflow finishes every in-memory step (coercion, permission
//! compilation, instruction assembly) before its first mutating call, so a
//! usage error never leaves a half-applied change behind.

mod api_key;
mod flag;
mod resources;
mod variable;


pub use api_key::{create_api_key, ApiKeyOutcome, ApiKeyRequest};
pub use flag::{upsert_flag, FlagOutcome, FlagRequest};
pub use resources::{
    create_account, create_environment, create_project, remove_environment, remove_project,
};
pub use variable::{upsert_variable, VariableOutcome, VariableRequest};

use crate::error::UsageError;

pub(crate) fn require(
    value: &str,
    field: &'static str,
    hint: &'static str,
) -> Result<(), UsageError> {
    if value.trim().is_empty() {
        return Err(UsageError::MissingField { field, hint });
    }
    Ok(())
}
