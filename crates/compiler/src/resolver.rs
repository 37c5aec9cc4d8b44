/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */
//! Create-vs-patch resolution
//!
//! The lookup is a point-in-time check. Another actor may create or delete the
//! entity between the lookup and the dispatch; the service then answers with a
//! conflict or not-found which is reported as is.

use crate::error::RemoteResult;
use crate::model::{ProjectScope, VariableScope};
use crate::remote::AdminApi;

/// Outcome of probing the service for an identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityExistence {
    NotFound,
    /// An entity with this identifier exists
    ExistsDirect,
    /// No entity has this identifier, but a tag with this name does
    ExistsByTag { tag: String },
}

/// What the command should do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Create,
    Patch,
}

impl EntityExistence {
    pub fn route(&self) -> Route {
        match self {
            EntityExistence::NotFound => Route::Create,
            EntityExistence::ExistsDirect | EntityExistence::ExistsByTag { .. } => Route::Patch,
        }
    }
}

/// Look up a flag by identifier, then by tag.
///
/// The tag lookup only runs when the direct lookup reports not-found. Any
/// other failure aborts resolution instead of being read as "absent".
pub fn resolve_flag<A: AdminApi + ?Sized>(
    api: &A,
    scope: &ProjectScope,
    identifier: &str,
) -> RemoteResult<EntityExistence> {
    match api.get_flag(scope, identifier) {
        Ok(flag) if !flag.identifier.is_empty() => {
            tracing::debug!(identifier, "flag exists");
            return Ok(EntityExistence::ExistsDirect);
        }
        Ok(_) => {}
        Err(e) if e.is_not_found() => {}
        Err(e) => return Err(e),
    }

    match api.get_tags(scope, Some(identifier)) {
        Ok(tags) if !tags.is_empty() => {
            tracing::debug!(identifier, "identifier matches a tag");
            Ok(EntityExistence::ExistsByTag {
                tag: identifier.to_string(),
            })
        }
        Ok(_) => Ok(EntityExistence::NotFound),
        Err(e) if e.is_not_found() => Ok(EntityExistence::NotFound),
        Err(e) => Err(e),
    }
}

/// Look up a variable by identifier. Variables have no tag association.
pub fn resolve_variable<A: AdminApi + ?Sized>(
    api: &A,
    scope: &VariableScope,
    identifier: &str,
) -> RemoteResult<EntityExistence> {
    match api.get_variables(scope, Some(identifier)) {
        Ok(variables) if variables.iter().any(|v| v.identifier == identifier) => {
            Ok(EntityExistence::ExistsDirect)
        }
        Ok(_) => Ok(EntityExistence::NotFound),
        Err(e) if e.is_not_found() => Ok(EntityExistence::NotFound),
        Err(e) => Err(e),
    }
}
