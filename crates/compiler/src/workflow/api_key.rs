/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */

use super::require;
use crate::dispatch::InstructionDispatcher;
use crate::error::CompilerResult;
use crate::model::{ApiKeyBody, ApiKeyResponse, ProjectScope};
use crate::permissions::{compile_with_report, PermissionCompilation};
use crate::remote::AdminApi;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiKeyRequest {
    pub scope: ProjectScope,
    pub environment: Option<String>,
    pub identifier: String,
    pub name: String,
    /// `(permission key, granted)` in command-line order
    pub permissions: Vec<(String, bool)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiKeyOutcome {
    pub response: ApiKeyResponse,
    pub compilation: PermissionCompilation,
}

/// Compile the permission matrix and create the key in one request.
pub fn create_api_key<A: AdminApi + ?Sized>(
    api: &A,
    request: &ApiKeyRequest,
) -> CompilerResult<ApiKeyOutcome> {
    require(&request.scope.account, "account", "-a or --acc")?;
    require(&request.scope.project, "project", "-p or --project")?;
    require(&request.identifier, "key identifier", "the positional argument")?;
    require(&request.name, "key name", "-n or --name")?;

    let compilation = compile_with_report(
        request
            .permissions
            .iter()
            .map(|(key, granted)| (key.as_str(), *granted)),
    );
    for o in &compilation.overrides {
        tracing::debug!(
            resource = %o.resource,
            action = %o.action,
            overridden = %o.overridden_key,
            winner = %o.winning_key,
            "permission overridden"
        );
    }

    let body = ApiKeyBody {
        account: request.scope.account.clone(),
        project: request.scope.project.clone(),
        environment: request.environment.clone().filter(|env| !env.is_empty()),
        identifier: request.identifier.clone(),
        name: request.name.clone(),
        permissions: compilation.matrix.clone(),
    };
    let response = InstructionDispatcher::new(api).create_api_key(&body)?;
    Ok(ApiKeyOutcome {
        response,
        compilation,
    })
}
