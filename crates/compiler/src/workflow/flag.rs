/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */
//! Flag create-or-patch

use super::require;
use crate::dispatch::InstructionDispatcher;
use crate::error::{CompilerResult, UsageError};
use crate::model::{CreateFlagBody, ProjectScope};
use crate::remote::AdminApi;
use crate::resolver::{resolve_flag, EntityExistence};
use crate::rules::{assemble_creation, assemble_patch, FlagChanges, PatchInstructionSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagRequest {
    pub scope: ProjectScope,
    pub identifier: String,
    pub changes: FlagChanges,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FlagOutcome {
    Created {
        environments: Vec<String>,
    },
    Patched {
        existence: EntityExistence,
        instructions: PatchInstructionSet,
    },
}

/// Create the flag, or patch it when the identifier already resolves.
///
/// # Errors
///
/// Usage errors are raised before any mutating call. `on` together with
/// `off` is rejected before any network call at all; a missing environment
/// for an environment-scoped change only matters once the patch route is
/// chosen, because creation copies rules to every environment.
pub fn upsert_flag<A: AdminApi + ?Sized>(
    api: &A,
    request: &FlagRequest,
) -> CompilerResult<FlagOutcome> {
    require(&request.scope.account, "account", "-a or --acc")?;
    require(&request.scope.project, "project", "-p or --project")?;
    require(&request.identifier, "flag identifier", "the positional argument")?;
    request.changes.check_on_off()?;

    let patch = assemble_patch(&request.changes);

    let existence = resolve_flag(api, &request.scope, &request.identifier)?;
    match existence {
        EntityExistence::NotFound => {
            let environments = create(api, request)?;
            Ok(FlagOutcome::Created { environments })
        }
        EntityExistence::ExistsDirect | EntityExistence::ExistsByTag { .. } => {
            if let EntityExistence::ExistsByTag { tag } = &existence {
                tracing::warn!(
                    tag = %tag,
                    "'{tag}' is not a flag identifier but matches a tag; patching every flag tagged '{tag}'"
                );
            }
            let instructions = patch?;
            InstructionDispatcher::new(api).patch_flag(
                &request.scope,
                &request.identifier,
                &instructions,
            )?;
            Ok(FlagOutcome::Patched {
                existence,
                instructions,
            })
        }
    }
}

fn create<A: AdminApi + ?Sized>(api: &A, request: &FlagRequest) -> CompilerResult<Vec<String>> {
    let changes = &request.changes;
    let name = changes
        .name
        .as_ref()
        .filter(|name| !name.is_empty())
        .ok_or(UsageError::MissingField {
            field: "flag name",
            hint: "-n or --name",
        })?;

    let environments: Vec<String> = api
        .get_environments(Some(&request.scope.account))?
        .into_iter()
        .map(|env| env.identifier)
        .collect();
    let configurations = assemble_creation(
        &request.scope.account,
        changes.off_value.as_deref(),
        &changes.rules,
        &environments,
    )?;

    let body = CreateFlagBody {
        account: request.scope.account.clone(),
        project: request.scope.project.clone(),
        identifier: request.identifier.clone(),
        name: name.clone(),
        description: changes.description.clone().filter(|d| !d.is_empty()),
        permanent: changes.permanent.unwrap_or(false),
        environments: configurations,
        tags: changes.tags.clone(),
    };
    InstructionDispatcher::new(api).create_flag(&body)?;
    Ok(environments)
}
