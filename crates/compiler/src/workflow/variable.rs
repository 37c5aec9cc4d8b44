/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */
//! Variable create-or-patch

use super::require;
use crate::coerce::{coerce_pairs, CoercedValue};
use crate::dispatch::InstructionDispatcher;
use crate::error::{CompilerError, CompilerResult};
use crate::model::{PatchVariableBody, Variable, VariableScope};
use crate::remote::AdminApi;
use crate::resolver::{resolve_variable, Route};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableRequest {
    pub scope: VariableScope,
    pub identifier: String,
    pub description: Option<String>,
    /// `(environment, raw value)` pairs in command-line order
    pub values: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum VariableOutcome {
    Created {
        values: BTreeMap<String, CoercedValue>,
    },
    /// Environments whose value was patched, in order
    Patched { environments: Vec<String> },
}

pub fn upsert_variable<A: AdminApi + ?Sized>(
    api: &A,
    request: &VariableRequest,
) -> CompilerResult<VariableOutcome> {
    require(&request.scope.account, "account", "-a or --acc")?;
    require(&request.identifier, "variable identifier", "the positional argument")?;

    let values = coerce_pairs(
        request
            .values
            .iter()
            .map(|(env, raw)| (env.as_str(), raw.as_str())),
    );

    let dispatcher = InstructionDispatcher::new(api);
    match resolve_variable(api, &request.scope, &request.identifier)?.route() {
        Route::Patch => {
            if request.description.as_deref().is_some_and(|d| !d.is_empty()) {
                tracing::warn!("description is only applied when a variable is created");
            }
            let mut environments = Vec::new();
            for (environment, value) in values {
                dispatcher.patch_variable(
                    &request.scope,
                    &environment,
                    &request.identifier,
                    &PatchVariableBody { value },
                )?;
                environments.push(environment);
            }
            Ok(VariableOutcome::Patched { environments })
        }
        Route::Create => {
            let known: Vec<String> = api
                .get_environments(Some(&request.scope.account))?
                .into_iter()
                .map(|env| env.identifier)
                .collect();
            if known.is_empty() {
                return Err(CompilerError::NoEnvironmentsDefined {
                    account: request.scope.account.clone(),
                });
            }
            for (environment, _) in &values {
                if !known.contains(environment) {
                    tracing::warn!(
                        environment = %environment,
                        "value targets an environment the account does not define"
                    );
                }
            }

            let values: BTreeMap<String, CoercedValue> = values.into_iter().collect();
            let body = Variable {
                account: request.scope.account.clone(),
                project: request.scope.project.clone(),
                identifier: request.identifier.clone(),
                description: request.description.clone().unwrap_or_default(),
                value: values.clone(),
            };
            dispatcher.create_variable(&body)?;
            Ok(VariableOutcome::Created { values })
        }
    }
}
