/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */
//! Hand-off of fully built payloads to the admin API
//!
//! The dispatcher makes no decisions. It forwards one finished body per call
//! and relays the result or error unchanged: no retries, no rewriting.

use crate::error::RemoteResult;
use crate::model::{
    ApiKeyBody, ApiKeyResponse, CreateFlagBody, PatchVariableBody, ProjectScope, Variable,
    VariableScope,
};
use crate::remote::AdminApi;
use crate::rules::PatchInstructionSet;

pub struct InstructionDispatcher<'a, A: AdminApi + ?Sized> {
    api: &'a A,
}

impl<'a, A: AdminApi + ?Sized> InstructionDispatcher<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self { api }
    }

    pub fn create_flag(&self, body: &CreateFlagBody) -> RemoteResult<()> {
        tracing::debug!(
            identifier = %body.identifier,
            environments = body.environments.len(),
            "dispatching flag creation"
        );
        self.api.create_flag(body)
    }

    pub fn patch_flag(
        &self,
        scope: &ProjectScope,
        identifier: &str,
        instructions: &PatchInstructionSet,
    ) -> RemoteResult<()> {
        tracing::debug!(identifier, rules = instructions.rules.len(), "dispatching flag patch");
        self.api.patch_flag(scope, identifier, instructions)
    }

    pub fn create_variable(&self, body: &Variable) -> RemoteResult<()> {
        tracing::debug!(identifier = %body.identifier, "dispatching variable creation");
        self.api.create_variable(body)
    }

    pub fn patch_variable(
        &self,
        scope: &VariableScope,
        environment: &str,
        identifier: &str,
        body: &PatchVariableBody,
    ) -> RemoteResult<()> {
        tracing::debug!(identifier, environment, "dispatching variable patch");
        self.api.patch_variable(scope, environment, identifier, body)
    }

    pub fn create_api_key(&self, body: &ApiKeyBody) -> RemoteResult<ApiKeyResponse> {
        tracing::debug!(identifier = %body.identifier, "dispatching API key creation");
        self.api.create_api_key(body)
    }
}
