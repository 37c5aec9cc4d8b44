/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */
//! Boundary to the SimpleFlags admin API
//!
//! The compiler never performs I/O itself. Everything it needs from the
//! service goes through [`AdminApi`]; the CLI supplies an HTTP
//! implementation and tests supply an in-memory one.

use crate::error::RemoteResult;
use crate::model::{
    Account, ApiKeyBody, ApiKeyResponse, CreateAccountBody, CreateFlagBody, Environment, Flag,
    LoginRequest, LoginResponse, PatchVariableBody, Project, ProjectScope, SignupBody, Tag,
    Variable, VariableScope,
};
use crate::rules::PatchInstructionSet;

/// Synchronous admin API operations.
///
/// Every method either returns the typed result or a
/// [`RemoteError`](crate::RemoteError) carrying the status category.
pub trait AdminApi {
    fn get_accounts(&self) -> RemoteResult<Vec<Account>>;
    fn create_account(&self, body: &CreateAccountBody) -> RemoteResult<Account>;
    fn delete_account(&self, account: &str) -> RemoteResult<()>;

    /// Environments of one account, or of every visible account
    fn get_environments(&self, account: Option<&str>) -> RemoteResult<Vec<Environment>>;
    fn create_environment(&self, body: &Environment) -> RemoteResult<()>;
    fn delete_environment(&self, account: &str, identifier: &str) -> RemoteResult<()>;

    fn get_projects(&self, account: Option<&str>) -> RemoteResult<Vec<Project>>;
    fn create_project(&self, body: &Project) -> RemoteResult<()>;
    fn delete_project(&self, account: &str, identifier: &str) -> RemoteResult<()>;

    fn get_flags(&self, scope: &ProjectScope) -> RemoteResult<Vec<Flag>>;
    fn get_flag(&self, scope: &ProjectScope, identifier: &str) -> RemoteResult<Flag>;
    fn create_flag(&self, body: &CreateFlagBody) -> RemoteResult<()>;
    fn patch_flag(
        &self,
        scope: &ProjectScope,
        identifier: &str,
        instructions: &PatchInstructionSet,
    ) -> RemoteResult<()>;
    fn delete_flag(&self, scope: &ProjectScope, identifier: &str) -> RemoteResult<()>;

    /// Tags of a project; `identifier` narrows to the tag with that name
    fn get_tags(&self, scope: &ProjectScope, identifier: Option<&str>) -> RemoteResult<Vec<Tag>>;

    /// Variables in scope; `identifier` narrows to one variable
    fn get_variables(
        &self,
        scope: &VariableScope,
        identifier: Option<&str>,
    ) -> RemoteResult<Vec<Variable>>;
    fn create_variable(&self, body: &Variable) -> RemoteResult<()>;
    fn patch_variable(
        &self,
        scope: &VariableScope,
        environment: &str,
        identifier: &str,
        body: &PatchVariableBody,
    ) -> RemoteResult<()>;
    fn delete_variable(&self, scope: &VariableScope, identifier: &str) -> RemoteResult<()>;

    fn create_api_key(&self, body: &ApiKeyBody) -> RemoteResult<ApiKeyResponse>;
    fn delete_api_key(
        &self,
        scope: &ProjectScope,
        environment: Option<&str>,
        identifier: &str,
    ) -> RemoteResult<()>;

    fn authenticate(&self, body: &LoginRequest) -> RemoteResult<LoginResponse>;
    fn signup(&self, body: &SignupBody) -> RemoteResult<()>;
}
