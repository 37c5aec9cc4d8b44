/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */
//! In-memory admin API for unit tests
//!
//! Records every call so tests can assert which requests were issued and,
//! in particular, that no mutation reached the service.

use crate::error::{RemoteError, RemoteResult};
use crate::model::{
    Account, ApiKeyBody, ApiKeyResponse, CreateAccountBody, CreateFlagBody, Environment, Flag,
    LoginRequest, LoginResponse, PatchVariableBody, Project, ProjectScope, SignupBody, Tag,
    Variable, VariableScope,
};
use crate::remote::AdminApi;
use crate::rules::PatchInstructionSet;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};

/// Failure injected for one operation
#[derive(Debug, Clone, Copy)]
pub enum Fault {
    Timeout,
    Unauthorized,
    Conflict,
    NotFound,
}

impl Fault {
    fn error(self, operation: &str) -> RemoteError {
        match self {
            Fault::Timeout => RemoteError::Timeout(format!("{operation} exceeded deadline")),
            Fault::Unauthorized => RemoteError::Unauthorized("invalid token".to_string()),
            Fault::Conflict => RemoteError::Conflict(format!("{operation} conflicted")),
            Fault::NotFound => RemoteError::NotFound(operation.to_string()),
        }
    }
}

#[derive(Default)]
pub struct FakeAdminApi {
    flags: Vec<Flag>,
    tags: Vec<(ProjectScope, Tag)>,
    environments: Vec<Environment>,
    variables: Vec<Variable>,
    faults: HashMap<&'static str, Fault>,
    calls: RefCell<Vec<String>>,
    pub created_flags: RefCell<Vec<CreateFlagBody>>,
    pub flag_patches: RefCell<Vec<(String, PatchInstructionSet)>>,
    pub created_variables: RefCell<Vec<Variable>>,
    pub variable_patches: RefCell<Vec<(String, String, PatchVariableBody)>>,
    pub api_keys: RefCell<Vec<ApiKeyBody>>,
    pub created_environments: RefCell<Vec<Environment>>,
    pub created_projects: RefCell<Vec<Project>>,
}

impl FakeAdminApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_flag(mut self, account: &str, project: &str, identifier: &str) -> Self {
        self.flags.push(Flag {
            account: account.to_string(),
            project: project.to_string(),
            identifier: identifier.to_string(),
            name: identifier.to_string(),
            ..Flag::default()
        });
        self
    }

    pub fn with_tag(mut self, account: &str, project: &str, name: &str) -> Self {
        self.tags.push((
            ProjectScope::new(account, project),
            Tag {
                identifier: name.to_string(),
                name: name.to_string(),
                flags: Vec::new(),
            },
        ));
        self
    }

    pub fn with_environments(mut self, account: &str, identifiers: &[&str]) -> Self {
        for identifier in identifiers {
            self.environments.push(Environment {
                account: account.to_string(),
                identifier: identifier.to_string(),
                name: identifier.to_string(),
                ..Environment::default()
            });
        }
        self
    }

    pub fn with_variable(mut self, account: &str, project: Option<&str>, identifier: &str) -> Self {
        self.variables.push(Variable {
            account: account.to_string(),
            project: project.map(str::to_string),
            identifier: identifier.to_string(),
            description: String::new(),
            value: BTreeMap::new(),
        });
        self
    }

    pub fn failing(mut self, operation: &'static str, fault: Fault) -> Self {
        self.faults.insert(operation, fault);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Calls that would have changed state on the service
    pub fn mutations(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|call| {
                call.starts_with("create_") || call.starts_with("patch_") || call.starts_with("delete_")
            })
            .collect()
    }

    fn record(&self, operation: &'static str, detail: &str) -> RemoteResult<()> {
        let call = if detail.is_empty() {
            operation.to_string()
        } else {
            format!("{operation} {detail}")
        };
        self.calls.borrow_mut().push(call);
        match self.faults.get(operation) {
            Some(fault) => Err(fault.error(operation)),
            None => Ok(()),
        }
    }
}

impl AdminApi for FakeAdminApi {
    fn get_accounts(&self) -> RemoteResult<Vec<Account>> {
        self.record("get_accounts", "")?;
        Ok(Vec::new())
    }

    fn create_account(&self, body: &CreateAccountBody) -> RemoteResult<Account> {
        self.record("create_account", &body.name)?;
        Ok(Account {
            identifier: body.name.to_lowercase(),
            name: body.name.clone(),
            owner: String::new(),
        })
    }

    fn delete_account(&self, account: &str) -> RemoteResult<()> {
        self.record("delete_account", account)
    }

    fn get_environments(&self, account: Option<&str>) -> RemoteResult<Vec<Environment>> {
        self.record("get_environments", account.unwrap_or("*"))?;
        Ok(self
            .environments
            .iter()
            .filter(|env| account.map_or(true, |acc| env.account == acc))
            .cloned()
            .collect())
    }

    fn create_environment(&self, body: &Environment) -> RemoteResult<()> {
        self.record("create_environment", &body.identifier)?;
        self.created_environments.borrow_mut().push(body.clone());
        Ok(())
    }

    fn delete_environment(&self, _account: &str, identifier: &str) -> RemoteResult<()> {
        self.record("delete_environment", identifier)
    }

    fn get_projects(&self, account: Option<&str>) -> RemoteResult<Vec<Project>> {
        self.record("get_projects", account.unwrap_or("*"))?;
        Ok(Vec::new())
    }

    fn create_project(&self, body: &Project) -> RemoteResult<()> {
        self.record("create_project", &body.identifier)?;
        self.created_projects.borrow_mut().push(body.clone());
        Ok(())
    }

    fn delete_project(&self, _account: &str, identifier: &str) -> RemoteResult<()> {
        self.record("delete_project", identifier)
    }

    fn get_flags(&self, scope: &ProjectScope) -> RemoteResult<Vec<Flag>> {
        self.record("get_flags", "")?;
        Ok(self
            .flags
            .iter()
            .filter(|f| f.account == scope.account && f.project == scope.project)
            .cloned()
            .collect())
    }

    fn get_flag(&self, scope: &ProjectScope, identifier: &str) -> RemoteResult<Flag> {
        self.record("get_flag", identifier)?;
        self.flags
            .iter()
            .find(|f| {
                f.account == scope.account
                    && f.project == scope.project
                    && f.identifier == identifier
            })
            .cloned()
            .ok_or_else(|| RemoteError::NotFound(format!("flag {identifier}")))
    }

    fn create_flag(&self, body: &CreateFlagBody) -> RemoteResult<()> {
        self.record("create_flag", &body.identifier)?;
        self.created_flags.borrow_mut().push(body.clone());
        Ok(())
    }

    fn patch_flag(
        &self,
        _scope: &ProjectScope,
        identifier: &str,
        instructions: &PatchInstructionSet,
    ) -> RemoteResult<()> {
        self.record("patch_flag", identifier)?;
        self.flag_patches
            .borrow_mut()
            .push((identifier.to_string(), instructions.clone()));
        Ok(())
    }

    fn delete_flag(&self, _scope: &ProjectScope, identifier: &str) -> RemoteResult<()> {
        self.record("delete_flag", identifier)
    }

    fn get_tags(&self, scope: &ProjectScope, identifier: Option<&str>) -> RemoteResult<Vec<Tag>> {
        self.record("get_tags", identifier.unwrap_or("*"))?;
        Ok(self
            .tags
            .iter()
            .filter(|(tag_scope, tag)| {
                tag_scope == scope && identifier.map_or(true, |id| tag.identifier == id)
            })
            .map(|(_, tag)| tag.clone())
            .collect())
    }

    fn get_variables(
        &self,
        scope: &VariableScope,
        identifier: Option<&str>,
    ) -> RemoteResult<Vec<Variable>> {
        self.record("get_variables", identifier.unwrap_or("*"))?;
        Ok(self
            .variables
            .iter()
            .filter(|v| {
                v.account == scope.account
                    && v.project == scope.project
                    && identifier.map_or(true, |id| v.identifier == id)
            })
            .cloned()
            .collect())
    }

    fn create_variable(&self, body: &Variable) -> RemoteResult<()> {
        self.record("create_variable", &body.identifier)?;
        self.created_variables.borrow_mut().push(body.clone());
        Ok(())
    }

    fn patch_variable(
        &self,
        _scope: &VariableScope,
        environment: &str,
        identifier: &str,
        body: &PatchVariableBody,
    ) -> RemoteResult<()> {
        self.record("patch_variable", &format!("{environment} {identifier}"))?;
        self.variable_patches.borrow_mut().push((
            environment.to_string(),
            identifier.to_string(),
            body.clone(),
        ));
        Ok(())
    }

    fn delete_variable(&self, _scope: &VariableScope, identifier: &str) -> RemoteResult<()> {
        self.record("delete_variable", identifier)
    }

    fn create_api_key(&self, body: &ApiKeyBody) -> RemoteResult<ApiKeyResponse> {
        self.record("create_api_key", &body.identifier)?;
        self.api_keys.borrow_mut().push(body.clone());
        Ok(ApiKeyResponse {
            key: format!("sf-{}", body.identifier),
            identifier: body.identifier.clone(),
        })
    }

    fn delete_api_key(
        &self,
        _scope: &ProjectScope,
        _environment: Option<&str>,
        identifier: &str,
    ) -> RemoteResult<()> {
        self.record("delete_api_key", identifier)
    }

    fn authenticate(&self, body: &LoginRequest) -> RemoteResult<LoginResponse> {
        self.record("authenticate", &body.email)?;
        Ok(LoginResponse {
            token: "token".to_string(),
        })
    }

    fn signup(&self, body: &SignupBody) -> RemoteResult<()> {
        self.record("signup", &body.email)
    }
}
