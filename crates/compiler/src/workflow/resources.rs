/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */
//! Accounts, environments and projects
//!
//! These have no create-or-patch routing; they are validated and sent.

use super::require;
use crate::error::CompilerResult;
use crate::model::{Account, CreateAccountBody, Environment, Project};
use crate::remote::AdminApi;

pub fn create_account<A: AdminApi + ?Sized>(api: &A, name: &str) -> CompilerResult<Account> {
    require(name, "account name", "-n or --name")?;
    Ok(api.create_account(&CreateAccountBody {
        name: name.to_string(),
    })?)
}

pub fn create_environment<A: AdminApi + ?Sized>(
    api: &A,
    environment: &Environment,
) -> CompilerResult<()> {
    require(&environment.account, "account", "-a or --acc")?;
    require(&environment.identifier, "environment identifier", "the positional argument")?;
    require(&environment.name, "environment name", "-n or --name")?;
    Ok(api.create_environment(environment)?)
}

pub fn remove_environment<A: AdminApi + ?Sized>(
    api: &A,
    account: &str,
    identifier: &str,
) -> CompilerResult<()> {
    require(account, "account", "-a or --acc")?;
    require(identifier, "environment identifier", "the positional argument")?;
    Ok(api.delete_environment(account, identifier)?)
}

pub fn create_project<A: AdminApi + ?Sized>(api: &A, project: &Project) -> CompilerResult<()> {
    require(&project.account, "account", "-a or --acc")?;
    require(&project.identifier, "project identifier", "the positional argument")?;
    require(&project.name, "project name", "-n or --name")?;
    Ok(api.create_project(project)?)
}

pub fn remove_project<A: AdminApi + ?Sized>(
    api: &A,
    account: &str,
    identifier: &str,
) -> CompilerResult<()> {
    require(account, "account", "-a or --acc")?;
    require(identifier, "project identifier", "the positional argument")?;
    Ok(api.delete_project(account, identifier)?)
}
