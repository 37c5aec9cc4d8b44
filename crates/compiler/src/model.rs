/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */
//! Entities and request bodies exchanged with the SimpleFlags service

use crate::coerce::CoercedValue;
use crate::permissions::PermissionMatrix;
use crate::rules::ConfigurationInstruction;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Account + project pair most entities live under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectScope {
    pub account: String,
    pub project: String,
}

impl ProjectScope {
    pub fn new(account: impl Into<String>, project: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            project: project.into(),
        }
    }
}

/// Variables are either project scoped or global to the account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableScope {
    pub account: String,
    pub project: Option<String>,
}

impl VariableScope {
    pub fn project(account: impl Into<String>, project: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            project: Some(project.into()),
        }
    }

    pub fn global(account: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            project: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub identifier: String,
    pub name: String,
    #[serde(default)]
    pub owner: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateAccountBody {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    pub account: String,
    pub identifier: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub production: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub account: String,
    pub identifier: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flag {
    #[serde(default)]
    pub account: String,
    #[serde(default)]
    pub project: String,
    pub identifier: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub permanent: bool,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub version: i64,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub environments: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub identifier: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub flags: Vec<String>,
}

/// Full body sent when a flag does not exist yet
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFlagBody {
    pub account: String,
    pub project: String,
    pub identifier: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub permanent: bool,
    pub environments: BTreeMap<String, ConfigurationInstruction>,
    pub tags: Vec<String>,
}

/// A variable, keyed by environment identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    pub account: String,
    #[serde(default)]
    pub project: Option<String>,
    pub identifier: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub value: BTreeMap<String, CoercedValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatchVariableBody {
    pub value: CoercedValue,
}

/// API key creation body; carries the compiled permission matrix
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyBody {
    pub account: String,
    pub project: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    pub identifier: String,
    pub name: String,
    pub permissions: PermissionMatrix,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyResponse {
    pub key: String,
    #[serde(default)]
    pub identifier: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupBody {
    pub email: String,
    pub password: String,
    pub repeat_password: String,
}
