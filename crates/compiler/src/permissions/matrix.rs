/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */
//! Resource × action permission grid carried by API keys

use serde::{Deserialize, Serialize};
use std::fmt;

/// Rows of the permission matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Resource {
    Account,
    Project,
    Environment,
    Key,
    Variable,
    Flag,
}

impl Resource {
    pub const ALL: [Resource; 6] = [
        Resource::Account,
        Resource::Project,
        Resource::Environment,
        Resource::Key,
        Resource::Variable,
        Resource::Flag,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Resource::Account => "account",
            Resource::Project => "project",
            Resource::Environment => "environment",
            Resource::Key => "key",
            Resource::Variable => "variable",
            Resource::Flag => "flag",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Columns of the permission matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Action {
    Create,
    Update,
    List,
    View,
    Delete,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::Create,
        Action::Update,
        Action::List,
        Action::View,
        Action::Delete,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Update => "update",
            Action::List => "list",
            Action::View => "view",
            Action::Delete => "delete",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the matrix. Absent permissions are `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionSet {
    #[serde(default)]
    pub create: bool,
    #[serde(default)]
    pub update: bool,
    #[serde(default)]
    pub list: bool,
    #[serde(default)]
    pub view: bool,
    #[serde(default)]
    pub delete: bool,
}

impl ActionSet {
    pub fn get(&self, action: Action) -> bool {
        match action {
            Action::Create => self.create,
            Action::Update => self.update,
            Action::List => self.list,
            Action::View => self.view,
            Action::Delete => self.delete,
        }
    }

    pub fn set(&mut self, action: Action, value: bool) {
        let cell = match action {
            Action::Create => &mut self.create,
            Action::Update => &mut self.update,
            Action::List => &mut self.list,
            Action::View => &mut self.view,
            Action::Delete => &mut self.delete,
        };
        *cell = value;
    }

    pub fn set_all(&mut self, value: bool) {
        for action in Action::ALL {
            self.set(action, value);
        }
    }
}

/// Fixed resource × action grid. Every cell defaults to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionMatrix {
    #[serde(default)]
    pub account: ActionSet,
    #[serde(default)]
    pub project: ActionSet,
    #[serde(default)]
    pub environment: ActionSet,
    #[serde(default)]
    pub key: ActionSet,
    #[serde(default)]
    pub variable: ActionSet,
    #[serde(default)]
    pub flag: ActionSet,
}

impl PermissionMatrix {
    pub fn row(&self, resource: Resource) -> &ActionSet {
        match resource {
            Resource::Account => &self.account,
            Resource::Project => &self.project,
            Resource::Environment => &self.environment,
            Resource::Key => &self.key,
            Resource::Variable => &self.variable,
            Resource::Flag => &self.flag,
        }
    }

    pub fn row_mut(&mut self, resource: Resource) -> &mut ActionSet {
        match resource {
            Resource::Account => &mut self.account,
            Resource::Project => &mut self.project,
            Resource::Environment => &mut self.environment,
            Resource::Key => &mut self.key,
            Resource::Variable => &mut self.variable,
            Resource::Flag => &mut self.flag,
        }
    }

    pub fn get(&self, resource: Resource, action: Action) -> bool {
        self.row(resource).get(action)
    }

    /// Cells that are granted, in row then column order
    pub fn granted(&self) -> Vec<(Resource, Action)> {
        Resource::ALL
            .iter()
            .flat_map(|&resource| {
                Action::ALL
                    .iter()
                    .filter(move |&&action| self.get(resource, action))
                    .map(move |&action| (resource, action))
            })
            .collect()
    }
}
