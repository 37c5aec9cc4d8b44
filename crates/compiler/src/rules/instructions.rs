/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */
//! Creation configurations and patch instructions for flags

use crate::coerce::CoercedValue;
use serde::{Deserialize, Serialize};

/// A rule as typed on the command line, before coercion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleArg {
    pub expression: String,
    pub value: String,
}

impl RuleArg {
    pub fn new(expression: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub expression: String,
    pub value: CoercedValue,
}

/// Per-environment configuration sent when a flag is created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationInstruction {
    pub off_value: CoercedValue,
    pub rules: Vec<Rule>,
}

/// A value targeted at one environment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnvironmentValue<T> {
    pub environment: String,
    pub value: T,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleInstruction {
    pub environment: String,
    pub expression: String,
    pub value: CoercedValue,
}

/// Sparse update for an existing flag.
///
/// Fields left as `None` are omitted from the body so they never overwrite
/// state on the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchInstructionSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permanent: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_on: Option<EnvironmentValue<bool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_off_value: Option<EnvironmentValue<CoercedValue>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<RuleInstruction>,
}

impl PatchInstructionSet {
    /// True when the patch would change nothing
    pub fn is_empty(&self) -> bool {
        *self == PatchInstructionSet::default()
    }
}
