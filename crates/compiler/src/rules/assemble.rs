/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */
//! Assembly of creation configurations and patch instruction sets

use super::instructions::{
    ConfigurationInstruction, EnvironmentValue, PatchInstructionSet, Rule, RuleArg,
    RuleInstruction,
};
use crate::coerce::coerce;
use crate::error::{CompilerError, CompilerResult, UsageError};
use std::collections::BTreeMap;

/// Changes an operator asked for on a flag, as typed on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub permanent: Option<bool>,
    pub deprecated: Option<bool>,
    /// Target environment for `on`, `off`, `off_value` and `rules`
    pub environment: Option<String>,
    pub on: bool,
    pub off: bool,
    pub off_value: Option<String>,
    pub rules: Vec<RuleArg>,
    pub tags: Vec<String>,
}

fn supplied(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}

impl FlagChanges {
    /// Nothing to create or patch; the command only wants to look at the flag.
    pub fn is_empty(&self) -> bool {
        supplied(&self.name).is_none()
            && supplied(&self.description).is_none()
            && self.permanent.is_none()
            && self.deprecated.is_none()
            && self.tags.is_empty()
            && !self.touches_environment()
    }

    /// Whether any environment-scoped change was requested
    pub fn touches_environment(&self) -> bool {
        self.on || self.off || supplied(&self.off_value).is_some() || !self.rules.is_empty()
    }

    /// `on` and `off` cannot be combined in one command.
    pub fn check_on_off(&self) -> Result<(), UsageError> {
        if self.on && self.off {
            return Err(UsageError::ConflictingOnOff);
        }
        Ok(())
    }
}

/// Coerce every rule value, keeping input order.
pub fn coerce_rules(rules: &[RuleArg]) -> Vec<Rule> {
    rules
        .iter()
        .map(|rule| Rule {
            expression: rule.expression.clone(),
            value: coerce(&rule.value),
        })
        .collect()
}

/// Build the single configuration every environment receives on creation.
///
/// A missing off-value is coerced from the empty string, which stays an
/// empty string literal.
pub fn assemble_configuration(off_value: Option<&str>, rules: &[RuleArg]) -> ConfigurationInstruction {
    ConfigurationInstruction {
        off_value: coerce(off_value.unwrap_or_default()),
        rules: coerce_rules(rules),
    }
}

/// Replicate one configuration to every environment of the account.
///
/// # Errors
///
/// Returns `NoEnvironmentsDefined` when `environments` is empty.
pub fn assemble_creation<S: AsRef<str>>(
    account: &str,
    off_value: Option<&str>,
    rules: &[RuleArg],
    environments: &[S],
) -> CompilerResult<BTreeMap<String, ConfigurationInstruction>> {
    if environments.is_empty() {
        return Err(CompilerError::NoEnvironmentsDefined {
            account: account.to_string(),
        });
    }
    let configuration = assemble_configuration(off_value, rules);
    Ok(environments
        .iter()
        .map(|env| (env.as_ref().to_string(), configuration.clone()))
        .collect())
}

/// Translate requested changes into a sparse patch for an existing flag.
///
/// # Errors
///
/// `ConflictingOnOff` when both `on` and `off` are set, and
/// `MissingEnvironment` when an environment-scoped change has no environment.
pub fn assemble_patch(changes: &FlagChanges) -> Result<PatchInstructionSet, UsageError> {
    changes.check_on_off()?;

    let mut instructions = PatchInstructionSet {
        name: supplied(&changes.name),
        description: supplied(&changes.description),
        permanent: changes.permanent,
        deprecated: changes.deprecated,
        add_tags: (!changes.tags.is_empty()).then(|| changes.tags.clone()),
        ..PatchInstructionSet::default()
    };

    if !changes.touches_environment() {
        return Ok(instructions);
    }

    let environment = changes
        .environment
        .as_ref()
        .filter(|env| !env.is_empty())
        .ok_or(UsageError::MissingEnvironment)?;

    if let Some(off_value) = supplied(&changes.off_value) {
        instructions.set_off_value = Some(EnvironmentValue {
            environment: environment.clone(),
            value: coerce(&off_value),
        });
    }

    if changes.on || changes.off {
        instructions.set_on = Some(EnvironmentValue {
            environment: environment.clone(),
            value: changes.on,
        });
    }

    instructions.rules = changes
        .rules
        .iter()
        .map(|rule| RuleInstruction {
            environment: environment.clone(),
            expression: rule.expression.clone(),
            value: coerce(&rule.value),
        })
        .collect();

    Ok(instructions)
}
