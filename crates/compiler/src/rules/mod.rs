/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */
//! Rule and configuration assembly for flags
//!
//! A new flag gets one configuration (off-value plus ordered rules) copied
//! to every environment of its account. An existing flag gets a sparse
//! patch whose environment-scoped parts all target the single environment
//! named on the command line. Rule order is kept exactly as given.

mod assemble;
mod instructions;

#[cfg(test)]
mod tests;

pub use assemble::{
    assemble_configuration, assemble_creation, assemble_patch, coerce_rules, FlagChanges,
};
pub use instructions::{
    ConfigurationInstruction, EnvironmentValue, PatchInstructionSet, Rule, RuleArg,
    RuleInstruction,
};
