/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */
//! Permission compilation for API keys
//!
//! Operators describe permissions tersely as `key:bool` pairs. Compilation
//! runs in two passes: every resource-wide alias is applied first, then every
//! single-action key. A single-action key therefore always overrides a
//! resource-wide key for its cell, whatever order the pairs arrived in.
//! Within one pass the later pair wins.

mod aliases;
mod matrix;

#[cfg(test)]
mod tests;

pub use aliases::{known_keys, PermissionKey};
pub use matrix::{Action, ActionSet, PermissionMatrix, Resource};

use std::collections::HashMap;

/// A cell whose value was written more than once with different values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionOverride {
    pub resource: Resource,
    pub action: Action,
    /// Key that wrote the discarded value
    pub overridden_key: String,
    /// Key whose value was kept
    pub winning_key: String,
    pub value: bool,
}

/// Matrix plus everything the operator should be told about
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionCompilation {
    pub matrix: PermissionMatrix,
    /// Keys that matched no known spelling, in input order
    pub ignored_keys: Vec<String>,
    pub overrides: Vec<PermissionOverride>,
}

/// Compile permission pairs into a matrix.
pub fn compile<K, I>(pairs: I) -> PermissionMatrix
where
    K: AsRef<str>,
    I: IntoIterator<Item = (K, bool)>,
{
    compile_with_report(pairs).matrix
}

/// Compile permission pairs and report ignored keys and overridden cells.
pub fn compile_with_report<K, I>(pairs: I) -> PermissionCompilation
where
    K: AsRef<str>,
    I: IntoIterator<Item = (K, bool)>,
{
    let mut wide = Vec::new();
    let mut single = Vec::new();
    let mut ignored_keys = Vec::new();

    for (key, value) in pairs {
        let key = key.as_ref();
        match PermissionKey::parse(key) {
            Some(PermissionKey::Wide(resource)) => wide.push((key.to_string(), resource, value)),
            Some(PermissionKey::Single(resource, action)) => {
                single.push((key.to_string(), resource, action, value))
            }
            None => ignored_keys.push(key.to_string()),
        }
    }

    let mut matrix = PermissionMatrix::default();
    let mut writers: HashMap<(Resource, Action), (String, bool)> = HashMap::new();
    let mut overrides = Vec::new();

    let mut write = |matrix: &mut PermissionMatrix,
                     key: &str,
                     resource: Resource,
                     action: Action,
                     value: bool| {
        matrix.row_mut(resource).set(action, value);
        if let Some((previous_key, previous_value)) =
            writers.insert((resource, action), (key.to_string(), value))
        {
            if previous_value != value {
                overrides.push(PermissionOverride {
                    resource,
                    action,
                    overridden_key: previous_key,
                    winning_key: key.to_string(),
                    value,
                });
            }
        }
    };

    for (key, resource, value) in &wide {
        for action in Action::ALL {
            write(&mut matrix, key, *resource, action, *value);
        }
    }
    for (key, resource, action, value) in &single {
        write(&mut matrix, key, *resource, *action, *value);
    }

    for key in &ignored_keys {
        tracing::debug!(key = %key, "ignoring unknown permission key");
    }

    PermissionCompilation {
        matrix,
        ignored_keys,
        overrides,
    }
}
