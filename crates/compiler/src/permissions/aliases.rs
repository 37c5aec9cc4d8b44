/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */
//! Permission key spellings
//!
//! A key is either a resource-wide alias (`account`, `var`) or a resource and
//! action joined by `_` in either order (`create_flag`, `flag_create`).
//! `list` additionally accepts the plural resource after it (`list_flags`).

use super::matrix::{Action, Resource};

/// What a single permission key targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionKey {
    /// Every action of one resource
    Wide(Resource),
    /// Exactly one cell
    Single(Resource, Action),
}

fn wide_aliases(resource: Resource) -> &'static [&'static str] {
    match resource {
        Resource::Account => &["account"],
        Resource::Project => &["project"],
        Resource::Environment => &["env", "environment"],
        Resource::Key => &["key"],
        Resource::Variable => &["var", "variable"],
        Resource::Flag => &["flag"],
    }
}

/// Resource spellings accepted inside an action key
fn action_stems(resource: Resource) -> &'static [&'static str] {
    match resource {
        Resource::Account => &["account"],
        Resource::Project => &["project"],
        Resource::Environment => &["env"],
        Resource::Key => &["key"],
        Resource::Variable => &["var", "variable"],
        Resource::Flag => &["flag"],
    }
}

fn stem_resource(stem: &str) -> Option<Resource> {
    Resource::ALL
        .into_iter()
        .find(|&resource| action_stems(resource).contains(&stem))
}

fn action_named(name: &str) -> Option<Action> {
    Action::ALL.into_iter().find(|action| action.as_str() == name)
}

impl PermissionKey {
    /// Resolve a key, or `None` when the spelling is unknown.
    pub fn parse(key: &str) -> Option<Self> {
        if let Some(resource) = Resource::ALL
            .into_iter()
            .find(|&resource| wide_aliases(resource).contains(&key))
        {
            return Some(PermissionKey::Wide(resource));
        }

        let (first, second) = key.split_once('_')?;

        // action_resource
        if let Some(action) = action_named(first) {
            if let Some(resource) = stem_resource(second) {
                return Some(PermissionKey::Single(resource, action));
            }
            if action == Action::List {
                if let Some(resource) = second.strip_suffix('s').and_then(stem_resource) {
                    return Some(PermissionKey::Single(resource, action));
                }
            }
        }

        // resource_action
        let resource = stem_resource(first)?;
        let action = action_named(second)?;
        Some(PermissionKey::Single(resource, action))
    }
}

/// Every accepted spelling, used to suggest a correction for unknown keys.
pub fn known_keys() -> Vec<String> {
    let mut keys = Vec::new();
    for resource in Resource::ALL {
        keys.extend(wide_aliases(resource).iter().map(|alias| alias.to_string()));
        for stem in action_stems(resource) {
            for action in Action::ALL {
                keys.push(format!("{action}_{stem}"));
                keys.push(format!("{stem}_{action}"));
            }
            keys.push(format!("list_{stem}s"));
        }
    }
    keys
}
