//! SimpleFlags Instruction Compiler
//!
//! Copyright 2025 Release Workshop Ltd
//! Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
//! See the LICENSE file in the project root for details.
//!
//! This library turns loosely typed command-line input (raw value strings,
//! `key:value` rules, `key:bool` permission grants) into the typed payloads
//! the SimpleFlags admin API expects, and decides whether a command creates
//! or patches. It performs no I/O itself: the service is reached through the
//! [`AdminApi`] trait.
//!
//! # Example
//!
//! ```rust
//! use simpleflags_compiler::{coerce, permissions, CoercedValue};
//!
//! assert_eq!(coerce("5+3").to_json(), serde_json::json!(8));
//! assert_eq!(coerce("dark-mode"), CoercedValue::Literal("dark-mode".to_string()));
//!
//! let matrix = permissions::compile([("flag", true), ("delete_flag", false)]);
//! assert!(matrix.flag.update);
//! assert!(!matrix.flag.delete);
//! ```

pub mod coerce;
pub mod dispatch;
pub mod error;
pub mod model;
pub mod permissions;
pub mod remote;
pub mod resolver;
pub mod rules;
pub mod workflow;

#[cfg(test)]
mod test_support;

pub use coerce::{coerce, coerce_pairs, CoercedValue};
pub use dispatch::InstructionDispatcher;
pub use error::{CompilerError, CompilerResult, RemoteError, RemoteResult, StatusCategory, UsageError};
pub use permissions::{PermissionCompilation, PermissionMatrix};
pub use remote::AdminApi;
pub use resolver::{resolve_flag, resolve_variable, EntityExistence, Route};
pub use rules::{FlagChanges, PatchInstructionSet, RuleArg};
