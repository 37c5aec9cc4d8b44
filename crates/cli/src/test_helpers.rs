//! Test helpers for unit tests
//!
//! This module provides shared utilities for unit tests within the CLI crate.
//! For integration tests, see `tests/integration_test_helpers.rs`.

#[cfg(test)]
use std::ffi::OsString;

/// Guard for changing one environment variable in tests.
/// Automatically restores the previous value when dropped.
///
/// Tests using it must be `#[serial]`, the process environment is shared.
///
/// # Example
///
/// ```rust,no_run
/// use crate::test_helpers::EnvGuard;
///
/// let _home = EnvGuard::set("SF_HOME", "/tmp/sf");
/// // SF_HOME is restored when _home drops
/// ```
#[cfg(test)]
pub struct EnvGuard {
    name: &'static str,
    original: Option<OsString>,
}

#[cfg(test)]
impl EnvGuard {
    pub fn set(name: &'static str, value: &str) -> Self {
        let original = std::env::var_os(name);
        std::env::set_var(name, value);
        EnvGuard { name, original }
    }

    pub fn remove(name: &'static str) -> Self {
        let original = std::env::var_os(name);
        std::env::remove_var(name);
        EnvGuard { name, original }
    }
}

#[cfg(test)]
impl Drop for EnvGuard {
    fn drop(&mut self) {
        match &self.original {
            Some(value) => std::env::set_var(self.name, value),
            None => std::env::remove_var(self.name),
        }
    }
}
