//! Shared helpers for commands

pub mod args;
pub mod config;
pub mod jwt;
pub mod output;
