//! Subcommand implementations

pub mod config;
pub mod diag;
pub mod recommend;
