//! CLI command handlers
//!
//! This module contains the command handlers for the clio CLI.
//! Each subcommand is implemented in its own module.

pub mod config;
pub mod export;
pub mod generate;
pub mod helpers;
pub mod parse;
