//! sustindex-cli
//!
//! Terminal client for the sustainability index backend. Each page of the
//! web frontend is a subcommand; `take` runs the questionnaire interactively.

pub mod cli;
pub mod commands;
pub mod config;
pub mod input;
pub mod prompt;
pub mod take;
