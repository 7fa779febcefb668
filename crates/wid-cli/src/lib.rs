//! "What I did" CLI library.
//!
//! This crate provides the CLI interface for wid: argument parsing,
//! configuration and the report/submit commands.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands};
pub use config::{Config, TempoConfig};
