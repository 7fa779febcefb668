//! CLI subcommand implementations.

pub mod report;
pub mod submit;
mod util;
