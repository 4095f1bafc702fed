//! Subcommand implementations

pub mod format;
pub mod lint;
pub mod parse;
