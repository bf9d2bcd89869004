//! CLI subcommand implementations.

pub mod migrate;
pub mod owner;
pub mod seed;
