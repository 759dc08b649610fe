//! CLI subcommands

pub mod seed;
pub mod serve;
