//! Command handlers for pokepipe CLI
//!
//! Each subcommand has its own module with handler functions.

pub mod cache;
pub mod configure;
pub mod explore;
pub mod fetch;
