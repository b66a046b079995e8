//! Subcommand implementations

pub mod actions;
pub mod arn;
pub mod expand;
pub mod resources;
pub mod schema;
pub mod services;
pub mod validate;
