//! CLI subcommand implementations.

pub mod bills;
pub mod committees;
pub mod events;
pub mod legislators;
pub mod states;
