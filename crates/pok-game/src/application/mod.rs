//! Application layer: command handlers, queries, and the scorekeeper facade.

pub mod command_handlers;
pub mod query_handlers;
pub mod scorekeeper;
