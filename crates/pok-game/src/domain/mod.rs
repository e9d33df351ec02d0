//! Domain layer: pure functions and value types, no I/O.

pub mod commands;
pub mod projection;
pub mod rules;
pub mod state;
pub mod zones;
