//! Pok scorekeeper game context.
//!
//! Responsible for resolving where a pok landed, folding the event log into
//! the full game state, and validating player commands against that state
//! before they are appended to the log.

pub mod application;
pub mod domain;
