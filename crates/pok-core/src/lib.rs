//! Pok core: shared domain abstractions.
//!
//! This crate defines the event envelope, error kinds, and the clock and
//! storage seams that the event store and the game context depend on. It
//! contains no infrastructure code.

pub mod clock;
pub mod command;
pub mod error;
pub mod event;
pub mod player;
pub mod storage;
