//! Command abstractions.

/// Trait that all user intents implement.
///
/// A command is validated against the derived game state and, when accepted,
/// turns into exactly one event (or, for a reset, into clearing the log).
pub trait Command: std::fmt::Debug {
    /// The type name for this command (for logging).
    fn command_type(&self) -> &'static str;
}
