//! Shared test fakes and event builders for the Pok scorekeeper.

mod clock;
pub mod events;
mod storage;

pub use clock::{FIXED_MILLIS, FixedClock, fixed_clock};
pub use storage::{FailingStore, StaticStore};
