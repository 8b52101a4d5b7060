//! Platform abstraction layer
//!
//! Handles host-side concerns the simulation stays out of:
//! - Time/ticks (fixed timestep accumulator)
//! - Input events (keys to intents)

pub mod input;
pub mod time;

pub use input::{Key, intent_for_key};
pub use time::FixedTimestep;
