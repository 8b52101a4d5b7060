//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only enters through `dt`
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod phase;
pub mod resolve;
pub mod snapshot;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Circle, Rect, circle_intersects_circle, circle_intersects_rect};
pub use phase::{apply_intent, finish_run};
pub use resolve::resolve_collisions;
pub use snapshot::Snapshot;
pub use spawner::{Spawner, difficulty_factor, scroll_speed, spawn_interval, spawn_pipe};
pub use state::{
    ActiveEffects, Bird, Cloud, GameEvent, GamePhase, GameState, HitCause, Particle, Pipe,
    PowerUp, PowerUpKind, MAX_PARTICLES,
};
pub use tick::{Intent, TickInput, tick};
