//! Bird Jump - A colourful side-scrolling arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, spawning, game state)
//! - `platform`: Fixed timestep driver and keyboard-to-intent mapping
//! - `persistence`: High score load/save
//! - `highscores`: High score gate run at game over
//! - `audio`: Sound effect hooks (silent stub)
//! - `settings`: Player preferences

pub mod audio;
pub mod error;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;

pub use error::StoreError;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth physics)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions
    pub const WIDTH: f32 = 480.0;
    pub const HEIGHT: f32 = 720.0;
    /// Bird takes damage when its lower edge reaches this line
    pub const GROUND_LINE: f32 = HEIGHT - 30.0;
    /// Bird centre can't rise above this
    pub const CEILING_Y: f32 = 20.0;

    /// Bird physics
    pub const BIRD_X: f32 = 120.0;
    pub const BIRD_RADIUS: f32 = 18.0;
    /// Downward acceleration (pixels/s²)
    pub const GRAVITY: f32 = 1000.0;
    pub const JUMP_VELOCITY: f32 = -380.0;
    pub const MAX_FALL_SPEED: f32 = 800.0;
    pub const MAX_RISE_SPEED: f32 = -1000.0;

    /// Pipes
    pub const PIPE_WIDTH: f32 = 88.0;
    pub const PIPE_GAP: f32 = 190.0;
    pub const PIPE_MIN_TOP: i32 = 90;
    /// Space kept below the gap (bottom pipe is never shorter than this minus the ground)
    pub const PIPE_BOTTOM_MARGIN: i32 = 140;
    pub const PIPE_SPEED_BASE: f32 = 180.0;
    pub const PIPE_SPAWN_INTERVAL: f32 = 1.6;
    pub const MIN_SPAWN_INTERVAL: f32 = 1.0;
    pub const PIPE_SPAWN_X: f32 = WIDTH + 40.0;
    /// Entities left of this are culled
    pub const CULL_X: f32 = -40.0;
    /// Number of pipe colours in the presentation palette
    pub const PIPE_PALETTE_SIZE: u8 = 5;

    /// Power-ups
    pub const POWERUP_RADIUS: f32 = 12.0;
    pub const POWERUP_SPAWN_CHANCE: f64 = 0.12;
    pub const POWERUP_DURATION: f32 = 4.0;
    /// Speed multiplier while "slow" is active
    pub const SLOW_FACTOR: f32 = 0.6;
    pub const SCORE_POWERUP_BONUS: u64 = 2;

    /// Lives and damage
    pub const START_LIVES: u32 = 3;
    pub const INVULNERABILITY_AFTER_HIT: f32 = 1.6;
    pub const PIPE_HIT_BOUNCE: f32 = -160.0;
    pub const GROUND_HIT_BOUNCE: f32 = -120.0;

    /// Particle bursts
    pub const SCORE_BURST: usize = 8;
    pub const PICKUP_BURST: usize = 18;
    pub const PIPE_HIT_BURST: usize = 30;
    pub const GROUND_HIT_BURST: usize = 18;
    pub const PARTICLE_GRAVITY: f32 = 300.0;

    /// Background clouds
    pub const CLOUD_COUNT: usize = 10;
}

/// Bound `v` to `[lo, hi]`. `lo <= hi` is assumed.
#[inline]
pub fn clamp(v: f32, lo: f32, hi: f32) -> f32 {
    debug_assert!(lo <= hi, "clamp bounds inverted: {lo} > {hi}");
    v.max(lo).min(hi)
}
