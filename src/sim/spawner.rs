//! Pipe/power-up spawning and difficulty scaling
//!
//! Difficulty is a pure function of score, so speed and spawn cadence only
//! ever ramp up during a run.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Pipe, PowerUp, PowerUpKind};
use crate::consts::*;

/// `1 + ln(1 + score) * 0.05`
pub fn difficulty_factor(score: u64) -> f32 {
    1.0 + (score as f32).ln_1p() * 0.05
}

/// Horizontal scroll speed for pipes and power-ups (px/s)
pub fn scroll_speed(score: u64, slow_active: bool) -> f32 {
    let slow = if slow_active { SLOW_FACTOR } else { 1.0 };
    PIPE_SPEED_BASE * difficulty_factor(score) * slow
}

/// Seconds between pipe spawns, never below [`MIN_SPAWN_INTERVAL`]
pub fn spawn_interval(score: u64) -> f32 {
    (PIPE_SPAWN_INTERVAL / difficulty_factor(score)).max(MIN_SPAWN_INTERVAL)
}

/// Highest allowed top-pipe height
pub const PIPE_MAX_TOP: i32 = HEIGHT as i32 - PIPE_GAP as i32 - PIPE_BOTTOM_MARGIN;

/// Spawn cadence accumulator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Spawner {
    /// Seconds since the last pipe
    pub since_last: f32,
}

impl Spawner {
    /// Accumulate `dt`; returns true (and resets) once `interval` is reached
    pub fn advance(&mut self, dt: f32, interval: f32) -> bool {
        self.since_last += dt;
        if self.since_last >= interval {
            self.since_last = 0.0;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.since_last = 0.0;
    }
}

/// Roll a new pipe at the right edge, maybe with a power-up in its gap.
///
/// Draw order from `rng` is fixed (top, colour, chance, then power-up x, y,
/// kind) so a seed always replays the same course.
pub fn spawn_pipe<R: Rng>(rng: &mut R) -> (Pipe, Option<PowerUp>) {
    let top = rng.random_range(PIPE_MIN_TOP..=PIPE_MAX_TOP);
    let color = rng.random_range(0..PIPE_PALETTE_SIZE);
    let pipe = Pipe::new(PIPE_SPAWN_X, top, color);

    let powerup = if rng.random_bool(POWERUP_SPAWN_CHANCE) {
        let x = pipe.x + (pipe.width / 2.0).floor() + rng.random_range(20..=60) as f32;
        let y = top as f32 + pipe.gap * rng.random_range(0.25f32..=0.75);
        let kind = PowerUpKind::ALL[rng.random_range(0..PowerUpKind::ALL.len())];
        Some(PowerUp::new(Vec2::new(x, y), kind))
    } else {
        None
    };

    (pipe, powerup)
}
