//! Read-only view of the game for the presentation layer

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{GamePhase, GameState, PowerUpKind, Rgb};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirdView {
    pub pos: Vec2,
    pub vel: f32,
    pub radius: f32,
    pub flap_phase: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipeView {
    pub x: f32,
    pub top: i32,
    pub gap: f32,
    pub width: f32,
    pub color: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUpView {
    pub pos: Vec2,
    pub kind: PowerUpKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleView {
    pub pos: Vec2,
    pub color: Rgb,
    /// 0-1, for alpha and size
    pub life_ratio: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloudView {
    pub pos: Vec2,
    pub radius: f32,
}

/// Everything a renderer or HUD needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub high_score: u64,
    pub lives: u32,
    pub bird: BirdView,
    pub pipes: Vec<PipeView>,
    pub powerups: Vec<PowerUpView>,
    pub particles: Vec<ParticleView>,
    pub clouds: Vec<CloudView>,
    /// Active effects with seconds remaining
    pub effects: Vec<(PowerUpKind, f32)>,
    pub invulnerable_timer: f32,
    pub sound_on: bool,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            phase: state.phase,
            score: state.score,
            high_score: state.high_score,
            lives: state.lives,
            bird: BirdView {
                pos: state.bird.pos,
                vel: state.bird.vel,
                radius: state.bird.radius,
                flap_phase: state.bird.flap_phase,
            },
            pipes: state
                .pipes
                .iter()
                .map(|p| PipeView {
                    x: p.x,
                    top: p.top,
                    gap: p.gap,
                    width: p.width,
                    color: p.color,
                })
                .collect(),
            powerups: state
                .powerups
                .iter()
                .map(|p| PowerUpView {
                    pos: p.pos,
                    kind: p.kind,
                })
                .collect(),
            particles: state
                .particles
                .iter()
                .map(|p| ParticleView {
                    pos: p.pos,
                    color: p.color,
                    life_ratio: p.life_ratio(),
                })
                .collect(),
            clouds: state
                .clouds
                .iter()
                .map(|c| CloudView {
                    pos: c.pos,
                    radius: c.radius,
                })
                .collect(),
            effects: state.effects.active().collect(),
            invulnerable_timer: state.invulnerable_timer,
            sound_on: state.sound_on,
        }
    }

    /// Blink the bird while invulnerable (hidden on even tenths of a second)
    pub fn bird_visible(&self) -> bool {
        !(self.invulnerable_timer > 0.0 && (self.invulnerable_timer * 10.0) as i32 % 2 == 0)
    }
}
