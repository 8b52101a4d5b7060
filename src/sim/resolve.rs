//! Collision and scoring resolution
//!
//! Runs once per Playing tick after every entity has moved. Order matters:
//! pickups first (a shield grabbed this tick already protects), then pipes,
//! then the ground, then the terminal check.

use super::phase;
use super::state::{DAMAGE_COLOR, GameEvent, GameState, HitCause, PowerUpKind};
use crate::consts::*;
use crate::persistence::HighScoreStore;

/// Resolve every bird interaction for this tick
pub fn resolve_collisions(state: &mut GameState, store: &mut dyn HighScoreStore) {
    collect_powerups(state);

    if state.can_take_damage() {
        check_pipe_hit(state);
    }

    // A pipe hit above starts the invulnerability window, so the ground can't
    // take a second life in the same tick.
    if state.bird.touches_ground() && state.can_take_damage() {
        apply_hit(state, HitCause::Ground);
    }

    if state.lives == 0 {
        phase::finish_run(state, store);
    }
}

/// Pick up every power-up the bird touches
fn collect_powerups(state: &mut GameState) {
    let circle = state.bird.as_circle();
    let mut collected: Vec<PowerUpKind> = Vec::new();

    state.powerups.retain_mut(|pu| {
        if !pu.collected && pu.touches(&circle) {
            pu.collected = true;
            collected.push(pu.kind);
            false
        } else {
            true
        }
    });

    for kind in collected {
        state.effects.refresh(kind);
        let pos = state.bird.pos;
        state.spawn_particles(pos, kind.color(), PICKUP_BURST);
        if kind == PowerUpKind::Score {
            state.score += SCORE_POWERUP_BONUS;
        }
        log::debug!("Collected {} power-up (score {})", kind.as_str(), state.score);
        state.push_event(GameEvent::PowerUpCollected { kind });
    }
}

/// First pipe in list order wins; at most one life per tick from pipes
fn check_pipe_hit(state: &mut GameState) {
    let circle = state.bird.as_circle();
    if state.pipes.iter().any(|pipe| pipe.collides_with(&circle)) {
        apply_hit(state, HitCause::Pipe);
    }
}

fn apply_hit(state: &mut GameState, cause: HitCause) {
    let (bounce, burst) = match cause {
        HitCause::Pipe => (PIPE_HIT_BOUNCE, PIPE_HIT_BURST),
        HitCause::Ground => (GROUND_HIT_BOUNCE, GROUND_HIT_BURST),
    };

    state.lives = state.lives.saturating_sub(1);
    state.invulnerable_timer = INVULNERABILITY_AFTER_HIT;
    state.bird.vel = bounce;
    let pos = state.bird.pos;
    state.spawn_particles(pos, DAMAGE_COLOR, burst);

    log::debug!("Hit by {:?}, {} lives left", cause, state.lives);
    state.push_event(GameEvent::Hit {
        cause,
        lives: state.lives,
    });
}
