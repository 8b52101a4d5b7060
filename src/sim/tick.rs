//! Simulation tick
//!
//! Core game loop that advances the simulation by one step.

use serde::{Deserialize, Serialize};

use super::phase;
use super::resolve::resolve_collisions;
use super::spawner::{scroll_speed, spawn_interval, spawn_pipe};
use super::state::{GameEvent, GamePhase, GameState, PowerUpKind, SCORE_COLOR};
use crate::consts::*;
use crate::persistence::HighScoreStore;

/// Abstract, device-independent player actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    Flap,
    /// Pause and resume share one intent
    Pause,
    Mute,
    Start,
    Restart,
    Quit,
}

impl Intent {
    /// Order intents are applied in when several arrive in one tick
    pub const CANONICAL_ORDER: [Intent; 6] = [
        Intent::Quit,
        Intent::Start,
        Intent::Restart,
        Intent::Pause,
        Intent::Mute,
        Intent::Flap,
    ];
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub flap: bool,
    pub pause: bool,
    pub mute: bool,
    pub start: bool,
    pub restart: bool,
    pub quit: bool,
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
}

impl TickInput {
    pub fn from_intents(intents: impl IntoIterator<Item = Intent>) -> Self {
        let mut input = Self::default();
        for intent in intents {
            input.set(intent);
        }
        input
    }

    pub fn set(&mut self, intent: Intent) {
        *self.flag_mut(intent) = true;
    }

    pub fn contains(&self, intent: Intent) -> bool {
        match intent {
            Intent::Flap => self.flap,
            Intent::Pause => self.pause,
            Intent::Mute => self.mute,
            Intent::Start => self.start,
            Intent::Restart => self.restart,
            Intent::Quit => self.quit,
        }
    }

    /// Requested intents in canonical order
    pub fn intents(&self) -> impl Iterator<Item = Intent> + '_ {
        Intent::CANONICAL_ORDER
            .into_iter()
            .filter(|i| self.contains(*i))
    }

    /// Drop one-shot intents after they have been consumed (idle mode sticks)
    pub fn clear_intents(&mut self) {
        *self = Self {
            idle_mode: self.idle_mode,
            ..Self::default()
        };
    }

    fn flag_mut(&mut self, intent: Intent) -> &mut bool {
        match intent {
            Intent::Flap => &mut self.flap,
            Intent::Pause => &mut self.pause,
            Intent::Mute => &mut self.mute,
            Intent::Start => &mut self.start,
            Intent::Restart => &mut self.restart,
            Intent::Quit => &mut self.quit,
        }
    }
}

/// Negative or non-finite dt becomes 0
fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_finite() && dt >= 0.0 {
        dt
    } else {
        log::warn!("Ignoring invalid tick dt {dt}");
        0.0
    }
}

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32, store: &mut dyn HighScoreStore) {
    let dt = sanitize_dt(dt);
    state.clear_events();

    // Idle/demo mode - autopilot adds its own intents
    let mut input = input.clone();
    if input.idle_mode {
        drive_autopilot(state, &mut input);
    }

    phase::apply_intents(state, &input);

    // Background keeps drifting in every phase
    for cloud in &mut state.clouds {
        cloud.update(dt);
    }

    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;
    state.clock += dt;

    let slow = state.effects.is_active(PowerUpKind::Slow);
    let speed = scroll_speed(state.score, slow);

    // Spawn pipes at intervals
    if state.spawner.advance(dt, spawn_interval(state.score)) {
        let (pipe, powerup) = spawn_pipe(&mut state.rng);
        log::debug!("Spawned pipe top={} powerup={:?}", pipe.top, powerup.as_ref().map(|p| p.kind));
        state.pipes.push(pipe);
        state.powerups.extend(powerup);
    }

    state.bird.integrate(dt);

    // Move pipes and score the ones the bird has cleared
    let bird_x = state.bird.pos.x;
    let mut passed = 0;
    for pipe in &mut state.pipes {
        pipe.advance(dt, speed);
        if !pipe.passed && pipe.right() < bird_x {
            pipe.passed = true;
            passed += 1;
        }
    }
    state.pipes.retain(|p| !p.off_screen());
    for _ in 0..passed {
        state.score += 1;
        let pos = state.bird.pos;
        state.spawn_particles(pos, SCORE_COLOR, SCORE_BURST);
        state.push_event(GameEvent::PipePassed { score: state.score });
    }

    let clock = state.clock;
    for powerup in &mut state.powerups {
        powerup.advance(dt, speed, clock);
    }
    state.powerups.retain(|p| !p.collected && !p.off_screen());

    for particle in &mut state.particles {
        particle.update(dt);
    }
    state.particles.retain(|p| p.life > 0.0);

    state.invulnerable_timer = (state.invulnerable_timer - dt).max(0.0);
    state.effects.tick(dt);

    resolve_collisions(state, store);

    state.bird.clamp_to_ceiling();
}

/// Demo autopilot: start from the menu, then flap whenever the bird sinks
/// below the middle of the next gap
fn drive_autopilot(state: &GameState, input: &mut TickInput) {
    match state.phase {
        GamePhase::Menu => input.start = true,
        GamePhase::Playing => {
            let bird = &state.bird;
            let target = state
                .pipes
                .iter()
                .find(|p| p.right() >= bird.pos.x - bird.radius)
                .map(|p| p.gap_center() + 20.0)
                .unwrap_or(HEIGHT / 2.0);
            if bird.pos.y > target && bird.vel >= 0.0 {
                input.flap = true;
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::sim::state::{Pipe, PowerUp};
    use glam::Vec2;
    use proptest::prelude::*;

    fn start() -> TickInput {
        TickInput::from_intents([Intent::Start])
    }

    fn playing(seed: u64) -> (GameState, MemoryStore) {
        let mut state = GameState::new(seed);
        let mut store = MemoryStore::default();
        tick(&mut state, &start(), 0.0, &mut store);
        assert_eq!(state.phase, GamePhase::Playing);
        (state, store)
    }

    #[test]
    fn test_menu_freezes_gameplay() {
        let mut state = GameState::new(5);
        let mut store = MemoryStore::default();
        let cloud_x = state.clouds[0].pos.x;
        let bird = state.bird.clone();

        for _ in 0..120 {
            tick(&mut state, &TickInput::from_intents([Intent::Flap]), SIM_DT, &mut store);
        }

        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.bird.pos, bird.pos);
        assert_eq!(state.bird.vel, 0.0);
        assert!(state.pipes.is_empty());
        assert_eq!(state.time_ticks, 0);
        assert_ne!(state.clouds[0].pos.x, cloud_x);
    }

    #[test]
    fn test_paused_freezes_gameplay() {
        let (mut state, mut store) = playing(5);
        for _ in 0..200 {
            tick(&mut state, &TickInput::default(), SIM_DT, &mut store);
        }
        tick(&mut state, &TickInput::from_intents([Intent::Pause]), SIM_DT, &mut store);
        assert_eq!(state.phase, GamePhase::Paused);

        let y = state.bird.pos.y;
        let pipes: Vec<f32> = state.pipes.iter().map(|p| p.x).collect();
        let particles = state.particles.len();
        for _ in 0..100 {
            tick(&mut state, &TickInput::from_intents([Intent::Flap]), SIM_DT, &mut store);
        }
        assert_eq!(state.bird.pos.y, y);
        assert_eq!(state.pipes.iter().map(|p| p.x).collect::<Vec<_>>(), pipes);
        assert_eq!(state.particles.len(), particles);
    }

    #[test]
    fn test_gravity_step() {
        let (mut state, mut store) = playing(1);
        state.bird.vel = 0.0;
        tick(&mut state, &TickInput::from_intents([Intent::Flap]), 0.1, &mut store);
        assert!((state.bird.vel - (-280.0)).abs() < 1e-3);
        assert!((state.bird.pos.y - (HEIGHT / 2.0 - 28.0)).abs() < 1e-3);
    }

    #[test]
    fn test_invalid_dt_is_zero() {
        let (mut state, mut store) = playing(1);
        let before = state.bird.pos;
        tick(&mut state, &TickInput::default(), -1.0, &mut store);
        tick(&mut state, &TickInput::default(), f32::NAN, &mut store);
        tick(&mut state, &TickInput::default(), f32::INFINITY, &mut store);
        assert_eq!(state.bird.pos, before);
        assert_eq!(state.bird.vel, 0.0);
        assert_eq!(state.clock, 0.0);
    }

    #[test]
    fn test_first_pipe_spawns_after_interval() {
        let (mut state, mut store) = playing(11);
        tick(&mut state, &TickInput::default(), 1.5, &mut store);
        assert!(state.pipes.is_empty());
        state.bird.pos.y = HEIGHT / 2.0;
        state.bird.vel = 0.0;
        tick(&mut state, &TickInput::default(), 0.2, &mut store);
        assert_eq!(state.pipes.len(), 1);
        // Spawned at the right edge, then moved this same tick
        let expected = PIPE_SPAWN_X - PIPE_SPEED_BASE * 0.2;
        assert!((state.pipes[0].x - expected).abs() < 1e-3);
    }

    #[test]
    fn test_pipe_scores_exactly_once() {
        let (mut state, mut store) = playing(2);
        state.invulnerable_timer = 100.0;
        state.pipes.push(Pipe::new(BIRD_X - PIPE_WIDTH + 1.0, 100, 0));

        let mut scored = 0;
        for _ in 0..60 {
            state.bird.pos.y = HEIGHT / 2.0;
            state.bird.vel = 0.0;
            tick(&mut state, &TickInput::default(), SIM_DT, &mut store);
            scored += state
                .events()
                .iter()
                .filter(|e| matches!(e, GameEvent::PipePassed { .. }))
                .count();
        }
        assert_eq!(state.score, 1);
        assert!(state.pipes[0].passed);
        assert_eq!(scored, 1);
    }

    #[test]
    fn test_offscreen_entities_culled() {
        let (mut state, mut store) = playing(2);
        state.pipes.push(Pipe::new(CULL_X - PIPE_WIDTH + 0.5, 100, 0));
        state
            .powerups
            .push(PowerUp::new(Vec2::new(CULL_X + 0.1, 300.0), PowerUpKind::Slow));
        tick(&mut state, &TickInput::default(), SIM_DT, &mut store);
        assert!(state.pipes.is_empty());
        assert!(state.powerups.is_empty());
    }

    #[test]
    fn test_slow_effect_scales_speed() {
        let (mut state, mut store) = playing(2);
        state.effects.refresh(PowerUpKind::Slow);
        state.pipes.push(Pipe::new(400.0, 100, 0));
        tick(&mut state, &TickInput::default(), 0.1, &mut store);
        assert!((state.pipes[0].x - (400.0 - PIPE_SPEED_BASE * 0.6 * 0.1)).abs() < 1e-3);
    }

    #[test]
    fn test_timers_count_down() {
        let (mut state, mut store) = playing(2);
        state.invulnerable_timer = 0.05;
        state.effects.refresh(PowerUpKind::Shield);
        tick(&mut state, &TickInput::default(), 0.1, &mut store);
        assert_eq!(state.invulnerable_timer, 0.0);
        assert!((state.effects.remaining(PowerUpKind::Shield) - 3.9).abs() < 1e-4);
    }

    #[test]
    fn test_ceiling_clamp_after_tick() {
        let (mut state, mut store) = playing(2);
        state.bird.pos.y = 25.0;
        tick(&mut state, &TickInput::from_intents([Intent::Flap]), 0.05, &mut store);
        assert_eq!(state.bird.pos.y, CEILING_Y);
        assert_eq!(state.bird.vel, 0.0);
        assert_eq!(state.lives, START_LIVES);
    }

    #[test]
    fn test_falling_bird_loses_every_life() {
        let (mut state, mut store) = playing(8);
        let mut ticks = 0;
        while state.phase == GamePhase::Playing && ticks < 120 * 60 {
            tick(&mut state, &TickInput::default(), SIM_DT, &mut store);
            ticks += 1;
        }
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.lives, 0);
        // Only a positive score beats the stored 0
        assert_eq!(store.saved(), (state.score > 0).then_some(state.score));
        assert_eq!(state.high_score, state.score);
    }

    #[test]
    fn test_restart_after_game_over() {
        let (mut state, mut store) = playing(8);
        state.lives = 1;
        state.bird.pos.y = GROUND_LINE;
        tick(&mut state, &TickInput::default(), SIM_DT, &mut store);
        assert_eq!(state.phase, GamePhase::GameOver);

        tick(&mut state, &TickInput::from_intents([Intent::Start]), SIM_DT, &mut store);
        assert_eq!(state.phase, GamePhase::GameOver);

        tick(&mut state, &TickInput::from_intents([Intent::Restart]), SIM_DT, &mut store);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.lives, START_LIVES);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_canonical_intent_order() {
        let input = TickInput::from_intents([Intent::Flap, Intent::Start, Intent::Quit]);
        let order: Vec<Intent> = input.intents().collect();
        assert_eq!(order, vec![Intent::Quit, Intent::Start, Intent::Flap]);

        // Start then flap lands in the same tick
        let mut state = GameState::new(4);
        tick(&mut state, &TickInput::from_intents([Intent::Flap, Intent::Start]), 0.0, &mut MemoryStore::default());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.bird.vel, JUMP_VELOCITY);
    }

    #[test]
    fn test_clear_intents_keeps_idle_mode() {
        let mut input = TickInput::from_intents([Intent::Flap, Intent::Pause]);
        input.idle_mode = true;
        input.clear_intents();
        assert_eq!(input.intents().count(), 0);
        assert!(input.idle_mode);
    }

    #[test]
    fn test_autopilot_survives_a_while() {
        let mut state = GameState::new(2024);
        let mut store = MemoryStore::default();
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        for _ in 0..(120 * 20) {
            tick(&mut state, &input, SIM_DT, &mut store);
        }
        assert_ne!(state.phase, GamePhase::Menu);
        assert!(state.time_ticks > 0);
    }

    #[test]
    fn test_events_only_cover_last_tick() {
        let mut state = GameState::new(4);
        let mut store = MemoryStore::default();
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        for _ in 0..(120 * 30) {
            tick(&mut state, &input, SIM_DT, &mut store);
            assert!(state.events().len() <= 8, "{:?}", state.events());
        }

        let (mut state, mut store) = playing(4);
        assert!(state.events().contains(&GameEvent::RunStarted));
        tick(&mut state, &TickInput::from_intents([Intent::Flap]), SIM_DT, &mut store);
        assert_eq!(state.events(), &[GameEvent::Flapped]);
        tick(&mut state, &TickInput::default(), SIM_DT, &mut store);
        assert!(state.events().is_empty());
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);
        let mut store1 = MemoryStore::default();
        let mut store2 = MemoryStore::default();
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };

        for _ in 0..(120 * 15) {
            tick(&mut state1, &input, SIM_DT, &mut store1);
            tick(&mut state2, &input, SIM_DT, &mut store2);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.lives, state2.lives);
        assert_eq!(state1.pipes.len(), state2.pipes.len());
        assert_eq!(state1.bird.pos, state2.bird.pos);
    }

    proptest! {
        #[test]
        fn gravity_integration_is_exact(vel in -900.0f32..700.0, dt in 0.001f32..0.05) {
            let (mut state, mut store) = playing(3);
            state.bird.vel = vel;
            state.bird.pos.y = HEIGHT / 2.0;
            tick(&mut state, &TickInput::default(), dt, &mut store);
            let expected = vel + GRAVITY * dt;
            prop_assume!(expected <= MAX_FALL_SPEED);
            prop_assert!((state.bird.vel - expected).abs() < 1e-3);
        }

        #[test]
        fn fall_speed_never_exceeds_cap(ticks in 1usize..400, dt in 0.001f32..0.1) {
            let (mut state, mut store) = playing(3);
            for _ in 0..ticks {
                tick(&mut state, &TickInput::default(), dt, &mut store);
                prop_assert!(state.bird.vel <= MAX_FALL_SPEED);
            }
        }
    }
}
