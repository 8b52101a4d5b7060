//! Menu / play / pause / game-over state machine
//!
//! | From      | Intent  | To        |
//! |-----------|---------|-----------|
//! | Menu      | Start   | Playing   |
//! | Menu      | Quit    | (quit)    |
//! | Playing   | Flap    | Playing   |
//! | Playing   | Pause   | Paused    |
//! | Playing   | Mute    | Playing   |
//! | Paused    | Pause   | Playing   |
//! | GameOver  | Restart | Playing   |
//! | GameOver  | Quit    | (quit)    |
//!
//! Anything else is ignored. Playing -> GameOver happens internally via
//! [`finish_run`] when the last life is lost.

use super::state::{GameEvent, GamePhase, GameState};
use super::tick::{Intent, TickInput};
use crate::highscores;
use crate::persistence::HighScoreStore;

/// Apply every intent in `input`, in canonical order, each against the phase
/// current at that moment
pub fn apply_intents(state: &mut GameState, input: &TickInput) {
    for intent in input.intents() {
        apply_intent(state, intent);
    }
}

/// Apply one intent. Returns false if it was ignored in the current phase.
pub fn apply_intent(state: &mut GameState, intent: Intent) -> bool {
    match (state.phase, intent) {
        (GamePhase::Menu, Intent::Start) => {
            state.spawner.reset();
            state.phase = GamePhase::Playing;
            log::info!("Run started (seed {})", state.seed);
            state.push_event(GameEvent::RunStarted);
        }
        (GamePhase::Menu | GamePhase::GameOver, Intent::Quit) => {
            state.quit_requested = true;
            state.push_event(GameEvent::QuitRequested);
        }
        (GamePhase::Playing, Intent::Flap) => {
            state.bird.flap();
            state.push_event(GameEvent::Flapped);
        }
        (GamePhase::Playing, Intent::Pause) => {
            state.phase = GamePhase::Paused;
            state.push_event(GameEvent::Paused);
        }
        (GamePhase::Paused, Intent::Pause) => {
            state.phase = GamePhase::Playing;
            state.push_event(GameEvent::Resumed);
        }
        (GamePhase::Playing, Intent::Mute) => {
            state.sound_on = !state.sound_on;
            state.push_event(GameEvent::SoundToggled {
                sound_on: state.sound_on,
            });
        }
        (GamePhase::GameOver, Intent::Restart) => {
            state.reset_run();
            state.phase = GamePhase::Playing;
            log::info!("Run restarted (high score {})", state.high_score);
            state.push_event(GameEvent::RunStarted);
        }
        _ => return false,
    }
    true
}

/// Terminal transition: Playing -> GameOver plus the high score gate
pub fn finish_run(state: &mut GameState, store: &mut dyn HighScoreStore) {
    if state.phase == GamePhase::GameOver {
        return;
    }
    state.phase = GamePhase::GameOver;
    state.bird.alive = false;

    // The host may not have seeded the record from the store
    state.high_score = state.high_score.max(store.load_high_score());
    let new_high_score = highscores::record_final_score(&mut state.high_score, state.score, store);
    log::info!(
        "Game over: score {} (high score {}{})",
        state.score,
        state.high_score,
        if new_high_score { ", new record" } else { "" }
    );
    state.push_event(GameEvent::GameOver {
        score: state.score,
        new_high_score,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::persistence::{HighScoreStore, MemoryStore};
    use crate::sim::state::{Pipe, PowerUpKind};

    const ALL_INTENTS: [Intent; 6] = [
        Intent::Flap,
        Intent::Pause,
        Intent::Mute,
        Intent::Start,
        Intent::Restart,
        Intent::Quit,
    ];

    #[test]
    fn test_menu_only_leaves_on_start() {
        for intent in ALL_INTENTS {
            let mut state = GameState::new(1);
            apply_intent(&mut state, intent);
            let expected = if intent == Intent::Start {
                GamePhase::Playing
            } else {
                GamePhase::Menu
            };
            assert_eq!(state.phase, expected, "{intent:?}");
        }
    }

    #[test]
    fn test_start_resets_spawn_timer() {
        let mut state = GameState::new(1);
        state.spawner.since_last = 1.2;
        assert!(apply_intent(&mut state, Intent::Start));
        assert_eq!(state.spawner.since_last, 0.0);
    }

    #[test]
    fn test_quit_from_menu_and_game_over() {
        let mut state = GameState::new(1);
        assert!(apply_intent(&mut state, Intent::Quit));
        assert!(state.quit_requested);

        let mut state = GameState::new(1);
        state.phase = GamePhase::Playing;
        assert!(!apply_intent(&mut state, Intent::Quit));
        assert!(!state.quit_requested);

        state.phase = GamePhase::GameOver;
        assert!(apply_intent(&mut state, Intent::Quit));
        assert!(state.quit_requested);
    }

    #[test]
    fn test_pause_round_trip() {
        let mut state = GameState::new(1);
        apply_intent(&mut state, Intent::Start);
        apply_intent(&mut state, Intent::Pause);
        assert_eq!(state.phase, GamePhase::Paused);

        // Flap and mute do nothing while paused
        let vel = state.bird.vel;
        assert!(!apply_intent(&mut state, Intent::Flap));
        assert!(!apply_intent(&mut state, Intent::Mute));
        assert_eq!(state.bird.vel, vel);
        assert!(state.sound_on);

        apply_intent(&mut state, Intent::Pause);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_mute_toggles() {
        let mut state = GameState::new(1);
        apply_intent(&mut state, Intent::Start);
        apply_intent(&mut state, Intent::Mute);
        assert!(!state.sound_on);
        apply_intent(&mut state, Intent::Mute);
        assert!(state.sound_on);
    }

    #[test]
    fn test_game_over_only_leaves_on_restart() {
        for intent in ALL_INTENTS {
            let mut state = GameState::new(1);
            state.phase = GamePhase::GameOver;
            state.lives = 0;
            state.score = 12;
            state.high_score = 12;
            state.pipes.push(Pipe::new(200.0, 120, 2));
            state.effects.refresh(PowerUpKind::Slow);
            state.invulnerable_timer = 1.0;

            apply_intent(&mut state, intent);

            if intent == Intent::Restart {
                assert_eq!(state.phase, GamePhase::Playing);
                assert_eq!(state.lives, START_LIVES);
                assert_eq!(state.score, 0);
                assert_eq!(state.high_score, 12);
                assert!(state.pipes.is_empty());
                assert_eq!(state.effects.active().count(), 0);
                assert_eq!(state.invulnerable_timer, 0.0);
                assert!(state.bird.alive);
            } else {
                assert_eq!(state.phase, GamePhase::GameOver, "{intent:?}");
                assert_eq!(state.score, 12);
            }
        }
    }

    #[test]
    fn test_finish_run_keeps_higher_record() {
        let mut state = GameState::new(1).with_high_score(50);
        state.phase = GamePhase::Playing;
        state.score = 20;
        let mut store = MemoryStore::with_value(50);

        finish_run(&mut state, &mut store);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.high_score, 50);
        assert_eq!(store.saved(), None);
        assert!(state.events().contains(&GameEvent::GameOver {
            score: 20,
            new_high_score: false
        }));
    }

    #[test]
    fn test_finish_run_respects_stored_record_when_unseeded() {
        let mut state = GameState::new(1);
        state.phase = GamePhase::Playing;
        state.score = 5;
        let mut store = MemoryStore::with_value(100);

        finish_run(&mut state, &mut store);
        assert_eq!(state.high_score, 100);
        assert_eq!(store.saved(), None);
        assert_eq!(store.load_high_score(), 100);
        assert!(state.events().contains(&GameEvent::GameOver {
            score: 5,
            new_high_score: false
        }));
    }

    #[test]
    fn test_finish_run_beats_stored_record_when_unseeded() {
        let mut state = GameState::new(1);
        state.phase = GamePhase::Playing;
        state.score = 120;
        let mut store = MemoryStore::with_value(100);

        finish_run(&mut state, &mut store);
        assert_eq!(state.high_score, 120);
        assert_eq!(store.saved(), Some(120));
    }
}
