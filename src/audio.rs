//! Audio hooks
//!
//! Sound playback is a silent stub: events are mapped to effects and
//! volume/mute are honoured, but nothing is sent to a device.

use crate::sim::{GameEvent, HitCause};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Bird flaps
    Flap,
    /// Pipe cleared
    Score,
    /// Power-up collected
    PickupCollect,
    /// Bird hit a pipe
    PipeHit,
    /// Bird hit the ground
    GroundHit,
    /// Run started
    Start,
    /// Game over
    GameOver,
    /// New high score
    HighScore,
}

impl SoundEffect {
    /// Effect for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::RunStarted => Some(SoundEffect::Start),
            GameEvent::Flapped => Some(SoundEffect::Flap),
            GameEvent::PipePassed { .. } => Some(SoundEffect::Score),
            GameEvent::PowerUpCollected { .. } => Some(SoundEffect::PickupCollect),
            GameEvent::Hit {
                cause: HitCause::Pipe,
                ..
            } => Some(SoundEffect::PipeHit),
            GameEvent::Hit {
                cause: HitCause::Ground,
                ..
            } => Some(SoundEffect::GroundHit),
            GameEvent::GameOver {
                new_high_score: true,
                ..
            } => Some(SoundEffect::HighScore),
            GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
            GameEvent::Paused
            | GameEvent::Resumed
            | GameEvent::SoundToggled { .. }
            | GameEvent::QuitRequested => None,
        }
    }
}

/// Audio manager for the game
#[derive(Debug)]
pub struct AudioManager {
    master_volume: f32,
    muted: bool,
    /// Effects that would have been audible
    played: u64,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            muted: false,
            played: 0,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume
        }
    }

    /// Play a sound effect. Returns false when it would be inaudible.
    pub fn play(&mut self, effect: SoundEffect) -> bool {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return false;
        }
        log::trace!("sfx {:?} at volume {:.2}", effect, vol);
        self.played += 1;
        true
    }

    /// Follow the game's sound flag, then play everything the events call for
    pub fn handle_events(&mut self, events: &[GameEvent], sound_on: bool) {
        self.set_muted(!sound_on);
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }

    pub fn played(&self) -> u64 {
        self.played
    }
}
