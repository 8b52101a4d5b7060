//! Game settings and preferences
//!
//! Persisted separately from the high score as JSON.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::persistence::DEFAULT_HIGH_SCORE_FILE;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    /// Maximum particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 64,
            QualityPreset::Medium => 256,
            QualityPreset::High => 1024,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Particle effects (score confetti, pickups, crashes)
    pub particles: bool,

    // === Audio ===
    /// Start with sound on (M toggles in game)
    pub sound_on: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,

    // === Run ===
    /// Fixed RNG seed; random per run when unset
    pub seed: Option<u64>,
    /// Let the autopilot play
    pub demo_mode: bool,
    /// Simulated seconds the headless binary runs for
    pub demo_seconds: f32,
    /// Where the high score lives
    pub high_score_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            particles: true,
            sound_on: true,
            master_volume: 0.8,
            seed: None,
            demo_mode: true,
            demo_seconds: 60.0,
            high_score_path: PathBuf::from(DEFAULT_HIGH_SCORE_FILE),
        }
    }
}

impl Settings {
    /// Settings file name, relative to the working directory
    pub const STORAGE_PATH: &'static str = "bird_jump_settings.json";

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Load from the default location, falling back to defaults
    pub fn load() -> Self {
        Self::load_from(Self::STORAGE_PATH)
    }

    /// Load from `path`; any read or parse failure yields defaults
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings in {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// True once a settings file exists at the default location
    pub fn exists() -> bool {
        Path::new(Self::STORAGE_PATH).exists()
    }

    /// Save to the default location (best effort)
    pub fn save(&self) {
        self.save_to(Self::STORAGE_PATH);
    }

    pub fn save_to(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        match serde_json::to_string_pretty(self) {
            Ok(json) => match std::fs::write(path, json) {
                Ok(()) => log::info!("Settings saved"),
                Err(e) => log::warn!("Settings not saved to {}: {}", path.display(), e),
            },
            Err(e) => log::warn!("Settings not serialized: {}", e),
        }
    }
}
