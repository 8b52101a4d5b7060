//! Bird Jump entry point
//!
//! Runs the simulation headless: the autopilot plays a demo run on a fixed
//! timestep, sounds are routed through the audio stub, and the final frame
//! is printed as JSON.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{SystemTime, UNIX_EPOCH};

    use bird_jump::audio::AudioManager;
    use bird_jump::persistence::{FileStore, HighScoreStore};
    use bird_jump::platform::FixedTimestep;
    use bird_jump::sim::{GamePhase, GameState, Snapshot, TickInput, tick};
    use bird_jump::Settings;

    env_logger::init();
    log::info!("Bird Jump (headless) starting...");

    let settings = Settings::load();
    if !Settings::exists() {
        // Leave an editable file behind for the next run
        settings.save();
    }
    log::info!(
        "Quality {}, particles {}",
        settings.quality.as_str(),
        if settings.particles { "on" } else { "off" }
    );
    let mut store = FileStore::new(settings.high_score_path.clone());
    let high_score = store.load_high_score();

    let seed = settings.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });
    log::info!("Seed {}, high score {}", seed, high_score);

    let mut state = GameState::new(seed).with_high_score(high_score);
    state.apply_settings(&settings);

    let mut audio = AudioManager::new();
    audio.set_master_volume(settings.master_volume);

    let input = TickInput {
        idle_mode: settings.demo_mode,
        ..TickInput::default()
    };
    if !settings.demo_mode {
        log::warn!("Demo mode is off and there is no keyboard here; the bird will idle on the menu");
    }

    // Host frames at 60 Hz, sim steps at SIM_DT
    const FRAME_DT: f32 = 1.0 / 60.0;
    let mut timestep = FixedTimestep::default();
    let frames = (settings.demo_seconds.max(0.0) / FRAME_DT) as u64;

    'frames: for _ in 0..frames {
        let steps = timestep.advance(FRAME_DT);
        for _ in 0..steps {
            tick(&mut state, &input, timestep.step(), &mut store);
            let events = state.drain_events();
            audio.handle_events(&events, state.sound_on);

            if state.quit_requested || state.phase == GamePhase::GameOver {
                break 'frames;
            }
        }
    }

    log::info!(
        "Run ended in {:?}: score {}, lives {}, high score {}, {} sounds",
        state.phase,
        state.score,
        state.lives,
        state.high_score,
        audio.played()
    );

    match serde_json::to_string_pretty(&Snapshot::capture(&state)) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No web front end; the library is the deliverable on wasm
}
