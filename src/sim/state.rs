//! Game state and core simulation types
//!
//! Everything a run needs lives in [`GameState`]; the tick function is the
//! only writer.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{Circle, Rect, circle_intersects_circle, circle_intersects_rect};
use super::spawner::Spawner;
use crate::consts::*;

/// RGB colour tag handed to the presentation layer
pub type Rgb = [u8; 3];

pub const DAMAGE_COLOR: Rgb = [255, 80, 80];
pub const SCORE_COLOR: Rgb = [180, 255, 200];

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for Start
    #[default]
    Menu,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Run ended
    GameOver,
}

/// The player's bird
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bird {
    /// x never changes; y grows downward
    pub pos: Vec2,
    /// Vertical velocity (px/s, negative is up)
    pub vel: f32,
    pub radius: f32,
    pub alive: bool,
    /// Wing bob animation (0-0.4), cosmetic only
    pub flap_phase: f32,
}

impl Default for Bird {
    fn default() -> Self {
        Self {
            pos: Vec2::new(BIRD_X, HEIGHT / 2.0),
            vel: 0.0,
            radius: BIRD_RADIUS,
            alive: true,
            flap_phase: 0.0,
        }
    }
}

impl Bird {
    /// Instant upward kick. No buffering, no double-jump guard.
    pub fn flap(&mut self) {
        self.vel = JUMP_VELOCITY;
        self.flap_phase = 0.4;
    }

    /// Apply gravity then move
    pub fn integrate(&mut self, dt: f32) {
        self.vel = crate::clamp(self.vel + GRAVITY * dt, MAX_RISE_SPEED, MAX_FALL_SPEED);
        self.pos.y += self.vel * dt;
        self.flap_phase = (self.flap_phase - dt * 3.0).max(0.0);
    }

    pub fn as_circle(&self) -> Circle {
        Circle::new(self.pos, self.radius)
    }

    /// Lower edge reached the ground line
    pub fn touches_ground(&self) -> bool {
        self.pos.y + self.radius >= GROUND_LINE
    }

    /// Keep the bird below the ceiling margin. Returns true if it was clamped.
    pub fn clamp_to_ceiling(&mut self) -> bool {
        if self.pos.y < CEILING_Y {
            self.pos.y = CEILING_Y;
            self.vel = 0.0;
            true
        } else {
            false
        }
    }
}

/// An obstacle pair: a top pipe and a bottom pipe with a gap between them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipe {
    pub x: f32,
    /// Height of the top pipe, i.e. where the gap starts
    pub top: i32,
    pub gap: f32,
    pub width: f32,
    /// Already counted for score
    pub passed: bool,
    /// Palette index for rendering
    pub color: u8,
}

impl Pipe {
    pub fn new(x: f32, top: i32, color: u8) -> Self {
        debug_assert!(
            (PIPE_MIN_TOP..=HEIGHT as i32 - PIPE_GAP as i32 - PIPE_BOTTOM_MARGIN).contains(&top),
            "pipe top {top} out of range"
        );
        Self {
            x,
            top,
            gap: PIPE_GAP,
            width: PIPE_WIDTH,
            passed: false,
            color,
        }
    }

    pub fn advance(&mut self, dt: f32, speed: f32) {
        self.x -= speed * dt;
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top_rect(&self) -> Rect {
        Rect::new(self.x, 0.0, self.width, self.top as f32)
    }

    pub fn bottom_rect(&self) -> Rect {
        let y = self.top as f32 + self.gap;
        Rect::new(self.x, y, self.width, HEIGHT - y)
    }

    pub fn collides_with(&self, circle: &Circle) -> bool {
        circle_intersects_rect(circle.center, circle.radius, &self.top_rect())
            || circle_intersects_rect(circle.center, circle.radius, &self.bottom_rect())
    }

    pub fn off_screen(&self) -> bool {
        self.right() < CULL_X
    }

    /// Vertical centre of the gap
    pub fn gap_center(&self) -> f32 {
        self.top as f32 + self.gap / 2.0
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Ignore pipe and ground damage
    Shield,
    /// Scroll at 60% speed
    Slow,
    /// Instant +2
    Score,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [PowerUpKind::Shield, PowerUpKind::Slow, PowerUpKind::Score];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            PowerUpKind::Shield => 0,
            PowerUpKind::Slow => 1,
            PowerUpKind::Score => 2,
        }
    }

    pub fn color(self) -> Rgb {
        match self {
            PowerUpKind::Shield => [255, 215, 0],
            PowerUpKind::Slow => [102, 204, 255],
            PowerUpKind::Score => [255, 102, 178],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PowerUpKind::Shield => "shield",
            PowerUpKind::Slow => "slow",
            PowerUpKind::Score => "score",
        }
    }
}

/// A collectible floating in a pipe gap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub pos: Vec2,
    pub kind: PowerUpKind,
    pub radius: f32,
    pub collected: bool,
}

impl PowerUp {
    pub fn new(pos: Vec2, kind: PowerUpKind) -> Self {
        Self {
            pos,
            kind,
            radius: POWERUP_RADIUS,
            collected: false,
        }
    }

    /// Drift left with the pipes and bob gently. `clock` is simulation time.
    pub fn advance(&mut self, dt: f32, speed: f32, clock: f32) {
        self.pos.x -= speed * dt;
        self.pos.y += (clock * 4.0 + self.pos.x).sin() * 8.0 * dt;
    }

    pub fn touches(&self, circle: &Circle) -> bool {
        circle_intersects_circle(circle.center, circle.radius, self.pos, self.radius)
    }

    pub fn off_screen(&self) -> bool {
        self.pos.x < CULL_X
    }
}

/// Timed power-up effects, one slot per kind (seconds remaining)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActiveEffects {
    remaining: [f32; 3],
}

impl ActiveEffects {
    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.remaining[kind.index()] > 0.0
    }

    pub fn remaining(&self, kind: PowerUpKind) -> f32 {
        self.remaining[kind.index()]
    }

    /// Activate or refresh to the full duration
    pub fn refresh(&mut self, kind: PowerUpKind) {
        self.remaining[kind.index()] = POWERUP_DURATION;
    }

    /// Count down every active slot; expired slots drop to zero
    pub fn tick(&mut self, dt: f32) {
        for slot in self.remaining.iter_mut().filter(|t| **t > 0.0) {
            *slot -= dt;
            if *slot <= 0.0 {
                *slot = 0.0;
            }
        }
    }

    /// Active effects in kind order
    pub fn active(&self) -> impl Iterator<Item = (PowerUpKind, f32)> + '_ {
        PowerUpKind::ALL
            .into_iter()
            .filter(|k| self.is_active(*k))
            .map(|k| (k, self.remaining(k)))
    }

    pub fn clear(&mut self) {
        self.remaining = [0.0; 3];
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Rgb,
    pub life: f32,
    pub max_life: f32,
}

impl Particle {
    pub fn update(&mut self, dt: f32) {
        self.vel.y += PARTICLE_GRAVITY * dt;
        self.pos += self.vel * dt;
        self.life -= dt;
    }

    /// Remaining life in 0-1, for fading
    pub fn life_ratio(&self) -> f32 {
        crate::clamp(self.life / self.max_life, 0.0, 1.0)
    }
}

/// Default particle cap
pub const MAX_PARTICLES: usize = 256;

/// Background cloud (parallax, cosmetic)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cloud {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
}

impl Cloud {
    pub fn update(&mut self, dt: f32) {
        self.pos.x -= self.speed * dt * 0.25;
        if self.pos.x < -80.0 {
            self.pos.x = WIDTH + 60.0;
        }
    }
}

/// What dealt the damage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitCause {
    Pipe,
    Ground,
}

/// Notable things that happened during a tick, drained by the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RunStarted,
    Flapped,
    Paused,
    Resumed,
    SoundToggled { sound_on: bool },
    PipePassed { score: u64 },
    PowerUpCollected { kind: PowerUpKind },
    Hit { cause: HitCause, lives: u32 },
    GameOver { score: u64, new_high_score: bool },
    QuitRequested,
}

/// Stream offset for the cosmetic generator so particles never shift gameplay rolls
const FX_STREAM: u64 = 0x9e37_79b9_7f4a_7c15;

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Gameplay RNG (pipe heights, power-up rolls)
    pub rng: Pcg32,
    /// Cosmetic RNG (particles, clouds)
    pub fx_rng: Pcg32,
    pub phase: GamePhase,
    pub bird: Bird,
    /// Ordered oldest first; collision checks rely on this order
    pub pipes: Vec<Pipe>,
    pub powerups: Vec<PowerUp>,
    pub effects: ActiveEffects,
    pub particles: Vec<Particle>,
    pub clouds: Vec<Cloud>,
    pub score: u64,
    pub lives: u32,
    pub high_score: u64,
    /// Seconds of damage immunity left
    pub invulnerable_timer: f32,
    pub spawner: Spawner,
    pub sound_on: bool,
    /// Host should stop calling tick
    pub quit_requested: bool,
    /// Simulated seconds spent in Playing
    pub clock: f32,
    /// Simulation tick counter (Playing ticks only)
    pub time_ticks: u64,
    pub max_particles: usize,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state with the given seed, sitting on the menu
    pub fn new(seed: u64) -> Self {
        let mut fx_rng = Pcg32::seed_from_u64(seed ^ FX_STREAM);
        let clouds = (0..CLOUD_COUNT)
            .map(|_| Cloud {
                pos: Vec2::new(
                    fx_rng.random_range(0..=WIDTH as i32) as f32,
                    fx_rng.random_range(20..=200) as f32,
                ),
                radius: fx_rng.random_range(20..=45) as f32,
                speed: fx_rng.random_range(10.0..40.0),
            })
            .collect();

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            fx_rng,
            phase: GamePhase::Menu,
            bird: Bird::default(),
            pipes: Vec::new(),
            powerups: Vec::new(),
            effects: ActiveEffects::default(),
            particles: Vec::new(),
            clouds,
            score: 0,
            lives: START_LIVES,
            high_score: 0,
            invulnerable_timer: 0.0,
            spawner: Spawner::default(),
            sound_on: true,
            quit_requested: false,
            clock: 0.0,
            time_ticks: 0,
            max_particles: MAX_PARTICLES,
            events: Vec::new(),
        }
    }

    /// Seed the in-memory high score (usually from the persistence store)
    pub fn with_high_score(mut self, high_score: u64) -> Self {
        self.high_score = high_score;
        self
    }

    /// Apply player preferences that the simulation cares about
    pub fn apply_settings(&mut self, settings: &crate::Settings) {
        self.sound_on = settings.sound_on;
        self.max_particles = settings.max_particles();
    }

    /// Fresh run: everything except the high score, preferences and RNG streams
    pub fn reset_run(&mut self) {
        self.bird = Bird::default();
        self.pipes.clear();
        self.powerups.clear();
        self.effects.clear();
        self.particles.clear();
        self.score = 0;
        self.lives = START_LIVES;
        self.invulnerable_timer = 0.0;
        self.spawner.reset();
        self.clock = 0.0;
        self.time_ticks = 0;
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_timer > 0.0
    }

    pub fn is_shielded(&self) -> bool {
        self.effects.is_active(PowerUpKind::Shield)
    }

    /// Damage is ignored while invulnerable or shielded
    pub fn can_take_damage(&self) -> bool {
        !self.is_invulnerable() && !self.is_shielded()
    }

    /// Spawn a burst of particles at `pos`, dropping the oldest past the cap
    pub fn spawn_particles(&mut self, pos: Vec2, color: Rgb, count: usize) {
        if self.max_particles == 0 {
            return;
        }
        for _ in 0..count {
            let life = self.fx_rng.random_range(0.5..1.2);
            self.particles.push(Particle {
                pos,
                vel: Vec2::new(
                    self.fx_rng.random_range(-220.0..220.0),
                    self.fx_rng.random_range(-200.0..-40.0),
                ),
                color,
                life,
                max_life: life,
            });
        }
        if self.particles.len() > self.max_particles {
            let excess = self.particles.len() - self.max_particles;
            self.particles.drain(..excess);
        }
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events raised by the last tick, oldest first
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Dropped at the start of every tick; hosts read or drain them in between
    pub(crate) fn clear_events(&mut self) {
        self.events.clear();
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
