//! Ant Smasher - a timed tap-the-ants arcade game
//!
//! Core modules:
//! - `sim`: Round lifecycle, ant spawning and scoring on a virtual clock
//! - `platform`: Presentation surface abstraction (DOM or headless)
//! - `persistence`: Key-value storage backends
//! - `high_score`: Best score slot on top of storage
//! - `settings`: Data-driven game tuning

pub mod high_score;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;

pub use high_score::HighScoreStore;
pub use settings::{ConfigError, Settings};
pub use sim::{HitOutcome, Session, SessionStatus};

/// Game configuration constants
pub mod consts {
    /// Round length in seconds
    pub const ROUND_SECS: u32 = 30;
    /// Countdown granularity (one tick per displayed second)
    pub const COUNTDOWN_PERIOD_MS: u64 = 1000;
    /// Time between ant spawns while a round runs
    pub const SPAWN_PERIOD_MS: u64 = 1000;

    /// Delay between placing an ant and starting its walk, so the surface
    /// registers the start position before animating
    pub const TRAVEL_DELAY_MS: u64 = 10;
    pub const TRAVEL_MIN_SECS: f32 = 3.0;
    pub const TRAVEL_MAX_SECS: f32 = 5.0;
    /// Rotation range is symmetric: [-MAX, +MAX] degrees
    pub const MAX_ROTATION_DEG: f32 = 90.0;

    /// Unconditional removal after spawn, hit or not
    pub const EXPIRY_MS: u64 = 5500;
    /// How long a smashed ant stays on screen before cleanup
    pub const SMASH_LINGER_MS: u64 = 500;

    /// Ants start and finish this many pixels past the top/bottom edge
    pub const OFFSCREEN_MARGIN: f32 = 50.0;

    /// Storage slot for the best score
    pub const HIGH_SCORE_KEY: &str = "antSmasherHighScore";
    /// Optional storage slot holding a JSON settings override
    pub const SETTINGS_KEY: &str = "antSmasherConfig";
}
