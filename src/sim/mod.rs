//! Game simulation
//!
//! Pure and deterministic, no platform dependencies:
//! - Virtual clock only; callers feed it elapsed milliseconds
//! - Seeded RNG only
//! - Stable iteration order (by ant ID)

pub mod ant;
pub mod interaction;
pub mod round_timer;
pub mod schedule;
pub mod session;
pub mod spawner;

pub use ant::{Ant, AntId, Edge};
pub use interaction::HitOutcome;
pub use round_timer::{Countdown, RoundTimer};
pub use schedule::{Millis, Schedule, TimerId};
pub use session::{GameEvent, Session, SessionStatus};
pub use spawner::Spawner;
