//! Tap/click handling
//!
//! An ant's hit reaction is one-shot: the first activation disarms it, scores
//! once, swaps in the squashed look and queues a short cleanup. Anything after
//! that (double taps, taps on ants already walked off) is reported and ignored.

use super::ant::AntId;
use super::session::{GameEvent, Session, SessionStatus};
use crate::persistence::Storage;
use crate::platform::Surface;

/// What an activation did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Point scored, ant squashed
    Scored,
    /// Hit reaction already spent
    AlreadySmashed,
    /// Unknown id or ant no longer on the surface
    Gone,
    /// No round running; nothing happened
    NotRunning,
}

impl<P: Surface, S: Storage> Session<P, S> {
    /// Handle a tap on ant `id`
    pub fn activate(&mut self, id: AntId) -> HitOutcome {
        if self.status != SessionStatus::Running {
            return HitOutcome::NotRunning;
        }
        let Some(ant) = self.spawner.get_mut(id) else {
            return HitOutcome::Gone;
        };
        if !ant.alive {
            return HitOutcome::Gone;
        }
        if !ant.disarm() {
            return HitOutcome::AlreadySmashed;
        }

        self.register_hit();
        self.surface.smash_ant(id);
        self.schedule
            .after(self.settings.smash_linger_ms, GameEvent::ClearSmashed(id));
        log::debug!("Ant {} smashed, score {}", id, self.score);
        HitOutcome::Scored
    }
}
