//! Round lifecycle state machine
//!
//! Idle → Running → Ended, and Ended → Running again on restart. All timers
//! live on the session's own [`Schedule`]; every callback entry point checks
//! status first, so late or duplicate events are harmless.

use super::ant::{Ant, AntId};
use super::round_timer::{Countdown, RoundTimer};
use super::schedule::{Millis, Schedule, TimerId};
use super::spawner::Spawner;
use crate::consts::COUNTDOWN_PERIOD_MS;
use crate::high_score::HighScoreStore;
use crate::persistence::Storage;
use crate::platform::Surface;
use crate::settings::Settings;

/// Where the session is in its round lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// Loaded, no round played yet
    Idle,
    Running,
    /// Round over, waiting for restart
    Ended,
}

/// Timer payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    SpawnTick,
    CountdownTick,
    BeginTravel(AntId),
    Expire(AntId),
    ClearSmashed(AntId),
}

/// One player's game: current round plus best score
pub struct Session<P: Surface, S: Storage> {
    pub(super) settings: Settings,
    pub(super) status: SessionStatus,
    pub(super) score: u32,
    best_score: u32,
    timer: RoundTimer,
    pub(super) spawner: Spawner,
    pub(super) schedule: Schedule<GameEvent>,
    spawn_timer: Option<TimerId>,
    countdown_timer: Option<TimerId>,
    pub(super) surface: P,
    high_scores: HighScoreStore<S>,
    rounds: u32,
}

impl<P: Surface, S: Storage> Session<P, S> {
    /// Load the best score and show the idle screen
    pub fn new(settings: Settings, mut surface: P, storage: S, seed: u64) -> Self {
        let high_scores = HighScoreStore::new(storage, settings.high_score_key.clone());
        let best_score = high_scores.load();

        surface.set_best_score(best_score);
        surface.set_score(0);
        surface.set_time(settings.round_secs);
        surface.set_end_overlay_visible(false);
        surface.set_start_visible(true);

        Self {
            timer: RoundTimer::new(settings.round_secs),
            settings,
            status: SessionStatus::Idle,
            score: 0,
            best_score,
            spawner: Spawner::new(seed),
            schedule: Schedule::new(),
            spawn_timer: None,
            countdown_timer: None,
            surface,
            high_scores,
            rounds: 0,
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn remaining_secs(&self) -> u32 {
        self.timer.remaining()
    }

    /// Rounds started so far
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    pub fn now(&self) -> Millis {
        self.schedule.now()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn surface(&self) -> &P {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut P {
        &mut self.surface
    }

    pub fn storage(&self) -> &S {
        self.high_scores.storage()
    }

    pub fn ant(&self, id: AntId) -> Option<&Ant> {
        self.spawner.get(id)
    }

    /// Ants still on the surface
    pub fn ants(&self) -> impl Iterator<Item = &Ant> {
        self.spawner.live()
    }

    /// Begin a round. Returns false (and changes nothing) if one is running.
    pub fn start(&mut self) -> bool {
        if self.status == SessionStatus::Running {
            log::debug!("Start ignored: round already running");
            return false;
        }

        self.score = 0;
        self.timer.reset();
        self.surface.set_score(self.score);
        self.surface.set_time(self.timer.remaining());
        let cleared = self.spawner.clear(&mut self.surface);
        self.surface.set_end_overlay_visible(false);

        self.spawn_timer = Some(
            self.schedule
                .every(self.settings.spawn_period_ms, GameEvent::SpawnTick),
        );
        self.countdown_timer = Some(
            self.schedule
                .every(COUNTDOWN_PERIOD_MS, GameEvent::CountdownTick),
        );
        self.surface.set_start_visible(false);

        self.status = SessionStatus::Running;
        self.rounds += 1;
        log::info!(
            "Round {} started at {}ms ({} leftover ants cleared)",
            self.rounds,
            self.now(),
            cleared
        );
        true
    }

    /// Finish the round: stop timers, record a new best, show results.
    /// Returns false if no round was running.
    pub fn end(&mut self) -> bool {
        if self.status != SessionStatus::Running {
            return false;
        }
        self.status = SessionStatus::Ended;

        if let Some(id) = self.spawn_timer.take() {
            self.schedule.cancel(id);
        }
        if let Some(id) = self.countdown_timer.take() {
            self.schedule.cancel(id);
        }

        if self.score > self.best_score {
            self.best_score = self.score;
            if let Err(e) = self.high_scores.save(self.best_score) {
                log::warn!("Could not persist best score: {}", e);
            }
            self.surface.set_best_score(self.best_score);
        }

        self.surface.set_final_score(self.score);
        self.surface.set_end_overlay_visible(true);
        self.surface.set_start_visible(true);

        log::info!(
            "Round {} over: score {}, best {}",
            self.rounds,
            self.score,
            self.best_score
        );
        true
    }

    /// Count one hit. Dropped unless a round is running.
    pub fn register_hit(&mut self) -> bool {
        if self.status != SessionStatus::Running {
            log::debug!("Hit dropped: no round running");
            return false;
        }
        self.score += 1;
        self.surface.set_score(self.score);
        true
    }

    /// Run every timer due up to and including `at` (absolute ms)
    pub fn advance_to(&mut self, at: Millis) {
        while let Some((_, event)) = self.schedule.pop_due(at) {
            self.dispatch(event);
        }
        self.schedule.settle(at);
    }

    pub fn advance_by(&mut self, ms: Millis) {
        self.advance_to(self.now() + ms);
    }

    fn dispatch(&mut self, event: GameEvent) {
        match event {
            GameEvent::SpawnTick => {
                if self.status == SessionStatus::Running {
                    self.spawner
                        .spawn_one(&mut self.surface, &mut self.schedule, &self.settings);
                }
            }
            GameEvent::CountdownTick => self.on_countdown_tick(),
            GameEvent::BeginTravel(id) => {
                self.spawner
                    .begin_travel(id, &mut self.surface, &self.settings);
            }
            GameEvent::Expire(id) => {
                if self.spawner.remove(id, &mut self.surface) {
                    log::debug!("Ant {} walked off", id);
                }
            }
            GameEvent::ClearSmashed(id) => {
                self.spawner.remove(id, &mut self.surface);
            }
        }
    }

    fn on_countdown_tick(&mut self) {
        if self.status != SessionStatus::Running {
            return;
        }
        match self.timer.tick() {
            Countdown::Running(remaining) => self.surface.set_time(remaining),
            Countdown::Expired => {
                self.surface.set_time(0);
                self.end();
            }
            Countdown::Stopped => {}
        }
    }
}
