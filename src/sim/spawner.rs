//! Ant spawning and lifetime
//!
//! Each ant gets two timers when it is placed: a short one that starts its
//! walk and an unconditional expiry. Whichever removal fires first detaches
//! the ant; later ones see `alive == false` and do nothing.

use std::collections::BTreeMap;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::ant::{Ant, AntId, Edge};
use super::schedule::Schedule;
use super::session::GameEvent;
use crate::platform::Surface;
use crate::settings::Settings;

#[derive(Debug)]
pub struct Spawner {
    rng: Pcg32,
    next_id: AntId,
    /// This round's ants, dead ones included until the next `clear`
    ants: BTreeMap<AntId, Ant>,
}

impl Spawner {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            ants: BTreeMap::new(),
        }
    }

    pub fn get(&self, id: AntId) -> Option<&Ant> {
        self.ants.get(&id)
    }

    pub fn get_mut(&mut self, id: AntId) -> Option<&mut Ant> {
        self.ants.get_mut(&id)
    }

    /// Ants still on the surface, by id
    pub fn live(&self) -> impl Iterator<Item = &Ant> {
        self.ants.values().filter(|a| a.alive)
    }

    /// Place one ant just past the top or bottom edge and schedule its walk
    /// and expiry
    pub fn spawn_one<P: Surface>(
        &mut self,
        surface: &mut P,
        schedule: &mut Schedule<GameEvent>,
        settings: &Settings,
    ) -> AntId {
        let bounds = surface.size();
        let id = self.next_id;
        self.next_id += 1;

        let from = if self.rng.random_bool(0.5) {
            Edge::Top
        } else {
            Edge::Bottom
        };
        let pos = Vec2::new(
            random_coord(&mut self.rng, bounds.x),
            from.offscreen_y(bounds.y, settings.offscreen_margin),
        );

        self.ants.insert(id, Ant::new(id, pos, from, schedule.now()));
        surface.add_ant(id, pos);
        schedule.after(settings.travel_delay_ms, GameEvent::BeginTravel(id));
        schedule.after(settings.expiry_ms, GameEvent::Expire(id));

        log::debug!("Spawned ant {} at ({:.0}, {:.0})", id, pos.x, pos.y);
        id
    }

    /// Pick the destination on the opposite edge and start walking.
    /// No-op for ants that are gone or already smashed.
    pub fn begin_travel<P: Surface>(&mut self, id: AntId, surface: &mut P, settings: &Settings) -> bool {
        let bounds = surface.size();
        let Some(ant) = self.ants.get_mut(&id) else {
            return false;
        };
        if !ant.alive || ant.smashed {
            return false;
        }

        let target = Vec2::new(
            random_coord(&mut self.rng, bounds.x),
            ant.from
                .opposite()
                .offscreen_y(bounds.y, settings.offscreen_margin),
        );
        let travel_secs = self
            .rng
            .random_range(settings.travel_min_secs..=settings.travel_max_secs);
        let max_rot = settings.max_rotation_deg.abs();
        let rotation_deg = self.rng.random_range(-max_rot..=max_rot);

        ant.target = Some(target);
        ant.travel_secs = travel_secs;
        ant.rotation_deg = rotation_deg;
        surface.animate_ant(id, target, rotation_deg, travel_secs);
        true
    }

    /// Detach an ant from the surface. Safe to call any number of times.
    pub fn remove<P: Surface>(&mut self, id: AntId, surface: &mut P) -> bool {
        let Some(ant) = self.ants.get_mut(&id) else {
            return false;
        };
        if !ant.detach() {
            return false;
        }
        surface.remove_ant(id);
        true
    }

    /// Detach every live ant and forget the round's ants. Pending timers for
    /// forgotten ids become no-ops.
    pub fn clear<P: Surface>(&mut self, surface: &mut P) -> usize {
        let mut removed = 0;
        for ant in self.ants.values_mut() {
            if ant.detach() {
                surface.remove_ant(ant.id);
                removed += 1;
            }
        }
        self.ants.clear();
        removed
    }
}

fn random_coord(rng: &mut Pcg32, extent: f32) -> f32 {
    if extent > 0.0 {
        rng.random_range(0.0..extent)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{RecordingSurface, SurfaceOp};

    fn setup() -> (Spawner, RecordingSurface, Schedule<GameEvent>, Settings) {
        (
            Spawner::new(42),
            RecordingSurface::new(Vec2::new(800.0, 600.0)),
            Schedule::new(),
            Settings::default(),
        )
    }

    #[test]
    fn test_spawn_and_walk_stay_in_bounds() {
        let (mut spawner, mut surface, mut schedule, settings) = setup();

        for _ in 0..200 {
            let id = spawner.spawn_one(&mut surface, &mut schedule, &settings);
            assert!(spawner.begin_travel(id, &mut surface, &settings));

            let ant = spawner.get(id).unwrap();
            let target = ant.target.unwrap();
            assert!((0.0..800.0).contains(&ant.spawn_pos.x));
            assert!((0.0..800.0).contains(&target.x));
            match ant.from {
                Edge::Top => {
                    assert_eq!(ant.spawn_pos.y, -50.0);
                    assert_eq!(target.y, 650.0);
                }
                Edge::Bottom => {
                    assert_eq!(ant.spawn_pos.y, 650.0);
                    assert_eq!(target.y, -50.0);
                }
            }
            assert!((3.0..=5.0).contains(&ant.travel_secs));
            assert!((-90.0..=90.0).contains(&ant.rotation_deg));
        }
        assert_eq!(surface.added(), 200);
    }

    #[test]
    fn test_both_edges_used() {
        let (mut spawner, mut surface, mut schedule, settings) = setup();
        for _ in 0..50 {
            spawner.spawn_one(&mut surface, &mut schedule, &settings);
        }
        assert!(spawner.live().any(|a| a.from == Edge::Top));
        assert!(spawner.live().any(|a| a.from == Edge::Bottom));
    }

    #[test]
    fn test_spawn_schedules_walk_and_expiry() {
        let (mut spawner, mut surface, mut schedule, settings) = setup();
        let id = spawner.spawn_one(&mut surface, &mut schedule, &settings);

        assert_eq!(schedule.pop_due(10_000), Some((10, GameEvent::BeginTravel(id))));
        assert_eq!(schedule.pop_due(10_000), Some((5500, GameEvent::Expire(id))));
        assert_eq!(schedule.pop_due(10_000), None);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let (mut spawner, mut surface, mut schedule, settings) = setup();
        let id = spawner.spawn_one(&mut surface, &mut schedule, &settings);

        assert!(spawner.remove(id, &mut surface));
        assert!(!spawner.remove(id, &mut surface));
        assert!(!spawner.remove(999, &mut surface));
        assert_eq!(surface.removals(id), 1);
        assert!(surface.on_screen().is_empty());
    }

    #[test]
    fn test_no_walk_after_removal() {
        let (mut spawner, mut surface, mut schedule, settings) = setup();
        let id = spawner.spawn_one(&mut surface, &mut schedule, &settings);
        spawner.remove(id, &mut surface);

        assert!(!spawner.begin_travel(id, &mut surface, &settings));
        assert!(
            !surface
                .ops()
                .iter()
                .any(|op| matches!(op, SurfaceOp::Animate { .. }))
        );
    }

    #[test]
    fn test_clear_detaches_live_only() {
        let (mut spawner, mut surface, mut schedule, settings) = setup();
        let a = spawner.spawn_one(&mut surface, &mut schedule, &settings);
        let b = spawner.spawn_one(&mut surface, &mut schedule, &settings);
        spawner.remove(a, &mut surface);

        assert_eq!(spawner.clear(&mut surface), 1);
        assert_eq!(surface.removals(a), 1);
        assert_eq!(surface.removals(b), 1);
        assert!(spawner.get(b).is_none());
    }

    #[test]
    fn test_zero_sized_surface() {
        let mut spawner = Spawner::new(1);
        let mut surface = RecordingSurface::new(Vec2::ZERO);
        let mut schedule = Schedule::new();
        let settings = Settings::default();
        let id = spawner.spawn_one(&mut surface, &mut schedule, &settings);
        assert!(spawner.begin_travel(id, &mut surface, &settings));
        assert_eq!(spawner.get(id).unwrap().spawn_pos.x, 0.0);
    }
}
