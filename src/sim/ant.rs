//! Ant entity

use glam::Vec2;

use super::schedule::Millis;

/// Ant identifier, unique for the lifetime of a session
pub type AntId = u32;

/// Which side of the play surface an ant enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Bottom,
}

impl Edge {
    pub fn opposite(self) -> Self {
        match self {
            Edge::Top => Edge::Bottom,
            Edge::Bottom => Edge::Top,
        }
    }

    /// Y coordinate just past this edge
    pub fn offscreen_y(self, height: f32, margin: f32) -> f32 {
        match self {
            Edge::Top => -margin,
            Edge::Bottom => height + margin,
        }
    }
}

/// A walking ant
#[derive(Debug, Clone)]
pub struct Ant {
    pub id: AntId,
    pub spawn_pos: Vec2,
    pub from: Edge,
    /// Set once the walk starts
    pub target: Option<Vec2>,
    pub travel_secs: f32,
    pub rotation_deg: f32,
    pub spawned_at: Millis,
    /// Still attached to the surface
    pub alive: bool,
    /// Hit reaction still bound
    pub armed: bool,
    pub smashed: bool,
}

impl Ant {
    pub fn new(id: AntId, spawn_pos: Vec2, from: Edge, spawned_at: Millis) -> Self {
        Self {
            id,
            spawn_pos,
            from,
            target: None,
            travel_secs: 0.0,
            rotation_deg: 0.0,
            spawned_at,
            alive: true,
            armed: true,
            smashed: false,
        }
    }

    /// Unbind the hit reaction. True only for the first call on a live ant.
    pub fn disarm(&mut self) -> bool {
        if !self.alive || !self.armed {
            return false;
        }
        self.armed = false;
        self.smashed = true;
        true
    }

    /// Mark detached. True only for the first call.
    pub fn detach(&mut self) -> bool {
        let was_alive = self.alive;
        self.alive = false;
        self.armed = false;
        was_alive
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disarm_once() {
        let mut ant = Ant::new(1, Vec2::ZERO, Edge::Top, 0);
        assert!(ant.disarm());
        assert!(ant.smashed);
        assert!(!ant.disarm());
    }

    #[test]
    fn test_detached_ant_cannot_be_hit() {
        let mut ant = Ant::new(1, Vec2::ZERO, Edge::Bottom, 0);
        assert!(ant.detach());
        assert!(!ant.detach());
        assert!(!ant.disarm());
        assert!(!ant.smashed);
    }

    #[test]
    fn test_edges() {
        assert_eq!(Edge::Top.opposite(), Edge::Bottom);
        assert_eq!(Edge::Top.offscreen_y(600.0, 50.0), -50.0);
        assert_eq!(Edge::Bottom.offscreen_y(600.0, 50.0), 650.0);
    }
}
