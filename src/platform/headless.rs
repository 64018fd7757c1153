//! Headless surface that records what it was asked to draw

use std::collections::BTreeSet;

use glam::Vec2;

use super::Surface;
use crate::sim::AntId;

/// One ant-related surface call
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    Add {
        id: AntId,
        pos: Vec2,
    },
    Animate {
        id: AntId,
        to: Vec2,
        rotation_deg: f32,
        duration_secs: f32,
    },
    Smash(AntId),
    Remove(AntId),
}

/// Surface with no output. HUD fields hold the text a DOM would show.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    size: Vec2,
    ops: Vec<SurfaceOp>,
    on_screen: BTreeSet<AntId>,
    pub score_text: String,
    pub time_text: String,
    pub best_text: String,
    pub final_text: String,
    pub end_overlay_visible: bool,
    pub start_visible: bool,
}

impl RecordingSurface {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            ops: Vec::new(),
            on_screen: BTreeSet::new(),
            score_text: String::new(),
            time_text: String::new(),
            best_text: String::new(),
            final_text: String::new(),
            end_overlay_visible: false,
            start_visible: true,
        }
    }

    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    /// Ants currently attached
    pub fn on_screen(&self) -> &BTreeSet<AntId> {
        &self.on_screen
    }

    /// Number of `remove_ant` calls made for `id`
    pub fn removals(&self, id: AntId) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, SurfaceOp::Remove(r) if *r == id))
            .count()
    }

    pub fn added(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, SurfaceOp::Add { .. }))
            .count()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn add_ant(&mut self, id: AntId, pos: Vec2) {
        self.on_screen.insert(id);
        self.ops.push(SurfaceOp::Add { id, pos });
    }

    fn animate_ant(&mut self, id: AntId, to: Vec2, rotation_deg: f32, duration_secs: f32) {
        self.ops.push(SurfaceOp::Animate {
            id,
            to,
            rotation_deg,
            duration_secs,
        });
    }

    fn smash_ant(&mut self, id: AntId) {
        self.ops.push(SurfaceOp::Smash(id));
    }

    fn remove_ant(&mut self, id: AntId) {
        self.on_screen.remove(&id);
        self.ops.push(SurfaceOp::Remove(id));
    }

    fn set_score(&mut self, score: u32) {
        self.score_text = score.to_string();
    }

    fn set_time(&mut self, secs: u32) {
        self.time_text = secs.to_string();
    }

    fn set_best_score(&mut self, score: u32) {
        self.best_text = score.to_string();
    }

    fn set_final_score(&mut self, score: u32) {
        self.final_text = score.to_string();
    }

    fn set_end_overlay_visible(&mut self, visible: bool) {
        self.end_overlay_visible = visible;
    }

    fn set_start_visible(&mut self, visible: bool) {
        self.start_visible = visible;
    }
}
