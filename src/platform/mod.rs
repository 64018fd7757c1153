//! Presentation surface abstraction
//!
//! The session never touches the DOM directly; it drives a [`Surface`]:
//! - `web`: DOM elements in the browser (WASM only)
//! - `headless`: records every call, for the native demo and tests

use glam::Vec2;

use crate::sim::AntId;

pub mod headless;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use headless::{RecordingSurface, SurfaceOp};
#[cfg(target_arch = "wasm32")]
pub use web::DomSurface;

/// Everything the game needs from whatever draws it
pub trait Surface {
    /// Play area size in pixels
    fn size(&self) -> Vec2;

    fn add_ant(&mut self, id: AntId, pos: Vec2);
    /// Start a linear walk to `to`. May arrive in the same frame as
    /// `add_ant`, so the walk must still animate from the spawn position.
    fn animate_ant(&mut self, id: AntId, to: Vec2, rotation_deg: f32, duration_secs: f32);
    /// Swap to the squashed appearance
    fn smash_ant(&mut self, id: AntId);
    /// Must tolerate ids that are already gone
    fn remove_ant(&mut self, id: AntId);

    fn set_score(&mut self, score: u32);
    fn set_time(&mut self, secs: u32);
    fn set_best_score(&mut self, score: u32);
    fn set_final_score(&mut self, score: u32);

    fn set_end_overlay_visible(&mut self, visible: bool);
    fn set_start_visible(&mut self, visible: bool);
}
