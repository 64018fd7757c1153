//! DOM-backed surface
//!
//! Ants are absolutely positioned `div`s inside `#game-screen`, moved with CSS
//! transitions. Each carries `data-ant-id` so one delegated listener on the
//! screen can route taps back to the session.

use std::collections::HashMap;

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use super::Surface;
use crate::sim::AntId;

const ANT_CLASS: &str = "ant-smasher__ant";
const SMASHED_CLASS: &str = "ant-smasher__ant--smashed";
const MODAL_VISIBLE_CLASS: &str = "ant-smasher__end-modal--visible";

/// Data attribute holding the ant id
pub const ANT_ID_ATTR: &str = "data-ant-id";

const SPLAT_SVG: &str = r##"<svg viewBox="0 0 100 100" xmlns="http://www.w3.org/2000/svg"><path d="M 50,10 C 25,15 15,35 20,60 C 25,85 45,95 70,85 C 95,75 90,45 80,25 C 70,5 55,5 50,10 Z" fill="#8B4513" opacity="0.8"/><line x1="20" y1="60" x2="5" y2="70" stroke="#333" stroke-width="3"/><line x1="80" y1="25" x2="95" y2="15" stroke="#333" stroke-width="3"/><line x1="70" y1="85" x2="80" y2="95" stroke="#333" stroke-width="3"/></svg>"##;

pub struct DomSurface {
    document: Document,
    screen: HtmlElement,
    score: Element,
    time: Element,
    best: Element,
    final_score: Element,
    end_modal: Element,
    start_button: HtmlElement,
    ants: HashMap<AntId, HtmlElement>,
}

impl DomSurface {
    /// Look up the game's elements by id. None if any is missing.
    pub fn from_document(document: &Document) -> Option<Self> {
        let by_id = |id: &str| {
            let el = document.get_element_by_id(id);
            if el.is_none() {
                log::error!("Missing #{} element", id);
            }
            el
        };

        Some(Self {
            document: document.clone(),
            screen: by_id("game-screen")?.dyn_into().ok()?,
            score: by_id("score-value")?,
            time: by_id("time-value")?,
            best: by_id("highscore-value")?,
            final_score: by_id("final-score")?,
            end_modal: by_id("end-modal")?,
            start_button: by_id("start-button")?.dyn_into().ok()?,
            ants: HashMap::new(),
        })
    }

    pub fn screen(&self) -> &HtmlElement {
        &self.screen
    }
}

impl Surface for DomSurface {
    fn size(&self) -> Vec2 {
        Vec2::new(
            self.screen.client_width() as f32,
            self.screen.client_height() as f32,
        )
    }

    fn add_ant(&mut self, id: AntId, pos: Vec2) {
        let Some(ant) = self
            .document
            .create_element("div")
            .ok()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        else {
            log::warn!("Could not create element for ant {}", id);
            return;
        };

        ant.set_class_name(ANT_CLASS);
        let _ = ant.set_attribute(ANT_ID_ATTR, &id.to_string());
        let style = ant.style();
        let _ = style.set_property("left", &format!("{}px", pos.x));
        let _ = style.set_property("top", &format!("{}px", pos.y));

        let _ = self.screen.append_child(&ant);
        self.ants.insert(id, ant);
    }

    fn animate_ant(&mut self, id: AntId, to: Vec2, rotation_deg: f32, duration_secs: f32) {
        let Some(ant) = self.ants.get(&id) else {
            return;
        };
        // Commit the spawn position first. Without a style flush an ant added
        // in the same frame jumps straight to `to` with no transition.
        let _ = ant.offset_width();
        let style = ant.style();
        let _ = style.set_property("transition", &format!("all {}s linear", duration_secs));
        let _ = style.set_property("transform", &format!("rotate({}deg)", rotation_deg));
        let _ = style.set_property("left", &format!("{}px", to.x));
        let _ = style.set_property("top", &format!("{}px", to.y));
    }

    fn smash_ant(&mut self, id: AntId) {
        let Some(ant) = self.ants.get(&id) else {
            return;
        };
        let _ = ant.class_list().add_1(SMASHED_CLASS);
        ant.set_inner_html(SPLAT_SVG);

        let style = ant.style();
        let transform = style.get_property_value("transform").unwrap_or_default();
        let _ = style.set_property("transition", "all 0.3s ease-out");
        let _ = style.set_property("transform", &format!("{} scale(1.1)", transform));
    }

    fn remove_ant(&mut self, id: AntId) {
        if let Some(ant) = self.ants.remove(&id) {
            ant.remove();
        }
    }

    fn set_score(&mut self, score: u32) {
        self.score.set_text_content(Some(&score.to_string()));
    }

    fn set_time(&mut self, secs: u32) {
        self.time.set_text_content(Some(&secs.to_string()));
    }

    fn set_best_score(&mut self, score: u32) {
        self.best.set_text_content(Some(&score.to_string()));
    }

    fn set_final_score(&mut self, score: u32) {
        self.final_score.set_text_content(Some(&score.to_string()));
    }

    fn set_end_overlay_visible(&mut self, visible: bool) {
        let _ = self
            .end_modal
            .class_list()
            .toggle_with_force(MODAL_VISIBLE_CLASS, visible);
    }

    fn set_start_visible(&mut self, visible: bool) {
        let display = if visible { "block" } else { "none" };
        let _ = self.start_button.style().set_property("display", display);
    }
}
