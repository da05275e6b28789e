//! Browser bindings
//!
//! The JavaScript presentation layer owns rendering, audio and menus. It
//! drives a [`WebGame`] from `requestAnimationFrame`, reads JSON snapshots
//! and events, and sends player commands back.

use glam::Vec2;
use wasm_bindgen::prelude::*;

use crate::session::Session;
use crate::settings::AudioSettings;
use crate::sim::GamePhase;
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Crab Tide core loaded");
}

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn parse_phase(name: &str) -> Result<GamePhase, JsValue> {
    GamePhase::from_str(name).ok_or_else(|| js_err(format!("unknown phase `{name}`")))
}

/// Game instance exported to JavaScript
#[wasm_bindgen]
pub struct WebGame {
    session: Session,
}

#[wasm_bindgen]
impl WebGame {
    /// Create a game at timestamp `now_ms`, optionally with a tuning JSON
    #[wasm_bindgen(constructor)]
    pub fn new(now_ms: f64, tuning_json: Option<String>) -> Result<WebGame, JsValue> {
        let tuning = match tuning_json {
            Some(json) => Tuning::from_json(&json).map_err(js_err)?,
            None => Tuning::default(),
        };
        Ok(Self {
            session: Session::new(tuning, now_ms),
        })
    }

    /// Advance to `now_ms`; returns ticks run
    pub fn frame(&mut self, now_ms: f64) -> u32 {
        self.session.frame(now_ms)
    }

    pub fn snapshot(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session.snapshot()).map_err(js_err)
    }

    /// JSON array of events since the last call
    pub fn drain_events(&mut self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session.drain_events()).map_err(js_err)
    }

    /// Request a phase by name (`"loading"`, `"rave"`, ...)
    pub fn request_phase(&mut self, name: &str) -> Result<(), JsValue> {
        let target = parse_phase(name)?;
        self.session
            .request_phase_transition(target)
            .map_err(js_err)
    }

    pub fn schedule_phase(&mut self, name: &str, delay_secs: f32) -> Result<(), JsValue> {
        let target = parse_phase(name)?;
        self.session.schedule_phase_transition(target, delay_secs);
        Ok(())
    }

    pub fn set_paused(&mut self, paused: bool) -> bool {
        self.session.set_paused(paused)
    }

    /// Pointer hit on the ground plane (world x, z)
    pub fn set_target(&mut self, x: f32, z: f32) {
        self.session.set_crab_target_input(Some(Vec2::new(x, z)));
    }

    pub fn clear_target(&mut self) {
        self.session.set_crab_target_input(None);
    }

    pub fn spend_shells(&mut self, amount: u32) -> bool {
        self.session.spend_shells(amount)
    }

    pub fn audio_settings(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.session.audio_settings()).map_err(js_err)
    }

    pub fn set_audio_settings(&mut self, json: &str) -> Result<(), JsValue> {
        let settings: AudioSettings = serde_json::from_str(json).map_err(js_err)?;
        self.session.set_audio_settings(settings);
        Ok(())
    }
}
