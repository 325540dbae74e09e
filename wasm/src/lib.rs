use std::collections::HashSet;

use catfight_core::{default_config, Key, MatchConfig, MatchController, Millis, Side};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Install panic hook so WASM panics show in browser console instead of silently freezing.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Per-frame attack summary for JS (hit sparks, sounds).
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsAttack {
    attacker: u8,
    kind: String,
    outcome: String,
    damage: i32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsFrame {
    attacks: Vec<JsAttack>,
    knockout: bool,
    game_over: bool,
}

fn to_js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// One local match driven by the browser's keyboard and clock.
#[wasm_bindgen]
pub struct WasmMatch {
    inner: MatchController,
    held: HashSet<Key>,
    started_at: f64,
}

impl WasmMatch {
    fn from_config(config: &MatchConfig) -> Result<WasmMatch, JsValue> {
        let inner = MatchController::new(config, 0).map_err(to_js_err)?;
        Ok(WasmMatch {
            inner,
            held: HashSet::new(),
            started_at: js_sys::Date::now(),
        })
    }
}

#[wasm_bindgen]
impl WasmMatch {
    /// Create a match from MatchConfig JSON. Falls back to the default
    /// warrior-vs-ranger setup when the JSON does not parse.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u32, config_json: &str) -> Result<WasmMatch, JsValue> {
        let config: MatchConfig =
            serde_json::from_str(config_json).unwrap_or_else(|_| default_config(seed));
        WasmMatch::from_config(&config)
    }

    /// Create the default warrior-vs-ranger match.
    pub fn new_default(seed: u32) -> Result<WasmMatch, JsValue> {
        WasmMatch::from_config(&default_config(seed))
    }

    /// Feed a `keydown` event (`KeyboardEvent.code`). Returns true if it
    /// restarted the match.
    pub fn key_down(&mut self, code: &str) -> bool {
        match Key::from_code(code) {
            Some(key) => {
                self.held.insert(key);
                self.inner.key_down(key)
            }
            None => false,
        }
    }

    pub fn key_up(&mut self, code: &str) {
        if let Some(key) = Key::from_code(code) {
            self.held.remove(&key);
        }
    }

    /// Drop all held keys, e.g. when the page loses focus.
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    /// Step one frame at `now_ms` since match start.
    pub fn step(&mut self, now_ms: f64) -> Result<JsValue, JsValue> {
        let now = now_ms.max(0.0) as Millis;
        let events = self.inner.step_keys(&self.held, now);

        if let Some(ko) = events.knockout {
            let msg = format!("{} (frame {})", ko.winner.winner_label(), ko.frame);
            web_sys::console::log_1(&JsValue::from(msg));
        }

        let frame = JsFrame {
            attacks: events
                .attacks
                .iter()
                .map(|a| JsAttack {
                    attacker: a.attacker.player_number(),
                    kind: format!("{:?}", a.kind),
                    outcome: format!("{:?}", a.outcome),
                    damage: a.damage,
                })
                .collect(),
            knockout: events.knockout.is_some(),
            game_over: self.inner.game_over(),
        };
        serde_wasm_bindgen::to_value(&frame).map_err(Into::into)
    }

    /// Step one frame using the browser clock.
    pub fn step_now(&mut self) -> Result<JsValue, JsValue> {
        let elapsed = js_sys::Date::now() - self.started_at;
        self.step(elapsed)
    }

    pub fn restart(&mut self) -> bool {
        self.inner.restart()
    }

    /// Export both fighters plus match status for rendering.
    pub fn export_state(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.view()).map_err(Into::into)
    }

    // Quick accessors
    pub fn frame(&self) -> u32 { self.inner.frame() }
    pub fn game_over(&self) -> bool { self.inner.game_over() }
    pub fn winner(&self) -> i32 {
        match self.inner.winner() {
            Some(Side::Left) => 0,
            Some(Side::Right) => 1,
            None => -1,
        }
    }
    pub fn winner_label(&self) -> Option<String> {
        self.inner.winner_label().map(str::to_owned)
    }
    pub fn health(&self, player: u8) -> i32 {
        self.inner.health().get(player as usize).copied().unwrap_or(0)
    }
}
