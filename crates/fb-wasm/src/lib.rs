//! WASM bridge for Flashboard — exposes the board engine to JavaScript.
//!
//! Compiled via `wasm-pack build --target web`. The page keeps ownership of
//! the card DOM and event listeners; it forwards gestures here with the
//! target card's id and re-renders cards from `cards_json()`. Connection
//! lines are drawn directly into the page's `<svg>` layer.

mod storage;
mod svg;

use fb_core::{BoardConfig, CardSide, Face, NodeId, Point, Size};
use fb_editor::{BoardEngine, GestureEvent};
use storage::LocalStorage;
use svg::SvgLineSurface;
use wasm_bindgen::prelude::*;

/// Largest integer a JS number holds exactly (2^53 - 1).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Card ids cross the JS boundary as plain numbers. Anything that is not a
/// non-negative safe integer names no card.
fn node_id(raw: f64) -> Option<NodeId> {
    if raw.is_finite() && raw >= 0.0 && raw.fract() == 0.0 && raw <= MAX_SAFE_INTEGER {
        Some(NodeId::from_raw(raw as u64))
    } else {
        log::warn!("ignoring invalid card id {raw}");
        None
    }
}

fn js_id(id: NodeId) -> f64 {
    id.raw() as f64
}

fn face_name(face: Face) -> &'static str {
    match face {
        Face::Front => "front",
        Face::Back => "back",
    }
}

/// The main WASM-facing board controller.
#[wasm_bindgen]
pub struct FlashcardBoard {
    engine: BoardEngine<SvgLineSurface>,
    store: Option<LocalStorage>,
}

#[wasm_bindgen]
impl FlashcardBoard {
    /// Create a board drawing its connection lines into the `<svg>` element
    /// with id `svg_id`. Cards are `card_width` x `card_height` px.
    #[wasm_bindgen(constructor)]
    pub fn new(svg_id: &str, card_width: f64, card_height: f64) -> Result<FlashcardBoard, JsValue> {
        init_logging();

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let container = document
            .get_element_by_id(svg_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element #{svg_id}")))?;

        let config = BoardConfig {
            card_size: Size::new(card_width, card_height),
            ..BoardConfig::default()
        };
        let store = LocalStorage::from_window();
        if store.is_none() {
            log::warn!("localStorage unavailable; save/load disabled");
        }

        Ok(Self {
            engine: BoardEngine::new(config, SvgLineSurface::new(document, container)),
            store,
        })
    }

    pub fn add_card(&mut self, front: &str, back: &str) -> f64 {
        js_id(self.engine.add_card(front, back))
    }

    pub fn delete_card(&mut self, id: f64) -> bool {
        node_id(id).is_some_and(|id| self.engine.delete_card(id))
    }

    /// Flip a card. Returns the face now showing, or `undefined` if the
    /// card does not exist.
    pub fn flip(&mut self, id: f64) -> Option<String> {
        let face = self.engine.flip(node_id(id)?)?;
        Some(face_name(face).to_string())
    }

    pub fn set_front_text(&mut self, id: f64, text: &str) -> bool {
        self.set_text(id, CardSide::Front, text)
    }

    pub fn set_back_text(&mut self, id: f64, text: &str) -> bool {
        self.set_text(id, CardSide::Back, text)
    }

    pub fn clear_all(&mut self) -> bool {
        self.engine.clear_all()
    }

    // ─── Gestures ────────────────────────────────────────────────────────

    /// Returns true if a drag started.
    pub fn pointer_down(&mut self, id: f64, x: f64, y: f64) -> bool {
        let Some(card) = node_id(id) else {
            return false;
        };
        self.engine.handle(&GestureEvent::PointerDown { card, x, y })
    }

    /// Returns true if a card moved (the host should re-position it).
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.engine.handle(&GestureEvent::PointerMove { x, y })
    }

    pub fn pointer_up(&mut self, x: f64, y: f64) -> bool {
        self.engine.handle(&GestureEvent::PointerUp { x, y })
    }

    /// Returns true if this activation completed a connection.
    pub fn double_activate(&mut self, id: f64) -> bool {
        node_id(id).is_some_and(|card| self.engine.handle(&GestureEvent::DoubleActivate { card }))
    }

    /// Topmost card under a board point, for hosts without per-card targets.
    pub fn card_at(&self, x: f64, y: f64) -> Option<f64> {
        self.engine.card_at(Point::new(x, y)).map(js_id)
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    /// Card ids in board order.
    pub fn card_ids(&self) -> js_sys::Array {
        self.engine
            .cards()
            .iter()
            .map(|c| JsValue::from_f64(js_id(c.id)))
            .collect()
    }

    /// Every card as JSON: `[{"id","x","y","frontText","backText","face"}]`.
    pub fn cards_json(&self) -> String {
        let cards: Vec<serde_json::Value> = self
            .engine
            .cards()
            .iter()
            .map(|c| {
                serde_json::json!({
                    "id": js_id(c.id),
                    "x": c.position.x,
                    "y": c.position.y,
                    "frontText": c.front_text,
                    "backText": c.back_text,
                    "face": face_name(c.face),
                })
            })
            .collect();
        serde_json::Value::Array(cards).to_string()
    }

    /// Position of one card as JSON `{"x","y"}`, or `undefined`.
    pub fn card_position(&self, id: f64) -> Option<String> {
        let card = self.engine.cards().get(node_id(id)?)?;
        Some(serde_json::json!({ "x": card.position.x, "y": card.position.y }).to_string())
    }

    pub fn connection_count(&self) -> usize {
        self.engine.connections().len()
    }

    // ─── Persistence ─────────────────────────────────────────────────────

    /// Save the whole board to local storage.
    pub fn save(&mut self) -> Result<(), JsValue> {
        let store = self
            .store
            .as_mut()
            .ok_or_else(|| JsValue::from_str("localStorage unavailable"))?;
        self.engine
            .save(store)
            .map(|_| ())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Replace the board with the saved one. Returns JSON
    /// `{"cards","connections","dropped"}`; a missing or broken save
    /// yields an empty board.
    pub fn load(&mut self) -> String {
        let report = match &self.store {
            Some(store) => self.engine.load(store),
            None => {
                self.engine.clear_all();
                Default::default()
            }
        };
        serde_json::json!({
            "cards": report.cards,
            "connections": report.connections,
            "dropped": report.dropped,
        })
        .to_string()
    }
}

impl FlashcardBoard {
    fn set_text(&mut self, id: f64, side: CardSide, text: &str) -> bool {
        let Some(id) = node_id(id) else {
            return false;
        };
        self.engine.apply(fb_editor::BoardMutation::SetText {
            id,
            side,
            text: text.to_string(),
        })
    }
}

// ─── Logging & panic hook ────────────────────────────────────────────────

fn init_logging() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = console_log::init_with_level(log::Level::Debug);
        console_error_panic_hook::set_once();
        log::info!("flashboard logging initialized");
    });
}
