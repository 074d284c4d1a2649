//! Board engine: the single owner of cards, connections and the surface.
//!
//! Every change to the board goes through here, either as a direct call or
//! as a `BoardMutation`, so the connection lines on the surface always
//! match card geometry:
//!
//! - **Move**: the card is repositioned (clamped), then every connection
//!   touching it is redrawn before the call returns. There is no batching;
//!   a continuous drag redraws on every move event.
//! - **Delete**: the card leaves the registry and all of its connections are
//!   destroyed with their lines. An in-flight drag or pending pick on the
//!   card is dropped.
//! - **Save / load**: the board is flattened through `fb_core::persist` and
//!   written whole under the configured key; loading replaces the board.

use crate::drag::DragController;
use crate::input::GestureEvent;
use crate::pick::PickGesture;
use fb_core::geometry::anchor;
use fb_core::persist;
use fb_core::{
    BlobStore, BoardConfig, CardSide, ConnectionGraph, ConnectionId, Face, LineSurface, LoadError,
    NodeId, NodeRegistry, Point, SaveError, Size,
};

/// A single edit to the board.
#[derive(Debug, Clone, PartialEq)]
pub enum BoardMutation {
    AddCard { front: String, back: String },
    DeleteCard { id: NodeId },
    MoveCard { id: NodeId, x: f64, y: f64 },
    SetFace { id: NodeId, face: Face },
    Flip { id: NodeId },
    SetText { id: NodeId, side: CardSide, text: String },
    Connect { start: NodeId, end: NodeId },
    ClearAll,
}

/// What a save wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SaveSummary {
    pub cards: usize,
    pub connections: usize,
}

/// What a load restored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadReport {
    pub cards: usize,
    pub connections: usize,
    /// Connection records skipped because an endpoint id matched no card.
    pub dropped: usize,
}

/// Anchor lookup over the live cards.
fn anchors(cards: &NodeRegistry, size: Size) -> impl Fn(NodeId) -> Option<Point> + '_ {
    move |id| cards.get(id).map(|c| anchor(c.position, size))
}

pub struct BoardEngine<S: LineSurface> {
    cards: NodeRegistry,
    connections: ConnectionGraph,
    surface: S,
    config: BoardConfig,
    drag: DragController,
    pick: PickGesture,
}

impl<S: LineSurface> BoardEngine<S> {
    pub fn new(config: BoardConfig, surface: S) -> Self {
        Self {
            cards: NodeRegistry::new(),
            connections: ConnectionGraph::new(),
            surface,
            config,
            drag: DragController::new(),
            pick: PickGesture::new(),
        }
    }

    pub fn cards(&self) -> &NodeRegistry {
        &self.cards
    }

    pub fn connections(&self) -> &ConnectionGraph {
        &self.connections
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    pub fn pick(&self) -> &PickGesture {
        &self.pick
    }

    /// Current anchor (center) of a live card.
    pub fn anchor(&self, id: NodeId) -> Option<Point> {
        anchors(&self.cards, self.config.card_size)(id)
    }

    /// Topmost card under a board point.
    pub fn card_at(&self, point: Point) -> Option<NodeId> {
        self.cards.card_at(point, self.config.card_size)
    }

    // ─── Mutations ───────────────────────────────────────────────────────

    /// Apply one mutation. Returns whether the board changed.
    pub fn apply(&mut self, mutation: BoardMutation) -> bool {
        match mutation {
            BoardMutation::AddCard { front, back } => {
                self.add_card(&front, &back);
                true
            }
            BoardMutation::DeleteCard { id } => self.delete_card(id),
            BoardMutation::MoveCard { id, x, y } => self.move_card(id, x, y),
            BoardMutation::SetFace { id, face } => self.cards.set_face(id, face),
            BoardMutation::Flip { id } => self.flip(id).is_some(),
            BoardMutation::SetText { id, side, text } => self.cards.set_text(id, side, &text),
            BoardMutation::Connect { start, end } => self.connect(start, end).is_some(),
            BoardMutation::ClearAll => self.clear_all(),
        }
    }

    /// Add a card at the configured spawn position, front face up.
    pub fn add_card(&mut self, front: &str, back: &str) -> NodeId {
        self.cards.create(front, back, self.config.spawn_position)
    }

    /// Delete a card and cascade to its connections. No-op if already gone.
    pub fn delete_card(&mut self, id: NodeId) -> bool {
        if self.cards.remove(id).is_none() {
            return false;
        }
        self.connections.remove_touching(id, &mut self.surface);
        self.drag.forget(id);
        self.pick.forget(id);
        log::debug!("deleted {id}");
        true
    }

    /// Reposition a card and redraw its connections.
    pub fn move_card(&mut self, id: NodeId, x: f64, y: f64) -> bool {
        if self.cards.set_position(id, x, y).is_none() {
            return false;
        }
        let size = self.config.card_size;
        self.connections
            .on_node_moved(id, anchors(&self.cards, size), &mut self.surface);
        true
    }

    pub fn flip(&mut self, id: NodeId) -> Option<Face> {
        self.cards.flip(id)
    }

    /// Link two live cards. Duplicates and self-loops are allowed.
    pub fn connect(&mut self, start: NodeId, end: NodeId) -> Option<ConnectionId> {
        let size = self.config.card_size;
        let id = self.connections.connect(
            start,
            end,
            anchors(&self.cards, size),
            &mut self.surface,
        );
        if id.is_none() {
            log::debug!("not connecting {start} -> {end}: card missing");
        }
        id
    }

    /// Remove every card and connection. Returns whether anything was there.
    pub fn clear_all(&mut self) -> bool {
        let changed = !self.cards.is_empty() || !self.connections.is_empty();
        self.connections.clear_all(&mut self.surface);
        self.cards.clear();
        self.drag.release();
        self.pick.reset();
        changed
    }

    // ─── Gestures ────────────────────────────────────────────────────────

    pub fn handle(&mut self, event: &GestureEvent) -> bool {
        match *event {
            GestureEvent::PointerDown { card, x, y } => self.pointer_down(card, x, y),
            GestureEvent::PointerMove { x, y } => self.pointer_move(x, y),
            GestureEvent::PointerUp { .. } => self.pointer_up(),
            GestureEvent::DoubleActivate { card } => self.double_activate(card),
        }
    }

    /// Press on a card: it becomes the drag target.
    pub fn pointer_down(&mut self, card: NodeId, x: f64, y: f64) -> bool {
        let Some(origin) = self.cards.get(card).map(|c| c.position) else {
            return false;
        };
        self.drag.press(card, Point::new(x, y), origin);
        true
    }

    /// Move the drag target, if any. Returns whether a card moved.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        match self.drag.drag_to(Point::new(x, y)) {
            Some(mutation) => self.apply(mutation),
            None => false,
        }
    }

    pub fn pointer_up(&mut self) -> bool {
        self.drag.release().is_some()
    }

    /// Feed the linking gesture. Returns whether a connection was made.
    pub fn double_activate(&mut self, card: NodeId) -> bool {
        if !self.cards.contains(card) {
            return false;
        }
        match self.pick.pick(card) {
            Some(mutation) => self.apply(mutation),
            None => false,
        }
    }

    // ─── Persistence ─────────────────────────────────────────────────────

    /// Write the whole board to `store`, replacing any previous save.
    ///
    /// Re-indexes every card's `saved_id` to its board-order position.
    pub fn save<B: BlobStore + ?Sized>(&mut self, store: &mut B) -> Result<SaveSummary, SaveError> {
        let record = persist::encode(&mut self.cards, &self.connections);
        let json = persist::to_json(&record)?;
        store.set(&self.config.storage_key, &json)?;
        let summary = SaveSummary {
            cards: record.flashcards.len(),
            connections: record.connections.len(),
        };
        log::info!(
            "saved {} card(s), {} connection(s)",
            summary.cards,
            summary.connections
        );
        Ok(summary)
    }

    /// Replace the board with the saved one.
    ///
    /// On error the board is left untouched. Cards are all restored before
    /// any connection is resolved.
    pub fn try_load<B: BlobStore + ?Sized>(&mut self, store: &B) -> Result<LoadReport, LoadError> {
        let value = store.get(&self.config.storage_key);
        let record = persist::decode(value.as_deref())?;
        let seeds = persist::seeds(&record)?;

        self.clear_all();
        let lookup = persist::restore_cards(seeds, &mut self.cards, self.config.spawn_position);
        let (pairs, dropped) = persist::resolve_links(&record.connections, &lookup);
        let mut connections = 0;
        for (start, end) in pairs {
            if self.connect(start, end).is_some() {
                connections += 1;
            }
        }

        let report = LoadReport {
            cards: self.cards.len(),
            connections,
            dropped,
        };
        log::info!(
            "loaded {} card(s), {} connection(s), dropped {}",
            report.cards,
            report.connections,
            report.dropped
        );
        Ok(report)
    }

    /// Like `try_load`, but any failure leaves an empty board.
    pub fn load<B: BlobStore + ?Sized>(&mut self, store: &B) -> LoadReport {
        match self.try_load(store) {
            Ok(report) => report,
            Err(LoadError::NoSavedData) => {
                log::debug!("no saved board, starting empty");
                self.clear_all();
                LoadReport::default()
            }
            Err(e) => {
                log::warn!("discarding saved board: {e}");
                self.clear_all();
                LoadReport::default()
            }
        }
    }
}

impl<S: LineSurface + Default> Default for BoardEngine<S> {
    fn default() -> Self {
        Self::new(BoardConfig::default(), S::default())
    }
}
