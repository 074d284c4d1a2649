//! Board data model: flashcards and the connections drawn between them.
//!
//! Cards own their text, position and face. Connections are non-owning
//! relations between two card handles plus an exclusively owned drawn line.

use crate::id::{ConnectionId, NodeId};
use crate::surface::LineId;
use kurbo::Point;

/// Which face of a card is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Face {
    #[default]
    Front,
    Back,
}

impl Face {
    pub fn flipped(self) -> Self {
        match self {
            Face::Front => Face::Back,
            Face::Back => Face::Front,
        }
    }
}

/// One of the two editable text areas of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardSide {
    Front,
    Back,
}

/// A single flashcard on the board.
#[derive(Debug, Clone, PartialEq)]
pub struct Flashcard {
    /// Creation-time handle. Stable for the card's lifetime.
    pub id: NodeId,

    /// Top-left offset on the board. Always non-negative.
    pub position: Point,

    pub front_text: String,
    pub back_text: String,

    /// Not persisted; every loaded card starts on `Front`.
    pub face: Face,

    /// Record id from the last save (dense `0..N`) or restored by load.
    /// `None` for cards created since.
    pub saved_id: Option<u64>,
}

impl Flashcard {
    pub fn new(id: NodeId, front_text: String, back_text: String, position: Point) -> Self {
        Self {
            id,
            position,
            front_text,
            back_text,
            face: Face::Front,
            saved_id: None,
        }
    }

    pub fn text(&self, side: CardSide) -> &str {
        match side {
            CardSide::Front => &self.front_text,
            CardSide::Back => &self.back_text,
        }
    }
}

/// A link between two cards.
///
/// Stored with a direction (`start` → `end`) but meaningful in both.
/// `start == end` is a permitted self-loop.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub id: ConnectionId,
    pub start: NodeId,
    pub end: NodeId,
    /// Drawn representation, released on every destruction path.
    pub line: LineId,
}

impl Connection {
    pub fn touches(&self, node: NodeId) -> bool {
        self.start == node || self.end == node
    }
}
