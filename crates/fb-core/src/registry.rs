//! Node registry: the live set of flashcards in board order.
//!
//! Board order is insertion order and is what the save pass re-indexes
//! over, so removals preserve the relative order of the remaining cards.

use crate::geometry::{card_bounds, clamp_position};
use crate::id::{IdCounter, NodeId};
use crate::model::{CardSide, Face, Flashcard};
use kurbo::{Point, Size};

#[derive(Debug, Clone, Default)]
pub struct NodeRegistry {
    cards: Vec<Flashcard>,
    ids: IdCounter,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a card showing its front face at `position` (clamped).
    pub fn create(&mut self, front_text: &str, back_text: &str, position: Point) -> NodeId {
        let id = NodeId::from_raw(self.ids.next());
        let position = clamp_position(position.x, position.y);
        self.cards.push(Flashcard::new(
            id,
            front_text.to_string(),
            back_text.to_string(),
            position,
        ));
        log::debug!("created {id} at ({}, {})", position.x, position.y);
        id
    }

    /// Remove a card. Returns it if it was live; a second call is a no-op.
    ///
    /// Connections are not touched here; the caller cascades into the
    /// connection graph.
    pub fn remove(&mut self, id: NodeId) -> Option<Flashcard> {
        let pos = self.cards.iter().position(|c| c.id == id)?;
        Some(self.cards.remove(pos))
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    pub fn get(&self, id: NodeId) -> Option<&Flashcard> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Flashcard> {
        self.cards.iter_mut().find(|c| c.id == id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Card handles in board order.
    pub fn ids(&self) -> Vec<NodeId> {
        self.cards.iter().map(|c| c.id).collect()
    }

    /// Cards in board order.
    pub fn iter(&self) -> impl Iterator<Item = &Flashcard> {
        self.cards.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Flashcard> {
        self.cards.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Move a card, clamping both axes to `>= 0`. Returns the applied
    /// position, or `None` if the card is gone.
    pub fn set_position(&mut self, id: NodeId, x: f64, y: f64) -> Option<Point> {
        let card = self.get_mut(id)?;
        card.position = clamp_position(x, y);
        Some(card.position)
    }

    pub fn set_face(&mut self, id: NodeId, face: Face) -> bool {
        match self.get_mut(id) {
            Some(card) => {
                card.face = face;
                true
            }
            None => false,
        }
    }

    /// Toggle the visible face. Returns the new face.
    pub fn flip(&mut self, id: NodeId) -> Option<Face> {
        let card = self.get_mut(id)?;
        card.face = card.face.flipped();
        Some(card.face)
    }

    pub fn set_text(&mut self, id: NodeId, side: CardSide, text: &str) -> bool {
        let Some(card) = self.get_mut(id) else {
            return false;
        };
        let slot = match side {
            CardSide::Front => &mut card.front_text,
            CardSide::Back => &mut card.back_text,
        };
        text.clone_into(slot);
        true
    }

    pub fn set_front_text(&mut self, id: NodeId, text: &str) -> bool {
        self.set_text(id, CardSide::Front, text)
    }

    pub fn set_back_text(&mut self, id: NodeId, text: &str) -> bool {
        self.set_text(id, CardSide::Back, text)
    }

    /// Topmost card whose bounds contain `point`.
    ///
    /// Later cards paint over earlier ones, so the search runs back to front.
    pub fn card_at(&self, point: Point, size: Size) -> Option<NodeId> {
        self.cards
            .iter()
            .rev()
            .find(|c| card_bounds(c.position, size).contains(point))
            .map(|c| c.id)
    }
}
