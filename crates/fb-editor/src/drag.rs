//! Drag controller: one pointer drag at a time.
//!
//! `Idle → Dragging → Idle`. Pressing a card captures it together with the
//! pointer's offset from the card origin, so the card does not jump under
//! the pointer. Each move yields the clamped position the card should take.

use crate::board::BoardMutation;
use fb_core::geometry::clamp_position;
use fb_core::{NodeId, Point, Vec2};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        card: NodeId,
        /// Pointer position minus card origin at press time.
        grab: Vec2,
    },
}

#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    /// The card being dragged, if any.
    pub fn active(&self) -> Option<NodeId> {
        match self.state {
            DragState::Dragging { card, .. } => Some(card),
            DragState::Idle => None,
        }
    }

    /// Start dragging `card`, currently at `card_origin`.
    pub fn press(&mut self, card: NodeId, pointer: Point, card_origin: Point) {
        self.state = DragState::Dragging {
            card,
            grab: pointer - card_origin,
        };
        log::debug!("drag start {card}");
    }

    /// Where the active card goes for a pointer at `pointer`.
    /// `None` while idle.
    pub fn drag_to(&self, pointer: Point) -> Option<BoardMutation> {
        let DragState::Dragging { card, grab } = self.state else {
            return None;
        };
        let target = pointer - grab;
        let p = clamp_position(target.x, target.y);
        Some(BoardMutation::MoveCard {
            id: card,
            x: p.x,
            y: p.y,
        })
    }

    /// End the gesture. Returns the card that was being dragged.
    pub fn release(&mut self) -> Option<NodeId> {
        let card = self.active();
        self.state = DragState::Idle;
        if let Some(card) = card {
            log::debug!("drag end {card}");
        }
        card
    }

    /// Drop the drag if it targets `card` (the card was deleted).
    pub fn forget(&mut self, card: NodeId) -> bool {
        if self.active() == Some(card) {
            self.state = DragState::Idle;
            return true;
        }
        false
    }
}
