//! Two-pick linking gesture.
//!
//! `WaitingForStart → WaitingForEnd → (Connect) → WaitingForStart`.
//! The second pick always resets the gesture, even when it names the same
//! card as the first (which links the card to itself).

use crate::board::BoardMutation;
use fb_core::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickState {
    #[default]
    WaitingForStart,
    WaitingForEnd {
        start: NodeId,
    },
}

#[derive(Debug, Clone, Default)]
pub struct PickGesture {
    state: PickState,
}

impl PickGesture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PickState {
        self.state
    }

    /// The card picked as start, while waiting for the end pick.
    pub fn pending(&self) -> Option<NodeId> {
        match self.state {
            PickState::WaitingForEnd { start } => Some(start),
            PickState::WaitingForStart => None,
        }
    }

    /// Feed one pick. Returns the connection to make on the second pick.
    pub fn pick(&mut self, card: NodeId) -> Option<BoardMutation> {
        match self.state {
            PickState::WaitingForStart => {
                self.state = PickState::WaitingForEnd { start: card };
                log::debug!("link start {card}");
                None
            }
            PickState::WaitingForEnd { start } => {
                self.state = PickState::WaitingForStart;
                Some(BoardMutation::Connect { start, end: card })
            }
        }
    }

    pub fn reset(&mut self) {
        self.state = PickState::WaitingForStart;
    }

    /// Reset if `card` is the pending start (the card was deleted).
    pub fn forget(&mut self, card: NodeId) -> bool {
        if self.pending() == Some(card) {
            self.reset();
            return true;
        }
        false
    }
}
