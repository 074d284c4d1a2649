//! Input abstraction layer.
//!
//! The host owns the real event wiring (DOM listeners, hit testing) and
//! forwards each gesture here already resolved to a target card.

use fb_core::{NodeId, Point};

/// A normalized gesture event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// Pointer pressed on a card. Starts a drag.
    PointerDown { card: NodeId, x: f64, y: f64 },

    /// Pointer moved anywhere on the board.
    PointerMove { x: f64, y: f64 },

    /// Pointer released anywhere. Ends any drag.
    PointerUp { x: f64, y: f64 },

    /// Double activation (double click / double tap) on a card.
    /// Feeds the two-pick linking gesture.
    DoubleActivate { card: NodeId },
}

impl GestureEvent {
    /// Extract position if this is a pointer event.
    pub fn position(&self) -> Option<Point> {
        match self {
            Self::PointerDown { x, y, .. }
            | Self::PointerMove { x, y }
            | Self::PointerUp { x, y } => Some(Point::new(*x, *y)),
            Self::DoubleActivate { .. } => None,
        }
    }

    /// The card this event targets, if any.
    pub fn card(&self) -> Option<NodeId> {
        match self {
            Self::PointerDown { card, .. } | Self::DoubleActivate { card } => Some(*card),
            _ => None,
        }
    }
}
