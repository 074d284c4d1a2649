//! Geometry tracking for cards and their connection anchors.
//!
//! A card's anchor is always the center of its bounding box, derived from
//! its position and the board's fixed card size. Anchors are never stored;
//! every caller recomputes them from the current position.

use kurbo::{Line, Point, Rect, Size};

/// Clamp a requested card position to the non-negative quadrant.
///
/// The board has no upper bound (it scrolls), so only the lower edge is
/// enforced. Non-finite coordinates (NaN, infinities) collapse to `0.0`,
/// since they could not be written to a save record.
pub fn clamp_position(x: f64, y: f64) -> Point {
    Point::new(clamp_axis(x), clamp_axis(y))
}

fn clamp_axis(v: f64) -> f64 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}

/// Bounding box of a card at `position`.
pub fn card_bounds(position: Point, size: Size) -> Rect {
    Rect::from_origin_size(position, size)
}

/// Connection anchor of a card: the center of its bounds.
pub fn anchor(position: Point, size: Size) -> Point {
    card_bounds(position, size).center()
}

/// The drawn segment for a connection between two anchors.
pub fn connection_line(start: Point, end: Point) -> Line {
    Line::new(start, end)
}
