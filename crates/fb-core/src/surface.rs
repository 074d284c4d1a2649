//! Rendering-surface collaborator for connection lines.
//!
//! The board never touches a real drawing layer; it asks a `LineSurface`
//! to draw, move and remove segments. Each line is owned by exactly one
//! connection and must be removed when that connection is destroyed.

use kurbo::Line;
use std::collections::BTreeMap;

/// Opaque handle for a drawn line, issued by the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId(u64);

impl LineId {
    pub const fn from_raw(raw: u64) -> Self {
        LineId(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Something that can display straight connection lines.
pub trait LineSurface {
    /// Draw a new line and return its handle.
    fn draw_line(&mut self, line: Line) -> LineId;

    /// Move both endpoints of an existing line.
    fn update_line(&mut self, id: LineId, line: Line);

    /// Remove a line from the surface. Unknown handles are ignored.
    fn remove_line(&mut self, id: LineId);
}

/// Headless surface that keeps line geometry in memory.
///
/// Used by native hosts and tests: `live_lines()` exposes exactly what
/// would be on screen, so leaked lines are observable.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    lines: BTreeMap<LineId, Line>,
    next: u64,
    removed: usize,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&self, id: LineId) -> Option<Line> {
        self.lines.get(&id).copied()
    }

    pub fn live_lines(&self) -> usize {
        self.lines.len()
    }

    /// Total number of `remove_line` calls that removed something.
    pub fn removed_count(&self) -> usize {
        self.removed
    }
}

impl LineSurface for MemorySurface {
    fn draw_line(&mut self, line: Line) -> LineId {
        let id = LineId(self.next);
        self.next += 1;
        self.lines.insert(id, line);
        id
    }

    fn update_line(&mut self, id: LineId, line: Line) {
        if let Some(slot) = self.lines.get_mut(&id) {
            *slot = line;
        }
    }

    fn remove_line(&mut self, id: LineId) {
        if self.lines.remove(&id).is_some() {
            self.removed += 1;
        }
    }
}
