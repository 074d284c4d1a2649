//! Connection graph: the links drawn between cards.
//!
//! Topology lives in a `StableDiGraph` whose node weights are card handles
//! and whose edge weights are the connections themselves. Parallel edges
//! and self-loops are both legal. Edge indices are recycled by petgraph, so
//! enumeration sorts by `ConnectionId` to stay in creation order.
//!
//! The graph owns every drawn line. Each destruction path (cascade from a
//! card delete, clear-all) releases the line on the surface before the
//! connection is dropped.

use crate::geometry::connection_line;
use crate::id::{ConnectionId, IdCounter, NodeId};
use crate::model::Connection;
use crate::surface::LineSurface;
use kurbo::Point;
use petgraph::Direction;
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;
use smallvec::SmallVec;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct ConnectionGraph {
    graph: StableDiGraph<NodeId, Connection>,

    /// Card handle → graph node, for cards that have ever been linked.
    index: HashMap<NodeId, NodeIndex>,

    ids: IdCounter,
}

impl ConnectionGraph {
    pub fn new() -> Self {
        Self::default()
    }

    fn node_index(&mut self, id: NodeId) -> NodeIndex {
        if let Some(&idx) = self.index.get(&id) {
            return idx;
        }
        let idx = self.graph.add_node(id);
        self.index.insert(id, idx);
        idx
    }

    /// Edges incident to a card. Self-loops are reported once.
    fn incident(&self, id: NodeId) -> SmallVec<[EdgeIndex; 4]> {
        let mut out = SmallVec::new();
        let Some(&idx) = self.index.get(&id) else {
            return out;
        };
        for dir in [Direction::Outgoing, Direction::Incoming] {
            for edge in self.graph.edges_directed(idx, dir) {
                if !out.contains(&edge.id()) {
                    out.push(edge.id());
                }
            }
        }
        out
    }

    /// Link two cards and draw the line between their current anchors.
    ///
    /// `anchor_of` resolves a card to its anchor, or `None` if the card is
    /// not live; in that case nothing is created. No de-duplication: every
    /// call adds one more connection, and `start == end` is allowed.
    pub fn connect<S, F>(
        &mut self,
        start: NodeId,
        end: NodeId,
        anchor_of: F,
        surface: &mut S,
    ) -> Option<ConnectionId>
    where
        S: LineSurface + ?Sized,
        F: Fn(NodeId) -> Option<Point>,
    {
        let (p0, p1) = (anchor_of(start)?, anchor_of(end)?);
        let line = surface.draw_line(connection_line(p0, p1));
        let id = ConnectionId::from_raw(self.ids.next());
        let a = self.node_index(start);
        let b = self.node_index(end);
        self.graph.add_edge(
            a,
            b,
            Connection {
                id,
                start,
                end,
                line,
            },
        );
        log::debug!("connected {start} -> {end} as {id:?}");
        Some(id)
    }

    /// Refresh the drawn endpoints of every connection touching `moved`.
    ///
    /// Called synchronously on each position change. Returns the number of
    /// lines updated.
    pub fn on_node_moved<S, F>(&self, moved: NodeId, anchor_of: F, surface: &mut S) -> usize
    where
        S: LineSurface + ?Sized,
        F: Fn(NodeId) -> Option<Point>,
    {
        let mut updated = 0;
        for edge in self.incident(moved) {
            let Some(conn) = self.graph.edge_weight(edge) else {
                continue;
            };
            if let (Some(p0), Some(p1)) = (anchor_of(conn.start), anchor_of(conn.end)) {
                surface.update_line(conn.line, connection_line(p0, p1));
                updated += 1;
            }
        }
        log::trace!("{moved} moved, refreshed {updated} line(s)");
        updated
    }

    /// Destroy every connection referencing `id`, releasing their lines.
    pub fn remove_touching<S>(&mut self, id: NodeId, surface: &mut S) -> usize
    where
        S: LineSurface + ?Sized,
    {
        let edges = self.incident(id);
        let removed = edges.len();
        for edge in edges {
            if let Some(conn) = self.graph.remove_edge(edge) {
                surface.remove_line(conn.line);
            }
        }
        if let Some(idx) = self.index.remove(&id) {
            self.graph.remove_node(idx);
        }
        if removed > 0 {
            log::debug!("removed {removed} connection(s) touching {id}");
        }
        removed
    }

    /// Destroy every connection. Calling it on an empty graph is a no-op.
    pub fn clear_all<S>(&mut self, surface: &mut S)
    where
        S: LineSurface + ?Sized,
    {
        for edge in self.graph.edge_indices().collect::<Vec<_>>() {
            if let Some(conn) = self.graph.remove_edge(edge) {
                surface.remove_line(conn.line);
            }
        }
        self.graph.clear();
        self.index.clear();
    }

    /// Connections in creation order.
    pub fn list(&self) -> Vec<&Connection> {
        let mut conns: Vec<&Connection> = self
            .graph
            .edge_indices()
            .filter_map(|e| self.graph.edge_weight(e))
            .collect();
        conns.sort_by_key(|c| c.id);
        conns
    }

    /// Ids of connections touching `id`, in creation order.
    pub fn touching(&self, id: NodeId) -> Vec<ConnectionId> {
        let mut ids: Vec<ConnectionId> = self
            .incident(id)
            .into_iter()
            .filter_map(|e| self.graph.edge_weight(e).map(|c| c.id))
            .collect();
        ids.sort();
        ids
    }

    pub fn get(&self, id: ConnectionId) -> Option<&Connection> {
        self.graph
            .edge_indices()
            .filter_map(|e| self.graph.edge_weight(e))
            .find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.edge_count() == 0
    }
}
