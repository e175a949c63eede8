use super::MemoryIndex;
use crate::types::{Edge, MemoryStats, Node};

use std::collections::BTreeSet;

impl MemoryIndex {
    // ── Point lookups ───────────────────────────────────────────

    /// Get a node by id.
    pub fn get_node(&self, node_id: &str) -> Option<&Node> {
        self.nodes.get(node_id)
    }

    /// Get an edge by id.
    pub fn get_edge(&self, edge_id: &str) -> Option<&Edge> {
        self.edges.get(edge_id)
    }

    // ── Index-backed finders ────────────────────────────────────

    /// All live nodes carrying `tag`, sorted by node id.
    pub fn find_by_tag(&self, tag: &str) -> Vec<&Node> {
        self.resolve_ids(self.tags.get(tag))
    }

    /// All live nodes referencing `entity`, sorted by node id.
    pub fn find_by_entity(&self, entity: &str) -> Vec<&Node> {
        self.resolve_ids(self.entities.get(entity))
    }

    /// Resolve an id set against the primary node map.
    ///
    /// Ids with no live node are skipped rather than surfaced, so lookup
    /// tables can never leak a stale id to a caller.
    fn resolve_ids(&self, ids: Option<&BTreeSet<String>>) -> Vec<&Node> {
        match ids {
            Some(ids) => ids.iter().filter_map(|id| self.nodes.get(id)).collect(),
            None => Vec::new(),
        }
    }

    // ── Traversal ───────────────────────────────────────────────

    /// Distinct nodes connected to `node_id` by any edge, in either
    /// direction, sorted by node id.
    pub fn neighbors(&self, node_id: &str) -> Vec<&Node> {
        let mut ids = BTreeSet::new();
        for edge in self.edges.values() {
            if edge.from == node_id {
                ids.insert(edge.to.as_str());
            } else if edge.to == node_id {
                ids.insert(edge.from.as_str());
            }
        }
        ids.iter().filter_map(|id| self.nodes.get(*id)).collect()
    }

    /// Edges originating at `node_id`, sorted by edge id.
    pub fn edges_from(&self, node_id: &str) -> Vec<&Edge> {
        let mut out: Vec<&Edge> = self
            .edges
            .values()
            .filter(|edge| edge.from == node_id)
            .collect();
        out.sort_by(|a, b| a.edge_id.cmp(&b.edge_id));
        out
    }

    /// Edges terminating at `node_id`, sorted by edge id.
    pub fn edges_to(&self, node_id: &str) -> Vec<&Edge> {
        let mut out: Vec<&Edge> = self
            .edges
            .values()
            .filter(|edge| edge.to == node_id)
            .collect();
        out.sort_by(|a, b| a.edge_id.cmp(&b.edge_id));
        out
    }

    // ── Search & listing ────────────────────────────────────────

    /// Case-insensitive substring search over node titles and content,
    /// newest first, optionally filtered by kind.
    pub fn search_nodes(&self, query: &str, kind: Option<&str>, limit: usize) -> Vec<&Node> {
        let needle = query.to_lowercase();
        let mut hits: Vec<&Node> = self
            .nodes
            .values()
            .filter(|node| kind.is_none_or(|k| node.kind == k))
            .filter(|node| {
                node.title.to_lowercase().contains(&needle)
                    || node
                        .content
                        .as_deref()
                        .is_some_and(|c| c.to_lowercase().contains(&needle))
            })
            .collect();
        hits.sort_by(|a, b| b.ts.cmp(&a.ts).then_with(|| a.node_id.cmp(&b.node_id)));
        hits.truncate(limit);
        hits
    }

    /// List nodes newest first, optionally filtered by kind.
    pub fn list_nodes(&self, kind: Option<&str>, limit: usize) -> Vec<&Node> {
        let mut out: Vec<&Node> = self
            .nodes
            .values()
            .filter(|node| kind.is_none_or(|k| node.kind == k))
            .collect();
        out.sort_by(|a, b| b.ts.cmp(&a.ts).then_with(|| a.node_id.cmp(&b.node_id)));
        out.truncate(limit);
        out
    }

    /// List edges sorted by edge id.
    pub fn list_edges(&self, limit: usize) -> Vec<&Edge> {
        let mut out: Vec<&Edge> = self.edges.values().collect();
        out.sort_by(|a, b| a.edge_id.cmp(&b.edge_id));
        out.truncate(limit);
        out
    }

    // ── Stats ───────────────────────────────────────────────────

    /// Number of stored nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of stored edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// O(1) summary: counts plus the last-mutation timestamp.
    pub fn stats(&self) -> MemoryStats {
        MemoryStats {
            node_count: self.nodes.len(),
            edge_count: self.edges.len(),
            updated_at: self.updated_at,
        }
    }
}
