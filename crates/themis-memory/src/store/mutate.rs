use super::MemoryIndex;
use crate::error::{Error, Result};
use crate::lookup;
use crate::types::{Edge, Node};
use crate::validate;

use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

impl MemoryIndex {
    // ── Upserts ─────────────────────────────────────────────────

    /// Insert or fully replace a node from a loose payload.
    ///
    /// A payload carrying no `nodeId` (or a blank one) gets a generated id.
    /// Validation failure rejects the whole write: the store, including its
    /// lookup tables, is left byte-for-byte unchanged. Replacing an existing
    /// node first retracts its old tag/entity entries, then applies the new
    /// ones — a replace, never a merge.
    pub fn upsert_node(&mut self, payload: &Value, now: i64) -> Result<Node> {
        let payload = with_generated_id(payload, "nodeId");
        let node = validate::validate_node(&payload).map_err(Error::Validation)?;

        if let Some(old) = self.nodes.remove(&node.node_id) {
            self.retract_node_entries(&old);
        }
        for tag in &node.tags {
            lookup::add(&mut self.tags, tag, &node.node_id);
        }
        for entity in &node.entity_refs {
            lookup::add(&mut self.entities, entity, &node.node_id);
        }
        self.nodes.insert(node.node_id.clone(), node.clone());
        self.touch(now);

        debug!(node_id = %node.node_id, kind = %node.kind, "upserted node");
        Ok(node)
    }

    /// Insert or fully replace an edge from a loose payload.
    ///
    /// Shape validation runs first; then both endpoints must resolve to
    /// stored nodes, checked strictly before any mutation. A payload with no
    /// `edgeId` gets a generated one.
    pub fn upsert_edge(&mut self, payload: &Value, now: i64) -> Result<Edge> {
        let payload = with_generated_id(payload, "edgeId");
        let edge = validate::validate_edge(&payload).map_err(Error::Validation)?;

        if !self.nodes.contains_key(&edge.from) {
            return Err(Error::DanglingEndpoint(edge.from));
        }
        if !self.nodes.contains_key(&edge.to) {
            return Err(Error::DanglingEndpoint(edge.to));
        }

        self.edges.insert(edge.edge_id.clone(), edge.clone());
        self.touch(now);

        debug!(edge_id = %edge.edge_id, from = %edge.from, to = %edge.to, "upserted edge");
        Ok(edge)
    }

    // ── Removals ────────────────────────────────────────────────

    /// Remove a node, cascading to every edge that touches it.
    ///
    /// Idempotent: removing an absent node returns `false` without touching
    /// the store.
    pub fn remove_node(&mut self, node_id: &str, now: i64) -> bool {
        let node = match self.nodes.remove(node_id) {
            Some(node) => node,
            None => return false,
        };
        self.retract_node_entries(&node);

        let cascade: Vec<String> = self
            .edges
            .iter()
            .filter(|(_, edge)| edge.from == node_id || edge.to == node_id)
            .map(|(id, _)| id.clone())
            .collect();
        for edge_id in &cascade {
            self.edges.remove(edge_id);
        }
        self.touch(now);

        debug!(node_id, cascaded_edges = cascade.len(), "removed node");
        true
    }

    /// Remove an edge. Idempotent: absent ids return `false`.
    pub fn remove_edge(&mut self, edge_id: &str, now: i64) -> bool {
        if self.edges.remove(edge_id).is_none() {
            return false;
        }
        self.touch(now);
        debug!(edge_id, "removed edge");
        true
    }

    fn retract_node_entries(&mut self, node: &Node) {
        for tag in &node.tags {
            lookup::remove(&mut self.tags, tag, &node.node_id);
        }
        for entity in &node.entity_refs {
            lookup::remove(&mut self.entities, entity, &node.node_id);
        }
    }
}

/// Fill in a generated id when the payload carries none.
///
/// Non-object payloads pass through untouched; the validator reports them.
fn with_generated_id(payload: &Value, field: &str) -> Value {
    let mut payload = payload.clone();
    if let Some(obj) = payload.as_object_mut() {
        let blank = match obj.get(field) {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.trim().is_empty(),
            Some(_) => false,
        };
        if blank {
            obj.insert(
                field.to_string(),
                Value::String(Uuid::new_v4().to_string()),
            );
        }
    }
    payload
}
