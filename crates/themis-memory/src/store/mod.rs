//! MemoryIndex — the authoritative in-memory cognition graph.

use crate::document::{MemoryDocument, DOCUMENT_VERSION};
use crate::error::{Error, Result};
use crate::lookup::{self, LookupTable};
use crate::types::{Edge, Node};
use crate::validate::{self, Issue};

use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, info};

mod mutate;
mod query;


/// In-memory indexed knowledge graph.
///
/// Holds the authoritative node and edge maps plus two derived lookup
/// tables (tag → node ids, entity ref → node ids) kept consistent under
/// every mutation. Edges are referentially sound at all times: both
/// endpoints of every stored edge resolve to stored nodes, and deleting a
/// node cascades to every edge touching it.
///
/// The store is a plain synchronous structure with no interior locking;
/// callers sharing one across threads serialize access themselves (a mutex
/// around each call, or confinement to a single owning task).
#[derive(Debug, Clone)]
pub struct MemoryIndex {
    version: u64,
    updated_at: i64,
    nodes: HashMap<String, Node>,
    edges: HashMap<String, Edge>,
    tags: LookupTable,
    entities: LookupTable,
}

impl MemoryIndex {
    /// Create an empty store stamped with `now`.
    pub fn new(now: i64) -> Self {
        debug!("memory index created");
        Self {
            version: DOCUMENT_VERSION,
            updated_at: now,
            nodes: HashMap::new(),
            edges: HashMap::new(),
            tags: LookupTable::new(),
            entities: LookupTable::new(),
        }
    }

    /// Rebuild a store from a previously serialized document.
    ///
    /// The document is fully re-validated — shape first, then referential
    /// integrity of every edge — and any defect fails construction with the
    /// complete defect list. No partially hydrated store is ever returned.
    ///
    /// The document's lookup tables are checked for shape but the live
    /// indices are rebuilt from the validated nodes: the tables are derived
    /// state, never authoritative.
    pub fn hydrate(value: &Value) -> Result<Self> {
        let doc = validate::validate_document(value).map_err(Error::Hydration)?;

        let mut issues = Vec::new();
        for (id, edge) in &doc.edges {
            if !doc.nodes.contains_key(&edge.from) {
                issues.push(Issue::new(
                    format!("edges.{id}.from"),
                    format!("references missing node '{}'", edge.from),
                ));
            }
            if !doc.nodes.contains_key(&edge.to) {
                issues.push(Issue::new(
                    format!("edges.{id}.to"),
                    format!("references missing node '{}'", edge.to),
                ));
            }
        }
        if !issues.is_empty() {
            return Err(Error::Hydration(issues));
        }

        let mut store = Self {
            version: doc.version,
            updated_at: doc.updated_at,
            nodes: doc.nodes.into_iter().collect(),
            edges: doc.edges.into_iter().collect(),
            tags: LookupTable::new(),
            entities: LookupTable::new(),
        };
        for node in store.nodes.values() {
            for tag in &node.tags {
                lookup::add(&mut store.tags, tag, &node.node_id);
            }
            for entity in &node.entity_refs {
                lookup::add(&mut store.entities, entity, &node.node_id);
            }
        }

        info!(
            nodes = store.nodes.len(),
            edges = store.edges.len(),
            "memory index hydrated"
        );
        Ok(store)
    }

    /// Project the live state into its canonical document.
    pub fn to_document(&self) -> MemoryDocument {
        MemoryDocument {
            version: self.version,
            updated_at: self.updated_at,
            nodes: self
                .nodes
                .iter()
                .map(|(id, node)| (id.clone(), node.clone()))
                .collect(),
            edges: self
                .edges
                .iter()
                .map(|(id, edge)| (id.clone(), edge.clone()))
                .collect(),
            tags: lookup::snapshot(&self.tags),
            entities: lookup::snapshot(&self.entities),
        }
    }

    /// Serialize to the round-trippable JSON interchange value.
    pub fn to_json(&self) -> Result<Value> {
        Ok(serde_json::to_value(self.to_document())?)
    }

    fn touch(&mut self, now: i64) {
        self.updated_at = now;
    }
}
