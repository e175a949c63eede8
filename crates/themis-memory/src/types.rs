//! Core data types for the cognition graph.
//!
//! The graph connects **nodes** (recorded facts, observations, decisions)
//! through directed, weighted, typed **edges**. Both carry the JSON field
//! names the governance modules exchange (`nodeId`, `entityRefs`, ...), so
//! serializing a validated value reproduces the document shape exactly.

use serde::{Deserialize, Serialize};

/// A unit of recorded knowledge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Opaque unique identifier (caller-assigned or generated)
    pub node_id: String,
    /// Free-form classification tag (e.g. `"fact"`, `"decision"`)
    pub kind: String,
    /// Display title
    pub title: String,
    /// Optional free-text body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Ordered set of tags, duplicates removed
    #[serde(default)]
    pub tags: Vec<String>,
    /// Ordered set of referenced external entity ids, duplicates removed
    #[serde(default)]
    pub entity_refs: Vec<String>,
    /// Epoch-millisecond timestamp
    pub ts: i64,
    /// Optional open-ended key/value map
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

/// A directed, weighted, typed relation between two stored nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    /// Opaque unique identifier
    pub edge_id: String,
    /// Source node id (must exist in the store)
    pub from: String,
    /// Target node id (must exist in the store)
    pub to: String,
    /// Relation type (e.g. `"supports"`, `"contradicts"`)
    pub relation: String,
    /// Non-negative relation weight
    #[serde(default = "default_weight")]
    pub weight: f64,
    /// Epoch-millisecond timestamp
    pub ts: i64,
    /// Optional open-ended key/value map
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

fn default_weight() -> f64 {
    1.0
}

/// O(1) summary of a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryStats {
    /// Number of stored nodes
    pub node_count: usize,
    /// Number of stored edges
    pub edge_count: usize,
    /// Timestamp of the last successful mutation (epoch ms)
    pub updated_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_field_names() {
        let node = Node {
            node_id: "n1".into(),
            kind: "fact".into(),
            title: "A".into(),
            content: None,
            tags: vec!["x".into()],
            entity_refs: vec!["agent:7".into()],
            ts: 1000,
            metadata: None,
        };
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["nodeId"], "n1");
        assert_eq!(json["entityRefs"][0], "agent:7");
        // Absent optionals are omitted, not null
        assert!(json.get("content").is_none());
        assert!(json.get("metadata").is_none());
    }

    #[test]
    fn test_edge_weight_defaults_on_deserialize() {
        let edge: Edge = serde_json::from_value(serde_json::json!({
            "edgeId": "e1",
            "from": "n1",
            "to": "n2",
            "relation": "supports",
            "ts": 1000,
        }))
        .unwrap();
        assert_eq!(edge.weight, 1.0);
    }

    #[test]
    fn test_node_serialization_roundtrip() {
        let node = Node {
            node_id: "n1".into(),
            kind: "observation".into(),
            title: "latency spike".into(),
            content: Some("p99 at 1.4s".into()),
            tags: vec!["perf".into()],
            entity_refs: vec![],
            ts: 42,
            metadata: None,
        };
        let json = serde_json::to_string(&node).unwrap();
        let back: Node = serde_json::from_str(&json).unwrap();
        assert_eq!(back, node);
    }
}
