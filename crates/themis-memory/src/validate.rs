//! Value validators — untyped documents in, typed values or defect lists out.
//!
//! Collaborating modules hand the store loosely-typed JSON. The validators
//! here decide deterministically whether a value is a well-formed node, edge,
//! or whole-index document, and normalize it into the closed types from
//! [`crate::types`]. Malformed input is an expected outcome, not an
//! exceptional one: a failed validation returns *every* violated constraint,
//! each qualified with a path into the original input, never just the first.
//!
//! Normalization rules:
//! - strings are trimmed; empty-after-trim counts as absent/invalid
//! - timestamps accept an integer, a numeric string, or an ISO-8601 string,
//!   and normalize to epoch milliseconds
//! - string arrays keep order, drop duplicates, and report each invalid
//!   element under its own `field[i]` path
//! - unknown extra fields are ignored

use crate::document::MemoryDocument;
use crate::error::Error;
use crate::types::{Edge, Node};
use chrono::DateTime;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// A single violated constraint, located by a dotted/bracketed path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Locator into the original input, e.g. `edges.e1.weight`
    pub path: String,
    /// Human-readable constraint description
    pub message: String,
}

impl Issue {
    /// Create an issue for `path`.
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Concatenate a defect list into a single `path: message; ...` line.
    pub fn join(issues: &[Issue]) -> String {
        issues
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

fn join_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{prefix}.{field}")
    }
}

// ── Field normalizers ───────────────────────────────────────────

fn required_string(
    obj: &Map<String, Value>,
    field: &str,
    prefix: &str,
    issues: &mut Vec<Issue>,
) -> Option<String> {
    match obj.get(field) {
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                issues.push(Issue::new(
                    join_path(prefix, field),
                    "must be a non-empty string",
                ));
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        None | Some(Value::Null) => {
            issues.push(Issue::new(join_path(prefix, field), "is required"));
            None
        }
        Some(_) => {
            issues.push(Issue::new(join_path(prefix, field), "must be a string"));
            None
        }
    }
}

fn optional_string(
    obj: &Map<String, Value>,
    field: &str,
    prefix: &str,
    issues: &mut Vec<Issue>,
) -> Option<String> {
    match obj.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Some(_) => {
            issues.push(Issue::new(join_path(prefix, field), "must be a string"));
            None
        }
    }
}

fn string_list(
    obj: &Map<String, Value>,
    field: &str,
    prefix: &str,
    issues: &mut Vec<Issue>,
) -> Vec<String> {
    let items = match obj.get(field) {
        None | Some(Value::Null) => return Vec::new(),
        Some(Value::Array(items)) => items,
        Some(_) => {
            issues.push(Issue::new(
                join_path(prefix, field),
                "must be an array of strings",
            ));
            return Vec::new();
        }
    };

    let mut out = Vec::new();
    let mut seen = BTreeSet::new();
    for (i, item) in items.iter().enumerate() {
        let path = format!("{}[{}]", join_path(prefix, field), i);
        match item {
            Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    issues.push(Issue::new(path, "must be a non-empty string"));
                } else if seen.insert(trimmed.to_string()) {
                    out.push(trimmed.to_string());
                }
            }
            _ => issues.push(Issue::new(path, "must be a string")),
        }
    }
    out
}

const TS_MESSAGE: &str = "must be an epoch-millisecond integer or ISO-8601 string";

fn timestamp(
    obj: &Map<String, Value>,
    field: &str,
    prefix: &str,
    issues: &mut Vec<Issue>,
) -> Option<i64> {
    match obj.get(field) {
        Some(Value::Number(n)) => match integer_millis(n) {
            Some(ms) => Some(ms),
            None => {
                issues.push(Issue::new(join_path(prefix, field), TS_MESSAGE));
                None
            }
        },
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if let Ok(ms) = trimmed.parse::<i64>() {
                Some(ms)
            } else if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
                Some(dt.timestamp_millis())
            } else {
                issues.push(Issue::new(join_path(prefix, field), TS_MESSAGE));
                None
            }
        }
        None | Some(Value::Null) => {
            issues.push(Issue::new(join_path(prefix, field), "is required"));
            None
        }
        Some(_) => {
            issues.push(Issue::new(join_path(prefix, field), TS_MESSAGE));
            None
        }
    }
}

/// Whole-valued JSON numbers count as integer milliseconds even when the
/// producer serialized them as floats.
fn integer_millis(n: &serde_json::Number) -> Option<i64> {
    if let Some(i) = n.as_i64() {
        return Some(i);
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 => {
            Some(f as i64)
        }
        _ => None,
    }
}

fn weight(
    obj: &Map<String, Value>,
    field: &str,
    prefix: &str,
    issues: &mut Vec<Issue>,
) -> f64 {
    match obj.get(field) {
        None | Some(Value::Null) => 1.0,
        Some(Value::Number(n)) => match n.as_f64() {
            Some(w) if w >= 0.0 => w,
            _ => {
                issues.push(Issue::new(
                    join_path(prefix, field),
                    "must be a non-negative number",
                ));
                1.0
            }
        },
        Some(_) => {
            issues.push(Issue::new(
                join_path(prefix, field),
                "must be a non-negative number",
            ));
            1.0
        }
    }
}

fn metadata_map(
    obj: &Map<String, Value>,
    field: &str,
    prefix: &str,
    issues: &mut Vec<Issue>,
) -> Option<Map<String, Value>> {
    match obj.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::Object(m)) => Some(m.clone()),
        Some(_) => {
            issues.push(Issue::new(join_path(prefix, field), "must be an object"));
            None
        }
    }
}

fn positive_int(
    obj: &Map<String, Value>,
    field: &str,
    prefix: &str,
    issues: &mut Vec<Issue>,
) -> Option<u64> {
    match obj.get(field) {
        Some(Value::Number(n)) => match n.as_u64() {
            Some(v) if v >= 1 => Some(v),
            _ => {
                issues.push(Issue::new(
                    join_path(prefix, field),
                    "must be a positive integer",
                ));
                None
            }
        },
        None | Some(Value::Null) => {
            issues.push(Issue::new(join_path(prefix, field), "is required"));
            None
        }
        Some(_) => {
            issues.push(Issue::new(
                join_path(prefix, field),
                "must be a positive integer",
            ));
            None
        }
    }
}

// ── Node / edge validators ──────────────────────────────────────

/// Validate a loose node payload, normalizing it into a [`Node`].
pub fn validate_node(value: &Value) -> Result<Node, Vec<Issue>> {
    node_at(value, "node")
}

pub(crate) fn node_at(value: &Value, prefix: &str) -> Result<Node, Vec<Issue>> {
    let obj = match value.as_object() {
        Some(obj) => obj,
        None => return Err(vec![Issue::new(prefix, "must be an object")]),
    };

    let mut issues = Vec::new();
    let node_id = required_string(obj, "nodeId", prefix, &mut issues);
    let kind = required_string(obj, "kind", prefix, &mut issues);
    let title = required_string(obj, "title", prefix, &mut issues);
    let content = optional_string(obj, "content", prefix, &mut issues);
    let tags = string_list(obj, "tags", prefix, &mut issues);
    let entity_refs = string_list(obj, "entityRefs", prefix, &mut issues);
    let ts = timestamp(obj, "ts", prefix, &mut issues);
    let metadata = metadata_map(obj, "metadata", prefix, &mut issues);

    match (node_id, kind, title, ts) {
        (Some(node_id), Some(kind), Some(title), Some(ts)) if issues.is_empty() => Ok(Node {
            node_id,
            kind,
            title,
            content,
            tags,
            entity_refs,
            ts,
            metadata,
        }),
        _ => Err(issues),
    }
}

/// Validate a loose edge payload, normalizing it into an [`Edge`].
///
/// Referential integrity against the node map is the store's job; this only
/// checks shape.
pub fn validate_edge(value: &Value) -> Result<Edge, Vec<Issue>> {
    edge_at(value, "edge")
}

pub(crate) fn edge_at(value: &Value, prefix: &str) -> Result<Edge, Vec<Issue>> {
    let obj = match value.as_object() {
        Some(obj) => obj,
        None => return Err(vec![Issue::new(prefix, "must be an object")]),
    };

    let mut issues = Vec::new();
    let edge_id = required_string(obj, "edgeId", prefix, &mut issues);
    let from = required_string(obj, "from", prefix, &mut issues);
    let to = required_string(obj, "to", prefix, &mut issues);
    let relation = required_string(obj, "relation", prefix, &mut issues);
    let weight = weight(obj, "weight", prefix, &mut issues);
    let ts = timestamp(obj, "ts", prefix, &mut issues);
    let metadata = metadata_map(obj, "metadata", prefix, &mut issues);

    match (edge_id, from, to, relation, ts) {
        (Some(edge_id), Some(from), Some(to), Some(relation), Some(ts))
            if issues.is_empty() =>
        {
            Ok(Edge {
                edge_id,
                from,
                to,
                relation,
                weight,
                ts,
                metadata,
            })
        }
        _ => Err(issues),
    }
}

// ── Whole-document validator ────────────────────────────────────

/// Validate a whole serialized index document.
///
/// Aggregates every nested node, edge, and lookup-table defect instead of
/// short-circuiting, so one pass surfaces the complete defect list.
pub fn validate_document(value: &Value) -> Result<MemoryDocument, Vec<Issue>> {
    let obj = match value.as_object() {
        Some(obj) => obj,
        None => return Err(vec![Issue::new("document", "must be an object")]),
    };

    let mut issues = Vec::new();
    let version = positive_int(obj, "version", "", &mut issues);
    let updated_at = timestamp(obj, "updatedAt", "", &mut issues);

    let mut nodes = BTreeMap::new();
    match obj.get("nodes") {
        None | Some(Value::Null) => {}
        Some(Value::Object(map)) => {
            for (id, raw) in map {
                let prefix = format!("nodes.{id}");
                match node_at(raw, &prefix) {
                    Ok(node) if node.node_id == *id => {
                        nodes.insert(id.clone(), node);
                    }
                    Ok(_) => issues.push(Issue::new(
                        format!("{prefix}.nodeId"),
                        "must match its map key",
                    )),
                    Err(mut nested) => issues.append(&mut nested),
                }
            }
        }
        Some(_) => issues.push(Issue::new("nodes", "must be an object keyed by node id")),
    }

    let mut edges = BTreeMap::new();
    match obj.get("edges") {
        None | Some(Value::Null) => {}
        Some(Value::Object(map)) => {
            for (id, raw) in map {
                let prefix = format!("edges.{id}");
                match edge_at(raw, &prefix) {
                    Ok(edge) if edge.edge_id == *id => {
                        edges.insert(id.clone(), edge);
                    }
                    Ok(_) => issues.push(Issue::new(
                        format!("{prefix}.edgeId"),
                        "must match its map key",
                    )),
                    Err(mut nested) => issues.append(&mut nested),
                }
            }
        }
        Some(_) => issues.push(Issue::new("edges", "must be an object keyed by edge id")),
    }

    let tags = lookup_table(obj, "tags", &mut issues);
    let entities = lookup_table(obj, "entities", &mut issues);

    match (version, updated_at) {
        (Some(version), Some(updated_at)) if issues.is_empty() => Ok(MemoryDocument {
            version,
            updated_at,
            nodes,
            edges,
            tags,
            entities,
        }),
        _ => Err(issues),
    }
}

/// A lookup table is an object of string arrays; entries are deduplicated and
/// normalized to sorted order (the canonical projection).
fn lookup_table(
    obj: &Map<String, Value>,
    field: &str,
    issues: &mut Vec<Issue>,
) -> BTreeMap<String, Vec<String>> {
    let map = match obj.get(field) {
        None | Some(Value::Null) => return BTreeMap::new(),
        Some(Value::Object(map)) => map,
        Some(_) => {
            issues.push(Issue::new(field, "must be an object of string arrays"));
            return BTreeMap::new();
        }
    };

    let mut out = BTreeMap::new();
    for (key, raw) in map {
        let path = format!("{field}.{key}");
        let items = match raw {
            Value::Array(items) => items,
            _ => {
                issues.push(Issue::new(path, "must be an array of strings"));
                continue;
            }
        };
        let mut ids = BTreeSet::new();
        for (i, item) in items.iter().enumerate() {
            match item {
                Value::String(s) if !s.trim().is_empty() => {
                    ids.insert(s.trim().to_string());
                }
                _ => issues.push(Issue::new(
                    format!("{path}[{i}]"),
                    "must be a non-empty string",
                )),
            }
        }
        out.insert(key.clone(), ids.into_iter().collect());
    }
    out
}

// ── Assert variants ─────────────────────────────────────────────

/// Fail-fast wrapper around [`validate_node`]: the defect list becomes one
/// descriptive [`Error`].
pub fn assert_node(value: &Value) -> crate::Result<Node> {
    validate_node(value).map_err(Error::Validation)
}

/// Fail-fast wrapper around [`validate_edge`].
pub fn assert_edge(value: &Value) -> crate::Result<Edge> {
    validate_edge(value).map_err(Error::Validation)
}

/// Fail-fast wrapper around [`validate_document`].
pub fn assert_document(value: &Value) -> crate::Result<MemoryDocument> {
    validate_document(value).map_err(Error::Validation)
}
