//! Canonical document projection of a store.
//!
//! This is the interchange shape the governance modules persist and consume:
//! node and edge maps keyed by id (so map order is irrelevant to equality)
//! and lookup tables as sorted arrays per key. `BTreeMap` keys make the
//! serialized form deterministic without a post-processing sort.

use crate::types::{Edge, Node};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Document format version written by new stores.
pub const DOCUMENT_VERSION: u64 = 1;

/// The canonical serialized shape of a [`crate::MemoryIndex`].
///
/// Optional fields absent in the live value are omitted from the document,
/// never emitted as null, matching what the validators accept back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryDocument {
    /// Document format version
    pub version: u64,
    /// Timestamp of the last successful mutation (epoch ms)
    pub updated_at: i64,
    /// All stored nodes, keyed by node id
    pub nodes: BTreeMap<String, Node>,
    /// All stored edges, keyed by edge id
    pub edges: BTreeMap<String, Edge>,
    /// Tag lookup table: tag → sorted node ids
    pub tags: BTreeMap<String, Vec<String>>,
    /// Entity lookup table: entity ref → sorted node ids
    pub entities: BTreeMap<String, Vec<String>>,
}
