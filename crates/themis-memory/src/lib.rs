//! Themis Memory — In-Memory Cognition Graph
//!
//! The shared knowledge store for Themis governance agents: typed nodes
//! (facts, observations, decisions) linked by directed, weighted, typed
//! edges, with tag and entity lookup tables maintained incrementally under
//! mutation. Collaborating modules talk to the store in validated JSON only;
//! nothing loosely typed survives past the validators.
//!
//! # Architecture
//!
//! ```text
//! JSON payload ──► validators ──► Node / Edge
//!                                     │
//!                               MemoryIndex
//!                              ╱            ╲
//!                    lookup tables     node/edge maps
//!                              ╲            ╱
//!                          MemoryDocument (canonical JSON)
//! ```
//!
//! The store is synchronous and single-owner: every operation runs to
//! completion, and callers sharing one across threads serialize access
//! themselves. Persistence, if any, is layered outside via
//! [`MemoryIndex::to_json`] and [`MemoryIndex::hydrate`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod document;
pub mod error;
pub mod lookup;
pub mod store;
pub mod types;
pub mod validate;

pub use document::{MemoryDocument, DOCUMENT_VERSION};
pub use error::{Error, Result};
pub use store::MemoryIndex;
pub use types::{Edge, MemoryStats, Node};
pub use validate::{
    assert_document, assert_edge, assert_node, validate_document, validate_edge, validate_node,
    Issue,
};

/// Current wall-clock time in epoch milliseconds.
///
/// Mutating store operations take `now` from the caller so embedders control
/// time; this is the canonical source for those with no reason to fake it.
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
