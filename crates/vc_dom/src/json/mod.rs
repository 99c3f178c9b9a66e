//! An arena-backed JSON tree.
//!
//! [`JsonDocument`] owns every node. Containers refer to their children
//! through [`NodeId`](crate::NodeId)s, so any number of lightweight handles can
//! point into the same tree without borrowing individual nodes.
//!
//! Text conversion goes through [`serde_json`] with key order preserved.

// -----------------------------------------------------------------------------
// Modules

mod codec;
mod document;
mod node;

// -----------------------------------------------------------------------------
// Exports

pub use document::JsonDocument;
pub use node::{JsonNode, JsonNumber};
