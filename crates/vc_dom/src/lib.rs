#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// No STD Support

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod error;
mod layout;
mod node_id;

pub mod json;
pub mod xml;

// -----------------------------------------------------------------------------
// Top-level exports

pub use error::{ParseError, RenderError};
pub use layout::Layout;
pub use node_id::NodeId;
