#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Crates

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod archive;
mod container;
mod cursor;
mod error;
mod registry;
mod scalar;

pub mod json;
pub mod xml;

// -----------------------------------------------------------------------------
// Top-level exports

pub use archive::{Archivable, Archive, ArchiveExt, Traverse, UserType};
pub use container::{ContainerKind, Direction};
pub use cursor::{BackendCursor, CURSOR_STORAGE_SIZE, Cursor, Entries};
pub use error::ArchiveError;
pub use registry::{ErasedHandler, Handler, TypeKey, TypeRegistry, UserArchive};
pub use scalar::{ScalarMut, ScalarView};

pub use vc_dom::{Layout, NodeId};
