//! An arena-backed XML element tree.
//!
//! The model is element-centric: every node is an [`XmlElement`] with a
//! name, ordered attributes, its character data, and child elements.
//! Character data that only separates child elements (indentation) is
//! not kept.
//!
//! Text conversion goes through [`quick_xml`] events.

// -----------------------------------------------------------------------------
// Modules

mod codec;
mod document;
mod element;

// -----------------------------------------------------------------------------
// Exports

pub use document::XmlDocument;
pub use element::XmlElement;
