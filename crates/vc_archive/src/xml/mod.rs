//! XML backend.
//!
//! Documents follow a fixed element convention:
//!
//! ```xml
//! <root kind="map">
//!     <value key="name">Ada</value>
//!     <value key="scores" kind="array">
//!         <value>1</value>
//!         <value>2</value>
//!     </value>
//! </root>
//! ```
//!
//! Every slot is a [`ITEM_ELEMENT`] element, map entries carry their key in
//! [`KEY_ATTRIBUTE`], and entered containers are tagged with
//! [`KIND_ATTRIBUTE`]. Scalars are stored as element text. User-defined
//! handlers are free to rename slots and to add their own children.

mod cursor;
mod input;
mod output;
mod scalar;

pub use cursor::{XmlInputCursor, XmlOutputCursor};
pub use input::XmlInputArchive;
pub use output::XmlOutputArchive;

pub use vc_dom::xml::{XmlDocument, XmlElement};

/// Name of the document element written by [`XmlOutputArchive`].
pub const ROOT_ELEMENT: &str = "root";

/// Name of the elements created for array and map entries.
pub const ITEM_ELEMENT: &str = "value";

/// Attribute holding the key of a map entry.
pub const KEY_ATTRIBUTE: &str = "key";

/// Attribute holding the [`ContainerKind`](crate::ContainerKind) an element
/// was entered as.
pub const KIND_ATTRIBUTE: &str = "kind";
