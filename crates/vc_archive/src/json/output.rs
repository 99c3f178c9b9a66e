use alloc::string::String;
use core::any::Any;
use core::cell::{Ref, RefCell};
use core::fmt::Display;

use vc_dom::json::{JsonDocument, JsonNode};
use vc_dom::{Layout, NodeId};

use super::JsonOutputCursor;
use crate::{
    Archive, ArchiveError, ContainerKind, Cursor, Direction, ScalarMut, TypeKey, TypeRegistry,
    UserArchive,
};

// -----------------------------------------------------------------------------
// JsonOutputArchive

/// Builds a JSON document from values.
///
/// The document starts as `null`. Entering a region coerces it to the
/// requested container, looking up keys and indices creates them.
///
/// # Examples
///
/// ```
/// use vc_archive::json::JsonOutputArchive;
/// use vc_archive::{Archive, ArchiveExt, ContainerKind, Layout};
///
/// let archive = JsonOutputArchive::new().with_layout(Layout::Compact);
/// let root = archive.begin(ContainerKind::Map);
///
/// let mut id = 7_u16;
/// assert!(archive.serialize(root.find("id"), &mut id));
///
/// let tags = archive.begin_at(root.find("tags"), ContainerKind::Array);
/// let mut tag = String::from("b");
/// assert!(archive.serialize(tags.at(1), &mut tag));
///
/// assert_eq!(archive.to_string(), r#"{"id":7,"tags":[null,"b"]}"#);
/// ```
#[derive(Debug, Default)]
pub struct JsonOutputArchive {
    document: RefCell<JsonDocument>,
    layout: Layout,
}

impl JsonOutputArchive {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how [`render`](Self::render) formats the document.
    #[inline]
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    #[inline]
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Borrows the document built so far.
    ///
    /// # Panics
    ///
    /// Panics if a handler currently holds the document mutably.
    #[inline]
    pub fn document(&self) -> Ref<'_, JsonDocument> {
        self.document.borrow()
    }

    #[inline]
    pub fn into_document(self) -> JsonDocument {
        self.document.into_inner()
    }

    /// Renders the document as JSON text in the configured layout.
    pub fn render(&self) -> Result<String, ArchiveError> {
        Ok(self.document.borrow().render(self.layout)?)
    }

    /// Renders the document, logging failures and returning an empty
    /// string instead.
    pub fn to_text(&self) -> String {
        self.render().unwrap_or_else(|e| {
            log::error!("failed to render JSON document: {e}");
            String::new()
        })
    }

    fn accept<'c, 'a>(&self, cursor: &'c Cursor<'a>) -> Option<&'c JsonOutputCursor<'a>> {
        match cursor {
            Cursor::Null => None,
            Cursor::JsonOutput(c) if core::ptr::eq(c.cell(), &self.document) => Some(c),
            other => {
                log::warn!("JsonOutputArchive ignores a foreign cursor {other:?}");
                None
            }
        }
    }

    fn enter(document: &RefCell<JsonDocument>, node: NodeId, kind: ContainerKind) -> Cursor<'_> {
        coerce(&mut document.borrow_mut(), node, kind);
        Cursor::JsonOutput(JsonOutputCursor::new(document, node))
    }
}

// Replaces `node` by an empty container of `kind` unless it already is one.
fn coerce(document: &mut JsonDocument, node: NodeId, kind: ContainerKind) {
    let (matches, empty) = match kind {
        ContainerKind::Array => (document.node(node).is_array(), JsonNode::array()),
        ContainerKind::Map => (document.node(node).is_object(), JsonNode::object()),
    };
    if !matches {
        log::trace!("coercing JSON node {node} to {kind}");
        document.replace(node, empty);
    }
}

impl Display for JsonOutputArchive {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl Archive for JsonOutputArchive {
    #[inline]
    fn direction(&self) -> Direction {
        Direction::Output
    }

    fn begin(&self, kind: ContainerKind) -> Cursor<'_> {
        let root = self.document.borrow().root();
        Self::enter(&self.document, root, kind)
    }

    fn begin_at<'a>(&self, cursor: Cursor<'a>, kind: ContainerKind) -> Cursor<'a> {
        let Some(c) = self.accept(&cursor) else {
            return Cursor::Null;
        };
        match c.current() {
            Some(node) => Self::enter(c.cell(), node, kind),
            None => Cursor::Null,
        }
    }

    fn serialize_scalar(&self, cursor: Cursor<'_>, value: ScalarMut<'_>) -> bool {
        let Some(c) = self.accept(&cursor) else {
            return false;
        };
        let Some(node) = c.current() else {
            return false;
        };
        self.document.borrow_mut().replace(node, super::scalar::write(value.view()));
        true
    }

    fn serialize_user(&self, cursor: Cursor<'_>, key: TypeKey, value: &mut dyn Any) -> bool {
        let mut cursor = cursor;
        if self.accept(&cursor).is_none_or(|c| c.current().is_none()) {
            return false;
        }
        Self::registry().dispatch(self, &mut cursor, key, value)
    }
}

impl UserArchive for JsonOutputArchive {
    type Cursor<'a> = JsonOutputCursor<'a>;

    fn registry() -> &'static TypeRegistry<Self> {
        static REGISTRY: TypeRegistry<JsonOutputArchive> = TypeRegistry::new();
        &REGISTRY
    }

    #[inline]
    fn narrow<'c, 'a>(cursor: &'c mut Cursor<'a>) -> Option<&'c mut JsonOutputCursor<'a>> {
        match cursor {
            Cursor::JsonOutput(c) => Some(c),
            _ => None,
        }
    }
}

// -----------------------------------------------------------------------------
// Tests
