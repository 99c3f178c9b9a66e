use core::cell::{Ref, RefCell, RefMut};
use core::fmt::Debug;

use vc_dom::NodeId;
use vc_dom::xml::XmlDocument;

use super::{ITEM_ELEMENT, KEY_ATTRIBUTE};
use crate::{BackendCursor, ContainerKind, Cursor};

// -----------------------------------------------------------------------------
// XmlInputCursor

/// Read-only position among the children of an element.
#[derive(Clone, Copy)]
pub struct XmlInputCursor<'a> {
    document: &'a XmlDocument,
    container: NodeId,
    kind: ContainerKind,
    position: usize,
}

impl<'a> XmlInputCursor<'a> {
    #[inline]
    pub(crate) const fn new(document: &'a XmlDocument, container: NodeId, kind: ContainerKind) -> Self {
        Self {
            document,
            container,
            kind,
            position: 0,
        }
    }

    #[inline]
    const fn moved_to(self, position: usize) -> Self {
        Self { position, ..self }
    }

    #[inline]
    pub const fn document(&self) -> &'a XmlDocument {
        self.document
    }

    #[inline]
    pub const fn container(&self) -> NodeId {
        self.container
    }

    /// The kind the container was entered as.
    #[inline]
    pub const fn kind(&self) -> ContainerKind {
        self.kind
    }

    #[inline]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// The child element at the current position.
    #[inline]
    pub fn current(&self) -> Option<NodeId> {
        self.document.child(self.container, self.position)
    }

    /// The key attribute of the current child.
    pub fn key(&self) -> Option<&'a str> {
        let document = self.document;
        self.current()
            .and_then(|node| document.attribute(node, KEY_ATTRIBUTE))
    }
}

impl<'a> BackendCursor<'a> for XmlInputCursor<'a> {
    #[inline]
    fn len(&self) -> usize {
        self.document.len(self.container)
    }

    fn find(&self, key: &str) -> Cursor<'a> {
        if self.kind != ContainerKind::Map {
            return Cursor::Null;
        }
        match self
            .document
            .find_child_by_attribute(self.container, KEY_ATTRIBUTE, key)
        {
            Some(index) => Cursor::XmlInput(self.moved_to(index)),
            None => Cursor::Null,
        }
    }

    fn at(&self, index: usize) -> Cursor<'a> {
        if self.kind == ContainerKind::Array && index < self.len() {
            Cursor::XmlInput(self.moved_to(index))
        } else {
            Cursor::Null
        }
    }

    #[inline]
    fn at_end(&self) -> bool {
        self.position >= self.len()
    }

    #[inline]
    fn advance(&mut self) {
        self.position = self.position.saturating_add(1);
    }
}

impl PartialEq for XmlInputCursor<'_> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.document, other.document)
            && self.container == other.container
            && self.kind == other.kind
            && self.position == other.position
    }
}

impl Eq for XmlInputCursor<'_> {}

impl Debug for XmlInputCursor<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("XmlInputCursor")
            .field("container", &self.container)
            .field("kind", &self.kind)
            .field("position", &self.position)
            .finish()
    }
}

impl<'a> From<XmlInputCursor<'a>> for Cursor<'a> {
    #[inline]
    fn from(cursor: XmlInputCursor<'a>) -> Self {
        Cursor::XmlInput(cursor)
    }
}

// -----------------------------------------------------------------------------
// XmlOutputCursor

// Appends empty item elements until `parent` has at least `len` children.
fn grow(document: &mut XmlDocument, parent: NodeId, len: usize) {
    while document.len(parent) < len {
        document.append_child(parent, ITEM_ELEMENT);
    }
}

/// Position among the children of an element of an output document.
///
/// Navigation creates the item elements it addresses. As with the JSON
/// cursor, a [`RefMut`] from [`document_mut`](Self::document_mut) must be
/// dropped before the cursor is used again.
#[derive(Clone, Copy)]
pub struct XmlOutputCursor<'a> {
    document: &'a RefCell<XmlDocument>,
    container: NodeId,
    kind: ContainerKind,
    position: usize,
}

impl<'a> XmlOutputCursor<'a> {
    #[inline]
    pub(crate) const fn new(
        document: &'a RefCell<XmlDocument>,
        container: NodeId,
        kind: ContainerKind,
    ) -> Self {
        Self {
            document,
            container,
            kind,
            position: 0,
        }
    }

    #[inline]
    const fn moved_to(self, position: usize) -> Self {
        Self { position, ..self }
    }

    #[inline]
    pub(crate) const fn cell(&self) -> &'a RefCell<XmlDocument> {
        self.document
    }

    #[inline]
    pub fn document(&self) -> Ref<'a, XmlDocument> {
        self.document.borrow()
    }

    #[inline]
    pub fn document_mut(&self) -> RefMut<'a, XmlDocument> {
        self.document.borrow_mut()
    }

    #[inline]
    pub const fn container(&self) -> NodeId {
        self.container
    }

    #[inline]
    pub const fn kind(&self) -> ContainerKind {
        self.kind
    }

    #[inline]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// The child element at the current position, growing an array
    /// container to reach it.
    pub fn current(&self) -> Option<NodeId> {
        let mut document = self.document.borrow_mut();
        if self.kind == ContainerKind::Array {
            grow(&mut document, self.container, self.position.saturating_add(1));
        }
        document.child(self.container, self.position)
    }
}

impl<'a> BackendCursor<'a> for XmlOutputCursor<'a> {
    #[inline]
    fn len(&self) -> usize {
        self.document.borrow().len(self.container)
    }

    fn find(&self, key: &str) -> Cursor<'a> {
        if self.kind != ContainerKind::Map {
            return Cursor::Null;
        }
        let mut document = self.document.borrow_mut();
        let index = match document.find_child_by_attribute(self.container, KEY_ATTRIBUTE, key) {
            Some(index) => index,
            None => {
                let child = document.append_child(self.container, ITEM_ELEMENT);
                document.set_attribute(child, KEY_ATTRIBUTE, key);
                document.len(self.container) - 1
            }
        };
        Cursor::XmlOutput(self.moved_to(index))
    }

    fn at(&self, index: usize) -> Cursor<'a> {
        if self.kind != ContainerKind::Array {
            return Cursor::Null;
        }
        grow(&mut self.document.borrow_mut(), self.container, index.saturating_add(1));
        Cursor::XmlOutput(self.moved_to(index))
    }

    #[inline]
    fn at_end(&self) -> bool {
        false
    }

    fn advance(&mut self) {
        if self.kind == ContainerKind::Array {
            grow(&mut self.document.borrow_mut(), self.container, self.position.saturating_add(1));
        }
        self.position = self.position.saturating_add(1);
    }
}

impl PartialEq for XmlOutputCursor<'_> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.document, other.document)
            && self.container == other.container
            && self.kind == other.kind
            && self.position == other.position
    }
}

impl Eq for XmlOutputCursor<'_> {}

impl Debug for XmlOutputCursor<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("XmlOutputCursor")
            .field("container", &self.container)
            .field("kind", &self.kind)
            .field("position", &self.position)
            .finish()
    }
}

impl<'a> From<XmlOutputCursor<'a>> for Cursor<'a> {
    #[inline]
    fn from(cursor: XmlOutputCursor<'a>) -> Self {
        Cursor::XmlOutput(cursor)
    }
}
