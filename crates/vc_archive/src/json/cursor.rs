use core::cell::{Ref, RefCell, RefMut};
use core::fmt::Debug;

use vc_dom::NodeId;
use vc_dom::json::JsonDocument;

use crate::{BackendCursor, Cursor};

// The entry a position addresses: an array element, a member value, or
// the container itself when it is a bare scalar.
fn resolve(document: &JsonDocument, container: NodeId, position: usize) -> Option<NodeId> {
    if document.node(container).is_container() {
        document.child(container, position)
    } else if position == 0 {
        Some(container)
    } else {
        None
    }
}

// Appends `null` elements until `array` holds at least `len` of them.
fn grow(document: &mut JsonDocument, array: NodeId, len: usize) {
    while document.len(array) < len {
        if document.push(array).is_none() {
            break;
        }
    }
}

// -----------------------------------------------------------------------------
// JsonInputCursor

/// Read-only position inside a [`JsonDocument`].
#[derive(Clone, Copy)]
pub struct JsonInputCursor<'a> {
    document: &'a JsonDocument,
    container: NodeId,
    position: usize,
}

impl<'a> JsonInputCursor<'a> {
    #[inline]
    pub(crate) const fn new(document: &'a JsonDocument, container: NodeId) -> Self {
        Self {
            document,
            container,
            position: 0,
        }
    }

    #[inline]
    const fn moved_to(self, position: usize) -> Self {
        Self { position, ..self }
    }

    /// The document this cursor reads.
    #[inline]
    pub const fn document(&self) -> &'a JsonDocument {
        self.document
    }

    /// The container this cursor iterates.
    #[inline]
    pub const fn container(&self) -> NodeId {
        self.container
    }

    #[inline]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// The node at the current position, `None` past the end.
    #[inline]
    pub fn current(&self) -> Option<NodeId> {
        resolve(self.document, self.container, self.position)
    }

    /// The key of the current member when iterating an object.
    #[inline]
    pub fn key(&self) -> Option<&'a str> {
        self.document.key(self.container, self.position)
    }
}

impl<'a> BackendCursor<'a> for JsonInputCursor<'a> {
    #[inline]
    fn len(&self) -> usize {
        self.document.len(self.container)
    }

    fn find(&self, key: &str) -> Cursor<'a> {
        match self.document.member(self.container, key) {
            Some(index) => Cursor::JsonInput(self.moved_to(index)),
            None => Cursor::Null,
        }
    }

    fn at(&self, index: usize) -> Cursor<'a> {
        if self.document.node(self.container).is_array() && index < self.len() {
            Cursor::JsonInput(self.moved_to(index))
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

impl PartialEq for JsonInputCursor<'_> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.document, other.document)
            && self.container == other.container
            && self.position == other.position
    }
}

impl Eq for JsonInputCursor<'_> {}

impl Debug for JsonInputCursor<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("JsonInputCursor")
            .field("container", &self.container)
            .field("position", &self.position)
            .finish()
    }
}

impl<'a> From<JsonInputCursor<'a>> for Cursor<'a> {
    #[inline]
    fn from(cursor: JsonInputCursor<'a>) -> Self {
        Cursor::JsonInput(cursor)
    }
}

// -----------------------------------------------------------------------------
// JsonOutputCursor

/// Position inside the [`JsonDocument`] of an output archive.
///
/// Navigation creates what it addresses: `find` appends missing members,
/// `at` and `advance` grow arrays with `null` elements.
///
/// Every operation borrows the document for its own duration only, so a
/// [`RefMut`] from [`document_mut`](Self::document_mut) must be dropped
/// before the cursor is used again.
#[derive(Clone, Copy)]
pub struct JsonOutputCursor<'a> {
    document: &'a RefCell<JsonDocument>,
    container: NodeId,
    position: usize,
}

impl<'a> JsonOutputCursor<'a> {
    #[inline]
    pub(crate) const fn new(document: &'a RefCell<JsonDocument>, container: NodeId) -> Self {
        Self {
            document,
            container,
            position: 0,
        }
    }

    #[inline]
    const fn moved_to(self, position: usize) -> Self {
        Self { position, ..self }
    }

    #[inline]
    pub(crate) const fn cell(&self) -> &'a RefCell<JsonDocument> {
        self.document
    }

    #[inline]
    pub fn document(&self) -> Ref<'a, JsonDocument> {
        self.document.borrow()
    }

    #[inline]
    pub fn document_mut(&self) -> RefMut<'a, JsonDocument> {
        self.document.borrow_mut()
    }

    #[inline]
    pub const fn container(&self) -> NodeId {
        self.container
    }

    #[inline]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// The node at the current position, growing an array container to
    /// reach it. `None` only for a position past the members of an object.
    pub fn current(&self) -> Option<NodeId> {
        let mut document = self.document.borrow_mut();
        if document.node(self.container).is_array() {
            grow(&mut document, self.container, self.position.saturating_add(1));
        }
        resolve(&document, self.container, self.position)
    }
}

impl<'a> BackendCursor<'a> for JsonOutputCursor<'a> {
    #[inline]
    fn len(&self) -> usize {
        self.document.borrow().len(self.container)
    }

    fn find(&self, key: &str) -> Cursor<'a> {
        let inserted = self.document.borrow_mut().insert_member(self.container, key);
        match inserted {
            Some((index, _)) => Cursor::JsonOutput(self.moved_to(index)),
            None => Cursor::Null,
        }
    }

    fn at(&self, index: usize) -> Cursor<'a> {
        let mut document = self.document.borrow_mut();
        if !document.node(self.container).is_array() {
            return Cursor::Null;
        }
        grow(&mut document, self.container, index.saturating_add(1));
        Cursor::JsonOutput(self.moved_to(index))
    }

    #[inline]
    fn at_end(&self) -> bool {
        false
    }

    fn advance(&mut self) {
        let mut document = self.document.borrow_mut();
        if document.node(self.container).is_array() {
            grow(&mut document, self.container, self.position.saturating_add(1));
        }
        self.position = self.position.saturating_add(1);
    }
}

impl PartialEq for JsonOutputCursor<'_> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.document, other.document)
            && self.container == other.container
            && self.position == other.position
    }
}

impl Eq for JsonOutputCursor<'_> {}

impl Debug for JsonOutputCursor<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("JsonOutputCursor")
            .field("container", &self.container)
            .field("position", &self.position)
            .finish()
    }
}

impl<'a> From<JsonOutputCursor<'a>> for Cursor<'a> {
    #[inline]
    fn from(cursor: JsonOutputCursor<'a>) -> Self {
        Cursor::JsonOutput(cursor)
    }
}
