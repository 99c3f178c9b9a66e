use alloc::string::String;
use core::any::Any;
use core::cell::{Ref, RefCell};
use core::fmt::Display;

use vc_dom::xml::XmlDocument;
use vc_dom::{Layout, NodeId};

use super::{KIND_ATTRIBUTE, ROOT_ELEMENT, XmlOutputCursor};
use crate::{
    Archive, ArchiveError, ContainerKind, Cursor, Direction, ScalarMut, TypeKey, TypeRegistry,
    UserArchive,
};

// -----------------------------------------------------------------------------
// XmlOutputArchive

/// Builds an XML document from values.
///
/// # Examples
///
/// ```
/// use vc_archive::xml::XmlOutputArchive;
/// use vc_archive::{Archive, ArchiveExt, ContainerKind, Layout};
///
/// let archive = XmlOutputArchive::new().with_layout(Layout::Compact);
/// let root = archive.begin(ContainerKind::Map);
///
/// let mut name = String::from("Ada");
/// assert!(archive.serialize(root.find("name"), &mut name));
///
/// assert!(archive.to_string().ends_with(
///     r#"<root kind="map"><value key="name">Ada</value></root>"#
/// ));
/// ```
#[derive(Debug)]
pub struct XmlOutputArchive {
    document: RefCell<XmlDocument>,
    layout: Layout,
}

impl Default for XmlOutputArchive {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl XmlOutputArchive {
    /// Creates an archive whose document holds an empty root element.
    pub fn new() -> Self {
        Self {
            document: RefCell::new(XmlDocument::new(ROOT_ELEMENT)),
            layout: Layout::DEFAULT,
        }
    }

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
    pub fn document(&self) -> Ref<'_, XmlDocument> {
        self.document.borrow()
    }

    #[inline]
    pub fn into_document(self) -> XmlDocument {
        self.document.into_inner()
    }

    /// Renders the document as XML text in the configured layout.
    pub fn render(&self) -> Result<String, ArchiveError> {
        Ok(self.document.borrow().render(self.layout)?)
    }

    /// Renders the document, logging failures and returning an empty
    /// string instead.
    pub fn to_text(&self) -> String {
        self.render().unwrap_or_else(|e| {
            log::error!("failed to render XML document: {e}");
            String::new()
        })
    }

    fn accept<'c, 'a>(&self, cursor: &'c Cursor<'a>) -> Option<&'c XmlOutputCursor<'a>> {
        match cursor {
            Cursor::Null => None,
            Cursor::XmlOutput(c) if core::ptr::eq(c.cell(), &self.document) => Some(c),
            other => {
                log::warn!("XmlOutputArchive ignores a foreign cursor {other:?}");
                None
            }
        }
    }

    // Untagged or differently tagged elements lose their content.
    fn enter(document: &RefCell<XmlDocument>, node: NodeId, kind: ContainerKind) -> Cursor<'_> {
        {
            let mut doc = document.borrow_mut();
            if doc.attribute(node, KIND_ATTRIBUTE) != Some(kind.name()) {
                log::trace!("coercing XML element {node} to {kind}");
                doc.clear(node);
                doc.set_attribute(node, KIND_ATTRIBUTE, kind.name());
            }
        }
        Cursor::XmlOutput(XmlOutputCursor::new(document, node, kind))
    }
}

impl Display for XmlOutputArchive {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl Archive for XmlOutputArchive {
    #[inline]
    fn direction(&self) -> Direction {
        Direction::Output
    }

    fn begin(&self, kind: ContainerKind) -> Cursor<'_> {
        let root = self.document.borrow().root();
        match root {
            Some(root) => Self::enter(&self.document, root, kind),
            None => Cursor::Null,
        }
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
        super::scalar::write(&mut self.document.borrow_mut(), node, value.view());
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

impl UserArchive for XmlOutputArchive {
    type Cursor<'a> = XmlOutputCursor<'a>;

    fn registry() -> &'static TypeRegistry<Self> {
        static REGISTRY: TypeRegistry<XmlOutputArchive> = TypeRegistry::new();
        &REGISTRY
    }

    #[inline]
    fn narrow<'c, 'a>(cursor: &'c mut Cursor<'a>) -> Option<&'c mut XmlOutputCursor<'a>> {
        match cursor {
            Cursor::XmlOutput(c) => Some(c),
            _ => None,
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use super::XmlOutputArchive;
    use crate::xml::{ITEM_ELEMENT, KEY_ATTRIBUTE, KIND_ATTRIBUTE};
    use crate::{Archive, ArchiveExt, ContainerKind, Cursor, Layout};

    #[test]
    fn find_creates_one_keyed_item() {
        let archive = XmlOutputArchive::new();
        let root = archive.begin(ContainerKind::Map);

        let k = root.find("k");
        assert_eq!(root.find("k"), k);
        assert_eq!(root.len(), 1);

        let doc = archive.document();
        let item = doc.child(doc.root().unwrap(), 0).unwrap();
        assert_eq!(doc.element(item).name, ITEM_ELEMENT);
        assert_eq!(doc.attribute(item, KEY_ATTRIBUTE), Some("k"));
    }

    #[test]
    fn at_grows_with_empty_items() {
        let archive = XmlOutputArchive::new();
        let root = archive.begin(ContainerKind::Array);
        let mut v = 9_u32;
        assert!(archive.serialize(root.at(3), &mut v));
        assert_eq!(root.len(), 4);

        let doc = archive.document();
        let root = doc.root().unwrap();
        assert!(doc.element(doc.child(root, 0).unwrap()).is_empty());
        assert_eq!(doc.element(doc.child(root, 3).unwrap()).text, "9");
    }

    #[test]
    fn never_at_end() {
        let archive = XmlOutputArchive::new();
        let mut cursor = archive.begin(ContainerKind::Array);
        for i in 0..5_i16 {
            let mut v = i;
            assert!(!cursor.at_end());
            assert!(archive.serialize(cursor.post_advance(), &mut v));
        }
        assert!(!cursor.at_end());
        assert_eq!(cursor.len(), 5);
    }

    #[test]
    fn begin_retags() {
        let archive = XmlOutputArchive::new().with_layout(Layout::Compact);
        let root = archive.begin(ContainerKind::Map);
        let mut s = String::from("x");
        assert!(archive.serialize(root.find("a"), &mut s));

        let root = archive.begin(ContainerKind::Array);
        assert_eq!(root.len(), 0);
        let doc = archive.document();
        assert_eq!(doc.attribute(doc.root().unwrap(), KIND_ATTRIBUTE), Some("array"));
    }

    #[test]
    fn wrong_container_is_null() {
        let archive = XmlOutputArchive::new();
        let root = archive.begin(ContainerKind::Map);
        assert!(root.at(0).is_null());
        let list = archive.begin_at(root.find("list"), ContainerKind::Array);
        assert!(list.find("k").is_null());
        assert_eq!(root.len(), 1);
    }

    #[test]
    fn compact_rendering() {
        let archive = XmlOutputArchive::new().with_layout(Layout::Compact);
        let root = archive.begin(ContainerKind::Map);
        let list = archive.begin_at(root.find("list"), ContainerKind::Array);
        let (mut a, mut b) = (true, 2.5_f32);
        assert!(archive.serialize(list.at(0), &mut a));
        assert!(archive.serialize(list.at(1), &mut b));

        assert_eq!(
            archive.render().unwrap(),
            concat!(
                r#"<?xml version="1.0" encoding="UTF-8"?>"#,
                r#"<root kind="map"><value key="list" kind="array">"#,
                "<value>true</value><value>2.5</value>",
                "</value></root>",
            )
        );
    }

    #[test]
    fn null_cursor_writes_nothing() {
        let archive = XmlOutputArchive::new();
        let mut v = 1_u8;
        assert!(!archive.serialize(Cursor::null(), &mut v));
        let doc = archive.document();
        assert!(doc.element(doc.root().unwrap()).is_empty());
    }
}
