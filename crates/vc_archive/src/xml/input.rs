use core::any::Any;

use vc_dom::NodeId;
use vc_dom::xml::XmlDocument;

use super::{KIND_ATTRIBUTE, XmlInputCursor};
use crate::{
    Archive, ArchiveError, ContainerKind, Cursor, Direction, ScalarMut, TypeKey, TypeRegistry,
    UserArchive,
};

// -----------------------------------------------------------------------------
// XmlInputArchive

/// Reads values out of a parsed XML document.
///
/// Elements without a `kind` tag can be entered as either container kind,
/// so hand-written documents need not carry tags.
#[derive(Debug, Default)]
pub struct XmlInputArchive {
    document: XmlDocument,
}

impl XmlInputArchive {
    /// Parses `text`, falling back to a document without a root when it
    /// is malformed. Every lookup on such an archive fails.
    pub fn new(text: &str) -> Self {
        match Self::try_new(text) {
            Ok(archive) => archive,
            Err(e) => {
                log::warn!("malformed XML input, reading from an empty document: {e}");
                Self::default()
            }
        }
    }

    pub fn try_new(text: &str) -> Result<Self, ArchiveError> {
        Ok(Self::from_document(XmlDocument::parse(text)?))
    }

    #[inline]
    pub fn from_document(document: XmlDocument) -> Self {
        Self { document }
    }

    #[inline]
    pub fn document(&self) -> &XmlDocument {
        &self.document
    }

    #[inline]
    pub fn into_document(self) -> XmlDocument {
        self.document
    }

    fn accept<'c, 'a>(&self, cursor: &'c Cursor<'a>) -> Option<&'c XmlInputCursor<'a>> {
        match cursor {
            Cursor::Null => None,
            Cursor::XmlInput(c) if core::ptr::eq(c.document(), &self.document) => Some(c),
            other => {
                log::warn!("XmlInputArchive ignores a foreign cursor {other:?}");
                None
            }
        }
    }

    fn enter(document: &XmlDocument, node: NodeId, kind: ContainerKind) -> Cursor<'_> {
        match document.attribute(node, KIND_ATTRIBUTE) {
            Some(tag) if tag != kind.name() => Cursor::Null,
            _ => Cursor::XmlInput(XmlInputCursor::new(document, node, kind)),
        }
    }
}

impl Archive for XmlInputArchive {
    #[inline]
    fn direction(&self) -> Direction {
        Direction::Input
    }

    fn begin(&self, kind: ContainerKind) -> Cursor<'_> {
        match self.document.root() {
            Some(root) => Self::enter(&self.document, root, kind),
            None => Cursor::Null,
        }
    }

    fn begin_at<'a>(&self, cursor: Cursor<'a>, kind: ContainerKind) -> Cursor<'a> {
        let Some(c) = self.accept(&cursor) else {
            return Cursor::Null;
        };
        match c.current() {
            Some(node) => Self::enter(c.document(), node, kind),
            None => Cursor::Null,
        }
    }

    fn serialize_scalar(&self, cursor: Cursor<'_>, mut value: ScalarMut<'_>) -> bool {
        let Some(c) = self.accept(&cursor) else {
            return false;
        };
        match c.current() {
            Some(node) => super::scalar::read(&self.document, node, &mut value),
            None => false,
        }
    }

    fn serialize_user(&self, cursor: Cursor<'_>, key: TypeKey, value: &mut dyn Any) -> bool {
        let mut cursor = cursor;
        if self.accept(&cursor).is_none_or(|c| c.current().is_none()) {
            return false;
        }
        Self::registry().dispatch(self, &mut cursor, key, value)
    }
}

impl UserArchive for XmlInputArchive {
    type Cursor<'a> = XmlInputCursor<'a>;

    fn registry() -> &'static TypeRegistry<Self> {
        static REGISTRY: TypeRegistry<XmlInputArchive> = TypeRegistry::new();
        &REGISTRY
    }

    #[inline]
    fn narrow<'c, 'a>(cursor: &'c mut Cursor<'a>) -> Option<&'c mut XmlInputCursor<'a>> {
        match cursor {
            Cursor::XmlInput(c) => Some(c),
            _ => None,
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use super::XmlInputArchive;
    use crate::{Archive, ArchiveExt, ContainerKind, Cursor};

    #[test]
    fn untagged_elements_enter_as_either_kind() {
        let archive = XmlInputArchive::new(
            r#"<root><value key="a">1</value><value key="b">two</value></root>"#,
        );
        let map = archive.begin(ContainerKind::Map);
        let mut a = 0_u32;
        let mut b = String::new();
        assert!(archive.serialize(map.find("a"), &mut a));
        assert!(archive.serialize(map.find("b"), &mut b));
        assert_eq!((a, b.as_str()), (1, "two"));

        let array = archive.begin(ContainerKind::Array);
        assert_eq!(array.len(), 2);
        assert!(array.find("a").is_null());
        assert!(!array.at(1).is_null());
        assert!(array.at(2).is_null());
    }

    #[test]
    fn tag_mismatch_is_null() {
        let archive = XmlInputArchive::new(r#"<root kind="array"><value>1</value></root>"#);
        assert!(archive.begin(ContainerKind::Map).is_null());
        assert!(!archive.begin(ContainerKind::Array).is_null());
    }

    #[test]
    fn malformed_input_reads_nothing() {
        let archive = XmlInputArchive::new("<root><value></root>");
        assert!(archive.document().root().is_none());
        assert!(archive.begin(ContainerKind::Map).is_null());
        assert!(XmlInputArchive::try_new("no markup").is_err());
    }

    #[test]
    fn scalars_parse_from_text() {
        let archive = XmlInputArchive::new(
            "<root>
                <value> 42 </value>
                <value>-3</value>
                <value>true</value>
                <value>1e-3</value>
                <value><value/></value>
            </root>",
        );
        let root = archive.begin(ContainerKind::Array);

        let mut u = 0_u8;
        assert!(archive.serialize(root.at(0), &mut u));
        assert_eq!(u, 42);
        assert!(!archive.serialize(root.at(1), &mut u));
        assert_eq!(u, 42);

        let mut i = 0_i64;
        assert!(archive.serialize(root.at(1), &mut i));
        assert_eq!(i, -3);

        let mut b = false;
        assert!(archive.serialize(root.at(2), &mut b));
        assert!(b);

        let mut f = 0.0_f64;
        assert!(archive.serialize(root.at(3), &mut f));
        assert_eq!(f, 0.001);

        let mut s = String::from("keep");
        assert!(!archive.serialize(root.at(4), &mut s));
        assert_eq!(s, "keep");
    }

    #[test]
    fn key_of_current_entry() {
        let archive = XmlInputArchive::new(r#"<root><value key="only">x</value></root>"#);
        let Cursor::XmlInput(root) = archive.begin(ContainerKind::Map) else {
            panic!("expected an XML input cursor");
        };
        assert_eq!(root.key(), Some("only"));
        assert_eq!(root.kind(), ContainerKind::Map);
    }
}
