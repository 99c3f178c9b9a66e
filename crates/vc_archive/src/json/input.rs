use core::any::Any;

use vc_dom::NodeId;
use vc_dom::json::JsonDocument;

use super::JsonInputCursor;
use crate::{
    Archive, ArchiveError, ContainerKind, Cursor, Direction, ScalarMut, TypeKey, TypeRegistry,
    UserArchive,
};

// -----------------------------------------------------------------------------
// JsonInputArchive

/// Reads values out of a parsed JSON document.
///
/// # Examples
///
/// ```
/// use vc_archive::json::JsonInputArchive;
/// use vc_archive::{Archive, ArchiveExt, ContainerKind};
///
/// let archive = JsonInputArchive::new(r#"{"id": 7, "tags": ["a", "b"]}"#);
/// let root = archive.begin(ContainerKind::Map);
///
/// let mut id = 0_u16;
/// assert!(archive.serialize(root.find("id"), &mut id));
/// assert_eq!(id, 7);
///
/// // The document has no such key, `id` is left untouched.
/// assert!(!archive.serialize(root.find("uid"), &mut id));
/// assert_eq!(id, 7);
///
/// let tags = archive.begin_at(root.find("tags"), ContainerKind::Array);
/// let mut tag = String::new();
/// assert!(archive.serialize(tags.at(1), &mut tag));
/// assert_eq!(tag, "b");
/// ```
#[derive(Debug, Default)]
pub struct JsonInputArchive {
    document: JsonDocument,
}

impl JsonInputArchive {
    /// Parses `text`, falling back to an empty (`null`) document when it
    /// is malformed. Every lookup on such an archive fails.
    pub fn new(text: &str) -> Self {
        match Self::try_new(text) {
            Ok(archive) => archive,
            Err(e) => {
                log::warn!("malformed JSON input, reading from an empty document: {e}");
                Self::default()
            }
        }
    }

    /// Parses `text`, reporting malformed input.
    pub fn try_new(text: &str) -> Result<Self, ArchiveError> {
        Ok(Self::from_document(JsonDocument::parse(text)?))
    }

    #[inline]
    pub fn from_document(document: JsonDocument) -> Self {
        Self { document }
    }

    #[inline]
    pub fn document(&self) -> &JsonDocument {
        &self.document
    }

    #[inline]
    pub fn into_document(self) -> JsonDocument {
        self.document
    }

    // Cursors of another archive instance or backend are refused.
    fn accept<'c, 'a>(&self, cursor: &'c Cursor<'a>) -> Option<&'c JsonInputCursor<'a>> {
        match cursor {
            Cursor::Null => None,
            Cursor::JsonInput(c) if core::ptr::eq(c.document(), &self.document) => Some(c),
            other => {
                log::warn!("JsonInputArchive ignores a foreign cursor {other:?}");
                None
            }
        }
    }

    fn enter(document: &JsonDocument, node: NodeId, kind: ContainerKind) -> Cursor<'_> {
        let shape = document.node(node);
        let matches = match kind {
            ContainerKind::Array => shape.is_array(),
            ContainerKind::Map => shape.is_object(),
        };
        if matches {
            Cursor::JsonInput(JsonInputCursor::new(document, node))
        } else {
            Cursor::Null
        }
    }
}

impl Archive for JsonInputArchive {
    #[inline]
    fn direction(&self) -> Direction {
        Direction::Input
    }

    fn begin(&self, kind: ContainerKind) -> Cursor<'_> {
        Self::enter(&self.document, self.document.root(), kind)
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
            Some(node) => super::scalar::read(self.document.node(node), &mut value),
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

impl UserArchive for JsonInputArchive {
    type Cursor<'a> = JsonInputCursor<'a>;

    fn registry() -> &'static TypeRegistry<Self> {
        static REGISTRY: TypeRegistry<JsonInputArchive> = TypeRegistry::new();
        &REGISTRY
    }

    #[inline]
    fn narrow<'c, 'a>(cursor: &'c mut Cursor<'a>) -> Option<&'c mut JsonInputCursor<'a>> {
        match cursor {
            Cursor::JsonInput(c) => Some(c),
            _ => None,
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use super::JsonInputArchive;
    use crate::json::JsonOutputArchive;
    use crate::{Archive, ArchiveExt, ContainerKind, Cursor};

    #[test]
    fn malformed_input_reads_nothing() {
        let archive = JsonInputArchive::new("{\"a\": ");
        assert!(archive.begin(ContainerKind::Map).is_null());
        assert!(archive.begin(ContainerKind::Array).is_null());
        assert!(JsonInputArchive::try_new("{\"a\": ").is_err());
    }

    #[test]
    fn kind_mismatch_is_null() {
        let archive = JsonInputArchive::new("[1, 2]");
        assert!(archive.begin(ContainerKind::Map).is_null());

        let root = archive.begin(ContainerKind::Array);
        assert!(root.find("x").is_null());
        assert!(archive.begin_at(root.at(0), ContainerKind::Array).is_null());
    }

    #[test]
    fn lookups_never_mutate() {
        let text = r#"{"a": [1]}"#;
        let archive = JsonInputArchive::new(text);
        let before = archive.document().to_value();

        let root = archive.begin(ContainerKind::Map);
        assert!(root.find("b").is_null());
        let a = archive.begin_at(root.find("a"), ContainerKind::Array);
        assert!(a.at(5).is_null());
        let mut v = 0_u8;
        assert!(!archive.serialize(a.at(3), &mut v));

        assert_eq!(archive.document().to_value(), before);
        assert_eq!(archive.document().arena_len(), 3);
    }

    #[test]
    fn iteration() {
        let archive = JsonInputArchive::new(r#"{"x": 1, "y": 2, "z": 3}"#);
        let mut root = archive.begin(ContainerKind::Map);
        assert_eq!(root.len(), 3);

        let mut sum = 0_u32;
        while root.is_valid() {
            let mut v = 0_u32;
            assert!(archive.serialize(root, &mut v));
            sum += v;
            root.advance();
        }
        assert_eq!(sum, 6);
        assert!(root.at_end());

        let mut v = 0_u32;
        assert!(!archive.serialize(root, &mut v));
        assert_eq!(v, 0);
    }

    #[test]
    fn member_keys() {
        let archive = JsonInputArchive::new(r#"{"first": 1, "second": 2}"#);
        let Cursor::JsonInput(second) = archive.begin(ContainerKind::Map).find("second") else {
            panic!("expected a JSON input cursor");
        };
        assert_eq!(second.key(), Some("second"));
        assert_eq!(second.position(), 1);
    }

    #[test]
    fn bare_scalar_root() {
        let archive = JsonInputArchive::new("\"alone\"");
        assert!(archive.begin(ContainerKind::Array).is_null());
        assert!(archive.begin(ContainerKind::Map).is_null());
        assert_eq!(archive.document().len(archive.document().root()), 1);
    }

    #[test]
    fn narrowing_failures_leave_value() {
        let archive = JsonInputArchive::new("[300, -1, 1.5, true, \"s\"]");
        let root = archive.begin(ContainerKind::Array);

        let mut byte = 9_u8;
        for i in 0..5 {
            assert!(!archive.serialize(root.at(i), &mut byte));
        }
        assert_eq!(byte, 9);

        let mut wide = 0_i16;
        assert!(archive.serialize(root.at(0), &mut wide));
        assert_eq!(wide, 300);
    }

    #[test]
    fn foreign_cursors_are_refused() {
        let a = JsonInputArchive::new("[1]");
        let b = JsonInputArchive::new("[1]");
        let output = JsonOutputArchive::new();

        let mut v = 0_u8;
        assert!(!a.serialize(b.begin(ContainerKind::Array).at(0), &mut v));
        assert!(!a.serialize(output.begin(ContainerKind::Array).at(0), &mut v));
        assert!(a.begin_at(b.begin(ContainerKind::Array), ContainerKind::Array).is_null());
        assert!(a.serialize(a.begin(ContainerKind::Array).at(0), &mut v));

        let mut s = String::new();
        assert!(!a.serialize(Cursor::null(), &mut s));
    }
}
