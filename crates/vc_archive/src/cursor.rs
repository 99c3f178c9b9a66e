use core::fmt::Debug;

use crate::Direction;
use crate::json::{JsonInputCursor, JsonOutputCursor};
use crate::xml::{XmlInputCursor, XmlOutputCursor};

// -----------------------------------------------------------------------------
// Storage budget

/// Upper bound, in bytes, of the inline storage of a [`Cursor`].
///
/// Every backend cursor is stored in place, a cursor never allocates.
/// Adding a backend whose cursor exceeds this budget fails to compile.
pub const CURSOR_STORAGE_SIZE: usize = 64;

const _STATIC_ASSERT_: () = const {
    assert!(size_of::<JsonInputCursor<'static>>() <= CURSOR_STORAGE_SIZE);
    assert!(size_of::<JsonOutputCursor<'static>>() <= CURSOR_STORAGE_SIZE);
    assert!(size_of::<XmlInputCursor<'static>>() <= CURSOR_STORAGE_SIZE);
    assert!(size_of::<XmlOutputCursor<'static>>() <= CURSOR_STORAGE_SIZE);
    assert!(size_of::<Cursor<'static>>() <= CURSOR_STORAGE_SIZE);
};

// -----------------------------------------------------------------------------
// BackendCursor

/// Navigation primitives a backend cursor provides.
///
/// Input cursors validate: missing keys, out-of-range indices and
/// containers of the wrong shape produce a null [`Cursor`]. Output
/// cursors create what is missing and are never at the end.
pub trait BackendCursor<'a>: Copy + Debug + Into<Cursor<'a>> {
    /// Number of entries in the addressed container.
    fn len(&self) -> usize;

    /// Cursor to the entry stored under `key`.
    fn find(&self, key: &str) -> Cursor<'a>;

    /// Cursor to the entry at `index`.
    fn at(&self, index: usize) -> Cursor<'a>;

    /// Whether the position is past the last entry.
    fn at_end(&self) -> bool;

    /// Moves to the next entry.
    fn advance(&mut self);
}

// -----------------------------------------------------------------------------
// Cursor

/// A position inside a document owned by an archive.
///
/// A cursor is a small value: copying one yields an independent position
/// over the same document. The [`Null`](Cursor::Null) cursor refers to
/// nothing, navigating from it yields null again and serializing through
/// it fails, so a chain of lookups needs only one check at the end.
///
/// # Examples
///
/// ```
/// use vc_archive::json::JsonInputArchive;
/// use vc_archive::{Archive, ContainerKind};
///
/// let archive = JsonInputArchive::new(r#"{"list": [10, 20]}"#);
/// let root = archive.begin(ContainerKind::Map);
///
/// assert!(root.find("missing").find("deeper").is_null());
///
/// let list = archive.begin_at(root.find("list"), ContainerKind::Array);
/// assert_eq!(list.len(), 2);
/// assert_eq!(list.entries().count(), 2);
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub enum Cursor<'a> {
    #[default]
    Null,
    JsonInput(JsonInputCursor<'a>),
    JsonOutput(JsonOutputCursor<'a>),
    XmlInput(XmlInputCursor<'a>),
    XmlOutput(XmlOutputCursor<'a>),
}

macro_rules! dispatch {
    ($cursor:expr, $c:ident => $body:expr, null => $null:expr) => {
        match $cursor {
            Cursor::Null => $null,
            Cursor::JsonInput($c) => $body,
            Cursor::JsonOutput($c) => $body,
            Cursor::XmlInput($c) => $body,
            Cursor::XmlOutput($c) => $body,
        }
    };
}

impl<'a> Cursor<'a> {
    /// The cursor that refers to nothing.
    #[inline]
    pub const fn null() -> Self {
        Self::Null
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Not null and not at the end, the condition for serializing
    /// through this cursor.
    #[inline]
    pub fn is_valid(&self) -> bool {
        !self.at_end()
    }

    /// Direction of the archive this cursor came from.
    pub const fn direction(&self) -> Option<Direction> {
        match self {
            Self::Null => None,
            Self::JsonInput(_) | Self::XmlInput(_) => Some(Direction::Input),
            Self::JsonOutput(_) | Self::XmlOutput(_) => Some(Direction::Output),
        }
    }

    /// Number of entries in the addressed container, `0` when null.
    #[inline]
    pub fn len(&self) -> usize {
        dispatch!(self, c => c.len(), null => 0)
    }

    /// Cursor to the map entry stored under `key`.
    ///
    /// Output cursors append the entry when it is missing.
    #[inline]
    pub fn find(&self, key: &str) -> Cursor<'a> {
        dispatch!(self, c => c.find(key), null => Cursor::Null)
    }

    /// Cursor to the array element at `index`.
    ///
    /// Output cursors grow the array with default elements up to `index`.
    #[inline]
    pub fn at(&self, index: usize) -> Cursor<'a> {
        dispatch!(self, c => c.at(index), null => Cursor::Null)
    }

    /// Whether there is no entry at the current position.
    ///
    /// Always `true` when null, always `false` for output cursors.
    #[inline]
    pub fn at_end(&self) -> bool {
        dispatch!(self, c => c.at_end(), null => true)
    }

    /// Moves to the next entry and returns the moved cursor.
    #[inline]
    pub fn advance(&mut self) -> &mut Self {
        dispatch!(self, c => c.advance(), null => ());
        self
    }

    /// Moves to the next entry and returns a copy of the position before
    /// the move.
    #[inline]
    pub fn post_advance(&mut self) -> Self {
        let before = *self;
        self.advance();
        before
    }

    /// Iterates from the current position while [`is_valid`](Self::is_valid).
    ///
    /// Output cursors are never at the end, so this iterator does not
    /// terminate on its own for them.
    #[inline]
    pub fn entries(self) -> Entries<'a> {
        Entries { cursor: self }
    }
}

// -----------------------------------------------------------------------------
// Entries

/// Iterator over the entries of a container, see [`Cursor::entries`].
#[derive(Clone, Debug)]
pub struct Entries<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Iterator for Entries<'a> {
    type Item = Cursor<'a>;

    #[inline]
    fn next(&mut self) -> Option<Cursor<'a>> {
        if self.cursor.is_valid() {
            Some(self.cursor.post_advance())
        } else {
            None
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{CURSOR_STORAGE_SIZE, Cursor};

    #[test]
    fn fits_storage() {
        assert!(size_of::<Cursor<'static>>() <= CURSOR_STORAGE_SIZE);
    }

    #[test]
    fn null_propagates() {
        let mut c = Cursor::null();
        assert!(c.is_null());
        assert!(!c.is_valid());
        assert!(c.at_end());
        assert_eq!(c.len(), 0);
        assert!(c.find("a").at(3).find("b").is_null());
        assert!(c.advance().is_null());
        assert!(c.post_advance().is_null());
        assert_eq!(c.entries().count(), 0);
        assert_eq!(c.direction(), None);
        assert_eq!(Cursor::default(), Cursor::null());
    }
}
