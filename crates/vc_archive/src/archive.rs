use alloc::string::String;
use core::any::Any;

use crate::{ContainerKind, Cursor, Direction, ScalarMut, TypeKey};

// -----------------------------------------------------------------------------
// Archive

/// A document plus a direction, the common face of every backend.
///
/// The same traversal code runs against any archive: on input archives
/// it fills values from the document, on output archives it writes them
/// into the document. Every operation reports failure through `false` or
/// a null [`Cursor`] and leaves the value untouched.
///
/// This trait is object safe, traversal code usually takes `&dyn Archive`
/// and calls the generic helpers of [`ArchiveExt`].
pub trait Archive {
    fn direction(&self) -> Direction;

    /// Enters the document root as a container of the given kind.
    ///
    /// Output archives coerce the root to `kind`, input archives return a
    /// null cursor when the root has another shape.
    fn begin(&self, kind: ContainerKind) -> Cursor<'_>;

    /// Enters the entry under `cursor` as a container of the given kind,
    /// with the same coercion rules as [`begin`](Self::begin).
    ///
    /// Returns a null cursor for null cursors, exhausted cursors and
    /// cursors that belong to another archive.
    fn begin_at<'a>(&self, cursor: Cursor<'a>, kind: ContainerKind) -> Cursor<'a>;

    /// Transfers one scalar between `value` and the entry under `cursor`.
    fn serialize_scalar(&self, cursor: Cursor<'_>, value: ScalarMut<'_>) -> bool;

    /// Transfers a user-defined value through the handler registered for
    /// `key` on this archive type.
    ///
    /// `value` must be of the type `key` identifies.
    fn serialize_user(&self, cursor: Cursor<'_>, key: TypeKey, value: &mut dyn Any) -> bool;
}

/// Generic conveniences over [`Archive`], available on `dyn Archive` too.
pub trait ArchiveExt: Archive {
    /// Transfers `value` through `cursor`, dispatching on its type.
    #[inline]
    fn serialize<T: Archivable + ?Sized>(&self, cursor: Cursor<'_>, value: &mut T) -> bool {
        value.archive_with(self, cursor)
    }

    #[inline]
    fn is_input(&self) -> bool {
        self.direction().is_input()
    }

    #[inline]
    fn is_output(&self) -> bool {
        self.direction().is_output()
    }
}

impl<A: Archive + ?Sized> ArchiveExt for A {}

// -----------------------------------------------------------------------------
// Archivable

/// Values that can pass through an archive.
///
/// Implemented for the scalar kinds of [`ScalarMut`] and for every
/// [`UserType`].
pub trait Archivable {
    fn archive_with<A: Archive + ?Sized>(&mut self, archive: &A, cursor: Cursor<'_>) -> bool;
}

macro_rules! impl_archivable_scalar {
    ($($ty:ty),* $(,)?) => {$(
        impl Archivable for $ty {
            #[inline]
            fn archive_with<A: Archive + ?Sized>(&mut self, archive: &A, cursor: Cursor<'_>) -> bool {
                archive.serialize_scalar(cursor, ScalarMut::from(self))
            }
        }
    )*};
}

impl_archivable_scalar!(bool, i8, u8, i16, u16, i32, u32, i64, u64, f32, f64, String);

/// Marker for types serialized through a [`TypeRegistry`](crate::TypeRegistry).
///
/// Each archive type needs its own handler for the type, see
/// [`UserArchive::register`](crate::UserArchive::register). Serializing a
/// user type on an archive type without a handler fails and logs a warning.
pub trait UserType: Any {}

impl<T: UserType> Archivable for T {
    #[inline]
    fn archive_with<A: Archive + ?Sized>(&mut self, archive: &A, cursor: Cursor<'_>) -> bool {
        archive.serialize_user(cursor, TypeKey::of::<T>(), self)
    }
}

// -----------------------------------------------------------------------------
// Traverse

/// Types that describe their whole layout against an archive.
///
/// A single `traverse` serves both directions: the archive decides whether
/// fields are read or written.
///
/// # Examples
///
/// ```
/// use vc_archive::json::{JsonInputArchive, JsonOutputArchive};
/// use vc_archive::{Archive, ArchiveExt, ContainerKind, Layout, Traverse};
///
/// #[derive(Default)]
/// struct Config {
///     name: String,
///     retries: u32,
/// }
///
/// impl Traverse for Config {
///     fn traverse(&mut self, archive: &dyn Archive) -> bool {
///         let root = archive.begin(ContainerKind::Map);
///         archive.serialize(root.find("name"), &mut self.name)
///             && archive.serialize(root.find("retries"), &mut self.retries)
///     }
/// }
///
/// let output = JsonOutputArchive::new().with_layout(Layout::Compact);
/// let mut config = Config { name: "svc".into(), retries: 3 };
/// assert!(config.traverse(&output));
/// assert_eq!(output.to_string(), r#"{"name":"svc","retries":3}"#);
///
/// let input = JsonInputArchive::new(&output.to_string());
/// let mut back = Config::default();
/// assert!(back.traverse(&input));
/// assert_eq!(back.retries, 3);
/// ```
pub trait Traverse {
    fn traverse(&mut self, archive: &dyn Archive) -> bool;
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec::Vec;

    use super::{Archive, ArchiveExt, Traverse};
    use crate::json::{JsonInputArchive, JsonOutputArchive};
    use crate::xml::{XmlInputArchive, XmlOutputArchive};
    use crate::{ContainerKind, Cursor, Layout};

    #[derive(Default, Debug, PartialEq)]
    struct Inventory {
        owner: String,
        open: bool,
        weights: Vec<f64>,
        slots: Vec<(String, u16)>,
    }

    fn traverse_slot(archive: &dyn Archive, cursor: Cursor<'_>, slot: &mut (String, u16)) -> bool {
        let entry = archive.begin_at(cursor, ContainerKind::Map);
        archive.serialize(entry.find("item"), &mut slot.0)
            && archive.serialize(entry.find("count"), &mut slot.1)
    }

    impl Traverse for Inventory {
        fn traverse(&mut self, archive: &dyn Archive) -> bool {
            let root = archive.begin(ContainerKind::Map);
            if !(archive.serialize(root.find("owner"), &mut self.owner)
                && archive.serialize(root.find("open"), &mut self.open))
            {
                return false;
            }

            let weights = archive.begin_at(root.find("weights"), ContainerKind::Array);
            let slots = archive.begin_at(root.find("slots"), ContainerKind::Array);

            if archive.is_output() {
                let mut cursor = weights;
                for w in &mut self.weights {
                    if !archive.serialize(cursor.post_advance(), w) {
                        return false;
                    }
                }
                for (i, slot) in self.slots.iter_mut().enumerate() {
                    if !traverse_slot(archive, slots.at(i), slot) {
                        return false;
                    }
                }
                true
            } else {
                self.weights.clear();
                for cursor in weights.entries() {
                    let mut w = 0.0;
                    if !archive.serialize(cursor, &mut w) {
                        return false;
                    }
                    self.weights.push(w);
                }
                self.slots.clear();
                for cursor in slots.entries() {
                    let mut slot = (String::new(), 0);
                    if !traverse_slot(archive, cursor, &mut slot) {
                        return false;
                    }
                    self.slots.push(slot);
                }
                true
            }
        }
    }

    fn sample() -> Inventory {
        Inventory {
            owner: String::from("Ada"),
            open: true,
            weights: alloc::vec![0.5, 2.25, -1.0],
            slots: alloc::vec![(String::from("rope"), 2), (String::from("lamp"), 1)],
        }
    }

    #[derive(Debug, PartialEq)]
    struct Scalars {
        b: bool,
        i8: i8,
        u8: u8,
        i16: i16,
        u16: u16,
        i32: i32,
        u32: u32,
        i64: i64,
        u64: u64,
        f32: f32,
        f64: f64,
        s: String,
        empty: String,
    }

    impl Scalars {
        fn extremes() -> Self {
            Self {
                b: true,
                i8: i8::MIN,
                u8: u8::MAX,
                i16: i16::MIN,
                u16: u16::MAX,
                i32: i32::MIN,
                u32: u32::MAX,
                i64: i64::MIN,
                u64: u64::MAX,
                f32: 0.1,
                f64: -1.0e300,
                s: String::from("<tag> & \"quotes\" \u{e9}"),
                empty: String::new(),
            }
        }

        fn zeroed() -> Self {
            Self {
                b: false,
                i8: 0,
                u8: 0,
                i16: 0,
                u16: 0,
                i32: 0,
                u32: 0,
                i64: 0,
                u64: 0,
                f32: 0.0,
                f64: 0.0,
                s: String::new(),
                empty: String::from("not empty"),
            }
        }
    }

    impl Traverse for Scalars {
        fn traverse(&mut self, archive: &dyn Archive) -> bool {
            let mut c = archive.begin(ContainerKind::Array);
            archive.serialize(c.post_advance(), &mut self.b)
                && archive.serialize(c.post_advance(), &mut self.i8)
                && archive.serialize(c.post_advance(), &mut self.u8)
                && archive.serialize(c.post_advance(), &mut self.i16)
                && archive.serialize(c.post_advance(), &mut self.u16)
                && archive.serialize(c.post_advance(), &mut self.i32)
                && archive.serialize(c.post_advance(), &mut self.u32)
                && archive.serialize(c.post_advance(), &mut self.i64)
                && archive.serialize(c.post_advance(), &mut self.u64)
                && archive.serialize(c.post_advance(), &mut self.f32)
                && archive.serialize(c.post_advance(), &mut self.f64)
                && archive.serialize(c.post_advance(), &mut self.s)
                && archive.serialize(c.post_advance(), &mut self.empty)
        }
    }

    #[test]
    fn every_scalar_kind_round_trips() {
        let json = JsonOutputArchive::new();
        assert!(Scalars::extremes().traverse(&json));
        let mut back = Scalars::zeroed();
        assert!(back.traverse(&JsonInputArchive::try_new(&json.render().unwrap()).unwrap()));
        assert_eq!(back, Scalars::extremes());

        for layout in [Layout::Compact, Layout::DEFAULT] {
            let xml = XmlOutputArchive::new().with_layout(layout);
            assert!(Scalars::extremes().traverse(&xml));
            let mut back = Scalars::zeroed();
            assert!(back.traverse(&XmlInputArchive::try_new(&xml.render().unwrap()).unwrap()));
            assert_eq!(back, Scalars::extremes());
        }
    }

    #[test]
    fn json_round_trip() {
        let output = JsonOutputArchive::new().with_layout(Layout::Compact);
        assert!(sample().traverse(&output));
        let text = output.render().unwrap();

        let input = JsonInputArchive::try_new(&text).unwrap();
        let mut back = Inventory::default();
        assert!(back.traverse(&input));
        assert_eq!(back, sample());
    }

    #[test]
    fn xml_round_trip() {
        let output = XmlOutputArchive::new();
        assert!(sample().traverse(&output));
        let text = output.render().unwrap();

        let input = XmlInputArchive::try_new(&text).unwrap();
        let mut back = Inventory::default();
        assert!(back.traverse(&input));
        assert_eq!(back, sample());
    }

    #[test]
    fn input_reports_missing_fields() {
        let input = JsonInputArchive::new(r#"{"owner": "Ada"}"#);
        let mut back = Inventory::default();
        assert!(!back.traverse(&input));
        assert_eq!(back.owner, "Ada");
        assert!(!back.open);
    }

    #[test]
    fn dyn_dispatch() {
        let json = JsonOutputArchive::new();
        let xml = XmlOutputArchive::new();
        let archives: [&dyn Archive; 2] = [&json, &xml];
        for archive in archives {
            let root = archive.begin(ContainerKind::Array);
            let mut v = 7_i32;
            assert!(archive.serialize(root.at(0), &mut v));
            assert!(archive.is_output());
        }
    }
}
