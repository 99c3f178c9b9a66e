use alloc::sync::Arc;
use core::any::{Any, TypeId};
use core::fmt::Debug;
use core::hash::{BuildHasher, Hash, Hasher};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use hashbrown::HashMap;

use crate::{Archive, Cursor};

// -----------------------------------------------------------------------------
// TypeKey

/// Identity of a user-defined type, as used by a [`TypeRegistry`].
///
/// Two keys are equal iff they identify the same type, the name is only
/// carried along for diagnostics.
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    #[inline]
    pub fn of<T: Any + ?Sized>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: core::any::type_name::<T>(),
        }
    }

    #[inline]
    pub const fn id(self) -> TypeId {
        self.id
    }

    #[inline]
    pub const fn name(self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeKey {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Debug for TypeKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name)
    }
}

// -----------------------------------------------------------------------------
// TypeIdHasher

// `TypeId` is already a hash, pass it through.
#[derive(Clone, Copy, Default)]
struct TypeIdHasher {
    hash: u64,
}

impl Hasher for TypeIdHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.hash
    }

    fn write(&mut self, bytes: &[u8]) {
        for byte in bytes.iter().rev() {
            self.hash = self.hash.rotate_left(8).wrapping_add(u64::from(*byte));
        }
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.hash = i;
    }
}

#[derive(Clone, Copy, Default)]
struct TypeIdState;

impl BuildHasher for TypeIdState {
    type Hasher = TypeIdHasher;

    #[inline]
    fn build_hasher(&self) -> TypeIdHasher {
        TypeIdHasher::default()
    }
}

// -----------------------------------------------------------------------------
// UserArchive

/// A handler for values of type `T` on archives of type `A`.
///
/// The handler receives the archive, the concrete cursor of that archive
/// positioned on the value, and the value itself. It returns whether the
/// value was fully serialized.
pub type Handler<A, T> = fn(&A, &mut <A as UserArchive>::Cursor<'_>, &mut T) -> bool;

/// Archive types that own a [`TypeRegistry`] for user-defined types.
///
/// Every archive type has exactly one registry, shared by all of its
/// instances. Registering a handler on one archive type never affects
/// another.
pub trait UserArchive: Archive + Sized + 'static {
    /// Concrete cursor handed to [`Handler`]s of this archive type.
    type Cursor<'a>: Copy + Into<Cursor<'a>>;

    /// The process-wide registry of this archive type.
    fn registry() -> &'static TypeRegistry<Self>;

    /// Returns the concrete cursor if `cursor` belongs to this backend.
    fn narrow<'c, 'a>(cursor: &'c mut Cursor<'a>) -> Option<&'c mut Self::Cursor<'a>>;

    /// Installs `handler` for `T`, replacing any previous handler for `T`.
    #[inline]
    fn register<T: Any>(handler: Handler<Self, T>) {
        Self::registry().register(handler);
    }

    /// Removes the handler for `T`, returns whether there was one.
    #[inline]
    fn unregister<T: Any>() -> bool {
        Self::registry().unregister::<T>()
    }
}

// -----------------------------------------------------------------------------
// TypeRegistry

/// A [`Handler`] with its value and cursor types erased, as stored in a
/// [`TypeRegistry`].
pub type ErasedHandler<A> = dyn Fn(&A, &mut Cursor<'_>, &mut dyn Any) -> bool + Send + Sync;

// Pins the closure to a signature that is generic over the cursor lifetime.
fn erase<A, F>(handler: F) -> Arc<ErasedHandler<A>>
where
    F: Fn(&A, &mut Cursor<'_>, &mut dyn Any) -> bool + Send + Sync + 'static,
{
    Arc::new(handler)
}

/// Mapping from user-defined types to the handlers that serialize them
/// on one archive type.
///
/// The registry is safe to use from several threads. Handlers are looked
/// up under a read lock and called after it is released, so a handler may
/// itself serialize nested user-defined values.
///
/// # Examples
///
/// ```
/// use vc_archive::json::{JsonInputArchive, JsonInputCursor};
/// use vc_archive::{Archive, ArchiveExt, ContainerKind, UserArchive, UserType};
///
/// struct Celsius(f64);
/// impl UserType for Celsius {}
///
/// fn read_celsius(_: &JsonInputArchive, cursor: &mut JsonInputCursor<'_>, value: &mut Celsius) -> bool {
///     let Some(node) = cursor.current() else { return false };
///     match cursor.document().node(node).as_number() {
///         Some(n) => {
///             value.0 = n.as_f64();
///             true
///         }
///         None => false,
///     }
/// }
///
/// JsonInputArchive::register::<Celsius>(read_celsius);
/// assert!(JsonInputArchive::registry().contains::<Celsius>());
///
/// let archive = JsonInputArchive::new("[21.5]");
/// let cursor = archive.begin(ContainerKind::Array);
///
/// let mut t = Celsius(0.0);
/// assert!(archive.serialize(cursor, &mut t));
/// assert_eq!(t.0, 21.5);
/// ```
pub struct TypeRegistry<A: 'static> {
    handlers: RwLock<HashMap<TypeId, Arc<ErasedHandler<A>>, TypeIdState>>,
}

impl<A: UserArchive> Default for TypeRegistry<A> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<A: 'static> Debug for TypeRegistry<A> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("archive", &core::any::type_name::<A>())
            .field("len", &self.read().len())
            .finish()
    }
}

impl<A: 'static> TypeRegistry<A> {
    // A handler that panicked cannot leave the map half-updated,
    // so poisoning is ignored.
    #[inline]
    fn read(&self) -> RwLockReadGuard<'_, HashMap<TypeId, Arc<ErasedHandler<A>>, TypeIdState>> {
        self.handlers.read().unwrap_or_else(PoisonError::into_inner)
    }

    #[inline]
    fn write(&self) -> RwLockWriteGuard<'_, HashMap<TypeId, Arc<ErasedHandler<A>>, TypeIdState>> {
        self.handlers.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<A: UserArchive> TypeRegistry<A> {
    /// Creates an empty registry.
    #[inline]
    pub const fn new() -> Self {
        Self {
            handlers: RwLock::new(HashMap::with_hasher(TypeIdState)),
        }
    }

    /// Installs `handler` for `T`. The last registration wins.
    pub fn register<T: Any>(&self, handler: Handler<A, T>) {
        let key = TypeKey::of::<T>();
        let erased = erase::<A, _>(move |archive, cursor, value| {
            match (A::narrow(cursor), value.downcast_mut::<T>()) {
                (Some(cursor), Some(value)) => handler(archive, cursor, value),
                _ => false,
            }
        });

        if self.write().insert(key.id, erased).is_some() {
            log::debug!(
                "replaced handler for `{}` on `{}`",
                key.name,
                core::any::type_name::<A>()
            );
        }
    }

    /// Removes the handler for `T`, returns whether there was one.
    pub fn unregister<T: Any>(&self) -> bool {
        self.write().remove(&TypeId::of::<T>()).is_some()
    }

    #[inline]
    pub fn contains<T: Any>(&self) -> bool {
        self.contains_key(TypeKey::of::<T>())
    }

    #[inline]
    pub fn contains_key(&self, key: TypeKey) -> bool {
        self.read().contains_key(&key.id)
    }

    /// Number of registered types.
    #[inline]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Returns the handler registered for `key`.
    #[inline]
    pub fn resolve(&self, key: TypeKey) -> Option<Arc<ErasedHandler<A>>> {
        self.read().get(&key.id).cloned()
    }

    /// Runs the handler registered for `key`.
    ///
    /// Returns `false` without touching `value` when no handler is
    /// registered, when `value` is not of the keyed type, or when `cursor`
    /// belongs to another backend.
    pub fn dispatch(
        &self,
        archive: &A,
        cursor: &mut Cursor<'_>,
        key: TypeKey,
        value: &mut dyn Any,
    ) -> bool {
        match self.resolve(key) {
            Some(handler) => handler(archive, cursor, value),
            None => {
                log::warn!(
                    "no handler registered for `{}` on `{}`",
                    key.name,
                    core::any::type_name::<A>()
                );
                false
            }
        }
    }
}

// -----------------------------------------------------------------------------
// Tests
