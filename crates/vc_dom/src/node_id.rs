use core::fmt::{Debug, Display};
use core::hash::Hash;

use nonmax::NonMaxU32;

// -----------------------------------------------------------------------------
// NodeId

/// Index of a node inside a document arena.
///
/// Ids are only meaningful for the document that produced them.
/// Nodes are never freed, so an id stays valid for the whole lifetime
/// of its document, even after the node has been detached from the tree.
///
/// `Option<NodeId>` has the same size as `NodeId`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct NodeId(NonMaxU32);

impl NodeId {
    /// Creates an id from an arena slot, returns `None` for `u32::MAX`
    /// or for slots that do not fit into `u32`.
    #[inline]
    pub fn new(index: usize) -> Option<Self> {
        let index = u32::try_from(index).ok()?;
        NonMaxU32::new(index).map(Self)
    }

    /// Returns the arena slot of this id.
    #[inline]
    pub const fn index(self) -> usize {
        self.0.get() as usize
    }
}

impl Hash for NodeId {
    #[inline(always)]
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        state.write_u32(self.0.get());
    }
}

impl Debug for NodeId {
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "NodeId({})", self.0.get())
    }
}

impl Display for NodeId {
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        Display::fmt(&self.0.get(), f)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::NodeId;

    #[test]
    fn niche() {
        assert_eq!(size_of::<Option<NodeId>>(), size_of::<u32>());
    }

    #[test]
    fn bounds() {
        assert_eq!(NodeId::new(0).map(NodeId::index), Some(0));
        assert_eq!(NodeId::new(7).map(NodeId::index), Some(7));
        assert!(NodeId::new(u32::MAX as usize).is_none());
        assert!(NodeId::new(u32::MAX as usize + 1).is_none());
    }
}
