use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Debug;

use super::JsonNode;
use crate::NodeId;

// -----------------------------------------------------------------------------
// JsonDocument

/// An in-memory JSON tree.
///
/// All nodes live in a single arena. The document always has a root,
/// which is [`JsonNode::Null`] for a new document.
///
/// Replacing a node with [`replace`](Self::replace) detaches its former
/// children. Detached nodes stay in the arena but are unreachable from
/// the root and never rendered.
///
/// # Examples
///
/// ```
/// use vc_dom::json::{JsonDocument, JsonNode};
///
/// let mut doc = JsonDocument::new();
/// let root = doc.root();
/// doc.replace(root, JsonNode::object());
///
/// let (index, _) = doc.insert_member(root, "answer").unwrap();
/// assert_eq!(index, 0);
/// assert_eq!(doc.len(root), 1);
/// assert_eq!(doc.member(root, "answer"), Some(0));
/// ```
#[derive(Clone)]
pub struct JsonDocument {
    nodes: Vec<JsonNode>,
    root: NodeId,
}

impl Default for JsonDocument {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for JsonDocument {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        Debug::fmt(&self.to_value(), f)
    }
}

impl JsonDocument {
    /// Creates a document whose root is `null`.
    pub fn new() -> Self {
        Self::with_root(JsonNode::Null)
    }

    /// Creates a document with the given root node.
    pub fn with_root(root: JsonNode) -> Self {
        let mut nodes = Vec::with_capacity(16);
        nodes.push(root);
        Self {
            nodes,
            root: NodeId::new(0).unwrap_or_else(|| unreachable!()),
        }
    }

    /// Returns the id of the root node.
    #[inline]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes in the arena, including detached ones.
    #[inline]
    pub fn arena_len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the node with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this document.
    #[inline]
    pub fn node(&self, id: NodeId) -> &JsonNode {
        &self.nodes[id.index()]
    }

    /// Returns the node with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this document.
    #[inline]
    pub fn node_mut(&mut self, id: NodeId) -> &mut JsonNode {
        &mut self.nodes[id.index()]
    }

    /// Moves a node into the arena without attaching it anywhere.
    ///
    /// Returns `None` once the arena holds `u32::MAX` nodes.
    pub fn try_insert(&mut self, node: JsonNode) -> Option<NodeId> {
        let id = NodeId::new(self.nodes.len())?;
        self.nodes.push(node);
        Some(id)
    }

    /// Moves a node into the arena without attaching it anywhere.
    ///
    /// # Panics
    ///
    /// Panics once the arena holds `u32::MAX` nodes.
    pub fn insert(&mut self, node: JsonNode) -> NodeId {
        match self.try_insert(node) {
            Some(id) => id,
            None => panic!("JsonDocument arena overflow"),
        }
    }

    /// Overwrites a node in place and returns the previous value.
    #[inline]
    pub fn replace(&mut self, id: NodeId, node: JsonNode) -> JsonNode {
        core::mem::replace(self.node_mut(id), node)
    }

    /// Number of elements of an array, members of an object, and `1` for
    /// anything else (a scalar is a single addressable value).
    pub fn len(&self, id: NodeId) -> usize {
        match self.node(id) {
            JsonNode::Array(items) => items.len(),
            JsonNode::Object(members) => members.len(),
            _ => 1,
        }
    }

    /// Returns the `index`-th child of a container.
    ///
    /// For objects this is the value of the `index`-th member.
    /// Scalars have no children.
    pub fn child(&self, id: NodeId, index: usize) -> Option<NodeId> {
        match self.node(id) {
            JsonNode::Array(items) => items.get(index).copied(),
            JsonNode::Object(members) => members.get(index).map(|(_, v)| *v),
            _ => None,
        }
    }

    /// Returns the key of the `index`-th member of an object.
    pub fn key(&self, id: NodeId, index: usize) -> Option<&str> {
        match self.node(id) {
            JsonNode::Object(members) => members.get(index).map(|(k, _)| k.as_str()),
            _ => None,
        }
    }

    /// Returns the position of `key` among the members of an object.
    pub fn member(&self, id: NodeId, key: &str) -> Option<usize> {
        match self.node(id) {
            JsonNode::Object(members) => members.iter().position(|(k, _)| k == key),
            _ => None,
        }
    }

    /// Appends a `null` element to an array and returns its id.
    ///
    /// Returns `None` if `id` is not an array.
    pub fn push(&mut self, id: NodeId) -> Option<NodeId> {
        if !self.node(id).is_array() {
            return None;
        }
        let child = self.insert(JsonNode::Null);
        if let JsonNode::Array(items) = self.node_mut(id) {
            items.push(child);
        }
        Some(child)
    }

    /// Returns the position and value of `key`, appending a `null` member
    /// first when the key is absent.
    ///
    /// Returns `None` if `id` is not an object.
    pub fn insert_member(&mut self, id: NodeId, key: &str) -> Option<(usize, NodeId)> {
        if let Some(index) = self.member(id, key) {
            return self.child(id, index).map(|child| (index, child));
        }
        if !self.node(id).is_object() {
            return None;
        }
        let child = self.insert(JsonNode::Null);
        match self.node_mut(id) {
            JsonNode::Object(members) => {
                members.push((String::from(key), child));
                Some((members.len() - 1, child))
            }
            _ => None,
        }
    }

    /// Stores `node` under `key`, overwriting any previous value.
    ///
    /// Returns `None` if `id` is not an object.
    pub fn set_member(&mut self, id: NodeId, key: &str, node: JsonNode) -> Option<NodeId> {
        let (_, child) = self.insert_member(id, key)?;
        self.replace(child, node);
        Some(child)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::JsonDocument;
    use crate::json::JsonNode;

    #[test]
    fn new_document_is_null() {
        let doc = JsonDocument::new();
        assert!(doc.node(doc.root()).is_null());
        assert_eq!(doc.len(doc.root()), 1);
        assert_eq!(doc.child(doc.root(), 0), None);
    }

    #[test]
    fn push_only_on_arrays() {
        let mut doc = JsonDocument::new();
        let root = doc.root();
        assert!(doc.push(root).is_none());

        doc.replace(root, JsonNode::array());
        let a = doc.push(root).unwrap();
        let b = doc.push(root).unwrap();
        assert_eq!(doc.len(root), 2);
        assert_eq!(doc.child(root, 0), Some(a));
        assert_eq!(doc.child(root, 1), Some(b));
        assert!(doc.node(b).is_null());
    }

    #[test]
    fn members_are_unique_and_ordered() {
        let mut doc = JsonDocument::with_root(JsonNode::object());
        let root = doc.root();

        let (i0, z) = doc.insert_member(root, "z").unwrap();
        let (i1, _) = doc.insert_member(root, "a").unwrap();
        let (again, z2) = doc.insert_member(root, "z").unwrap();

        assert_eq!((i0, i1, again), (0, 1, 0));
        assert_eq!(z, z2);
        assert_eq!(doc.len(root), 2);
        assert_eq!(doc.key(root, 1), Some("a"));
    }

    #[test]
    fn set_member_overwrites() {
        let mut doc = JsonDocument::with_root(JsonNode::object());
        let root = doc.root();
        doc.set_member(root, "k", JsonNode::from(1_u64));
        let id = doc.set_member(root, "k", JsonNode::from("v")).unwrap();

        assert_eq!(doc.len(root), 1);
        assert_eq!(doc.node(id).as_str(), Some("v"));
    }

    #[test]
    fn replace_detaches_children() {
        let mut doc = JsonDocument::with_root(JsonNode::array());
        let root = doc.root();
        doc.push(root);
        doc.push(root);

        let old = doc.replace(root, JsonNode::object());
        assert!(matches!(old, JsonNode::Array(ref items) if items.len() == 2));
        assert_eq!(doc.len(root), 0);
        assert_eq!(doc.arena_len(), 3);
    }
}
