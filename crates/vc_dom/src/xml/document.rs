use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Debug;

use super::XmlElement;
use crate::NodeId;

// -----------------------------------------------------------------------------
// XmlDocument

/// An in-memory XML element tree.
///
/// A document either has exactly one root element, or none at all
/// (see [`empty`](Self::empty)), which is what a reader should observe
/// for input that could not be parsed.
///
/// # Examples
///
/// ```
/// use vc_dom::xml::XmlDocument;
///
/// let mut doc = XmlDocument::new("root");
/// let root = doc.root().unwrap();
///
/// let a = doc.append_child(root, "value");
/// doc.set_attribute(a, "key", "a");
/// doc.set_text(a, "1");
///
/// assert_eq!(doc.find_child_by_attribute(root, "key", "a"), Some(0));
/// assert_eq!(doc.element(a).text, "1");
/// ```
#[derive(Clone, Default)]
pub struct XmlDocument {
    elements: Vec<XmlElement>,
    root: Option<NodeId>,
}

impl Debug for XmlDocument {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        struct Tree<'a>(&'a XmlDocument, NodeId);

        impl Debug for Tree<'_> {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                let element = self.0.element(self.1);
                let mut s = f.debug_struct(&element.name);
                for (k, v) in &element.attributes {
                    s.field(k, v);
                }
                if !element.text.is_empty() {
                    s.field("#text", &element.text);
                }
                for child in &element.children {
                    s.field("#child", &Tree(self.0, *child));
                }
                s.finish()
            }
        }

        match self.root {
            Some(root) => Debug::fmt(&Tree(self, root), f),
            None => f.write_str("XmlDocument(empty)"),
        }
    }
}

impl XmlDocument {
    /// Creates a document without a root element.
    #[inline]
    pub const fn empty() -> Self {
        Self {
            elements: Vec::new(),
            root: None,
        }
    }

    /// Creates a document with an empty root element named `root_name`.
    pub fn new(root_name: &str) -> Self {
        let mut doc = Self::empty();
        let root = doc.insert(XmlElement::new(root_name));
        doc.root = Some(root);
        doc
    }

    /// Returns the root element, if any.
    #[inline]
    pub const fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Replaces the root with an element already in the arena.
    #[inline]
    pub fn set_root(&mut self, id: NodeId) {
        self.root = Some(id);
    }

    /// Number of elements in the arena, including detached ones.
    #[inline]
    pub fn arena_len(&self) -> usize {
        self.elements.len()
    }

    /// Returns the element with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this document.
    #[inline]
    pub fn element(&self, id: NodeId) -> &XmlElement {
        &self.elements[id.index()]
    }

    /// Returns the element with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this document.
    #[inline]
    pub fn element_mut(&mut self, id: NodeId) -> &mut XmlElement {
        &mut self.elements[id.index()]
    }

    /// Moves an element into the arena without attaching it anywhere.
    ///
    /// Returns `None` once the arena holds `u32::MAX` elements.
    pub fn try_insert(&mut self, element: XmlElement) -> Option<NodeId> {
        let id = NodeId::new(self.elements.len())?;
        self.elements.push(element);
        Some(id)
    }

    /// Moves an element into the arena without attaching it anywhere.
    ///
    /// # Panics
    ///
    /// Panics once the arena holds `u32::MAX` elements.
    pub fn insert(&mut self, element: XmlElement) -> NodeId {
        match self.try_insert(element) {
            Some(id) => id,
            None => panic!("XmlDocument arena overflow"),
        }
    }

    /// Appends a new empty child element and returns its id.
    pub fn append_child(&mut self, parent: NodeId, name: &str) -> NodeId {
        let child = self.insert(XmlElement::new(name));
        self.element_mut(parent).children.push(child);
        child
    }

    /// Number of child elements.
    #[inline]
    pub fn len(&self, id: NodeId) -> usize {
        self.element(id).children.len()
    }

    /// Returns the `index`-th child element.
    #[inline]
    pub fn child(&self, id: NodeId, index: usize) -> Option<NodeId> {
        self.element(id).children.get(index).copied()
    }

    /// Returns the first child element named `name`.
    pub fn child_by_name(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.element(id)
            .children
            .iter()
            .copied()
            .find(|c| self.element(*c).name == name)
    }

    /// Returns the position of the first child whose attribute `attr`
    /// equals `value`.
    pub fn find_child_by_attribute(&self, id: NodeId, attr: &str, value: &str) -> Option<usize> {
        self.element(id)
            .children
            .iter()
            .position(|c| self.element(*c).attribute(attr) == Some(value))
    }

    #[inline]
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).attribute(name)
    }

    #[inline]
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        self.element_mut(id).set_attribute(name, value);
    }

    #[inline]
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Option<String> {
        self.element_mut(id).remove_attribute(name)
    }

    /// Makes `text` the only content of an element, detaching its children.
    pub fn set_text(&mut self, id: NodeId, text: &str) {
        let element = self.element_mut(id);
        element.children.clear();
        element.text.clear();
        element.text.push_str(text);
    }

    /// Removes the text and children of an element, attributes are kept.
    pub fn clear(&mut self, id: NodeId) {
        let element = self.element_mut(id);
        element.children.clear();
        element.text.clear();
    }

    /// Changes the tag name of an element.
    pub fn rename(&mut self, id: NodeId, name: &str) {
        let element = self.element_mut(id);
        element.name.clear();
        element.name.push_str(name);
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::XmlDocument;

    #[test]
    fn empty_has_no_root() {
        let doc = XmlDocument::empty();
        assert!(doc.root().is_none());
        assert_eq!(doc.arena_len(), 0);
    }

    #[test]
    fn children() {
        let mut doc = XmlDocument::new("root");
        let root = doc.root().unwrap();
        let a = doc.append_child(root, "value");
        let b = doc.append_child(root, "user");

        assert_eq!(doc.len(root), 2);
        assert_eq!(doc.child(root, 1), Some(b));
        assert_eq!(doc.child(root, 2), None);
        assert_eq!(doc.child_by_name(root, "value"), Some(a));
        assert_eq!(doc.child_by_name(root, "missing"), None);
    }

    #[test]
    fn set_text_drops_children() {
        let mut doc = XmlDocument::new("root");
        let root = doc.root().unwrap();
        doc.append_child(root, "value");
        doc.set_attribute(root, "kind", "array");

        doc.set_text(root, "42");
        assert_eq!(doc.len(root), 0);
        assert_eq!(doc.element(root).text, "42");
        assert_eq!(doc.attribute(root, "kind"), Some("array"));

        doc.clear(root);
        assert!(doc.element(root).is_empty());
    }

    #[test]
    fn rename() {
        let mut doc = XmlDocument::new("root");
        let root = doc.root().unwrap();
        doc.rename(root, "other");
        assert_eq!(doc.element(root).name, "other");
    }
}
