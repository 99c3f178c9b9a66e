use alloc::string::String;
use alloc::vec::Vec;

use crate::NodeId;

// -----------------------------------------------------------------------------
// XmlElement

/// An element of an [`XmlDocument`](super::XmlDocument).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct XmlElement {
    /// Tag name.
    pub name: String,
    /// Attributes in document order.
    pub attributes: Vec<(String, String)>,
    /// Character data, unescaped.
    pub text: String,
    /// Child elements in document order.
    pub children: Vec<NodeId>,
}

impl XmlElement {
    /// Creates an element without attributes, text, or children.
    #[inline]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns the value of an attribute.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Sets an attribute, keeping its position when it already exists.
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        match self.attributes.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => {
                v.clear();
                v.push_str(value);
            }
            None => self.attributes.push((name.into(), value.into())),
        }
    }

    /// Removes an attribute and returns its value.
    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        let index = self.attributes.iter().position(|(k, _)| k == name)?;
        Some(self.attributes.remove(index).1)
    }

    /// Returns `true` if the element has neither text nor children.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.children.is_empty()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::XmlElement;

    #[test]
    fn attributes() {
        let mut e = XmlElement::new("value");
        assert_eq!(e.attribute("key"), None);

        e.set_attribute("key", "a");
        e.set_attribute("kind", "map");
        e.set_attribute("key", "b");
        assert_eq!(e.attribute("key"), Some("b"));
        assert_eq!(e.attributes[0].0, "key");

        assert_eq!(e.remove_attribute("key").as_deref(), Some("b"));
        assert_eq!(e.remove_attribute("key"), None);
        assert_eq!(e.attributes.len(), 1);
    }
}
