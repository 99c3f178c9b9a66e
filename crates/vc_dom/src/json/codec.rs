use alloc::string::String;
use alloc::vec::Vec;

use serde_json::Value;
use serde_json::ser::{CompactFormatter, PrettyFormatter, Serializer};

use super::{JsonDocument, JsonNode, JsonNumber};
use crate::{Layout, NodeId, ParseError, RenderError};

// -----------------------------------------------------------------------------
// Parsing

impl JsonDocument {
    /// Parses JSON text into a new document.
    ///
    /// # Examples
    ///
    /// ```
    /// use vc_dom::json::{JsonDocument, JsonNode};
    ///
    /// let doc = JsonDocument::parse(r#"{"a": [1, -2, 3.5]}"#).unwrap();
    /// let a = doc.child(doc.root(), 0).unwrap();
    /// assert_eq!(doc.len(a), 3);
    ///
    /// assert!(JsonDocument::parse("{").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(&value)
    }

    /// Copies a [`serde_json::Value`] into a new document.
    pub fn from_value(value: &Value) -> Result<Self, ParseError> {
        let mut doc = Self::new();
        let root = doc.root();
        let node = doc.import(value)?;
        doc.replace(root, node);
        Ok(doc)
    }

    // Builds the node for `value`, inserting its descendants into the arena.
    fn import(&mut self, value: &Value) -> Result<JsonNode, ParseError> {
        Ok(match value {
            Value::Null => JsonNode::Null,
            Value::Bool(b) => JsonNode::Bool(*b),
            Value::Number(n) => JsonNode::Number(JsonNumber::from(n)),
            Value::String(s) => JsonNode::String(s.clone()),
            Value::Array(items) => {
                let mut children = Vec::with_capacity(items.len());
                for item in items {
                    let node = self.import(item)?;
                    children.push(self.try_insert(node).ok_or(ParseError::TooLarge)?);
                }
                JsonNode::Array(children)
            }
            Value::Object(members) => {
                let mut children = Vec::with_capacity(members.len());
                for (key, item) in members {
                    let node = self.import(item)?;
                    let id = self.try_insert(node).ok_or(ParseError::TooLarge)?;
                    children.push((key.clone(), id));
                }
                JsonNode::Object(children)
            }
        })
    }
}

// -----------------------------------------------------------------------------
// Rendering

impl JsonDocument {
    /// Copies the tree reachable from the root into a [`serde_json::Value`].
    pub fn to_value(&self) -> Value {
        self.export(self.root())
    }

    fn export(&self, id: NodeId) -> Value {
        match self.node(id) {
            JsonNode::Null => Value::Null,
            JsonNode::Bool(b) => Value::Bool(*b),
            JsonNode::Number(n) => Value::from(*n),
            JsonNode::String(s) => Value::String(s.clone()),
            JsonNode::Array(items) => Value::Array(items.iter().map(|c| self.export(*c)).collect()),
            JsonNode::Object(members) => Value::Object(
                members
                    .iter()
                    .map(|(k, c)| (k.clone(), self.export(*c)))
                    .collect(),
            ),
        }
    }

    /// Renders the document as JSON text.
    ///
    /// # Examples
    ///
    /// ```
    /// use vc_dom::Layout;
    /// use vc_dom::json::JsonDocument;
    ///
    /// let doc = JsonDocument::parse(r#"{ "b": 1, "a": [true] }"#).unwrap();
    /// let text = doc.render(Layout::Compact).unwrap();
    /// assert_eq!(text, r#"{"b":1,"a":[true]}"#);
    /// ```
    pub fn render(&self, layout: Layout) -> Result<String, RenderError> {
        use serde_json::ser::Formatter;

        fn write<F: Formatter>(value: &Value, formatter: F) -> Result<String, RenderError> {
            use serde::Serialize as _;

            let mut out = Vec::with_capacity(128);
            let mut serializer = Serializer::with_formatter(&mut out, formatter);
            value.serialize(&mut serializer)?;
            Ok(String::from_utf8(out)?)
        }

        let value = self.to_value();
        match layout {
            Layout::Compact => write(&value, CompactFormatter),
            Layout::Pretty { indent } => {
                let indent = " ".repeat(indent);
                write(&value, PrettyFormatter::with_indent(indent.as_bytes()))
            }
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::Layout;
    use crate::json::{JsonDocument, JsonNode, JsonNumber};

    #[test]
    fn parse_classifies_numbers() {
        let doc = JsonDocument::parse("[0, 5, -5, 1.5, 18446744073709551615]").unwrap();
        let root = doc.root();
        let number = |i| doc.node(doc.child(root, i).unwrap()).as_number().unwrap();

        assert_eq!(number(0), JsonNumber::Unsigned(0));
        assert_eq!(number(1), JsonNumber::Unsigned(5));
        assert_eq!(number(2), JsonNumber::Signed(-5));
        assert_eq!(number(3), JsonNumber::Float(1.5));
        assert_eq!(number(4), JsonNumber::Unsigned(u64::MAX));
    }

    #[test]
    fn parse_keeps_key_order() {
        let doc = JsonDocument::parse(r#"{"z": 1, "a": 2, "m": 3}"#).unwrap();
        let root = doc.root();
        assert_eq!(doc.key(root, 0), Some("z"));
        assert_eq!(doc.key(root, 1), Some("a"));
        assert_eq!(doc.key(root, 2), Some("m"));
    }

    #[test]
    fn parse_rejects_malformed() {
        assert!(JsonDocument::parse("").is_err());
        assert!(JsonDocument::parse("[1, 2").is_err());
        assert!(JsonDocument::parse("{\"a\" 1}").is_err());
    }

    #[test]
    fn render_then_parse() {
        let mut doc = JsonDocument::with_root(JsonNode::object());
        let root = doc.root();
        doc.set_member(root, "s", JsonNode::from("text \"quoted\""));
        doc.set_member(root, "f", JsonNode::from(0.25));
        let list = doc.set_member(root, "list", JsonNode::array()).unwrap();
        let item = doc.push(list).unwrap();
        doc.replace(item, JsonNode::from(-3_i64));

        for layout in [Layout::Compact, Layout::Pretty { indent: 2 }, Layout::default()] {
            let text = doc.render(layout).unwrap();
            let back = JsonDocument::parse(&text).unwrap();
            assert_eq!(back.to_value(), doc.to_value());
        }
    }

    #[test]
    fn pretty_uses_indent() {
        let doc = JsonDocument::parse("[1]").unwrap();
        assert_eq!(doc.render(Layout::Pretty { indent: 4 }).unwrap(), "[\n    1\n]");
    }

    #[test]
    fn detached_nodes_are_not_rendered() {
        let mut doc = JsonDocument::with_root(JsonNode::array());
        let root = doc.root();
        doc.push(root);
        doc.replace(root, JsonNode::array());
        assert_eq!(doc.render(Layout::Compact).unwrap(), "[]");
    }
}
