use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt::Display;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use super::{XmlDocument, XmlElement};
use crate::{Layout, NodeId, ParseError, RenderError};

fn parse_error(position: u64, message: impl Display) -> ParseError {
    ParseError::Xml {
        position,
        message: message.to_string(),
    }
}

fn render_error(error: impl Display) -> RenderError {
    RenderError::Xml(error.to_string())
}

// -----------------------------------------------------------------------------
// Parsing

impl XmlDocument {
    /// Parses XML text into a new document.
    ///
    /// Comments, processing instructions and the declaration are skipped.
    /// Input without any element is rejected with [`ParseError::MissingRoot`].
    ///
    /// # Examples
    ///
    /// ```
    /// use vc_dom::xml::XmlDocument;
    ///
    /// let doc = XmlDocument::parse(r#"<root><value key="a">1 &amp; 2</value></root>"#).unwrap();
    /// let root = doc.root().unwrap();
    /// let a = doc.child(root, 0).unwrap();
    /// assert_eq!(doc.attribute(a, "key"), Some("a"));
    /// assert_eq!(doc.element(a).text, "1 & 2");
    /// ```
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mut reader = Reader::from_str(text);
        let mut doc = Self::empty();
        let mut open: Vec<NodeId> = Vec::new();

        loop {
            let event = match reader.read_event() {
                Ok(event) => event,
                Err(e) => return Err(parse_error(reader.buffer_position() as u64, e)),
            };
            let position = reader.buffer_position() as u64;

            match event {
                Event::Start(start) => {
                    let id = doc.open_element(&start, open.last().copied(), position)?;
                    open.push(id);
                }
                Event::Empty(start) => {
                    doc.open_element(&start, open.last().copied(), position)?;
                }
                Event::End(_) => {
                    if let Some(id) = open.pop() {
                        doc.close_element(id);
                    }
                }
                Event::Text(text) => {
                    if let Some(&id) = open.last() {
                        let text = text.unescape().map_err(|e| parse_error(position, e))?;
                        doc.element_mut(id).text.push_str(&text);
                    }
                }
                Event::CData(data) => {
                    if let Some(&id) = open.last() {
                        let text = core::str::from_utf8(&data)?;
                        doc.element_mut(id).text.push_str(text);
                    }
                }
                Event::Eof => break,
                other => log::trace!("skipping XML event {other:?}"),
            }
        }

        if !open.is_empty() {
            return Err(parse_error(
                reader.buffer_position() as u64,
                "unexpected end of input inside an element",
            ));
        }
        if doc.root().is_none() {
            return Err(ParseError::MissingRoot);
        }
        Ok(doc)
    }

    fn open_element(
        &mut self,
        start: &BytesStart<'_>,
        parent: Option<NodeId>,
        position: u64,
    ) -> Result<NodeId, ParseError> {
        let qname = start.name();
        let mut element = XmlElement::new(core::str::from_utf8(qname.as_ref())?);

        for attribute in start.attributes() {
            let attribute = attribute.map_err(|e| parse_error(position, e))?;
            let key = core::str::from_utf8(attribute.key.as_ref())?;
            let value = attribute
                .unescape_value()
                .map_err(|e| parse_error(position, e))?;
            element.attributes.push((key.into(), value.into_owned()));
        }

        let id = self.try_insert(element).ok_or(ParseError::TooLarge)?;
        match parent {
            Some(parent) => self.element_mut(parent).children.push(id),
            None if self.root().is_none() => self.set_root(id),
            None => return Err(parse_error(position, "more than one root element")),
        }
        Ok(id)
    }

    // Indentation between child elements is not content.
    fn close_element(&mut self, id: NodeId) {
        let element = self.element_mut(id);
        if !element.children.is_empty() && element.text.trim().is_empty() {
            element.text.clear();
        }
    }
}

// -----------------------------------------------------------------------------
// Rendering

impl XmlDocument {
    /// Renders the document as XML text, starting with an XML declaration.
    ///
    /// A document without a root renders as the declaration only.
    ///
    /// # Examples
    ///
    /// ```
    /// use vc_dom::Layout;
    /// use vc_dom::xml::XmlDocument;
    ///
    /// let mut doc = XmlDocument::new("root");
    /// let root = doc.root().unwrap();
    /// let v = doc.append_child(root, "value");
    /// doc.set_text(v, "a < b");
    ///
    /// let text = doc.render(Layout::Compact).unwrap();
    /// assert!(text.ends_with("<root><value>a &lt; b</value></root>"));
    /// ```
    pub fn render(&self, layout: Layout) -> Result<String, RenderError> {
        let mut writer = match layout {
            Layout::Compact => Writer::new(Vec::with_capacity(128)),
            Layout::Pretty { indent } => Writer::new_with_indent(Vec::with_capacity(128), b' ', indent),
        };

        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(render_error)?;

        if let Some(root) = self.root() {
            self.write_element(&mut writer, root)?;
        }

        Ok(String::from_utf8(writer.into_inner())?)
    }

    fn write_element(&self, writer: &mut Writer<Vec<u8>>, id: NodeId) -> Result<(), RenderError> {
        let element = self.element(id);

        let mut start = BytesStart::new(element.name.as_str());
        for (key, value) in &element.attributes {
            start.push_attribute((key.as_str(), value.as_str()));
        }

        if element.is_empty() {
            return writer.write_event(Event::Empty(start)).map_err(render_error);
        }

        writer.write_event(Event::Start(start)).map_err(render_error)?;
        if !element.text.is_empty() {
            writer
                .write_event(Event::Text(BytesText::new(&element.text)))
                .map_err(render_error)?;
        }
        for child in &element.children {
            self.write_element(writer, *child)?;
        }
        writer
            .write_event(Event::End(BytesEnd::new(element.name.as_str())))
            .map_err(render_error)
    }
}

// -----------------------------------------------------------------------------
// Tests
