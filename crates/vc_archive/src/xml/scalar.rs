use alloc::string::ToString;

use vc_dom::NodeId;
use vc_dom::xml::XmlDocument;

use super::KIND_ATTRIBUTE;
use crate::{ScalarMut, ScalarView};

/// Parses the text of a leaf element into `value`.
///
/// Elements with children or a container tag are not scalars.
pub(super) fn read(document: &XmlDocument, node: NodeId, value: &mut ScalarMut<'_>) -> bool {
    let element = document.element(node);
    if !element.children.is_empty() || element.attribute(KIND_ATTRIBUTE).is_some() {
        return false;
    }
    value.assign_text(&element.text)
}

/// Makes the text form of `value` the only content of `node`.
pub(super) fn write(document: &mut XmlDocument, node: NodeId, value: ScalarView<'_>) {
    document.set_text(node, &value.to_string());
    document.remove_attribute(node, KIND_ATTRIBUTE);
}
