use alloc::string::String;

use vc_dom::json::{JsonNode, JsonNumber};

use crate::{ScalarMut, ScalarView};

/// Fills `value` from a scalar node.
///
/// Integers narrow into any integer field they fit, floats only read into
/// float fields. Containers and `null` never match.
pub(super) fn read(node: &JsonNode, value: &mut ScalarMut<'_>) -> bool {
    match node {
        JsonNode::Bool(v) => value.assign_bool(*v),
        JsonNode::Number(JsonNumber::Signed(v)) => value.assign_signed(*v),
        JsonNode::Number(JsonNumber::Unsigned(v)) => value.assign_unsigned(*v),
        JsonNode::Number(JsonNumber::Float(v)) => value.assign_float(*v),
        JsonNode::String(v) => value.assign_str(v),
        JsonNode::Null | JsonNode::Array(_) | JsonNode::Object(_) => false,
    }
}

pub(super) fn write(value: ScalarView<'_>) -> JsonNode {
    match value {
        ScalarView::Bool(v) => JsonNode::Bool(v),
        ScalarView::Signed(v) => JsonNode::Number(JsonNumber::Signed(v)),
        ScalarView::Unsigned(v) => JsonNode::Number(JsonNumber::Unsigned(v)),
        ScalarView::F32(v) => JsonNode::Number(JsonNumber::Float(f64::from(v))),
        ScalarView::F64(v) => JsonNode::Number(JsonNumber::Float(v)),
        ScalarView::Str(v) => JsonNode::String(String::from(v)),
    }
}

#[cfg(test)]
mod tests {
    use vc_dom::json::{JsonNode, JsonNumber};

    use super::{read, write};
    use crate::{ScalarMut, ScalarView};

    #[test]
    fn float_fields_reject_integers() {
        let mut f = 2.5_f64;
        assert!(!read(&JsonNode::from(3_u64), &mut ScalarMut::from(&mut f)));
        assert_eq!(f, 2.5);
        assert!(read(&JsonNode::from(3.0), &mut ScalarMut::from(&mut f)));
        assert_eq!(f, 3.0);
    }

    #[test]
    fn null_matches_nothing() {
        let mut s = alloc::string::String::from("x");
        assert!(!read(&JsonNode::Null, &mut ScalarMut::from(&mut s)));
        assert!(!read(&JsonNode::array(), &mut ScalarMut::from(&mut s)));
        assert_eq!(s, "x");
    }

    #[test]
    fn signedness_is_kept() {
        assert_eq!(write(ScalarView::Signed(1)), JsonNode::Number(JsonNumber::Signed(1)));
        assert_eq!(write(ScalarView::Unsigned(1)), JsonNode::Number(JsonNumber::Unsigned(1)));
        assert_eq!(write(ScalarView::F32(0.5)), JsonNode::Number(JsonNumber::Float(0.5)));
    }
}
