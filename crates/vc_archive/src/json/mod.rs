//! JSON backend.
//!
//! Containers map onto JSON arrays and objects. Integers are stored with
//! their signedness and floats as JSON floats, so a value only reads back
//! into a field of a compatible kind.

mod cursor;
mod input;
mod output;
mod scalar;

pub use cursor::{JsonInputCursor, JsonOutputCursor};
pub use input::JsonInputArchive;
pub use output::JsonOutputArchive;

pub use vc_dom::json::{JsonDocument, JsonNode, JsonNumber};
