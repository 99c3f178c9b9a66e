// -----------------------------------------------------------------------------
// Layout

/// Whitespace policy used when a document is rendered to text.
///
/// The layout only changes whitespace, parsing the rendered text back
/// yields the same tree for every layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layout {
    /// Everything on a single line.
    Compact,
    /// One node per line, nested nodes indented by `indent` spaces.
    Pretty { indent: usize },
}

impl Layout {
    /// Four-space pretty printing.
    pub const DEFAULT: Self = Self::Pretty { indent: 4 };
}

impl Default for Layout {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}
