use thiserror::Error;
use vc_dom::{ParseError, RenderError};

// -----------------------------------------------------------------------------
// ArchiveError

/// Failure to construct an input archive or to render an output archive.
///
/// Traversal itself never produces this error, it reports absence and
/// mismatches through `false` and null cursors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ArchiveError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Render(#[from] RenderError),
}
