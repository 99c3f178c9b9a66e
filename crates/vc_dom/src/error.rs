use thiserror::Error;

// -----------------------------------------------------------------------------
// ParseError

/// Text could not be turned into a document.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParseError {
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed XML at byte {position}: {message}")]
    Xml { position: u64, message: String },

    #[error("XML text is not valid UTF-8")]
    Utf8(#[from] core::str::Utf8Error),

    #[error("XML input has no root element")]
    MissingRoot,

    #[error("document exceeds the maximum number of nodes")]
    TooLarge,
}

// -----------------------------------------------------------------------------
// RenderError

/// A document could not be rendered to text.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RenderError {
    #[error("failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to render XML: {0}")]
    Xml(String),

    #[error("rendered text is not valid UTF-8")]
    Utf8(#[from] alloc::string::FromUtf8Error),
}
