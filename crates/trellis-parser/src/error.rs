//! Error types for container parsing.

use std::io;

use thiserror::Error;

/// Errors produced while reading a mind-map container.
///
/// Each variant attributes the failure to a specific step: opening the
/// archive, locating a content entry, or decoding the entry's grammar.
/// A parse failure is terminal for the file being processed; callers decide
/// whether to abort or continue with other files.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read container: {0}")]
    Container(#[from] zip::result::ZipError),

    #[error("I/O error while reading content entry: {0}")]
    Io(#[from] io::Error),

    #[error("container holds neither a structured nor a markup content entry")]
    NoContentEntry,

    #[error("malformed structured content: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed markup content: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("malformed attribute in markup content: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    #[error("content entry is not valid UTF-8: {0}")]
    Encoding(#[from] quick_xml::encoding::EncodingError),

    #[error("content entry has no root topic")]
    MissingRoot,
}
