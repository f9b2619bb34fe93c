//! # Trellis Parser
//!
//! Parser for mind-map containers. A container is a zip archive holding the
//! document content in one of two encodings: a structured JSON entry
//! (`content.json`, newer documents) or a markup XML entry (`content.xml`,
//! older documents). Both normalize into the same [`Topic`] tree, so
//! downstream stages never see which encoding was used.
//!
//! ## Usage
//!
//! ```no_run
//! use std::fs::File;
//!
//! fn main() -> Result<(), trellis_parser::ParseError> {
//!     let file = File::open("map.xmind")?;
//!     let root = trellis_parser::parse(file)?;
//!     println!("root topic: {}", root.title());
//!     Ok(())
//! }
//! ```

mod container;
mod error;
mod json;
mod xml;

pub use error::ParseError;

use std::io::{Read, Seek};

use log::{debug, info};

use trellis_core::topic::Topic;

use container::SourceEncoding;

/// Parse a mind-map container into a normalized topic tree.
///
/// This is the main entry point for ingestion. It performs two steps:
///
/// 1. **Detect** - Open the archive and locate the content entry, preferring
///    the structured encoding and falling back to markup
/// 2. **Decode** - Decode the entry according to its own grammar and
///    normalize it into a [`Topic`] tree
///
/// The archive handle is released before this function returns, on success
/// and on every failure path.
///
/// # Arguments
///
/// * `reader` - A seekable reader over the container bytes (a file handle or
///   an in-memory cursor)
///
/// # Errors
///
/// Returns [`ParseError`] if the container cannot be opened, holds neither
/// content entry, or the found entry is malformed.
pub fn parse<R: Read + Seek>(reader: R) -> Result<Topic, ParseError> {
    let root = match container::open(reader)? {
        SourceEncoding::Structured(bytes) => {
            debug!(entry = container::STRUCTURED_ENTRY, len = bytes.len(); "Decoding structured content");
            json::decode(&bytes)?
        }
        SourceEncoding::Markup(bytes) => {
            debug!(entry = container::MARKUP_ENTRY, len = bytes.len(); "Decoding markup content");
            xml::decode(&bytes)?
        }
    };

    info!(topics = root.node_count(); "Parsed topic tree");
    Ok(root)
}
