//! Container handling: open the zip archive and locate the content entry.
//!
//! The encoding decision happens exactly once, here, and is carried as a
//! tagged [`SourceEncoding`] value; tree building never inspects formats at
//! runtime.

use std::io::{Read, Seek};

use log::debug;
use zip::ZipArchive;
use zip::result::ZipError;

use crate::error::ParseError;

/// Entry name of the structured (JSON) content encoding. Tried first.
pub(crate) const STRUCTURED_ENTRY: &str = "content.json";

/// Entry name of the markup (XML) content encoding. Fallback.
pub(crate) const MARKUP_ENTRY: &str = "content.xml";

/// The content entry found in a container, tagged with its encoding.
pub(crate) enum SourceEncoding {
    Structured(Vec<u8>),
    Markup(Vec<u8>),
}

/// Opens the archive and extracts the content entry.
///
/// The archive handle lives only inside this function; it is dropped on
/// every return path, so the container is never held past parsing.
pub(crate) fn open<R: Read + Seek>(reader: R) -> Result<SourceEncoding, ParseError> {
    let mut archive = ZipArchive::new(reader)?;

    if let Some(bytes) = read_entry(&mut archive, STRUCTURED_ENTRY)? {
        return Ok(SourceEncoding::Structured(bytes));
    }

    debug!(entry = STRUCTURED_ENTRY; "Structured entry absent, trying markup");
    if let Some(bytes) = read_entry(&mut archive, MARKUP_ENTRY)? {
        return Ok(SourceEncoding::Markup(bytes));
    }

    Err(ParseError::NoContentEntry)
}

/// Reads a named entry fully into memory, or `None` if the entry is absent.
fn read_entry<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Result<Option<Vec<u8>>, ParseError> {
    match archive.by_name(name) {
        Ok(mut entry) => {
            let mut bytes = Vec::with_capacity(entry.size() as usize);
            entry.read_to_end(&mut bytes)?;
            Ok(Some(bytes))
        }
        Err(ZipError::FileNotFound) => Ok(None),
        Err(err) => Err(err.into()),
    }
}
