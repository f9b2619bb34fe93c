//! Export functionality for laid-out topic trees.
//!
//! # Pipeline Position
//!
//! ```text
//! Topic tree + geometry
//!     ↓ export (this module)
//! Diagram document text
//! ```
//!
//! # Available Backends
//!
//! - [`drawio`] — mxGraph XML output via [`drawio::DrawioExporter`]
//!
//! Backends are pure in-memory transforms: they return the finished document
//! as a string and perform no I/O, so a failed export never leaves a partial
//! document behind.

pub mod drawio;

use std::io;

use thiserror::Error;

use trellis_core::topic::Topic;

/// Abstraction for diagram export backends.
///
/// Implementors convert a geometry-annotated [`Topic`] tree into a specific
/// output document format.
pub trait Exporter {
    /// Exports a laid-out topic tree to the backend's document format.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] on an internal invariant violation, such
    /// as a node missing geometry. Input content alone can never fail an
    /// export.
    fn export(&mut self, root: &Topic) -> Result<String, GenerationError>;
}

/// Errors that can occur while emitting a document.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("shape \"{title}\" has no geometry; run layout before generation")]
    MissingGeometry { title: String },

    #[error("failed to write document: {0}")]
    Write(#[from] io::Error),
}
