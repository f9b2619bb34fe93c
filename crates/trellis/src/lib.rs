//! Trellis - converts hierarchical mind-map documents into diagram documents
//! with automatically computed, non-overlapping geometry.
//!
//! # Pipeline
//!
//! ```text
//! Mind-map container (zip)
//!     ↓ parse
//! Topic tree
//!     ↓ layout
//! Topic tree + geometry
//!     ↓ generate
//! Diagram document (mxGraph XML)
//! ```
//!
//! Each stage is independent: parsing never positions anything, layout never
//! reads or writes documents, and generation never touches the filesystem.
//! One [`Converter`] processes one file at a time with no shared state, so
//! callers are free to run conversions for different files independently.

pub mod config;
pub mod export;
pub mod layout;

mod error;

pub use trellis_core::{geometry, topic};
pub use trellis_parser::ParseError;

pub use error::TrellisError;
pub use export::GenerationError;
pub use layout::LayoutError;

use std::io::{Read, Seek};

use log::{debug, info};

use config::AppConfig;
use export::Exporter;
use export::drawio::DrawioExporter;
use geometry::Point;
use topic::Topic;

/// Converter for processing mind-map containers through parsing, layout,
/// and generation.
///
/// # Examples
///
/// ```rust,no_run
/// use std::fs::File;
///
/// use trellis::{Converter, config::AppConfig};
///
/// fn main() -> Result<(), trellis::TrellisError> {
///     let converter = Converter::new(AppConfig::default());
///
///     // All stages at once...
///     let document = converter.convert(File::open("map.xmind")?)?;
///
///     // ...or stage by stage.
///     let mut root = converter.parse(File::open("map.xmind")?)?;
///     converter.layout(&mut root)?;
///     let document = converter.generate(&root)?;
///     println!("{document}");
///     Ok(())
/// }
/// ```
#[derive(Debug, Default)]
pub struct Converter {
    config: AppConfig,
}

impl Converter {
    /// Creates a converter with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration this converter runs with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a mind-map container into a normalized topic tree.
    ///
    /// # Errors
    ///
    /// Returns `TrellisError::Parse` if the container cannot be opened,
    /// holds no content entry, or the entry is malformed.
    pub fn parse<R: Read + Seek>(&self, reader: R) -> Result<Topic, TrellisError> {
        info!("Parsing mind-map container");
        let root = trellis_parser::parse(reader)?;
        debug!(root_title = root.title(); "Container parsed");
        Ok(root)
    }

    /// Assign geometry to every topic and callout in the tree, using the
    /// configured origin.
    ///
    /// # Errors
    ///
    /// Returns `TrellisError::Layout` on a geometry invariant violation.
    pub fn layout(&self, root: &mut Topic) -> Result<(), TrellisError> {
        self.layout_at(root, self.config.layout.origin)
    }

    /// Assign geometry with an explicit origin, overriding the configured
    /// one.
    ///
    /// # Errors
    ///
    /// Returns `TrellisError::Layout` on a geometry invariant violation.
    pub fn layout_at(&self, root: &mut Topic, origin: Point) -> Result<(), TrellisError> {
        info!(topics = root.node_count(); "Calculating layout");
        layout::layout(root, origin, &self.config.layout)?;
        debug!(height = root.subtree_height(); "Layout calculated");
        Ok(())
    }

    /// Generate the diagram document for a laid-out tree.
    ///
    /// # Errors
    ///
    /// Returns `TrellisError::Generation` if a node is missing geometry,
    /// an internal invariant violation rather than a property of the input.
    pub fn generate(&self, root: &Topic) -> Result<String, TrellisError> {
        info!("Generating diagram document");
        let document = DrawioExporter::new(&self.config).export(root)?;
        debug!(bytes = document.len(); "Document generated");
        Ok(document)
    }

    /// Run the full pipeline on one container.
    ///
    /// # Errors
    ///
    /// Returns the first stage error encountered; no partial document is
    /// produced on failure.
    pub fn convert<R: Read + Seek>(&self, reader: R) -> Result<String, TrellisError> {
        let mut root = self.parse(reader)?;
        self.layout(&mut root)?;
        self.generate(&root)
    }
}
