//! # Trellis Core
//!
//! Core types shared across the Trellis conversion pipeline: geometric
//! primitives and the normalized topic tree that the parser produces, the
//! layout engine annotates, and the exporter reads.
//!
//! # Pipeline Position
//!
//! ```text
//! Mind-map container
//!     ↓ parse (trellis-parser)
//! Topic tree (this crate)
//!     ↓ layout (trellis)
//! Topic tree + geometry (this crate)
//!     ↓ export (trellis)
//! Diagram document
//! ```

pub mod geometry;
pub mod topic;
