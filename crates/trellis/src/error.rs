//! Error types for Trellis operations.
//!
//! This module provides the main error type [`TrellisError`] which attributes
//! a conversion failure to its pipeline stage. Every variant is a terminal
//! failure for the single file being processed; the caller decides whether a
//! batch continues.

use std::io;

use thiserror::Error;

use trellis_parser::ParseError;

use crate::export::GenerationError;
use crate::layout::LayoutError;

/// The main error type for Trellis operations.
#[derive(Debug, Error)]
pub enum TrellisError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
}

impl TrellisError {
    /// Short name of the pipeline stage that failed, for logs and reports.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Parse(_) => "parse",
            Self::Layout(_) => "layout",
            Self::Generation(_) => "generation",
        }
    }
}
