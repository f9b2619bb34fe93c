//! Adapter presenting [`TrellisError`] through miette's `Diagnostic` trait.
//!
//! The library's errors are plain `thiserror` enums; this wrapper adds the
//! error code and help text miette's graphical report handler renders in the
//! terminal.

use std::error::Error;
use std::fmt;

use miette::Diagnostic;

use trellis::TrellisError;

/// Wraps a [`TrellisError`] for rich terminal reporting.
pub struct ErrorReport(pub TrellisError);

impl fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl Error for ErrorReport {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.0.source()
    }
}

impl Diagnostic for ErrorReport {
    fn code(&self) -> Option<Box<dyn fmt::Display + '_>> {
        Some(Box::new(format!("trellis::{}", self.0.stage())))
    }

    fn help(&self) -> Option<Box<dyn fmt::Display + '_>> {
        let help = match &self.0 {
            TrellisError::Io(_) => "check file permissions and that the paths exist",
            TrellisError::Parse(_) => {
                "check that the input is a mind-map container with a content.json or content.xml entry"
            }
            TrellisError::Layout(_) => {
                "check the [layout] section of the configuration for negative spacing values"
            }
            TrellisError::Generation(_) => {
                "this is a bug in the conversion pipeline; please report it"
            }
        };
        Some(Box::new(help))
    }
}
