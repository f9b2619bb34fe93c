//! Geometric primitives for diagram layout.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in diagram space
//! - [`Size`] - Width and height dimensions
//! - [`Rect`] - An axis-aligned rectangle given by its top-left corner and size
//!
//! # Coordinate System
//!
//! Trellis uses the coordinate system of the output diagram format:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! - **Origin**: Top-left corner at `(0, 0)`
//! - **X-axis**: Increases rightward
//! - **Y-axis**: Increases downward
//!
//! All types deserialize from configuration files, so layout tunables such as
//! shape sizes and the diagram origin can be overridden without code changes.

use serde::Deserialize;

/// A 2D point in diagram coordinate space.
///
/// # Examples
///
/// ```
/// # use trellis_core::geometry::Point;
/// let origin = Point::new(40.0, 40.0);
/// assert_eq!(origin.x(), 40.0);
/// assert_eq!(origin.y(), 40.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Returns a new point offset by the given deltas
    pub fn translate(self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Width and height dimensions of a shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    /// Creates a new size with the specified dimensions
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height
    pub fn height(self) -> f32 {
        self.height
    }
}

/// An axis-aligned rectangle defined by its top-left corner and size.
///
/// This is the geometry the layout engine assigns to every topic and callout:
/// `x`/`y` name the top-left corner, matching the output format's geometry
/// attributes.
///
/// # Examples
///
/// ```
/// # use trellis_core::geometry::Rect;
/// let rect = Rect::new(10.0, 20.0, 120.0, 60.0);
/// assert_eq!(rect.right(), 130.0);
/// assert_eq!(rect.bottom(), 80.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct Rect {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

impl Rect {
    /// Creates a new rectangle from its top-left corner and dimensions
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns the x-coordinate of the left edge
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the top edge
    pub fn y(self) -> f32 {
        self.y
    }

    /// Returns the width
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns the x-coordinate of the right edge
    pub fn right(self) -> f32 {
        self.x + self.width
    }

    /// Returns the y-coordinate of the bottom edge
    pub fn bottom(self) -> f32 {
        self.y + self.height
    }

    /// Returns the y-coordinate of the vertical center
    pub fn center_y(self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Checks whether the vertical spans of two rectangles intersect.
    ///
    /// Rectangles that merely touch (one's bottom edge equals the other's top
    /// edge) do not count as overlapping.
    pub fn overlaps_vertically(self, other: Rect) -> bool {
        self.y < other.bottom() && other.y < self.bottom()
    }

    /// Checks whether two rectangles intersect in both axes.
    pub fn overlaps(self, other: Rect) -> bool {
        self.overlaps_vertically(other) && self.x < other.right() && other.x < self.right()
    }
}
