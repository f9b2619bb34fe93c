//! Application configuration: layout tunables and style mapping.
//!
//! All spacing constants, shape sizes, and colors live here as explicit
//! configuration values threaded through the layout engine and exporter.
//! Nothing in the pipeline reads module-level constants, so tests can run
//! with alternate configurations and deployments can tune spacing from a
//! TOML file.

use serde::Deserialize;

use trellis_core::geometry::{Point, Size};

/// Application configuration loaded from a TOML file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section
    #[serde(default)]
    pub layout: LayoutConfig,

    /// Style configuration section
    #[serde(default)]
    pub style: StyleConfig,
}

/// Spacing and sizing tunables for the layout engine.
///
/// Defaults reproduce the conventional mind-map rendering: topics step
/// 250 units right per level, every topic band is at least 120 units tall,
/// and callouts stack upward from 80 units above their topic.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Top-left corner of the root topic's band
    pub origin: Point,

    /// Horizontal distance between a topic's column and its children's column
    pub level_offset: f32,

    /// Minimum vertical band allocated to any topic subtree
    pub min_band_height: f32,

    /// Extra vertical space between sibling subtree bands
    pub sibling_gap: f32,

    /// Fixed size of every topic shape
    pub topic_size: Size,

    /// Fixed size of every callout shape
    pub callout_size: Size,

    /// Horizontal shift of a callout relative to its topic's left edge
    pub callout_offset_x: f32,

    /// Vertical distance from a topic's top edge up to its first callout
    pub callout_offset_y: f32,

    /// Vertical step between stacked callouts on the same topic
    pub callout_spacing: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            origin: Point::new(40.0, 40.0),
            level_offset: 250.0,
            min_band_height: 120.0,
            sibling_gap: 0.0,
            topic_size: Size::new(120.0, 60.0),
            callout_size: Size::new(200.0, 60.0),
            callout_offset_x: -50.0,
            callout_offset_y: 80.0,
            callout_spacing: 70.0,
        }
    }
}

impl LayoutConfig {
    /// Vertical space reserved at the top of a topic's band for its callouts.
    ///
    /// Each callout reserves twice its stacking step: the band grows enough
    /// that the centered topic leaves the whole callout stack inside its own
    /// band, keeping callouts clear of neighbouring sibling bands.
    pub fn callout_allocation(&self, count: usize) -> f32 {
        2.0 * count as f32 * self.callout_spacing
    }
}

/// Colors and style strings for generated cells.
///
/// Every topic shares one fill/stroke pair regardless of what the source
/// document styled it with; only font size and weight vary with depth.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Fill color for topic shapes
    pub topic_fill: String,

    /// Stroke color for topic shapes and topic connectors
    pub topic_stroke: String,

    /// Fill color for callout note shapes
    pub callout_fill: String,

    /// Stroke color for callout note shapes and their connectors
    pub callout_stroke: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            topic_fill: "#dae8fc".to_string(),
            topic_stroke: "#6c8ebf".to_string(),
            callout_fill: "#fff2cc".to_string(),
            callout_stroke: "#d6b656".to_string(),
        }
    }
}

impl StyleConfig {
    /// Style string for a topic shape at the given depth (root is depth 0).
    pub fn topic_style(&self, depth: usize) -> String {
        let (font_size, font_style) = match depth {
            0 => (14, "fontStyle=1;"),
            1 => (12, ""),
            _ => (11, ""),
        };
        format!(
            "rounded=1;whiteSpace=wrap;html=1;fillColor={};strokeColor={};{}fontSize={};",
            self.topic_fill, self.topic_stroke, font_style, font_size
        )
    }

    /// Style string for a callout note shape.
    pub fn callout_style(&self) -> String {
        format!(
            "shape=note;whiteSpace=wrap;html=1;fillColor={};strokeColor={};\
             fontSize=9;align=left;verticalAlign=top;spacing=8;spacingLeft=12;\
             spacingRight=12;spacingTop=8;backgroundOutline=1;size=12;",
            self.callout_fill, self.callout_stroke
        )
    }

    /// Style string for a parent-to-child topic connector.
    ///
    /// The entity-relation edge style routes around shape bounding boxes, so
    /// connectors avoid shapes without any waypoint computation here.
    pub fn topic_connector_style(&self) -> String {
        format!(
            "edgeStyle=entityRelationEdgeStyle;rounded=1;orthogonalLoop=1;\
             jettySize=auto;html=1;curved=1;strokeColor={};strokeWidth=1;",
            self.topic_stroke
        )
    }

    /// Style string for a topic-to-callout connector.
    pub fn callout_connector_style(&self) -> String {
        format!(
            "edgeStyle=none;rounded=1;orthogonalLoop=1;jettySize=auto;html=1;\
             dashed=1;strokeColor={};strokeWidth=1;",
            self.callout_stroke
        )
    }
}
