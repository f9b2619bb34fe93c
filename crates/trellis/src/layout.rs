//! Layout engine: turns a topic tree into non-overlapping absolute geometry.
//!
//! # Pipeline Position
//!
//! ```text
//! Topic tree (parsed)
//!     ↓ layout (this module)
//! Topic tree + geometry
//!     ↓ export
//! Diagram document
//! ```
//!
//! The engine runs two recursive passes over the tree:
//!
//! 1. **Measure** (bottom-up) - computes every node's subtree height: the
//!    vertical band the node and all its descendants need. No positions are
//!    assigned.
//! 2. **Place** (top-down) - walks each node's allocated band, centers the
//!    node vertically inside it, stacks callouts above the node, and
//!    partitions the band among the children proportionally to their own
//!    subtree heights, in child order.
//!
//! Invariants after a successful run:
//!
//! - Every topic and callout has geometry.
//! - Sibling subtree bands are disjoint, so no two shapes overlap.
//! - Horizontal position grows by a fixed offset per level; vertical
//!   position is fully determined by the band walk. The result is a pure
//!   function of the tree, the origin, and the configuration.

use log::debug;
use thiserror::Error;

use trellis_core::geometry::{Point, Rect};
use trellis_core::topic::Topic;

use crate::config::LayoutConfig;

/// Errors detected while assigning geometry.
///
/// A well-formed tree laid out with a sane configuration cannot fail; these
/// guard against corrupted intermediate trees and pathological configs.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("computed band height is negative ({height})")]
    NegativeBand { height: f32 },

    #[error("placement visited more nodes than were measured; tree is corrupted")]
    CycleDetected,
}

/// Assigns geometry to every topic and callout in the tree.
///
/// `origin` is the top-left corner of the root's band: all geometry lies
/// right of `origin.x()` and below `origin.y()`.
///
/// # Errors
///
/// Returns [`LayoutError`] if a band height goes negative (pathological
/// spacing configuration) or placement walks more nodes than measuring
/// counted.
pub fn layout(root: &mut Topic, origin: Point, config: &LayoutConfig) -> Result<(), LayoutError> {
    Engine::new(config).run(root, origin)
}

/// The two-pass layout engine. Holds the spacing configuration; all state
/// that varies per run lives on the call stack.
pub struct Engine<'a> {
    config: &'a LayoutConfig,
}

impl<'a> Engine<'a> {
    /// Creates an engine over the given configuration.
    pub fn new(config: &'a LayoutConfig) -> Self {
        Self { config }
    }

    /// Runs both passes over the tree.
    pub fn run(&self, root: &mut Topic, origin: Point) -> Result<(), LayoutError> {
        let measured = self.measure(root);
        debug!(nodes = measured, height = root.subtree_height(); "Measured topic tree");

        // Placement must visit exactly the measured nodes; running out of
        // budget means the tree changed shape between passes.
        let mut budget = measured;
        let height = root.subtree_height();
        self.place(root, origin.x(), origin.y(), height, &mut budget)
    }

    /// Pass 1: computes subtree heights bottom-up. Returns the node count,
    /// which pass 2 uses as its traversal budget.
    fn measure(&self, node: &mut Topic) -> usize {
        let mut count = 1;
        let mut children_extent = 0.0;
        for child in node.children_mut() {
            count += self.measure(child);
            children_extent += child.subtree_height();
        }

        let child_count = node.children().len();
        if child_count > 1 {
            children_extent += self.config.sibling_gap * (child_count as f32 - 1.0);
        }

        let callout_allocation = self.config.callout_allocation(node.callouts().len());
        let height = children_extent.max(self.config.min_band_height) + callout_allocation;
        node.set_subtree_height(height);
        count
    }

    /// Pass 2: assigns absolute geometry top-down within the given band.
    fn place(
        &self,
        node: &mut Topic,
        x: f32,
        band_top: f32,
        band_height: f32,
        budget: &mut usize,
    ) -> Result<(), LayoutError> {
        if band_height < 0.0 {
            return Err(LayoutError::NegativeBand {
                height: band_height,
            });
        }
        if *budget == 0 {
            return Err(LayoutError::CycleDetected);
        }
        *budget -= 1;

        let topic_size = self.config.topic_size;
        let y = band_top + (band_height - topic_size.height()) / 2.0;
        node.set_geometry(Rect::new(x, y, topic_size.width(), topic_size.height()));

        // Callouts stack upward from a fixed offset above the topic. Their
        // band share was reserved during measuring, so the stack stays inside
        // this node's band.
        let callout_size = self.config.callout_size;
        let callout_x = x + self.config.callout_offset_x;
        for (index, callout) in node.callouts_mut().iter_mut().enumerate() {
            let callout_y =
                y - self.config.callout_offset_y - index as f32 * self.config.callout_spacing;
            callout.set_geometry(Rect::new(
                callout_x,
                callout_y,
                callout_size.width(),
                callout_size.height(),
            ));
        }

        let children_total: f32 = node.children().iter().map(Topic::subtree_height).sum();
        if children_total <= 0.0 {
            return Ok(());
        }

        // Children partition the band below the callout allocation, each
        // share proportional to the child's own subtree height. Surplus from
        // the minimum-band clamp spreads proportionally as well; a single
        // child takes the whole region.
        let child_count = node.children().len();
        let gaps = if child_count > 1 {
            self.config.sibling_gap * (child_count as f32 - 1.0)
        } else {
            0.0
        };
        let callout_allocation = self.config.callout_allocation(node.callouts().len());
        let available = band_height - callout_allocation - gaps;
        let scale = available / children_total;

        let child_x = x + self.config.level_offset;
        let mut cursor = band_top + callout_allocation;
        for child in node.children_mut() {
            let child_band = child.subtree_height() * scale;
            self.place(child, child_x, cursor, child_band, budget)?;
            cursor += child_band + self.config.sibling_gap;
        }
        Ok(())
    }
}
