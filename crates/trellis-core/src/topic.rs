//! The normalized topic tree.
//!
//! [`Topic`] is the single in-memory representation both source encodings
//! normalize into. Ownership is strictly tree-shaped: every child and callout
//! is owned by exactly one parent, so the layout engine can mutate geometry in
//! place with plain `&mut` traversal and no reference counting.
//!
//! Geometry starts unset and is populated by the layout pass; the exporter
//! treats a missing geometry as an internal invariant violation.

use crate::geometry::Rect;

/// A node in the mind-map hierarchy.
///
/// Child order is insertion order and is preserved through layout and
/// generation: it determines the top-to-bottom visual order of sibling
/// subtrees.
#[derive(Debug, Clone, PartialEq)]
pub struct Topic {
    title: String,
    children: Vec<Topic>,
    callouts: Vec<Annotation>,
    geometry: Option<Rect>,
    subtree_height: f32,
}

impl Topic {
    /// Creates a leaf topic with the given title.
    ///
    /// The title may be empty; it is carried through to the generated
    /// document unchanged.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            children: Vec::new(),
            callouts: Vec::new(),
            geometry: None,
            subtree_height: 0.0,
        }
    }

    /// Appends a child topic, preserving insertion order.
    pub fn add_child(&mut self, child: Topic) {
        self.children.push(child);
    }

    /// Appends a callout annotation.
    pub fn add_callout(&mut self, callout: Annotation) {
        self.callouts.push(callout);
    }

    /// Builder-style variant of [`add_child`](Self::add_child) for tests and
    /// programmatic tree construction.
    pub fn with_child(mut self, child: Topic) -> Self {
        self.children.push(child);
        self
    }

    /// Builder-style variant of [`add_callout`](Self::add_callout).
    pub fn with_callout(mut self, callout: Annotation) -> Self {
        self.callouts.push(callout);
        self
    }

    /// Returns the topic's title text.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Replaces the topic's title text.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Returns the child topics in visual order.
    pub fn children(&self) -> &[Topic] {
        &self.children
    }

    /// Returns mutable access to the child topics for the layout pass.
    pub fn children_mut(&mut self) -> &mut [Topic] {
        &mut self.children
    }

    /// Returns the callout annotations in insertion order.
    pub fn callouts(&self) -> &[Annotation] {
        &self.callouts
    }

    /// Returns mutable access to the callouts for the layout pass.
    pub fn callouts_mut(&mut self) -> &mut [Annotation] {
        &mut self.callouts
    }

    /// Returns the assigned geometry, or `None` before layout has run.
    pub fn geometry(&self) -> Option<Rect> {
        self.geometry
    }

    /// Assigns the topic's absolute geometry.
    pub fn set_geometry(&mut self, geometry: Rect) {
        self.geometry = Some(geometry);
    }

    /// Returns the vertical space this topic and all descendants require.
    ///
    /// Zero until the layout engine's measuring pass has run.
    pub fn subtree_height(&self) -> f32 {
        self.subtree_height
    }

    /// Records the measured subtree height.
    pub fn set_subtree_height(&mut self, height: f32) {
        self.subtree_height = height;
    }

    /// Counts this topic and all descendant topics (callouts excluded).
    pub fn node_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(Topic::node_count)
            .sum::<usize>()
    }
}

/// A note attached to exactly one topic.
///
/// Annotations are owned by their parent topic and are never shared or
/// positioned independently of it.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    text: String,
    geometry: Option<Rect>,
}

impl Annotation {
    /// Creates an annotation with the given text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            geometry: None,
        }
    }

    /// Returns the annotation text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the assigned geometry, or `None` before layout has run.
    pub fn geometry(&self) -> Option<Rect> {
        self.geometry
    }

    /// Assigns the annotation's absolute geometry.
    pub fn set_geometry(&mut self, geometry: Rect) {
        self.geometry = Some(geometry);
    }
}
