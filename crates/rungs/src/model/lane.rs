//! Lanes: one rung of the ladder with its header and rails.
//!
//! ```text
//!   ┌────────┬──────────────────────────────────────────┐
//!   │        │                                          │
//!   │ header ├──[ A ]──[ B ]───────────────[ C ]──[ D ]─┤
//!   │        │ left                               right │
//!   │        │ rail                                rail │
//!   └────────┴──────────────────────────────────────────┘
//!             ^ content placeholder
//! ```

use rungs_core::{
    geometry::{Bounds, Point, Size},
    identifier::Id,
};

use super::Node;

/// Lane header measurements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Header {
    label: String,
    content_width: f32,
    text_width: f32,
    width: f32,
    height: f32,
    text_slot_width: Option<f32>,
}

impl Header {
    /// Creates a header with its measured content and label text widths.
    pub fn new(label: impl Into<String>, content_width: f32, text_width: f32) -> Self {
        Self {
            label: label.into(),
            content_width,
            text_width,
            ..Self::default()
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Measured width of the header's own content.
    pub fn content_width(&self) -> f32 {
        self.content_width
    }

    /// Measured width of the header's label text.
    pub fn text_width(&self) -> f32 {
        self.text_width
    }

    /// Width assigned by the pool layout.
    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Width reserved for label text so labels line up across lanes.
    pub fn text_slot_width(&self) -> Option<f32> {
        self.text_slot_width
    }

    pub(crate) fn set_width(&mut self, width: f32) {
        self.width = width;
    }

    pub(crate) fn set_height(&mut self, height: f32) {
        self.height = height;
    }

    pub(crate) fn set_text_slot_width(&mut self, width: f32) {
        self.text_slot_width = Some(width);
    }
}

/// A horizontal connector from a content edge to the nearest node port.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rail {
    /// Distance from the top of the content area
    pub offset_y: f32,
    /// Horizontal length of the connector
    pub width: f32,
}

impl Rail {
    pub fn new(offset_y: f32, width: f32) -> Self {
        Self { offset_y, width }
    }
}

/// The left (power) rail and right (neutral) rail of a lane.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rails {
    pub left: Rail,
    pub right: Rail,
}

/// One rung of the ladder.
#[derive(Debug, Clone, PartialEq)]
pub struct Lane {
    id: Id,
    nodes: Vec<Node>,
    content: Option<Bounds>,
    header: Header,
    rails: Rails,
    expanded: bool,
    diagnostics: usize,
    location: Option<Point>,
    is_end: bool,
}

impl Lane {
    /// Creates an expanded, empty lane whose content placeholder sits at the
    /// origin.
    pub fn new(id: Id) -> Self {
        Self {
            id,
            nodes: Vec::new(),
            content: Some(Bounds::default()),
            header: Header::default(),
            rails: Rails::default(),
            expanded: true,
            diagnostics: 0,
            location: None,
            is_end: false,
        }
    }

    pub fn with_node(mut self, node: Node) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn with_nodes(mut self, nodes: impl IntoIterator<Item = Node>) -> Self {
        self.nodes.extend(nodes);
        self
    }

    pub fn with_header(mut self, header: Header) -> Self {
        self.header = header;
        self
    }

    pub fn with_expanded(mut self, expanded: bool) -> Self {
        self.expanded = expanded;
        self
    }

    pub fn with_diagnostics(mut self, diagnostics: usize) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn with_location(mut self, location: Point) -> Self {
        self.location = Some(location);
        self
    }

    /// Marks this lane as the end lane, which takes no part in header width
    /// normalisation.
    pub fn with_end(mut self, is_end: bool) -> Self {
        self.is_end = is_end;
        self
    }

    /// Removes the content placeholder, as if it had not been resolved.
    pub fn without_content(mut self) -> Self {
        self.content = None;
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    /// Nodes in chain order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut Vec<Node> {
        &mut self.nodes
    }

    /// Bounds of the content placeholder, if it exists.
    pub fn content(&self) -> Option<Bounds> {
        self.content
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn rails(&self) -> &Rails {
        &self.rails
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn diagnostics(&self) -> usize {
        self.diagnostics
    }

    /// Last known position, used to order lanes.
    pub fn location(&self) -> Option<Point> {
        self.location
    }

    pub fn is_end(&self) -> bool {
        self.is_end
    }

    /// Header bounds, directly left of the content area.
    pub fn header_bounds(&self) -> Option<Bounds> {
        self.content.map(|content| {
            Bounds::new_from_top_left(
                Point::new(content.min_x() - self.header.width, content.min_y()),
                Size::new(self.header.width, self.header.height),
            )
        })
    }

    /// Bounds of the header and content area together.
    pub fn bounds(&self) -> Option<Bounds> {
        let content = self.content?;
        let header = self.header_bounds()?;
        Some(header.merge(&content))
    }

    /// Moves the lane, its content and its nodes by `offset`.
    pub fn translate(&mut self, offset: Point) {
        self.content = self.content.map(|content| content.translate(offset));
        for node in &mut self.nodes {
            let moved = node.position().add_point(offset);
            node.move_to(moved);
        }
    }

    pub(crate) fn header_mut(&mut self) -> &mut Header {
        &mut self.header
    }

    pub(crate) fn set_content(&mut self, content: Bounds) {
        self.content = Some(content);
    }

    pub(crate) fn set_location(&mut self, location: Point) {
        self.location = Some(location);
    }

    /// Node list and content placeholder, borrowed together for layout.
    pub(crate) fn layout_parts(&mut self) -> (&mut [Node], Option<Bounds>, &mut Rails) {
        (self.nodes.as_mut_slice(), self.content, &mut self.rails)
    }
}
