//! Serpentine row layout of a single rung.
//!
//! Input nodes are packed left to right from the start of the rung. Output
//! nodes, and any input node that comes after the first wrap, are packed
//! right-aligned against the end of the rung. When a row is full it is
//! closed and the chain continues on the next row, so a long chain snakes
//! down the lane:
//!
//! ```text
//!   origin                                            right
//!   │[ A ][ B ]──────────────────────────────┐            │
//!   │                    ┌───────────────────┘            │
//!   │                    └─>[ C ][ D ][ E ]──┐   <- closed, │
//!   │                    ┌───────────────────┘  leaves room │
//!   │                    └─────────────────────>[ F ][ G ]│
//! ```
//!
//! Packing only needs node widths, so it runs first and produces a row
//! index per node. Vertical stacking then derives row heights from the
//! finished rows.

use std::collections::HashSet;

use log::{debug, trace, warn};

use rungs_core::{
    color::Color,
    geometry::{Bounds, Point, Size},
    identifier::Id,
};

use crate::{
    config::LayoutConfig,
    model::{Direction, Link, LinkSet, Node, Port, Rail, Rails},
};

/// Horizontal room kept free after a row so the link leaving it has space
/// for its chevrons.
pub const ARROW_ALLOWANCE: f32 = 32.0;

/// Result of laying out one rung.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowOutcome {
    /// Height of the rung's content area
    pub rung_height: f32,
    /// Number of rows the chain occupies
    pub rows: usize,
}

/// Packing state carried from one node to the next.
#[derive(Debug, Clone, Copy, PartialEq)]
struct RowCursor {
    /// Left edge of the current right-aligned row
    left_x: f32,
    /// Index of the current row
    row: usize,
    /// Whether the chain has left the first row
    has_wrapped: bool,
    /// Nodes in the current right-aligned row
    row_len: usize,
}

impl RowCursor {
    fn new(right: f32) -> Self {
        Self {
            left_x: right,
            row: 0,
            has_wrapped: false,
            row_len: 0,
        }
    }

    /// Cursor for a fresh right-aligned row after `self`.
    fn next_row(self, right: f32) -> Self {
        Self {
            left_x: right,
            row: self.row + 1,
            has_wrapped: true,
            row_len: 0,
        }
    }
}

/// Horizontal position and row of a node
#[derive(Debug, Clone, Copy, PartialEq)]
struct Slot {
    x: f32,
    row: usize,
}

/// Unmeasured sizes come through as NaN; they take no space.
fn measured(value: f32) -> f32 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

/// Lays out the node chain of a single rung.
///
/// # Examples
///
/// ```
/// # use rungs::{config::LayoutConfig, layout::RowLayout, model::{Direction, LinkSet, Node}};
/// # use rungs_core::{color::Color, geometry::{Point, Size}};
/// let mut nodes = vec![
///     Node::new("XIC_1".into(), Direction::In, Size::new(60.0, 40.0)),
///     Node::new("OTE_1".into(), Direction::Out, Size::new(60.0, 40.0)),
/// ];
/// let mut links = LinkSet::new();
///
/// let outcome = RowLayout::new(&LayoutConfig::default()).layout(
///     &mut nodes,
///     &mut links,
///     Point::new(0.0, 0.0),
///     600.0,
///     Color::default(),
/// );
///
/// assert_eq!(outcome.rows, 1);
/// assert_eq!(nodes[0].position().x(), 0.0);
/// assert_eq!(nodes[1].position().x(), 540.0);
/// assert_eq!(links.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RowLayout {
    spacing: Size,
    rung_separation: f32,
    min_rung_height: f32,
    rung_offset: f32,
    rail_width: f32,
}

impl RowLayout {
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            spacing: config.spacing(),
            rung_separation: config.rung_separation(),
            min_rung_height: config.min_rung_height(),
            rung_offset: config.rung_offset(),
            rail_width: config.rail_width(),
        }
    }

    /// Positions every node of the chain and rewrites the links between
    /// them.
    ///
    /// `origin` is the top-left of the packing area and `wrap_width` its
    /// width; nothing but an oversized single node crosses
    /// `origin.x + wrap_width`. Node order is never changed. Each node but
    /// the last ends up with exactly one outgoing link, colored `color`.
    pub fn layout(
        &self,
        nodes: &mut [Node],
        links: &mut LinkSet,
        origin: Point,
        wrap_width: f32,
        color: Color,
    ) -> RowOutcome {
        let right = origin.x() + wrap_width;
        let widths: Vec<f32> = nodes
            .iter()
            .map(|node| measured(node.size().width()))
            .collect();
        let in_count = nodes
            .iter()
            .rposition(|node| node.direction() == Direction::In)
            .map_or(0, |idx| idx + 1);

        let slots = self.pack(&widths, in_count, origin.x(), right);
        let rows = slots.last().map_or(0, |slot| slot.row + 1);
        let (tops, heights) = self.stack_rows(nodes, &slots, rows, origin.y());

        for (node, slot) in nodes.iter_mut().zip(&slots) {
            let position = Point::new(slot.x, tops[slot.row]);
            trace!(node:% = node.id(), x = position.x(), y = position.y(), row = slot.row; "Placed node");
            node.move_to(position);
        }

        self.link_chain(nodes, links, color);

        let content_height = match (tops.last(), heights.last()) {
            (Some(top), Some(height)) => top - origin.y() + height,
            _ => 0.0,
        };
        let rung_height = (content_height + self.rung_separation).max(self.min_rung_height);

        debug!(nodes = nodes.len(), rows, rung_height; "Rung laid out");
        RowOutcome { rung_height, rows }
    }

    /// Assigns every node an x position and a row from widths alone.
    fn pack(&self, widths: &[f32], in_count: usize, origin_x: f32, right: f32) -> Vec<Slot> {
        let mut slots = Vec::with_capacity(widths.len());
        let mut cursor = RowCursor::new(right);
        // Right edge of the input nodes on the first row
        let mut in_right = origin_x;
        // First slot of the current right-aligned row
        let mut row_start = 0;

        for (idx, &width) in widths.iter().enumerate() {
            if idx < in_count && !cursor.has_wrapped {
                slots.push(Slot {
                    x: in_right,
                    row: 0,
                });
                in_right += width;
                cursor = self.check_first_row(cursor, in_right, widths.get(idx + 1), right);
                row_start = slots.len();
                continue;
            }

            let edge = if cursor.has_wrapped {
                origin_x
            } else {
                in_right
            };
            if self.overflows(cursor, width, edge) {
                close_row(&mut slots[row_start..], &widths[row_start..idx], right);
                cursor = cursor.next_row(right);
                row_start = idx;
                debug!(row = cursor.row, node = idx; "Row wrapped");
            }
            cursor = push_right_aligned(&mut slots, row_start, cursor, width, right);
        }

        slots
    }

    /// Wrap test after an input node on the first row. `next` is the width
    /// of whatever node follows in the chain.
    fn check_first_row(
        &self,
        cursor: RowCursor,
        x: f32,
        next: Option<&f32>,
        right: f32,
    ) -> RowCursor {
        let next_width = next.copied().unwrap_or(0.0);
        if x + ARROW_ALLOWANCE + self.spacing.width() + next_width <= right {
            return cursor;
        }

        RowCursor {
            has_wrapped: true,
            row: if next.is_some() {
                cursor.row + 1
            } else {
                cursor.row
            },
            ..cursor
        }
    }

    /// Whether a node of `width` no longer fits left of the current
    /// right-aligned row. A node starting an empty row always fits.
    fn overflows(&self, cursor: RowCursor, width: f32, edge: f32) -> bool {
        cursor.row_len > 0
            && cursor.left_x - 2.0 * self.spacing.width() - width - ARROW_ALLOWANCE < edge
    }

    /// Sets each node's description spacing and returns the top and height
    /// of every row.
    fn stack_rows(
        &self,
        nodes: &mut [Node],
        slots: &[Slot],
        rows: usize,
        origin_y: f32,
    ) -> (Vec<f32>, Vec<f32>) {
        let mut descriptions = vec![0.0f32; rows];
        for (node, slot) in nodes.iter().zip(slots) {
            let description = measured(node.description_height());
            descriptions[slot.row] = descriptions[slot.row].max(description);
        }

        let mut heights = vec![0.0f32; rows];
        for (node, slot) in nodes.iter_mut().zip(slots) {
            let spacing = (descriptions[slot.row] - measured(node.description_height())).max(0.0);
            node.set_description_spacing(spacing);
            heights[slot.row] = heights[slot.row].max(measured(node.size().height()) + spacing);
        }

        let mut tops = Vec::with_capacity(rows);
        let mut y = origin_y;
        for height in &heights {
            tops.push(y);
            y += height + self.spacing.height();
        }

        (tops, heights)
    }

    /// Rewrites the links of the chain: one link from each node to the next.
    fn link_chain(&self, nodes: &[Node], links: &mut LinkSet, color: Color) {
        let ids: HashSet<Id> = nodes.iter().map(Node::id).collect();
        let dropped = links.retain(|link| ids.contains(&link.from()) == ids.contains(&link.to()));
        if dropped > 0 {
            debug!(dropped; "Dropped links leaving the rung");
        }

        for pair in nodes.windows(2) {
            let (from, to) = (pair[0].id(), pair[1].id());
            links.remove_outgoing(from);
            links.add(Link::new(from, to, color));
        }
        if let Some(last) = nodes.last() {
            links.remove_outgoing(last.id());
        }
    }

    /// Connects the rails to the first node's input port and the last
    /// node's output port.
    ///
    /// Without nodes the left rail spans the whole content width and the
    /// right rail collapses. A missing port leaves its rail untouched.
    pub fn anchor_rails(&self, nodes: &[Node], content: Bounds, rails: &mut Rails) {
        let (Some(first), Some(last)) = (nodes.first(), nodes.last()) else {
            rails.left = Rail::new(self.rung_offset, content.width());
            rails.right = Rail::new(self.rung_offset, 0.0);
            return;
        };

        match first.document_point(Port::In) {
            Some(port) => {
                let width = port.x() - content.min_x();
                rails.left = Rail::new(
                    port.y() - content.min_y(),
                    if width < 0.0 { self.rail_width } else { width },
                );
            }
            None => warn!(node:% = first.id(); "First node has no input port, left rail not anchored"),
        }

        match last.document_point(Port::Out) {
            Some(port) => {
                let width = content.max_x() - port.x() + self.spacing.width();
                rails.right = Rail::new(
                    port.y() - content.min_y(),
                    if width > 0.0 { width } else { 0.0 },
                );
            }
            None => warn!(node:% = last.id(); "Last node has no output port, right rail not anchored"),
        }
    }
}

/// Appends a node flush against `right`, shifting the rest of its row left.
fn push_right_aligned(
    slots: &mut Vec<Slot>,
    row_start: usize,
    cursor: RowCursor,
    width: f32,
    right: f32,
) -> RowCursor {
    for slot in &mut slots[row_start..] {
        slot.x -= width;
    }
    slots.push(Slot {
        x: right - width,
        row: cursor.row,
    });

    RowCursor {
        left_x: cursor.left_x - width,
        row_len: cursor.row_len + 1,
        ..cursor
    }
}

/// Re-packs a finished row so it ends [`ARROW_ALLOWANCE`] before `right`.
fn close_row(slots: &mut [Slot], widths: &[f32], right: f32) {
    let mut end = right - ARROW_ALLOWANCE;
    for (slot, width) in slots.iter_mut().zip(widths).rev() {
        slot.x = end - width;
        end = slot.x;
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;

    use super::*;

    fn node(name: &str, direction: Direction, width: f32) -> Node {
        Node::new(Id::new(name), direction, Size::new(width, 20.0))
    }

    fn layout_with_spacing(spacing: Size) -> RowLayout {
        RowLayout::new(&LayoutConfig::default().with_spacing(spacing))
    }

    fn xs(nodes: &[Node]) -> Vec<f32> {
        nodes.iter().map(|node| node.position().x()).collect()
    }

    #[test]
    fn test_wraps_before_out_node() {
        let mut nodes = vec![
            node("w_a", Direction::In, 40.0),
            node("w_b", Direction::In, 40.0),
            node("w_c", Direction::Out, 40.0),
        ];
        let mut links = LinkSet::new();
        let outcome = layout_with_spacing(Size::new(8.0, 40.0)).layout(
            &mut nodes,
            &mut links,
            Point::new(0.0, 0.0),
            100.0,
            Color::default(),
        );

        let (a, c) = (&nodes[0], &nodes[2]);
        assert_eq!(a.position().x(), 0.0);
        assert_eq!(c.position().x(), 60.0);
        assert!(c.position().y() > a.position().y());

        // B moved to its own closed row, leaving room for the arrow
        assert_eq!(nodes[1].position(), Point::new(28.0, 60.0));
        assert_eq!(c.position().y(), 120.0);
        assert_eq!(outcome.rows, 3);
        assert_eq!(outcome.rung_height, 180.0);
    }

    #[test]
    fn test_empty_rung() {
        let layout = RowLayout::new(&LayoutConfig::default());
        let mut links = LinkSet::new();
        let outcome = layout.layout(
            &mut [],
            &mut links,
            Point::new(16.0, 0.0),
            984.0,
            Color::default(),
        );
        assert_eq!(outcome.rung_height, 80.0);
        assert_eq!(outcome.rows, 0);

        let content = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(1000.0, 80.0));
        let mut rails = Rails::default();
        layout.anchor_rails(&[], content, &mut rails);
        assert_eq!(rails.left.width, 1000.0);
        assert_eq!(rails.right.width, 0.0);
    }

    #[test]
    fn test_single_row_in_and_out() {
        let mut nodes = vec![
            node("s_a", Direction::In, 40.0),
            node("s_b", Direction::In, 40.0),
            node("s_c", Direction::Out, 40.0),
        ];
        let outcome = RowLayout::new(&LayoutConfig::default()).layout(
            &mut nodes,
            &mut LinkSet::new(),
            Point::new(0.0, 10.0),
            1000.0,
            Color::default(),
        );

        assert_eq!(xs(&nodes), vec![0.0, 40.0, 960.0]);
        assert!(nodes.iter().all(|node| node.position().y() == 10.0));
        assert_eq!(outcome.rows, 1);
        // 20 + 40 is below the minimum
        assert_eq!(outcome.rung_height, 80.0);
    }

    #[test]
    fn test_out_only_chain_right_aligned_and_wrapped() {
        let mut nodes = vec![
            node("o_1", Direction::Out, 100.0),
            node("o_2", Direction::Out, 100.0),
            node("o_3", Direction::Out, 100.0),
            node("o_4", Direction::Out, 100.0),
        ];
        let outcome = RowLayout::new(&LayoutConfig::default()).layout(
            &mut nodes,
            &mut LinkSet::new(),
            Point::new(0.0, 0.0),
            400.0,
            Color::default(),
        );

        assert_eq!(outcome.rows, 2);
        // Closed first row ends ARROW_ALLOWANCE before the right edge
        assert_eq!(xs(&nodes[..3]), vec![68.0, 168.0, 268.0]);
        assert_eq!(nodes[3].position(), Point::new(300.0, 60.0));
    }

    #[test]
    fn test_in_nodes_after_wrap_are_right_aligned() {
        let mut nodes = vec![
            node("r_a", Direction::In, 200.0),
            node("r_b", Direction::In, 200.0),
            node("r_c", Direction::In, 50.0),
        ];
        RowLayout::new(&LayoutConfig::default()).layout(
            &mut nodes,
            &mut LinkSet::new(),
            Point::new(0.0, 0.0),
            400.0,
            Color::default(),
        );

        // 200 + 32 + 16 + 200 > 400: wrap after A
        assert_eq!(nodes[0].position(), Point::new(0.0, 0.0));
        assert_eq!(nodes[1].position(), Point::new(150.0, 60.0));
        assert_eq!(nodes[2].position(), Point::new(350.0, 60.0));
    }

    #[test]
    fn test_oversized_node_does_not_wrap() {
        let mut nodes = vec![node("big", Direction::In, 2000.0)];
        let outcome = RowLayout::new(&LayoutConfig::default()).layout(
            &mut nodes,
            &mut LinkSet::new(),
            Point::new(16.0, 0.0),
            500.0,
            Color::default(),
        );
        assert_eq!(outcome.rows, 1);
        assert_eq!(nodes[0].position(), Point::new(16.0, 0.0));
    }

    #[test]
    fn test_description_spacing_equalised_per_row() {
        let mut nodes = vec![
            Node::new(Id::new("d_a"), Direction::In, Size::new(40.0, 40.0))
                .with_description_height(10.0),
            Node::new(Id::new("d_b"), Direction::In, Size::new(40.0, 30.0))
                .with_description_height(30.0),
        ];
        let outcome = RowLayout::new(&LayoutConfig::default()).layout(
            &mut nodes,
            &mut LinkSet::new(),
            Point::new(0.0, 0.0),
            1000.0,
            Color::default(),
        );

        assert_eq!(nodes[0].description_spacing(), 20.0);
        assert_eq!(nodes[1].description_spacing(), 0.0);
        assert!(approx_eq!(f32, outcome.rung_height, 100.0));
    }

    #[test]
    fn test_nan_width_takes_no_space() {
        let mut nodes = vec![
            node("n_a", Direction::In, f32::NAN),
            node("n_b", Direction::In, 40.0),
        ];
        RowLayout::new(&LayoutConfig::default()).layout(
            &mut nodes,
            &mut LinkSet::new(),
            Point::new(0.0, 0.0),
            1000.0,
            Color::default(),
        );
        assert_eq!(xs(&nodes), vec![0.0, 0.0]);
    }

    #[test]
    fn test_links_chain_nodes() {
        let mut nodes = vec![
            node("k_a", Direction::In, 40.0),
            node("k_b", Direction::In, 40.0),
            node("k_c", Direction::Out, 40.0),
        ];
        let red = Color::new("#AA0000").unwrap();
        let mut links = LinkSet::new();
        // Stale link from the last node and one to a node that left the rung
        links.add(Link::new(Id::new("k_c"), Id::new("k_a"), red));
        links.add(Link::new(Id::new("k_a"), Id::new("k_gone"), red));
        // Link between two other lanes' nodes survives
        links.add(Link::new(Id::new("k_x"), Id::new("k_y"), red));

        RowLayout::new(&LayoutConfig::default()).layout(
            &mut nodes,
            &mut links,
            Point::new(0.0, 0.0),
            1000.0,
            red,
        );

        let pairs: Vec<(Id, Id)> = links
            .iter()
            .map(|(_, link)| (link.from(), link.to()))
            .collect();
        assert_eq!(pairs.len(), 3);
        assert!(pairs.contains(&(Id::new("k_a"), Id::new("k_b"))));
        assert!(pairs.contains(&(Id::new("k_b"), Id::new("k_c"))));
        assert!(pairs.contains(&(Id::new("k_x"), Id::new("k_y"))));
        assert!(links.outgoing(Id::new("k_c")).is_none());
        assert!(links.iter().all(|(_, link)| link.color() == red));
    }

    #[test]
    fn test_anchor_rails_to_ports() {
        let layout = RowLayout::new(&LayoutConfig::default());
        let content = Bounds::new_from_top_left(Point::new(50.0, 0.0), Size::new(1000.0, 80.0));
        let nodes = vec![
            node("a_a", Direction::In, 40.0).with_position(Point::new(66.0, 0.0)),
            node("a_b", Direction::Out, 40.0).with_position(Point::new(1010.0, 0.0)),
        ];
        let mut rails = Rails::default();
        layout.anchor_rails(&nodes, content, &mut rails);

        assert_eq!(rails.left, Rail::new(10.0, 16.0));
        // 1050 - 1050 + 16
        assert_eq!(rails.right, Rail::new(10.0, 16.0));
    }

    #[test]
    fn test_anchor_rails_defaults_for_negative_widths() {
        let layout = RowLayout::new(&LayoutConfig::default());
        let content = Bounds::new_from_top_left(Point::new(50.0, 0.0), Size::new(100.0, 80.0));
        let nodes = vec![node("g_a", Direction::In, 400.0).with_position(Point::new(0.0, 0.0))];
        let mut rails = Rails::default();
        layout.anchor_rails(&nodes, content, &mut rails);

        assert_eq!(rails.left.width, 16.0);
        assert_eq!(rails.right.width, 0.0);
    }

    #[test]
    fn test_anchor_rails_missing_port_keeps_rail() {
        let layout = RowLayout::new(&LayoutConfig::default());
        let content = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(500.0, 80.0));
        let size = Size::new(40.0, 20.0);
        let nodes = vec![
            Node::new(Id::new("m_a"), Direction::In, size)
                .with_ports(crate::model::PortMap::centered(size).without_port(Port::In)),
        ];
        let mut rails = Rails {
            left: Rail::new(40.0, 16.0),
            right: Rail::default(),
        };
        layout.anchor_rails(&nodes, content, &mut rails);

        assert_eq!(rails.left, Rail::new(40.0, 16.0));
        assert_eq!(rails.right.offset_y, 10.0);
    }
}
