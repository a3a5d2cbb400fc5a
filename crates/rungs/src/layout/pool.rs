//! Layout of a whole pool of lanes.
//!
//! The pool layout runs in two passes. The first measures every header so
//! all lanes can share one header width and one label slot. The second sizes
//! each lane's content area, lays out its rung and sizes the header to
//! match. Finally the lanes are ordered and stacked by a [`LaneArranger`].

use log::{debug, info, warn};

use rungs_core::{
    color::Color,
    geometry::{Bounds, Point, Size},
    identifier::Id,
};

use super::{
    row::{RowLayout, RowOutcome},
    stack::{LaneArranger, StackArranger},
};
use crate::{
    config::LayoutConfig,
    model::{Diagram, Lane, LinkSet},
};

/// Rung result of one lane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaneOutcome {
    pub lane: Id,
    pub rung_height: f32,
    pub rows: usize,
}

/// Result of a pool relayout.
#[derive(Debug, Clone, PartialEq)]
pub struct Arrangement {
    /// Width shared by every lane header
    pub header_width: f32,
    /// Widest label among the non-end lanes
    pub text_width: f32,
    /// Content width given to expanded lanes
    pub content_width: f32,
    /// Lanes that were laid out, in final stacking order
    pub lanes: Vec<LaneOutcome>,
    /// Bounds of the stacked pool, `None` if no lane could be placed
    pub bounds: Option<Bounds>,
}

/// Lays out every lane of a [`Diagram`].
///
/// # Examples
///
/// ```
/// # use rungs::{config::LayoutConfig, layout::PoolLayout, model::{Diagram, Lane}};
/// # use rungs_core::identifier::Id;
/// let mut diagram = Diagram::new()
///     .with_lane(Lane::new(Id::new("rung_0")))
///     .with_lane(Lane::new(Id::new("rung_1")));
///
/// let config = LayoutConfig::default();
/// let arrangement = PoolLayout::new(&config).relayout(&mut diagram, None);
///
/// assert_eq!(arrangement.header_width, 50.0);
/// assert_eq!(arrangement.content_width, 1000.0);
/// assert_eq!(diagram.lanes()[1].content().map(|c| c.min_y()), Some(80.0));
/// ```
pub struct PoolLayout<'a> {
    config: &'a LayoutConfig,
    rows: RowLayout,
    arranger: Box<dyn LaneArranger>,
    rail_color: Color,
    error_color: Color,
}

impl<'a> PoolLayout<'a> {
    /// Creates a pool layout that stacks lanes with [`StackArranger`] and
    /// draws links black, or dark red for lanes with diagnostics.
    pub fn new(config: &'a LayoutConfig) -> Self {
        Self {
            config,
            rows: RowLayout::new(config),
            arranger: Box::new(StackArranger),
            rail_color: Color::default(),
            error_color: Color::new("#AA0000").unwrap_or_default(),
        }
    }

    /// Replaces the lane arranger.
    pub fn with_arranger(mut self, arranger: Box<dyn LaneArranger>) -> Self {
        self.arranger = arranger;
        self
    }

    /// Sets the link colors of healthy lanes and of lanes with diagnostics.
    pub fn with_link_colors(mut self, rail_color: Color, error_color: Color) -> Self {
        self.rail_color = rail_color;
        self.error_color = error_color;
        self
    }

    /// Lays out every lane and stacks them.
    ///
    /// `viewport_width` sets the content width of expanded lanes; when it is
    /// unknown the configured minimum rung width is used. Lanes without a
    /// content placeholder are skipped and keep their previous geometry.
    pub fn relayout(&self, diagram: &mut Diagram, viewport_width: Option<f32>) -> Arrangement {
        let node_ids = diagram.node_ids();
        let (lanes, links) = diagram.parts_mut();
        info!(lanes = lanes.len(), viewport_width:?; "Laying out pool");

        let dropped = links.retain_nodes(&node_ids);
        if dropped > 0 {
            debug!(dropped; "Dropped links to removed nodes");
        }

        let (header_width, text_width) = self.measure_headers(lanes);
        let content_width = viewport_width
            .filter(|width| width.is_finite())
            .map_or(self.config.min_rung_width(), |width| {
                (width - header_width - self.config.viewport_margin()).max(1.0)
            });
        debug!(header_width, text_width, content_width; "Headers measured");

        let mut outcomes = Vec::with_capacity(lanes.len());
        for lane in lanes.iter_mut() {
            if let Some(outcome) =
                self.layout_lane(lane, links, header_width, text_width, content_width)
            {
                outcomes.push(LaneOutcome {
                    lane: lane.id(),
                    rung_height: outcome.rung_height,
                    rows: outcome.rows,
                });
            }
        }

        if self.arranger.supports_custom_ordering() {
            lanes.sort_by(|a, b| self.arranger.compare(a, b));
        }
        self.arranger.arrange(lanes, Point::default());

        // Report outcomes in stacking order
        let order: Vec<Id> = lanes.iter().map(Lane::id).collect();
        outcomes.sort_by_key(|outcome| order.iter().position(|id| *id == outcome.lane));

        let bounds = diagram.bounds();
        info!(lanes = outcomes.len(), bounds:?; "Pool laid out");

        Arrangement {
            header_width,
            text_width,
            content_width,
            lanes: outcomes,
            bounds,
        }
    }

    /// Shared header width and label width over every lane but the end lane.
    fn measure_headers(&self, lanes: &[Lane]) -> (f32, f32) {
        lanes
            .iter()
            .filter(|lane| !lane.is_end())
            .fold(
                (self.config.min_header_width(), 0.0f32),
                |(header, text), lane| {
                    (
                        header.max(lane.header().content_width()),
                        text.max(lane.header().text_width()),
                    )
                },
            )
    }

    fn layout_lane(
        &self,
        lane: &mut Lane,
        links: &mut LinkSet,
        header_width: f32,
        text_width: f32,
        content_width: f32,
    ) -> Option<RowOutcome> {
        lane.header_mut().set_width(header_width);
        if !lane.is_end() {
            lane.header_mut().set_text_slot_width(text_width);
        }

        let Some(content) = lane.content() else {
            warn!(lane:% = lane.id(); "Lane has no content placeholder, skipping");
            return None;
        };

        let expanded = lane.is_expanded();
        let width = if expanded { content_width } else { 1.0 };
        let color = if lane.diagnostics() > 0 {
            self.error_color
        } else {
            self.rail_color
        };
        let spacing = self.config.spacing();

        let outcome = if expanded {
            let (nodes, _, _) = lane.layout_parts();
            let origin = content.top_left().add_point(Point::new(spacing.width(), 0.0));
            self.rows
                .layout(nodes, links, origin, width - spacing.width(), color)
        } else {
            debug!(lane:% = lane.id(); "Lane collapsed");
            RowOutcome {
                rung_height: self.config.min_rung_height(),
                rows: 0,
            }
        };

        let content = Bounds::new_from_top_left(
            content.top_left(),
            Size::new(width, outcome.rung_height),
        );
        lane.set_content(content);
        lane.header_mut().set_height(outcome.rung_height);
        if expanded {
            let (nodes, _, rails) = lane.layout_parts();
            self.rows.anchor_rails(nodes, content, rails);
        }

        debug!(
            lane:% = lane.id(),
            width,
            rung_height = outcome.rung_height,
            rows = outcome.rows;
            "Lane laid out"
        );
        Some(outcome)
    }
}
