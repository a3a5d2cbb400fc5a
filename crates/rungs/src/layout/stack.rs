//! Ordering and stacking of lanes.
//!
//! The pool layout sorts lanes with [`LaneArranger::compare`] when the
//! arranger supports custom ordering, then hands them to
//! [`LaneArranger::arrange`] to be placed.

use std::cmp::Ordering;

use log::{debug, warn};

use rungs_core::geometry::Point;

use crate::model::Lane;

/// Strategy that orders and positions the lanes of a pool.
pub trait LaneArranger {
    /// Whether lanes should be sorted with [`compare`](Self::compare) before
    /// they are arranged.
    fn supports_custom_ordering(&self) -> bool;

    /// Ordering of two lanes.
    fn compare(&self, a: &Lane, b: &Lane) -> Ordering;

    /// Positions the lanes, in slice order, starting at `origin`.
    fn arrange(&self, lanes: &mut [Lane], origin: Point);
}

/// Stacks lanes top to bottom with no gap, left edges aligned.
///
/// Lanes are ordered by the y coordinate of their last known location, so
/// a lane dragged above another one swaps places on the next layout.
/// Lanes without a usable location keep their relative order.
#[derive(Debug, Clone, Copy, Default)]
pub struct StackArranger;

impl LaneArranger for StackArranger {
    fn supports_custom_ordering(&self) -> bool {
        true
    }

    fn compare(&self, a: &Lane, b: &Lane) -> Ordering {
        let a_y = a.location().map(Point::y);
        let b_y = b.location().map(Point::y);
        match (a_y, b_y) {
            (Some(a_y), Some(b_y)) => a_y.partial_cmp(&b_y).unwrap_or(Ordering::Equal),
            _ => Ordering::Equal,
        }
    }

    fn arrange(&self, lanes: &mut [Lane], origin: Point) {
        let mut y = origin.y();
        for lane in lanes {
            let Some(bounds) = lane.bounds() else {
                warn!(lane:% = lane.id(); "Lane has no content placeholder, not stacked");
                continue;
            };

            let offset = Point::new(origin.x() - bounds.min_x(), y - bounds.min_y());
            lane.translate(offset);
            let top_left = Point::new(origin.x(), y);
            lane.set_location(top_left);
            debug!(lane:% = lane.id(), y, height = bounds.height(); "Lane stacked");

            y += bounds.height();
        }
    }
}
