//! Orthogonal routes between linked ports.

use rungs_core::geometry::Point;

use crate::model::Node;

/// Node tops closer than this belong to the same row.
const SAME_ROW_TOLERANCE: f32 = 0.5;

/// An orthogonal link route.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub points: Vec<Point>,
    /// Whether the route leaves its row and loops back to a later one
    pub wrapping: bool,
}

/// Whether `from` and `to` were placed on the same row.
///
/// Every node of a row shares the row's top edge, so nodes of different
/// heights still compare equal here even though their ports do not.
pub fn shares_row(from: &Node, to: &Node) -> bool {
    (from.position().y() - to.position().y()).abs() < SAME_ROW_TOLERANCE
}

/// Builds the orthogonal route from an `Out` port at `from` to an `In` port
/// at `to`.
///
/// Within a row, with the destination to the right, the ports are joined by
/// a straight line, or by a jog at the midpoint when their heights differ.
/// Anything else becomes the five-segment wrap route: right by `from_end`,
/// down to the midline between the rows, across to `to_end` short of the
/// destination, down to its row and right into the port.
///
/// ```text
///   from ──┐
///          │ from_end
///   ┌──────┘ midline
///   │
///   └─ to_end ─> to
/// ```
///
/// # Examples
///
/// ```
/// # use rungs::layout::route_link;
/// # use rungs_core::geometry::Point;
/// let straight = route_link(Point::new(0.0, 10.0), Point::new(80.0, 10.0), true, 26.0, 16.0);
/// assert_eq!(straight.points.len(), 2);
/// assert!(!straight.wrapping);
///
/// let wrapped = route_link(Point::new(500.0, 10.0), Point::new(100.0, 90.0), false, 26.0, 16.0);
/// assert_eq!(wrapped.points.len(), 6);
/// assert_eq!(wrapped.points[2], Point::new(526.0, 50.0));
/// ```
pub fn route_link(from: Point, to: Point, same_row: bool, from_end: f32, to_end: f32) -> Route {
    if same_row && to.x() >= from.x() {
        let jog_x = (from.x() + to.x()) / 2.0;
        let mut points = vec![
            from,
            Point::new(jog_x, from.y()),
            Point::new(jog_x, to.y()),
            to,
        ];
        points.dedup();
        if points.len() == 3 {
            // Level ports
            points.remove(1);
        }
        return Route {
            points,
            wrapping: false,
        };
    }

    let mid_y = (from.y() + to.y()) / 2.0;
    let out_x = from.x() + from_end;
    let in_x = to.x() - to_end;
    Route {
        points: vec![
            from,
            Point::new(out_x, from.y()),
            Point::new(out_x, mid_y),
            Point::new(in_x, mid_y),
            Point::new(in_x, to.y()),
            to,
        ],
        wrapping: true,
    }
}
