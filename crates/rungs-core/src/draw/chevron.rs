//! Chevron decoration of orthogonal link routes.
//!
//! A wrapped link in a ladder diagram travels right, down, back across the
//! lane and down again before it enters the next node. A single arrowhead at
//! the end would be hard to follow, so open chevrons are repeated every
//! [`ARROW_SPACING`] units along every straight run of the route.
//!
//! ```text
//!   ──────>──────>──┐
//!                   │
//!   ┌──<──────<─────┘
//!   │
//!   └──>─[ node ]
//! ```
//!
//! Distances are measured per segment: the walk restarts at every corner.

use log::{debug, trace};

use crate::{
    draw::{Figure, GeometryPath},
    geometry::{Bounds, Point},
};

/// Distance from a chevron's apex back to its wings, along the travel direction.
pub const ARROW_LEN: f32 = 8.0;

/// Half the span of a chevron, perpendicular to the travel direction.
pub const ARROW_WIDTH: f32 = 8.0;

/// Distance between consecutive chevrons on a segment.
pub const ARROW_SPACING: f32 = 32.0;

/// Gap kept between the horizontal return run of a wrapped link and the top
/// of its destination node.
pub const DESTINATION_CLEARANCE: f32 = 20.0;

/// Coordinates closer than this are treated as equal when classifying segments.
const AXIS_TOLERANCE: f32 = 0.001;

/// Travel direction of an axis-aligned segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    Left,
    Right,
    Up,
    Down,
}

impl Heading {
    /// Returns the heading from `from` to `to`, or `None` when the segment has
    /// no length or is not horizontal/vertical.
    ///
    /// ```
    /// # use rungs_core::draw::Heading;
    /// # use rungs_core::geometry::Point;
    /// let origin = Point::new(0.0, 0.0);
    /// assert_eq!(Heading::of_segment(origin, Point::new(0.0, 40.0)), Some(Heading::Down));
    /// assert_eq!(Heading::of_segment(origin, Point::new(-5.0, 0.0)), Some(Heading::Left));
    /// assert_eq!(Heading::of_segment(origin, Point::new(3.0, 4.0)), None);
    /// ```
    pub fn of_segment(from: Point, to: Point) -> Option<Self> {
        let dx = to.x() - from.x();
        let dy = to.y() - from.y();
        let flat_x = dx.abs() <= AXIS_TOLERANCE;
        let flat_y = dy.abs() <= AXIS_TOLERANCE;

        match (flat_x, flat_y) {
            (true, true) | (false, false) => None,
            (false, true) if dx > 0.0 => Some(Self::Right),
            (false, true) => Some(Self::Left),
            (true, false) if dy > 0.0 => Some(Self::Down),
            (true, false) => Some(Self::Up),
        }
    }

    /// Unit vector pointing in this direction
    fn unit(self) -> Point {
        match self {
            Self::Left => Point::new(-1.0, 0.0),
            Self::Right => Point::new(1.0, 0.0),
            Self::Up => Point::new(0.0, -1.0),
            Self::Down => Point::new(0.0, 1.0),
        }
    }

    /// Length of the segment measured along this heading
    fn extent(self, from: Point, to: Point) -> f32 {
        match self {
            Self::Left | Self::Right => (to.x() - from.x()).abs(),
            Self::Up | Self::Down => (to.y() - from.y()).abs(),
        }
    }
}

fn is_axis_aligned(from: Point, to: Point) -> bool {
    (to.x() - from.x()).abs() <= AXIS_TOLERANCE || (to.y() - from.y()).abs() <= AXIS_TOLERANCE
}

/// Builds decorated link geometry from orthogonal routes.
///
/// The defaults are the calibrated values of the ladder style
/// ([`ARROW_LEN`], [`ARROW_WIDTH`], [`ARROW_SPACING`],
/// [`DESTINATION_CLEARANCE`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Chevrons {
    arrow_len: f32,
    arrow_width: f32,
    spacing: f32,
    destination_clearance: f32,
}

impl Default for Chevrons {
    fn default() -> Self {
        Self {
            arrow_len: ARROW_LEN,
            arrow_width: ARROW_WIDTH,
            spacing: ARROW_SPACING,
            destination_clearance: DESTINATION_CLEARANCE,
        }
    }
}

impl Chevrons {
    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    /// Produces the route outline followed by one chevron figure every
    /// [`spacing`](Self::spacing) units of each straight segment.
    ///
    /// `wrapping` marks a link that crosses rows. Only wrapping links get
    /// the forced chevron on their final segment and, when `destination` is
    /// known, have their return run moved to
    /// [`DESTINATION_CLEARANCE`] above the destination node.
    ///
    /// Routes that are shorter than two points, contain non-finite
    /// coordinates or have a diagonal segment come back as a bare outline.
    ///
    /// # Examples
    ///
    /// ```
    /// # use rungs_core::draw::Chevrons;
    /// # use rungs_core::geometry::Point;
    /// let route = [Point::new(0.0, 0.0), Point::new(100.0, 0.0)];
    /// let path = Chevrons::default().decorate(&route, false, None);
    /// assert_eq!(path.chevrons().len(), 3);
    /// ```
    pub fn decorate(
        &self,
        route: &[Point],
        wrapping: bool,
        destination: Option<Bounds>,
    ) -> GeometryPath {
        if route.len() < 2 {
            return GeometryPath::from_route(route);
        }
        if route.iter().any(|point| point.is_degenerate()) {
            debug!(points = route.len(); "Route has non-finite coordinates, skipping chevrons");
            return GeometryPath::from_route(route);
        }
        if !route.windows(2).all(|seg| is_axis_aligned(seg[0], seg[1])) {
            debug!(points = route.len(); "Route is not orthogonal, skipping chevrons");
            return GeometryPath::from_route(route);
        }

        let mut points = route.to_vec();
        if let Some(destination) = destination.filter(|_| wrapping) {
            self.stretch_to_destination(&mut points, destination);
        }

        let mut path = GeometryPath::from_route(&points);
        let last_segment = points.len() - 2;
        for (idx, seg) in points.windows(2).enumerate() {
            let terminal = wrapping && idx == last_segment;
            self.decorate_segment(&mut path, seg[0], seg[1], terminal);
        }

        trace!(
            segments = points.len() - 1,
            chevrons = path.chevrons().len(),
            wrapping;
            "Decorated link route"
        );
        path
    }

    /// Moves the horizontal return run of a wrapped route so it lies
    /// `destination_clearance` above the destination's top edge.
    ///
    /// Only the end of the second segment and the end of the third move, so
    /// every segment stays horizontal or vertical.
    fn stretch_to_destination(&self, points: &mut [Point], destination: Bounds) {
        if points.len() < 4 {
            return;
        }
        let second_is_vertical = matches!(
            Heading::of_segment(points[1], points[2]),
            Some(Heading::Up | Heading::Down)
        );
        if !second_is_vertical {
            return;
        }

        let run_y = destination.min_y() - self.destination_clearance;
        points[2] = points[2].with_y(run_y);
        points[3] = points[3].with_y(run_y);
    }

    fn decorate_segment(&self, path: &mut GeometryPath, from: Point, to: Point, terminal: bool) {
        let Some(heading) = Heading::of_segment(from, to) else {
            return;
        };
        let length = heading.extent(from, to);

        let mut travelled = 0.0;
        while length - travelled >= self.spacing {
            travelled += self.spacing;
            path.add(self.chevron(from, heading, travelled));
        }

        // One more on the final run of a wrapped link, kept on the segment
        if terminal {
            let offset = (self.spacing / 2.0).min(length - travelled);
            path.add(self.chevron(from, heading, travelled + offset));
        }
    }

    /// Chevron with its apex `distance` units from `origin` along `heading`.
    fn chevron(&self, origin: Point, heading: Heading, distance: f32) -> Figure {
        let unit = heading.unit();
        let apex = Point::new(
            origin.x() + unit.x() * distance,
            origin.y() + unit.y() * distance,
        );
        let back = Point::new(
            apex.x() - unit.x() * self.arrow_len,
            apex.y() - unit.y() * self.arrow_len,
        );
        let normal = Point::new(-unit.y() * self.arrow_width, unit.x() * self.arrow_width);

        Figure::new(back.add_point(normal), vec![apex, back.sub_point(normal)])
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;

    use super::*;
    use crate::geometry::Size;

    fn apexes(path: &GeometryPath) -> Vec<Point> {
        path.chevrons()
            .iter()
            .map(|figure| figure.points()[0])
            .collect()
    }

    #[test]
    fn test_heading_of_segment() {
        let origin = Point::new(10.0, 10.0);
        assert_eq!(
            Heading::of_segment(origin, Point::new(50.0, 10.0)),
            Some(Heading::Right)
        );
        assert_eq!(
            Heading::of_segment(origin, Point::new(10.0, -10.0)),
            Some(Heading::Up)
        );
        assert_eq!(Heading::of_segment(origin, origin), None);
    }

    #[test]
    fn test_short_route_is_outline_only() {
        let path = Chevrons::default().decorate(&[Point::new(0.0, 0.0)], true, None);
        assert_eq!(path.figures().len(), 1);
        assert!(path.chevrons().is_empty());
    }

    #[test]
    fn test_single_segment_length_40() {
        let route = [Point::new(0.0, 0.0), Point::new(40.0, 0.0)];
        let chevrons = Chevrons::default();

        let plain = chevrons.decorate(&route, false, None);
        assert_eq!(apexes(&plain), vec![Point::new(32.0, 0.0)]);

        // Flagged as the final segment of a wrapped link: one forced extra
        let terminal = chevrons.decorate(&route, true, None);
        assert_eq!(
            apexes(&terminal),
            vec![Point::new(32.0, 0.0), Point::new(40.0, 0.0)]
        );
    }

    #[test]
    fn test_short_unwrapped_segment_has_no_chevrons() {
        let route = [Point::new(0.0, 0.0), Point::new(20.0, 0.0)];
        let path = Chevrons::default().decorate(&route, false, None);
        assert!(path.chevrons().is_empty());
    }

    #[test]
    fn test_short_terminal_segment_gets_forced_chevron() {
        let route = [Point::new(0.0, 0.0), Point::new(16.0, 0.0)];
        let path = Chevrons::default().decorate(&route, true, None);
        assert_eq!(apexes(&path), vec![Point::new(16.0, 0.0)]);
    }

    #[test]
    fn test_terminal_chevron_forced_on_exact_multiple() {
        let route = [Point::new(0.0, 0.0), Point::new(64.0, 0.0)];
        let plain = Chevrons::default().decorate(&route, false, None);
        let terminal = Chevrons::default().decorate(&route, true, None);

        assert_eq!(terminal.chevrons().len(), plain.chevrons().len() + 1);
        assert_eq!(
            apexes(&terminal),
            vec![
                Point::new(32.0, 0.0),
                Point::new(64.0, 0.0),
                Point::new(64.0, 0.0)
            ]
        );
    }

    #[test]
    fn test_chevron_wings_rightwards() {
        let route = [Point::new(0.0, 0.0), Point::new(32.0, 0.0)];
        let path = Chevrons::default().decorate(&route, false, None);
        let chevron = &path.chevrons()[0];

        assert_eq!(chevron.start(), Point::new(24.0, 8.0));
        assert_eq!(
            chevron.points(),
            &[Point::new(32.0, 0.0), Point::new(24.0, -8.0)]
        );
    }

    #[test]
    fn test_chevron_wings_upwards() {
        let route = [Point::new(0.0, 100.0), Point::new(0.0, 60.0)];
        let path = Chevrons::default().decorate(&route, false, None);
        let chevron = &path.chevrons()[0];

        assert_eq!(chevron.points()[0], Point::new(0.0, 68.0));
        // Wings sit behind the apex, i.e. further down
        assert_eq!(chevron.start().y(), 76.0);
        assert_eq!(chevron.points()[1].y(), 76.0);
        assert!(approx_eq!(
            f32,
            (chevron.start().x() - chevron.points()[1].x()).abs(),
            2.0 * ARROW_WIDTH
        ));
    }

    #[test]
    fn test_multi_segment_walk_restarts_at_corners() {
        // right 40, down 70, left 100
        let route = [
            Point::new(0.0, 0.0),
            Point::new(40.0, 0.0),
            Point::new(40.0, 70.0),
            Point::new(-60.0, 70.0),
        ];
        let path = Chevrons::default().decorate(&route, false, None);
        assert_eq!(
            apexes(&path),
            vec![
                Point::new(32.0, 0.0),
                Point::new(40.0, 32.0),
                Point::new(40.0, 64.0),
                Point::new(8.0, 70.0),
                Point::new(-24.0, 70.0),
                Point::new(-56.0, 70.0),
            ]
        );
    }

    #[test]
    fn test_diagonal_route_is_unmodified() {
        let route = [
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(150.0, 50.0),
        ];
        let path = Chevrons::default().decorate(&route, true, None);
        assert_eq!(path, GeometryPath::from_route(&route));
    }

    #[test]
    fn test_non_finite_route_is_unmodified() {
        let route = [Point::new(0.0, 0.0), Point::new(f32::NAN, 0.0)];
        let path = Chevrons::default().decorate(&route, true, None);
        assert!(path.chevrons().is_empty());
    }

    #[test]
    fn test_zero_length_segment_is_skipped() {
        let route = [
            Point::new(0.0, 0.0),
            Point::new(0.0, 0.0),
            Point::new(64.0, 0.0),
        ];
        let path = Chevrons::default().decorate(&route, false, None);
        assert_eq!(path.chevrons().len(), 2);
    }

    #[test]
    fn test_wrapped_route_stretches_to_destination() {
        // OUT port at (500, 30); destination IN port at (300, 130)
        let route = [
            Point::new(500.0, 30.0),
            Point::new(526.0, 30.0),
            Point::new(526.0, 80.0),
            Point::new(284.0, 80.0),
            Point::new(284.0, 130.0),
            Point::new(300.0, 130.0),
        ];
        let destination =
            Bounds::new_from_top_left(Point::new(300.0, 110.0), Size::new(60.0, 50.0));
        let path = Chevrons::default().decorate(&route, true, Some(destination));
        let outline = path.outline().unwrap();

        assert_eq!(outline.points()[1], Point::new(526.0, 90.0));
        assert_eq!(outline.points()[2], Point::new(284.0, 90.0));
        assert_eq!(outline.points()[3], Point::new(284.0, 130.0));

        // Final 16 unit run into the port carries the forced chevron
        assert_eq!(apexes(&path).last(), Some(&Point::new(300.0, 130.0)));
    }

    #[test]
    fn test_unwrapped_route_ignores_destination() {
        let route = [
            Point::new(0.0, 0.0),
            Point::new(26.0, 0.0),
            Point::new(26.0, 80.0),
            Point::new(10.0, 80.0),
        ];
        let destination = Bounds::new_from_top_left(Point::new(0.0, 200.0), Size::new(10.0, 10.0));
        let path = Chevrons::default().decorate(&route, false, Some(destination));
        assert_eq!(path.outline().unwrap().points(), &route[1..]);
    }
}
