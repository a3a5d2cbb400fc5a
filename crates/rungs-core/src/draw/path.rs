//! Polyline paths made of open figures.

use svg::node::element::path::Data;

use crate::geometry::Point;

/// An open polyline: a start point followed by line-to points.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    start: Point,
    points: Vec<Point>,
}

impl Figure {
    /// Creates a figure from its first point and the points it draws lines to.
    pub fn new(start: Point, points: Vec<Point>) -> Self {
        Self { start, points }
    }

    pub fn start(&self) -> Point {
        self.start
    }

    /// Line-to points after the start point
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    fn append_to(&self, data: Data) -> Data {
        let data = data.move_to((self.start.x(), self.start.y()));
        self.points
            .iter()
            .fold(data, |data, point| data.line_to((point.x(), point.y())))
    }
}

/// A link geometry: the route outline first, then any decorations.
///
/// ```
/// # use rungs_core::draw::GeometryPath;
/// # use rungs_core::geometry::Point;
/// let path = GeometryPath::from_route(&[Point::new(0.0, 0.0), Point::new(40.0, 0.0)]);
/// assert!(path.outline().is_some());
/// assert!(path.chevrons().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometryPath {
    figures: Vec<Figure>,
}

impl GeometryPath {
    /// Creates a path whose only figure is the route outline. An empty route
    /// gives an empty path.
    pub fn from_route(route: &[Point]) -> Self {
        let figures = route
            .split_first()
            .map(|(start, rest)| vec![Figure::new(*start, rest.to_vec())])
            .unwrap_or_default();
        Self { figures }
    }

    /// Appends a figure after the existing ones.
    pub fn add(&mut self, figure: Figure) {
        self.figures.push(figure);
    }

    /// All figures in drawing order
    pub fn figures(&self) -> &[Figure] {
        &self.figures
    }

    /// The route outline, if the path is not empty
    pub fn outline(&self) -> Option<&Figure> {
        self.figures.first()
    }

    /// Every figure after the outline
    pub fn chevrons(&self) -> &[Figure] {
        self.figures.get(1..).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.figures.is_empty()
    }

    /// Converts the path to SVG path data, one `M ... L ...` run per figure.
    pub fn to_svg_data(&self) -> Data {
        self.figures
            .iter()
            .fold(Data::new(), |data, figure| figure.append_to(data))
    }
}
