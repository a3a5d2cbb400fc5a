//! Nodes placed on a rung.

use std::fmt;

use rungs_core::{
    geometry::{Bounds, Point, Size},
    identifier::Id,
};

/// Which side of the rung a node belongs to.
///
/// Input nodes (contacts) are packed left to right from the start of the
/// rung. Output nodes (coils) are packed right-aligned against its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    In,
    Out,
}

/// A named anchor on a node where links attach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Port {
    /// Where the incoming link ends
    In,
    /// Where the outgoing link starts
    Out,
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::In => f.write_str("in"),
            Self::Out => f.write_str("out"),
        }
    }
}

/// Port offsets relative to a node's top-left corner.
///
/// A port that was never registered is reported as missing; callers skip
/// whatever they wanted to anchor to it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PortMap {
    input: Option<Point>,
    output: Option<Point>,
}

impl PortMap {
    /// Ports at the vertical middle of the left and right edges.
    pub fn centered(size: Size) -> Self {
        let mid_y = size.height() / 2.0;
        Self {
            input: Some(Point::new(0.0, mid_y)),
            output: Some(Point::new(size.width(), mid_y)),
        }
    }

    /// Returns a copy with `port` registered at `offset`.
    pub fn with_port(mut self, port: Port, offset: Point) -> Self {
        self.set(port, Some(offset));
        self
    }

    /// Returns a copy with `port` unregistered.
    pub fn without_port(mut self, port: Port) -> Self {
        self.set(port, None);
        self
    }

    pub fn get(&self, port: Port) -> Option<Point> {
        match port {
            Port::In => self.input,
            Port::Out => self.output,
        }
    }

    fn set(&mut self, port: Port, offset: Option<Point>) {
        match port {
            Port::In => self.input = offset,
            Port::Out => self.output = offset,
        }
    }
}

/// A measured element on a rung.
///
/// The size is supplied by whoever measured the node and never changed by the
/// layout. The layout owns the position and the description spacing.
///
/// # Examples
///
/// ```
/// # use rungs::model::{Direction, Node, Port};
/// # use rungs_core::geometry::{Point, Size};
/// let mut contact = Node::new("XIC_1".into(), Direction::In, Size::new(60.0, 40.0));
/// contact.move_to(Point::new(100.0, 20.0));
///
/// assert_eq!(contact.document_point(Port::In), Some(Point::new(100.0, 40.0)));
/// assert_eq!(contact.document_point(Port::Out), Some(Point::new(160.0, 40.0)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: Id,
    direction: Direction,
    size: Size,
    position: Point,
    description_height: f32,
    description_spacing: f32,
    ports: PortMap,
}

impl Node {
    /// Creates a node at the origin with ports centered on its left and
    /// right edges.
    pub fn new(id: Id, direction: Direction, size: Size) -> Self {
        Self {
            id,
            direction,
            size,
            position: Point::default(),
            description_height: 0.0,
            description_spacing: 0.0,
            ports: PortMap::centered(size),
        }
    }

    /// Sets the height of the node's description block.
    pub fn with_description_height(mut self, height: f32) -> Self {
        self.description_height = height;
        self
    }

    pub fn with_ports(mut self, ports: PortMap) -> Self {
        self.ports = ports;
        self
    }

    pub fn with_position(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Measured size of the node.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Top-left corner in document coordinates.
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new_from_top_left(self.position, self.size)
    }

    pub fn description_height(&self) -> f32 {
        self.description_height
    }

    /// Height of the spacer added above the description block so every
    /// description in the row lines up.
    pub fn description_spacing(&self) -> f32 {
        self.description_spacing
    }

    pub fn ports(&self) -> &PortMap {
        &self.ports
    }

    /// Moves the node so its top-left corner is at `position`.
    pub fn move_to(&mut self, position: Point) {
        self.position = position;
    }

    pub fn set_description_spacing(&mut self, spacing: f32) {
        self.description_spacing = spacing;
    }

    /// Returns the document position of `port`, or `None` if the node has no
    /// such port.
    pub fn document_point(&self, port: Port) -> Option<Point> {
        self.ports
            .get(port)
            .map(|offset| self.position.add_point(offset))
    }
}
