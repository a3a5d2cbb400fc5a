//! The pool of lanes and the links between their nodes.

use std::collections::HashSet;

use rungs_core::{geometry::Bounds, identifier::Id};

use super::{Lane, LinkSet, Node};

/// A ladder diagram: lanes stacked top to bottom plus every link.
#[derive(Debug, Clone, Default)]
pub struct Diagram {
    lanes: Vec<Lane>,
    links: LinkSet,
}

impl Diagram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lane(mut self, lane: Lane) -> Self {
        self.lanes.push(lane);
        self
    }

    pub fn add_lane(&mut self, lane: Lane) {
        self.lanes.push(lane);
    }

    /// Lanes in their current stacking order.
    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    pub fn lanes_mut(&mut self) -> &mut [Lane] {
        &mut self.lanes
    }

    pub fn lane(&self, id: Id) -> Option<&Lane> {
        self.lanes.iter().find(|lane| lane.id() == id)
    }

    pub fn links(&self) -> &LinkSet {
        &self.links
    }

    pub fn links_mut(&mut self) -> &mut LinkSet {
        &mut self.links
    }

    /// Finds a node in any lane.
    pub fn node(&self, id: Id) -> Option<&Node> {
        self.lanes
            .iter()
            .flat_map(|lane| lane.nodes())
            .find(|node| node.id() == id)
    }

    /// Identifiers of every node in every lane.
    pub fn node_ids(&self) -> HashSet<Id> {
        self.lanes
            .iter()
            .flat_map(|lane| lane.nodes())
            .map(Node::id)
            .collect()
    }

    /// Smallest bounds containing every lane with a content placeholder.
    pub fn bounds(&self) -> Option<Bounds> {
        self.lanes
            .iter()
            .filter_map(Lane::bounds)
            .reduce(|acc, bounds| acc.merge(&bounds))
    }

    /// Lanes and links, borrowed together for layout.
    pub(crate) fn parts_mut(&mut self) -> (&mut Vec<Lane>, &mut LinkSet) {
        (&mut self.lanes, &mut self.links)
    }
}
