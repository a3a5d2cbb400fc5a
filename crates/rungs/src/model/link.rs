//! Directional links between node ports.

use std::{collections::HashSet, fmt};

use indexmap::IndexMap;

use rungs_core::{color::Color, identifier::Id};

use super::Port;

/// Key of a link in a [`LinkSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LinkId(usize);

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "link#{}", self.0)
    }
}

/// A link from one node's `Out` port to the next node's `In` port.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    from: Id,
    to: Id,
    from_port: Port,
    to_port: Port,
    color: Color,
}

impl Link {
    pub fn new(from: Id, to: Id, color: Color) -> Self {
        Self {
            from,
            to,
            from_port: Port::Out,
            to_port: Port::In,
            color,
        }
    }

    pub fn from(&self) -> Id {
        self.from
    }

    pub fn to(&self) -> Id {
        self.to
    }

    pub fn from_port(&self) -> Port {
        self.from_port
    }

    pub fn to_port(&self) -> Port {
        self.to_port
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

/// Insertion-ordered link store.
///
/// Identifiers are never reused, so a [`LinkId`] held across a relayout
/// either still names the same link or nothing.
///
/// # Examples
///
/// ```
/// # use rungs::model::{Link, LinkSet};
/// # use rungs_core::{color::Color, identifier::Id};
/// let mut links = LinkSet::new();
/// let (a, b) = (Id::new("a"), Id::new("b"));
/// let id = links.add(Link::new(a, b, Color::default()));
///
/// assert_eq!(links.outgoing(a), Some(id));
/// links.remove_outgoing(a);
/// assert!(links.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct LinkSet {
    links: IndexMap<LinkId, Link>,
    next_id: usize,
}

impl LinkSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `link` and returns its new identifier.
    pub fn add(&mut self, link: Link) -> LinkId {
        let id = LinkId(self.next_id);
        self.next_id += 1;
        self.links.insert(id, link);
        id
    }

    /// Removes a link. Removing an unknown identifier is a no-op.
    pub fn remove(&mut self, id: LinkId) -> Option<Link> {
        self.links.shift_remove(&id)
    }

    pub fn get(&self, id: LinkId) -> Option<&Link> {
        self.links.get(&id)
    }

    /// Identifier of the first link leaving `node`.
    pub fn outgoing(&self, node: Id) -> Option<LinkId> {
        self.links
            .iter()
            .find(|(_, link)| link.from == node)
            .map(|(id, _)| *id)
    }

    /// Identifier of the first link entering `node`.
    pub fn incoming(&self, node: Id) -> Option<LinkId> {
        self.links
            .iter()
            .find(|(_, link)| link.to == node)
            .map(|(id, _)| *id)
    }

    /// Removes every link leaving `node` and returns how many were removed.
    pub fn remove_outgoing(&mut self, node: Id) -> usize {
        let before = self.links.len();
        self.links.retain(|_, link| link.from != node);
        before - self.links.len()
    }

    /// Keeps only the links whose endpoints are both in `nodes`.
    pub fn retain_nodes(&mut self, nodes: &HashSet<Id>) -> usize {
        self.retain(|link| nodes.contains(&link.from) && nodes.contains(&link.to))
    }

    /// Keeps only the links for which `keep` returns `true` and returns how
    /// many were dropped.
    pub fn retain(&mut self, mut keep: impl FnMut(&Link) -> bool) -> usize {
        let before = self.links.len();
        self.links.retain(|_, link| keep(link));
        before - self.links.len()
    }

    /// Links in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (LinkId, &Link)> {
        self.links.iter().map(|(id, link)| (*id, link))
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}
