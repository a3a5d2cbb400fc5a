//! Diagram model mutated by the layout engine.
//!
//! - [`Node`] - a measured, positioned element with typed ports
//! - [`Link`] and [`LinkSet`] - directional links between node ports
//! - [`Lane`] - one rung: header, content placeholder, rails and an ordered chain of nodes
//! - [`Diagram`] - the pool of lanes plus every link

mod diagram;
mod lane;
mod link;
mod node;

pub use diagram::Diagram;
pub use lane::{Header, Lane, Rail, Rails};
pub use link::{Link, LinkId, LinkSet};
pub use node::{Direction, Node, Port, PortMap};
