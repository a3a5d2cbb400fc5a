//! Layout of ladder diagrams.
//!
//! - [`row`] - serpentine packing of one rung's node chain
//! - [`pool`] - header normalisation and per-lane layout of the whole pool
//! - [`stack`] - ordering and vertical stacking of lanes
//! - [`route`] - orthogonal routes between linked ports

pub mod pool;
pub mod route;
pub mod row;
pub mod stack;

pub use pool::{Arrangement, LaneOutcome, PoolLayout};
pub use route::{Route, route_link, shares_row};
pub use row::{ARROW_ALLOWANCE, RowLayout, RowOutcome};
pub use stack::{LaneArranger, StackArranger};
