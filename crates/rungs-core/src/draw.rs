//! Drawing primitives shared by the layout engine and the SVG exporter.
//!
//! - [`StrokeDefinition`] - stroke color, width and dash pattern
//! - [`LayeredOutput`] - SVG nodes grouped by z-order layer
//! - [`GeometryPath`] - a link outline plus its chevron decorations
//! - [`Chevrons`] - builds a [`GeometryPath`] from an orthogonal route

mod chevron;
mod layer;
mod path;
mod stroke;

pub use chevron::{ARROW_LEN, ARROW_SPACING, ARROW_WIDTH, Chevrons, DESTINATION_CLEARANCE, Heading};
pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use path::{Figure, GeometryPath};
pub use stroke::{StrokeDefinition, StrokeStyle};
