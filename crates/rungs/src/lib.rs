//! Rungs - serpentine layout and link geometry for ladder-logic diagrams.
//!
//! A ladder diagram is a pool of lanes ("rungs"), each holding an ordered
//! chain of input and output nodes. The layout packs every chain into rows
//! that wrap within the lane width, keeps the left and right rails attached
//! to the first and last node, and rewrites the links between consecutive
//! nodes. Wrapped links are drawn as orthogonal routes decorated with
//! repeating chevrons.

pub mod config;
pub mod export;
pub mod layout;
pub mod model;

mod error;

pub use rungs_core::{color, draw, geometry, identifier};

pub use error::RungsError;

use std::path::Path;

use log::{debug, info};

use config::AppConfig;
use export::SvgExporter;
use layout::{Arrangement, PoolLayout};
use model::Diagram;

/// Entry point for laying out and rendering ladder diagrams.
///
/// # Examples
///
/// ```
/// use rungs::{DiagramBuilder, model::{Diagram, Direction, Lane, Node}};
/// use rungs::{geometry::Size, identifier::Id};
///
/// let mut diagram = Diagram::new().with_lane(
///     Lane::new(Id::new("rung_0"))
///         .with_node(Node::new(Id::new("XIC_1"), Direction::In, Size::new(60.0, 40.0)))
///         .with_node(Node::new(Id::new("OTE_1"), Direction::Out, Size::new(60.0, 40.0))),
/// );
///
/// let builder = DiagramBuilder::default();
/// builder.relayout(&mut diagram, Some(1200.0)).expect("Failed to lay out");
///
/// let svg = builder.render_svg(&diagram).expect("Failed to render");
/// assert!(svg.contains("</svg>"));
/// ```
#[derive(Debug, Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Lays out every lane of the diagram and stacks the lanes.
    ///
    /// `viewport_width` is the width available to the whole pool, headers
    /// included; `None` gives every lane the configured minimum width.
    ///
    /// # Errors
    ///
    /// Returns [`RungsError::Config`] if the configured rail colors are
    /// invalid.
    pub fn relayout(
        &self,
        diagram: &mut Diagram,
        viewport_width: Option<f32>,
    ) -> Result<Arrangement, RungsError> {
        let style = self.config.style();
        let rail_color = style.rail_color().map_err(RungsError::Config)?;
        let error_color = style.error_rail_color().map_err(RungsError::Config)?;

        let arrangement = PoolLayout::new(self.config.layout())
            .with_link_colors(rail_color, error_color)
            .relayout(diagram, viewport_width);

        debug!(lanes = arrangement.lanes.len(), links = diagram.links().len(); "Diagram laid out");
        Ok(arrangement)
    }

    /// Renders a laid out diagram to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`RungsError::Export`] if a configured color is invalid.
    pub fn render_svg(&self, diagram: &Diagram) -> Result<String, RungsError> {
        info!(lanes = diagram.lanes().len(); "Rendering SVG");
        let svg = SvgExporter::new(self.config.layout(), self.config.style()).render(diagram)?;
        info!("SVG rendered successfully");
        Ok(svg)
    }

    /// Renders a laid out diagram and writes it to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`RungsError::Export`] if a configured color is invalid and
    /// [`RungsError::Io`] if the file cannot be written.
    pub fn write_svg(&self, diagram: &Diagram, path: impl AsRef<Path>) -> Result<(), RungsError> {
        SvgExporter::new(self.config.layout(), self.config.style()).write(diagram, path)
    }
}
