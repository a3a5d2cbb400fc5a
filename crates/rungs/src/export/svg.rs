//! SVG rendering of laid out ladder diagrams.
//!
//! Every drawable is pushed into a [`LayeredOutput`] so lane backgrounds
//! end up under rails, rails under nodes, and links and text on top,
//! whatever order lanes and links are visited in.

use std::{fs::File, io::Write, path::Path};

use log::{debug, error, info, warn};
use svg::{Document, node::element as svg_element};

use rungs_core::{
    apply_stroke,
    color::Color,
    draw::{Chevrons, LayeredOutput, RenderLayer, StrokeDefinition},
    geometry::{Bounds, Point, Size},
};

use crate::{
    RungsError,
    config::{LayoutConfig, StyleConfig},
    layout::{route_link, shares_row},
    model::{Diagram, Lane, Link},
};

/// Blank space around the diagram.
const DOCUMENT_MARGIN: f32 = 10.0;

const FONT_SIZE: f32 = 12.0;

/// Colors resolved once per render.
#[derive(Debug, Clone, Copy)]
struct Palette {
    background: Option<Color>,
    rail: Color,
    error_rail: Color,
    node_fill: Color,
    header_fill: Color,
}

impl Palette {
    fn from_style(style: &StyleConfig) -> Result<Self, RungsError> {
        Ok(Self {
            background: style.background_color().map_err(RungsError::Export)?,
            rail: style.rail_color().map_err(RungsError::Export)?,
            error_rail: style.error_rail_color().map_err(RungsError::Export)?,
            node_fill: style.node_fill_color().map_err(RungsError::Export)?,
            header_fill: style.header_fill_color().map_err(RungsError::Export)?,
        })
    }

    fn lane_color(&self, lane: &Lane) -> Color {
        if lane.diagnostics() > 0 {
            self.error_rail
        } else {
            self.rail
        }
    }
}

fn line(from: Point, to: Point, stroke: &StrokeDefinition) -> svg_element::Line {
    let line = svg_element::Line::new()
        .set("x1", from.x())
        .set("y1", from.y())
        .set("x2", to.x())
        .set("y2", to.y());
    apply_stroke!(line, stroke)
}

fn rectangle(bounds: Bounds, fill: Option<Color>) -> svg_element::Rectangle {
    let rect = svg_element::Rectangle::new()
        .set("x", bounds.min_x())
        .set("y", bounds.min_y())
        .set("width", bounds.width())
        .set("height", bounds.height());
    match fill {
        Some(color) => rect
            .set("fill", color.to_string())
            .set("fill-opacity", color.alpha()),
        None => rect.set("fill", "none"),
    }
}

fn text(content: &str, at: Point, anchor: &str) -> svg_element::Text {
    svg_element::Text::new(content)
        .set("x", at.x())
        .set("y", at.y())
        .set("text-anchor", anchor)
        .set("dominant-baseline", "central")
        .set("font-family", "sans-serif")
        .set("font-size", FONT_SIZE)
}

/// Renders a [`Diagram`] after it has been laid out.
///
/// # Examples
///
/// ```
/// # use rungs::{config::AppConfig, export::SvgExporter, layout::PoolLayout, model::{Diagram, Lane}};
/// # use rungs_core::identifier::Id;
/// let config = AppConfig::default();
/// let mut diagram = Diagram::new().with_lane(Lane::new(Id::new("rung_0")));
/// PoolLayout::new(config.layout()).relayout(&mut diagram, None);
///
/// let svg = SvgExporter::new(config.layout(), config.style())
///     .render(&diagram)
///     .unwrap();
/// assert!(svg.contains("data-layer=\"rail\""));
/// ```
pub struct SvgExporter<'a> {
    layout: &'a LayoutConfig,
    style: &'a StyleConfig,
    chevrons: Chevrons,
}

impl<'a> SvgExporter<'a> {
    pub fn new(layout: &'a LayoutConfig, style: &'a StyleConfig) -> Self {
        Self {
            layout,
            style,
            chevrons: Chevrons::default(),
        }
    }

    /// Renders the diagram to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`RungsError::Export`] if a configured color is invalid.
    pub fn render(&self, diagram: &Diagram) -> Result<String, RungsError> {
        Ok(self.document(diagram)?.to_string())
    }

    /// Renders the diagram and writes it to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`RungsError::Export`] if a configured color is invalid and
    /// [`RungsError::Io`] if the file cannot be written.
    pub fn write(&self, diagram: &Diagram, path: impl AsRef<Path>) -> Result<(), RungsError> {
        let path = path.as_ref();
        let doc = self.document(diagram)?;

        info!(path:? = path; "Creating SVG file");
        let mut file = File::create(path).map_err(|err| {
            error!(path:? = path, err:err; "Failed to create SVG file");
            RungsError::Io(err)
        })?;
        write!(file, "{doc}").map_err(|err| {
            error!(path:? = path, err:err; "Failed to write SVG content");
            RungsError::Io(err)
        })?;

        Ok(())
    }

    fn document(&self, diagram: &Diagram) -> Result<Document, RungsError> {
        let palette = Palette::from_style(self.style)?;
        let bounds = diagram.bounds().unwrap_or_default();
        let width = bounds.width() + 2.0 * DOCUMENT_MARGIN;
        let height = bounds.height() + 2.0 * DOCUMENT_MARGIN;
        let view_x = bounds.min_x() - DOCUMENT_MARGIN;
        let view_y = bounds.min_y() - DOCUMENT_MARGIN;

        let mut output = LayeredOutput::new();
        if let Some(background) = palette.background {
            let area = Bounds::new_from_top_left(
                Point::new(view_x, view_y),
                Size::new(width, height),
            );
            output.add_to_layer(
                RenderLayer::Lane,
                Box::new(rectangle(area, Some(background))),
            );
        }

        for lane in diagram.lanes() {
            output.merge(self.render_lane(lane, &palette));
        }
        for (id, link) in diagram.links().iter() {
            match self.render_link(diagram, link) {
                Some(layer) => output.merge(layer),
                None => debug!(link:% = id; "Link not rendered"),
            }
        }

        let doc = output.render().into_iter().fold(
            Document::new()
                .set("viewBox", format!("{view_x} {view_y} {width} {height}"))
                .set("width", width)
                .set("height", height),
            |doc, group| doc.add(group),
        );
        debug!(width, height; "SVG document rendered");
        Ok(doc)
    }

    fn render_lane(&self, lane: &Lane, palette: &Palette) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let (Some(content), Some(header)) = (lane.content(), lane.header_bounds()) else {
            warn!(lane:% = lane.id(); "Lane has no content placeholder, not rendered");
            return output;
        };
        let color = palette.lane_color(lane);
        let outline = StrokeDefinition::solid(color.with_alpha(0.3), 1.0);
        let rail = StrokeDefinition::solid(color, 1.0);

        let header_rect = rectangle(header, Some(palette.header_fill));
        output.add_to_layer(RenderLayer::Lane, Box::new(apply_stroke!(header_rect, &outline)));
        output.add_to_layer(
            RenderLayer::Lane,
            Box::new(apply_stroke!(rectangle(content, None), &outline)),
        );

        // Labels share one slot so they line up across lanes
        let label_x = match lane.header().text_slot_width() {
            Some(slot) => header.min_x() + (header.width() - slot).max(0.0) / 2.0,
            None => header.min_x() + 4.0,
        };
        let label_y = header.min_y() + header.height() / 2.0;
        output.add_to_layer(
            RenderLayer::Text,
            Box::new(text(lane.header().label(), Point::new(label_x, label_y), "start")),
        );

        let power_rail = StrokeDefinition::solid(color, 2.0);
        for x in [content.min_x(), content.max_x()] {
            output.add_to_layer(
                RenderLayer::Rail,
                Box::new(line(
                    Point::new(x, content.min_y()),
                    Point::new(x, content.max_y()),
                    &power_rail,
                )),
            );
        }

        let rails = lane.rails();
        let left_y = content.min_y() + rails.left.offset_y;
        output.add_to_layer(
            RenderLayer::Rail,
            Box::new(line(
                Point::new(content.min_x(), left_y),
                Point::new(content.min_x() + rails.left.width, left_y),
                &rail,
            )),
        );
        if rails.right.width > 0.0 {
            let right_y = content.min_y() + rails.right.offset_y;
            output.add_to_layer(
                RenderLayer::Rail,
                Box::new(line(
                    Point::new(content.max_x() - rails.right.width, right_y),
                    Point::new(content.max_x(), right_y),
                    &rail,
                )),
            );
        }

        for node in lane.nodes() {
            let bounds = node.bounds();
            let rect = rectangle(bounds, Some(palette.node_fill)).set("data-node", node.id().to_string());
            output.add_to_layer(RenderLayer::Node, Box::new(apply_stroke!(rect, &rail)));
            let center = Point::new(
                bounds.min_x() + bounds.width() / 2.0,
                bounds.min_y() + bounds.height() / 2.0,
            );
            output.add_to_layer(
                RenderLayer::Text,
                Box::new(text(&node.id().to_string(), center, "middle")),
            );
        }

        output
    }

    /// Decorated path of one link, or `None` if an endpoint or port is
    /// missing.
    fn render_link(&self, diagram: &Diagram, link: &Link) -> Option<LayeredOutput> {
        let from_node = diagram.node(link.from())?;
        let to_node = diagram.node(link.to())?;
        let Some(from) = from_node.document_point(link.from_port()) else {
            warn!(node:% = link.from(), port:% = link.from_port(); "Link source port missing");
            return None;
        };
        let Some(to) = to_node.document_point(link.to_port()) else {
            warn!(node:% = link.to(), port:% = link.to_port(); "Link target port missing");
            return None;
        };

        let route = route_link(
            from,
            to,
            shares_row(from_node, to_node),
            self.layout.route_from_end(),
            self.layout.route_to_end(),
        );
        let path = self
            .chevrons
            .decorate(&route.points, route.wrapping, Some(to_node.bounds()));
        if path.is_empty() {
            return None;
        }

        let stroke = StrokeDefinition::solid(link.color(), 1.0);
        let element = svg_element::Path::new()
            .set("d", path.to_svg_data())
            .set("fill", "none");
        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Link, Box::new(apply_stroke!(element, &stroke)));
        Some(output)
    }
}

#[cfg(test)]
mod tests {
    use rungs_core::identifier::Id;

    use super::*;
    use crate::{
        config::AppConfig,
        layout::PoolLayout,
        model::{Direction, Node},
    };

    fn laid_out(nodes: Vec<Node>, diagnostics: usize) -> Diagram {
        let mut diagram = Diagram::new().with_lane(
            Lane::new(Id::new("svg_lane"))
                .with_nodes(nodes)
                .with_diagnostics(diagnostics),
        );
        PoolLayout::new(AppConfig::default().layout()).relayout(&mut diagram, Some(600.0));
        diagram
    }

    fn chain(count: usize) -> Vec<Node> {
        (0..count)
            .map(|idx| {
                Node::new(
                    Id::indexed("svg_n", idx),
                    Direction::In,
                    Size::new(120.0, 40.0),
                )
            })
            .collect()
    }

    #[test]
    fn test_render_layers_in_order() {
        let config = AppConfig::default();
        let diagram = laid_out(chain(2), 0);
        let svg = SvgExporter::new(config.layout(), config.style())
            .render(&diagram)
            .unwrap();

        let lane = svg.find("data-layer=\"lane\"").unwrap();
        let rail = svg.find("data-layer=\"rail\"").unwrap();
        let node = svg.find("data-layer=\"node\"").unwrap();
        let link = svg.find("data-layer=\"link\"").unwrap();
        assert!(lane < rail && rail < node && node < link);
        assert!(svg.contains("data-node=\"svg_n_0\""));
    }

    #[test]
    fn test_wrapped_links_have_chevrons() {
        let config = AppConfig::default();
        // Five 120 wide nodes cannot share a 550 wide rung
        let diagram = laid_out(chain(5), 0);
        let svg = SvgExporter::new(config.layout(), config.style())
            .render(&diagram)
            .unwrap();

        let paths: Vec<&str> = svg.split("<path").skip(1).collect();
        assert_eq!(paths.len(), 4);
        assert!(paths.iter().any(|path| path.matches('M').count() > 2));
    }

    fn link_data(svg: &str) -> Vec<&str> {
        svg.split("<path")
            .skip(1)
            .filter_map(|path| path.split(" d=\"").nth(1)?.split('"').next())
            .collect()
    }

    #[test]
    fn test_mixed_heights_on_one_row_do_not_wrap() {
        let config = AppConfig::default();
        let mut diagram = Diagram::new().with_lane(
            Lane::new(Id::new("svg_mixed"))
                .with_node(Node::new(Id::new("svg_short"), Direction::In, Size::new(60.0, 40.0)))
                .with_node(Node::new(Id::new("svg_tall"), Direction::In, Size::new(60.0, 60.0))),
        );
        PoolLayout::new(config.layout()).relayout(&mut diagram, Some(1200.0));

        let short = diagram.node(Id::new("svg_short")).unwrap();
        let tall = diagram.node(Id::new("svg_tall")).unwrap();
        assert_eq!(short.position().y(), tall.position().y());

        let svg = SvgExporter::new(config.layout(), config.style())
            .render(&diagram)
            .unwrap();
        let data = link_data(&svg);
        assert_eq!(data.len(), 1);
        // Outline only: no loop, no forced chevron
        assert_eq!(data[0].matches('M').count(), 1);
        assert!(!data[0].contains('-'));
    }

    #[test]
    fn test_error_color_for_diagnostics() {
        let config = AppConfig::default();
        let diagram = laid_out(chain(2), 3);
        let svg = SvgExporter::new(config.layout(), config.style())
            .render(&diagram)
            .unwrap();
        let error = Color::new("#AA0000").unwrap().to_string();
        assert!(svg.contains(&error));
    }

    #[test]
    fn test_invalid_style_color_is_export_error() {
        let config = AppConfig::from_toml_str("[style]\nnode_fill_color = \"bogus\"").unwrap();
        let diagram = laid_out(chain(1), 0);
        let err = SvgExporter::new(config.layout(), config.style())
            .render(&diagram)
            .unwrap_err();
        assert!(matches!(err, RungsError::Export(_)));
    }

    #[test]
    fn test_write_to_file() {
        let config = AppConfig::default();
        let diagram = laid_out(chain(3), 0);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ladder.svg");

        SvgExporter::new(config.layout(), config.style())
            .write(&diagram, &path)
            .unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("<svg"));
    }
}
