//! Layer-based z-ordering for SVG output.
//!
//! Lane backgrounds must sit under rails, rails under nodes and links above
//! everything but text. Drawables push their SVG nodes into a
//! [`LayeredOutput`] tagged with a [`RenderLayer`]; rendering emits one `<g>`
//! per layer in declaration order.
//!
//! ```
//! # use rungs_core::draw::{RenderLayer, LayeredOutput};
//! # use svg::node::element::{Line, Rectangle};
//! let mut output = LayeredOutput::new();
//! output.add_to_layer(RenderLayer::Link, Box::new(Line::new()));
//! output.add_to_layer(RenderLayer::Lane, Box::new(Rectangle::new()));
//!
//! // Lane renders first even though it was added last
//! assert_eq!(output.render().len(), 2);
//! ```

use svg::node::element as svg_element;

/// Type alias for boxed SVG nodes.
pub type SvgNode = Box<dyn svg::Node>;

/// Rendering layers, bottom to top in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    /// Lane content areas and header backgrounds
    Lane,
    /// Left and right rails plus their connector lines
    Rail,
    /// Node placeholders
    Node,
    /// Link outlines and chevrons
    Link,
    /// Header labels and node captions
    Text,
}

impl RenderLayer {
    /// Returns the value written to the group's `data-layer` attribute.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Lane => "lane",
            Self::Rail => "rail",
            Self::Node => "node",
            Self::Link => "link",
            Self::Text => "text",
        }
    }
}

/// SVG nodes tagged with the layer they belong to.
#[derive(Debug, Default)]
pub struct LayeredOutput {
    items: Vec<(RenderLayer, SvgNode)>,
}

impl LayeredOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `node` to `layer`, after anything already in that layer.
    pub fn add_to_layer(&mut self, layer: RenderLayer, node: SvgNode) {
        self.items.push((layer, node));
    }

    /// Moves every node of `other` into this output.
    pub fn merge(&mut self, other: LayeredOutput) {
        self.items.extend(other.items);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Consumes the output and returns one `<g data-layer=..>` per non-empty
    /// layer, bottom layer first. Insertion order is kept within a layer.
    pub fn render(mut self) -> Vec<SvgNode> {
        self.items.sort_by_key(|(layer, _)| *layer);

        let mut buckets: Vec<(RenderLayer, Vec<SvgNode>)> = Vec::new();
        for (layer, node) in self.items {
            match buckets.last_mut() {
                Some((current, nodes)) if *current == layer => nodes.push(node),
                _ => buckets.push((layer, vec![node])),
            }
        }

        buckets
            .into_iter()
            .map(|(layer, nodes)| {
                let group = nodes.into_iter().fold(
                    svg_element::Group::new().set("data-layer", layer.name()),
                    |group, node| group.add(node),
                );
                Box::new(group) as SvgNode
            })
            .collect()
    }
}
