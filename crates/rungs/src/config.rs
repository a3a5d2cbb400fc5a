//! Configuration types for ladder diagram layout and rendering.
//!
//! All types implement [`serde::Deserialize`] and default every missing
//! field, so a partial TOML document only overrides what it names.
//!
//! - [`AppConfig`] - Top-level configuration combining layout and style settings.
//! - [`LayoutConfig`] - Spacing and sizing constants used by the row and pool layouts.
//! - [`StyleConfig`] - Colors used by the SVG exporter.
//!
//! # Example
//!
//! ```
//! # use rungs::config::AppConfig;
//! let config = AppConfig::from_toml_str(
//!     r#"
//!     [layout]
//!     spacing_width = 8.0
//!
//!     [style]
//!     rail_color = "navy"
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.layout().spacing().width(), 8.0);
//! assert_eq!(config.layout().min_rung_height(), 80.0);
//! assert!(config.style().rail_color().is_ok());
//! ```

use std::{fs, path::Path};

use log::{debug, info};
use serde::Deserialize;

use rungs_core::{color::Color, geometry::Size};

use crate::RungsError;

/// Top-level configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its two sections.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`RungsError::Config`] if the text is not valid TOML or a
    /// field has the wrong type.
    pub fn from_toml_str(source: &str) -> Result<Self, RungsError> {
        let config: Self = toml::from_str(source)?;
        debug!(config:?; "Configuration parsed");
        Ok(config)
    }

    /// Reads and parses a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`RungsError::Io`] if the file cannot be read and
    /// [`RungsError::Config`] if its content is invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RungsError> {
        let path = path.as_ref();
        info!(path:? = path; "Loading configuration");
        let source = fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Spacing and sizing constants for the row and pool layouts.
///
/// The defaults are the calibrated values of the ladder style; changing
/// them changes every rendered diagram.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Horizontal gap unit between nodes and around rails.
    spacing_width: f32,

    /// Vertical gap between wrapped rows.
    spacing_height: f32,

    /// Minimum content height of any rung.
    min_rung_height: f32,

    /// Content width used when the viewport width is unknown.
    min_rung_width: f32,

    /// Extra height added below the last row of a rung.
    rung_separation: f32,

    /// Vertical rail offset used before a rung has been laid out.
    rung_offset: f32,

    /// Minimum width of a lane header.
    min_header_width: f32,

    /// Space reserved at the right of the viewport.
    viewport_margin: f32,

    /// Left rail width kept when the first node sits left of the content edge.
    rail_width: f32,

    /// Length of the first horizontal run of a wrapped link.
    route_from_end: f32,

    /// Length of the last horizontal run of a wrapped link.
    route_to_end: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            spacing_width: 16.0,
            spacing_height: 40.0,
            min_rung_height: 80.0,
            min_rung_width: 1000.0,
            rung_separation: 40.0,
            rung_offset: 40.0,
            min_header_width: 50.0,
            viewport_margin: 18.0,
            rail_width: 16.0,
            route_from_end: 26.0,
            route_to_end: 16.0,
        }
    }
}

impl LayoutConfig {
    /// Returns a copy with a different node spacing.
    pub fn with_spacing(mut self, spacing: Size) -> Self {
        self.spacing_width = spacing.width();
        self.spacing_height = spacing.height();
        self
    }

    /// Horizontal and vertical spacing between nodes and rows.
    pub fn spacing(&self) -> Size {
        Size::new(self.spacing_width, self.spacing_height)
    }

    pub fn min_rung_height(&self) -> f32 {
        self.min_rung_height
    }

    pub fn min_rung_width(&self) -> f32 {
        self.min_rung_width
    }

    pub fn rung_separation(&self) -> f32 {
        self.rung_separation
    }

    pub fn rung_offset(&self) -> f32 {
        self.rung_offset
    }

    pub fn min_header_width(&self) -> f32 {
        self.min_header_width
    }

    pub fn viewport_margin(&self) -> f32 {
        self.viewport_margin
    }

    /// Default width of the left rail.
    pub fn rail_width(&self) -> f32 {
        self.rail_width
    }

    pub fn route_from_end(&self) -> f32 {
        self.route_from_end
    }

    pub fn route_to_end(&self) -> f32 {
        self.route_to_end
    }
}

/// Colors used when exporting a diagram.
///
/// Colors are kept as strings until they are used so an invalid value in a
/// configuration file only fails the render that needs it.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Document background, transparent when unset.
    background_color: Option<String>,

    /// Rails and links of healthy lanes.
    rail_color: String,

    /// Rails and links of lanes that carry diagnostics.
    error_rail_color: String,

    /// Fill of node placeholders.
    node_fill_color: String,

    /// Fill of lane headers.
    header_fill_color: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: None,
            rail_color: "#000".to_string(),
            error_rail_color: "#AA0000".to_string(),
            node_fill_color: "white".to_string(),
            header_fill_color: "#F0F0F0".to_string(),
        }
    }
}

fn parse_color(value: &str, field: &str) -> Result<Color, String> {
    Color::new(value).map_err(|err| format!("Invalid {field} in config: {err}"))
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_deref()
            .map(|color| parse_color(color, "background_color"))
            .transpose()
    }

    /// Returns the parsed rail and link [`Color`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn rail_color(&self) -> Result<Color, String> {
        parse_color(&self.rail_color, "rail_color")
    }

    /// Returns the parsed [`Color`] for lanes with diagnostics.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn error_rail_color(&self) -> Result<Color, String> {
        parse_color(&self.error_rail_color, "error_rail_color")
    }

    pub fn node_fill_color(&self) -> Result<Color, String> {
        parse_color(&self.node_fill_color, "node_fill_color")
    }

    pub fn header_fill_color(&self) -> Result<Color, String> {
        parse_color(&self.header_fill_color, "header_fill_color")
    }

    /// Color of a lane's rails and links: the error color when the lane has
    /// diagnostics, else the rail color.
    ///
    /// # Errors
    ///
    /// Returns an error if the selected color string cannot be parsed.
    pub fn lane_color(&self, diagnostics: usize) -> Result<Color, String> {
        if diagnostics > 0 {
            self.error_rail_color()
        } else {
            self.rail_color()
        }
    }
}
