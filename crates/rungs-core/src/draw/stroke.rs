//! Stroke definitions for rails, links and lane outlines.
//!
//! Use the [`apply_stroke!`](crate::apply_stroke!) macro to copy every stroke
//! attribute onto an SVG element:
//!
//! ```
//! use rungs_core::draw::StrokeDefinition;
//! use rungs_core::color::Color;
//! use svg::node::element as svg_element;
//!
//! let stroke = StrokeDefinition::solid(Color::new("#000").unwrap(), 1.0);
//! let rail = svg_element::Line::new().set("x1", 0).set("x2", 16);
//! let rail = rungs_core::apply_stroke!(rail, &stroke);
//! ```

use std::str::FromStr;

use crate::color::Color;

/// Dash pattern of a stroke.
///
/// | Variant | `stroke-dasharray` |
/// |---------|--------------------|
/// | `Solid` | none |
/// | `Dashed` | `5,5` |
/// | `Dotted` | `2,3` |
/// | `Custom(p)` | `p` |
#[derive(Debug, Default, Clone, PartialEq)]
pub enum StrokeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    Custom(String),
}

impl FromStr for StrokeStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "solid" => Ok(Self::Solid),
            "dashed" => Ok(Self::Dashed),
            "dotted" => Ok(Self::Dotted),
            "" => Err("empty stroke style".to_string()),
            // Anything else is passed through as a raw dasharray
            _ => Ok(Self::Custom(s.to_string())),
        }
    }
}

impl StrokeStyle {
    /// Returns the SVG dasharray value for this style, or None for solid lines
    pub fn to_svg_value(&self) -> Option<String> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some("5,5".to_string()),
            Self::Dotted => Some("2,3".to_string()),
            Self::Custom(pattern) => Some(pattern.clone()),
        }
    }
}

/// Color, width and dash pattern used to stroke a line.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
    style: StrokeStyle,
}

impl Default for StrokeDefinition {
    fn default() -> Self {
        Self::solid(Color::default(), 1.0)
    }
}

impl StrokeDefinition {
    /// Creates a solid stroke
    pub fn solid(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            style: StrokeStyle::Solid,
        }
    }

    /// Creates a dashed stroke
    pub fn dashed(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            style: StrokeStyle::Dashed,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    /// Returns a copy of this stroke with a different color
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn set_style(&mut self, style: StrokeStyle) {
        self.style = style;
    }
}

/// Sets `stroke`, `stroke-opacity`, `stroke-width` and, for patterned
/// strokes, `stroke-dasharray` on an SVG element.
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let mut elem = $element
            .set("stroke", $stroke.color().to_string())
            .set("stroke-opacity", $stroke.color().alpha())
            .set("stroke-width", $stroke.width());

        if let Some(dasharray) = $stroke.style().to_svg_value() {
            elem = elem.set("stroke-dasharray", dasharray);
        }

        elem
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stroke_default() {
        let stroke = StrokeDefinition::default();
        assert_eq!(stroke.width(), 1.0);
        assert_eq!(stroke.color(), Color::default());
        assert_eq!(*stroke.style(), StrokeStyle::Solid);
    }

    #[test]
    fn test_stroke_dashed() {
        let stroke = StrokeDefinition::dashed(Color::default(), 2.0);
        assert_eq!(stroke.style().to_svg_value(), Some("5,5".to_string()));
    }

    #[test]
    fn test_stroke_style_from_str() {
        assert_eq!("solid".parse::<StrokeStyle>(), Ok(StrokeStyle::Solid));
        assert_eq!("dotted".parse::<StrokeStyle>(), Ok(StrokeStyle::Dotted));
        assert_eq!(
            "4,2".parse::<StrokeStyle>(),
            Ok(StrokeStyle::Custom("4,2".to_string()))
        );
        assert!("".parse::<StrokeStyle>().is_err());
    }

    #[test]
    fn test_apply_stroke_sets_attributes() {
        let stroke = StrokeDefinition::dashed(Color::default(), 1.5);
        let line = svg::node::element::Line::new();
        let line = crate::apply_stroke!(line, &stroke);
        let rendered = line.to_string();

        assert!(rendered.contains("stroke-width=\"1.5\""));
        assert!(rendered.contains("stroke-dasharray=\"5,5\""));
    }
}
