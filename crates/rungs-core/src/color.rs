//! Color handling for rails, links and lane decorations.
//!
//! [`Color`] wraps `DynamicColor` from the color crate so CSS color strings
//! from configuration can be parsed once and written back into SVG.

use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::DynamicColor;

/// A parsed CSS color.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl Color {
    /// Parses a CSS color string such as `"#AA0000"`, `"rgb(0, 0, 0)"` or `"black"`.
    ///
    /// # Errors
    ///
    /// Returns a message naming the offending input when it is not a valid
    /// CSS color.
    ///
    /// # Examples
    ///
    /// ```
    /// use rungs_core::color::Color;
    ///
    /// let rail = Color::new("#000").unwrap();
    /// let error = Color::new("#AA0000").unwrap();
    /// assert_ne!(rail, error);
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        DynamicColor::from_str(color_str)
            .map(|color| Self { color })
            .map_err(|err| format!("invalid color `{color_str}`: {err}"))
    }

    /// Returns the alpha component, between 0.0 and 1.0.
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }

    /// Returns a copy with a different alpha component.
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            color: self.color.with_alpha(alpha),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_color_new() {
        assert!(Color::new("#AA0000").is_ok());
        assert!(Color::new("rgba(0,0,0,0)").is_ok());

        let err = Color::new("not-a-color").unwrap_err();
        assert!(err.contains("not-a-color"));
    }

    #[test]
    fn test_color_alpha() {
        let transparent = Color::new("rgba(0,0,0,0)").unwrap();
        assert!(transparent.alpha().abs() < 0.001);

        let half = Color::default().with_alpha(0.5);
        assert!((half.alpha() - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_color_eq_hash() {
        let red1 = Color::new("#AA0000").unwrap();
        let red2 = Color::new("#AA0000").unwrap();
        let black = Color::default();

        let mut set = HashSet::new();
        set.insert(red1);
        assert!(set.contains(&red2));
        assert!(!set.contains(&black));
    }

    #[test]
    fn test_color_display_not_empty() {
        assert!(!Color::default().to_string().is_empty());
    }
}
