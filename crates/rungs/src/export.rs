//! Export of laid out diagrams.

pub mod svg;

pub use self::svg::SvgExporter;
