//! Rungs Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Rungs ladder
//! diagram engine. It includes:
//!
//! - **Identifiers**: String-interned identifiers ([`identifier::Id`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Points, sizes and bounds ([`geometry`] module)
//! - **Draw**: Strokes, layered SVG output and decorated link paths ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod identifier;
