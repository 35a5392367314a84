//! Geometric value types consumed by drawing surfaces.
//!
//! All coordinates are logical units of the chart's fixed view box, with the
//! origin in the top-left corner and `y` growing downwards.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub start: Point,
    pub end: Point,
}

impl Line {
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }
}

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub origin: Point,
    pub width: f64,
    pub height: f64,
}

impl Rectangle {
    /// Bottom-right corner.
    pub fn far_corner(&self) -> Point {
        Point::new(self.origin.x + self.width, self.origin.y + self.height)
    }
}

/// The small fixed palette the chart uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    /// Positive bars.
    Green,
    /// Negative and zero bars.
    Red,
    /// Axes and labels.
    Black,
}

impl Color {
    /// SVG/CSS color keyword.
    pub fn svg_name(self) -> &'static str {
        match self {
            Color::Green => "green",
            Color::Red => "red",
            Color::Black => "black",
        }
    }

    /// sRGB components of the CSS keyword (`green` is `#008000`).
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Color::Green => (0, 128, 0),
            Color::Red => (255, 0, 0),
            Color::Black => (0, 0, 0),
        }
    }
}

/// A single line of text anchored at its left baseline point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLabel {
    pub position: Point,
    pub text: String,
    pub font_size: f64,
}
