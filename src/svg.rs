//! Inline SVG output with a fixed logical view box.
//!
//! Coordinates are written with full `f64` precision (shortest round-trip form),
//! so `37.5` stays `37.5`; the element scales to whatever box the page gives it.

use crate::error::SurfaceError;
use crate::geometry::{Color, Line, Rectangle, TextLabel};
use crate::surface::DrawingSurface;
use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::path::Path;

/// An `<svg>` element under construction.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgDocument {
    width: f64,
    height: f64,
    id: Option<String>,
    body: String,
}

impl SvgDocument {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            id: None,
            body: String::new(),
        }
    }

    /// Set the element id (e.g. `graph` when embedded into a report).
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    /// Serialize the element.
    pub fn to_svg_string(&self) -> String {
        let mut out = String::with_capacity(self.body.len() + 160);
        out.push_str("<svg xmlns=\"http://www.w3.org/2000/svg\"");
        if let Some(id) = &self.id {
            let _ = write!(out, " id=\"{}\"", escape_xml(id));
        }
        let _ = writeln!(
            out,
            " viewBox=\"0 0 {} {}\" preserveAspectRatio=\"none\">",
            self.width, self.height
        );
        out.push_str(&self.body);
        out.push_str("</svg>\n");
        out
    }

    /// Write a standalone `.svg` file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_svg_string())
            .with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }
}

impl DrawingSurface for SvgDocument {
    fn draw_line(&mut self, line: &Line) -> Result<(), SurfaceError> {
        let _ = writeln!(
            self.body,
            "  <line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\" stroke-width=\"1\"/>",
            line.start.x,
            line.start.y,
            line.end.x,
            line.end.y,
            Color::Black.svg_name()
        );
        Ok(())
    }

    fn draw_rect(&mut self, rect: &Rectangle, color: Color) -> Result<(), SurfaceError> {
        let _ = writeln!(
            self.body,
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\"/>",
            rect.origin.x,
            rect.origin.y,
            rect.width,
            rect.height,
            color.svg_name()
        );
        Ok(())
    }

    fn draw_text(&mut self, label: &TextLabel) -> Result<(), SurfaceError> {
        let _ = writeln!(
            self.body,
            "  <text x=\"{}\" y=\"{}\" font-size=\"{}\" font-family=\"sans-serif\" fill=\"{}\">{}</text>",
            label.position.x,
            label.position.y,
            label.font_size,
            Color::Black.svg_name(),
            escape_xml(&label.text)
        );
        Ok(())
    }
}

/// Escape the five XML special characters.
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
