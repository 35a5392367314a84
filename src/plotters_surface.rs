//! Adapter that draws chart instructions onto any `plotters` drawing area.
//!
//! The chart works in a small logical view box (300 x 100 by default); this
//! surface scales it onto a pixel-sized backend so the same render can be
//! exported as PNG (`BitMapBackend`) or pixel-based SVG (`SVGBackend`).
//!
//! Usage:
//! ```ignore
//!     let root = BitMapBackend::new("chart.png", (1200, 400)).into_drawing_area();
//!     let mut surface = PlottersSurface::new(root, 300.0, 100.0)?;
//!     render_chart(&mut surface, &dataset, &ChartOptions::default())?;
//!     surface.present()?;
//! ```

use crate::chart::{ChartOptions, RenderedChart, render_chart};
use crate::error::SurfaceError;
use crate::geometry::{Color, Line, Point, Rectangle, TextLabel};
use crate::models::Dataset;
use crate::surface::{DrawingSurface, RecordingSurface};
use anyhow::{Result, anyhow};
use log::{info, warn};
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::drawing::{DrawingArea, IntoDrawingArea};
use plotters::element::{PathElement, Rectangle as PlotRect, Text};
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{Color as _, FontStyle, IntoFont, RGBColor, WHITE};
use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

/// Set once a "sans-serif" font was registered for the `ab_glyph` text path.
static FONT_READY: AtomicBool = AtomicBool::new(false);

/// Register a TTF/OTF file as the "sans-serif" family.
///
/// `ab_glyph` doesn't discover OS fonts, so bitmap output needs this before it
/// can draw the scale label. The font bytes live for the rest of the process.
pub fn register_font_file<P: AsRef<Path>>(path: P) -> Result<(), SurfaceError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)
        .map_err(|e| SurfaceError::Font(format!("{}: {}", path.display(), e)))?;
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    plotters::style::register_font("sans-serif", FontStyle::Normal, bytes)
        .map_err(|_| SurfaceError::Font(format!("{}: invalid font data", path.display())))?;
    FONT_READY.store(true, Ordering::SeqCst);
    Ok(())
}

pub fn font_registered() -> bool {
    FONT_READY.load(Ordering::SeqCst)
}

fn rgb(color: Color) -> RGBColor {
    let (r, g, b) = color.rgb();
    RGBColor(r, g, b)
}

/// A [`DrawingSurface`] backed by a `plotters` drawing area.
pub struct PlottersSurface<DB: DrawingBackend> {
    area: DrawingArea<DB, Shift>,
    scale_x: f64,
    scale_y: f64,
    text: bool,
}

impl<DB: DrawingBackend> PlottersSurface<DB> {
    /// Wrap `area`, clearing it to white. `logical_*` is the chart's view box.
    pub fn new(
        area: DrawingArea<DB, Shift>,
        logical_width: f64,
        logical_height: f64,
    ) -> Result<Self, SurfaceError> {
        area.fill(&WHITE)
            .map_err(|e| SurfaceError::Backend(format!("{:?}", e)))?;
        let (w, h) = area.dim_in_pixel();
        Ok(Self {
            area,
            scale_x: w as f64 / logical_width,
            scale_y: h as f64 / logical_height,
            text: true,
        })
    }

    /// Skip text instructions (bitmap backends without a registered font).
    pub fn without_text(mut self) -> Self {
        self.text = false;
        self
    }

    fn px(&self, p: Point) -> (i32, i32) {
        (
            (p.x * self.scale_x).round() as i32,
            (p.y * self.scale_y).round() as i32,
        )
    }

    /// Flush the drawing to the backend (writes files for file backends).
    pub fn present(self) -> Result<(), SurfaceError> {
        self.area
            .present()
            .map_err(|e| SurfaceError::Backend(format!("{:?}", e)))
    }
}

impl<DB: DrawingBackend> DrawingSurface for PlottersSurface<DB> {
    fn draw_line(&mut self, line: &Line) -> Result<(), SurfaceError> {
        let path = PathElement::new(
            vec![self.px(line.start), self.px(line.end)],
            rgb(Color::Black).stroke_width(1),
        );
        self.area
            .draw(&path)
            .map_err(|e| SurfaceError::Backend(format!("{:?}", e)))
    }

    fn draw_rect(&mut self, rect: &Rectangle, color: Color) -> Result<(), SurfaceError> {
        let bar = PlotRect::new(
            [self.px(rect.origin), self.px(rect.far_corner())],
            rgb(color).filled(),
        );
        self.area
            .draw(&bar)
            .map_err(|e| SurfaceError::Backend(format!("{:?}", e)))
    }

    fn draw_text(&mut self, label: &TextLabel) -> Result<(), SurfaceError> {
        if !self.text {
            return Ok(());
        }
        let size = (label.font_size * self.scale_y).max(1.0);
        let style = ("sans-serif", size)
            .into_font()
            .color(&rgb(Color::Black))
            .pos(Pos::new(HPos::Left, VPos::Bottom));
        let text = Text::new(label.text.as_str(), self.px(label.position), style);
        self.area
            .draw(&text)
            .map_err(|e| SurfaceError::Backend(format!("{:?}", e)))
    }
}

/// Render `dataset` into an image file; `.svg` uses the SVG backend, anything
/// else the bitmap backend. `pixel_scale` multiplies the logical view box.
pub fn render_image<P: AsRef<Path>>(
    dataset: &Dataset,
    out_path: P,
    options: &ChartOptions,
    pixel_scale: u32,
) -> Result<RenderedChart> {
    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();

    // Validate and lay out first so a failing render never creates the file.
    let mut recorded = RecordingSurface::new();
    let rendered = render_chart(&mut recorded, dataset, options)?;

    let scale = pixel_scale.max(1) as f64;
    let size = (
        (options.width * scale).round() as u32,
        (options.height * scale).round() as u32,
    );

    if out_path.extension().and_then(|s| s.to_str()) == Some("svg") {
        let root = SVGBackend::new(path_string.as_str(), size).into_drawing_area();
        let mut surface = PlottersSurface::new(root, options.width, options.height)?;
        recorded.replay(&mut surface)?;
        surface.present()?;
    } else {
        let root = BitMapBackend::new(path_string.as_str(), size).into_drawing_area();
        let mut surface = PlottersSurface::new(root, options.width, options.height)?;
        if !font_registered() {
            warn!("no font registered; {} is drawn without the scale label", out_path.display());
            surface = surface.without_text();
        }
        recorded
            .replay(&mut surface)
            .map_err(|e| anyhow!("drawing {}: {}", out_path.display(), e))?;
        surface.present()?;
    }
    info!("wrote chart to {}", out_path.display());
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_font_file_is_a_font_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ttf");
        std::fs::write(&path, b"not a font").unwrap();
        match register_font_file(&path) {
            Err(SurfaceError::Font(msg)) => assert!(msg.contains("invalid font data")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn missing_font_file_is_a_font_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            register_font_file(dir.path().join("absent.ttf")),
            Err(SurfaceError::Font(_))
        ));
    }

    #[test]
    fn svg_backend_receives_scaled_bars() {
        let mut buf = String::new();
        {
            let root = SVGBackend::with_string(&mut buf, (600, 200)).into_drawing_area();
            let mut surface = PlottersSurface::new(root, 300.0, 100.0).unwrap();
            surface
                .draw_rect(
                    &Rectangle {
                        origin: Point::new(1.0, 25.0),
                        width: 99.0,
                        height: 25.0,
                    },
                    Color::Green,
                )
                .unwrap();
            surface.present().unwrap();
        }
        // 2x scale: the bar's top-left corner (1, 25) lands on (2, 50)
        let rect = buf
            .lines()
            .filter(|l| l.contains("<rect"))
            .find(|l| !l.contains("width=\"600\""))
            .expect("scaled bar in output");
        assert!(rect.contains("x=\"2\""));
        assert!(rect.contains("y=\"50\""));
    }
}
