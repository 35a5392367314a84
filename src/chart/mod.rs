//! The bar-chart rendering core.
//!
//! Three pure stages, run once per render:
//! 1. [`extremes::find_extremes`] over the dataset values
//! 2. [`coords::CoordinateSystem`]: zero line at half height, the larger-magnitude
//!    extreme mapped to the full half-height
//! 3. [`bars::layout_bars`]: one rectangle per entry, green above the zero line,
//!    red below it
//!
//! [`render_chart`] validates all stages before touching the surface, so a
//! failed render leaves the surface as it was.

pub mod bars;
pub mod coords;
pub mod extremes;
pub mod format;

pub use bars::{Bar, bar_color, layout_bars, render_bars};
pub use coords::{CoordinateSystem, build_coordinate_system};
pub use extremes::{Extremes, find_extremes};

use crate::error::ChartError;
use crate::models::Dataset;
use crate::surface::DrawingSurface;
use log::debug;

/// Default logical view box width.
pub const DEFAULT_WIDTH: f64 = 300.0;
/// Default logical view box height.
pub const DEFAULT_HEIGHT: f64 = 100.0;
/// Default gap in front of every bar.
pub const DEFAULT_SPACING: f64 = 1.0;

/// Surface geometry and label formatting for one render.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartOptions {
    pub width: f64,
    pub height: f64,
    pub spacing: f64,
    pub locale: String,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            spacing: DEFAULT_SPACING,
            locale: "en".into(),
        }
    }
}

/// Everything a render computed, for callers that want the geometry too.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedChart {
    pub coords: CoordinateSystem,
    pub bars: Vec<Bar>,
}

/// Render `dataset` onto `surface`: axes, scale label, then bars in dataset order.
pub fn render_chart<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    dataset: &Dataset,
    options: &ChartOptions,
) -> Result<RenderedChart, ChartError> {
    let extremes = find_extremes(dataset.values())?;
    let coords = CoordinateSystem::compute(options.width, options.height, extremes)?;
    let bars = layout_bars(dataset, &coords, options.spacing)?;
    debug!(
        "chart: {} bars, baseline={}, scale={}, range={}",
        bars.len(),
        coords.baseline,
        coords.value_scale,
        coords.value_range
    );

    coords::draw_axes(surface, &coords, options.height, &options.locale)?;
    bars::emit_bars(surface, &bars)?;
    Ok(RenderedChart { coords, bars })
}
