use super::coords::CoordinateSystem;
use crate::error::ChartError;
use crate::geometry::{Color, Point, Rectangle};
use crate::models::Dataset;
use crate::surface::DrawingSurface;

/// One bar draw instruction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub rect: Rectangle,
    pub color: Color,
}

/// Sign policy: strictly positive values are green, zero and negative are red.
pub fn bar_color(value: f64) -> Color {
    if value > 0.0 { Color::Green } else { Color::Red }
}

/// Width of each bar when `count` bars share `total_space` with `spacing`
/// in front of every bar.
pub fn bar_width(total_space: f64, spacing: f64, count: usize) -> Result<f64, ChartError> {
    if count == 0 {
        return Err(ChartError::EmptyDataset);
    }
    if !(spacing.is_finite() && spacing >= 0.0) {
        return Err(ChartError::InvalidLayout(format!(
            "spacing must be a non-negative number, got {spacing}"
        )));
    }
    let n = count as f64;
    let width = (total_space - spacing * n) / n;
    if !(width.is_finite() && width > 0.0) {
        return Err(ChartError::InvalidLayout(format!(
            "{count} bars with spacing {spacing} do not fit into {total_space}"
        )));
    }
    Ok(width)
}

/// Compute every bar rectangle in dataset order without drawing.
///
/// Positive bars grow upwards from the baseline, the others downwards.
pub fn layout_bars(
    dataset: &Dataset,
    coords: &CoordinateSystem,
    spacing: f64,
) -> Result<Vec<Bar>, ChartError> {
    let width = bar_width(coords.total_space, spacing, dataset.len())?;
    let bars = dataset
        .values()
        .enumerate()
        .map(|(i, v)| {
            let height = coords.height_of(v);
            let y = if v > 0.0 {
                coords.baseline - height
            } else {
                coords.baseline
            };
            Bar {
                rect: Rectangle {
                    origin: Point::new(spacing + i as f64 * (width + spacing), y),
                    width,
                    height,
                },
                color: bar_color(v),
            }
        })
        .collect();
    Ok(bars)
}

/// Lay out the bars and emit one rectangle per entry, left to right.
pub fn render_bars<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    dataset: &Dataset,
    coords: &CoordinateSystem,
    spacing: f64,
) -> Result<Vec<Bar>, ChartError> {
    let bars = layout_bars(dataset, coords, spacing)?;
    emit_bars(surface, &bars)?;
    Ok(bars)
}

pub(crate) fn emit_bars<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    bars: &[Bar],
) -> Result<(), ChartError> {
    for bar in bars {
        surface.draw_rect(&bar.rect, bar.color)?;
    }
    Ok(())
}
