use super::extremes::{Extremes, find_extremes};
use super::format::format_value;
use crate::error::ChartError;
use crate::geometry::{Line, Point, TextLabel};
use crate::surface::DrawingSurface;

/// Share of the surface height used for the scale label's font size.
const LABEL_FONT_RATIO: f64 = 0.08;
/// Distance of the scale label from the vertical axis.
const LABEL_INSET: f64 = 2.0;

/// Mapping from data values to surface pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateSystem {
    /// Pixel row of value zero.
    pub baseline: f64,
    /// Pixels per unit of data value.
    pub value_scale: f64,
    /// Horizontal room available to the bars.
    pub total_space: f64,
    /// Largest absolute extreme; maps to the full half-height.
    pub value_range: f64,
}

impl CoordinateSystem {
    /// Compute the coordinate system without drawing anything.
    ///
    /// The baseline is pinned to the vertical center whatever the data skew.
    pub fn compute(width: f64, height: f64, extremes: Extremes) -> Result<Self, ChartError> {
        check_surface(width, height)?;
        let baseline = height * 0.5;
        let value_range = extremes.magnitude();
        if value_range == 0.0 {
            return Err(ChartError::DegenerateRange);
        }
        Ok(Self {
            baseline,
            value_scale: baseline / value_range,
            total_space: width,
            value_range,
        })
    }

    /// Bar height for `value` in pixels.
    pub fn height_of(&self, value: f64) -> f64 {
        value.abs() * self.value_scale
    }

    /// The vertical axis (full height at `x = 0`) and the zero line.
    pub fn axis_lines(&self, height: f64) -> [Line; 2] {
        [
            Line::new(Point::new(0.0, 0.0), Point::new(0.0, height)),
            Line::new(
                Point::new(0.0, self.baseline),
                Point::new(self.total_space, self.baseline),
            ),
        ]
    }

    /// Annotation showing the value range covered by each half of the chart.
    pub fn scale_label(&self, height: f64, locale: &str) -> TextLabel {
        let font_size = height * LABEL_FONT_RATIO;
        TextLabel {
            position: Point::new(LABEL_INSET, LABEL_INSET + font_size),
            text: format!("±{}", format_value(self.value_range, locale)),
            font_size,
        }
    }
}

pub(crate) fn check_surface(width: f64, height: f64) -> Result<(), ChartError> {
    if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
        return Err(ChartError::InvalidLayout(format!(
            "surface must have a positive size, got {width} x {height}"
        )));
    }
    Ok(())
}

/// Emit the axes and the scale label, then return the coordinate system.
pub fn build_coordinate_system<S, I>(
    surface: &mut S,
    width: f64,
    height: f64,
    values: I,
    locale: &str,
) -> Result<CoordinateSystem, ChartError>
where
    S: DrawingSurface + ?Sized,
    I: IntoIterator<Item = f64>,
{
    let extremes = find_extremes(values)?;
    let coords = CoordinateSystem::compute(width, height, extremes)?;
    draw_axes(surface, &coords, height, locale)?;
    Ok(coords)
}

pub(crate) fn draw_axes<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    coords: &CoordinateSystem,
    height: f64,
    locale: &str,
) -> Result<(), ChartError> {
    for line in coords.axis_lines(height) {
        surface.draw_line(&line)?;
    }
    surface.draw_text(&coords.scale_label(height, locale))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, RecordingSurface};

    #[test]
    fn larger_magnitude_extreme_maps_to_half_height() {
        let mut surface = RecordingSurface::new();
        let c = build_coordinate_system(&mut surface, 300.0, 100.0, [10.0, -20.0, 5.0], "en")
            .unwrap();
        assert_eq!(c.baseline, 50.0);
        assert_eq!(c.value_range, 20.0);
        assert_eq!(c.value_scale, 2.5);
        assert_eq!(c.total_space, 300.0);
    }

    #[test]
    fn emits_axes_then_label() {
        let mut surface = RecordingSurface::new();
        build_coordinate_system(&mut surface, 300.0, 100.0, [4.0, 8.0], "en").unwrap();
        let cmds = surface.commands();
        assert_eq!(cmds.len(), 3);
        assert_eq!(
            cmds[0],
            DrawCommand::Line(Line::new(Point::new(0.0, 0.0), Point::new(0.0, 100.0)))
        );
        assert_eq!(
            cmds[1],
            DrawCommand::Line(Line::new(Point::new(0.0, 50.0), Point::new(300.0, 50.0)))
        );
        match &cmds[2] {
            DrawCommand::Text(label) => assert_eq!(label.text, "±8"),
            other => panic!("expected a label, got {other:?}"),
        }
    }

    #[test]
    fn all_zero_values_are_degenerate() {
        let mut surface = RecordingSurface::new();
        let err = build_coordinate_system(&mut surface, 300.0, 100.0, [0.0, 0.0], "en");
        assert_eq!(err, Err(ChartError::DegenerateRange));
        assert!(surface.is_empty());
    }

    #[test]
    fn zero_sized_surface_is_rejected() {
        let e = Extremes { min: 1.0, max: 2.0 };
        assert!(matches!(
            CoordinateSystem::compute(0.0, 100.0, e),
            Err(ChartError::InvalidLayout(_))
        ));
    }
}
