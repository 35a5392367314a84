//! The drawing-surface seam between the chart core and its back ends.
//!
//! The core only ever emits lines, filled rectangles and text labels. Back ends:
//! - [`RecordingSurface`]: keeps the instructions in order (tests, replay)
//! - [`crate::svg::SvgDocument`]: inline SVG with a fixed view box
//! - [`crate::plotters_surface::PlottersSurface`]: any `plotters` drawing area

use crate::error::SurfaceError;
use crate::geometry::{Color, Line, Rectangle, TextLabel};
use serde::{Deserialize, Serialize};

/// A 2D vector target with a fixed logical coordinate box.
pub trait DrawingSurface {
    fn draw_line(&mut self, line: &Line) -> Result<(), SurfaceError>;
    fn draw_rect(&mut self, rect: &Rectangle, color: Color) -> Result<(), SurfaceError>;
    fn draw_text(&mut self, label: &TextLabel) -> Result<(), SurfaceError>;

    /// Apply an already recorded instruction.
    fn apply(&mut self, command: &DrawCommand) -> Result<(), SurfaceError> {
        match command {
            DrawCommand::Line(line) => self.draw_line(line),
            DrawCommand::Rect { rect, color } => self.draw_rect(rect, *color),
            DrawCommand::Text(label) => self.draw_text(label),
        }
    }
}

impl<S: DrawingSurface + ?Sized> DrawingSurface for &mut S {
    fn draw_line(&mut self, line: &Line) -> Result<(), SurfaceError> {
        (**self).draw_line(line)
    }

    fn draw_rect(&mut self, rect: &Rectangle, color: Color) -> Result<(), SurfaceError> {
        (**self).draw_rect(rect, color)
    }

    fn draw_text(&mut self, label: &TextLabel) -> Result<(), SurfaceError> {
        (**self).draw_text(label)
    }
}

/// One primitive draw instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    Line(Line),
    Rect { rect: Rectangle, color: Color },
    Text(TextLabel),
}

/// Surface that records every instruction in emission order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Replay the recorded instructions onto another surface.
    pub fn replay<S: DrawingSurface + ?Sized>(&self, target: &mut S) -> Result<(), SurfaceError> {
        for command in &self.commands {
            target.apply(command)?;
        }
        Ok(())
    }
}

impl DrawingSurface for RecordingSurface {
    fn draw_line(&mut self, line: &Line) -> Result<(), SurfaceError> {
        self.commands.push(DrawCommand::Line(*line));
        Ok(())
    }

    fn draw_rect(&mut self, rect: &Rectangle, color: Color) -> Result<(), SurfaceError> {
        self.commands.push(DrawCommand::Rect { rect: *rect, color });
        Ok(())
    }

    fn draw_text(&mut self, label: &TextLabel) -> Result<(), SurfaceError> {
        self.commands.push(DrawCommand::Text(label.clone()));
        Ok(())
    }
}
