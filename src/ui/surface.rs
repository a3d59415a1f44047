/// Drawing surface contract.
///
/// The painter talks to an immediate-mode 2D surface in integer pixel
/// units; the terminal renderer rasterizes those pixels into character
/// cells. Keeping the painter behind this trait keeps the whole grid
/// walk unit-testable against a plain frame buffer.

use crossterm::style::Color;

use crate::domain::geometry::{Point, Rect};

pub trait Surface {
    /// Fill a rectangle with a solid color.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Stroke the inside border of a rectangle with the given line width.
    fn stroke_rect(&mut self, rect: Rect, thickness: i32, color: Color);

    /// Fill a simple polygon given its perimeter points.
    fn fill_polygon(&mut self, points: &[Point], color: Color);

    /// Draw text with its top-left corner at the anchor.
    fn text(&mut self, anchor: Point, s: &str, color: Color);
}
