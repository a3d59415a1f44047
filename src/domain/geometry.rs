/// Immutable pixel geometry, built once from configuration and shared by
/// reference. All drawing coordinates derive from here: cell rectangles,
/// border stroke segments, corner half-segments and the head polygon.
///
/// Border segments are thin strips centered inside their cell by the gap
/// offset `(extent - thickness) / 2`, spanning the full cell extent.
/// A corner draws TWO half-length strips that meet at the gap
/// intersection, so the border ring reads as one continuous line.

use crate::domain::cell::{Corner, Edge};
use crate::domain::direction::Direction;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Rect {
        Rect { x, y, w, h }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Geometry {
    pub cell_w: i32,
    pub cell_h: i32,
    pub stroke: i32,
    /// Horizontal offset that centers a vertical strip in a cell.
    pub gap_x: i32,
    /// Vertical offset that centers a horizontal strip in a cell.
    pub gap_y: i32,
}

impl Geometry {
    pub fn new(cell_w: i32, cell_h: i32, stroke: i32) -> Geometry {
        Geometry {
            cell_w,
            cell_h,
            stroke,
            gap_x: (cell_w - stroke) / 2,
            gap_y: (cell_h - stroke) / 2,
        }
    }

    /// Total surface size for a `rows x cols` grid: `(width, height)`.
    pub fn surface_size(&self, rows: usize, cols: usize) -> (i32, i32) {
        (cols as i32 * self.cell_w, rows as i32 * self.cell_h)
    }

    /// Top-left pixel of a cell; also the text anchor for HUD slots.
    pub fn cell_origin(&self, row: usize, col: usize) -> Point {
        Point {
            x: col as i32 * self.cell_w,
            y: row as i32 * self.cell_h,
        }
    }

    pub fn cell_rect(&self, row: usize, col: usize) -> Rect {
        let o = self.cell_origin(row, col);
        Rect::new(o.x, o.y, self.cell_w, self.cell_h)
    }

    /// Full-length border strip. Left/Right are vertical strips spanning
    /// the cell height; Top/Bottom are horizontal strips spanning the
    /// width. Both orientations sit at the cell center via the gap.
    pub fn edge_rect(&self, row: usize, col: usize, edge: Edge) -> Rect {
        let o = self.cell_origin(row, col);
        match edge {
            Edge::Left | Edge::Right => {
                Rect::new(o.x + self.gap_x, o.y, self.stroke, self.cell_h)
            }
            Edge::Top | Edge::Bottom => {
                Rect::new(o.x, o.y + self.gap_y, self.cell_w, self.stroke)
            }
        }
    }

    /// The two half-length strips forming a corner. E.g. the top-left
    /// corner draws the bottom half of the vertical strip plus the right
    /// half of the horizontal strip, bending the border line inward.
    pub fn corner_rects(&self, row: usize, col: usize, corner: Corner) -> [Rect; 2] {
        match corner {
            Corner::TopLeft => [self.half_v_bottom(row, col), self.half_h_right(row, col)],
            Corner::TopRight => [self.half_h_left(row, col), self.half_v_bottom(row, col)],
            Corner::BottomRight => [self.half_v_top(row, col), self.half_h_left(row, col)],
            Corner::BottomLeft => [self.half_v_top(row, col), self.half_h_right(row, col)],
        }
    }

    // Half strips. Each spans from the cell edge to just past the gap
    // intersection (length = extent - gap), so the two halves of a corner
    // overlap in the stroke-sized square at the center.

    fn half_v_top(&self, row: usize, col: usize) -> Rect {
        let o = self.cell_origin(row, col);
        Rect::new(o.x + self.gap_x, o.y, self.stroke, self.cell_h - self.gap_y)
    }

    fn half_v_bottom(&self, row: usize, col: usize) -> Rect {
        let o = self.cell_origin(row, col);
        Rect::new(
            o.x + self.gap_x,
            o.y + self.gap_y,
            self.stroke,
            self.cell_h - self.gap_y,
        )
    }

    fn half_h_left(&self, row: usize, col: usize) -> Rect {
        let o = self.cell_origin(row, col);
        Rect::new(o.x, o.y + self.gap_y, self.cell_w - self.gap_x, self.stroke)
    }

    fn half_h_right(&self, row: usize, col: usize) -> Rect {
        let o = self.cell_origin(row, col);
        Rect::new(
            o.x + self.gap_x,
            o.y + self.gap_y,
            self.cell_w - self.gap_x,
            self.stroke,
        )
    }

    /// Head glyph: a notched arrow (dart) filling the cell, apex pointing
    /// in the travel direction, notch cut into the trailing side.
    pub fn head_polygon(&self, row: usize, col: usize, dir: Direction) -> [Point; 4] {
        let r = self.cell_rect(row, col);
        let cx = r.x + r.w / 2;
        let cy = r.y + r.h / 2;
        let notch_x = r.w / 4;
        let notch_y = r.h / 4;
        match dir {
            Direction::Up => [
                Point { x: cx, y: r.y },
                Point { x: r.x + r.w, y: r.y + r.h },
                Point { x: cx, y: r.y + r.h - notch_y },
                Point { x: r.x, y: r.y + r.h },
            ],
            Direction::Down => [
                Point { x: cx, y: r.y + r.h },
                Point { x: r.x, y: r.y },
                Point { x: cx, y: r.y + notch_y },
                Point { x: r.x + r.w, y: r.y },
            ],
            Direction::Left => [
                Point { x: r.x, y: cy },
                Point { x: r.x + r.w, y: r.y },
                Point { x: r.x + r.w - notch_x, y: cy },
                Point { x: r.x + r.w, y: r.y + r.h },
            ],
            Direction::Right => [
                Point { x: r.x + r.w, y: cy },
                Point { x: r.x, y: r.y + r.h },
                Point { x: r.x + notch_x, y: cy },
                Point { x: r.x, y: r.y },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 35x35 cells with a 4px stroke: the original demo's proportions.
    fn geo() -> Geometry {
        Geometry::new(35, 35, 4)
    }

    #[test]
    fn gap_centers_the_stroke() {
        let g = geo();
        assert_eq!(g.gap_x, 15); // (35 - 4) / 2
        assert_eq!(g.gap_y, 15);
    }

    #[test]
    fn surface_size_from_grid_dims() {
        let g = geo();
        assert_eq!(g.surface_size(22, 20), (700, 770));
    }

    #[test]
    fn vertical_edge_spans_full_height() {
        let g = geo();
        let r = g.edge_rect(3, 0, Edge::Left);
        assert_eq!(r, Rect::new(15, 105, 4, 35));
        // Right edge of the map uses the same centered strip shape
        assert_eq!(g.edge_rect(3, 19, Edge::Right), Rect::new(19 * 35 + 15, 105, 4, 35));
    }

    #[test]
    fn horizontal_edge_spans_full_width() {
        let g = geo();
        let r = g.edge_rect(2, 5, Edge::Top);
        assert_eq!(r, Rect::new(175, 2 * 35 + 15, 35, 4));
    }

    #[test]
    fn corner_halves_meet_at_the_gap_intersection() {
        let g = geo();
        let [v, h] = g.corner_rects(2, 0, Corner::TopLeft);
        // Vertical half runs from the gap down to the cell bottom
        assert_eq!(v, Rect::new(15, 70 + 15, 4, 35 - 15));
        // Horizontal half runs from the gap to the right cell edge
        assert_eq!(h, Rect::new(15, 70 + 15, 35 - 15, 4));
        // Both start at the same intersection point
        assert_eq!((v.x, v.y), (h.x, h.y));
    }

    #[test]
    fn bottom_right_corner_bends_up_and_left() {
        let g = geo();
        let [v, h] = g.corner_rects(21, 19, Corner::BottomRight);
        let o = g.cell_origin(21, 19);
        // Vertical half starts at the cell top
        assert_eq!((v.x, v.y), (o.x + 15, o.y));
        assert_eq!(v.h, 20);
        // Horizontal half starts at the cell's left edge
        assert_eq!((h.x, h.y), (o.x, o.y + 15));
        assert_eq!(h.w, 20);
    }

    #[test]
    fn head_apex_follows_direction() {
        let g = geo();
        let r = g.cell_rect(4, 4);
        let up = g.head_polygon(4, 4, Direction::Up);
        assert_eq!(up[0], Point { x: r.x + r.w / 2, y: r.y });
        let right = g.head_polygon(4, 4, Direction::Right);
        assert_eq!(right[0], Point { x: r.x + r.w, y: r.y + r.h / 2 });
        let down = g.head_polygon(4, 4, Direction::Down);
        assert_eq!(down[0], Point { x: r.x + r.w / 2, y: r.y + r.h });
        let left = g.head_polygon(4, 4, Direction::Left);
        assert_eq!(left[0], Point { x: r.x, y: r.y + r.h / 2 });
    }

    #[test]
    fn head_notch_sits_inside_the_cell() {
        let g = geo();
        let r = g.cell_rect(0, 0);
        for dir in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
            for p in g.head_polygon(0, 0, dir) {
                assert!(p.x >= r.x && p.x <= r.x + r.w);
                assert!(p.y >= r.y && p.y <= r.y + r.h);
            }
        }
    }
}
