/// The cell interpreter: walks the grid once per frame in row-major
/// order and dispatches every cell to exactly one draw action.
///
/// Codes outside the legend draw nothing, so maps can carry markers a
/// newer build understands without breaking an older one. The timer
/// slot only FORMATS elapsed time; accumulation happens in the tick
/// driver, so time advances the same whether or not this walk runs.

use crossterm::style::Color;

use crate::domain::cell::Cell;
use crate::domain::geometry::{Geometry, Rect};
use crate::sim::world::WorldState;
use crate::ui::surface::Surface;

// The original palette: green yard, near-black ink, grey grid lines.
pub const BACKDROP: Color = Color::Rgb { r: 76, g: 138, b: 73 };
pub const INK: Color = Color::Rgb { r: 33, g: 33, b: 33 };
pub const GRID_LINE: Color = Color::Rgb { r: 99, g: 99, b: 99 };

/// Paint one frame: clear the maze surface, then draw every cell.
pub fn paint(world: &WorldState, geom: &Geometry, surface: &mut impl Surface) {
    let (w, h) = geom.surface_size(world.rows, world.cols);
    surface.fill_rect(Rect::new(0, 0, w, h), BACKDROP);

    for row in 0..world.rows {
        for col in 0..world.cols {
            let Some(cell) = Cell::from_code(world.grid[row][col]) else {
                continue; // unknown code: forward-compatible no-op
            };
            paint_cell(world, geom, surface, row, col, cell);
        }
    }
}

fn paint_cell(
    world: &WorldState,
    geom: &Geometry,
    surface: &mut impl Surface,
    row: usize,
    col: usize,
    cell: Cell,
) {
    match cell {
        Cell::Empty => {
            let r = geom.cell_rect(row, col);
            surface.fill_rect(r, BACKDROP);
            surface.stroke_rect(r, geom.stroke, GRID_LINE);
        }
        Cell::Wall => {
            surface.fill_rect(geom.cell_rect(row, col), INK);
        }
        Cell::NonReachable => {}
        Cell::Timer => {
            surface.text(geom.cell_origin(row, col), &format_clock(world.elapsed_ms), INK);
        }
        Cell::Score => {
            let label = format!("Points: {}", world.score);
            surface.text(geom.cell_origin(row, col), &label, INK);
        }
        Cell::BorderEdge(edge) => {
            surface.fill_rect(geom.edge_rect(row, col, edge), INK);
        }
        Cell::BorderCorner(corner) => {
            for r in geom.corner_rects(row, col, corner) {
                surface.fill_rect(r, INK);
            }
        }
        Cell::Head => {
            surface.fill_polygon(&geom.head_polygon(row, col, world.direction), INK);
        }
    }
}

/// Elapsed time as zero-padded `MM:SS`. Minutes wrap at the hour, as a
/// wall clock would.
pub fn format_clock(elapsed_ms: u64) -> String {
    let total_secs = elapsed_ms / 1000;
    format!("{:02}:{:02}", (total_secs / 60) % 60, total_secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WrapConfig;
    use crate::domain::cell;
    use crate::domain::direction::Direction;
    use crate::sim::step;
    use crate::ui::renderer::FrameBuffer;

    fn world_from(rows: &[&str]) -> WorldState {
        let mut w = WorldState::new();
        w.grid = rows
            .iter()
            .map(|r| {
                r.chars()
                    .map(|ch| match ch {
                        '#' => cell::WALL,
                        '@' => cell::HEAD,
                        'T' => cell::TIMER,
                        'P' => cell::SCORE,
                        ' ' => cell::NON_REACHABLE,
                        _ => cell::EMPTY,
                    })
                    .collect()
            })
            .collect();
        w.rows = w.grid.len();
        w.cols = w.grid[0].len();
        for (r, row) in w.grid.iter().enumerate() {
            for (c, &code) in row.iter().enumerate() {
                if code == cell::HEAD {
                    w.head = (r, c);
                    w.head_spawn = (r, c);
                }
            }
        }
        w.base_grid = w.grid.clone();
        w.wrap = WrapConfig { top_row: 1, bottom_margin: 1, left_col: 1, right_margin: 1 };
        w
    }

    fn buffer_for(w: &WorldState, geom: &Geometry) -> FrameBuffer {
        let (sw, sh) = geom.surface_size(w.rows, w.cols);
        FrameBuffer::new(sw as usize, sh as usize)
    }

    #[test]
    fn clock_formatting() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(65_000), "01:05");
        assert_eq!(format_clock(600_000), "10:00");
        assert_eq!(format_clock(59_999), "00:59");
        // Wraps at the hour like the original wall-clock display
        assert_eq!(format_clock(3_600_000), "00:00");
    }

    #[test]
    fn repainting_an_unchanged_grid_is_idempotent() {
        let w = world_from(&["#####", "#...#", "#.@.#", "#...#", "#####"]);
        let geom = Geometry::new(4, 2, 1);

        let mut a = buffer_for(&w, &geom);
        let mut b = buffer_for(&w, &geom);
        paint(&w, &geom, &mut a);
        paint(&w, &geom, &mut b);
        assert_eq!(a.cells, b.cells);

        // And painting again over an already-painted buffer changes nothing
        let snapshot = a.cells.clone();
        paint(&w, &geom, &mut a);
        assert_eq!(a.cells, snapshot);
    }

    #[test]
    fn unknown_codes_draw_exactly_nothing() {
        let known = world_from(&["#####", "#...#", "#.@.#", "#...#", "#####"]);
        let mut unknown = world_from(&["#####", "#...#", "#.@.#", "#...#", "#####"]);
        unknown.grid[1][1] = 99; // unknown code where an empty cell was
        let geom = Geometry::new(4, 2, 1);

        let mut buf = buffer_for(&unknown, &geom);
        paint(&unknown, &geom, &mut buf);

        // The unknown cell's area shows only the frame clear, no cell drawing
        let r = geom.cell_rect(1, 1);
        for y in r.y..r.y + r.h {
            for x in r.x..r.x + r.w {
                assert_eq!(buf.get(x as usize, y as usize).bg, BACKDROP);
            }
        }

        // Everything outside that cell matches the all-known rendering
        let mut reference = buffer_for(&known, &geom);
        paint(&known, &geom, &mut reference);
        for y in 0..buf.height as i32 {
            for x in 0..buf.width as i32 {
                let inside = x >= r.x && x < r.x + r.w && y >= r.y && y < r.y + r.h;
                if !inside {
                    assert_eq!(
                        buf.get(x as usize, y as usize),
                        reference.get(x as usize, y as usize),
                        "pixel ({x},{y})"
                    );
                }
            }
        }
    }

    #[test]
    fn turning_the_head_repaints_only_its_cell() {
        let mut w = world_from(&["#####", "#...#", "#.@.#", "#...#", "#####"]);
        let geom = Geometry::new(8, 8, 2);

        w.direction = Direction::Down;
        let mut down = buffer_for(&w, &geom);
        paint(&w, &geom, &mut down);

        w.direction = Direction::Right;
        let mut right = buffer_for(&w, &geom);
        paint(&w, &geom, &mut right);

        let head_rect = geom.cell_rect(2, 2);
        let mut changed_inside = false;
        for y in 0..down.height as i32 {
            for x in 0..down.width as i32 {
                let a = down.get(x as usize, y as usize);
                let b = right.get(x as usize, y as usize);
                let inside = x >= head_rect.x
                    && x < head_rect.x + head_rect.w
                    && y >= head_rect.y
                    && y < head_rect.y + head_rect.h;
                if inside {
                    changed_inside |= a != b;
                } else {
                    assert_eq!(a, b, "pixel ({x},{y}) outside the head cell changed");
                }
            }
        }
        assert!(changed_inside, "glyph did not change with the heading");
    }

    #[test]
    fn hud_slots_render_clock_and_points() {
        let mut w = world_from(&[
            " T      P           ",
            "....................",
            "....@...............",
        ]);
        w.elapsed_ms = 65_000;
        w.score = 7;
        let geom = Geometry::new(1, 1, 1); // 1px cells: text lands at the cell origin
        let mut buf = buffer_for(&w, &geom);
        paint(&w, &geom, &mut buf);

        let read = |x0: usize, y: usize, len: usize| -> String {
            (x0..x0 + len).map(|x| buf.get(x, y).ch).collect()
        };
        assert_eq!(read(1, 0, 5), "01:05");
        assert_eq!(read(8, 0, 9), "Points: 7");
    }

    #[test]
    fn wall_and_empty_cells_use_the_palette() {
        let w = world_from(&["#####", "#...#", "#.@.#", "#...#", "#####"]);
        let geom = Geometry::new(6, 4, 1);
        let mut buf = buffer_for(&w, &geom);
        paint(&w, &geom, &mut buf);

        // Wall cell: solid ink
        let wall = geom.cell_rect(0, 0);
        assert_eq!(buf.get(wall.x as usize, wall.y as usize).bg, INK);
        // Empty cell: grid line on the rim, backdrop within
        let empty = geom.cell_rect(1, 1);
        assert_eq!(buf.get(empty.x as usize, empty.y as usize).bg, GRID_LINE);
        assert_eq!(buf.get((empty.x + 1) as usize, (empty.y + 1) as usize).bg, BACKDROP);
    }

    #[test]
    fn tick_then_paint_moves_the_drawn_head() {
        // Head against the right wall: one tick wraps it to the left
        // fallback column, and the frame reflects the move.
        let mut w = world_from(&["#####", "#...#", "#.@##", "#...#", "#####"]);
        w.direction = Direction::Right;
        let geom = Geometry::new(6, 4, 1);

        step::tick(&mut w);
        assert_eq!(w.head, (2, 1));

        let mut buf = buffer_for(&w, &geom);
        paint(&w, &geom, &mut buf);
        // The vacated cell is an empty cell again (backdrop interior)
        let old = geom.cell_rect(2, 2);
        assert_eq!(buf.get((old.x + 1) as usize, (old.y + 1) as usize).bg, BACKDROP);
    }
}
