/// Presentation layer: double-buffered, diff-based terminal renderer.
///
/// How it works:
///   1. The painter rasterizes the maze into the `front` buffer
///      (one pixel unit = one terminal cell)
///   2. Each cell is compared with the `back` buffer (previous frame)
///   3. Only terminal commands for changed cells are emitted
///   4. All commands are batched with `queue!`, flushed once at the end
///   5. Swap front/back
///
/// This eliminates flicker caused by full-screen redraws, so repainting
/// an unchanged grid is visually (and nearly computationally) free.

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::domain::geometry::{Geometry, Point, Rect};
use crate::sim::world::WorldState;
use crate::ui::painter;
use crate::ui::surface::Surface;

// ── Cell: the unit of the back-buffer ──

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) struct Cell {
    pub(crate) ch: char,
    pub(crate) fg: Color,
    pub(crate) bg: Color,
}

impl Cell {
    /// Explicit dark background for everything outside the maze surface,
    /// so inter-row gap pixels match the cell color on VTE terminals.
    const BASE_BG: Color = Color::Rgb { r: 18, g: 18, b: 18 };

    const BLANK: Cell = Cell {
        ch: ' ',
        fg: Color::White,
        bg: Cell::BASE_BG,
    };

    /// Sentinel used to invalidate the back buffer: differs from any
    /// real cell, so every position gets diff'd on the next flush.
    const INVALID: Cell = Cell {
        ch: '?',
        fg: Color::Magenta,
        bg: Color::Magenta,
    };
}

// ── FrameBuffer: a 2D pixel grid that implements Surface ──

pub(crate) struct FrameBuffer {
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) cells: Vec<Cell>,
}

impl FrameBuffer {
    pub(crate) fn new(w: usize, h: usize) -> Self {
        FrameBuffer {
            width: w,
            height: h,
            cells: vec![Cell::BLANK; w * h],
        }
    }

    fn resize(&mut self, w: usize, h: usize) {
        if self.width != w || self.height != h {
            self.width = w;
            self.height = h;
            self.cells = vec![Cell::BLANK; w * h];
        }
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = cell;
        }
    }

    pub(crate) fn get(&self, x: usize, y: usize) -> Cell {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            Cell::BLANK
        }
    }

    /// Write a string at (x, y); each char occupies one column.
    fn put_str(&mut self, x: usize, y: usize, s: &str, fg: Color, bg: Color) {
        let mut cx = x;
        for ch in s.chars() {
            if cx >= self.width {
                break;
            }
            self.set(cx, y, Cell { ch, fg, bg });
            cx += 1;
        }
    }

    /// Clipped pixel span fill, the workhorse of the Surface impl.
    fn fill_span(&mut self, x0: i32, x1: i32, y: i32, color: Color) {
        if y < 0 || y >= self.height as i32 {
            return;
        }
        let x0 = x0.max(0) as usize;
        let x1 = (x1.min(self.width as i32)).max(0) as usize;
        for x in x0..x1 {
            self.set(x, y as usize, Cell { ch: ' ', fg: Color::White, bg: color });
        }
    }
}

impl Surface for FrameBuffer {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        for y in rect.y..rect.y + rect.h {
            self.fill_span(rect.x, rect.x + rect.w, y, color);
        }
    }

    fn stroke_rect(&mut self, rect: Rect, thickness: i32, color: Color) {
        let t = thickness.min(rect.w).min(rect.h);
        // Top and bottom bands
        self.fill_rect(Rect::new(rect.x, rect.y, rect.w, t), color);
        self.fill_rect(Rect::new(rect.x, rect.y + rect.h - t, rect.w, t), color);
        // Left and right bands
        self.fill_rect(Rect::new(rect.x, rect.y, t, rect.h), color);
        self.fill_rect(Rect::new(rect.x + rect.w - t, rect.y, t, rect.h), color);
    }

    fn fill_polygon(&mut self, points: &[Point], color: Color) {
        if points.len() < 3 {
            return;
        }
        let min_x = points.iter().map(|p| p.x).min().unwrap_or(0);
        let max_x = points.iter().map(|p| p.x).max().unwrap_or(0);
        let min_y = points.iter().map(|p| p.y).min().unwrap_or(0);
        let max_y = points.iter().map(|p| p.y).max().unwrap_or(0);
        // Pixels are filled when their center lies inside the polygon.
        for y in min_y..max_y {
            for x in min_x..max_x {
                if point_in_polygon(x as f64 + 0.5, y as f64 + 0.5, points) {
                    self.fill_span(x, x + 1, y, color);
                }
            }
        }
    }

    fn text(&mut self, anchor: Point, s: &str, color: Color) {
        if anchor.y < 0 || anchor.y >= self.height as i32 {
            return;
        }
        let y = anchor.y as usize;
        let mut x = anchor.x;
        for ch in s.chars() {
            if x >= 0 && (x as usize) < self.width {
                // Keep whatever background is already painted there
                let bg = self.get(x as usize, y).bg;
                self.set(x as usize, y, Cell { ch, fg: color, bg });
            }
            x += 1;
        }
    }
}

/// Ray-cast point-in-polygon (even-odd rule).
fn point_in_polygon(px: f64, py: f64, pts: &[Point]) -> bool {
    let mut inside = false;
    let mut j = pts.len() - 1;
    for i in 0..pts.len() {
        let (xi, yi) = (pts[i].x as f64, pts[i].y as f64);
        let (xj, yj) = (pts[j].x as f64, pts[j].y as f64);
        if (yi > py) != (yj > py) {
            let x_cross = xj + (py - yj) / (yi - yj) * (xi - xj);
            if px < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

// ── Renderer ──

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
    front: FrameBuffer,
    back: FrameBuffer,
    term_w: usize,
    term_h: usize,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            front: FrameBuffer::new(0, 0),
            back: FrameBuffer::new(0, 0),
            term_w: 0,
            term_h: 0,
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            SetBackgroundColor(Cell::BASE_BG),
            Clear(ClearType::All)
        )?;

        let (tw, th) = terminal::size()?;
        self.term_w = tw as usize;
        self.term_h = th as usize;
        self.front.resize(self.term_w, self.term_h);
        self.back.resize(self.term_w, self.term_h);
        // Force full repaint on first frame: back ≠ front for every cell.
        self.back.cells.fill(Cell::INVALID);

        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(
            self.writer,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    pub fn render(&mut self, world: &WorldState, geom: &Geometry) -> io::Result<()> {
        // Detect terminal resize → full repaint
        let (tw, th) = terminal::size().unwrap_or((80, 24));
        if tw as usize != self.term_w || th as usize != self.term_h {
            self.term_w = tw as usize;
            self.term_h = th as usize;
            self.front.resize(self.term_w, self.term_h);
            self.back.resize(self.term_w, self.term_h);
            self.back.cells.fill(Cell::INVALID);
            queue!(self.writer, SetBackgroundColor(Cell::BASE_BG), Clear(ClearType::All))?;
        }

        self.front.clear();
        painter::paint(world, geom, &mut self.front);
        self.compose_status(world, geom);
        self.flush_diff()?;

        // Swap: current front becomes next back
        std::mem::swap(&mut self.front, &mut self.back);

        Ok(())
    }

    /// Control line under the maze. The pause control label flips to
    /// "Resume" while paused, mirroring the original button toggle.
    fn compose_status(&mut self, world: &WorldState, geom: &Geometry) {
        let (_, maze_h) = geom.surface_size(world.rows, world.cols);
        let row = maze_h as usize + 1;
        if row >= self.front.height {
            return;
        }

        let pause_label = if world.paused { "[P] Resume " } else { "[P] Pause  " };
        let line = format!(
            " {}  ·  [↑↓←→] Steer  {} [R] Restart  [Q] Quit",
            world.level_name, pause_label,
        );
        self.front.put_str(0, row, &line, Color::DarkGrey, Cell::BASE_BG);

        if world.paused {
            self.front.put_str(
                line.chars().count() + 2,
                row,
                "■ PAUSED",
                Color::Rgb { r: 200, g: 180, b: 50 },
                Cell::BASE_BG,
            );
        }
    }

    // ── Diff flush: only write changed cells ──

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_fg = Color::White;
        let mut last_bg = Cell::BASE_BG;
        let mut need_move = true;
        let mut last_x: usize = 0;
        let mut last_y: usize = 0;

        // Set explicit base colors at start of frame. Not ResetColor:
        // the terminal's native default may differ from BASE_BG and
        // cause line artifacts.
        queue!(
            self.writer,
            SetForegroundColor(Color::White),
            SetBackgroundColor(Cell::BASE_BG),
        )?;

        for y in 0..self.front.height {
            for x in 0..self.front.width {
                let cell = self.front.get(x, y);
                if cell == self.back.get(x, y) {
                    need_move = true;
                    continue;
                }

                if need_move || x != last_x + 1 || y != last_y {
                    queue!(self.writer, MoveTo(x as u16, y as u16))?;
                    need_move = false;
                }

                if cell.fg != last_fg {
                    queue!(self.writer, SetForegroundColor(cell.fg))?;
                    last_fg = cell.fg;
                }
                if cell.bg != last_bg {
                    queue!(self.writer, SetBackgroundColor(cell.bg))?;
                    last_bg = cell.bg;
                }

                queue!(self.writer, Print(cell.ch))?;
                last_x = x;
                last_y = y;
            }
        }

        self.writer.flush()
    }
}
