/// WorldState: the complete snapshot of a running session.
///
/// Two grid layers back the restart contract:
///   - `base_grid`: the level as loaded. **Never mutated** after load.
///   - `grid`:      the live maze the movement engine works on.
///
/// The head position is a first-class field kept in sync with the single
/// `HEAD` code in `grid`; nothing scans the grid per tick to find it.
/// `restart()` rebuilds the session from `base_grid`, returning grid,
/// head, direction, elapsed time and score to their initial values.

use crate::config::WrapConfig;
use crate::domain::cell;
use crate::domain::direction::Direction;

pub struct WorldState {
    // ── Grid layers ──
    /// Original level data. Never mutated after load.
    pub base_grid: Vec<Vec<i32>>,
    /// Live maze; the only cells that ever change are empty ↔ head.
    pub grid: Vec<Vec<i32>>,
    pub rows: usize,
    pub cols: usize,

    // ── Head / heading ──
    pub head: (usize, usize),
    pub head_spawn: (usize, usize),
    pub direction: Direction,

    // ── Counters ──
    /// Accumulated by the tick driver, displayed by the timer slot.
    pub elapsed_ms: u64,
    /// Reserved for future scoring events; rendered, never incremented
    /// by the engine itself.
    pub score: u32,
    pub tick: u64,

    // ── Session ──
    pub paused: bool,
    pub level_name: String,
    pub current_level: usize,
    pub total_levels: usize,

    // ── Config snapshot ──
    pub wrap: WrapConfig,
    pub tick_interval_ms: u64,
}

impl WorldState {
    pub fn new() -> Self {
        WorldState {
            base_grid: vec![],
            grid: vec![],
            rows: 0,
            cols: 0,
            head: (0, 0),
            head_spawn: (0, 0),
            direction: Direction::default(),
            elapsed_ms: 0,
            score: 0,
            tick: 0,
            paused: false,
            level_name: String::new(),
            current_level: 0,
            total_levels: 0,
            wrap: WrapConfig::default(),
            tick_interval_ms: 1000,
        }
    }

    /// Raw code at (row, col). Out of bounds reads as a wall, so every
    /// caller gets "blocked" semantics at the grid edge without indexing
    /// past it.
    #[inline]
    pub fn code_at(&self, row: usize, col: usize) -> i32 {
        if row < self.rows && col < self.cols {
            self.grid[row][col]
        } else {
            cell::WALL
        }
    }

    #[inline]
    pub fn set_code(&mut self, row: usize, col: usize, code: i32) {
        if row < self.rows && col < self.cols {
            self.grid[row][col] = code;
        }
    }

    /// Reset the session to the level's initial state: fresh grid copy,
    /// head back at spawn, heading/timer/score cleared. The immutable
    /// `base_grid` itself is untouched.
    pub fn restart(&mut self) {
        self.grid = self.base_grid.clone();
        self.head = self.head_spawn;
        self.direction = Direction::default();
        self.elapsed_ms = 0;
        self.score = 0;
        self.tick = 0;
        self.paused = false;
    }
}
