/// The tick driver and movement engine.
///
/// `tick()` advances the session by one tick:
///   1. Accumulate elapsed time (always once per tick, independent of
///      what the painter later visits).
///   2. Advance the head one cell in the current heading, wrapping to
///      the configured fallback coordinate when blocked.
///
/// Blocked means: the forward cell is off the grid or holds a wall.
/// Every edge is bounds-checked, including moving up from row 0.
/// The head count invariant holds across the call: the vacated cell is
/// reset to empty and exactly one head cell exists afterwards.

use crate::domain::cell::{self, Cell};
use crate::domain::direction::Direction;
use crate::sim::world::WorldState;

/// Advance the world by one tick. No-op while paused; pausing disarms
/// the tick without touching timer, score or head state.
pub fn tick(world: &mut WorldState) {
    if world.paused {
        return;
    }
    world.tick += 1;
    world.elapsed_ms += world.tick_interval_ms;
    advance_head(world);
}

/// Move the head one cell, or wrap. Exactly one head exists before and
/// after the call.
pub fn advance_head(world: &mut WorldState) {
    let (row, col) = world.head;
    debug_assert_eq!(
        world.grid[row][col],
        cell::HEAD,
        "head field out of sync with grid"
    );

    let dest = match forward_cell(world, row, col) {
        Some((r, c)) if !blocked(world, r, c) => (r, c),
        _ => wrap_target(world, row, col),
    };

    // A wrap target aimed at a wall means the level and the wrap config
    // disagree; hold position rather than overwrite a static cell.
    if blocked(world, dest.0, dest.1) {
        return;
    }
    if dest == (row, col) {
        return;
    }

    world.set_code(row, col, cell::EMPTY);
    world.set_code(dest.0, dest.1, cell::HEAD);
    world.head = dest;
}

fn blocked(world: &WorldState, row: usize, col: usize) -> bool {
    Cell::from_code(world.code_at(row, col)).map_or(false, Cell::blocks_head)
}

/// The cell one step ahead in the current heading, or None at the grid
/// edge.
fn forward_cell(world: &WorldState, row: usize, col: usize) -> Option<(usize, usize)> {
    let (dr, dc) = world.direction.delta();
    let r = row as i32 + dr;
    let c = col as i32 + dc;
    if r < 0 || c < 0 || r >= world.rows as i32 || c >= world.cols as i32 {
        None
    } else {
        Some((r as usize, c as usize))
    }
}

/// Direction-specific fallback: jump to the opposite side of the
/// playable interior, keeping the perpendicular coordinate. Offsets come
/// from configuration, clamped to the grid.
fn wrap_target(world: &WorldState, row: usize, col: usize) -> (usize, usize) {
    let w = &world.wrap;
    let last_row = world.rows - 1;
    let last_col = world.cols - 1;
    match world.direction {
        Direction::Up => (last_row.saturating_sub(w.bottom_margin), col),
        Direction::Down => (w.top_row.min(last_row), col),
        Direction::Left => (row, last_col.saturating_sub(w.right_margin)),
        Direction::Right => (row, w.left_col.min(last_col)),
    }
}
