/// Heading state machine: four states, any state may transition to any
/// other on a key press (instant reversal included). The current value
/// drives both movement and the head glyph orientation.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// One-cell step as a `(row, col)` delta.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

impl Default for Direction {
    fn default() -> Self {
        Direction::Up
    }
}
