/// Cell codes and their meanings.
/// The grid stores raw integers so that maps may carry codes this build
/// does not know about; `Cell::from_code` returns `None` for those and
/// the painter skips them.

pub const EMPTY: i32 = 0;
pub const WALL: i32 = 1;
pub const NON_REACHABLE: i32 = -1;
pub const TIMER: i32 = -2;
pub const SCORE: i32 = -3;
pub const HEAD: i32 = 71;

/// Which side of a cell a border segment runs along.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Edge {
    Left,   // 41
    Top,    // 42
    Right,  // 43
    Bottom, // 44
}

/// Border corner: joins two half-length segments.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Corner {
    TopLeft,     // 45
    TopRight,    // 46
    BottomRight, // 47
    BottomLeft,  // 48
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Cell {
    Empty,
    Wall,
    /// Outside the playable ring; nothing is drawn there.
    NonReachable,
    /// HUD slot showing elapsed time as MM:SS.
    Timer,
    /// HUD slot showing the point total.
    Score,
    BorderEdge(Edge),
    BorderCorner(Corner),
    /// The single moving entity. Orientation comes from the direction
    /// state, not from the code.
    Head,
}

impl Cell {
    /// Decode a raw map code. Unknown codes (including the reserved
    /// body/tail range 81-84 / 91-94) decode to `None`.
    pub fn from_code(code: i32) -> Option<Cell> {
        match code {
            EMPTY => Some(Cell::Empty),
            WALL => Some(Cell::Wall),
            NON_REACHABLE => Some(Cell::NonReachable),
            TIMER => Some(Cell::Timer),
            SCORE => Some(Cell::Score),
            41 => Some(Cell::BorderEdge(Edge::Left)),
            42 => Some(Cell::BorderEdge(Edge::Top)),
            43 => Some(Cell::BorderEdge(Edge::Right)),
            44 => Some(Cell::BorderEdge(Edge::Bottom)),
            45 => Some(Cell::BorderCorner(Corner::TopLeft)),
            46 => Some(Cell::BorderCorner(Corner::TopRight)),
            47 => Some(Cell::BorderCorner(Corner::BottomRight)),
            48 => Some(Cell::BorderCorner(Corner::BottomLeft)),
            HEAD => Some(Cell::Head),
            _ => None,
        }
    }

    /// Does this cell stop the head? Only walls block; everything else
    /// is either enterable or unreachable by construction of the level.
    pub fn blocks_head(self) -> bool {
        matches!(self, Cell::Wall)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_decode() {
        assert_eq!(Cell::from_code(0), Some(Cell::Empty));
        assert_eq!(Cell::from_code(1), Some(Cell::Wall));
        assert_eq!(Cell::from_code(-2), Some(Cell::Timer));
        assert_eq!(Cell::from_code(45), Some(Cell::BorderCorner(Corner::TopLeft)));
        assert_eq!(Cell::from_code(71), Some(Cell::Head));
    }

    #[test]
    fn unknown_codes_are_none() {
        // Reserved body/tail range and arbitrary junk
        for code in [81, 84, 91, 94, 2, -4, 40, 49, 70, 72, 9999] {
            assert_eq!(Cell::from_code(code), None, "code {code}");
        }
    }

    #[test]
    fn only_walls_block() {
        assert!(Cell::Wall.blocks_head());
        assert!(!Cell::Empty.blocks_head());
        assert!(!Cell::Timer.blocks_head());
        assert!(!Cell::BorderEdge(Edge::Top).blocks_head());
        assert!(!Cell::Head.blocks_head());
    }
}
