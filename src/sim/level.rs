/// Level store.
///
/// ## Sources (priority order):
///   1. `levels/` directory (individual `.txt` files, sorted by name)
///   2. Built-in embedded levels
///
/// ## Level file format (`.txt`):
///   Line 1: `# Level Name`
///   Lines:  rows of whitespace-separated integer cell codes
///
/// ## Code legend:
///    0 empty        1 wall        -1 non-reachable
///   -2 timer slot  -3 score slot  71 head
///   41-44 border edges (left/top/right/bottom)
///   45-48 border corners (tl/tr/br/bl)
///   Codes outside the legend are kept in the grid and ignored by the
///   painter, so maps may carry forward-compatible markers.
///
/// Loading deep-copies the definition into the world and fails fast if
/// the grid is ragged or does not hold exactly one head cell.

use std::fmt;
use std::path::Path;

use crate::config::GameConfig;
use crate::domain::cell;
use crate::domain::direction::Direction;
use crate::sim::world::WorldState;

/// Runtime level data (owned grid, loaded from file or embedded).
pub struct LevelDef {
    pub name: String,
    pub grid: Vec<Vec<i32>>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum LevelError {
    Empty,
    Ragged { row: usize },
    NoHead,
    MultipleHeads(usize),
    NoSuchLevel(usize),
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelError::Empty => write!(f, "level has no rows"),
            LevelError::Ragged { row } => {
                write!(f, "level row {row} has a different width than row 0")
            }
            LevelError::NoHead => write!(f, "level contains no head cell (code 71)"),
            LevelError::MultipleHeads(n) => {
                write!(f, "level contains {n} head cells, expected exactly 1")
            }
            LevelError::NoSuchLevel(idx) => write!(f, "no level with index {idx}"),
        }
    }
}

impl std::error::Error for LevelError {}

// ══════════════════════════════════════════════════════════════
// Public API
// ══════════════════════════════════════════════════════════════

/// Load a level into the world state. The world receives an independent
/// copy of the definition; the stored level data is never mutated.
pub fn load_level(
    world: &mut WorldState,
    level_idx: usize,
    config: &GameConfig,
) -> Result<(), LevelError> {
    let levels = available_levels(config);
    let def = levels
        .get(level_idx)
        .ok_or(LevelError::NoSuchLevel(level_idx))?;

    let (rows, cols, head) = validate(&def.grid)?;

    world.base_grid = def.grid.clone();
    world.grid = def.grid.clone();
    world.rows = rows;
    world.cols = cols;
    world.head = head;
    world.head_spawn = head;
    world.direction = Direction::default();
    world.elapsed_ms = 0;
    world.score = 0;
    world.tick = 0;
    world.paused = false;
    world.level_name = def.name.clone();
    world.current_level = level_idx;
    world.total_levels = levels.len();

    Ok(())
}

/// Check the grid is rectangular and holds exactly one head cell.
/// Returns `(rows, cols, head position)`.
pub fn validate(grid: &[Vec<i32>]) -> Result<(usize, usize, (usize, usize)), LevelError> {
    if grid.is_empty() || grid[0].is_empty() {
        return Err(LevelError::Empty);
    }
    let cols = grid[0].len();
    let mut heads = vec![];
    for (r, row) in grid.iter().enumerate() {
        if row.len() != cols {
            return Err(LevelError::Ragged { row: r });
        }
        for (c, &code) in row.iter().enumerate() {
            if code == cell::HEAD {
                heads.push((r, c));
            }
        }
    }
    match heads.len() {
        0 => Err(LevelError::NoHead),
        1 => Ok((grid.len(), cols, heads[0])),
        n => Err(LevelError::MultipleHeads(n)),
    }
}

// ══════════════════════════════════════════════════════════════
// Internal: sources
// ══════════════════════════════════════════════════════════════

fn available_levels(config: &GameConfig) -> Vec<LevelDef> {
    let dir = &config.levels_dir;
    if dir.is_dir() {
        let mut levels = load_from_directory(dir);
        if !levels.is_empty() {
            levels.sort_by(|a, b| a.0.cmp(&b.0));
            return levels.into_iter().map(|(_, def)| def).collect();
        }
    }
    embedded_levels()
}

fn load_from_directory(dir: &Path) -> Vec<(String, LevelDef)> {
    let mut results = vec![];

    let entries = match std::fs::read_dir(dir) {
        Ok(e) => e,
        Err(_) => return results,
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().map_or(false, |e| e == "txt") {
            if let Ok(content) = std::fs::read_to_string(&path) {
                if let Some(def) = parse_level_file(&content) {
                    let filename = path
                        .file_name()
                        .unwrap_or_default()
                        .to_string_lossy()
                        .to_string();
                    results.push((filename, def));
                } else {
                    eprintln!("Warning: skipping malformed level {}", path.display());
                }
            }
        }
    }

    results
}

// ══════════════════════════════════════════════════════════════
// Single-level file parsing
// ══════════════════════════════════════════════════════════════

/// Parse a level from text content: an optional `# Name` header followed
/// by rows of whitespace-separated integers. Returns None if any row
/// fails to parse or no rows are present.
fn parse_level_file(content: &str) -> Option<LevelDef> {
    let mut name = String::new();
    let mut grid: Vec<Vec<i32>> = vec![];

    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix('#') {
            if name.is_empty() {
                name = rest.trim().to_string();
            }
            continue;
        }
        let mut row = vec![];
        for tok in trimmed.split_whitespace() {
            match tok.parse::<i32>() {
                Ok(code) => row.push(code),
                Err(_) => return None,
            }
        }
        grid.push(row);
    }

    if grid.is_empty() {
        return None;
    }
    if name.is_empty() {
        name = "Unnamed Maze".to_string();
    }

    Some(LevelDef { name, grid })
}

// ══════════════════════════════════════════════════════════════
// Embedded fallback levels
// ══════════════════════════════════════════════════════════════

/// Char shorthand for the embedded maps below. Only used at build time
/// of the built-in levels; files carry raw integers.
fn code_for_char(ch: char) -> i32 {
    match ch {
        '.' => cell::EMPTY,
        '#' => cell::WALL,
        'T' => cell::TIMER,
        'P' => cell::SCORE,
        '<' => 41,
        '^' => 42,
        '>' => 43,
        'v' => 44,
        '1' => 45,
        '2' => 46,
        '3' => 47,
        '4' => 48,
        '@' => cell::HEAD,
        _ => cell::NON_REACHABLE,
    }
}

fn embedded_levels() -> Vec<LevelDef> {
    vec![
        // Two HUD rows, a stroke-border ring, a wall ring, open interior.
        make_embedded("Green Yard", &[
            "                    ",
            " T   P              ",
            "1^^^^^^^^^^^^^^^^^^2",
            "<##################>",
            "<#................#>",
            "<#................#>",
            "<#................#>",
            "<#................#>",
            "<#................#>",
            "<#................#>",
            "<#................#>",
            "<#................#>",
            "<#........@.......#>",
            "<#................#>",
            "<#................#>",
            "<#................#>",
            "<#................#>",
            "<#................#>",
            "<#................#>",
            "<#................#>",
            "<##################>",
            "4vvvvvvvvvvvvvvvvvv3",
        ]),
        make_embedded("Pillars", &[
            "                ",
            " T    P         ",
            "1^^^^^^^^^^^^^^2",
            "<##############>",
            "<#............#>",
            "<#..##....##..#>",
            "<#............#>",
            "<#.....@......#>",
            "<#............#>",
            "<#..##....##..#>",
            "<#............#>",
            "<##############>",
            "4vvvvvvvvvvvvvv3",
        ]),
    ]
}

fn make_embedded(name: &str, map: &[&str]) -> LevelDef {
    LevelDef {
        name: name.to_string(),
        grid: map
            .iter()
            .map(|row| row.chars().map(code_for_char).collect())
            .collect(),
    }
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════
