/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or incomplete.

use serde::Deserialize;
use std::path::PathBuf;

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub speed: SpeedConfig,
    pub geometry: GeometryConfig,
    pub wrap: WrapConfig,
    pub levels_dir: PathBuf,
}

#[derive(Clone, Debug)]
pub struct SpeedConfig {
    /// Head cells traversed per second; the tick period is derived.
    pub cells_per_sec: u32,
}

impl SpeedConfig {
    pub fn tick_interval_ms(&self) -> u64 {
        1000 / self.cells_per_sec.max(1) as u64
    }
}

/// Pixel geometry of one maze cell. One pixel = one terminal cell, so
/// the defaults keep a 20-column map inside a regular terminal.
#[derive(Clone, Debug)]
pub struct GeometryConfig {
    pub cell_width: i32,
    pub cell_height: i32,
    pub stroke_thickness: i32,
}

/// Wrap fallback coordinates, as fixed offsets relative to the grid
/// edges. When the head is blocked it jumps to the opposite side:
/// blocked moving down → `top_row`; blocked up → `rows-1-bottom_margin`;
/// blocked right → `left_col`; blocked left → `cols-1-right_margin`.
/// These describe the playable interior, they are not derived from the
/// maze contents.
#[derive(Clone, Copy, Debug)]
pub struct WrapConfig {
    pub top_row: usize,
    pub bottom_margin: usize,
    pub left_col: usize,
    pub right_margin: usize,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    speed: TomlSpeed,
    #[serde(default)]
    geometry: TomlGeometry,
    #[serde(default)]
    movement: TomlMovement,
    #[serde(default)]
    general: TomlGeneral,
}

#[derive(Deserialize, Debug)]
struct TomlSpeed {
    #[serde(default = "default_cells_per_sec")]
    cells_per_sec: u32,
}

#[derive(Deserialize, Debug)]
struct TomlGeometry {
    #[serde(default = "default_cell_width")]
    cell_width: i32,
    #[serde(default = "default_cell_height")]
    cell_height: i32,
    #[serde(default = "default_stroke")]
    stroke_thickness: i32,
}

#[derive(Deserialize, Debug)]
struct TomlMovement {
    #[serde(default = "default_wrap_top")]
    wrap_top_row: usize,
    #[serde(default = "default_wrap_bottom")]
    wrap_bottom_margin: usize,
    #[serde(default = "default_wrap_left")]
    wrap_left_col: usize,
    #[serde(default = "default_wrap_right")]
    wrap_right_margin: usize,
}

#[derive(Deserialize, Debug)]
struct TomlGeneral {
    #[serde(default = "default_levels_dir")]
    levels_dir: String,
}

// ── Defaults ──

fn default_cells_per_sec() -> u32 { 1 }
fn default_cell_width() -> i32 { 4 }
fn default_cell_height() -> i32 { 2 }
fn default_stroke() -> i32 { 1 }

// The built-in map keeps two HUD rows, a border ring and a wall ring at
// the top, and a wall ring plus border at the other three sides.
fn default_wrap_top() -> usize { 4 }
fn default_wrap_bottom() -> usize { 2 }
fn default_wrap_left() -> usize { 2 }
fn default_wrap_right() -> usize { 2 }

fn default_levels_dir() -> String { "levels".into() }

impl Default for TomlSpeed {
    fn default() -> Self {
        TomlSpeed { cells_per_sec: default_cells_per_sec() }
    }
}

impl Default for TomlGeometry {
    fn default() -> Self {
        TomlGeometry {
            cell_width: default_cell_width(),
            cell_height: default_cell_height(),
            stroke_thickness: default_stroke(),
        }
    }
}

impl Default for TomlMovement {
    fn default() -> Self {
        TomlMovement {
            wrap_top_row: default_wrap_top(),
            wrap_bottom_margin: default_wrap_bottom(),
            wrap_left_col: default_wrap_left(),
            wrap_right_margin: default_wrap_right(),
        }
    }
}

impl Default for TomlGeneral {
    fn default() -> Self {
        TomlGeneral { levels_dir: default_levels_dir() }
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        let search_dirs = candidate_dirs();
        let toml_cfg = load_toml(&search_dirs);

        let levels_dir_str = &toml_cfg.general.levels_dir;
        let levels_dir = if PathBuf::from(levels_dir_str).is_absolute() {
            PathBuf::from(levels_dir_str)
        } else {
            search_dirs
                .iter()
                .map(|d| d.join(levels_dir_str))
                .find(|p| p.is_dir())
                .unwrap_or_else(|| PathBuf::from(levels_dir_str))
        };

        GameConfig {
            speed: SpeedConfig {
                cells_per_sec: toml_cfg.speed.cells_per_sec,
            },
            geometry: GeometryConfig {
                cell_width: toml_cfg.geometry.cell_width.max(2),
                cell_height: toml_cfg.geometry.cell_height.max(1),
                stroke_thickness: toml_cfg.geometry.stroke_thickness.max(1),
            },
            wrap: WrapConfig {
                top_row: toml_cfg.movement.wrap_top_row,
                bottom_margin: toml_cfg.movement.wrap_bottom_margin,
                left_col: toml_cfg.movement.wrap_left_col,
                right_margin: toml_cfg.movement.wrap_right_margin,
            },
            levels_dir,
        }
    }
}

impl Default for WrapConfig {
    fn default() -> Self {
        WrapConfig {
            top_row: default_wrap_top(),
            bottom_margin: default_wrap_bottom(),
            left_col: default_wrap_left(),
            right_margin: default_wrap_right(),
        }
    }
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for config.toml in candidate directories.
fn load_toml(search_dirs: &[PathBuf]) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(text) => match toml::from_str::<TomlConfig>(&text) {
                    Ok(cfg) => return cfg,
                    Err(e) => {
                        eprintln!("Warning: config.toml parse error: {e}");
                        eprintln!("Using default settings.");
                        return TomlConfig::default();
                    }
                },
                Err(e) => {
                    eprintln!("Warning: could not read {}: {e}", path.display());
                }
            }
        }
    }
    TomlConfig::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_one_gives_one_second_ticks() {
        let s = SpeedConfig { cells_per_sec: 1 };
        assert_eq!(s.tick_interval_ms(), 1000);
        let s = SpeedConfig { cells_per_sec: 4 };
        assert_eq!(s.tick_interval_ms(), 250);
    }

    #[test]
    fn zero_speed_does_not_divide_by_zero() {
        let s = SpeedConfig { cells_per_sec: 0 };
        assert_eq!(s.tick_interval_ms(), 1000);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let cfg: TomlConfig = toml::from_str("[speed]\ncells_per_sec = 3\n").unwrap();
        assert_eq!(cfg.speed.cells_per_sec, 3);
        assert_eq!(cfg.geometry.cell_width, default_cell_width());
        assert_eq!(cfg.movement.wrap_top_row, default_wrap_top());
        assert_eq!(cfg.general.levels_dir, "levels");
    }
}
