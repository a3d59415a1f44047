/// Entry point and session loop.

mod config;
mod domain;
mod sim;
mod ui;

use std::time::{Duration, Instant};

use crossterm::event::KeyCode;

use config::GameConfig;
use domain::direction::Direction;
use domain::geometry::Geometry;
use sim::level::load_level;
use sim::step;
use sim::world::WorldState;
use ui::input::InputState;
use ui::painter::format_clock;
use ui::renderer::Renderer;

const FRAME_SLEEP: Duration = Duration::from_millis(5);

fn main() {
    let config = GameConfig::load();

    let mut world = WorldState::new();
    world.wrap = config.wrap;
    world.tick_interval_ms = config.speed.tick_interval_ms();

    if let Err(e) = load_level(&mut world, 0, &config) {
        eprintln!("Could not load the first maze: {e}");
        std::process::exit(1);
    }

    let geom = Geometry::new(
        config.geometry.cell_width,
        config.geometry.cell_height,
        config.geometry.stroke_thickness,
    );

    let mut renderer = Renderer::new();
    if let Err(e) = renderer.init() {
        eprintln!("Terminal init failed: {e}");
        return;
    }

    let result = session_loop(&mut world, &mut renderer, &geom);

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }

    if let Err(e) = result {
        eprintln!("Session error: {e}");
    }

    println!();
    println!(
        "Maze Winder: {} on {}, {} points.",
        format_clock(world.elapsed_ms),
        world.level_name,
        world.score
    );
}

// ── Key Constants ──

const KEYS_LEFT: &[KeyCode] = &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const KEYS_RIGHT: &[KeyCode] = &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];
const KEYS_UP: &[KeyCode] = &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')];
const KEYS_DOWN: &[KeyCode] = &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')];
const KEYS_PAUSE: &[KeyCode] = &[KeyCode::Char('p'), KeyCode::Char('P')];
const KEYS_RESTART: &[KeyCode] = &[KeyCode::Char('r'), KeyCode::Char('R')];
const KEYS_QUIT: &[KeyCode] = &[KeyCode::Char('q'), KeyCode::Char('Q'), KeyCode::Esc];

fn session_loop(
    world: &mut WorldState,
    renderer: &mut Renderer,
    geom: &Geometry,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut kb = InputState::new();
    let tick_rate = Duration::from_millis(world.tick_interval_ms);

    // One immediate tick on start, then the periodic timer takes over.
    step::tick(world);
    let mut last_tick = Instant::now();

    loop {
        kb.drain_events();

        if kb.ctrl_c_pressed() || kb.any_pressed(KEYS_QUIT) {
            break;
        }

        // Steering takes effect on the next tick; no immediate move.
        if let Some(dir) = detect_steering(&kb) {
            world.direction = dir;
        }

        if kb.any_pressed(KEYS_PAUSE) {
            world.paused = !world.paused;
        }

        // Restart = reset session state, immediate tick, rearm the timer.
        if kb.any_pressed(KEYS_RESTART) {
            world.restart();
            step::tick(world);
            last_tick = Instant::now();
        }

        if last_tick.elapsed() >= tick_rate {
            step::tick(world);
            last_tick = Instant::now();
        }

        // Render every frame: steering, pause label and restart show up
        // immediately, not on the next tick.
        renderer.render(world, geom)?;
        std::thread::sleep(FRAME_SLEEP);
    }

    Ok(())
}

fn detect_steering(kb: &InputState) -> Option<Direction> {
    if kb.any_pressed(KEYS_UP) {
        Some(Direction::Up)
    } else if kb.any_pressed(KEYS_DOWN) {
        Some(Direction::Down)
    } else if kb.any_pressed(KEYS_LEFT) {
        Some(Direction::Left)
    } else if kb.any_pressed(KEYS_RIGHT) {
        Some(Direction::Right)
    } else {
        None
    }
}
