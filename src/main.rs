use std::fs::File;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use log::{error, info};
use simplelog::{Config, LevelFilter, WriteLogger};

use pixel_snake::canvas::Canvas;
use pixel_snake::config::{GameConfig, GRID_COLS, GRID_ROWS, LOG_FILE, STATUS_BAR_ROWS};
use pixel_snake::game::SnakeGame;
use pixel_snake::input::{is_ctrl_c, KeyPress};
use pixel_snake::render::Renderer;
use pixel_snake::term::TermManager;

/// Input wait while no timer is running.
const IDLE_POLL: Duration = Duration::from_millis(250);

fn main() -> Result<()> {
    // The terminal is in raw mode while playing, so log to a file.
    WriteLogger::init(LevelFilter::Debug, Config::default(), File::create(LOG_FILE)?)
        .context("Error initializing logger")?;
    info!("Starting snake");

    let mut term = TermManager::new();
    term.setup()?;

    let result = play(&mut term);

    // Always try to restore the terminal, even if the game loop failed.
    let restored = term.restore();
    if let Err(e) = &result {
        error!("Exiting on error: {:#}", e);
    }
    result.and(restored)
}

fn play(term: &mut TermManager) -> Result<()> {
    let (cols, rows) = term.get_terminal_size()?;

    // One pixel per column, two per row, trimmed to whole tiles.
    let width = (cols / GRID_COLS) as u32 * GRID_COLS as u32;
    let board_rows = (GRID_ROWS + STATUS_BAR_ROWS) as u32;
    let height = (rows as u32 * 2 / board_rows) * board_rows;
    let canvas = Canvas::new(width, height)
        .with_context(|| format!("Terminal of {}x{} is too small for the board", cols, rows))?;

    let mut renderer = Renderer::new(canvas)?;
    let canvas = renderer.canvas();
    info!("Surface {}x{} px, tiles {:?}", canvas.width(), canvas.height(), renderer.tile_size());

    let mut game = SnakeGame::new(GameConfig::default());
    game.reset(&mut renderer);

    loop {
        term.present(renderer.canvas())?;

        let timeout = game.time_until_tick(Instant::now()).unwrap_or(IDLE_POLL);
        for key_ev in term.read_key_events(timeout)? {
            if is_ctrl_c(&key_ev) {
                info!("Quit at length {}", game.snake_length());
                return Ok(());
            }
            game.handle_key(KeyPress::from(key_ev), &mut renderer);
        }

        if game.tick_due(Instant::now()) {
            game.tick(&mut renderer);
        }
    }
}
