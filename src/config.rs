use std::time::Duration;

/// Board width in tiles.
pub const GRID_COLS: u16 = 36;

/// Board height in tiles.
pub const GRID_ROWS: u16 = 28;

/// Tile rows reserved under the board for the "Length: N" bar.
pub const STATUS_BAR_ROWS: u16 = 2;

pub const DEFAULT_TICK_MS: u64 = 70;

/// Cells added to the target length for every pellet eaten.
pub const PELLET_GROWTH: usize = 4;

pub const DIRECTION_QUEUE_CAPACITY: usize = 3;

/// Random picks tried before falling back to the explicit empty-cell set.
pub const PELLET_SAMPLE_ATTEMPTS: usize = 64;

/// Half height of the dialog box in pixels, converted to whole tiles.
pub const DIALOG_HALF_HEIGHT_PX: u32 = 6;

/// Tiles left uncovered on each side of the dialog box.
pub const DIALOG_MARGIN_TILES: u16 = 4;

pub const LOG_FILE: &str = "snake.log";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub tick_interval: Duration,
    pub pellet_growth: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            tick_interval: Duration::from_millis(DEFAULT_TICK_MS),
            pellet_growth: PELLET_GROWTH,
        }
    }
}
