use anyhow::{ensure, Result};

use crate::canvas::{Align, Canvas, Image, Rect, Rgb, TextStyle};
use crate::config::{
    DIALOG_HALF_HEIGHT_PX, DIALOG_MARGIN_TILES, GRID_COLS, GRID_ROWS, STATUS_BAR_ROWS,
};
use crate::grid::{Grid, Tile};
use crate::Coords;

const EMPTY_COLOR: Rgb = Rgb::new(0x00, 0x00, 0x00);
const SNAKE_COLOR: Rgb = Rgb::new(0x00, 0x80, 0x00);
const PELLET_COLOR: Rgb = Rgb::new(0xFF, 0x00, 0x00);
const DEAD_COLOR: Rgb = Rgb::new(0x00, 0xFF, 0x00);

const STATUS_BAR_COLOR: Rgb = Rgb::new(0x33, 0x33, 0x33);
const STATUS_TEXT: TextStyle =
    TextStyle { fill: Rgb::new(0xFF, 0xFF, 0xFF), stroke: None, bold: false };
const DIALOG_TEXT: TextStyle = TextStyle {
    fill: Rgb::new(0xD3, 0xD3, 0xD3),
    stroke: Some(Rgb::new(0x00, 0x00, 0x00)),
    bold: true,
};

/// What the game engine draws through. Implementations only project state; they never change it.
pub trait Screen {
    fn draw_tile(&mut self, pos: Coords, tile: Tile);
    fn draw_status_bar(&mut self, length: usize);
    /// Show `text` centered over the board, or restore the covered tiles when `None`.
    fn draw_dialog(&mut self, grid: &Grid, text: Option<&str>);
}

fn tile_color(tile: Tile) -> Rgb {
    match tile {
        Tile::Empty => EMPTY_COLOR,
        Tile::Snake => SNAKE_COLOR,
        Tile::Pellet => PELLET_COLOR,
        Tile::Dead => DEAD_COLOR,
    }
}

/// Tile-space bounds of the dialog box, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DialogBox {
    start_x: u16,
    last_x: u16,
    start_y: u16,
    last_y: u16,
}

impl DialogBox {
    fn new(max_x: u16, max_y: u16, tile_h: u32) -> Self {
        let mid = (max_y + 1) / 2;
        let half = ((DIALOG_HALF_HEIGHT_PX + tile_h - 1) / tile_h).min(max_y as u32) as u16;

        DialogBox {
            start_x: DIALOG_MARGIN_TILES.min(max_x),
            last_x: max_x.saturating_sub(DIALOG_MARGIN_TILES).max(DIALOG_MARGIN_TILES.min(max_x)),
            start_y: (mid + 1).saturating_sub(half),
            last_y: (mid + half + 1).min(max_y),
        }
    }
}

pub struct Renderer {
    canvas: Canvas,
    cols: u16,
    rows: u16,
    tile_w: u32,
    tile_h: u32,
    tiles: [Image; 4],
    dialog: DialogBox,
    status_drawn: bool,
}

impl Renderer {
    pub fn new(canvas: Canvas) -> Result<Self> {
        Self::with_board(canvas, GRID_COLS, GRID_ROWS)
    }

    /// Derives the tile size from the surface and snaps the surface width to whole tiles.
    pub fn with_board(mut canvas: Canvas, cols: u16, rows: u16) -> Result<Self> {
        let total_rows = (rows + STATUS_BAR_ROWS) as u32;
        ensure!(
            canvas.width() >= cols as u32 && canvas.height() >= total_rows,
            "drawing surface of {}x{} pixels cannot fit a {}x{} board plus status bar",
            canvas.width(),
            canvas.height(),
            cols,
            rows
        );

        let tile_w = (canvas.width() + cols as u32 - 1) / cols as u32;
        let tile_h = (canvas.height() + total_rows - 1) / total_rows;
        canvas.set_width(tile_w * cols as u32);

        let tiles = Tile::ALL.map(|tile| Image::solid(tile_w, tile_h, tile_color(tile)));
        let dialog = DialogBox::new(cols - 1, rows - 1, tile_h);

        Ok(Renderer { canvas, cols, rows, tile_w, tile_h, tiles, dialog, status_drawn: false })
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn tile_size(&self) -> (u32, u32) {
        (self.tile_w, self.tile_h)
    }

    fn status_bar_rect(&self) -> Rect {
        Rect::new(
            0,
            self.tile_h * self.rows as u32,
            self.canvas.width(),
            self.tile_h * STATUS_BAR_ROWS as u32,
        )
    }

    fn dialog_rect(&self) -> Rect {
        let d = self.dialog;
        Rect::new(
            d.start_x as u32 * self.tile_w,
            d.start_y as u32 * self.tile_h,
            (d.last_x - d.start_x + 1) as u32 * self.tile_w,
            (d.last_y - d.start_y + 1) as u32 * self.tile_h,
        )
    }
}

impl Screen for Renderer {
    fn draw_tile(&mut self, pos: Coords, tile: Tile) {
        debug_assert!(pos.0 < self.cols && pos.1 < self.rows);
        let image = &self.tiles[tile.index()];
        self.canvas.put_image(image, self.tile_w * pos.0 as u32, self.tile_h * pos.1 as u32);
    }

    fn draw_status_bar(&mut self, length: usize) {
        let bar = self.status_bar_rect();
        let text = format!("Length: {}", length);
        let text_x = self.tile_w;
        let text_y = bar.y + bar.h / 2;

        // After the first draw only the text area needs repainting.
        let fill = if self.status_drawn {
            Rect::new(bar.x, bar.y, (text_x * 2 + text.len() as u32).min(bar.w), bar.h)
        } else {
            bar
        };
        self.status_drawn = true;

        self.canvas.fill_rect(fill, STATUS_BAR_COLOR);
        self.canvas.clear_text(bar);
        self.canvas.fill_text(&text, text_x, text_y, Align::Left, None, STATUS_TEXT);
    }

    fn draw_dialog(&mut self, grid: &Grid, text: Option<&str>) {
        let d = self.dialog;
        for x in d.start_x..=d.last_x {
            for y in d.start_y..=d.last_y {
                self.draw_tile((x, y), grid.get((x, y)));
            }
        }
        self.canvas.clear_text(self.dialog_rect());

        if let Some(text) = text {
            let center_x = (self.canvas.width() + 1) / 2;
            let center_y = (self.canvas.height() + 1) / 2;
            let max_width = Some(self.tile_w * (d.last_x - d.start_x) as u32);
            self.canvas.fill_text(text, center_x, center_y, Align::Center, max_width, DIALOG_TEXT);
        }
    }
}
