use crate::Coords;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Empty,
    Snake,
    Pellet,
    Dead,
}

impl Tile {
    pub const ALL: [Tile; 4] = [Tile::Empty, Tile::Snake, Tile::Pellet, Tile::Dead];

    pub fn index(self) -> usize {
        match self {
            Tile::Empty => 0,
            Tile::Snake => 1,
            Tile::Pellet => 2,
            Tile::Dead => 3,
        }
    }
}

/// Fixed-size board of tiles, stored column-major like `grid[x][y]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cols: u16,
    rows: u16,
    tiles: Vec<Tile>,
}

impl Grid {
    pub fn new(cols: u16, rows: u16) -> Self {
        assert!(cols > 0 && rows > 0, "grid must have at least one cell");
        Grid { cols, rows, tiles: vec![Tile::Empty; cols as usize * rows as usize] }
    }

    pub fn max_x(&self) -> u16 {
        self.cols - 1
    }

    pub fn max_y(&self) -> u16 {
        self.rows - 1
    }

    pub fn contains(&self, pos: Coords) -> bool {
        pos.0 < self.cols && pos.1 < self.rows
    }

    /// Panics when `pos` is off the board; gameplay bounds are checked before this.
    pub fn get(&self, pos: Coords) -> Tile {
        self.tiles[self.idx(pos)]
    }

    pub fn set(&mut self, pos: Coords, tile: Tile) {
        let i = self.idx(pos);
        self.tiles[i] = tile;
    }

    pub fn tiles(&self) -> impl Iterator<Item = (Coords, Tile)> + '_ {
        let rows = self.rows;
        self.tiles.iter().enumerate().map(move |(i, tile)| {
            let x = (i / rows as usize) as u16;
            let y = (i % rows as usize) as u16;
            ((x, y), *tile)
        })
    }

    pub fn count(&self, tile: Tile) -> usize {
        self.tiles.iter().filter(|t| **t == tile).count()
    }

    #[inline(always)]
    fn idx(&self, pos: Coords) -> usize {
        assert!(
            self.contains(pos),
            "grid access out of range: {:?} on a {}x{} board",
            pos,
            self.cols,
            self.rows
        );
        pos.0 as usize * self.rows as usize + pos.1 as usize
    }
}
