use std::time::{Duration, Instant};

use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::config::{GameConfig, GRID_COLS, GRID_ROWS, PELLET_SAMPLE_ATTEMPTS};
use crate::grid::{Grid, Tile};
use crate::input::{DirectionQueue, KeyPress};
use crate::render::Screen;
use crate::snake::{Direction, Snake};
use crate::timer::TickTimer;
use crate::Coords;

const ORIGIN: Coords = (0, 0);
const START_DIRECTION: Direction = Direction::Right;

const BEGIN_MSG: &str = "Press an arrow key to begin...";
const PAUSED_MSG: &str = "Press an arrow key to unpause...";
const GAME_OVER_MSG: &str = "Game Over. Press enter to start a new game...";
const WON_MSG: &str = "You won! Press enter to start a new game...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Paused,
    Unpaused,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running; nothing changed.
    Idle,
    Moved,
    Ate,
    HitWall,
    HitSelf,
    /// The pellet just eaten left no empty cell for the next one.
    BoardFull,
}

/// Everything that belongs to one round. Replaced wholesale on reset.
struct Round {
    grid: Grid,
    snake: Snake,
    queue: DirectionQueue,
    state: GameState,
}

impl Round {
    fn new() -> Self {
        let mut grid = Grid::new(GRID_COLS, GRID_ROWS);
        grid.set(ORIGIN, Tile::Snake);

        Round {
            grid,
            snake: Snake::new(ORIGIN, START_DIRECTION),
            queue: DirectionQueue::new(),
            state: GameState::Paused,
        }
    }
}

pub struct SnakeGame {
    config: GameConfig,
    round: Round,
    timer: Option<TickTimer>,
    rng: StdRng,
}

impl SnakeGame {
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    pub fn with_rng(config: GameConfig, rng: StdRng) -> Self {
        SnakeGame { config, round: Round::new(), timer: None, rng }
    }

    pub fn state(&self) -> GameState {
        self.round.state
    }

    pub fn grid(&self) -> &Grid {
        &self.round.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.round.snake
    }

    pub fn snake_length(&self) -> usize {
        self.round.snake.length()
    }

    pub fn timer_running(&self) -> bool {
        self.timer.is_some()
    }

    ///////////////////////////////////////////////////////////////////////////

    pub fn reset(&mut self, screen: &mut impl Screen) {
        self.timer = None;
        self.round = Round::new();

        for (pos, tile) in self.round.grid.tiles() {
            screen.draw_tile(pos, tile);
        }
        // A fresh board always has room for the first pellet.
        let _ = self.spawn_pellet(screen);
        screen.draw_status_bar(self.round.snake.length());
        screen.draw_dialog(&self.round.grid, Some(BEGIN_MSG));

        info!("New round, tick interval {:?}", self.config.tick_interval);
    }

    pub fn pause(&mut self, screen: &mut impl Screen) {
        self.timer = None;
        self.round.state = GameState::Paused;
        screen.draw_dialog(&self.round.grid, Some(PAUSED_MSG));
        debug!("Paused at length {}", self.round.snake.length());
    }

    pub fn unpause(&mut self, screen: &mut impl Screen) {
        screen.draw_dialog(&self.round.grid, None);
        self.round.state = GameState::Unpaused;
        self.timer = Some(TickTimer::start(self.config.tick_interval, Instant::now()));
        debug!("Unpaused");
    }

    fn game_over(&mut self, screen: &mut impl Screen, outcome: TickOutcome) {
        let head = self.round.snake.head();
        self.round.grid.set(head, Tile::Dead);
        screen.draw_tile(head, Tile::Dead);

        self.timer = None;
        self.round.state = GameState::GameOver;

        let msg = if outcome == TickOutcome::BoardFull { WON_MSG } else { GAME_OVER_MSG };
        screen.draw_dialog(&self.round.grid, Some(msg));

        info!("Game over ({:?}) at length {}", outcome, self.round.snake.length());
    }

    /// Whether the running timer has come due; consumes the due tick.
    pub fn tick_due(&mut self, now: Instant) -> bool {
        match self.timer.as_mut() {
            Some(timer) => timer.poll(now),
            None => false,
        }
    }

    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        self.timer.as_ref().map(|timer| timer.time_until_due(now))
    }

    /// Advance the snake one cell.
    pub fn tick(&mut self, screen: &mut impl Screen) -> TickOutcome {
        if self.round.state != GameState::Unpaused {
            return TickOutcome::Idle;
        }

        if let Some(dir) = self.round.queue.pop() {
            self.round.snake.set_direction(dir);
        }

        let round = &mut self.round;
        let (max_x, max_y) = (round.grid.max_x(), round.grid.max_y());
        let next = match round.snake.direction().step(round.snake.head(), max_x, max_y) {
            Some(pos) => pos,
            None => {
                self.game_over(screen, TickOutcome::HitWall);
                return TickOutcome::HitWall;
            }
        };

        let ate = match round.grid.get(next) {
            Tile::Pellet => true,
            Tile::Empty => false,
            Tile::Snake | Tile::Dead => {
                self.game_over(screen, TickOutcome::HitSelf);
                return TickOutcome::HitSelf;
            }
        };

        if ate {
            round.snake.grow(self.config.pellet_growth);
            screen.draw_status_bar(round.snake.length());
        }

        if let Some(old_tail) = round.snake.advance(next) {
            round.grid.set(old_tail, Tile::Empty);
            screen.draw_tile(old_tail, Tile::Empty);
        }
        round.grid.set(next, Tile::Snake);
        screen.draw_tile(next, Tile::Snake);

        if !ate {
            return TickOutcome::Moved;
        }

        if self.spawn_pellet(screen).is_none() {
            self.game_over(screen, TickOutcome::BoardFull);
            return TickOutcome::BoardFull;
        }
        TickOutcome::Ate
    }

    pub fn handle_key(&mut self, press: KeyPress, screen: &mut impl Screen) {
        if press.repeat {
            return;
        }

        if self.round.state == GameState::GameOver {
            if press.key.is_confirm() {
                self.reset(screen);
            }
            return;
        }

        let direction = press.key.direction();
        if let Some(dir) = direction {
            let current = self.round.snake.direction();
            if !self.round.queue.push(dir, current) {
                trace!("Rejected turn {:?} after {:?}", dir, self.round.queue.preceding(current));
            }
        }

        match (self.round.state, direction) {
            (GameState::Unpaused, None) => self.pause(screen),
            (GameState::Paused, Some(_)) => self.unpause(screen),
            _ => {}
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    /// Rejection-sample a few random cells, then fall back to picking from the
    /// explicit empty set so a crowded board cannot spin forever.
    fn spawn_pellet(&mut self, screen: &mut impl Screen) -> Option<Coords> {
        let grid = &self.round.grid;
        let (max_x, max_y) = (grid.max_x(), grid.max_y());

        let sampled = (0..PELLET_SAMPLE_ATTEMPTS)
            .map(|_| (self.rng.gen_range(0..=max_x), self.rng.gen_range(0..=max_y)))
            .find(|pos| grid.get(*pos) == Tile::Empty);

        let pellet = match sampled {
            Some(pos) => Some(pos),
            None => {
                let empties: Vec<Coords> =
                    grid.tiles().filter(|(_, t)| *t == Tile::Empty).map(|(pos, _)| pos).collect();
                empties.choose(&mut self.rng).copied()
            }
        }?;

        self.round.grid.set(pellet, Tile::Pellet);
        screen.draw_tile(pellet, Tile::Pellet);
        debug!("Pellet placed at {:?}", pellet);
        Some(pellet)
    }
}
