//! Snake on a fixed 36x28 pixel grid, drawn to the terminal.
//!
//! The game engine in [`game`] owns all state and drives the board; everything
//! it draws goes through the [`render::Screen`] trait, so it runs headless in tests.

pub mod canvas;
pub mod config;
pub mod game;
pub mod grid;
pub mod input;
pub mod render;
pub mod snake;
pub mod term;
pub mod timer;

/// Grid position as `(x, y)`, origin top-left.
pub type Coords = (u16, u16);
