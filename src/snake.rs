use std::collections::VecDeque;

use crate::Coords;
use Direction::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub fn unit(self) -> (i16, i16) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    /// The neighbouring cell in this direction, or `None` past `[0, max_x] x [0, max_y]`.
    pub fn step(self, pos: Coords, max_x: u16, max_y: u16) -> Option<Coords> {
        let (dx, dy) = self.unit();
        let x = pos.0.checked_add_signed(dx)?;
        let y = pos.1.checked_add_signed(dy)?;

        if x > max_x || y > max_y {
            return None;
        }

        Some((x, y))
    }
}

pub struct Snake {
    body: VecDeque<Coords>,
    length: usize,
    direction: Direction,
}

impl Snake {
    pub fn new(pos: Coords, direction: Direction) -> Self {
        Snake { body: VecDeque::from(vec![pos]), length: 1, direction }
    }

    /// Segments from tail to head.
    pub fn body(&self) -> &VecDeque<Coords> {
        &self.body
    }

    pub fn head(&self) -> Coords {
        *self.body.back().expect("snake always has a head")
    }

    /// Target length; may run ahead of `body().len()` right after eating.
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub fn grow(&mut self, amount: usize) {
        self.length += amount;
    }

    /// Pushes `new_head` and drops the tail once the body has reached its target
    /// length. Returns the cell the tail vacated, if any.
    pub fn advance(&mut self, new_head: Coords) -> Option<Coords> {
        let old_tail = if self.body.len() >= self.length {
            self.body.pop_front()
        } else {
            None
        };

        self.body.push_back(new_head);
        old_tail
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_pairs() {
        assert_eq!(Up.opposite(), Down);
        assert_eq!(Down.opposite(), Up);
        assert_eq!(Left.opposite(), Right);
        assert_eq!(Right.opposite(), Left);
    }

    #[test]
    fn step_stays_inside_bounds() {
        assert_eq!(Right.step((5, 5), 35, 27), Some((6, 5)));
        assert_eq!(Up.step((5, 5), 35, 27), Some((5, 4)));
        assert_eq!(Left.step((0, 0), 35, 27), None);
        assert_eq!(Up.step((0, 0), 35, 27), None);
        assert_eq!(Right.step((35, 3), 35, 27), None);
        assert_eq!(Down.step((3, 27), 35, 27), None);
    }

    #[test]
    fn advance_drops_tail_at_target_length() {
        let mut snake = Snake::new((0, 0), Right);

        assert_eq!(snake.advance((1, 0)), Some((0, 0)));
        assert_eq!(snake.body().len(), 1);
        assert_eq!(snake.head(), (1, 0));
    }

    #[test]
    fn growth_keeps_tail_until_length_is_reached() {
        let mut snake = Snake::new((0, 0), Right);
        snake.grow(2);

        assert_eq!(snake.advance((1, 0)), None);
        assert_eq!(snake.advance((2, 0)), None);
        assert_eq!(snake.advance((3, 0)), Some((0, 0)));
        assert_eq!(snake.body().iter().copied().collect::<Vec<_>>(), vec![(1, 0), (2, 0), (3, 0)]);
        assert_eq!(snake.length(), 3);
    }
}
