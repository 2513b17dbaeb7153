use std::collections::VecDeque;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::config::DIRECTION_QUEUE_CAPACITY;
use crate::snake::Direction::{self, *};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Enter,
    Char(char),
    Other,
}

impl Key {
    /// Arrow keys and WASD (either case); everything else is non-directional.
    pub fn direction(self) -> Option<Direction> {
        match self {
            Key::Left | Key::Char('a') | Key::Char('A') => Some(Left),
            Key::Right | Key::Char('d') | Key::Char('D') => Some(Right),
            Key::Up | Key::Char('w') | Key::Char('W') => Some(Up),
            Key::Down | Key::Char('s') | Key::Char('S') => Some(Down),
            _ => None,
        }
    }

    pub fn is_confirm(self) -> bool {
        self == Key::Enter
    }
}

impl From<KeyCode> for Key {
    fn from(code: KeyCode) -> Self {
        match code {
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Enter => Key::Enter,
            KeyCode::Char(c) => Key::Char(c),
            _ => Key::Other,
        }
    }
}

/// A key-down event. `repeat` marks terminal auto-repeat, which the game ignores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub repeat: bool,
}

impl KeyPress {
    pub fn new(key: Key) -> Self {
        KeyPress { key, repeat: false }
    }
}

impl From<KeyEvent> for KeyPress {
    fn from(ev: KeyEvent) -> Self {
        KeyPress { key: Key::from(ev.code), repeat: ev.kind == KeyEventKind::Repeat }
    }
}

pub fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}

/// Pending turns, consumed one per tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectionQueue {
    pending: VecDeque<Direction>,
}

impl DirectionQueue {
    pub fn new() -> Self {
        DirectionQueue { pending: VecDeque::with_capacity(DIRECTION_QUEUE_CAPACITY) }
    }

    /// Last queued direction, else `current`.
    pub fn preceding(&self, current: Direction) -> Direction {
        self.pending.back().copied().unwrap_or(current)
    }

    /// Enqueues `dir` unless it repeats or reverses the preceding direction, or
    /// the queue is full. Skipping repeats keeps a held key from crowding out the next turn.
    pub fn push(&mut self, dir: Direction, current: Direction) -> bool {
        let preceding = self.preceding(current);
        if dir == preceding || dir == preceding.opposite() {
            return false;
        }
        if self.pending.len() >= DIRECTION_QUEUE_CAPACITY {
            return false;
        }

        self.pending.push_back(dir);
        true
    }

    pub fn pop(&mut self) -> Option<Direction> {
        self.pending.pop_front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_and_wasd_map_to_directions() {
        assert_eq!(Key::Left.direction(), Some(Left));
        assert_eq!(Key::Right.direction(), Some(Right));
        assert_eq!(Key::Up.direction(), Some(Up));
        assert_eq!(Key::Down.direction(), Some(Down));

        assert_eq!(Key::Char('w').direction(), Some(Up));
        assert_eq!(Key::Char('A').direction(), Some(Left));
        assert_eq!(Key::Char('s').direction(), Some(Down));
        assert_eq!(Key::Char('D').direction(), Some(Right));
    }

    #[test]
    fn other_keys_are_non_directional() {
        assert_eq!(Key::Char('p').direction(), None);
        assert_eq!(Key::Char(' ').direction(), None);
        assert_eq!(Key::Enter.direction(), None);
        assert_eq!(Key::Other.direction(), None);
        assert!(Key::Enter.is_confirm());
        assert!(!Key::Char('e').is_confirm());
    }

    #[test]
    fn key_event_kind_marks_repeats() {
        let press = KeyPress::from(KeyEvent::from(KeyCode::Left));
        assert_eq!(press, KeyPress::new(Key::Left));

        let mut ev = KeyEvent::from(KeyCode::Left);
        ev.kind = KeyEventKind::Repeat;
        assert!(KeyPress::from(ev).repeat);
    }

    #[test]
    fn ctrl_c_detection() {
        assert!(is_ctrl_c(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!is_ctrl_c(&KeyEvent::from(KeyCode::Char('c'))));
    }

    #[test]
    fn reversal_of_current_direction_is_rejected() {
        let mut queue = DirectionQueue::new();

        assert!(!queue.push(Up, Down));
        assert!(queue.is_empty());
        assert!(!queue.push(Left, Right));
        assert!(queue.is_empty());
    }

    #[test]
    fn reversal_is_checked_against_last_queued() {
        let mut queue = DirectionQueue::new();

        assert!(queue.push(Up, Right));
        // Left is not a reversal of Up, Down is.
        assert!(!queue.push(Down, Right));
        assert!(queue.push(Left, Right));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.pop(), Some(Up));
        assert_eq!(queue.pop(), Some(Left));
    }

    #[test]
    fn repeating_the_preceding_direction_is_not_queued() {
        let mut queue = DirectionQueue::new();

        assert!(!queue.push(Right, Right));
        assert!(queue.is_empty());
        assert!(queue.push(Up, Right));
        assert!(!queue.push(Up, Right));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn full_queue_drops_new_turns() {
        let mut queue = DirectionQueue::new();
        assert!(queue.push(Up, Right));
        assert!(queue.push(Left, Right));
        assert!(queue.push(Down, Right));
        assert!(!queue.push(Right, Right));
        assert_eq!(queue.len(), DIRECTION_QUEUE_CAPACITY);
    }

    #[test]
    fn pop_on_empty_queue_is_a_no_op() {
        let mut queue = DirectionQueue::new();
        assert_eq!(queue.pop(), None);
        assert_eq!(queue.pop(), None);
        assert!(queue.is_empty());
    }
}
