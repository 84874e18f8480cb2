//! Domain entities: movement directions and player commands

use std::fmt;

/// One of the two ways out of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Key the player types to take this path.
    pub fn key(self) -> char {
        match self {
            Direction::Left => 'L',
            Direction::Right => 'R',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
        }
    }
}

/// A single decision read from the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Go(Direction),
    Quit,
}

impl Command {
    /// Parse one line of player input.
    ///
    /// Accepts a single letter or the full word, case-insensitive:
    /// - `l`, `left`
    /// - `r`, `d`, `right`
    /// - `s`, `q`, `quit`
    ///
    /// Returns `None` for anything else, including empty input.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "l" | "left" => Some(Command::Go(Direction::Left)),
            "r" | "d" | "right" => Some(Command::Go(Direction::Right)),
            "s" | "q" | "quit" => Some(Command::Quit),
            _ => None,
        }
    }
}
