//! Explorer: the interactive traversal session
//!
//! The session is a small state machine over the current room. It loops
//! instead of recursing, so neither tree depth nor repeated bad input grows
//! the call stack.

use colored::Colorize;
use generational_arena::Index;
use tracing::{debug, info, instrument};

use crate::application::error_ext::IoResultExt;
use crate::application::ApplicationResult;
use crate::domain::{option_label, Command, Direction, DomainError, Room, RoomMap};
use crate::infrastructure::Console;

const SEPARATOR: &str = "==========================================";

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// The player chose to quit.
    Quit,
    /// The player walked into a room with no way out.
    ReachedLeaf,
    /// Input ran out before a decision was made.
    InputClosed,
}

/// Result of applying one line of input in a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Moved(Index, Direction),
    /// The room has no path that way; the player stays.
    Blocked(Direction),
    /// Unrecognized input; the player stays.
    Invalid,
    Quit,
}

#[derive(Debug, Clone, Copy)]
enum State {
    AtRoom(Index),
    Exited(Index, ExitReason),
}

/// Summary of a finished session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    pub final_room: String,
    /// Moves actually taken, from the root
    pub path: Vec<Direction>,
    pub reason: ExitReason,
    pub invalid_inputs: usize,
    pub blocked_moves: usize,
}

/// Decide what one line of input does in `current`.
pub fn step(map: &RoomMap, current: Index, input: &str) -> Transition {
    match Command::parse(input) {
        Some(Command::Quit) => Transition::Quit,
        Some(Command::Go(direction)) => match map.room(current).and_then(|r| r.child(direction)) {
            Some(next) => Transition::Moved(next, direction),
            None => Transition::Blocked(direction),
        },
        None => Transition::Invalid,
    }
}

/// Drives one traversal session over a built map.
pub struct Explorer<'a, C: Console> {
    map: &'a RoomMap,
    console: C,
}

impl<'a, C: Console> Explorer<'a, C> {
    pub fn new(map: &'a RoomMap, console: C) -> Self {
        Self { map, console }
    }

    pub fn into_console(self) -> C {
        self.console
    }

    /// Run the session until the player quits or reaches a dead end.
    #[instrument(level = "debug", skip(self))]
    pub fn explore(&mut self) -> ApplicationResult<SessionReport> {
        let root = self
            .map
            .root()
            .ok_or_else(|| DomainError::UnknownRoom("root".to_string()))?;

        let mut path = Vec::new();
        let mut invalid_inputs = 0;
        let mut blocked_moves = 0;
        let mut state = State::AtRoom(root);

        let (current, reason) = loop {
            match state {
                State::Exited(idx, reason) => break (idx, reason),
                State::AtRoom(idx) => {
                    let room = self.room(idx)?;
                    self.show_room(room)?;

                    if room.is_leaf() {
                        self.say("")?;
                        self.say("This room has no further paths.")?;
                        self.say(&"Exploration over!".bold().to_string())?;
                        state = State::Exited(idx, ExitReason::ReachedLeaf);
                        continue;
                    }

                    self.show_options(room)?;
                    self.console.prompt("\nYour choice:").with_context("write prompt")?;

                    let Some(input) = self.console.read_line().with_context("read choice")? else {
                        self.say("")?;
                        self.say("No more input, leaving the mansion.")?;
                        state = State::Exited(idx, ExitReason::InputClosed);
                        continue;
                    };

                    state = match step(self.map, idx, &input) {
                        Transition::Moved(next, direction) => {
                            debug!(from = %room.name, %direction, "moved");
                            path.push(direction);
                            State::AtRoom(next)
                        }
                        Transition::Blocked(direction) => {
                            blocked_moves += 1;
                            self.say("")?;
                            let msg = format!("There is no path to the {}!", direction);
                            self.say(&msg.yellow().to_string())?;
                            State::AtRoom(idx)
                        }
                        Transition::Invalid => {
                            invalid_inputs += 1;
                            debug!(input = input.trim(), "invalid option");
                            self.say("")?;
                            self.say(&"Invalid option! Try again.".red().to_string())?;
                            State::AtRoom(idx)
                        }
                        Transition::Quit => {
                            self.say("")?;
                            let msg = "You left the mansion. See you next time, detective!";
                            self.say(&msg.green().to_string())?;
                            State::Exited(idx, ExitReason::Quit)
                        }
                    };
                }
            }
        };

        let final_room = self.room(current)?.name.clone();
        info!(room = %final_room, ?reason, moves = path.len(), "session ended");
        Ok(SessionReport {
            final_room,
            path,
            reason,
            invalid_inputs,
            blocked_moves,
        })
    }

    fn room(&self, idx: Index) -> ApplicationResult<&'a Room> {
        self.map
            .room(idx)
            .ok_or_else(|| DomainError::UnknownRoom(format!("{idx:?}")).into())
    }

    fn show_room(&mut self, room: &Room) -> ApplicationResult<()> {
        self.say("")?;
        self.say(&SEPARATOR.cyan().to_string())?;
        self.say(&format!("You are in: {}", room.name.bold()))?;
        self.say(&SEPARATOR.cyan().to_string())
    }

    fn show_options(&mut self, room: &Room) -> ApplicationResult<()> {
        self.say("")?;
        self.say("Movement options:")?;
        for direction in room.exits() {
            self.say(&format!("  {}", option_label(direction)))?;
        }
        self.say("  [S] Quit")
    }

    fn say(&mut self, line: &str) -> ApplicationResult<()> {
        self.console.write_line(line).with_context("write output")
    }
}
