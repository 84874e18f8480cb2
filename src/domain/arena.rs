use std::fmt;

use generational_arena::{Arena, Index};
use tracing::{debug, instrument, trace};

use crate::domain::entities::Direction;

/// A navigable location in the mansion.
#[derive(Debug, Clone)]
pub struct Room {
    /// Display name, also the room's identity for the player
    pub name: String,
    /// Index of the room reached by going left
    pub left: Option<Index>,
    /// Index of the room reached by going right
    pub right: Option<Index>,
    /// Set while wiring the map, only used to reject cycles and double parents
    pub(crate) parent: Option<Index>,
}

impl Room {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            left: None,
            right: None,
            parent: None,
        }
    }

    pub fn child(&self, direction: Direction) -> Option<Index> {
        match direction {
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    /// A room without any way out ends the exploration.
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Directions that lead somewhere, left before right.
    pub fn exits(&self) -> Vec<Direction> {
        [Direction::Left, Direction::Right]
            .into_iter()
            .filter(|&d| self.child(d).is_some())
            .collect()
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Arena-backed binary tree of rooms.
///
/// Rooms are addressed by generational indices; each parent exclusively owns
/// the indices of its two children. Once handed out by
/// [`MapBuilder::build`](crate::domain::MapBuilder::build) the shape can no
/// longer change.
#[derive(Debug)]
pub struct RoomMap {
    arena: Arena<Room>,
    root: Option<Index>,
}

/// Outcome of tearing a map down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseReport {
    /// Room names in the order they were released (post-order)
    pub released: Vec<String>,
    /// Rooms still stored after the release pass
    pub remaining: usize,
}

impl RoomMap {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: Arena::with_capacity(capacity),
            root: None,
        }
    }

    /// Insert without growing the arena; hands the room back when full.
    pub(crate) fn try_insert(&mut self, room: Room) -> Result<Index, Room> {
        self.arena.try_insert(room)
    }

    pub(crate) fn get_mut(&mut self, idx: Index) -> Option<&mut Room> {
        self.arena.get_mut(idx)
    }

    pub(crate) fn set_root(&mut self, idx: Index) {
        self.root = Some(idx);
    }

    pub(crate) fn capacity(&self) -> usize {
        self.arena.capacity()
    }

    pub(crate) fn indices(&self) -> Vec<Index> {
        self.arena.iter().map(|(idx, _)| idx).collect()
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn room(&self, idx: Index) -> Option<&Room> {
        self.arena.get(idx)
    }

    /// Number of rooms currently stored.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn iter(&self) -> PreOrderIterator<'_> {
        PreOrderIterator::new(self)
    }

    pub fn iter_postorder(&self) -> PostOrderIterator<'_> {
        PostOrderIterator::new(self)
    }

    /// Finds a room by name, searching from the root.
    pub fn find(&self, name: &str) -> Option<Index> {
        self.iter()
            .find(|(_, room)| room.name == name)
            .map(|(idx, _)| idx)
    }

    /// Walks a fixed sequence of choices from the root.
    ///
    /// Returns `None` as soon as a step asks for a path that does not exist.
    #[instrument(level = "debug", skip(self))]
    pub fn follow(&self, path: &[Direction]) -> Option<Index> {
        let mut current = self.root?;
        for &direction in path {
            current = self.room(current)?.child(direction)?;
        }
        Some(current)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        if let Some(root) = self.root {
            self.calculate_depth(root)
        } else {
            0
        }
    }

    fn calculate_depth(&self, idx: Index) -> usize {
        if let Some(room) = self.room(idx) {
            1 + [room.left, room.right]
                .into_iter()
                .flatten()
                .map(|child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Names of all dead-end rooms, left to right.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_names(&self) -> Vec<String> {
        self.iter()
            .filter(|(_, room)| room.is_leaf())
            .map(|(_, room)| room.name.clone())
            .collect()
    }

    /// Releases every room, children before their parent.
    ///
    /// Each room is removed exactly once; rooms that are not reachable from the
    /// root cannot exist in a built map, so `remaining` is zero afterwards.
    #[instrument(level = "debug", skip(self))]
    pub fn release(mut self) -> ReleaseReport {
        let order: Vec<Index> = self.iter_postorder().map(|(idx, _)| idx).collect();
        let mut released = Vec::with_capacity(order.len());

        for idx in order {
            if let Some(room) = self.arena.remove(idx) {
                trace!(room = %room.name, "released");
                released.push(room.name);
            }
        }
        self.root = None;

        debug!(count = released.len(), remaining = self.arena.len(), "map released");
        ReleaseReport {
            released,
            remaining: self.arena.len(),
        }
    }
}

pub struct PreOrderIterator<'a> {
    map: &'a RoomMap,
    stack: Vec<Index>,
}

impl<'a> PreOrderIterator<'a> {
    fn new(map: &'a RoomMap) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = map.root() {
            stack.push(root);
        }
        Self { map, stack }
    }
}

impl<'a> Iterator for PreOrderIterator<'a> {
    type Item = (Index, &'a Room);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.stack.pop() {
            if let Some(room) = self.map.room(current) {
                // Right first so left comes off the stack first
                self.stack.extend(room.right);
                self.stack.extend(room.left);
                return Some((current, room));
            }
        }
        None
    }
}

pub struct PostOrderIterator<'a> {
    map: &'a RoomMap,
    stack: Vec<(Index, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(map: &'a RoomMap) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = map.root() {
            stack.push((root, false));
        }
        Self { map, stack }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (Index, &'a Room);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current, visited)) = self.stack.pop() {
            if let Some(room) = self.map.room(current) {
                if visited {
                    return Some((current, room));
                }
                self.stack.push((current, true));
                if let Some(right) = room.right {
                    self.stack.push((right, false));
                }
                if let Some(left) = room.left {
                    self.stack.push((left, false));
                }
            }
        }
        None
    }
}
