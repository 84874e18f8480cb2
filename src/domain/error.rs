//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::entities::Direction;

/// Domain errors represent violations of the room tree's shape rules.
///
/// `CapacityExhausted` is the only one a correct build can hit; every other
/// variant points at a wiring mistake in the map definition.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("out of room storage: cannot create '{name}' (capacity {capacity})")]
    CapacityExhausted { name: String, capacity: usize },

    #[error("unknown room: {0}")]
    UnknownRoom(String),

    #[error("room cannot link to itself: {0}")]
    SelfLink(String),

    #[error("room already has a parent: {0}")]
    AlreadyLinked(String),

    #[error("{direction} path of '{parent}' is already wired")]
    SlotOccupied { parent: String, direction: Direction },

    #[error("cycle detected in room tree: {0}")]
    CycleDetected(String),

    #[error("root room has a parent: {0}")]
    RootHasParent(String),

    #[error("room not reachable from the root: {0}")]
    DetachedRoom(String),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
