//! Domain layer: the room tree and player commands
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod display;
pub mod entities;
pub mod error;

pub use arena::{ReleaseReport, Room, RoomMap};
pub use builder::{mansion_map, MapBuilder, DEFAULT_CAPACITY};
pub use display::{option_label, TreeNodeConvert};
pub use entities::{Command, Direction};
pub use error::{DomainError, DomainResult};
