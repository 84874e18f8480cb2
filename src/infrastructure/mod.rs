//! Infrastructure layer: console I/O implementations

pub mod traits;

pub use traits::{Console, TerminalConsole};
