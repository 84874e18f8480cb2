//! Application layer: the exploration session
//!
//! This layer orchestrates domain logic and depends on the console boundary trait.

pub mod error;
pub mod error_ext;
pub mod explorer;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use explorer::{step, ExitReason, Explorer, SessionReport, Transition};
