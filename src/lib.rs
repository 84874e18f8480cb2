//! Detective Quest: walk a mansion laid out as a binary tree of rooms.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
