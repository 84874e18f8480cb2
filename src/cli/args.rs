//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueHint};

/// Explore a mansion laid out as a binary tree of rooms
#[derive(Parser, Debug)]
#[command(name = "dquest")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity on stderr (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub debug: u8,

    /// Settings file, layered over the global config
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Print the mansion map and exit
    #[arg(long)]
    pub map: bool,

    /// Show version and effective settings, then exit
    #[arg(long)]
    pub info: bool,
}
