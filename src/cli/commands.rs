//! Command dispatch: build the map, run the session, tear down.

use tracing::{debug, info, instrument, warn};

use crate::application::{Explorer, SessionReport};
use crate::cli::args::Cli;
use crate::cli::error::CliResult;
use crate::cli::output;
use crate::config::Settings;
use crate::domain::{mansion_map, RoomMap, TreeNodeConvert};
use crate::infrastructure::{Console, TerminalConsole};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    if !settings.color {
        colored::control::set_override(false);
    }

    if cli.info {
        return _info(&settings);
    }

    let map = mansion_map(settings.max_rooms)?;
    if cli.map {
        output::info(&map.to_tree_string());
        release(map);
        return Ok(());
    }

    welcome();
    if settings.show_map {
        output::info(&map.to_tree_string());
    }

    let report = run_session(&map, TerminalConsole::stdio())?;
    debug!(?report, "session report");
    release(map);

    output::info("");
    output::action("Detective Quest", "thanks for playing!");
    Ok(())
}

/// Explore `map` through `console` until the session ends.
#[instrument(skip_all)]
pub fn run_session<C: Console>(map: &RoomMap, console: C) -> CliResult<SessionReport> {
    let mut explorer = Explorer::new(map, console);
    Ok(explorer.explore()?)
}

fn welcome() {
    output::header("==========================================");
    output::header("    WELCOME TO DETECTIVE QUEST!");
    output::header("==========================================");
    output::info("");
    output::info("You are about to explore a mysterious mansion");
    output::info("in search of clues.");
    output::info("Choose your paths wisely!");
}

fn release(map: RoomMap) {
    let built = map.len();
    let report = map.release();
    if report.released.len() != built || report.remaining != 0 {
        warn!(built, released = report.released.len(), remaining = report.remaining, "incomplete map release");
    } else {
        info!(rooms = built, "map released");
    }
}

fn _info(settings: &Settings) -> CliResult<()> {
    output::action("version", env!("CARGO_PKG_VERSION"));
    output::header("settings");
    output::info(&settings.to_toml()?);
    Ok(())
}
