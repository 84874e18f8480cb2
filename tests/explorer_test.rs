//! Tests for the interactive exploration session, driven by scripted input

use std::io::Cursor;

use rstest::rstest;

use detective_quest::application::{step, ExitReason, Explorer, SessionReport, Transition};
use detective_quest::cli::commands::run_session;
use detective_quest::domain::{mansion_map, Direction, MapBuilder, RoomMap, DEFAULT_CAPACITY};
use detective_quest::infrastructure::TerminalConsole;
use detective_quest::util::testing;

use Direction::{Left as L, Right as R};

const PROMPT: &str = "Your choice:";

fn mansion() -> RoomMap {
    testing::init_test_setup();
    mansion_map(DEFAULT_CAPACITY).unwrap()
}

/// Porch -> (left) Hall -> (right) Attic
fn corridor() -> RoomMap {
    testing::init_test_setup();
    let mut builder = MapBuilder::with_capacity(3);
    let porch = builder.create_room("Porch").unwrap();
    let hall = builder.create_room("Hall").unwrap();
    let attic = builder.create_room("Attic").unwrap();
    builder.link_children(porch, Some(hall), None).unwrap();
    builder.link_children(hall, None, Some(attic)).unwrap();
    builder.build(porch).unwrap()
}

/// Runs a session over `input` and returns the report plus everything printed.
fn play(map: &RoomMap, input: &str) -> (SessionReport, String) {
    let console = TerminalConsole::new(Cursor::new(input.to_string()), Vec::new());
    let mut explorer = Explorer::new(map, console);
    let report = explorer.explore().unwrap();
    let output = String::from_utf8(explorer.into_console().into_output()).unwrap();
    (report, output)
}

// ============================================================
// Reaching a leaf
// ============================================================

#[test]
fn given_left_left_left_when_exploring_then_ends_in_secret_room() {
    let map = mansion();

    let (report, output) = play(&map, "l\nl\nl\n");

    assert_eq!(report.final_room, "Sala Secreta");
    assert_eq!(report.reason, ExitReason::ReachedLeaf);
    assert_eq!(report.path, vec![L, L, L]);
    assert!(output.contains("You are in: Sala Secreta"));
    assert!(output.contains("This room has no further paths."));
    assert!(output.contains("Exploration over!"));
    // No prompt once the leaf is reached
    assert_eq!(output.matches(PROMPT).count(), 3);
}

#[rstest]
#[case("r\nr\nl\n", "Estufa")]
#[case("R\nD\nL\n", "Estufa")]
#[case("right\nright\nright\n", "Gazebo")]
#[case("l\nr\n", "Escritorio")]
#[case("r\nl\n", "Despensa")]
fn given_valid_path_when_exploring_then_stops_at_leaf(#[case] input: &str, #[case] leaf: &str) {
    let map = mansion();

    let (report, _) = play(&map, input);

    assert_eq!(report.final_room, leaf);
    assert_eq!(report.reason, ExitReason::ReachedLeaf);
}

#[test]
fn given_leaf_when_reached_then_remaining_input_is_not_read() {
    let map = mansion();

    let (report, output) = play(&map, "r\nl\nquit\nl\n");

    assert_eq!(report.final_room, "Despensa");
    assert_eq!(report.reason, ExitReason::ReachedLeaf);
    assert!(!output.contains("You left the mansion"));
}

#[test]
fn given_root_without_exits_when_exploring_then_ends_without_prompt() {
    testing::init_test_setup();
    let mut builder = MapBuilder::with_capacity(1);
    let closet = builder.create_room("Closet").unwrap();
    let map = builder.build(closet).unwrap();

    let (report, output) = play(&map, "l\n");

    assert_eq!(report.reason, ExitReason::ReachedLeaf);
    assert_eq!(report.final_room, "Closet");
    assert!(!output.contains(PROMPT));
}

// ============================================================
// Quitting
// ============================================================

#[rstest]
#[case("s\n")]
#[case("S\n")]
#[case("quit\n")]
#[case("q\n")]
fn given_quit_at_root_when_exploring_then_session_ends(#[case] input: &str) {
    let map = mansion();

    let (report, output) = play(&map, input);

    assert_eq!(report.reason, ExitReason::Quit);
    assert_eq!(report.final_room, "Hall de Entrada");
    assert!(report.path.is_empty());
    assert!(output.contains("You left the mansion. See you next time, detective!"));
    assert_eq!(output.matches(PROMPT).count(), 1);
}

#[test]
fn given_quit_midway_when_exploring_then_ends_in_current_room() {
    let map = mansion();

    let (report, output) = play(&map, "r\nr\ns\nl\n");

    assert_eq!(report.reason, ExitReason::Quit);
    assert_eq!(report.final_room, "Jardim");
    assert_eq!(report.path, vec![R, R]);
    assert!(!output.contains("You are in: Estufa"));
}

#[test]
fn given_input_closed_when_exploring_then_session_ends() {
    let map = mansion();

    let (report, output) = play(&map, "l\n");

    assert_eq!(report.reason, ExitReason::InputClosed);
    assert_eq!(report.final_room, "Sala de Estar");
    assert!(output.contains("No more input"));
}

// ============================================================
// Invalid and blocked choices
// ============================================================

#[test]
fn given_invalid_input_when_exploring_then_stays_and_reprompts() {
    let map = mansion();

    let (report, output) = play(&map, "x\n\nl\nwhatever\ns\n");

    assert_eq!(report.invalid_inputs, 3);
    assert_eq!(report.final_room, "Sala de Estar");
    assert_eq!(report.reason, ExitReason::Quit);
    assert_eq!(output.matches("Invalid option! Try again.").count(), 3);
    // The room is shown again after each invalid choice
    assert_eq!(output.matches("You are in: Hall de Entrada").count(), 3);
}

#[test]
fn given_missing_path_when_moving_then_stays_in_room() {
    let map = corridor();

    let (report, output) = play(&map, "r\nl\nl\nr\n");

    assert_eq!(report.blocked_moves, 2);
    assert_eq!(report.path, vec![L, R]);
    assert_eq!(report.final_room, "Attic");
    assert_eq!(report.reason, ExitReason::ReachedLeaf);
    assert!(output.contains("There is no path to the right!"));
    assert!(output.contains("There is no path to the left!"));
}

#[test]
fn given_room_with_one_exit_when_shown_then_only_that_option_is_offered() {
    let map = corridor();

    let (_, output) = play(&map, "l\nr\n");

    // Porch offers left only, Hall offers right only
    assert_eq!(output.matches("[L] Go left").count(), 1);
    assert_eq!(output.matches("[R] Go right").count(), 1);
    assert_eq!(output.matches("[S] Quit").count(), 2);
}

#[test]
fn given_non_utf8_line_when_exploring_then_reprompts_instead_of_failing() {
    let map = mansion();
    let console = TerminalConsole::new(Cursor::new(vec![0xff, b'\n', b's', b'\n']), Vec::new());
    let mut explorer = Explorer::new(&map, console);

    let report = explorer.explore().unwrap();

    assert_eq!(report.invalid_inputs, 1);
    assert_eq!(report.reason, ExitReason::Quit);
    assert_eq!(report.final_room, "Hall de Entrada");
}

// ============================================================
// Transition function
// ============================================================

#[test]
fn given_rooms_when_stepping_then_returns_expected_transition() {
    let map = corridor();
    let porch = map.root().unwrap();
    let hall = map.follow(&[L]).unwrap();

    assert_eq!(step(&map, porch, "L"), Transition::Moved(hall, L));
    assert_eq!(step(&map, porch, "d"), Transition::Blocked(R));
    assert_eq!(step(&map, porch, "?"), Transition::Invalid);
    assert_eq!(step(&map, hall, "S"), Transition::Quit);
}

#[test]
fn given_session_when_run_through_cli_then_returns_report() {
    let map = mansion();
    let console = TerminalConsole::new(Cursor::new("l\nr\n"), Vec::new());

    let report = run_session(&map, console).unwrap();

    assert_eq!(report.final_room, "Escritorio");
    assert_eq!(map.len(), 11, "exploring must not change the map");
}
