use assert_cmd::Command;
use predicates::boolean::PredicateBooleanExt;
use predicates::str::contains;

const BINARY_NAME: &str = "skirmish";

fn data(name: &str) -> String {
    format!("{}/tests/data/{name}", env!("CARGO_MANIFEST_DIR"))
}

#[test]
fn side_without_pieces_wins() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).expect("Binary should be built");
    let _ = cmd.args(["white", "onestep", "random", data("kings.txt").as_str()]);

    drop(
        cmd.assert().success().stdout(
            contains("skirmish")
                .and(contains("Starting board configuration:"))
                .and(contains("from 0,1 to 0,0"))
                .and(contains("Move by White:\nK.\n"))
                .and(contains("Black has no moves"))
                .and(contains("Black wins!"))
                .and(contains("White wins!").not()),
        ),
    );
}

#[test]
fn move_limit_is_a_draw() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).expect("Binary should be built");
    let _ = cmd.args([
        "black",
        "random",
        "onestep",
        data("standard.txt").as_str(),
        "--max-moves",
        "3",
        "--seed",
        "7",
    ]);

    drop(
        cmd.assert().success().stdout(
            contains("Move by Black:")
                .and(contains("Move by White:"))
                .and(contains("Draw: Maximum number of moves reached.")),
        ),
    );
}

#[test]
fn figurines() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).expect("Binary should be built");
    let _ = cmd.args([
        "w",
        "random",
        "random",
        data("standard.txt").as_str(),
        "--max-moves",
        "0",
        "--figurines",
    ]);

    drop(
        cmd.assert()
            .success()
            .stdout(contains("♜♞♝♛♚♝♞♜\n♟♟♟♟♟♟♟♟\n").and(contains("White pieces: "))),
    );
}

#[test]
fn unknown_policy() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).expect("Binary should be built");
    let _ = cmd.args(["white", "minimax", "random", data("standard.txt").as_str()]);

    drop(
        cmd.assert()
            .failure()
            .stderr(contains("minimax"))
            .stdout(contains("Starting board configuration:").not()),
    );
}

#[test]
fn unknown_color() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).expect("Binary should be built");
    let _ = cmd.args(["red", "random", "random", data("standard.txt").as_str()]);

    drop(
        cmd.assert()
            .failure()
            .stderr(contains("color should be 'white' or 'black', got 'red'")),
    );
}

#[test]
fn missing_input_file() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).expect("Binary should be built");
    let _ = cmd.args(["white", "random", "random", data("no_such_board.txt").as_str()]);

    drop(
        cmd.assert()
            .failure()
            .stderr(contains("failed to open input file"))
            .stdout(contains("Starting board configuration:").not()),
    );
}

#[test]
fn malformed_board() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).expect("Binary should be built");
    let _ = cmd.args(["white", "random", "random", data("malformed.txt").as_str()]);

    drop(
        cmd.assert()
            .failure()
            .stderr(contains("failed to parse board").and(contains("unexpected character '?'")))
            .stdout(contains("Starting board configuration:").not()),
    );
}
