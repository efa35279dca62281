#![no_main]
use itertools::Itertools;
use libfuzzer_sys::fuzz_target;
use pretty_assertions::assert_eq;
use skirmish::chess::board::Board;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(board) = Board::from_text(input) else {
        return;
    };
    // Rendering always produces a board of the same shape with the same pieces.
    let rendered = board.to_string();
    let parsed = Board::from_text(&rendered).expect("rendered board should be valid");
    assert_eq!((parsed.rows(), parsed.cols()), (board.rows(), board.cols()));
    assert_eq!(
        parsed
            .iter()
            .map(|(_, piece)| (piece.square(), piece.symbol()))
            .sorted()
            .collect_vec(),
        board
            .iter()
            .map(|(_, piece)| (piece.square(), piece.symbol()))
            .sorted()
            .collect_vec()
    );
    assert_eq!(parsed.to_string(), rendered);
});
