#![no_main]
use libfuzzer_sys::fuzz_target;
use skirmish::chess::board::Board;
use skirmish::chess::core::Color;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(board) = Board::from_text(input) else {
        return;
    };
    for color in [Color::White, Color::Black] {
        let moves = board.generate_moves(color);
        assert_eq!(board.game_over(color), moves.is_empty());
        for candidate in moves {
            let mover = board.piece(candidate.piece()).expect("mover should be on the board");
            assert_eq!(mover.color(), color);
            assert_eq!(mover.square(), candidate.from());
            if let Some(target) = board.piece_at(candidate.to()) {
                assert_eq!(target.color(), !color);
            }
            let mut next = board.clone();
            let captured = usize::from(board.piece_at(candidate.to()).is_some());
            next.make_move(&candidate);
            assert_eq!(next.len(), board.len() - captured);
            let arrived = next.piece_at(candidate.to()).expect("destination should be occupied");
            assert_eq!(arrived.color(), color);
            assert!(next.piece_at(candidate.from()).is_none());
        }
    }
});
