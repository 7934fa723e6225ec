use crate::{board::Board, movelist::MoveList, piece::Color, r#move::Move};

/// Generates every legal move of the side to move
pub fn generate(board: &Board) -> MoveList {
    generate_for(board, board.side_to_move())
}

/// Generates every legal move `side` would have if it were its turn.
/// Each origin owned by `side` is tried against every square of the board,
/// the board deciding which of them are legal.
pub fn generate_for(board: &Board, side: Color) -> MoveList {
    let mut move_list = MoveList::default();
    let origins = board
        .occupied()
        .filter(|(_, p)| p.color == side)
        .map(|(sq, _)| sq);

    for origin in origins {
        for target in 0..64 {
            let mv = Move::new(origin, target);
            if board.is_legal_for(mv, side) {
                move_list.push(mv)
            }
        }
    }
    move_list
}
