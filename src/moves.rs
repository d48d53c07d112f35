use crate::puzzle::{Board, Move};

/// Boards one slide away, in `Move::ALL` order (up, down, left, right).
///
/// Yields 2 neighbours from a corner, 3 from an edge and 4 from the middle.
pub fn neighbors(board: &Board) -> impl Iterator<Item = (Board, Move)> + '_ {
    Move::ALL
        .into_iter()
        .filter_map(move |m| board.apply(m).map(|next| (next, m)))
}

/// Moves that are legal from `board`.
pub fn legal_moves(board: &Board) -> Vec<Move> {
    neighbors(board).map(|(_, m)| m).collect()
}
