use crate::puzzle::{Board, BLANK, SIZE};

/// Parity test for the even-width grid: solvable iff the inversion count
/// plus the blank's row counted from the bottom (1-based) is odd.
pub fn is_solvable(board: &Board) -> bool {
    let (blank_row, _) = board.blank();
    let from_bottom = SIZE - blank_row;
    (count_inversions(board) + from_bottom) % 2 == 1
}

/// Pairs `i < j` in row-major order, blank skipped, with `value[i] > value[j]`.
pub fn count_inversions(board: &Board) -> usize {
    let tiles: Vec<u8> = board.cells().iter().copied().filter(|&v| v != BLANK).collect();

    tiles
        .iter()
        .enumerate()
        .map(|(i, &val)| tiles[i + 1..].iter().filter(|&&next| next < val).count())
        .sum()
}
