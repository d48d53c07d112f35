use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ContentProblem, Result, SolveError};
use crate::solvability;

/// Side length of the grid.
pub const SIZE: usize = 4;
/// Number of cells, blank included.
pub const CELLS: usize = SIZE * SIZE;
/// The empty cell.
pub const BLANK: u8 = 0;

/// Direction the blank travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// Enumeration order of the move generator. Ties between optimal
    /// solutions are broken by this order.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    pub fn as_offset(&self) -> (isize, isize) {
        match self {
            Move::Up => (-1, 0),
            Move::Down => (1, 0),
            Move::Left => (0, -1),
            Move::Right => (0, 1),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Move::Up => "up",
            Move::Down => "down",
            Move::Left => "left",
            Move::Right => "right",
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown move '{0}', expected one of up, down, left, right")]
pub struct UnknownMove(pub String);

impl FromStr for Move {
    type Err = UnknownMove;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Move::ALL
            .into_iter()
            .find(|m| m.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownMove(s.to_string()))
    }
}

/// A 4x4 board holding each of the values 0..15 exactly once.
///
/// Boards are plain values: applying a move returns a new board and leaves
/// `self` untouched.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "[[u8; SIZE]; SIZE]", try_from = "[[u8; SIZE]; SIZE]")]
pub struct Board {
    cells: [u8; CELLS],
}

impl Board {
    /// The canonical goal: 1..15 in row-major order, blank bottom-right.
    pub fn goal() -> Self {
        let mut cells = [BLANK; CELLS];
        for (i, cell) in cells.iter_mut().take(CELLS - 1).enumerate() {
            *cell = i as u8 + 1;
        }
        Self { cells }
    }

    /// Builds a board from row-major cells, rejecting anything that is not
    /// a permutation of 0..15.
    pub fn from_cells(cells: [u8; CELLS]) -> Result<Self> {
        let values: Vec<i64> = cells.iter().map(|&v| v as i64).collect();
        check_permutation(&values)?;
        Ok(Self { cells })
    }

    pub fn from_rows(rows: [[u8; SIZE]; SIZE]) -> Result<Self> {
        let mut cells = [BLANK; CELLS];
        for (r, row) in rows.iter().enumerate() {
            cells[r * SIZE..(r + 1) * SIZE].copy_from_slice(row);
        }
        Self::from_cells(cells)
    }

    pub fn cells(&self) -> &[u8; CELLS] {
        &self.cells
    }

    pub fn rows(&self) -> [[u8; SIZE]; SIZE] {
        let mut rows = [[BLANK; SIZE]; SIZE];
        for (r, row) in rows.iter_mut().enumerate() {
            row.copy_from_slice(&self.cells[r * SIZE..(r + 1) * SIZE]);
        }
        rows
    }

    pub fn tile(&self, row: usize, col: usize) -> u8 {
        self.cells[row * SIZE + col]
    }

    /// (row, column) of the blank.
    pub fn blank(&self) -> (usize, usize) {
        let idx = self
            .cells
            .iter()
            .position(|&v| v == BLANK)
            .unwrap_or(CELLS - 1);
        (idx / SIZE, idx % SIZE)
    }

    pub fn is_goal(&self) -> bool {
        *self == Self::goal()
    }

    /// Slides the blank one cell in `movement`'s direction. Returns `None`
    /// if that would leave the grid.
    pub fn apply(&self, movement: Move) -> Option<Self> {
        let (row, col) = self.blank();
        let (dr, dc) = movement.as_offset();

        let new_row = row as isize + dr;
        let new_col = col as isize + dc;
        if new_row < 0 || new_row >= SIZE as isize || new_col < 0 || new_col >= SIZE as isize {
            return None;
        }

        let mut next = *self;
        next.cells
            .swap(row * SIZE + col, new_row as usize * SIZE + new_col as usize);
        Some(next)
    }

    /// Replays a move sequence, failing on the first illegal move.
    pub fn apply_all(&self, moves: &[Move]) -> Option<Self> {
        moves.iter().try_fold(*self, |board, &m| board.apply(m))
    }

    /// Walks `moves` random legal steps away from the goal, never undoing
    /// the previous step.
    pub fn scramble<R: Rng + ?Sized>(moves: usize, rng: &mut R) -> Self {
        let mut board = Self::goal();
        let mut last: Option<Move> = None;

        for _ in 0..moves {
            let candidates: Vec<(Board, Move)> = Move::ALL
                .into_iter()
                .filter(|m| last.map_or(true, |l| *m != l.opposite()))
                .filter_map(|m| board.apply(m).map(|b| (b, m)))
                .collect();
            // Every cell has at least two neighbours, so one always survives.
            if let Some(&(next, m)) = candidates.choose(rng) {
                board = next;
                last = Some(m);
            }
        }
        board
    }

    /// Shuffles all 16 values until the arrangement is solvable.
    pub fn random_solvable<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut cells = Self::goal().cells;
        loop {
            cells.shuffle(rng);
            let board = Self { cells };
            if solvability::is_solvable(&board) {
                return board;
            }
        }
    }
}

/// Checks that `values` holds every number 0..15 exactly once.
pub(crate) fn check_permutation(values: &[i64]) -> Result<()> {
    let mut seen = [0usize; CELLS];
    let mut problem = ContentProblem::default();

    for &v in values {
        if (0..CELLS as i64).contains(&v) {
            seen[v as usize] += 1;
            if seen[v as usize] == 2 {
                problem.duplicates.push(v);
            }
        } else {
            problem.out_of_range.push(v);
        }
    }
    problem.missing = (0..CELLS as i64).filter(|&v| seen[v as usize] == 0).collect();

    if values.len() == CELLS && problem == ContentProblem::default() {
        Ok(())
    } else {
        Err(SolveError::InvalidContent(problem))
    }
}

impl From<Board> for [[u8; SIZE]; SIZE] {
    fn from(board: Board) -> Self {
        board.rows()
    }
}

impl TryFrom<[[u8; SIZE]; SIZE]> for Board {
    type Error = SolveError;

    fn try_from(rows: [[u8; SIZE]; SIZE]) -> Result<Self> {
        Board::from_rows(rows)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let line: Vec<String> = row.iter().map(|v| format!("{:2}", v)).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({:?})", self.rows())
    }
}

/// Goal cell of every tile, derived once from the goal board.
#[derive(Debug, Clone)]
pub struct GoalTable {
    goal: Board,
    positions: [(usize, usize); CELLS],
}

impl GoalTable {
    pub fn canonical() -> Self {
        let goal = Board::goal();
        let mut positions = [(0, 0); CELLS];
        for (idx, &value) in goal.cells.iter().enumerate() {
            positions[value as usize] = (idx / SIZE, idx % SIZE);
        }
        Self { goal, positions }
    }

    pub fn goal(&self) -> &Board {
        &self.goal
    }

    /// Goal (row, column) of `tile`.
    #[inline]
    pub fn position(&self, tile: u8) -> (usize, usize) {
        self.positions[tile as usize]
    }
}

impl Default for GoalTable {
    fn default() -> Self {
        Self::canonical()
    }
}
