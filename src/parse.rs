//! Board text format: four lines of four whitespace-separated integers.

use std::str::FromStr;

use crate::error::{FormatProblem, Result, SolveError};
use crate::puzzle::{check_permutation, Board, CELLS, SIZE};

/// Parses and validates board text.
///
/// Blank lines and surrounding whitespace are ignored. Row and column
/// counts and numeric tokens are checked first (`InputFormat`), then the
/// values must be exactly 0..15 (`InvalidContent`). Solvability is not
/// checked here.
pub fn parse_board(text: &str) -> Result<Board> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    if lines.len() != SIZE {
        return Err(SolveError::InputFormat(FormatProblem::RowCount(lines.len())));
    }

    let mut values = Vec::with_capacity(CELLS);
    for (row, line) in lines.iter().enumerate() {
        let mut count = 0;
        for token in line.split_whitespace() {
            let value = token.parse::<i64>().map_err(|_| {
                SolveError::InputFormat(FormatProblem::NotANumber {
                    row,
                    token: token.to_string(),
                })
            })?;
            values.push(value);
            count += 1;
        }
        if count != SIZE {
            return Err(SolveError::InputFormat(FormatProblem::ColumnCount {
                row,
                found: count,
            }));
        }
    }

    check_permutation(&values)?;

    let mut cells = [0u8; CELLS];
    for (cell, &v) in cells.iter_mut().zip(&values) {
        *cell = v as u8;
    }
    Board::from_cells(cells)
}

impl FromStr for Board {
    type Err = SolveError;

    fn from_str(s: &str) -> Result<Self> {
        parse_board(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOAL_TEXT: &str = "1 2 3 4\n5 6 7 8\n9 10 11 12\n13 14 15 0\n";

    #[test]
    fn test_parse_goal() {
        assert!(parse_board(GOAL_TEXT).unwrap().is_goal());
    }

    #[test]
    fn test_display_reparses() {
        let board = Board::goal().apply(crate::puzzle::Move::Up).unwrap();
        assert_eq!(board.to_string().parse::<Board>().unwrap(), board);
    }

    #[test]
    fn test_ignores_blank_lines_and_padding() {
        let text = "\n  1 2 3 4  \n\n5   6 7 8\n9 10 11 12\n\t13 14 15 0\n\n";
        assert!(parse_board(text).unwrap().is_goal());
    }

    #[test]
    fn test_three_rows_is_format_error() {
        let err = parse_board("1 2 3 4\n5 6 7 8\n9 10 11 12\n").unwrap_err();
        assert_eq!(err, SolveError::InputFormat(FormatProblem::RowCount(3)));
    }

    #[test]
    fn test_short_row_is_format_error() {
        let err = parse_board("1 2 3 4\n5 6 7\n9 10 11 12\n13 14 15 0 8").unwrap_err();
        assert_eq!(
            err,
            SolveError::InputFormat(FormatProblem::ColumnCount { row: 1, found: 3 })
        );
    }

    #[test]
    fn test_non_numeric_token() {
        let err = parse_board("1 2 3 4\n5 x 7 8\n9 10 11 12\n13 14 15 0").unwrap_err();
        assert_eq!(
            err,
            SolveError::InputFormat(FormatProblem::NotANumber {
                row: 1,
                token: "x".into()
            })
        );
        assert_eq!(err.kind(), "input_format");
    }

    #[test]
    fn test_content_errors() {
        let err = parse_board("1 2 3 4\n5 6 7 8\n9 10 11 12\n13 14 15 15").unwrap_err();
        assert_eq!(err.kind(), "invalid_content");

        let err = parse_board("1 2 3 4\n5 6 7 8\n9 10 11 12\n13 14 -1 0").unwrap_err();
        match err {
            SolveError::InvalidContent(problem) => {
                assert_eq!(problem.out_of_range, vec![-1]);
                assert_eq!(problem.missing, vec![15]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_unsolvable_still_parses() {
        let board = parse_board("1 2 3 4\n5 6 7 8\n9 10 11 12\n13 15 14 0").unwrap();
        assert!(!crate::solvability::is_solvable(&board));
    }
}
