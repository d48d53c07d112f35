//! Manhattan distance plus linear conflict.
//!
//! Both parts ignore the blank. The sum never overestimates the number of
//! moves left, and it changes by exactly one per move, so IDA* driven by it
//! returns optimal solutions.

use crate::puzzle::{Board, GoalTable, BLANK, SIZE};

/// Lower bound on the moves needed to reach the goal.
pub fn estimate(board: &Board, goals: &GoalTable) -> u32 {
    manhattan_distance(board, goals) + linear_conflict(board, goals)
}

pub fn manhattan_distance(board: &Board, goals: &GoalTable) -> u32 {
    let mut distance = 0;
    for row in 0..SIZE {
        for col in 0..SIZE {
            let value = board.tile(row, col);
            if value == BLANK {
                continue;
            }
            let (goal_row, goal_col) = goals.position(value);
            distance += row.abs_diff(goal_row) + col.abs_diff(goal_col);
        }
    }
    distance as u32
}

/// Extra cost of tiles that sit in their goal row (or column) but in the
/// wrong order relative to each other.
///
/// Each tile that has to step out of the line to let the others pass costs
/// two moves. The fewest such tiles is the line length minus the longest
/// run already in goal order.
pub fn linear_conflict(board: &Board, goals: &GoalTable) -> u32 {
    let mut penalty = 0;

    for line in 0..SIZE {
        let mut row_keys = [0usize; SIZE];
        let mut row_len = 0;
        let mut col_keys = [0usize; SIZE];
        let mut col_len = 0;

        for i in 0..SIZE {
            let value = board.tile(line, i);
            if value != BLANK {
                let (goal_row, goal_col) = goals.position(value);
                if goal_row == line {
                    row_keys[row_len] = goal_col;
                    row_len += 1;
                }
            }

            let value = board.tile(i, line);
            if value != BLANK {
                let (goal_row, goal_col) = goals.position(value);
                if goal_col == line {
                    col_keys[col_len] = goal_row;
                    col_len += 1;
                }
            }
        }

        penalty += line_penalty(&row_keys[..row_len]);
        penalty += line_penalty(&col_keys[..col_len]);
    }

    penalty
}

/// `keys` are goal positions along the line, in current order.
fn line_penalty(keys: &[usize]) -> u32 {
    if keys.len() < 2 {
        return 0;
    }

    // longest increasing subsequence, at most SIZE long
    let mut run = [1usize; SIZE];
    for i in 1..keys.len() {
        for j in 0..i {
            if keys[j] < keys[i] {
                run[i] = run[i].max(run[j] + 1);
            }
        }
    }
    let in_order = run[..keys.len()].iter().copied().max().unwrap_or(0);

    2 * (keys.len() - in_order) as u32
}
