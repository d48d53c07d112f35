//! Iterative deepening A*.
//!
//! Each pass is a depth-first search that prunes any node whose estimated
//! total cost `g + h` exceeds the current threshold. The smallest pruned
//! cost becomes the next threshold. The path is the only search state, so
//! memory stays proportional to the solution depth.

use log::{debug, error, info, warn};
use std::time::{Duration, Instant};

use crate::config::SolverConfig;
use crate::error::{Result, SolveError};
use crate::heuristic::estimate;
use crate::moves::neighbors;
use crate::puzzle::{Board, GoalTable, Move};
use crate::solvability::is_solvable;

/// Deepest optimal solution of the 15-puzzle is 80 moves.
const PATH_CAPACITY: usize = 96;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// Blank moves from the start board to the goal, fewest possible.
    pub moves: Vec<Move>,
    /// Bounded passes run, including the one that found the goal.
    pub iterations: usize,
    pub nodes_expanded: u64,
    pub elapsed: Duration,
}

impl Solution {
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

/// Outcome of one bounded pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bound {
    Found,
    /// Smallest `f` that exceeded the threshold.
    Exceeded(u32),
    /// Every branch was a revisit.
    Exhausted,
}

/// State owned by a single solve call.
struct Search<'a> {
    goals: &'a GoalTable,
    path: Vec<(Board, Option<Move>)>,
    nodes: u64,
}

impl<'a> Search<'a> {
    fn new(start: Board, goals: &'a GoalTable) -> Self {
        let mut path = Vec::with_capacity(PATH_CAPACITY);
        path.push((start, None));
        Self {
            goals,
            path,
            nodes: 0,
        }
    }

    fn bounded(&mut self, g: u32, threshold: u32) -> Bound {
        let Some(&(current, _)) = self.path.last() else {
            return Bound::Exhausted;
        };
        self.nodes += 1;

        let f = g + estimate(&current, self.goals);
        if f > threshold {
            return Bound::Exceeded(f);
        }
        if current == *self.goals.goal() {
            return Bound::Found;
        }

        let mut min: Option<u32> = None;
        for (next, movement) in neighbors(&current) {
            if self.path.iter().any(|(seen, _)| *seen == next) {
                continue;
            }

            self.path.push((next, Some(movement)));
            match self.bounded(g + 1, threshold) {
                Bound::Found => return Bound::Found,
                Bound::Exceeded(t) => min = Some(min.map_or(t, |m| m.min(t))),
                Bound::Exhausted => {}
            }
            self.path.pop();
        }

        min.map_or(Bound::Exhausted, Bound::Exceeded)
    }

    fn moves(&self) -> Vec<Move> {
        self.path.iter().filter_map(|&(_, m)| m).collect()
    }
}

/// Optimal solver. Holds no per-solve state, so one instance can serve
/// concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct Solver {
    goals: GoalTable,
    config: SolverConfig,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        Self {
            goals: GoalTable::canonical(),
            config,
        }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn goals(&self) -> &GoalTable {
        &self.goals
    }

    /// Rejects unsolvable boards up front, then searches.
    pub fn solve(&self, board: &Board) -> Result<Solution> {
        if !is_solvable(board) {
            debug!("parity check rejected board {:?}", board);
            return Err(SolveError::Unsolvable);
        }
        self.search(board)
    }

    /// IDA* without the parity pre-check.
    pub fn search(&self, board: &Board) -> Result<Solution> {
        let started = Instant::now();
        let mut threshold = estimate(board, &self.goals);
        let mut search = Search::new(*board, &self.goals);
        let mut iterations = 0;

        loop {
            if let Some(cap) = self.config.max_iterations {
                if iterations >= cap {
                    warn!(
                        "giving up after {} passes, threshold {}, {} nodes",
                        iterations, threshold, search.nodes
                    );
                    return Err(SolveError::SearchTimeout { iterations });
                }
            }
            iterations += 1;

            let nodes_before = search.nodes;
            let outcome = search.bounded(0, threshold);
            debug!(
                "pass {}: threshold {} expanded {} nodes -> {:?}",
                iterations,
                threshold,
                search.nodes - nodes_before,
                outcome
            );

            let next = next_threshold(outcome, iterations).map_err(|err| {
                error!(
                    "search space exhausted at threshold {} for {:?}",
                    threshold, board
                );
                err
            })?;
            match next {
                Some(next) => {
                    debug_assert!(next > threshold);
                    threshold = next;
                }
                None => {
                    let solution = Solution {
                        moves: search.moves(),
                        iterations,
                        nodes_expanded: search.nodes,
                        elapsed: started.elapsed(),
                    };
                    info!(
                        "solved in {} moves, {} passes, {} nodes, {:.3}s",
                        solution.moves.len(),
                        iterations,
                        solution.nodes_expanded,
                        solution.elapsed.as_secs_f64()
                    );
                    return Ok(solution);
                }
            }
        }
    }
}

/// Maps a pass outcome to the next threshold, `None` once the goal is found.
/// A pass with no viable branch cannot happen on a solvable board.
fn next_threshold(outcome: Bound, iterations: usize) -> Result<Option<u32>> {
    match outcome {
        Bound::Found => Ok(None),
        Bound::Exceeded(next) => Ok(Some(next)),
        Bound::Exhausted => Err(SolveError::InternalConsistency { iterations }),
    }
}

/// Solves `board` with an unbounded default solver.
pub fn solve(board: &Board) -> Result<Solution> {
    Solver::default().solve(board)
}
