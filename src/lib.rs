//! # Fifteen Solver
//!
//! Optimal solver for the 4x4 sliding tile puzzle. Boards are searched with
//! IDA* guided by Manhattan distance plus linear conflict, after a parity
//! check has ruled out unsolvable inputs.
//!
//! ## Modules
//! - `puzzle`: the `Board`, blank `Move`s, the `GoalTable` and scrambling.
//! - `heuristic`: the admissible cost estimate.
//! - `moves`: one-slide neighbours of a board.
//! - `solvability`: the inversion parity test.
//! - `search`: the IDA* `Solver`.
//! - `parse`: the four-line board text format.
//! - `service`: request/response boundary with structured failures.
//! - `config` and `error`: solver settings and the error taxonomy.
//!
//! ```
//! use fifteen_solver::{parse_board, Move, Solver};
//!
//! let board = parse_board("1 2 3 4\n5 6 7 8\n9 10 11 12\n13 14 0 15").unwrap();
//! let solution = Solver::default().solve(&board).unwrap();
//! assert_eq!(solution.moves, vec![Move::Right]);
//! ```

pub mod config;
pub mod error;
pub mod heuristic;
pub mod moves;
pub mod parse;
pub mod puzzle;
pub mod search;
pub mod service;
pub mod solvability;

pub use config::SolverConfig;
pub use error::{Result, SolveError};
pub use parse::parse_board;
pub use puzzle::{Board, GoalTable, Move};
pub use search::{solve, Solution, Solver};
