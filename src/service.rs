//! Transport-agnostic solve boundary.
//!
//! A request carries raw board text; the response is a JSON-ready outcome
//! that names the failure cause. Nothing here panics on bad input.

use log::{info, warn};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{FormatProblem, Result, SolveError};
use crate::parse::parse_board;
use crate::puzzle::{Board, Move};
use crate::search::{Solution, Solver};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveRequest {
    pub puzzle: String,
}

/// The `success` field, fixed per response variant. Deserializing the
/// other boolean fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Success<const OK: bool>;

impl<const OK: bool> Success<OK> {
    pub fn get(&self) -> bool {
        OK
    }
}

impl<const OK: bool> Serialize for Success<OK> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_bool(OK)
    }
}

impl<'de, const OK: bool> Deserialize<'de> for Success<OK> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        if bool::deserialize(deserializer)? == OK {
            Ok(Success)
        } else {
            Err(D::Error::custom(format!("expected success: {}", OK)))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SolveResponse {
    Solved {
        success: Success<true>,
        moves: Vec<Move>,
        #[serde(rename = "echoedBoard")]
        echoed_board: Board,
        #[serde(rename = "elapsedSeconds")]
        elapsed_seconds: f64,
    },
    Failed {
        success: Success<false>,
        error: String,
        kind: String,
    },
}

impl SolveResponse {
    pub fn solved(board: Board, solution: &Solution) -> Self {
        SolveResponse::Solved {
            success: Success,
            moves: solution.moves.clone(),
            echoed_board: board,
            elapsed_seconds: solution.elapsed.as_secs_f64(),
        }
    }

    pub fn failed(err: &SolveError) -> Self {
        SolveResponse::Failed {
            success: Success,
            error: err.to_string(),
            kind: err.kind().to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SolveResponse::Solved { .. })
    }
}

/// Parses, validates and solves board text.
pub fn solve_text(solver: &Solver, text: &str) -> Result<(Board, Solution)> {
    let board = parse_board(text)?;
    let solution = solver.solve(&board)?;
    Ok((board, solution))
}

pub fn handle(solver: &Solver, request: &SolveRequest) -> SolveResponse {
    match solve_text(solver, &request.puzzle) {
        Ok((board, solution)) => SolveResponse::solved(board, &solution),
        Err(err) => {
            if err.is_user_error() {
                info!("rejected request: {}", err);
            } else {
                warn!("solve failed: {}", err);
            }
            SolveResponse::failed(&err)
        }
    }
}

/// JSON in, JSON out. A body that is not a `SolveRequest` is reported as
/// an input format failure.
pub fn handle_json(solver: &Solver, body: &str) -> String {
    let response = match serde_json::from_str::<SolveRequest>(body) {
        Ok(request) => handle(solver, &request),
        Err(e) => SolveResponse::failed(&SolveError::InputFormat(FormatProblem::Json(
            e.to_string(),
        ))),
    };
    serde_json::to_string(&response).unwrap_or_else(|e| {
        serde_json::json!({
            "success": false,
            "error": format!("failed to encode response: {}", e),
            "kind": "internal",
        })
        .to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SolverConfig;
    use serde_json::Value;

    fn request(puzzle: &str) -> SolveRequest {
        SolveRequest {
            puzzle: puzzle.to_string(),
        }
    }

    #[test]
    fn test_goal_request() {
        let solver = Solver::new(SolverConfig::service());
        let response = handle(&solver, &request("1 2 3 4\n5 6 7 8\n9 10 11 12\n13 14 15 0"));
        match response {
            SolveResponse::Solved {
                success,
                moves,
                echoed_board,
                elapsed_seconds,
            } => {
                assert!(success.get());
                assert!(moves.is_empty());
                assert!(echoed_board.is_goal());
                assert!(elapsed_seconds < 1.0);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_json_shape_on_success() {
        let solver = Solver::new(SolverConfig::service());
        let body = r#"{"puzzle": "1 2 3 4\n5 6 7 8\n9 10 11 12\n13 14 0 15"}"#;
        let value: Value = serde_json::from_str(&handle_json(&solver, body)).unwrap();
        assert_eq!(value["success"], Value::Bool(true));
        assert_eq!(value["moves"], serde_json::json!(["right"]));
        assert_eq!(value["echoedBoard"][3], serde_json::json!([13, 14, 0, 15]));
        assert!(value["elapsedSeconds"].is_number());
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_failures_name_their_cause() {
        let solver = Solver::new(SolverConfig::service());
        let cases = [
            ("1 2 3 4\n5 6 7 8\n9 10 11 12", "input_format"),
            ("1 2 3 4\n5 6 7 8\n9 10 11 12\n13 14 15 a", "input_format"),
            ("1 2 3 4\n5 6 7 8\n9 10 11 12\n13 14 14 0", "invalid_content"),
            ("1 2 3 4\n5 6 7 8\n9 10 11 12\n13 15 14 0", "unsolvable"),
        ];
        for (text, kind) in cases {
            let response = handle(&solver, &request(text));
            assert!(!response.is_success());
            match response {
                SolveResponse::Failed {
                    success,
                    kind: got,
                    error,
                } => {
                    assert!(!success.get());
                    assert_eq!(got, kind, "{}", error);
                }
                other => panic!("unexpected {:?}", other),
            }
        }
    }

    #[test]
    fn test_timeout_is_reported_distinctly() {
        let solver = Solver::new(SolverConfig::unbounded().with_max_iterations(0));
        let json = handle_json(&solver, r#"{"puzzle": "1 2 3 4\n5 6 7 8\n9 10 11 12\n13 14 15 0"}"#);
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["success"], Value::Bool(false));
        assert_eq!(value["kind"], "search_timeout");
    }

    #[test]
    fn test_success_flag_cannot_contradict_variant() {
        let solved_but_false = r#"{"success": false, "moves": [], "echoedBoard": [[1,2,3,4],[5,6,7,8],[9,10,11,12],[13,14,15,0]], "elapsedSeconds": 0.0}"#;
        assert!(serde_json::from_str::<SolveResponse>(solved_but_false).is_err());

        let failed_but_true = r#"{"success": true, "error": "x", "kind": "unsolvable"}"#;
        assert!(serde_json::from_str::<SolveResponse>(failed_but_true).is_err());

        let failed = SolveResponse::failed(&SolveError::Unsolvable);
        let value: Value = serde_json::to_value(&failed).unwrap();
        assert_eq!(value["success"], Value::Bool(false));
        let back: SolveResponse = serde_json::from_value(value).unwrap();
        assert_eq!(back, failed);
    }

    #[test]
    fn test_malformed_json_body() {
        let solver = Solver::default();
        let value: Value = serde_json::from_str(&handle_json(&solver, "{not json")).unwrap();
        assert_eq!(value["success"], Value::Bool(false));
        assert_eq!(value["kind"], "input_format");
    }

    #[test]
    fn test_response_round_trips_through_json() {
        let solver = Solver::default();
        let response = handle(&solver, &request("1 2 3 4\n5 6 7 8\n9 10 11 0\n13 14 15 12"));
        let json = serde_json::to_string(&response).unwrap();
        let back: SolveResponse = serde_json::from_str(&json).unwrap();
        match (back, response) {
            (
                SolveResponse::Solved { moves, echoed_board, .. },
                SolveResponse::Solved { moves: expected, echoed_board: board, .. },
            ) => {
                assert_eq!(moves, vec![Move::Down]);
                assert_eq!(moves, expected);
                assert_eq!(echoed_board, board);
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
