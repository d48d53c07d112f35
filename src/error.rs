use std::fmt;

pub type Result<T> = std::result::Result<T, SolveError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    /// Wrong row/column counts or a token that is not an integer.
    #[error("invalid input format: {0}")]
    InputFormat(FormatProblem),
    /// The 16 values are not exactly {0..15}.
    #[error("puzzle must contain all numbers from 0 to 15 exactly once ({0})")]
    InvalidContent(ContentProblem),
    #[error("this puzzle configuration is not solvable (inversion parity is even)")]
    Unsolvable,
    #[error("no solution found within {iterations} search iterations")]
    SearchTimeout { iterations: usize },
    /// Bounded search ran out of moves on a board the parity check accepted.
    #[error("internal consistency fault: search exhausted after {iterations} iterations on a solvable board")]
    InternalConsistency { iterations: usize },
}

impl SolveError {
    /// Stable label for the cause, used by the service response.
    pub fn kind(&self) -> &'static str {
        match self {
            SolveError::InputFormat(_) => "input_format",
            SolveError::InvalidContent(_) => "invalid_content",
            SolveError::Unsolvable => "unsolvable",
            SolveError::SearchTimeout { .. } => "search_timeout",
            SolveError::InternalConsistency { .. } => "internal",
        }
    }

    /// Errors caused by the caller's input rather than by the search.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            SolveError::InputFormat(_) | SolveError::InvalidContent(_) | SolveError::Unsolvable
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatProblem {
    RowCount(usize),
    ColumnCount { row: usize, found: usize },
    NotANumber { row: usize, token: String },
    Json(String),
}

impl fmt::Display for FormatProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatProblem::RowCount(n) => write!(f, "puzzle must have exactly 4 rows, found {}", n),
            FormatProblem::ColumnCount { row, found } => write!(
                f,
                "row {} must have exactly 4 numbers, found {}",
                row + 1,
                found
            ),
            FormatProblem::NotANumber { row, token } => {
                write!(f, "row {} contains '{}', numbers only", row + 1, token)
            }
            FormatProblem::Json(msg) => write!(f, "malformed request: {}", msg),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContentProblem {
    pub missing: Vec<i64>,
    pub duplicates: Vec<i64>,
    pub out_of_range: Vec<i64>,
}

impl fmt::Display for ContentProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if !self.missing.is_empty() {
            parts.push(format!("missing {:?}", self.missing));
        }
        if !self.duplicates.is_empty() {
            parts.push(format!("duplicated {:?}", self.duplicates));
        }
        if !self.out_of_range.is_empty() {
            parts.push(format!("out of range {:?}", self.out_of_range));
        }
        write!(f, "{}", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_labels_are_distinct() {
        let errors = [
            SolveError::InputFormat(FormatProblem::RowCount(3)),
            SolveError::InvalidContent(ContentProblem::default()),
            SolveError::Unsolvable,
            SolveError::SearchTimeout { iterations: 5 },
            SolveError::InternalConsistency { iterations: 5 },
        ];
        let mut kinds: Vec<_> = errors.iter().map(|e| e.kind()).collect();
        kinds.sort();
        kinds.dedup();
        assert_eq!(kinds.len(), errors.len());
    }

    #[test]
    fn test_user_errors() {
        assert!(SolveError::Unsolvable.is_user_error());
        assert!(SolveError::InputFormat(FormatProblem::RowCount(2)).is_user_error());
        assert!(!SolveError::SearchTimeout { iterations: 1 }.is_user_error());
        assert!(!SolveError::InternalConsistency { iterations: 1 }.is_user_error());
    }

    #[test]
    fn test_messages() {
        let err = SolveError::InputFormat(FormatProblem::RowCount(3));
        assert_eq!(
            err.to_string(),
            "invalid input format: puzzle must have exactly 4 rows, found 3"
        );
        let err = SolveError::InvalidContent(ContentProblem {
            missing: vec![7],
            duplicates: vec![3],
            out_of_range: vec![],
        });
        assert!(err.to_string().contains("missing [7], duplicated [3]"));
    }
}
