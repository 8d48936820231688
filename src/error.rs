use thiserror::Error;

/// Failure of a search or of building one of the searchable structures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The frontier ran empty before the goal was expanded.
    #[error("no path found")]
    NotFound,

    #[error("invalid start: {0}")]
    InvalidStart(String),

    #[error("invalid goal: {0}")]
    InvalidGoal(String),

    /// A way referenced a node that is not part of the route model.
    #[error("unknown node: {0}")]
    UnknownNode(usize),

    /// Malformed board text, `line` is 1-based.
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
}

pub type SearchResult<T> = Result<T, SearchError>;
