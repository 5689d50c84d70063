//! Error types shared by every entry point of the crate.
//!
//! Only contract violations are errors. Degenerate but well-formed input
//! (an empty graph, a graph without edges, a single-sample function, an
//! empty diagram) is handled by explicit branches in the algorithms.

use thiserror::Error;

/// Errors raised at the public boundary of the persistence engines
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PersistenceError {
    #[error("length mismatch: {what} has {actual} entries, expected {expected}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("vertex index {index} out of range for a graph with {n_vertices} vertices")]
    VertexOutOfRange { index: i64, n_vertices: usize },

    #[error("unknown filtration order `{0}`, expected `sublevel` or `superlevel`")]
    UnknownOrder(String),

    #[error("{what} at index {index} is NaN")]
    NotANumber { what: &'static str, index: usize },

    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, PersistenceError>;

/// Reject NaN entries, which have no position in a filtration.
pub(crate) fn ensure_no_nan(what: &'static str, values: &[f64]) -> Result<()> {
    match values.iter().position(|v| v.is_nan()) {
        Some(index) => Err(PersistenceError::NotANumber { what, index }),
        None => Ok(()),
    }
}

/// Reject a slice whose length differs from the expected one.
pub(crate) fn ensure_len(what: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(PersistenceError::LengthMismatch { what, expected, actual })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nan_is_reported_with_position() {
        let err = ensure_no_nan("vertex weight", &[1.0, f64::NAN, 2.0]).unwrap_err();
        assert_eq!(err, PersistenceError::NotANumber { what: "vertex weight", index: 1 });
        assert!(ensure_no_nan("vertex weight", &[f64::INFINITY, 0.0]).is_ok());
    }

    #[test]
    fn test_messages_are_descriptive() {
        let err = PersistenceError::VertexOutOfRange { index: -1, n_vertices: 3 };
        assert_eq!(
            err.to_string(),
            "vertex index -1 out of range for a graph with 3 vertices"
        );
        assert!(ensure_len("edge weights", 2, 3).is_err());
    }
}
