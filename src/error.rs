//! Crate-wide error type.

use thiserror::Error as ThisError;

/// Errors reported by solvers, matrix construction, and TSPLIB loading.
#[derive(Debug, ThisError)]
pub enum TspError {
    /// The input matrix or parameters are unusable.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// The Held-Karp state tables could not be allocated.
    #[error("cannot allocate {states} dynamic-programming states for {nodes} nodes")]
    ResourceExhausted {
        /// Number of nodes in the instance.
        nodes: usize,
        /// Number of (node, mask) states requested.
        states: usize,
    },
    /// Malformed TSPLIB text.
    #[error("line {line}: {message}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// What went wrong.
        message: String,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TspError>;

impl TspError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}
