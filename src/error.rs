//! Error types for the Tower of Hanoi search engine.

use thiserror::Error;

/// Errors raised at the engine boundary.
///
/// A search that fails to reach the goal is *not* an error; it is reported as an
/// [`AlgorithmResult`](crate::solver::AlgorithmResult) with `success == false`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HanoiError {
    /// Algorithm selector was not one of `"1"`, `"2"`, `"3"`.
    #[error("Invalid algorithm selection: {0:?}")]
    InvalidAlgorithm(String),

    /// Heuristic selector was not one of `"1"`, `"2"`, `"3"`.
    #[error("Invalid heuristic selection: {0:?}")]
    InvalidHeuristic(String),

    /// The puzzle needs at least one disk.
    #[error("Disk count must be at least 1, got {0}")]
    InvalidDiskCount(usize),

    /// Disk count outside the range a race accepts.
    #[error("Disk count {count} is outside the supported range {min}..={max}")]
    DiskCountOutOfRange { count: usize, min: usize, max: usize },

    /// Playback speed outside `1..=10`.
    #[error("Playback speed {0} is outside the supported range 1..=10")]
    InvalidPlaybackSpeed(u32),

    /// A move that cannot be applied to the given state.
    #[error("Invalid move from peg {from} to peg {to}: {reason}")]
    InvalidMove {
        from: usize,
        to: usize,
        reason: &'static str,
    },

    /// A peg layout that breaks the stacking or conservation rules.
    #[error("Invalid peg layout: {0}")]
    InvalidLayout(String),
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, HanoiError>;
