//! Decides the winner between two search results.
use crate::solver::AlgorithmResult;
use std::cmp::Ordering;
use std::fmt;

/// Which of two competing results won.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Winner {
    First,
    Second,
    Tie,
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Winner::First => "first",
            Winner::Second => "second",
            Winner::Tie => "tie",
        })
    }
}

/// Compares two results: a success beats a failure, then fewer moves wins, then fewer
/// explored nodes. Two failures, or identical counts, are a tie.
///
/// # Examples
///
/// ```
/// use hanoi_race::outcome::{determine_winner, Winner};
/// use hanoi_race::solver::AlgorithmResult;
///
/// let slower = AlgorithmResult { move_count: 7, nodes_explored: 20, move_path: vec![], success: true };
/// let faster = AlgorithmResult { move_count: 7, nodes_explored: 15, move_path: vec![], success: true };
/// assert_eq!(determine_winner(&slower, &faster), Winner::Second);
/// ```
pub fn determine_winner(first: &AlgorithmResult, second: &AlgorithmResult) -> Winner {
    match (first.success, second.success) {
        (false, false) => Winner::Tie,
        (false, true) => Winner::Second,
        (true, false) => Winner::First,
        (true, true) => {
            let ordering = first
                .move_count
                .cmp(&second.move_count)
                .then_with(|| first.nodes_explored.cmp(&second.nodes_explored));
            match ordering {
                Ordering::Less => Winner::First,
                Ordering::Greater => Winner::Second,
                Ordering::Equal => Winner::Tie,
            }
        }
    }
}
