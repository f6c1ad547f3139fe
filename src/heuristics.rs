//! Heuristic functions that estimate how close a state is to the goal.
//!
//! Every heuristic returns an `f64` where lower means closer to the goal; all search
//! strategies minimise it. Tie-breaking jitter is drawn from a caller-supplied
//! [`JitterSource`] so runs can be pinned with a seeded generator or made fully
//! deterministic with [`NoJitter`].
use crate::engine::{Disk, PuzzleState, GOAL_PEG, PEG_COUNT, START_PEG};
use crate::error::{HanoiError, Result};
use rand::rngs::SmallRng;
use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// Upper bound (exclusive) of the random tie-breaking term.
pub const JITTER_SPAN: f64 = 0.1;

/// Penalty per disk still sitting on the start peg in the distance-based heuristic.
pub const START_PEG_PENALTY: f64 = 0.1;

/// Source of the small random term added by the distance-based and weighted-position
/// heuristics.
pub trait JitterSource {
    /// Returns a value in `[0, JITTER_SPAN)`.
    fn jitter(&mut self) -> f64;
}

impl JitterSource for SmallRng {
    fn jitter(&mut self) -> f64 {
        self.gen_range(0.0..JITTER_SPAN)
    }
}

/// Jitter source that always returns zero, making every heuristic deterministic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoJitter;

impl JitterSource for NoJitter {
    fn jitter(&mut self) -> f64 {
        0.0
    }
}

/// The three interchangeable heuristics, selectable by code `"1"`, `"2"` or `"3"`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HeuristicKind {
    /// Disks not on the goal peg, plus a penalty for disks on the start peg.
    #[default]
    DistanceBased,
    /// +1 per disk on the goal peg, -1 per disk elsewhere.
    CorrectPeg,
    /// Position-aware scoring of the goal peg against the sorted goal stack.
    WeightedPosition,
}

impl HeuristicKind {
    pub const ALL: [HeuristicKind; 3] = [
        HeuristicKind::DistanceBased,
        HeuristicKind::CorrectPeg,
        HeuristicKind::WeightedPosition,
    ];

    /// Parses a selector code.
    ///
    /// # Errors
    /// Returns `HanoiError::InvalidHeuristic` for anything other than `"1"`, `"2"` or `"3"`.
    pub fn from_selector(code: &str) -> Result<Self> {
        match code {
            "1" => Ok(HeuristicKind::DistanceBased),
            "2" => Ok(HeuristicKind::CorrectPeg),
            "3" => Ok(HeuristicKind::WeightedPosition),
            other => Err(HanoiError::InvalidHeuristic(other.to_string())),
        }
    }

    pub fn selector(&self) -> &'static str {
        match self {
            HeuristicKind::DistanceBased => "1",
            HeuristicKind::CorrectPeg => "2",
            HeuristicKind::WeightedPosition => "3",
        }
    }

    /// Human-readable label.
    pub fn name(&self) -> &'static str {
        match self {
            HeuristicKind::DistanceBased => "Distance-Based",
            HeuristicKind::CorrectPeg => "Correct-Peg",
            HeuristicKind::WeightedPosition => "Weighted-Position",
        }
    }

    /// Scores `state` with this heuristic.
    pub fn evaluate(
        &self,
        state: &PuzzleState,
        num_disks: usize,
        jitter: &mut dyn JitterSource,
    ) -> f64 {
        match self {
            HeuristicKind::DistanceBased => distance_based(state, num_disks, jitter),
            HeuristicKind::CorrectPeg => correct_peg(state),
            HeuristicKind::WeightedPosition => weighted_position(state, num_disks, jitter),
        }
    }
}

impl FromStr for HeuristicKind {
    type Err = HanoiError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_selector(s)
    }
}

impl fmt::Display for HeuristicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Maps a heuristic selector code to its display name, `"Unknown Heuristic"` otherwise.
pub fn heuristic_name(code: &str) -> &'static str {
    HeuristicKind::from_selector(code)
        .map(|kind| kind.name())
        .unwrap_or("Unknown Heuristic")
}

/// Distance-based heuristic (the default).
///
/// `num_disks - |goal peg| + 0.1 * |start peg| + jitter`. The start-peg penalty can
/// overestimate the remaining distance, so this heuristic is not admissible and A*
/// built on it may return a longer-than-minimal solution.
pub fn distance_based(
    state: &PuzzleState,
    num_disks: usize,
    jitter: &mut dyn JitterSource,
) -> f64 {
    let off_goal = num_disks as f64 - state.peg(GOAL_PEG).len() as f64;
    let penalty = state.peg(START_PEG).len() as f64 * START_PEG_PENALTY;
    off_goal + penalty + jitter.jitter()
}

/// Correct-peg heuristic: `+1` for every disk on the goal peg, `-1` for every other disk.
///
/// Disk order on the goal peg is ignored.
pub fn correct_peg(state: &PuzzleState) -> f64 {
    (0..PEG_COUNT)
        .map(|peg| {
            let count = state.peg(peg).len() as f64;
            if peg == GOAL_PEG {
                count
            } else {
                -count
            }
        })
        .sum()
}

// Index of `disk` in the goal stack `[num_disks, ..., 1]`, bottom first.
fn expected_position(disk: Disk, num_disks: usize) -> usize {
    (1..=num_disks as Disk)
        .rev()
        .position(|expected| expected == disk)
        .unwrap_or(num_disks)
}

/// Weighted-position heuristic.
///
/// A disk on the goal peg adds `position + 1` when it sits at its position in the sorted
/// goal stack and `0.5` otherwise. A disk on any other peg subtracts
/// `expected_position + 1`. Jitter is added on top.
pub fn weighted_position(
    state: &PuzzleState,
    num_disks: usize,
    jitter: &mut dyn JitterSource,
) -> f64 {
    let mut score = 0.0;
    for (peg, stack) in state.pegs().iter().enumerate() {
        for (position, &disk) in stack.iter().enumerate() {
            let expected = expected_position(disk, num_disks);
            if peg == GOAL_PEG {
                score += if position == expected {
                    (position + 1) as f64
                } else {
                    0.5
                };
            } else {
                score -= (expected + 1) as f64;
            }
        }
    }
    score + jitter.jitter()
}
