//! Configurable solver instance used by front-ends.
//!
//! A [`HanoiAi`] owns a disk count, a heuristic choice and a jitter source, and derives
//! the initial and goal configurations from the disk count. Each call to
//! [`HanoiAi::run`] performs one complete, blocking search from a fresh copy of the
//! initial state.
use crate::engine::PuzzleState;
use crate::error::{HanoiError, Result};
use crate::heuristics::{HeuristicKind, JitterSource};
use crate::solver::{self, AlgorithmKind, AlgorithmResult};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::fmt;
use tracing::debug;

pub use crate::heuristics::heuristic_name;
pub use crate::solver::algorithm_name;

pub struct HanoiAi {
    num_disks: usize,
    heuristic: HeuristicKind,
    initial_state: PuzzleState,
    goal_state: PuzzleState,
    jitter: Box<dyn JitterSource>,
}

fn check_disk_count(num_disks: usize) -> Result<()> {
    if num_disks == 0 {
        return Err(HanoiError::InvalidDiskCount(num_disks));
    }
    Ok(())
}

impl HanoiAi {
    /// Creates a solver from selector codes, with entropy-seeded jitter.
    ///
    /// # Errors
    /// * `HanoiError::InvalidDiskCount` if `num_disks` is zero.
    /// * `HanoiError::InvalidHeuristic` if `heuristic_selector` is not `"1"`, `"2"` or `"3"`.
    pub fn new(num_disks: usize, heuristic_selector: &str) -> Result<Self> {
        let heuristic = HeuristicKind::from_selector(heuristic_selector)?;
        Self::with_jitter(num_disks, heuristic, Box::new(SmallRng::from_entropy()))
    }

    /// Creates a solver whose jitter is reproducible for a given `seed`.
    pub fn seeded(num_disks: usize, heuristic: HeuristicKind, seed: u64) -> Result<Self> {
        Self::with_jitter(num_disks, heuristic, Box::new(SmallRng::seed_from_u64(seed)))
    }

    /// Creates a solver with an explicit jitter source, e.g. [`NoJitter`](crate::heuristics::NoJitter).
    ///
    /// # Examples
    ///
    /// ```
    /// use hanoi_race::ai::HanoiAi;
    /// use hanoi_race::heuristics::{HeuristicKind, NoJitter};
    ///
    /// let mut ai = HanoiAi::with_jitter(3, HeuristicKind::DistanceBased, Box::new(NoJitter)).unwrap();
    /// let result = ai.run("2").unwrap();
    /// assert!(result.success);
    /// assert_eq!(result.move_path.len() as i64, result.move_count);
    /// ```
    pub fn with_jitter(
        num_disks: usize,
        heuristic: HeuristicKind,
        jitter: Box<dyn JitterSource>,
    ) -> Result<Self> {
        check_disk_count(num_disks)?;
        Ok(HanoiAi {
            num_disks,
            heuristic,
            initial_state: PuzzleState::initial(num_disks),
            goal_state: PuzzleState::goal(num_disks),
            jitter,
        })
    }

    pub fn num_disks(&self) -> usize {
        self.num_disks
    }

    pub fn heuristic(&self) -> HeuristicKind {
        self.heuristic
    }

    /// Starting layout the returned move paths are replayed from.
    pub fn initial_state(&self) -> &PuzzleState {
        &self.initial_state
    }

    pub fn goal_state(&self) -> &PuzzleState {
        &self.goal_state
    }

    /// Changes the disk count and rebuilds the initial and goal states.
    pub fn set_num_disks(&mut self, num_disks: usize) -> Result<()> {
        check_disk_count(num_disks)?;
        debug!(from = self.num_disks, to = num_disks, "disk count changed");
        self.num_disks = num_disks;
        self.initial_state = PuzzleState::initial(num_disks);
        self.goal_state = PuzzleState::goal(num_disks);
        Ok(())
    }

    /// Selects a heuristic by selector code.
    pub fn set_heuristic(&mut self, selector: &str) -> Result<()> {
        let heuristic = HeuristicKind::from_selector(selector)?;
        self.set_heuristic_kind(heuristic);
        Ok(())
    }

    pub fn set_heuristic_kind(&mut self, heuristic: HeuristicKind) {
        debug!(from = %self.heuristic, to = %heuristic, "heuristic changed");
        self.heuristic = heuristic;
    }

    /// Replaces the jitter source used by later runs.
    pub fn set_jitter(&mut self, jitter: Box<dyn JitterSource>) {
        self.jitter = jitter;
    }

    /// Runs the algorithm named by `algorithm_selector` (`"1"`, `"2"` or `"3"`).
    ///
    /// # Errors
    /// Returns `HanoiError::InvalidAlgorithm` for an unknown selector. A search that does
    /// not reach the goal is returned as `Ok` with `success == false`.
    pub fn run(&mut self, algorithm_selector: &str) -> Result<AlgorithmResult> {
        let kind = AlgorithmKind::from_selector(algorithm_selector)?;
        Ok(self.run_algorithm(kind))
    }

    pub fn run_algorithm(&mut self, kind: AlgorithmKind) -> AlgorithmResult {
        let initial = PuzzleState::initial(self.num_disks);
        solver::solve(
            kind,
            &initial,
            self.num_disks,
            self.heuristic,
            self.jitter.as_mut(),
        )
    }
}

impl fmt::Debug for HanoiAi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HanoiAi")
            .field("num_disks", &self.num_disks)
            .field("heuristic", &self.heuristic)
            .field("initial_state", &self.initial_state.layout())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Replay;
    use crate::heuristics::NoJitter;

    #[test]
    fn test_new_validates_configuration() {
        assert!(HanoiAi::new(3, "1").is_ok());
        assert_eq!(
            HanoiAi::new(3, "7").unwrap_err(),
            HanoiError::InvalidHeuristic("7".to_string())
        );
        assert_eq!(
            HanoiAi::new(0, "1").unwrap_err(),
            HanoiError::InvalidDiskCount(0)
        );
    }

    #[test]
    fn test_derived_states_follow_disk_count() {
        let mut ai = HanoiAi::seeded(3, HeuristicKind::DistanceBased, 1).unwrap();
        assert_eq!(ai.initial_state().layout(), vec![vec![3, 2, 1], vec![], vec![]]);
        assert_eq!(ai.goal_state().layout(), vec![vec![], vec![], vec![3, 2, 1]]);

        ai.set_num_disks(5).unwrap();
        assert_eq!(ai.num_disks(), 5);
        assert_eq!(ai.initial_state().peg(0), &[5, 4, 3, 2, 1]);
        assert!(ai.goal_state().is_goal(5));

        assert!(ai.set_num_disks(0).is_err());
        assert_eq!(ai.num_disks(), 5);
    }

    #[test]
    fn test_set_heuristic() {
        let mut ai = HanoiAi::seeded(3, HeuristicKind::DistanceBased, 1).unwrap();
        ai.set_heuristic("3").unwrap();
        assert_eq!(ai.heuristic(), HeuristicKind::WeightedPosition);
        assert!(ai.set_heuristic("").is_err());
        assert_eq!(ai.heuristic(), HeuristicKind::WeightedPosition);
    }

    #[test]
    fn test_run_rejects_unknown_algorithm() {
        let mut ai = HanoiAi::seeded(3, HeuristicKind::DistanceBased, 1).unwrap();
        assert_eq!(
            ai.run("4").unwrap_err(),
            HanoiError::InvalidAlgorithm("4".to_string())
        );
    }

    #[test]
    fn test_runs_are_independent() {
        let mut ai =
            HanoiAi::with_jitter(3, HeuristicKind::DistanceBased, Box::new(NoJitter)).unwrap();
        let first = ai.run("1").unwrap();
        let second = ai.run("1").unwrap();
        assert_eq!(first, second);
        assert!(ai.initial_state().path().is_empty());
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let mut first = HanoiAi::seeded(4, HeuristicKind::WeightedPosition, 77).unwrap();
        let mut second = HanoiAi::seeded(4, HeuristicKind::WeightedPosition, 77).unwrap();
        assert_eq!(first.run("2").unwrap(), second.run("2").unwrap());
    }

    #[test]
    fn test_a_star_solution_replays_to_goal() {
        let mut ai = HanoiAi::seeded(3, HeuristicKind::DistanceBased, 3).unwrap();
        let result = ai.run("2").unwrap();
        assert!(result.success);
        assert!(result.move_count >= 7);

        let mut replay = Replay::new(ai.initial_state().clone(), result.move_path.clone());
        replay.seek(replay.len()).unwrap();
        assert_eq!(replay.current().layout(), ai.goal_state().layout());
    }

    #[test]
    fn test_naming_helpers() {
        assert_eq!(algorithm_name("2"), "A* Algorithm");
        assert_eq!(algorithm_name("?"), "Unknown Algorithm");
        assert_eq!(heuristic_name("2"), "Correct-Peg");
        assert_eq!(heuristic_name("?"), "Unknown Heuristic");
    }
}
