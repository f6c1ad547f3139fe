//! Head-to-head race between two configured search strategies.
//!
//! A race runs both competitors sequentially on the same puzzle, each with its own
//! solver instance and jitter source, then compares the results.
use crate::ai::HanoiAi;
use crate::engine::{Disk, PuzzleState, Replay};
use crate::error::{HanoiError, Result};
use crate::heuristics::HeuristicKind;
use crate::outcome::{determine_winner, Winner};
use crate::solver::{AlgorithmKind, AlgorithmResult};
use std::time::Duration;
use tracing::info;

pub const MIN_DISKS: usize = 2;
pub const MAX_DISKS: usize = 8;
pub const DEFAULT_DISKS: usize = 3;

pub const MIN_PLAYBACK_SPEED: u32 = 1;
pub const MAX_PLAYBACK_SPEED: u32 = 10;
pub const DEFAULT_PLAYBACK_SPEED: u32 = 5;

/// One side of a race: a strategy and the heuristic it searches with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Competitor {
    pub algorithm: AlgorithmKind,
    pub heuristic: HeuristicKind,
}

impl Competitor {
    pub fn new(algorithm: AlgorithmKind, heuristic: HeuristicKind) -> Self {
        Competitor {
            algorithm,
            heuristic,
        }
    }

    /// Display label such as `"A* Algorithm (Distance-Based)"`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.algorithm.name(), self.heuristic.name())
    }
}

/// Settings for a race.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RaceConfig {
    pub num_disks: usize,
    pub first: Competitor,
    pub second: Competitor,
    /// Seeds the jitter of both competitors when set; entropy otherwise.
    pub seed: Option<u64>,
    /// Replay speed, `1..=10`.
    pub playback_speed: u32,
}

impl Default for RaceConfig {
    fn default() -> Self {
        RaceConfig {
            num_disks: DEFAULT_DISKS,
            first: Competitor::new(AlgorithmKind::AStar, HeuristicKind::DistanceBased),
            second: Competitor::new(AlgorithmKind::BestFirst, HeuristicKind::DistanceBased),
            seed: None,
            playback_speed: DEFAULT_PLAYBACK_SPEED,
        }
    }
}

impl RaceConfig {
    /// Checks the disk count and playback speed against the supported ranges.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_DISKS..=MAX_DISKS).contains(&self.num_disks) {
            return Err(HanoiError::DiskCountOutOfRange {
                count: self.num_disks,
                min: MIN_DISKS,
                max: MAX_DISKS,
            });
        }
        if !(MIN_PLAYBACK_SPEED..=MAX_PLAYBACK_SPEED).contains(&self.playback_speed) {
            return Err(HanoiError::InvalidPlaybackSpeed(self.playback_speed));
        }
        Ok(())
    }

    /// Pause between replay frames: faster speeds mean shorter delays.
    pub fn frame_delay(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.playback_speed.max(1)))
    }
}

/// Results of both competitors and the verdict.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RaceReport {
    pub initial_layout: Vec<Vec<Disk>>,
    pub first: AlgorithmResult,
    pub second: AlgorithmResult,
    pub winner: Winner,
}

impl RaceReport {
    /// Number of frames needed to replay the longer of the two move paths.
    pub fn frame_count(&self) -> usize {
        self.first.move_path.len().max(self.second.move_path.len())
    }

    /// One-line summary of the race.
    pub fn headline(&self, config: &RaceConfig) -> String {
        match (self.first.success, self.second.success) {
            (false, false) => "Both algorithms failed to solve the puzzle!".to_string(),
            (false, true) => format!("{} failed to solve the puzzle!", config.first.algorithm),
            (true, false) => format!("{} failed to solve the puzzle!", config.second.algorithm),
            (true, true) => match self.winner {
                Winner::Tie => "It's a perfect tie!".to_string(),
                Winner::First => format!("{} wins!", config.first.algorithm),
                Winner::Second => format!("{} wins!", config.second.algorithm),
            },
        }
    }

    /// Replays for both competitors, positioned on the initial configuration.
    pub fn replays(&self, num_disks: usize) -> (Replay, Replay) {
        let initial = PuzzleState::initial(num_disks);
        (
            Replay::new(initial.clone(), self.first.move_path.clone()),
            Replay::new(initial, self.second.move_path.clone()),
        )
    }
}

fn build_solver(config: &RaceConfig, competitor: &Competitor, index: u64) -> Result<HanoiAi> {
    match config.seed {
        Some(seed) => HanoiAi::seeded(
            config.num_disks,
            competitor.heuristic,
            seed.wrapping_add(index),
        ),
        None => HanoiAi::new(config.num_disks, competitor.heuristic.selector()),
    }
}

/// Validates `config`, runs the first competitor then the second, and compares them.
///
/// # Errors
/// Returns the validation error if the configuration is out of range.
pub fn run_race(config: &RaceConfig) -> Result<RaceReport> {
    config.validate()?;

    let mut first_ai = build_solver(config, &config.first, 0)?;
    let first = first_ai.run_algorithm(config.first.algorithm);

    let mut second_ai = build_solver(config, &config.second, 1)?;
    let second = second_ai.run_algorithm(config.second.algorithm);

    let winner = determine_winner(&first, &second);
    info!(
        num_disks = config.num_disks,
        first = %config.first.label(),
        second = %config.second.label(),
        %winner,
        "race finished"
    );

    Ok(RaceReport {
        initial_layout: first_ai.initial_state().layout(),
        first,
        second,
        winner,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_config(num_disks: usize, first: Competitor, second: Competitor) -> RaceConfig {
        RaceConfig {
            num_disks,
            first,
            second,
            seed: Some(1234),
            playback_speed: DEFAULT_PLAYBACK_SPEED,
        }
    }

    fn result(success: bool, move_count: i64, nodes_explored: usize) -> AlgorithmResult {
        if success {
            AlgorithmResult {
                move_count,
                nodes_explored,
                move_path: Vec::new(),
                success,
            }
        } else {
            AlgorithmResult::failed(nodes_explored, Vec::new())
        }
    }

    #[test]
    fn test_default_config() {
        let config = RaceConfig::default();
        assert_eq!(config.num_disks, 3);
        assert_eq!(config.first.algorithm, AlgorithmKind::AStar);
        assert_eq!(config.second.algorithm, AlgorithmKind::BestFirst);
        assert_eq!(config.first.heuristic, HeuristicKind::DistanceBased);
        assert!(config.validate().is_ok());
        assert_eq!(config.frame_delay(), Duration::from_millis(200));
    }

    #[test]
    fn test_validate_bounds() {
        let mut config = RaceConfig {
            num_disks: 1,
            ..RaceConfig::default()
        };
        assert_eq!(
            config.validate().unwrap_err(),
            HanoiError::DiskCountOutOfRange { count: 1, min: 2, max: 8 }
        );
        config.num_disks = 9;
        assert!(config.validate().is_err());
        config.num_disks = 8;
        assert!(config.validate().is_ok());

        config.playback_speed = 0;
        assert_eq!(config.validate().unwrap_err(), HanoiError::InvalidPlaybackSpeed(0));
        config.playback_speed = 10;
        assert!(config.validate().is_ok());
        assert_eq!(config.frame_delay(), Duration::from_millis(100));
    }

    #[test]
    fn test_run_race_rejects_invalid_config() {
        let config = RaceConfig {
            num_disks: 12,
            ..RaceConfig::default()
        };
        assert!(run_race(&config).is_err());
    }

    #[test]
    fn test_seeded_race_is_reproducible() {
        let config = seeded_config(
            4,
            Competitor::new(AlgorithmKind::AStar, HeuristicKind::DistanceBased),
            Competitor::new(AlgorithmKind::BestFirst, HeuristicKind::WeightedPosition),
        );
        let first_run = run_race(&config).unwrap();
        let second_run = run_race(&config).unwrap();
        assert_eq!(first_run, second_run);
        assert_eq!(
            first_run.initial_layout,
            vec![vec![4, 3, 2, 1], vec![], vec![]]
        );
        assert!(first_run.first.success);
        assert!(first_run.second.success);
        assert_eq!(
            first_run.winner,
            determine_winner(&first_run.first, &first_run.second)
        );
    }

    #[test]
    fn test_race_replays_reach_goal() {
        let config = seeded_config(
            3,
            Competitor::new(AlgorithmKind::AStar, HeuristicKind::DistanceBased),
            Competitor::new(AlgorithmKind::BestFirst, HeuristicKind::CorrectPeg),
        );
        let report = run_race(&config).unwrap();
        assert_eq!(
            report.frame_count(),
            report.first.move_path.len().max(report.second.move_path.len())
        );

        let (mut first, mut second) = report.replays(config.num_disks);
        first.seek(first.len()).unwrap();
        second.seek(second.len()).unwrap();
        assert!(first.current().is_goal(3));
        assert!(second.current().is_goal(3));
    }

    #[test]
    fn test_hill_climbing_failure_headline() {
        // Hill climbing with correct-peg cannot leave the start state.
        let config = seeded_config(
            3,
            Competitor::new(AlgorithmKind::HillClimbing, HeuristicKind::CorrectPeg),
            Competitor::new(AlgorithmKind::AStar, HeuristicKind::DistanceBased),
        );
        let report = run_race(&config).unwrap();
        assert!(!report.first.success);
        assert_eq!(report.winner, Winner::Second);
        assert_eq!(report.headline(&config), "Hill Climbing failed to solve the puzzle!");
    }

    #[test]
    fn test_headlines() {
        let config = RaceConfig::default();
        let report = |first: AlgorithmResult, second: AlgorithmResult| {
            let winner = determine_winner(&first, &second);
            RaceReport {
                initial_layout: Vec::new(),
                first,
                second,
                winner,
            }
        };

        assert_eq!(
            report(result(false, 0, 5), result(false, 0, 9)).headline(&config),
            "Both algorithms failed to solve the puzzle!"
        );
        assert_eq!(
            report(result(true, 7, 5), result(false, 0, 9)).headline(&config),
            "Best-First Search failed to solve the puzzle!"
        );
        assert_eq!(
            report(result(true, 7, 15), result(true, 7, 15)).headline(&config),
            "It's a perfect tie!"
        );
        assert_eq!(
            report(result(true, 7, 20), result(true, 7, 15)).headline(&config),
            "Best-First Search wins!"
        );
        assert_eq!(
            report(result(true, 7, 20), result(true, 9, 15)).headline(&config),
            "A* Algorithm wins!"
        );
    }

    #[test]
    fn test_competitor_label() {
        let competitor = Competitor::new(AlgorithmKind::HillClimbing, HeuristicKind::WeightedPosition);
        assert_eq!(competitor.label(), "Hill Climbing (Weighted-Position)");
    }
}
