//! Search strategies for the Tower of Hanoi.
//!
//! Three strategies share the same state model and heuristic library:
//! - Best-First Search: greedy, frontier ordered by heuristic alone.
//! - A*: frontier ordered by moves so far plus heuristic.
//! - Hill Climbing: follows the single best neighbour until nothing improves.
//!
//! Every strategy runs to completion and reports an [`AlgorithmResult`]. Failing to
//! reach the goal is a normal result with `success == false`, not an error.
use crate::engine::{Move, PuzzleState, StateKey};
use crate::error::{HanoiError, Result};
use crate::heuristics::{HeuristicKind, JitterSource};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info, trace, warn};

/// `move_count` reported by a failed search.
pub const FAILED_MOVE_COUNT: i64 = -1;

/// Outcome of a single search run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlgorithmResult {
    /// Length of the solution, or [`FAILED_MOVE_COUNT`] when `success` is false.
    pub move_count: i64,
    /// Number of states taken off the frontier (or visited, for hill climbing).
    pub nodes_explored: usize,
    /// Moves to replay from the initial configuration. On failure this is empty for the
    /// frontier searches and the path up to the local optimum for hill climbing.
    pub move_path: Vec<Move>,
    pub success: bool,
}

impl AlgorithmResult {
    /// A successful result ending in `goal`.
    pub fn solved(goal: &PuzzleState, nodes_explored: usize) -> Self {
        AlgorithmResult {
            move_count: goal.moves_so_far() as i64,
            nodes_explored,
            move_path: goal.path(),
            success: true,
        }
    }

    /// A failed result carrying whatever partial path the strategy reached.
    pub fn failed(nodes_explored: usize, partial_path: Vec<Move>) -> Self {
        AlgorithmResult {
            move_count: FAILED_MOVE_COUNT,
            nodes_explored,
            move_path: partial_path,
            success: false,
        }
    }

    /// Solution length, or `None` if the search failed.
    pub fn moves(&self) -> Option<usize> {
        if self.success {
            usize::try_from(self.move_count).ok()
        } else {
            None
        }
    }
}

/// The three search strategies, selectable by code `"1"`, `"2"` or `"3"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AlgorithmKind {
    BestFirst,
    AStar,
    HillClimbing,
}

impl AlgorithmKind {
    pub const ALL: [AlgorithmKind; 3] = [
        AlgorithmKind::BestFirst,
        AlgorithmKind::AStar,
        AlgorithmKind::HillClimbing,
    ];

    /// Parses a selector code.
    ///
    /// # Errors
    /// Returns `HanoiError::InvalidAlgorithm` for anything other than `"1"`, `"2"` or `"3"`.
    pub fn from_selector(code: &str) -> Result<Self> {
        match code {
            "1" => Ok(AlgorithmKind::BestFirst),
            "2" => Ok(AlgorithmKind::AStar),
            "3" => Ok(AlgorithmKind::HillClimbing),
            other => Err(HanoiError::InvalidAlgorithm(other.to_string())),
        }
    }

    pub fn selector(&self) -> &'static str {
        match self {
            AlgorithmKind::BestFirst => "1",
            AlgorithmKind::AStar => "2",
            AlgorithmKind::HillClimbing => "3",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AlgorithmKind::BestFirst => "Best-First Search",
            AlgorithmKind::AStar => "A* Algorithm",
            AlgorithmKind::HillClimbing => "Hill Climbing",
        }
    }
}

impl FromStr for AlgorithmKind {
    type Err = HanoiError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_selector(s)
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Maps an algorithm selector code to its display name, `"Unknown Algorithm"` otherwise.
pub fn algorithm_name(code: &str) -> &'static str {
    AlgorithmKind::from_selector(code)
        .map(|kind| kind.name())
        .unwrap_or("Unknown Algorithm")
}

/// Runs the strategy `kind` from `initial` until it succeeds or gives up.
pub fn solve(
    kind: AlgorithmKind,
    initial: &PuzzleState,
    num_disks: usize,
    heuristic: HeuristicKind,
    jitter: &mut dyn JitterSource,
) -> AlgorithmResult {
    match kind {
        AlgorithmKind::BestFirst => best_first_search(initial, num_disks, heuristic, jitter),
        AlgorithmKind::AStar => a_star_search(initial, num_disks, heuristic, jitter),
        AlgorithmKind::HillClimbing => hill_climbing(initial, num_disks, heuristic, jitter),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FrontierOrder {
    Heuristic,
    CostPlusHeuristic,
}

// Min-heap entry: lowest priority first, then lowest serial (FIFO among equals).
struct FrontierEntry {
    priority: f64,
    serial: u64,
    state: PuzzleState,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.serial.cmp(&self.serial))
    }
}

fn successor(state: &PuzzleState, mv: Move) -> PuzzleState {
    match state.apply_move(mv) {
        Ok(next) => next,
        Err(err) => unreachable!("generated move could not be applied: {}", err),
    }
}

fn frontier_priority(
    order: FrontierOrder,
    heuristic: HeuristicKind,
    state: &PuzzleState,
    num_disks: usize,
    jitter: &mut dyn JitterSource,
) -> f64 {
    let estimate = heuristic.evaluate(state, num_disks, jitter);
    match order {
        FrontierOrder::Heuristic => estimate,
        FrontierOrder::CostPlusHeuristic => estimate + state.moves_so_far() as f64,
    }
}

fn frontier_search(
    kind: AlgorithmKind,
    order: FrontierOrder,
    initial: &PuzzleState,
    num_disks: usize,
    heuristic: HeuristicKind,
    jitter: &mut dyn JitterSource,
) -> AlgorithmResult {
    debug!(algorithm = %kind, heuristic = %heuristic, num_disks, "starting search");

    let mut visited: HashSet<StateKey> = HashSet::new();
    let mut frontier = BinaryHeap::new();
    let mut serial = 0_u64;
    let mut nodes_explored = 0_usize;

    visited.insert(initial.key());
    frontier.push(FrontierEntry {
        priority: frontier_priority(order, heuristic, initial, num_disks, jitter),
        serial,
        state: initial.clone(),
    });

    while let Some(FrontierEntry { priority, state, .. }) = frontier.pop() {
        nodes_explored += 1;

        if state.is_goal(num_disks) {
            let result = AlgorithmResult::solved(&state, nodes_explored);
            info!(
                algorithm = %kind,
                moves = result.move_count,
                nodes = nodes_explored,
                "goal reached"
            );
            return result;
        }

        trace!(
            priority,
            depth = state.moves_so_far(),
            frontier = frontier.len(),
            "expanding node"
        );

        for mv in state.legal_moves() {
            let next = successor(&state, mv);
            if !visited.insert(next.key()) {
                continue;
            }
            serial += 1;
            frontier.push(FrontierEntry {
                priority: frontier_priority(order, heuristic, &next, num_disks, jitter),
                serial,
                state: next,
            });
        }
    }

    warn!(
        algorithm = %kind,
        nodes = nodes_explored,
        "frontier exhausted without reaching the goal"
    );
    AlgorithmResult::failed(nodes_explored, Vec::new())
}

/// Greedy best-first search: the frontier is ordered by heuristic value alone.
///
/// States are marked visited when they are generated, so each configuration enters the
/// frontier at most once. `nodes_explored` counts states popped from the frontier.
pub fn best_first_search(
    initial: &PuzzleState,
    num_disks: usize,
    heuristic: HeuristicKind,
    jitter: &mut dyn JitterSource,
) -> AlgorithmResult {
    frontier_search(
        AlgorithmKind::BestFirst,
        FrontierOrder::Heuristic,
        initial,
        num_disks,
        heuristic,
        jitter,
    )
}

/// A* search: the frontier is ordered by `heuristic + moves_so_far`.
///
/// With the distance-based heuristic the estimate is not admissible, so the returned
/// solution is not guaranteed to be minimal.
pub fn a_star_search(
    initial: &PuzzleState,
    num_disks: usize,
    heuristic: HeuristicKind,
    jitter: &mut dyn JitterSource,
) -> AlgorithmResult {
    frontier_search(
        AlgorithmKind::AStar,
        FrontierOrder::CostPlusHeuristic,
        initial,
        num_disks,
        heuristic,
        jitter,
    )
}

/// Steepest-descent hill climbing.
///
/// Moves to the lowest-scoring neighbour (first one in move order on ties) while it is
/// strictly better than the current state. Stops with a failure carrying the path so far
/// as soon as no neighbour improves. `nodes_explored` counts loop iterations, including
/// the final goal check.
pub fn hill_climbing(
    initial: &PuzzleState,
    num_disks: usize,
    heuristic: HeuristicKind,
    jitter: &mut dyn JitterSource,
) -> AlgorithmResult {
    let kind = AlgorithmKind::HillClimbing;
    debug!(algorithm = %kind, heuristic = %heuristic, num_disks, "starting search");

    let mut current = initial.clone();
    let mut current_score = heuristic.evaluate(&current, num_disks, jitter);
    let mut nodes_explored = 0_usize;

    loop {
        nodes_explored += 1;

        if current.is_goal(num_disks) {
            let result = AlgorithmResult::solved(&current, nodes_explored);
            info!(
                algorithm = %kind,
                moves = result.move_count,
                nodes = nodes_explored,
                "goal reached"
            );
            return result;
        }

        let mut best: Option<(f64, PuzzleState)> = None;
        for mv in current.legal_moves() {
            let neighbor = successor(&current, mv);
            let score = heuristic.evaluate(&neighbor, num_disks, jitter);
            if best.as_ref().map_or(true, |(best_score, _)| score < *best_score) {
                best = Some((score, neighbor));
            }
        }

        let Some((best_score, best_neighbor)) = best else {
            warn!(algorithm = %kind, nodes = nodes_explored, "no legal moves available");
            return AlgorithmResult::failed(nodes_explored, current.path());
        };

        if best_score >= current_score {
            warn!(
                algorithm = %kind,
                nodes = nodes_explored,
                depth = current.moves_so_far(),
                score = current_score,
                "stuck at a local optimum"
            );
            return AlgorithmResult::failed(nodes_explored, current.path());
        }

        trace!(from = current_score, to = best_score, "climbing");
        current = best_neighbor;
        current_score = best_score;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Replay;
    use crate::heuristics::NoJitter;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn replay_to_end(num_disks: usize, moves: &[Move]) -> PuzzleState {
        let mut replay = Replay::new(PuzzleState::initial(num_disks), moves.to_vec());
        replay.seek(moves.len()).expect("solution path must be legal");
        replay.current().clone()
    }

    #[test]
    fn test_selectors_and_names() {
        for kind in AlgorithmKind::ALL {
            assert_eq!(AlgorithmKind::from_selector(kind.selector()).unwrap(), kind);
        }
        assert_eq!("3".parse::<AlgorithmKind>().unwrap(), AlgorithmKind::HillClimbing);
        assert_eq!(
            AlgorithmKind::from_selector("0").unwrap_err(),
            HanoiError::InvalidAlgorithm("0".to_string())
        );
        assert_eq!(algorithm_name("1"), "Best-First Search");
        assert_eq!(algorithm_name("2"), "A* Algorithm");
        assert_eq!(algorithm_name("3"), "Hill Climbing");
        assert_eq!(algorithm_name("4"), "Unknown Algorithm");
    }

    #[test]
    fn test_frontier_pops_lowest_priority_then_fifo() {
        let state = PuzzleState::initial(1);
        let mut heap = BinaryHeap::new();
        for (serial, priority) in [(0, 2.0), (1, 1.0), (2, 1.0), (3, 0.5)] {
            heap.push(FrontierEntry {
                priority,
                serial,
                state: state.clone(),
            });
        }
        let order: Vec<u64> = std::iter::from_fn(|| heap.pop().map(|entry| entry.serial)).collect();
        assert_eq!(order, vec![3, 1, 2, 0]);
    }

    #[test]
    fn test_best_first_single_disk() {
        let initial = PuzzleState::initial(1);
        let result = best_first_search(&initial, 1, HeuristicKind::DistanceBased, &mut NoJitter);
        assert!(result.success);
        assert_eq!(result.move_count, 1);
        assert_eq!(result.nodes_explored, 2);
        assert_eq!(result.move_path, vec![Move::new(0, 2)]);
        assert_eq!(result.moves(), Some(1));
    }

    #[test]
    fn test_a_star_single_disk() {
        let initial = PuzzleState::initial(1);
        let result = a_star_search(&initial, 1, HeuristicKind::DistanceBased, &mut NoJitter);
        assert!(result.success);
        assert_eq!(result.move_path, vec![Move::new(0, 2)]);
        assert_eq!(result.nodes_explored, 2);
    }

    #[test]
    fn test_frontier_searches_complete_for_every_heuristic() {
        for num_disks in 2..=5 {
            let minimal = (1_i64 << num_disks) - 1;
            for heuristic in HeuristicKind::ALL {
                for kind in [AlgorithmKind::BestFirst, AlgorithmKind::AStar] {
                    let mut rng = SmallRng::seed_from_u64(num_disks as u64);
                    let initial = PuzzleState::initial(num_disks);
                    let result = solve(kind, &initial, num_disks, heuristic, &mut rng);

                    assert!(
                        result.success,
                        "{} with {} failed on {} disks",
                        kind, heuristic, num_disks
                    );
                    assert!(result.move_count >= minimal);
                    assert_eq!(result.move_path.len() as i64, result.move_count);
                    assert!(result.nodes_explored <= 3_usize.pow(num_disks as u32));
                    assert!(replay_to_end(num_disks, &result.move_path).is_goal(num_disks));
                }
            }
        }
    }

    #[test]
    fn test_a_star_three_disks_end_to_end() {
        let mut rng = SmallRng::seed_from_u64(2024);
        let initial = PuzzleState::initial(3);
        assert_eq!(initial.layout(), vec![vec![3, 2, 1], vec![], vec![]]);

        let result = a_star_search(&initial, 3, HeuristicKind::DistanceBased, &mut rng);
        assert!(result.success);
        assert!(result.move_count >= 7);
        assert_eq!(result.move_path.len() as i64, result.move_count);

        let end = replay_to_end(3, &result.move_path);
        assert_eq!(end.layout(), vec![vec![], vec![], vec![3, 2, 1]]);
    }

    #[test]
    fn test_frontier_search_reports_exhaustion() {
        // Two disks can never fill a three-disk goal peg: all 9 states get explored.
        let initial = PuzzleState::initial(2);
        let result = best_first_search(&initial, 3, HeuristicKind::DistanceBased, &mut NoJitter);
        assert!(!result.success);
        assert_eq!(result.move_count, FAILED_MOVE_COUNT);
        assert_eq!(result.nodes_explored, 9);
        assert!(result.move_path.is_empty());
        assert_eq!(result.moves(), None);

        let result = a_star_search(&initial, 3, HeuristicKind::CorrectPeg, &mut NoJitter);
        assert!(!result.success);
        assert_eq!(result.nodes_explored, 9);
    }

    #[test]
    fn test_hill_climbing_single_disk() {
        let initial = PuzzleState::initial(1);
        let result = hill_climbing(&initial, 1, HeuristicKind::DistanceBased, &mut NoJitter);
        assert!(result.success);
        assert_eq!(result.move_count, 1);
        assert_eq!(result.nodes_explored, 2);
        assert_eq!(result.move_path, vec![Move::new(0, 2)]);
    }

    #[test]
    fn test_hill_climbing_local_optimum_keeps_path() {
        // 2.2 -> (0,2) 1.1 -> (0,1) 1.0, then the best neighbour scores 1.1.
        let initial = PuzzleState::initial(2);
        let result = hill_climbing(&initial, 2, HeuristicKind::DistanceBased, &mut NoJitter);
        assert!(!result.success);
        assert_eq!(result.move_count, FAILED_MOVE_COUNT);
        assert_eq!(result.nodes_explored, 3);
        assert_eq!(result.move_path, vec![Move::new(0, 2), Move::new(0, 1)]);
    }

    #[test]
    fn test_hill_climbing_stops_immediately_on_plateau() {
        // Correct-peg is minimised, so moving a disk onto the goal peg never helps and
        // the start state is already a local optimum.
        let initial = PuzzleState::initial(3);
        let result = hill_climbing(&initial, 3, HeuristicKind::CorrectPeg, &mut NoJitter);
        assert!(!result.success);
        assert_eq!(result.nodes_explored, 1);
        assert!(result.move_path.is_empty());
    }

    #[test]
    fn test_hill_climbing_terminates() {
        for num_disks in 2..=6 {
            let bound = 3_usize.pow(num_disks as u32);
            for heuristic in HeuristicKind::ALL {
                let initial = PuzzleState::initial(num_disks);
                let result = hill_climbing(&initial, num_disks, heuristic, &mut NoJitter);
                assert!(result.nodes_explored <= bound);
                assert_eq!(result.move_path.len() + 1, result.nodes_explored);

                let mut rng = SmallRng::seed_from_u64(11);
                let result = hill_climbing(&initial, num_disks, heuristic, &mut rng);
                let end = replay_to_end(num_disks, &result.move_path);
                assert_eq!(result.success, end.is_goal(num_disks));
            }
        }
    }
}
