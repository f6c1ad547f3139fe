//! Core state model for the Tower of Hanoi search engine.
//!
//! This module defines the puzzle's fundamental components:
//! - `Move`: a single-disk relocation from one peg to another.
//! - `PuzzleState`: an immutable peg configuration together with the move path that
//!   produced it, move generation (`legal_moves`) and move application (`apply_move`).
//! - `StateKey`: the canonical configuration key used by visited sets.
//! - `Replay`: steps a move list forward and backward from an initial configuration,
//!   the way a front-end animates a finished search.
use crate::error::{HanoiError, Result};
use std::fmt;
use std::rc::Rc;

/// Number of pegs in the puzzle.
pub const PEG_COUNT: usize = 3;

/// Peg holding every disk in the initial configuration.
pub const START_PEG: usize = 0;

/// Peg that must hold every disk in the goal configuration.
pub const GOAL_PEG: usize = 2;

/// A disk is identified by its size; size 1 is the smallest disk.
pub type Disk = u32;

/// Moves the top disk of peg `from` onto peg `to`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: usize,
    pub to: usize,
}

impl Move {
    pub const fn new(from: usize, to: usize) -> Self {
        Move { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

// Path history is a persistent singly linked list: successors share their
// parent's history instead of copying it.
struct PathLink {
    step: Move,
    prev: Option<Rc<PathLink>>,
}

/// Canonical key of a peg configuration.
///
/// Two states reached through different move sequences have equal keys exactly when
/// every peg holds the same disks in the same order. Move counts and paths are not
/// part of the key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StateKey([Rc<Vec<Disk>>; PEG_COUNT]);

/// A puzzle configuration reached during a search.
///
/// Each peg lists its disks bottom to top, so sizes strictly decrease along a peg.
/// States are never mutated after construction: `apply_move` returns a new state that
/// shares the untouched peg and the path history with its parent.
#[derive(Clone)]
pub struct PuzzleState {
    pegs: [Rc<Vec<Disk>>; PEG_COUNT],
    moves_so_far: usize,
    nodes_explored_at_creation: usize,
    path: Option<Rc<PathLink>>,
}

fn descending_stack(num_disks: usize) -> Vec<Disk> {
    (1..=num_disks as Disk).rev().collect()
}

impl PuzzleState {
    /// Creates the initial configuration: every disk on peg 0, largest at the bottom.
    ///
    /// # Examples
    ///
    /// ```
    /// use hanoi_race::engine::PuzzleState;
    /// let state = PuzzleState::initial(3);
    /// assert_eq!(state.layout(), vec![vec![3, 2, 1], vec![], vec![]]);
    /// assert_eq!(state.moves_so_far(), 0);
    /// assert!(state.path().is_empty());
    /// ```
    pub fn initial(num_disks: usize) -> Self {
        let mut pegs: [Vec<Disk>; PEG_COUNT] = Default::default();
        pegs[START_PEG] = descending_stack(num_disks);
        Self::from_validated(pegs)
    }

    /// Creates the goal configuration: every disk on peg 2, largest at the bottom.
    pub fn goal(num_disks: usize) -> Self {
        let mut pegs: [Vec<Disk>; PEG_COUNT] = Default::default();
        pegs[GOAL_PEG] = descending_stack(num_disks);
        Self::from_validated(pegs)
    }

    /// Builds a state from an explicit layout, checking the stacking rule and that the
    /// disks are exactly `1..=n` for some `n >= 1`.
    ///
    /// # Errors
    /// Returns `HanoiError::InvalidLayout` if a peg is not strictly decreasing bottom to top,
    /// a size is missing or duplicated, or there are no disks at all.
    pub fn from_pegs(pegs: [Vec<Disk>; PEG_COUNT]) -> Result<Self> {
        for (index, peg) in pegs.iter().enumerate() {
            if peg.windows(2).any(|pair| pair[0] <= pair[1]) {
                return Err(HanoiError::InvalidLayout(format!(
                    "peg {} is not strictly decreasing from bottom to top: {:?}",
                    index, peg
                )));
            }
        }

        let mut all_disks: Vec<Disk> = pegs.iter().flatten().copied().collect();
        if all_disks.is_empty() {
            return Err(HanoiError::InvalidLayout("layout holds no disks".to_string()));
        }
        all_disks.sort_unstable();
        let expected = 1..=all_disks.len() as Disk;
        if !all_disks.iter().copied().eq(expected) {
            return Err(HanoiError::InvalidLayout(format!(
                "disk sizes must be exactly 1..={}, found {:?}",
                all_disks.len(),
                all_disks
            )));
        }

        Ok(Self::from_validated(pegs))
    }

    fn from_validated(pegs: [Vec<Disk>; PEG_COUNT]) -> Self {
        PuzzleState {
            pegs: pegs.map(Rc::new),
            moves_so_far: 0,
            nodes_explored_at_creation: 0,
            path: None,
        }
    }

    /// Disks on `peg`, bottom to top.
    ///
    /// # Panics
    /// Panics if `peg >= PEG_COUNT`.
    pub fn peg(&self, peg: usize) -> &[Disk] {
        &self.pegs[peg]
    }

    /// All pegs as borrowed slices.
    pub fn pegs(&self) -> [&[Disk]; PEG_COUNT] {
        [
            self.pegs[0].as_slice(),
            self.pegs[1].as_slice(),
            self.pegs[2].as_slice(),
        ]
    }

    /// Owned copy of the configuration, one vector per peg, bottom to top.
    pub fn layout(&self) -> Vec<Vec<Disk>> {
        self.pegs.iter().map(|peg| peg.to_vec()).collect()
    }

    /// Total number of disks across the three pegs.
    pub fn disk_count(&self) -> usize {
        self.pegs.iter().map(|peg| peg.len()).sum()
    }

    /// Number of moves taken from the initial configuration to reach this state.
    pub fn moves_so_far(&self) -> usize {
        self.moves_so_far
    }

    /// Bookkeeping counter copied forward from the parent state and incremented per move.
    pub fn nodes_explored_at_creation(&self) -> usize {
        self.nodes_explored_at_creation
    }

    /// Every move taken since the initial configuration, in order.
    pub fn path(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(self.moves_so_far);
        let mut link = self.path.as_deref();
        while let Some(node) = link {
            moves.push(node.step);
            link = node.prev.as_deref();
        }
        moves.reverse();
        moves
    }

    /// Canonical key of the peg configuration.
    pub fn key(&self) -> StateKey {
        StateKey(self.pegs.clone())
    }

    /// The top (smallest) disk of `peg`, if any.
    pub fn top(&self, peg: usize) -> Option<Disk> {
        self.pegs.get(peg).and_then(|stack| stack.last().copied())
    }

    /// Returns `true` when peg 2 holds exactly `[num_disks, ..., 1]`.
    ///
    /// The comparison is on the whole ordered sequence, not only on the disk count.
    pub fn is_goal(&self, num_disks: usize) -> bool {
        self.pegs[GOAL_PEG]
            .iter()
            .copied()
            .eq((1..=num_disks as Disk).rev())
    }

    /// Enumerates every legal move, ordered by source peg then destination peg.
    ///
    /// A move is legal when the source peg is non-empty and the destination peg is either
    /// empty or topped by a larger disk.
    ///
    /// # Examples
    ///
    /// ```
    /// use hanoi_race::engine::{Move, PuzzleState};
    /// let state = PuzzleState::initial(3);
    /// assert_eq!(state.legal_moves(), vec![Move::new(0, 1), Move::new(0, 2)]);
    /// ```
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::new();
        for from in 0..PEG_COUNT {
            let Some(disk) = self.top(from) else {
                continue;
            };
            for to in 0..PEG_COUNT {
                if from == to {
                    continue;
                }
                match self.top(to) {
                    Some(target) if target < disk => {}
                    _ => moves.push(Move::new(from, to)),
                }
            }
        }
        moves
    }

    fn check_move(&self, mv: Move) -> Result<Disk> {
        let invalid = |reason| HanoiError::InvalidMove {
            from: mv.from,
            to: mv.to,
            reason,
        };
        if mv.from >= PEG_COUNT || mv.to >= PEG_COUNT {
            return Err(invalid("peg index out of range"));
        }
        if mv.from == mv.to {
            return Err(invalid("source and destination are the same peg"));
        }
        let disk = self.top(mv.from).ok_or_else(|| invalid("source peg is empty"))?;
        if matches!(self.top(mv.to), Some(target) if target < disk) {
            return Err(invalid("cannot place a larger disk on a smaller one"));
        }
        Ok(disk)
    }

    /// Returns the state reached by moving the top disk of `mv.from` onto `mv.to`.
    ///
    /// The new state has `moves_so_far` incremented and `mv` appended to its path.
    /// Only the two touched pegs are copied; `self` is left unchanged.
    ///
    /// # Errors
    /// Returns `HanoiError::InvalidMove` if either peg index is out of range, the pegs are
    /// the same, the source peg is empty, or the moved disk is larger than the destination's
    /// top disk.
    pub fn apply_move(&self, mv: Move) -> Result<PuzzleState> {
        let disk = self.check_move(mv)?;

        let mut pegs = self.pegs.clone();
        Rc::make_mut(&mut pegs[mv.from]).pop();
        Rc::make_mut(&mut pegs[mv.to]).push(disk);

        Ok(PuzzleState {
            pegs,
            moves_so_far: self.moves_so_far + 1,
            nodes_explored_at_creation: self.nodes_explored_at_creation + 1,
            path: Some(Rc::new(PathLink {
                step: mv,
                prev: self.path.clone(),
            })),
        })
    }
}

impl fmt::Debug for PuzzleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PuzzleState")
            .field("pegs", &self.layout())
            .field("moves_so_far", &self.moves_so_far)
            .field("nodes_explored_at_creation", &self.nodes_explored_at_creation)
            .field("path", &self.path())
            .finish()
    }
}

impl fmt::Display for PuzzleState {
    /// Formats the state as one line per peg, disks listed bottom to top.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, peg) in self.pegs.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{} |", index)?;
            for disk in peg.iter() {
                write!(f, " {}", disk)?;
            }
        }
        Ok(())
    }
}

/// Steps through a move list starting from an initial configuration.
///
/// Every visited frame is kept so that stepping back is a pop, mirroring how a
/// front-end replays a finished search one move at a time.
#[derive(Clone, Debug)]
pub struct Replay {
    moves: Vec<Move>,
    frames: Vec<PuzzleState>,
}

impl Replay {
    /// Creates a replay positioned on the initial configuration.
    pub fn new(initial: PuzzleState, moves: Vec<Move>) -> Self {
        Replay {
            moves,
            frames: vec![initial],
        }
    }

    /// The configuration after `position()` moves.
    pub fn current(&self) -> &PuzzleState {
        // `frames` always holds at least the initial state.
        &self.frames[self.frames.len() - 1]
    }

    /// Number of moves applied so far.
    pub fn position(&self) -> usize {
        self.frames.len() - 1
    }

    /// Total number of moves in the replay.
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Returns `true` once every move has been applied.
    pub fn is_finished(&self) -> bool {
        self.position() >= self.moves.len()
    }

    /// Applies the next move.
    ///
    /// # Returns
    /// * `Ok(Some(move))` with the move that was applied.
    /// * `Ok(None)` if the replay is already finished.
    ///
    /// # Errors
    /// Returns `HanoiError::InvalidMove` if the next move is illegal in the current frame.
    pub fn step_forward(&mut self) -> Result<Option<Move>> {
        let Some(&mv) = self.moves.get(self.position()) else {
            return Ok(None);
        };
        let next = self.current().apply_move(mv)?;
        self.frames.push(next);
        Ok(Some(mv))
    }

    /// Undoes the last applied move. Returns `false` when already at the initial frame.
    pub fn step_back(&mut self) -> bool {
        if self.frames.len() > 1 {
            self.frames.pop();
            true
        } else {
            false
        }
    }

    /// Returns to the initial configuration.
    pub fn reset(&mut self) {
        self.frames.truncate(1);
    }

    /// Moves to the frame after `index` moves, clamped to the replay length.
    pub fn seek(&mut self, index: usize) -> Result<()> {
        let target = index.min(self.moves.len());
        self.frames.truncate(target + 1);
        while self.position() < target {
            self.step_forward()?;
        }
        Ok(())
    }
}
