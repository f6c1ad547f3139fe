//! # Hanoi Race Library
//!
//! This library provides the search engine behind a Tower of Hanoi race: two
//! configurable search algorithms solve the same puzzle and the better result wins.
//!
//! It is used by two binaries:
//! - `hanoi_race`: Configures and runs a race from the command line, prints both
//!   results and the winner, and can replay both solutions frame by frame.
//! - `heuristic_evaluator`: Runs every algorithm and heuristic pairing over a range of
//!   disk counts and seeds and prints aggregate statistics.
//!
//! ## Modules
//! - `engine`: Puzzle state (`PuzzleState`), moves (`Move`), move generation and
//!   application, and move-list replay (`Replay`).
//! - `heuristics`: The three heuristics (`HeuristicKind`) and the injectable jitter source.
//! - `solver`: Best-first, A* and hill-climbing search producing `AlgorithmResult`s.
//! - `outcome`: Winner selection between two results.
//! - `ai`: `HanoiAi`, the configurable solver instance front-ends talk to.
//! - `race`: Race configuration, sequential execution of both competitors and reporting.
//! - `utils`: Text layout parsing.
//! - `error`: The crate error type.

pub mod ai;
pub mod engine;
pub mod error;
pub mod heuristics;
pub mod outcome;
pub mod race;
pub mod solver;
pub mod utils;

pub use error::{HanoiError, Result};
