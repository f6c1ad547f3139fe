use crate::engine::{Disk, PuzzleState, PEG_COUNT};
use crate::error::{HanoiError, Result};

/// Parses a text layout into a `PuzzleState`.
///
/// The layout holds exactly three pegs separated by `|`. Each peg lists its disk sizes
/// bottom to top, separated by whitespace; an empty peg is written as nothing (or only
/// whitespace) between the separators.
///
/// # Arguments
/// * `s`: The layout, e.g. `"3 2 | | 1"`.
///
/// # Returns
/// * `Ok(PuzzleState)` with zero moves and an empty path.
/// * `Err(HanoiError::InvalidLayout)` if:
///     - The layout does not have exactly three pegs.
///     - A token is not a positive integer.
///     - A peg is not strictly decreasing, or the sizes are not exactly `1..=n`.
///
/// # Examples
/// ```
/// use hanoi_race::utils::pegs_from_str;
///
/// let state = pegs_from_str("3 2 | | 1").unwrap();
/// assert_eq!(state.layout(), vec![vec![3, 2], vec![], vec![1]]);
///
/// assert!(pegs_from_str("3 2 1").is_err()); // only one peg
/// assert!(pegs_from_str("1 2 | | 3").is_err()); // larger disk on top
/// ```
pub fn pegs_from_str(s: &str) -> Result<PuzzleState> {
    let columns: Vec<&str> = s.split('|').collect();
    if columns.len() != PEG_COUNT {
        return Err(HanoiError::InvalidLayout(format!(
            "Expected {} pegs separated by '|', found {}",
            PEG_COUNT,
            columns.len()
        )));
    }

    let mut pegs: [Vec<Disk>; PEG_COUNT] = Default::default();
    for (index, column) in columns.iter().enumerate() {
        for token in column.split_whitespace() {
            let disk = token
                .parse::<Disk>()
                .ok()
                .filter(|&disk| disk > 0)
                .ok_or_else(|| {
                    HanoiError::InvalidLayout(format!(
                        "Unrecognized disk '{}' on peg {}",
                        token, index
                    ))
                })?;
            pegs[index].push(disk);
        }
    }

    PuzzleState::from_pegs(pegs)
}
