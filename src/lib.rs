//! Solvers for the orbit-map (2019 day 6) and docking-program (2020 day 14) puzzles.

pub mod docking;
pub mod error;
pub mod logging;
pub mod orbits;

pub use error::{Error, Result};
pub use orbits::OrbitOptions;

/// Runs one part of one puzzle over its raw input, returning the answer as printed.
pub fn solve(day: u8, part: u8, input: &str, options: &OrbitOptions) -> Result<String> {
    match (day, part) {
        (6, 1 | 2) => orbits::day6(part, input, options),
        (14, 1 | 2) => docking::day14(part, input),
        _ => Err(Error::UnknownPuzzle { day, part }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unknown_puzzles() {
        let options = OrbitOptions::default();
        assert_eq!(solve(7, 1, "", &options), Err(Error::UnknownPuzzle { day: 7, part: 1 }));
        assert_eq!(solve(6, 3, "", &options), Err(Error::UnknownPuzzle { day: 6, part: 3 }));
    }

    #[test]
    fn dispatches_by_day() {
        let options = OrbitOptions::default();
        assert_eq!(solve(6, 1, "COM)A\nA)B", &options).unwrap(), "3");
        assert_eq!(solve(14, 2, "mem[5] = 7", &options).unwrap(), "7");
    }
}
