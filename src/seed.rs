use std::str::FromStr;

use census::{ConfigError, Grid};
use itertools::Itertools;
use thiserror::Error;

/// A seed file that cannot be turned into a grid.
#[derive(Debug, PartialEq, Eq, Error)]
pub enum SeedError {
    #[error("seed is empty; expected `W H` on the first line")]
    MissingSize,

    #[error("expected two positive integers `W H` on the first line, found {0:?}")]
    MalformedSize(String),

    #[error("missing generation limit on the second line")]
    MissingLimit,

    #[error("expected a positive generation limit on the second line, found {0:?}")]
    MalformedLimit(String),

    #[error("invalid cell coordinate {0:?}")]
    InvalidCoordinate(String),

    #[error("odd number of cell coordinates ({0}); cells are given as `x y` pairs")]
    OddCoordinates(usize),
}

/// Parsed seed file: grid size, generation limit and the initially alive
/// cells as `(x, y)`, i.e. `(column, row)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Seed {
    pub width: usize,
    pub height: usize,
    pub generations: usize,
    pub cells: Vec<(usize, usize)>,
}

impl Seed {
    /// Brings the seed's cells to life in `grid`, leaving the rest as is.
    pub fn plant(&self, grid: &mut Grid) -> Result<(), ConfigError> {
        self.cells
            .iter()
            .try_for_each(|&(x, y)| grid.set_cell(y, x, true))
    }
}

impl FromStr for Seed {
    type Err = SeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines = s.lines();

        let size = lines.next().ok_or(SeedError::MissingSize)?;
        let malformed_size = || SeedError::MalformedSize(size.trim().to_owned());
        let (width, height) = size
            .split_whitespace()
            .map(|t| t.parse::<usize>().ok().filter(|&n| n > 0))
            .collect_tuple::<(_, _)>()
            .and_then(|(w, h)| w.zip(h))
            .ok_or_else(malformed_size)?;

        let limit = lines.next().ok_or(SeedError::MissingLimit)?.trim();
        let generations = limit
            .parse::<usize>()
            .ok()
            .filter(|&n| n > 0)
            .ok_or_else(|| SeedError::MalformedLimit(limit.to_owned()))?;

        let coordinates = lines
            .flat_map(str::split_whitespace)
            .map(|t| {
                t.parse::<usize>()
                    .map_err(|_| SeedError::InvalidCoordinate(t.to_owned()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        if coordinates.len() % 2 != 0 {
            return Err(SeedError::OddCoordinates(coordinates.len()));
        }

        Ok(Self {
            width,
            height,
            generations,
            cells: coordinates.into_iter().tuples().collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planted(seed: &Seed) -> Result<Grid, ConfigError> {
        let mut grid = Grid::new(seed.width, seed.height)?;
        seed.plant(&mut grid)?;
        Ok(grid)
    }

    #[test]
    fn test_parse() {
        let seed = Seed::from_str("20 10\n200\n1 2 3 4\n5 6\n").unwrap();
        assert_eq!(
            seed,
            Seed {
                width: 20,
                height: 10,
                generations: 200,
                cells: vec![(1, 2), (3, 4), (5, 6)],
            }
        );
        let grid = planted(&seed).unwrap();
        assert_eq!(grid.dims(), (20, 10));
        assert!(grid.is_alive(2, 1));
        assert!(grid.is_alive(6, 5));
        assert_eq!(grid.population(), 3);
    }

    #[test]
    fn test_no_cells() {
        let seed = Seed::from_str("8 8\n5").unwrap();
        assert!(seed.cells.is_empty());
        assert_eq!(planted(&seed).unwrap().population(), 0);
    }

    #[test]
    fn test_header_errors() {
        assert_eq!(Seed::from_str(""), Err(SeedError::MissingSize));
        assert_eq!(
            Seed::from_str("20\n5"),
            Err(SeedError::MalformedSize("20".into()))
        );
        assert_eq!(
            Seed::from_str("20 0\n5"),
            Err(SeedError::MalformedSize("20 0".into()))
        );
        assert_eq!(
            Seed::from_str("20 x 3\n5"),
            Err(SeedError::MalformedSize("20 x 3".into()))
        );
        assert_eq!(Seed::from_str("20 20"), Err(SeedError::MissingLimit));
        assert_eq!(
            Seed::from_str("20 20\n-1"),
            Err(SeedError::MalformedLimit("-1".into()))
        );
        assert_eq!(
            Seed::from_str("20 20\n0"),
            Err(SeedError::MalformedLimit("0".into()))
        );
    }

    #[test]
    fn test_coordinate_errors() {
        assert_eq!(
            Seed::from_str("20 20\n5\n1 2 3"),
            Err(SeedError::OddCoordinates(3))
        );
        assert_eq!(
            Seed::from_str("20 20\n5\n1 -2"),
            Err(SeedError::InvalidCoordinate("-2".into()))
        );
        let seed = Seed::from_str("4 3\n5\n3 2 4 0").unwrap();
        assert!(matches!(
            planted(&seed),
            Err(ConfigError::CellOutOfBounds { row: 0, col: 4, .. })
        ));
    }

    #[test]
    fn test_oversized_header() {
        // Parses, but the cell count overflows.
        let seed = Seed::from_str("4294967296 4294967296\n5").unwrap();
        assert_eq!(
            planted(&seed),
            Err(ConfigError::InvalidDimensions {
                width: 4294967296,
                height: 4294967296
            })
        );
    }
}
