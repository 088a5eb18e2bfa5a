use std::{
    fmt::{Display, Write},
    str::FromStr,
};

use itertools::Itertools;

use crate::{catalog::Template, error::ConfigError};

/// State of a single cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Dead,
    Alive,
}

impl Cell {
    pub fn is_alive(self) -> bool {
        self == Cell::Alive
    }

    fn symbol(self) -> char {
        match self {
            Cell::Alive => 'o',
            Cell::Dead => '.',
        }
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        if alive { Cell::Alive } else { Cell::Dead }
    }
}

impl TryFrom<char> for Cell {
    type Error = char;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'o' => Ok(Cell::Alive),
            '.' => Ok(Cell::Dead),
            _ => Err(c),
        }
    }
}

/// A fixed-size toroidal grid of cells, addressed as `(row, col)`.
///
/// Neighbour lookup wraps around both edges; everything else (placement,
/// pattern matching) stays within the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    pub(crate) cells: Vec<Cell>,
}

impl Grid {
    /// Creates an all-dead grid of `width` columns and `height` rows.
    ///
    /// Fails when either side is zero or the cell count cannot be allocated.
    pub fn new(width: usize, height: usize) -> Result<Self, ConfigError> {
        let invalid = ConfigError::InvalidDimensions { width, height };
        let len = match width.checked_mul(height) {
            Some(0) | None => return Err(invalid),
            Some(len) => len,
        };
        let mut cells = Vec::new();
        cells.try_reserve_exact(len).map_err(|_| invalid)?;
        cells.resize(len, Cell::Dead);
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub(crate) fn dead(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Dead; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`, in the order the report prints them.
    pub fn dims(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        (row < self.height && col < self.width).then(|| self.cell(row, col))
    }

    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        self.get(row, col).is_some_and(Cell::is_alive)
    }

    pub fn set_cell(&mut self, row: usize, col: usize, alive: bool) -> Result<(), ConfigError> {
        if row >= self.height || col >= self.width {
            return Err(ConfigError::CellOutOfBounds {
                row,
                col,
                width: self.width,
                height: self.height,
            });
        }
        let i = self.index(row, col);
        self.cells[i] = Cell::from(alive);
        Ok(())
    }

    /// Writes every cell of `template`, dead margin included, with its top
    /// left corner at `origin`. Nothing is written if it does not fit.
    pub fn place(
        &mut self,
        (row, col): (usize, usize),
        template: &Template,
    ) -> Result<(), ConfigError> {
        let (h, w) = (template.height(), template.width());
        if !self.contains_window((row, col), (h, w)) {
            return Err(ConfigError::PlacementOutOfBounds {
                name: template.name().to_owned(),
                row,
                col,
                h,
                w,
                width: self.width,
                height: self.height,
            });
        }
        for (dy, dx) in (0..h).cartesian_product(0..w) {
            let i = self.index(row + dy, col + dx);
            self.cells[i] = template.cell(dy, dx);
        }
        Ok(())
    }

    /// Number of alive cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width)
    }

    /// Alive cells among the eight wrapped neighbours of `(row, col)`.
    ///
    /// On grids narrower than three cells the same neighbour is reached from
    /// several directions and counted once per direction.
    pub fn alive_neighbours(&self, row: usize, col: usize) -> u8 {
        self.neighbours((row, col))
            .filter(|&(y, x)| self.cell(y, x).is_alive())
            .count() as u8
    }
}

impl Grid {
    /// Whether an `h` x `w` window at `(row, col)` lies inside the grid.
    pub(crate) fn contains_window(
        &self,
        (row, col): (usize, usize),
        (h, w): (usize, usize),
    ) -> bool {
        row.checked_add(h).is_some_and(|end| end <= self.height)
            && col.checked_add(w).is_some_and(|end| end <= self.width)
    }

    pub(crate) fn cell(&self, row: usize, col: usize) -> Cell {
        self.cells[self.index(row, col)]
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    fn neighbours(&self, (row, col): (usize, usize)) -> impl Iterator<Item = (usize, usize)> {
        let (h, w) = (self.height as isize, self.width as isize);
        (-1..=1)
            .cartesian_product(-1..=1)
            .filter(|&d| d != (0, 0))
            .map(move |(dy, dx)| {
                let y = (row as isize + dy).rem_euclid(h);
                let x = (col as isize + dx).rem_euclid(w);
                (y as usize, x as usize)
            })
    }
}

/// Cells parsed from text art: `o` alive, `.` dead, one row per non-blank
/// line. Leading and trailing whitespace on each line is ignored.
pub(crate) struct CellRows {
    pub height: usize,
    pub width: usize,
    pub cells: Vec<Cell>,
}

pub(crate) enum CellRowsError {
    Empty,
    Ragged { row: usize, got: usize, expected: usize },
    Invalid(char),
}

impl FromStr for CellRows {
    type Err = CellRowsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines = s.lines().map(str::trim).filter(|l| !l.is_empty()).collect_vec();
        let Some(first) = lines.first() else {
            return Err(CellRowsError::Empty);
        };
        let width = first.chars().count();
        let mut cells = Vec::with_capacity(width * lines.len());
        for (row, line) in lines.iter().enumerate() {
            let got = line.chars().count();
            if got != width {
                return Err(CellRowsError::Ragged {
                    row,
                    got,
                    expected: width,
                });
            }
            for c in line.chars() {
                cells.push(Cell::try_from(c).map_err(CellRowsError::Invalid)?);
            }
        }
        Ok(Self {
            height: lines.len(),
            width,
            cells,
        })
    }
}

impl FromStr for Grid {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match CellRows::from_str(s) {
            Ok(CellRows {
                height,
                width,
                cells,
            }) => Ok(Self {
                width,
                height,
                cells,
            }),
            Err(CellRowsError::Empty) => Err("Empty grid".to_owned()),
            Err(CellRowsError::Ragged { row, got, expected }) => {
                Err(format!("Row {row} has {got} cells, expected {expected}"))
            }
            Err(CellRowsError::Invalid(c)) => Err(format!("Unexpected character {c}")),
        }
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                f.write_char('\n')?;
            }
            for cell in row {
                f.write_char(cell.symbol())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_dimensions() {
        assert_eq!(
            Grid::new(0, 4),
            Err(ConfigError::InvalidDimensions {
                width: 0,
                height: 4
            })
        );
        assert!(Grid::new(3, 0).is_err());
        assert!(Grid::new(1, 1).is_ok());
    }

    #[test]
    fn test_oversized_dimensions() {
        assert_eq!(
            Grid::new(usize::MAX, 2),
            Err(ConfigError::InvalidDimensions {
                width: usize::MAX,
                height: 2
            })
        );
        let side = 1 << (usize::BITS / 2);
        assert!(matches!(
            Grid::new(side, side),
            Err(ConfigError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_set_cell_bounds() {
        let mut grid = Grid::new(4, 2).unwrap();
        grid.set_cell(1, 3, true).unwrap();
        assert!(grid.is_alive(1, 3));
        assert_eq!(grid.population(), 1);
        assert!(matches!(
            grid.set_cell(2, 0, true),
            Err(ConfigError::CellOutOfBounds { row: 2, col: 0, .. })
        ));
        assert!(grid.set_cell(0, 4, true).is_err());
    }

    #[test]
    fn test_window_bounds() {
        let grid = Grid::new(4, 3).unwrap();
        assert!(grid.contains_window((0, 0), (3, 4)));
        assert!(grid.contains_window((1, 2), (2, 2)));
        assert!(!grid.contains_window((1, 2), (3, 2)));
        assert!(!grid.contains_window((usize::MAX, 0), (2, 2)));
        assert!(!grid.contains_window((0, usize::MAX), (1, 1)));
    }

    #[test]
    fn test_wrapped_neighbours() {
        // Corner cell sees the three opposite corners.
        let grid = Grid::from_str(
            "
            o...
            ....
            ....
            o..o
        ",
        )
        .unwrap();
        assert_eq!(grid.alive_neighbours(0, 3), 3);
        assert_eq!(grid.alive_neighbours(3, 0), 2);
        assert_eq!(grid.alive_neighbours(1, 1), 1);
        assert_eq!(grid.alive_neighbours(1, 2), 0);
    }

    #[test]
    fn test_single_cell_counts_itself() {
        let grid = Grid::from_str("o").unwrap();
        assert_eq!(grid.alive_neighbours(0, 0), 8);
    }

    #[test]
    fn test_display_round_trip() {
        let text = "..o\no..\n...";
        let grid = Grid::from_str(text).unwrap();
        assert_eq!(grid.dims(), (3, 3));
        assert_eq!(grid.to_string(), text);
    }

    #[test]
    fn test_parse_errors() {
        assert!(Grid::from_str("").is_err());
        assert!(Grid::from_str("oo\no").is_err());
        assert_eq!(
            Grid::from_str("o0"),
            Err("Unexpected character 0".to_owned())
        );
    }
}
