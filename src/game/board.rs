use std::hash::{Hash, Hasher};

use rand::Rng;

use super::direction::Direction;

/// A raw grid coordinate, possibly out of bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The coordinate one cell away in the given direction
    pub fn moved(self, direction: Direction) -> Self {
        let (drow, dcol) = direction.delta();
        Self {
            row: self.row + drow,
            col: self.col + dcol,
        }
    }
}

/// A single board cell: a grid position plus a sequence-number payload.
///
/// Identity is the `(row, col)` position only; the payload tags the cell with
/// its row-major creation order but never participates in equality or hashing.
#[derive(Debug, Clone, Copy)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
    pub seq: u32,
}

impl Cell {
    pub fn coord(&self) -> Coord {
        Coord::new(self.row, self.col)
    }

    /// Direction from this cell to an adjacent one, or None if the cells are
    /// not unit-adjacent on a single axis.
    pub fn direction_to(&self, other: &Cell) -> Option<Direction> {
        match (other.row - self.row, other.col - self.col) {
            (-1, 0) => Some(Direction::Up),
            (1, 0) => Some(Direction::Down),
            (0, -1) => Some(Direction::Left),
            (0, 1) => Some(Direction::Right),
            _ => None,
        }
    }

    /// True if the two cells share a row or column and differ by exactly one
    /// in the other axis.
    pub fn is_adjacent_to(&self, other: &Cell) -> bool {
        self.direction_to(other).is_some()
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.row == other.row && self.col == other.col
    }
}

impl Eq for Cell {}

impl Hash for Cell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.row.hash(state);
        self.col.hash(state);
    }
}

/// The fixed game grid. Built once per engine; never mutated.
#[derive(Debug, Clone)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Vec<Cell>>,
}

impl Board {
    /// Build a rows x cols grid. Payloads count up row-major from 1.
    pub fn new(rows: usize, cols: usize) -> Self {
        let mut seq = 1u32;
        let cells = (0..rows)
            .map(|row| {
                (0..cols)
                    .map(|col| {
                        let cell = Cell {
                            row: row as i32,
                            col: col as i32,
                            seq,
                        };
                        seq += 1;
                        cell
                    })
                    .collect()
            })
            .collect();

        Self { rows, cols, cells }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells on the board
    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Bounds-checked lookup. Out of range is "no cell", not an error;
    /// callers read None as "blocked by wall".
    pub fn cell_at(&self, coord: Coord) -> Option<Cell> {
        if coord.row < 0 || coord.col < 0 {
            return None;
        }
        self.cells
            .get(coord.row as usize)
            .and_then(|row| row.get(coord.col as usize))
            .copied()
    }

    /// The cell adjacent to `cell` in `direction`, or None at a wall
    pub fn neighbor(&self, cell: &Cell, direction: Direction) -> Option<Cell> {
        self.cell_at(cell.coord().moved(direction))
    }

    /// A uniformly random in-bounds cell
    pub fn random_cell<R: Rng>(&self, rng: &mut R) -> Cell {
        let row = rng.gen_range(0..self.rows);
        let col = rng.gen_range(0..self.cols);
        self.cells[row][col]
    }

    /// Iterate all cells row-major
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().flat_map(|row| row.iter())
    }
}
