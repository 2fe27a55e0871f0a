use std::collections::VecDeque;

use super::board::Cell;

/// The snake's body: an ordered sequence of cells from tail to head.
///
/// Backed by a deque with the tail at the front and the head at the back, so
/// both ends move in O(1). Invariants: at least one cell at all times, and
/// every consecutive pair of cells is grid-adjacent.
#[derive(Debug, Clone, PartialEq)]
pub struct SnakeBody {
    cells: VecDeque<Cell>,
}

impl SnakeBody {
    /// A body consisting of a single cell
    pub fn single(cell: Cell) -> Self {
        let mut cells = VecDeque::new();
        cells.push_back(cell);
        Self { cells }
    }

    /// The leading cell in the direction of travel
    pub fn head(&self) -> &Cell {
        self.cells.back().expect("body is never empty")
    }

    /// The trailing cell
    pub fn tail(&self) -> &Cell {
        self.cells.front().expect("body is never empty")
    }

    /// The tail's successor toward the head, if the body has more than one cell
    pub fn after_tail(&self) -> Option<&Cell> {
        self.cells.get(1)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Add a new head cell; O(1)
    pub fn prepend_head(&mut self, cell: Cell) {
        self.cells.push_back(cell);
    }

    /// Remove the current head and tail, returning them as `(head, tail)`.
    ///
    /// Returns None without touching the body when it holds a single cell.
    /// After a successful detach the remainder's boundaries are whatever
    /// `head()` and `tail()` now report.
    pub fn detach_head_and_tail(&mut self) -> Option<(Cell, Cell)> {
        if self.cells.len() <= 1 {
            return None;
        }
        let head = self.cells.pop_back().expect("len checked above");
        let tail = self.cells.pop_front().expect("len checked above");
        Some((head, tail))
    }

    /// Extend the body by one cell at the tail end; O(1).
    /// Used only when food is consumed.
    pub fn grow_at_tail(&mut self, cell: Cell) {
        self.cells.push_front(cell);
    }

    /// Flip traversal order so head and tail swap roles
    pub fn reverse(&mut self) {
        self.cells.make_contiguous().reverse();
    }

    /// Iterate cells tail to head
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// True when every consecutive pair of cells is grid-adjacent
    pub fn is_contiguous(&self) -> bool {
        self.cells
            .iter()
            .zip(self.cells.iter().skip(1))
            .all(|(a, b)| a.is_adjacent_to(b))
    }
}
