use std::collections::HashSet;

use super::board::Cell;
use super::body::SnakeBody;
use super::direction::Direction;

/// Complete state of one game session.
///
/// Owned and mutated exclusively by the engine; the shell reads snapshots
/// through the projection methods and submits direction requests via `tick`.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub(crate) body: SnakeBody,
    pub(crate) occupied: HashSet<Cell>,
    pub(crate) food: Cell,
    pub(crate) direction: Direction,
    pub(crate) score: u32,
    pub(crate) reverse_food_pending: bool,
}

impl SessionState {
    /// Assemble a fresh session around a single-cell body.
    /// Caller guarantees `food != start`.
    pub(crate) fn new(start: Cell, food: Cell) -> Self {
        let mut occupied = HashSet::new();
        occupied.insert(start);

        Self {
            body: SnakeBody::single(start),
            occupied,
            food,
            direction: Direction::Right,
            score: 0,
            reverse_food_pending: false,
        }
    }

    /// Cells currently covered by the snake, membership-identical to the body
    pub fn occupied_cells(&self) -> &HashSet<Cell> {
        &self.occupied
    }

    /// The body sequence, tail to head
    pub fn body_cells(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter()
    }

    pub fn head(&self) -> &Cell {
        self.body.head()
    }

    pub fn body_len(&self) -> usize {
        self.body.len()
    }

    pub fn food_cell(&self) -> &Cell {
        &self.food
    }

    /// Whether eating the current food will reverse the snake
    pub fn reverse_pending_for_current_food(&self) -> bool {
        self.reverse_food_pending
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_occupied(&self, cell: &Cell) -> bool {
        self.occupied.contains(cell)
    }
}
