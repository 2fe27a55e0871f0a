//! Core game logic for Snake with direction-reversing food
//!
//! This module contains the whole simulation: the board, the snake body, and
//! the tick engine. It has no I/O or rendering dependencies and is driven
//! purely through `GameEngine::init_session` and `GameEngine::tick`.

pub mod board;
pub mod body;
pub mod config;
pub mod direction;
pub mod engine;
pub mod session;

// Re-export commonly used types
pub use board::{Board, Cell, Coord};
pub use body::SnakeBody;
pub use config::GameConfig;
pub use direction::Direction;
pub use engine::{GameEngine, GameOverCause, TickOutcome};
pub use session::SessionState;
