//! revsnake - terminal Snake with direction-reversing food
//!
//! This library provides:
//! - Core simulation (game module): board, snake body, tick engine
//! - Keyboard mapping (input module)
//! - TUI rendering (render module)
//! - Per-process HUD counters (metrics module)
//! - The interactive game loop (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
