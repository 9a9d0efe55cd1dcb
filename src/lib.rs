//! Classic grid snake for the terminal.
//!
//! The crate splits into a pure simulation core and a presentation
//! layer around it:
//! - Core game logic with no I/O or clock reads (game module)
//! - TUI rendering (render module)
//! - Keyboard input mapping (input module)
//! - Session bookkeeping shown in the HUD (metrics module)
//! - The fixed-tick game loop driving it all (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
