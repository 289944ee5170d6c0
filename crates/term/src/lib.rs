//! Terminal LED panel module.
//!
//! Emulates a fixed-size RGB LED matrix in the terminal. Text is rasterized
//! with a built-in 5x7 bitmap font into a pixel framebuffer, and the
//! framebuffer is flushed to a terminal backend two pixel rows per line.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Make the whole frame appear at once on `commit`
//! - Only repaint the cells that changed between two frames

pub mod fb;
pub mod font;
pub mod panel;
pub mod renderer;

pub use led_leaderboard_core as core;
pub use led_leaderboard_types as types;

pub use fb::{PixelBuffer, Rgb};
pub use panel::PanelCanvas;
pub use renderer::{cell_rows, encode_diff_into, encode_full_into, TerminalRenderer};
