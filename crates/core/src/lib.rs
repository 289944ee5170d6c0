//! Core pipeline module - pure, deterministic, and testable
//!
//! This crate turns an untrusted feed body into a bounded list of draw
//! instructions. It has **no dependencies** on the network, the terminal, or
//! the clock, making it:
//!
//! - **Deterministic**: the same bytes and geometry always yield the same plan
//! - **Testable**: parser and planner are plain functions over values
//! - **Portable**: any [`Canvas`] can consume the output
//!
//! # Module Structure
//!
//! - [`parser`]: bytes → [`LeaderboardSnapshot`](types::LeaderboardSnapshot), degrading per field
//! - [`planner`]: snapshot → [`DrawInstruction`](types::DrawInstruction)s (ranking, truncation, colors)
//! - [`canvas`]: the display sink trait and an in-memory recorder
//!
//! # Example
//!
//! ```
//! use led_leaderboard_core::{parse, present, Planner, RecordingCanvas};
//!
//! let snapshot = parse(br#"{"leaderboard":[{"username":"alice","points":50}],"month":5}"#).unwrap();
//! let plan = Planner::default().plan(&snapshot);
//!
//! let mut canvas = RecordingCanvas::default();
//! present(&mut canvas, &plan).unwrap();
//! assert_eq!(canvas.current().unwrap().len(), 4);
//! assert_eq!(plan[3].text, "Month: June");
//! ```

pub mod canvas;
pub mod parser;
pub mod planner;

pub use led_leaderboard_types as types;

pub use canvas::{present, Canvas, FontMetrics, Geometry, RecordingCanvas};
pub use parser::{parse, FieldFault, ParseError};
pub use planner::{truncate_chars, PlanOptions, Planner};
