//! LED leaderboard (workspace facade crate).
//!
//! Re-exports the pipeline crates under short names and hosts the
//! application-level pieces: configuration, logging setup, and the headless
//! display backend.

pub use led_leaderboard_core as core;
pub use led_leaderboard_feed as feed;
pub use led_leaderboard_term as term;
pub use led_leaderboard_types as types;

pub mod config;
pub mod headless;
pub mod logging;
