//! Core types module - shared data structures and constants
//!
//! This module defines the data that flows through the fetch → parse → plan →
//! render pipeline. All types are pure data structures with no external
//! dependencies, making them usable in any context (parser, planner, display
//! sink, tests).
//!
//! # Pipeline Data
//!
//! - [`LeaderboardSnapshot`]: one parsed leaderboard, valid for one render cycle
//! - [`Entry`]: one ranked participant (username + points)
//! - [`DrawInstruction`]: one positioned, colored line of text for the sink
//!
//! # Defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_POLL_INTERVAL_SECS` | 300 | Seconds between poll cycles |
//! | `DEFAULT_SLEEP_INCREMENT_MS` | 1000 | Granularity of the interruptible sleep |
//! | `DEFAULT_MAX_ENTRIES` | 10 | Rendered-row cap |
//! | `DEFAULT_USERNAME_MAX_CHARS` | 10 | Username truncation width |
//! | `LINE_PADDING` | 2 | Pixels added to the font height for the line pitch |
//!
//! # Examples
//!
//! ```
//! use led_leaderboard_types::{month_name, Entry, LeaderboardSnapshot, Rgb, GOLD};
//!
//! let snapshot = LeaderboardSnapshot {
//!     entries: vec![Entry::new("alice", 50)],
//!     month: Some(5),
//! };
//! assert_eq!(snapshot.entries[0].points, 50);
//! assert_eq!(month_name(5), Some("June"));
//! assert_eq!(GOLD, Rgb::new(255, 191, 0));
//! ```

/// Default seconds between two poll cycles.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 300;

/// Default granularity of the interruptible sleep (1 second).
pub const DEFAULT_SLEEP_INCREMENT_MS: u64 = 1000;

/// Default number of leaderboard rows drawn.
pub const DEFAULT_MAX_ENTRIES: usize = 10;

/// Default username truncation width, in characters.
pub const DEFAULT_USERNAME_MAX_CHARS: usize = 10;

/// Default feed location.
pub const DEFAULT_SOURCE_URL: &str = "http://localhost:8000/";

/// Default title line.
pub const DEFAULT_TITLE: &str = "LeetCode Leaderboard";

/// Fallback for a missing or non-text `username`.
pub const UNKNOWN_USERNAME: &str = "unknown";

/// Extra pixels between two text lines.
pub const LINE_PADDING: i32 = 2;

/// Left margin of every text line, in pixels.
pub const LEFT_MARGIN: i32 = 1;

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// First place, title and month line.
pub const GOLD: Rgb = Rgb::new(255, 191, 0);
/// Second place.
pub const RED: Rgb = Rgb::new(255, 0, 0);
/// Third place.
pub const BLUE: Rgb = Rgb::new(126, 147, 255);
/// Everyone else and the column header.
pub const WHITE: Rgb = Rgb::new(255, 255, 255);
/// Unlit LED.
pub const BLACK: Rgb = Rgb::new(0, 0, 0);

/// Color for a zero-based leaderboard position.
///
/// Color tracks position only, never the score.
///
/// ```
/// use led_leaderboard_types::{rank_color, BLUE, GOLD, RED, WHITE};
///
/// assert_eq!(rank_color(0), GOLD);
/// assert_eq!(rank_color(1), RED);
/// assert_eq!(rank_color(2), BLUE);
/// assert_eq!(rank_color(9), WHITE);
/// ```
pub const fn rank_color(position: usize) -> Rgb {
    match position {
        0 => GOLD,
        1 => RED,
        2 => BLUE,
        _ => WHITE,
    }
}

/// Month names indexed 0 (January) through 11 (December).
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Name for a zero-based month index, `None` outside `0..=11`.
pub fn month_name(month: u8) -> Option<&'static str> {
    MONTH_NAMES.get(month as usize).copied()
}

/// One ranked participant record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Display name. May be empty and may repeat across entries.
    pub username: String,
    pub points: i64,
}

impl Entry {
    pub fn new(username: impl Into<String>, points: i64) -> Self {
        Self {
            username: username.into(),
            points,
        }
    }
}

impl Default for Entry {
    fn default() -> Self {
        Self {
            username: UNKNOWN_USERNAME.to_string(),
            points: 0,
        }
    }
}

/// One fetched-and-parsed leaderboard state.
///
/// `entries` keep the order they were received in; that order is the rank.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LeaderboardSnapshot {
    pub entries: Vec<Entry>,
    /// Zero-based month index, only ever `Some` in `0..=11`.
    pub month: Option<u8>,
}

/// A single positioned, colored text directive.
///
/// `y` is the text baseline, matching how LED matrix text APIs position glyphs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawInstruction {
    pub x: i32,
    pub y: i32,
    pub color: Rgb,
    pub text: String,
}

impl DrawInstruction {
    pub fn new(x: i32, y: i32, color: Rgb, text: impl Into<String>) -> Self {
        Self {
            x,
            y,
            color,
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_parity_defaults() {
        assert_eq!(DEFAULT_POLL_INTERVAL_SECS, 300);
        assert_eq!(DEFAULT_SLEEP_INCREMENT_MS, 1000);
        assert_eq!(DEFAULT_MAX_ENTRIES, 10);
        assert_eq!(DEFAULT_USERNAME_MAX_CHARS, 10);
        assert_eq!(LINE_PADDING, 2);
    }

    #[test]
    fn month_names_cover_the_year() {
        assert_eq!(month_name(0), Some("January"));
        assert_eq!(month_name(11), Some("December"));
        assert_eq!(month_name(12), None);
    }

    #[test]
    fn default_entry_is_unknown_with_zero_points() {
        let e = Entry::default();
        assert_eq!(e.username, "unknown");
        assert_eq!(e.points, 0);
    }

    #[test]
    fn rank_colors_follow_position() {
        assert_eq!(rank_color(0), Rgb::new(255, 191, 0));
        assert_eq!(rank_color(1), Rgb::new(255, 0, 0));
        assert_eq!(rank_color(2), Rgb::new(126, 147, 255));
        assert_eq!(rank_color(3), WHITE);
        assert_eq!(rank_color(usize::MAX), WHITE);
    }
}
