//! Render planner: [`LeaderboardSnapshot`] → ordered [`DrawInstruction`]s.
//!
//! Pure and deterministic. Layout is a single column of text lines starting
//! at a fixed top origin:
//!
//! ```text
//!  LeetCode Leaderboard        <- title (gold)
//!     Username   Points        <- header (white)
//!  1. alice          50        <- rank 1 (gold), 2 (red), 3 (blue), rest white
//!  ...                         <- at most `max_entries` rows, input order
//! Month: June                  <- only when the snapshot carries a month
//! ```
//!
//! The vertical cursor advances by `font.height + line_padding` after every
//! line, title and header included.

use crate::canvas::FontMetrics;
use crate::types::{
    month_name, rank_color, DrawInstruction, Entry, LeaderboardSnapshot, DEFAULT_MAX_ENTRIES,
    DEFAULT_TITLE, MONTH_NAMES, DEFAULT_USERNAME_MAX_CHARS, GOLD, LEFT_MARGIN, LINE_PADDING, WHITE,
};

/// Right-aligned width of the points column.
const POINTS_WIDTH: usize = 6;

const MONTH_PREFIX: &str = "Month: ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanOptions {
    pub max_entries: usize,
    pub username_max_chars: usize,
    pub title: String,
    pub left_margin: i32,
    pub line_padding: i32,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            username_max_chars: DEFAULT_USERNAME_MAX_CHARS,
            title: DEFAULT_TITLE.to_string(),
            left_margin: LEFT_MARGIN,
            line_padding: LINE_PADDING,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Planner {
    options: PlanOptions,
    font: FontMetrics,
}

impl Planner {
    pub fn new(options: PlanOptions, font: FontMetrics) -> Self {
        Self { options, font }
    }

    pub fn options(&self) -> &PlanOptions {
        &self.options
    }

    /// Vertical distance between two consecutive baselines.
    pub fn line_pitch(&self) -> i32 {
        self.font.height + self.options.line_padding
    }

    pub fn plan(&self, snapshot: &LeaderboardSnapshot) -> Vec<DrawInstruction> {
        let rows = snapshot.entries.len().min(self.options.max_entries);
        let mut out = Vec::with_capacity(rows + 3);
        let x = self.options.left_margin;
        let mut y = self.font.baseline + self.options.line_padding;

        out.push(DrawInstruction::new(x, y, GOLD, self.options.title.as_str()));
        y += self.line_pitch();

        out.push(DrawInstruction::new(x, y, WHITE, self.header_text()));
        y += self.line_pitch();

        for (position, entry) in snapshot.entries.iter().take(rows).enumerate() {
            out.push(DrawInstruction::new(
                x,
                y,
                rank_color(position),
                self.entry_text(position, entry),
            ));
            y += self.line_pitch();
        }

        if let Some(name) = snapshot.month.and_then(month_name) {
            out.push(DrawInstruction::new(x, y, GOLD, format!("{MONTH_PREFIX}{name}")));
        }

        out
    }

    /// Smallest panel `(width, height)` that shows a full board without clipping:
    /// `max_entries` rows plus title, header and the longest month line.
    pub fn extent(&self) -> (i32, i32) {
        let month_chars = MONTH_NAMES
            .iter()
            .map(|m| MONTH_PREFIX.len() + m.chars().count())
            .max()
            .unwrap_or(0);
        let widest = [
            self.options.title.chars().count(),
            self.options.username_max_chars + 11,
            month_chars,
        ]
        .into_iter()
        .max()
        .unwrap_or(0);
        let width = self.options.left_margin + self.font.char_width * widest as i32;

        let lines = self.options.max_entries as i32 + 3;
        let last_baseline =
            self.font.baseline + self.options.line_padding + (lines - 1) * self.line_pitch();
        let height = last_baseline + self.font.height - self.font.baseline;
        (width, height)
    }

    /// Column header aligned with [`Planner::entry_text`].
    pub fn header_text(&self) -> String {
        let name_w = self.options.username_max_chars;
        format!("    {:<name_w$} {:>POINTS_WIDTH$}", "Username", "Points")
    }

    /// `" 1. alice          50"`: rank is `position + 1`, never derived from points.
    pub fn entry_text(&self, position: usize, entry: &Entry) -> String {
        let name_w = self.options.username_max_chars;
        let name = truncate_chars(&entry.username, name_w);
        format!(
            "{:>2}. {:<name_w$} {:>POINTS_WIDTH$}",
            position + 1,
            name,
            entry.points
        )
    }
}

impl Default for Planner {
    fn default() -> Self {
        Self::new(PlanOptions::default(), FontMetrics::FIVE_BY_SEVEN)
    }
}

/// First `max` characters of `s` (characters, not bytes).
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BLUE, RED};

    fn snapshot(n: usize) -> LeaderboardSnapshot {
        LeaderboardSnapshot {
            entries: (0..n)
                .map(|i| Entry::new(format!("user{i}"), (i * 10) as i64))
                .collect(),
            month: None,
        }
    }

    #[test]
    fn title_and_header_come_first() {
        let plan = Planner::default().plan(&snapshot(0));
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].text, "LeetCode Leaderboard");
        assert_eq!(plan[0].color, GOLD);
        assert_eq!(plan[1].color, WHITE);
        assert!(plan[1].text.contains("Username"));
        assert!(plan[1].text.contains("Points"));
    }

    #[test]
    fn baselines_advance_by_pitch() {
        let planner = Planner::default();
        let plan = planner.plan(&snapshot(3));
        assert_eq!(planner.line_pitch(), 9);
        assert_eq!(plan[0].y, 8);
        for pair in plan.windows(2) {
            assert_eq!(pair[1].y - pair[0].y, 9);
        }
        assert!(plan.iter().all(|i| i.x == 1));
    }

    #[test]
    fn rows_are_capped_in_input_order() {
        let plan = Planner::default().plan(&snapshot(12));
        assert_eq!(plan.len(), 12);
        assert!(plan[2].text.contains("user0"));
        assert!(plan[11].text.contains("user9"));
        assert!(!plan.iter().any(|i| i.text.contains("user10")));
    }

    #[test]
    fn colors_track_position_not_score() {
        let snap = LeaderboardSnapshot {
            entries: vec![
                Entry::new("low", 1),
                Entry::new("high", 1000),
                Entry::new("mid", 50),
                Entry::new("top", 9999),
            ],
            month: None,
        };
        let plan = Planner::default().plan(&snap);
        let colors: Vec<_> = plan[2..].iter().map(|i| i.color).collect();
        assert_eq!(colors, vec![GOLD, RED, BLUE, WHITE]);
    }

    #[test]
    fn entry_text_layout() {
        let planner = Planner::default();
        assert_eq!(
            planner.entry_text(0, &Entry::new("alice", 50)),
            " 1. alice          50"
        );
        assert_eq!(
            planner.entry_text(9, &Entry::new("abcdefghijklmnop", -7)),
            "10. abcdefghij     -7"
        );
        assert_eq!(planner.header_text(), "    Username   Points");
    }

    #[test]
    fn truncation_counts_characters() {
        assert_eq!(truncate_chars("short", 10), "short");
        assert_eq!(truncate_chars("exactlyten", 10), "exactlyten");
        assert_eq!(truncate_chars("ääääääääääää", 10), "ääääääääää");
        assert_eq!(truncate_chars("", 10), "");
    }

    #[test]
    fn month_line_only_for_valid_month() {
        let mut snap = snapshot(1);
        snap.month = Some(0);
        let plan = Planner::default().plan(&snap);
        let last = plan.last().unwrap();
        assert_eq!(last.text, "Month: January");
        assert_eq!(last.color, GOLD);

        snap.month = Some(12);
        let plan = Planner::default().plan(&snap);
        assert_eq!(plan.len(), 3);
        assert!(!plan.iter().any(|i| i.text.starts_with("Month")));
    }

    #[test]
    fn custom_caps_apply() {
        let planner = Planner::new(
            PlanOptions {
                max_entries: 2,
                username_max_chars: 3,
                ..PlanOptions::default()
            },
            FontMetrics::FIVE_BY_SEVEN,
        );
        let plan = planner.plan(&snapshot(5));
        assert_eq!(plan.len(), 4);
        assert_eq!(plan[2].text, " 1. use      0");
    }

    #[test]
    fn extent_covers_every_planned_pixel_row_and_column() {
        let planner = Planner::default();
        assert_eq!(planner.extent(), (127, 117));

        let mut snap = snapshot(12);
        snap.entries[0].username = "abcdefghijklmnop".to_string();
        snap.entries[0].points = 999_999;
        snap.month = Some(8);
        let plan = planner.plan(&snap);
        let (width, height) = planner.extent();
        for line in &plan {
            let chars = line.text.chars().count() as i32;
            let right = line.x + FontMetrics::FIVE_BY_SEVEN.char_width * chars;
            assert!(right <= width, "{}", line.text);
            assert!(line.y < height, "{}", line.text);
        }
    }

    #[test]
    fn extent_grows_with_options() {
        let planner = Planner::new(
            PlanOptions {
                max_entries: 20,
                username_max_chars: 16,
                ..PlanOptions::default()
            },
            FontMetrics::FIVE_BY_SEVEN,
        );
        let (width, height) = planner.extent();
        assert_eq!(width, 1 + 6 * 27);
        assert_eq!(height, 8 + 22 * 9 + 1);
    }
}
