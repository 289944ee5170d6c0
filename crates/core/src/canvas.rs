//! Display sink seam.
//!
//! The planner only needs [`Geometry`]; the poll loop drives a [`Canvas`]. A
//! terminal LED panel implements it in the `term` crate, [`RecordingCanvas`]
//! keeps frames in memory.

use anyhow::Result;

use crate::types::{DrawInstruction, Rgb};

/// Font metrics in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontMetrics {
    /// Horizontal advance per character.
    pub char_width: i32,
    /// Full glyph height.
    pub height: i32,
    /// Distance from the top of a glyph to its baseline.
    pub baseline: i32,
}

impl FontMetrics {
    /// The classic 5x7 LED matrix font (one column of spacing).
    pub const FIVE_BY_SEVEN: Self = Self {
        char_width: 6,
        height: 7,
        baseline: 6,
    };
}

/// Panel size plus font metrics, supplied by the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub width: u16,
    pub height: u16,
    pub font: FontMetrics,
}

/// A pixel display that accepts text.
///
/// Between `clear` and `commit` nothing is visible; `commit` publishes the
/// whole batch at once.
pub trait Canvas {
    fn geometry(&self) -> Geometry;

    fn clear(&mut self) -> Result<()>;

    /// Draw `text` with its baseline at `y`.
    fn draw_text(&mut self, x: i32, y: i32, color: Rgb, text: &str) -> Result<()>;

    fn commit(&mut self) -> Result<()>;

    /// Release the underlying device.
    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Replace whatever the canvas shows with `instructions`.
pub fn present<C: Canvas + ?Sized>(canvas: &mut C, instructions: &[DrawInstruction]) -> Result<()> {
    canvas.clear()?;
    for ins in instructions {
        canvas.draw_text(ins.x, ins.y, ins.color, &ins.text)?;
    }
    canvas.commit()
}

/// In-memory canvas that keeps every committed frame.
#[derive(Debug, Clone)]
pub struct RecordingCanvas {
    geometry: Geometry,
    pending: Vec<DrawInstruction>,
    frames: Vec<Vec<DrawInstruction>>,
    clears: usize,
    closed: bool,
}

impl RecordingCanvas {
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            pending: Vec::new(),
            frames: Vec::new(),
            clears: 0,
            closed: false,
        }
    }

    /// Committed frames, oldest first.
    pub fn frames(&self) -> &[Vec<DrawInstruction>] {
        &self.frames
    }

    /// What is on screen right now.
    pub fn current(&self) -> Option<&[DrawInstruction]> {
        self.frames.last().map(Vec::as_slice)
    }

    pub fn clear_count(&self) -> usize {
        self.clears
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl Default for RecordingCanvas {
    fn default() -> Self {
        Self::new(Geometry {
            width: 128,
            height: 128,
            font: FontMetrics::FIVE_BY_SEVEN,
        })
    }
}

impl Canvas for RecordingCanvas {
    fn geometry(&self) -> Geometry {
        self.geometry
    }

    fn clear(&mut self) -> Result<()> {
        self.pending.clear();
        self.clears += 1;
        Ok(())
    }

    fn draw_text(&mut self, x: i32, y: i32, color: Rgb, text: &str) -> Result<()> {
        self.pending.push(DrawInstruction::new(x, y, color, text));
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        self.frames.push(std::mem::take(&mut self.pending));
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.closed = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GOLD, WHITE};

    #[test]
    fn present_replaces_the_previous_frame() {
        let mut canvas = RecordingCanvas::default();
        present(&mut canvas, &[DrawInstruction::new(1, 8, GOLD, "a")]).unwrap();
        present(&mut canvas, &[DrawInstruction::new(1, 8, WHITE, "b")]).unwrap();

        assert_eq!(canvas.frames().len(), 2);
        assert_eq!(canvas.clear_count(), 2);
        assert_eq!(canvas.current().unwrap()[0].text, "b");
    }

    #[test]
    fn uncommitted_draws_are_not_visible() {
        let mut canvas = RecordingCanvas::default();
        canvas.clear().unwrap();
        canvas.draw_text(0, 0, WHITE, "x").unwrap();
        assert!(canvas.current().is_none());
    }
}
