//! Headless sink: committed frames are written to the log instead of a panel.

use anyhow::Result;
use tracing::info;

use crate::core::{Canvas, FontMetrics, Geometry};
use crate::types::{DrawInstruction, Rgb};

pub struct LogCanvas {
    geometry: Geometry,
    pending: Vec<DrawInstruction>,
    committed: usize,
}

impl LogCanvas {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            geometry: Geometry {
                width,
                height,
                font: FontMetrics::FIVE_BY_SEVEN,
            },
            pending: Vec::new(),
            committed: 0,
        }
    }

    /// Frames committed so far.
    pub fn committed(&self) -> usize {
        self.committed
    }
}

impl Canvas for LogCanvas {
    fn geometry(&self) -> Geometry {
        self.geometry
    }

    fn clear(&mut self) -> Result<()> {
        self.pending.clear();
        Ok(())
    }

    fn draw_text(&mut self, x: i32, y: i32, color: Rgb, text: &str) -> Result<()> {
        self.pending.push(DrawInstruction::new(x, y, color, text));
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        self.committed += 1;
        info!(frame = self.committed, lines = self.pending.len(), "Frame committed");
        for ins in self.pending.drain(..) {
            info!(
                x = ins.x,
                y = ins.y,
                color = %hex(ins.color),
                "{}",
                ins.text
            );
        }
        Ok(())
    }
}

fn hex(c: Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
}
