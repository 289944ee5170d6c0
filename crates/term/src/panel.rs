//! PanelCanvas: the emulated LED matrix as a [`Canvas`].
//!
//! Draws go to a back buffer; `commit` flushes it to the terminal in one
//! write, so a half-drawn frame is never visible.

use std::io::{self, Write};

use anyhow::Result;

use crate::core::{Canvas, Geometry};
use crate::fb::{PixelBuffer, Rgb};
use crate::font;
use crate::renderer::TerminalRenderer;

pub struct PanelCanvas<W: Write = io::Stdout> {
    back: PixelBuffer,
    renderer: TerminalRenderer<W>,
    entered: bool,
}

impl PanelCanvas<io::Stdout> {
    /// Take over the terminal (alternate screen, hidden cursor).
    pub fn open(width: u16, height: u16) -> Result<Self> {
        let mut canvas = Self::with_renderer(width, height, TerminalRenderer::new());
        canvas.renderer.enter()?;
        canvas.entered = true;
        Ok(canvas)
    }
}

impl<W: Write> PanelCanvas<W> {
    /// Build a panel on top of an existing renderer without touching the terminal mode.
    pub fn with_renderer(width: u16, height: u16, renderer: TerminalRenderer<W>) -> Self {
        Self {
            back: PixelBuffer::new(width, height),
            renderer,
            entered: false,
        }
    }

    /// Pixels drawn since the last `clear`, not yet committed.
    pub fn back_buffer(&self) -> &PixelBuffer {
        &self.back
    }

    pub fn renderer(&self) -> &TerminalRenderer<W> {
        &self.renderer
    }
}

impl<W: Write> Canvas for PanelCanvas<W> {
    fn geometry(&self) -> Geometry {
        Geometry {
            width: self.back.width(),
            height: self.back.height(),
            font: font::METRICS,
        }
    }

    fn clear(&mut self) -> Result<()> {
        self.back.clear();
        Ok(())
    }

    fn draw_text(&mut self, x: i32, y: i32, color: Rgb, text: &str) -> Result<()> {
        font::draw_text(&mut self.back, x, y, color, text);
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        self.renderer.draw_swap(&mut self.back)
    }

    fn close(&mut self) -> Result<()> {
        if self.entered {
            self.entered = false;
            self.renderer.exit()?;
        }
        Ok(())
    }
}

impl<W: Write> Drop for PanelCanvas<W> {
    fn drop(&mut self) {
        if self.entered {
            let _ = self.renderer.exit();
        }
    }
}
