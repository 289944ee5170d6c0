//! TerminalRenderer: flushes a pixel framebuffer to a real terminal.
//!
//! Each terminal cell shows two vertically stacked pixels using the upper
//! half-block glyph: the foreground paints the top pixel, the background the
//! bottom one. A 128x128 panel therefore needs 128 columns by 64 rows.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{PixelBuffer, Rgb};
use crate::types::BLACK;

const HALF_BLOCK: char = '▀';

/// Top and bottom pixel of one terminal cell.
type CellColors = (Rgb, Rgb);

pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
    last: Option<PixelBuffer>,
    buf: Vec<u8>,
}

impl TerminalRenderer<io::Stdout> {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for TerminalRenderer<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            last: None,
            buf: Vec::with_capacity(64 * 1024),
        }
    }

    /// Raw mode stays off so Ctrl-C still reaches the process as SIGINT.
    pub fn enter(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.buf.queue(terminal::Clear(terminal::ClearType::All))?;
        self.flush_buf()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        Ok(())
    }

    /// Draw a framebuffer, swapping it into internal state.
    ///
    /// The renderer diffs against the previous frame and then swaps buffers,
    /// so on return `fb` holds the previously shown frame and must be cleared
    /// before it is reused.
    pub fn draw_swap(&mut self, fb: &mut PixelBuffer) -> Result<()> {
        let mut prev = match self.last.take() {
            Some(prev) => prev,
            None => {
                self.buf.clear();
                encode_full_into(fb, &mut self.buf)?;
                self.flush_buf()?;
                let mut prev = PixelBuffer::new(fb.width(), fb.height());
                std::mem::swap(&mut prev, fb);
                self.last = Some(prev);
                return Ok(());
            }
        };

        self.buf.clear();
        encode_diff_into(&prev, fb, &mut self.buf)?;
        self.flush_buf()?;

        std::mem::swap(&mut prev, fb);
        self.last = Some(prev);
        Ok(())
    }

    /// Writer the renderer flushes into.
    pub fn writer(&self) -> &W {
        &self.out
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Number of terminal rows needed for a panel `height` pixels tall.
pub fn cell_rows(height: u16) -> u16 {
    height.div_ceil(2)
}

fn cell_at(fb: &PixelBuffer, x: u16, row: u16) -> CellColors {
    let top = fb.get(x as i32, (row * 2) as i32).unwrap_or(BLACK);
    let bottom = fb.get(x as i32, (row * 2 + 1) as i32).unwrap_or(BLACK);
    (top, bottom)
}

/// Encode a full-frame redraw into `out`.
///
/// This builds a sequence of crossterm commands without writing to stdout.
pub fn encode_full_into(fb: &PixelBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(cursor::MoveTo(0, 0))?;

    let rows = cell_rows(fb.height());
    let mut current: Option<CellColors> = None;
    for row in 0..rows {
        out.queue(cursor::MoveTo(0, row))?;
        for x in 0..fb.width() {
            let cell = cell_at(fb, x, row);
            if current != Some(cell) {
                apply_colors_into(out, cell)?;
                current = Some(cell);
            }
            out.queue(Print(HALF_BLOCK))?;
        }
    }

    out.queue(ResetColor)?;
    Ok(())
}

/// Encode a diff redraw (changed runs) into `out`.
///
/// This builds a sequence of crossterm commands without writing to stdout.
pub fn encode_diff_into(prev: &PixelBuffer, next: &PixelBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut current: Option<CellColors> = None;

    for_each_changed_run(prev, next, |x, row, len| {
        out.queue(cursor::MoveTo(x, row))?;
        for dx in 0..len {
            let cell = cell_at(next, x + dx, row);
            if current != Some(cell) {
                apply_colors_into(out, cell)?;
                current = Some(cell);
            }
            out.queue(Print(HALF_BLOCK))?;
        }
        Ok(())
    })?;

    out.queue(ResetColor)?;
    Ok(())
}

fn apply_colors_into(out: &mut Vec<u8>, (top, bottom): CellColors) -> Result<()> {
    out.queue(SetForegroundColor(rgb_to_color(top)))?;
    out.queue(SetBackgroundColor(rgb_to_color(bottom)))?;
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Calls `f(x, row, len)` for every horizontal run of changed cells.
fn for_each_changed_run(
    prev: &PixelBuffer,
    next: &PixelBuffer,
    mut f: impl FnMut(u16, u16, u16) -> Result<()>,
) -> Result<()> {
    let rows = cell_rows(next.height());
    let w = next.width();
    for row in 0..rows {
        let mut x = 0;
        while x < w {
            if cell_at(prev, x, row) == cell_at(next, x, row) {
                x += 1;
                continue;
            }

            let start = x;
            x += 1;
            while x < w && cell_at(prev, x, row) != cell_at(next, x, row) {
                x += 1;
            }
            f(start, row, x - start)?;
        }
    }

    Ok(())
}
