//! Pixel framebuffer for the emulated LED panel.

pub use crate::types::Rgb;

use crate::types::BLACK;

/// 2D framebuffer of RGB pixels, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u16,
    height: u16,
    pixels: Vec<Rgb>,
}

impl PixelBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            pixels: vec![BLACK; len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    #[inline(always)]
    fn idx(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    /// Pixel at `(x, y)`; `None` outside the panel.
    pub fn get(&self, x: i32, y: i32) -> Option<Rgb> {
        self.idx(x, y).map(|i| self.pixels[i])
    }

    /// Out-of-bounds writes are clipped.
    pub fn set(&mut self, x: i32, y: i32, color: Rgb) {
        if let Some(i) = self.idx(x, y) {
            self.pixels[i] = color;
        }
    }

    pub fn clear(&mut self) {
        self.pixels.fill(BLACK);
    }

    pub fn lit_count(&self) -> usize {
        self.pixels.iter().filter(|p| **p != BLACK).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GOLD;

    #[test]
    fn writes_outside_the_panel_are_clipped() {
        let mut fb = PixelBuffer::new(4, 2);
        fb.set(-1, 0, GOLD);
        fb.set(4, 0, GOLD);
        fb.set(0, 2, GOLD);
        assert_eq!(fb.lit_count(), 0);

        fb.set(3, 1, GOLD);
        assert_eq!(fb.get(3, 1), Some(GOLD));
        assert_eq!(fb.get(4, 1), None);
    }

    #[test]
    fn clear_turns_every_pixel_off() {
        let mut fb = PixelBuffer::new(3, 3);
        fb.set(1, 1, GOLD);
        fb.clear();
        assert_eq!(fb.lit_count(), 0);
    }
}
