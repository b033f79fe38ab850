//! Braille dot canvas: sub-cell line rasterization.
//!
//! Each terminal cell holds a 2x4 grid of braille dots, so a canvas over
//! `cols x rows` cells has `2*cols x 4*rows` addressable dots.

use crate::fb::{CellStyle, FrameBuffer};
use crate::types::Rgb;

const BRAILLE_BASE: u32 = 0x2800;

/// Bit for dot `(dx, dy)` inside a cell, `dx` in 0..2, `dy` in 0..4.
const DOT_BITS: [[u8; 4]; 2] = [[0x01, 0x02, 0x04, 0x40], [0x08, 0x10, 0x20, 0x80]];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotCanvas {
    cols: u16,
    rows: u16,
    masks: Vec<u8>,
    colors: Vec<Rgb>,
}

impl DotCanvas {
    pub fn new(cols: u16, rows: u16) -> Self {
        let len = cols as usize * rows as usize;
        Self {
            cols,
            rows,
            masks: vec![0; len],
            colors: vec![Rgb::BLACK; len],
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        if self.cols == cols && self.rows == rows {
            return;
        }
        let len = cols as usize * rows as usize;
        self.cols = cols;
        self.rows = rows;
        self.masks.resize(len, 0);
        self.colors.resize(len, Rgb::BLACK);
    }

    pub fn clear(&mut self) {
        self.masks.fill(0);
    }

    /// Width in dots.
    pub fn dot_width(&self) -> i32 {
        i32::from(self.cols) * 2
    }

    /// Height in dots.
    pub fn dot_height(&self) -> i32 {
        i32::from(self.rows) * 4
    }

    pub fn set_dot(&mut self, x: i32, y: i32, color: Rgb) {
        if x < 0 || y < 0 || x >= self.dot_width() || y >= self.dot_height() {
            return;
        }
        let (cx, cy) = ((x / 2) as usize, (y / 4) as usize);
        let i = cy * self.cols as usize + cx;
        self.masks[i] |= DOT_BITS[(x % 2) as usize][(y % 4) as usize];
        self.colors[i] = color;
    }

    pub fn is_set(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.dot_width() || y >= self.dot_height() {
            return false;
        }
        let i = (y / 4) as usize * self.cols as usize + (x / 2) as usize;
        self.masks[i] & DOT_BITS[(x % 2) as usize][(y % 4) as usize] != 0
    }

    /// Bresenham line; `thickness` stamps a square brush of that many dots.
    pub fn line(&mut self, from: (i32, i32), to: (i32, i32), color: Rgb, thickness: i32) {
        let (mut x, mut y) = from;
        let dx = (to.0 - x).abs();
        let dy = -(to.1 - y).abs();
        let sx = if x < to.0 { 1 } else { -1 };
        let sy = if y < to.1 { 1 } else { -1 };
        let mut err = dx + dy;
        let t = thickness.max(1);
        let lo = -(t - 1) / 2;

        loop {
            for oy in lo..lo + t {
                for ox in lo..lo + t {
                    self.set_dot(x + ox, y + oy, color);
                }
            }
            if x == to.0 && y == to.1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Copy every non-empty cell into `fb` as a braille glyph.
    pub fn blit(&self, fb: &mut FrameBuffer, bg: Rgb) {
        for cy in 0..self.rows {
            for cx in 0..self.cols {
                let i = cy as usize * self.cols as usize + cx as usize;
                let mask = self.masks[i];
                if mask == 0 {
                    continue;
                }
                let ch = char::from_u32(BRAILLE_BASE + u32::from(mask)).unwrap_or('⣿');
                let style = CellStyle {
                    fg: self.colors[i],
                    bg,
                };
                fb.put_char(cx, cy, ch, style);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GREEN: Rgb = Rgb::new(0, 255, 0);

    #[test]
    fn dot_bits_cover_all_eight_positions() {
        let mut c = DotCanvas::new(1, 1);
        for x in 0..2 {
            for y in 0..4 {
                c.set_dot(x, y, GREEN);
            }
        }
        let mut fb = FrameBuffer::new(1, 1);
        c.blit(&mut fb, Rgb::BLACK);
        assert_eq!(fb.get(0, 0).unwrap().ch, '⣿');
    }

    #[test]
    fn single_dot_maps_to_braille() {
        let mut c = DotCanvas::new(2, 1);
        c.set_dot(3, 3, GREEN);
        let mut fb = FrameBuffer::new(2, 1);
        c.blit(&mut fb, Rgb::BLACK);
        assert_eq!(fb.get(0, 0).unwrap().ch, ' ');
        assert_eq!(fb.get(1, 0).unwrap().ch, '\u{2880}');
        assert_eq!(fb.get(1, 0).unwrap().style.fg, GREEN);
    }

    #[test]
    fn horizontal_line_sets_every_dot() {
        let mut c = DotCanvas::new(4, 1);
        c.line((0, 1), (7, 1), GREEN, 1);
        for x in 0..8 {
            assert!(c.is_set(x, 1));
            assert!(!c.is_set(x, 0));
        }
    }

    #[test]
    fn diagonal_line_hits_both_ends() {
        let mut c = DotCanvas::new(4, 2);
        c.line((7, 7), (0, 0), GREEN, 1);
        assert!(c.is_set(0, 0));
        assert!(c.is_set(7, 7));
        assert!(c.is_set(3, 3));
    }

    #[test]
    fn thick_line_spreads() {
        let mut c = DotCanvas::new(4, 2);
        c.line((0, 4), (7, 4), GREEN, 3);
        assert!(c.is_set(2, 3));
        assert!(c.is_set(2, 5));
        assert!(!c.is_set(2, 6));
    }

    #[test]
    fn out_of_range_dots_are_ignored() {
        let mut c = DotCanvas::new(1, 1);
        c.set_dot(-1, 0, GREEN);
        c.set_dot(2, 0, GREEN);
        c.set_dot(0, 4, GREEN);
        assert!(c.masks.iter().all(|&m| m == 0));
    }
}
