//! GameView: rasterizes a core [`Frame`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). Lines are drawn with braille dots so the
//! 800x600 logical surface keeps sub-cell detail; text lands on the cell
//! under its logical anchor.

use crate::canvas::DotCanvas;
use crate::core::{DrawLine, Frame};
use crate::fb::{Cell, CellStyle, FrameBuffer};
use crate::types::{Point2D, SCREEN_HEIGHT, SCREEN_WIDTH};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Cell under a logical position, if it is on screen.
    pub fn cell_at(&self, pos: Point2D) -> Option<(u16, u16)> {
        if pos.x < 0.0 || pos.y < 0.0 {
            return None;
        }
        let col = (pos.x * f64::from(self.width) / SCREEN_WIDTH) as u32;
        let row = (pos.y * f64::from(self.height) / SCREEN_HEIGHT) as u32;
        if col >= u32::from(self.width) || row >= u32::from(self.height) {
            return None;
        }
        Some((col as u16, row as u16))
    }
}

pub struct GameView {
    canvas: DotCanvas,
}

impl Default for GameView {
    fn default() -> Self {
        Self::new()
    }
}

impl GameView {
    pub fn new() -> Self {
        Self {
            canvas: DotCanvas::new(0, 0),
        }
    }

    /// Render a frame into an existing framebuffer.
    ///
    /// Callers can reuse the framebuffer across frames; it is resized to the
    /// viewport when the terminal size changes.
    pub fn render_into(&mut self, frame: &Frame, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell {
            ch: ' ',
            style: CellStyle {
                fg: frame.background,
                bg: frame.background,
            },
        });

        self.canvas.resize(viewport.width, viewport.height);
        self.canvas.clear();
        for line in &frame.lines {
            self.draw_line(line);
        }
        self.canvas.blit(fb, frame.background);

        for text in &frame.texts {
            if let Some((col, row)) = viewport.cell_at(text.pos) {
                let style = CellStyle {
                    fg: text.color,
                    bg: frame.background,
                };
                fb.put_str(col, row, &text.text, style);
            }
        }
    }

    /// Convenience wrapper that allocates a fresh framebuffer.
    pub fn render(&mut self, frame: &Frame, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(frame, viewport, &mut fb);
        fb
    }

    fn draw_line(&mut self, line: &DrawLine) {
        let (dw, dh) = (self.canvas.dot_width(), self.canvas.dot_height());
        if dw == 0 || dh == 0 {
            return;
        }
        let sx = f64::from(dw) / SCREEN_WIDTH;
        let sy = f64::from(dh) / SCREEN_HEIGHT;
        let to_dot = |p: Point2D| {
            let x = ((p.x * sx) as i32).clamp(0, dw - 1);
            let y = ((p.y * sy) as i32).clamp(0, dh - 1);
            (x, y)
        };
        let thickness = (line.width * sx.min(sy)).round().max(1.0) as i32;
        self.canvas.line(
            to_dot(line.seg.start),
            to_dot(line.seg.end),
            line.color,
            thickness,
        );
    }
}
