//! Key and pointer mapping from terminal events to game input.

use crate::types::{Key, MouseButton, Point2D, SCREEN_HEIGHT, SCREEN_WIDTH};
use crossterm::event::{self, KeyCode, KeyEvent, KeyModifiers};

/// Map a terminal key code to a game key.
pub fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Key::Advance),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Key::Retreat),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::RotateLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::RotateRight),
        KeyCode::Char(' ') => Some(Key::Start),
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(Key::Quit),
        _ => None,
    }
}

/// Ctrl-C stands in for the host's window-close request.
pub fn is_quit_request(key: KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

pub fn map_button(button: event::MouseButton) -> MouseButton {
    match button {
        event::MouseButton::Left => MouseButton::Primary,
        event::MouseButton::Right => MouseButton::Secondary,
        event::MouseButton::Middle => MouseButton::Middle,
    }
}

/// Turns absolute terminal mouse cells into logical-pixel positions and
/// relative motion.
#[derive(Debug, Clone)]
pub struct PointerTracker {
    cols: u16,
    rows: u16,
    last: Option<(u16, u16)>,
}

impl PointerTracker {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols: cols.max(1),
            rows: rows.max(1),
            last: None,
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols.max(1);
        self.rows = rows.max(1);
        self.last = None;
    }

    /// Forget the last position; the next motion reports no delta.
    pub fn reset(&mut self) {
        self.last = None;
    }

    fn scale(&self) -> (f64, f64) {
        (
            SCREEN_WIDTH / f64::from(self.cols),
            SCREEN_HEIGHT / f64::from(self.rows),
        )
    }

    /// Logical position of a cell's top-left corner.
    pub fn to_logical(&self, column: u16, row: u16) -> Point2D {
        let (sx, sy) = self.scale();
        Point2D::new(f64::from(column) * sx, f64::from(row) * sy)
    }

    /// Record a position; returns the logical delta from the previous one.
    pub fn motion(&mut self, column: u16, row: u16) -> Option<(f64, f64)> {
        let prev = self.last.replace((column, row))?;
        let (sx, sy) = self.scale();
        let dx = (f64::from(column) - f64::from(prev.0)) * sx;
        let dy = (f64::from(row) - f64::from(prev.1)) * sy;
        Some((dx, dy))
    }

    /// Update the last position without producing motion.
    pub fn place(&mut self, column: u16, row: u16) {
        self.last = Some((column, row));
    }
}
