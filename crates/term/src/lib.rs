//! Terminal "game renderer" module.
//!
//! Renders core [`Frame`](battlezone_core::Frame)s into a simple framebuffer
//! that can be flushed to a terminal backend. Vector lines are rasterized
//! onto braille dots, which gives a 2x4 sub-cell grid per terminal cell and
//! keeps the wireframes legible at typical terminal sizes.

pub mod canvas;
pub mod fb;
pub mod game_view;
pub mod renderer;

pub use battlezone_core as core;
pub use battlezone_types as types;

pub use canvas::DotCanvas;
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_commands_into, encode_diff_into, encode_full_into, TerminalRenderer};
