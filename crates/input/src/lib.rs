//! Terminal input module (engine-facing).
//!
//! This module maps `crossterm` events into [`crate::types::InputEvent`]s and
//! keeps the continuous key state the controller samples every frame. Mouse
//! positions arrive as absolute cells; [`PointerTracker`] turns them into
//! relative motion on the 800x600 logical surface.

pub mod handler;
pub mod map;

pub use battlezone_types as types;

pub use handler::{InputHandler, KeyState};
pub use map::{is_quit_request, map_key, PointerTracker};
