//! Core game logic module - pure, deterministic, and testable
//!
//! This crate holds the whole simulation of the vector tank game. It does no
//! I/O of its own:
//!
//! - **Deterministic**: every random decision goes through an injectable
//!   [`RandomSource`], so a seed (or a script) replays a game exactly
//! - **Testable**: host side effects are returned as `HostCommand`s
//! - **Portable**: frames are plain display lists any host can rasterize
//!
//! # Module Structure
//!
//! - [`projection`]: pinhole camera onto the 800x600 surface
//! - [`scene`]: bounded FIFO of projected segments and the CRT glow
//! - [`renderer`]: ground grid, enemy wireframes, HUD, menu
//! - [`controller`]: player input, enemy AI, spawning, collisions
//! - [`game`]: menu/game mode and the per-frame step
//! - [`rng`]: seeded LCG and scripted random sources
//! - [`config`]: gameplay tunables and environment options
//!
//! # Example
//!
//! ```
//! use battlezone_core::{Game, GameConfig, SimpleRng};
//! use battlezone_types::{GameMode, HeldKeys, InputEvent, Key};
//!
//! let mut game = Game::new(GameConfig::default(), SimpleRng::new(12345));
//! assert_eq!(game.mode(), GameMode::Menu);
//!
//! // Start, then drive forward for one frame.
//! game.step(&[InputEvent::KeyDown(Key::Start)], HeldKeys::NONE, 1.0 / 60.0);
//! let held = HeldKeys { advance: true, ..HeldKeys::NONE };
//! let frame = game.step(&[], held, 1.0 / 60.0).unwrap();
//!
//! assert_eq!(frame.mode, GameMode::Playing);
//! assert!(game.controller().player().pos.z > 0.0);
//! ```
//!
//! # Timing
//!
//! Call [`Game::step`] once per frame with the elapsed seconds. The shot
//! cooldown runs on the accumulated game clock, the spawn timer on summed
//! `dt`, and the glow decays by `0.05 * dt`.

pub mod config;
pub mod controller;
pub mod game;
pub mod projection;
pub mod renderer;
pub mod rng;
pub mod scene;

pub use battlezone_types as types;

// Re-export commonly used types for convenience
pub use config::{ConfigError, EnemyFireModel, GameConfig, RunConfig};
pub use controller::{
    Controller, Enemy, EntityId, InputFlow, InputResponse, Owner, Player, Projectile, Transition,
};
pub use game::Game;
pub use projection::{project, Camera};
pub use renderer::{DrawLine, DrawText, Frame, Renderer};
pub use rng::{RandomSource, ScriptedRng, SimpleRng};
pub use scene::{GlowState, SceneState};
