//! Core types module - shared data structures and constants
//!
//! This module defines the plain data used by every other crate: geometry,
//! input events, the game mode, and the side-effect commands the simulation
//! hands back to its host. Nothing here depends on a terminal or on I/O.
//!
//! # Surface
//!
//! The game draws onto a fixed logical surface of `SCREEN_WIDTH` x
//! `SCREEN_HEIGHT` (800x600). Hosts scale this surface to whatever they can
//! actually display.
//!
//! # Gameplay Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `PLAYER_SPEED` | 100 | Units per second along the facing vector |
//! | `PLAYER_ROTATION_SPEED` | 2.0 | Radians per second |
//! | `SHOT_COOLDOWN_SECS` | 0.5 | Minimum time between player shots |
//! | `SHOT_RANGE` | 1000 | Length of every projectile ray |
//! | `ENEMY_SPAWN_INTERVAL_SECS` | 5.0 | Spawn timer threshold |
//! | `ENEMY_SPEED` | 50 | Units per second toward the player |
//! | `ENEMY_STOP_RADIUS` | 50 | Enemies hold position inside this radius |
//! | `HIT_RADIUS` | 20 | Projectile origin hit distance |
//! | `HIT_DAMAGE` | 10 | Damage per enemy hit on the player |
//!
//! # Examples
//!
//! ```
//! use battlezone_types::{GameMode, Point2D, LineSegment, SCREEN_WIDTH};
//!
//! let seg = LineSegment::new(Point2D::new(0.0, 0.0), Point2D::new(10.0, 0.0));
//! assert_eq!(seg.length(), 10.0);
//! assert_eq!(GameMode::default(), GameMode::Menu);
//! assert_eq!(SCREEN_WIDTH, 800.0);
//! ```

/// Logical surface width in pixels.
pub const SCREEN_WIDTH: f64 = 800.0;

/// Logical surface height in pixels.
pub const SCREEN_HEIGHT: f64 = 600.0;

/// Host window title.
pub const WINDOW_TITLE: &str = "Battlezone: Vector CRT";

/// Pinhole focal length used by the projection.
pub const FOCAL_LENGTH: f64 = 400.0;

/// Points closer than this (camera-relative depth) are not drawn.
pub const NEAR_PLANE: f64 = 10.0;

/// Maximum number of buffered line segments.
pub const LINE_CAPACITY: usize = 100;

/// Logical width of every drawn line.
pub const LINE_WIDTH: f64 = 2.0;

/// Player movement speed (units/sec).
pub const PLAYER_SPEED: f64 = 100.0;

/// Player keyboard rotation speed (rad/sec).
pub const PLAYER_ROTATION_SPEED: f64 = 2.0;

/// Yaw change per pixel of pointer motion, scaled by dt.
pub const POINTER_SENSITIVITY: f64 = 0.005;

/// Starting (and reset) player health.
pub const PLAYER_MAX_HEALTH: i32 = 100;

/// Minimum seconds between two player shots.
pub const SHOT_COOLDOWN_SECS: f64 = 0.5;

/// Length of a projectile ray.
pub const SHOT_RANGE: f64 = 1000.0;

/// Seconds between enemy spawns.
pub const ENEMY_SPAWN_INTERVAL_SECS: f64 = 5.0;

/// Closest spawn distance from the player.
pub const ENEMY_SPAWN_MIN_DISTANCE: f64 = 500.0;

/// Farthest spawn distance from the player.
pub const ENEMY_SPAWN_MAX_DISTANCE: f64 = 1000.0;

/// Enemy approach speed (units/sec).
pub const ENEMY_SPEED: f64 = 50.0;

/// Enemies stop approaching inside this distance.
pub const ENEMY_STOP_RADIUS: f64 = 50.0;

/// Default chance per simulation tick that an enemy fires.
pub const ENEMY_FIRE_CHANCE_PER_TICK: f64 = 0.01;

/// Projectile start points closer than this to a target hit it.
pub const HIT_RADIUS: f64 = 20.0;

/// Health removed from the player per enemy hit.
pub const HIT_DAMAGE: i32 = 10;

/// Enemy wireframe half-width.
pub const ENEMY_HALF_WIDTH: f64 = 20.0;

/// Enemy wireframe height.
pub const ENEMY_HEIGHT: f64 = 40.0;

/// Ground grid spacing.
pub const GRID_SPACING: i32 = 100;

/// Glow decay per second.
pub const GLOW_DECAY_RATE: f64 = 0.05;

/// Glow floor.
pub const GLOW_MIN: f64 = 0.5;

/// Glow ceiling (and reset value).
pub const GLOW_MAX: f64 = 1.0;

/// Flicker noise amplitude; samples are uniform in `[-amp, amp]`.
pub const FLICKER_AMPLITUDE: f64 = 0.05;

/// Default frame rate target.
pub const TARGET_FPS: u32 = 60;

/// Longest step a single frame may simulate, in seconds.
pub const MAX_FRAME_DT: f64 = 0.25;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_center_matches_focal_setup() {
        assert_eq!(SCREEN_WIDTH / 2.0, 400.0);
        assert_eq!(SCREEN_HEIGHT / 2.0, 300.0);
        assert_eq!(FOCAL_LENGTH, 400.0);
    }

    #[test]
    fn glow_bounds_are_ordered() {
        assert!(GLOW_MIN < GLOW_MAX);
        assert!(FLICKER_AMPLITUDE < GLOW_MAX - GLOW_MIN);
    }
}

/// A point on the 2D drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A point in world space. `y` is up; the ground plane is `y == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3D {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Lift a ground-plane position to `y == 0`.
    pub const fn on_ground(pos: GroundPos) -> Self {
        Self {
            x: pos.x,
            y: 0.0,
            z: pos.z,
        }
    }
}

/// A position on the ground plane (world x, world z).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GroundPos {
    pub x: f64,
    pub z: f64,
}

impl GroundPos {
    pub const fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }

    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.z - other.z)
    }

    /// Unit vector for a yaw angle. Yaw 0 faces +z.
    pub fn heading(yaw: f64) -> Self {
        Self {
            x: yaw.sin(),
            z: yaw.cos(),
        }
    }

    /// `self + dir * len`.
    pub fn offset(self, dir: Self, len: f64) -> Self {
        Self {
            x: self.x + dir.x * len,
            z: self.z + dir.z * len,
        }
    }
}

/// A projected segment, ready to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub start: Point2D,
    pub end: Point2D,
}

impl LineSegment {
    pub const fn new(start: Point2D, end: Point2D) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }
}

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Top-level game mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameMode {
    #[default]
    Menu,
    Playing,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Menu => "menu",
            GameMode::Playing => "game",
        }
    }
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keys the game reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Advance,
    Retreat,
    RotateLeft,
    RotateRight,
    Start,
    Quit,
}

impl Key {
    pub fn index(self) -> usize {
        match self {
            Key::Advance => 0,
            Key::Retreat => 1,
            Key::RotateLeft => 2,
            Key::RotateRight => 3,
            Key::Start => 4,
            Key::Quit => 5,
        }
    }
}

/// Pointer buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Primary,
    Secondary,
    Middle,
}

/// Host-independent input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Host asked the process to close (window close, Ctrl-C).
    QuitRequest,
    KeyDown(Key),
    /// Relative pointer motion in logical pixels.
    PointerMotion { dx: f64, dy: f64 },
    PointerDown { button: MouseButton, pos: Point2D },
    /// No discrete event this frame; continuous key state still applies.
    Tick,
}

/// Continuous (held) key state, sampled on every input-handling call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeldKeys {
    pub advance: bool,
    pub retreat: bool,
    pub rotate_left: bool,
    pub rotate_right: bool,
}

impl HeldKeys {
    pub const NONE: HeldKeys = HeldKeys {
        advance: false,
        retreat: false,
        rotate_left: false,
        rotate_right: false,
    };

    pub fn any(&self) -> bool {
        self.advance || self.retreat || self.rotate_left || self.rotate_right
    }
}

/// Side effects on global host state, returned instead of performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostCommand {
    CapturePointer,
    ReleasePointer,
    ShowPointer,
    HidePointer,
    SetTitle(&'static str),
}
