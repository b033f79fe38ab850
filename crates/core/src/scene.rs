//! Scene state: the bounded draw list and the CRT glow.
//!
//! Segments are kept in a strict FIFO of fixed capacity. Grid, enemy and
//! projectile lines all share it, so older lines expire at the same rate
//! whatever produced them.

use std::collections::VecDeque;

use crate::rng::RandomSource;
use crate::types::{
    LineSegment, Point2D, FLICKER_AMPLITUDE, GLOW_DECAY_RATE, GLOW_MAX, GLOW_MIN, LINE_CAPACITY,
};

/// Decaying phosphor brightness plus per-frame flicker noise.
#[derive(Debug, Clone, PartialEq)]
pub struct GlowState {
    intensity: f64,
    flicker: f64,
    decay_rate: f64,
    flicker_amplitude: f64,
}

impl GlowState {
    pub fn new(decay_rate: f64, flicker_amplitude: f64) -> Self {
        Self {
            intensity: GLOW_MAX,
            flicker: 0.0,
            decay_rate,
            flicker_amplitude,
        }
    }

    pub fn intensity(&self) -> f64 {
        self.intensity
    }

    pub fn flicker(&self) -> f64 {
        self.flicker
    }

    /// Decay linearly toward the floor and resample flicker.
    pub fn update(&mut self, dt: f64, rng: &mut impl RandomSource) {
        self.intensity = (self.intensity - self.decay_rate * dt).max(GLOW_MIN);
        self.flicker = rng.uniform(-self.flicker_amplitude, self.flicker_amplitude);
    }

    pub fn reset(&mut self) {
        self.intensity = GLOW_MAX;
    }

    /// Render-time brightness: intensity plus flicker, clamped.
    pub fn brightness(&self) -> f64 {
        (self.intensity + self.flicker).clamp(GLOW_MIN, GLOW_MAX)
    }
}

impl Default for GlowState {
    fn default() -> Self {
        Self::new(GLOW_DECAY_RATE, FLICKER_AMPLITUDE)
    }
}

/// Transient list of projected segments plus the glow.
#[derive(Debug, Clone)]
pub struct SceneState {
    lines: VecDeque<LineSegment>,
    capacity: usize,
    glow: GlowState,
}

impl SceneState {
    pub fn new() -> Self {
        Self::with_capacity(LINE_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_glow(capacity, GlowState::default())
    }

    pub fn with_glow(capacity: usize, glow: GlowState) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity + 1),
            capacity,
            glow,
        }
    }

    /// Append a segment, evicting the oldest once over capacity.
    pub fn add_line(&mut self, start: Point2D, end: Point2D) {
        self.push(LineSegment::new(start, end));
    }

    pub fn push(&mut self, seg: LineSegment) {
        self.lines.push_back(seg);
        while self.lines.len() > self.capacity {
            self.lines.pop_front();
        }
    }

    pub fn lines(&self) -> impl ExactSizeIterator<Item = &LineSegment> {
        self.lines.iter()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear_lines(&mut self) {
        self.lines.clear();
    }

    pub fn update_glow(&mut self, dt: f64, rng: &mut impl RandomSource) {
        self.glow.update(dt, rng);
    }

    pub fn reset_glow(&mut self) {
        self.glow.reset();
    }

    pub fn glow(&self) -> &GlowState {
        &self.glow
    }
}

impl Default for SceneState {
    fn default() -> Self {
        Self::new()
    }
}
