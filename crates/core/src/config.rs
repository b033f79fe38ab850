//! Game tunables and runtime options.
//!
//! [`GameConfig`] carries every gameplay constant so the simulation can be
//! exercised with other values in tests. [`RunConfig`] holds the options the
//! binary reads from the environment:
//!
//! - `BATTLEZONE_SEED`: RNG seed (default: derived from the system clock)
//! - `BATTLEZONE_FPS`: target frame rate, 1..=240 (default: 60)
//! - `BATTLEZONE_ENEMY_FIRE`: `per-tick:<p>` or `per-second:<rate>`
//!   (default: `per-tick:0.01`)
//! - `BATTLEZONE_LOG`: log file path; unset disables logging

use std::path::PathBuf;

use crate::types::*;

/// Configuration errors
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Value could not be parsed
    #[error("{var}: invalid value {value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// How often enemies fire.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnemyFireModel {
    /// Fixed probability per simulation tick; difficulty scales with frame rate.
    PerTick(f64),
    /// Poisson rate in shots per second, independent of frame rate.
    PerSecond(f64),
}

impl EnemyFireModel {
    /// Probability that one enemy fires during a tick of `dt` seconds.
    pub fn chance(&self, dt: f64) -> f64 {
        match *self {
            EnemyFireModel::PerTick(p) => p,
            EnemyFireModel::PerSecond(rate) => 1.0 - (-rate * dt.max(0.0)).exp(),
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let (kind, value) = s.trim().split_once(':')?;
        let value: f64 = value.trim().parse().ok()?;
        if !value.is_finite() || value < 0.0 {
            return None;
        }
        match kind.trim() {
            "per-tick" if value <= 1.0 => Some(EnemyFireModel::PerTick(value)),
            "per-second" => Some(EnemyFireModel::PerSecond(value)),
            _ => None,
        }
    }
}

impl Default for EnemyFireModel {
    fn default() -> Self {
        EnemyFireModel::PerTick(ENEMY_FIRE_CHANCE_PER_TICK)
    }
}

/// Gameplay tunables.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub player_speed: f64,
    pub player_rotation_speed: f64,
    pub pointer_sensitivity: f64,
    pub max_health: i32,
    pub shot_cooldown: f64,
    pub shot_range: f64,
    pub spawn_interval: f64,
    pub spawn_min_distance: f64,
    pub spawn_max_distance: f64,
    pub enemy_speed: f64,
    pub enemy_stop_radius: f64,
    pub enemy_fire: EnemyFireModel,
    pub hit_radius: f64,
    pub hit_damage: i32,
    pub glow_decay_rate: f64,
    pub flicker_amplitude: f64,
    pub line_capacity: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_speed: PLAYER_SPEED,
            player_rotation_speed: PLAYER_ROTATION_SPEED,
            pointer_sensitivity: POINTER_SENSITIVITY,
            max_health: PLAYER_MAX_HEALTH,
            shot_cooldown: SHOT_COOLDOWN_SECS,
            shot_range: SHOT_RANGE,
            spawn_interval: ENEMY_SPAWN_INTERVAL_SECS,
            spawn_min_distance: ENEMY_SPAWN_MIN_DISTANCE,
            spawn_max_distance: ENEMY_SPAWN_MAX_DISTANCE,
            enemy_speed: ENEMY_SPEED,
            enemy_stop_radius: ENEMY_STOP_RADIUS,
            enemy_fire: EnemyFireModel::default(),
            hit_radius: HIT_RADIUS,
            hit_damage: HIT_DAMAGE,
            glow_decay_rate: GLOW_DECAY_RATE,
            flicker_amplitude: FLICKER_AMPLITUDE,
            line_capacity: LINE_CAPACITY,
        }
    }
}

/// Process-level options.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub seed: Option<u32>,
    pub fps: u32,
    pub enemy_fire: EnemyFireModel,
    pub log_path: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: None,
            fps: TARGET_FPS,
            enemy_fire: EnemyFireModel::default(),
            log_path: None,
        }
    }
}

impl RunConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from any variable lookup; empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| {
            lookup(var)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };
        let mut cfg = RunConfig::default();

        if let Some(v) = get("BATTLEZONE_SEED") {
            cfg.seed = Some(v.parse().map_err(|_| ConfigError::Invalid {
                var: "BATTLEZONE_SEED",
                value: v.clone(),
                reason: "expected an unsigned 32-bit integer",
            })?);
        }

        if let Some(v) = get("BATTLEZONE_FPS") {
            cfg.fps = v
                .parse()
                .ok()
                .filter(|fps| (1..=240).contains(fps))
                .ok_or_else(|| ConfigError::Invalid {
                    var: "BATTLEZONE_FPS",
                    value: v.clone(),
                    reason: "expected an integer in 1..=240",
                })?;
        }

        if let Some(v) = get("BATTLEZONE_ENEMY_FIRE") {
            cfg.enemy_fire = EnemyFireModel::parse(&v).ok_or_else(|| ConfigError::Invalid {
                var: "BATTLEZONE_ENEMY_FIRE",
                value: v.clone(),
                reason: "expected per-tick:<0..=1> or per-second:<rate>",
            })?;
        }

        cfg.log_path = get("BATTLEZONE_LOG").map(PathBuf::from);
        Ok(cfg)
    }

    /// Gameplay config with the runtime overrides applied.
    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            enemy_fire: self.enemy_fire,
            ..GameConfig::default()
        }
    }

    /// Seconds per frame.
    pub fn frame_secs(&self) -> f64 {
        1.0 / f64::from(self.fps)
    }
}
