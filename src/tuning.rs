//! Game balance table
//!
//! Every rate is per real millisecond. Legacy values were tuned per 60 FPS
//! frame and are converted through [`REFERENCE_FRAME_MS`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::REFERENCE_FRAME_MS;

/// Errors raised while loading or validating a [`Tuning`]
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed tuning json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Balance constants for spawning, speed and difficulty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Spawner ===
    /// Spawn interval at zero difficulty (ms)
    pub spawn_base_interval_ms: f32,
    /// Spawn interval floor (ms)
    pub spawn_min_interval_ms: f32,
    /// Interval shrink per unit of effective difficulty (ms)
    pub interval_decay_ms: f32,

    // === Traffic ===
    /// Slowest spawn speed (px/ms)
    pub min_speed: f32,
    /// Fastest spawn speed (px/ms)
    pub max_speed: f32,
    /// Extra speed per unit of effective difficulty (px/ms)
    pub speed_difficulty_factor: f32,

    // === Difficulty ===
    /// Base difficulty gained per ms
    pub difficulty_rate: f32,
    /// Points per heat tier
    pub tier_size: u32,
    /// Difficulty added per heat tier
    pub tier_bonus: f32,

    // === Player ===
    /// Fine strafe speed (px/ms)
    pub strafe_speed: f32,

    // === Cosmetic ===
    /// Lane marker scroll speed (px/ms)
    pub scroll_speed: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            spawn_base_interval_ms: 900.0,
            spawn_min_interval_ms: 360.0,
            interval_decay_ms: 120.0,

            min_speed: 3.5 / REFERENCE_FRAME_MS,
            max_speed: 5.0 / REFERENCE_FRAME_MS,
            speed_difficulty_factor: 0.5 / REFERENCE_FRAME_MS,

            difficulty_rate: 0.00005,
            tier_size: 10,
            tier_bonus: 0.6,

            strafe_speed: 7.0 / REFERENCE_FRAME_MS,

            scroll_speed: 20.0 / REFERENCE_FRAME_MS,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override; missing keys keep defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a JSON tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Spawn speed bounds as an ordered, finite, non-negative pair.
    ///
    /// Holds for unvalidated tables too (public fields, deserialized runs).
    pub fn speed_bounds(&self) -> (f32, f32) {
        let sane = |v: f32| if v.is_finite() { v.max(0.0) } else { 0.0 };
        let (a, b) = (sane(self.min_speed), sane(self.max_speed));
        (a.min(b), a.max(b))
    }

    /// Reject values the simulation can't run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let rates = [
            ("spawn_base_interval_ms", self.spawn_base_interval_ms),
            ("spawn_min_interval_ms", self.spawn_min_interval_ms),
            ("interval_decay_ms", self.interval_decay_ms),
            ("min_speed", self.min_speed),
            ("max_speed", self.max_speed),
            ("speed_difficulty_factor", self.speed_difficulty_factor),
            ("difficulty_rate", self.difficulty_rate),
            ("tier_bonus", self.tier_bonus),
            ("strafe_speed", self.strafe_speed),
            ("scroll_speed", self.scroll_speed),
        ];
        for (field, value) in rates {
            if !value.is_finite() || value < 0.0 {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must be finite and non-negative",
                });
            }
        }

        if self.min_speed > self.max_speed {
            return Err(TuningError::Invalid {
                field: "min_speed",
                reason: "must not exceed max_speed",
            });
        }
        if self.spawn_min_interval_ms <= 0.0 {
            return Err(TuningError::Invalid {
                field: "spawn_min_interval_ms",
                reason: "must be positive",
            });
        }
        if self.spawn_min_interval_ms > self.spawn_base_interval_ms {
            return Err(TuningError::Invalid {
                field: "spawn_min_interval_ms",
                reason: "must not exceed spawn_base_interval_ms",
            });
        }
        if self.tier_size == 0 {
            return Err(TuningError::Invalid {
                field: "tier_size",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }
}
