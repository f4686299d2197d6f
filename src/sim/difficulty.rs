//! Difficulty model
//!
//! Base difficulty grows with time spent on the road; every `tier_size`
//! points adds a fixed heat bonus on top. The sum drives both traffic
//! speed and spawn rate.

use crate::tuning::Tuning;

/// Base difficulty after `elapsed_ms` more of driving (never decreases)
#[inline]
pub fn advance_base(base: f32, elapsed_ms: f32, tuning: &Tuning) -> f32 {
    base + tuning.difficulty_rate * elapsed_ms.max(0.0)
}

/// Heat level reached at `score`
#[inline]
pub fn score_tier(score: u32, tuning: &Tuning) -> u32 {
    score / tuning.tier_size.max(1)
}

#[inline]
pub fn tier_bonus(score: u32, tuning: &Tuning) -> f32 {
    score_tier(score, tuning) as f32 * tuning.tier_bonus
}

/// Combined difficulty seen by the spawner and traffic
#[inline]
pub fn effective(base: f32, score: u32, tuning: &Tuning) -> f32 {
    base + tier_bonus(score, tuning)
}

/// Extra downward speed every obstacle gets (px/ms)
#[inline]
pub fn speed_bonus(effective: f32, tuning: &Tuning) -> f32 {
    effective * tuning.speed_difficulty_factor
}

/// Time between spawns, shrinking with difficulty down to the floor (ms)
#[inline]
pub fn spawn_interval(effective: f32, tuning: &Tuning) -> f32 {
    (tuning.spawn_base_interval_ms - effective * tuning.interval_decay_ms)
        .max(tuning.spawn_min_interval_ms)
}
