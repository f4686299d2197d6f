//! Traffic spawner
//!
//! The RNG is passed in so runs replay exactly from a seed. Each spawn
//! draws the lane first, then the speed.

use glam::Vec2;
use rand::Rng;

use super::difficulty;
use super::layout::obstacle_lane_center;
use super::state::Obstacle;
use crate::consts::{LANE_COUNT, OBSTACLE_HEIGHT};
use crate::tuning::Tuning;

/// Accumulate `elapsed_ms` and spawn one obstacle once the current
/// interval has passed.
///
/// Returns the new obstacle (if any) and the updated accumulator, which
/// resets to zero on spawn.
pub fn maybe_spawn<R: Rng + ?Sized>(
    time_since_spawn: f32,
    elapsed_ms: f32,
    effective_difficulty: f32,
    tuning: &Tuning,
    rng: &mut R,
) -> (Option<Obstacle>, f32) {
    let accumulated = time_since_spawn + elapsed_ms.max(0.0);
    let interval = difficulty::spawn_interval(effective_difficulty, tuning);

    if accumulated >= interval {
        (Some(spawn_obstacle(tuning, rng)), 0.0)
    } else {
        (None, accumulated)
    }
}

/// A fresh obstacle just above the visible area in a random lane
pub fn spawn_obstacle<R: Rng + ?Sized>(tuning: &Tuning, rng: &mut R) -> Obstacle {
    let lane = rng.random_range(0..LANE_COUNT);
    let (min_speed, max_speed) = tuning.speed_bounds();
    let speed = rng.random_range(min_speed..=max_speed);
    Obstacle::in_lane(
        lane,
        Vec2::new(obstacle_lane_center(lane), -OBSTACLE_HEIGHT),
        speed,
    )
}
