//! Road geometry
//!
//! Pure lane/bound math. Lane indices are trusted: callers keep them in
//! `0..LANE_COUNT`.

use glam::Vec2;

use super::collision::Rect;
use crate::consts::*;

/// Left x of an actor of `actor_width` centered in `lane`
#[inline]
pub fn lane_center(lane: usize, actor_width: f32) -> f32 {
    ROAD_MARGIN + lane as f32 * LANE_WIDTH + (LANE_WIDTH - actor_width) / 2.0
}

#[inline]
pub fn player_lane_center(lane: usize) -> f32 {
    lane_center(lane, PLAYER_WIDTH)
}

#[inline]
pub fn obstacle_lane_center(lane: usize) -> f32 {
    lane_center(lane, OBSTACLE_WIDTH)
}

/// Lane containing screen x, clamped to the road
#[inline]
pub fn lane_at(x: f32) -> usize {
    let lane = ((x - ROAD_MARGIN) / LANE_WIDTH).floor().max(0.0) as usize;
    lane.min(LANE_COUNT - 1)
}

/// Smallest x the player may take
#[inline]
pub fn road_left_bound() -> f32 {
    ROAD_MARGIN + ROAD_INSET
}

/// Largest x the player may take
#[inline]
pub fn road_right_bound() -> f32 {
    SCREEN_WIDTH - ROAD_MARGIN - PLAYER_WIDTH - ROAD_INSET
}

/// The lane the player starts in
#[inline]
pub fn start_lane() -> usize {
    LANE_COUNT / 2
}

/// Player rect at run start: middle lane, near the bottom edge
pub fn initial_player_rect() -> Rect {
    Rect::new(
        Vec2::new(
            player_lane_center(start_lane()),
            SCREEN_HEIGHT - PLAYER_HEIGHT - PLAYER_BOTTOM_GAP,
        ),
        Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
    )
}
