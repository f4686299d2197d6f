//! Collision detection and scoring
//!
//! Everything on the road is an axis-aligned box, so a hit is a plain AABB
//! test. Passing traffic is what scores.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{GamePhase, RunEvent, RunState};
use crate::consts::{OBSTACLE_HEIGHT, SCREEN_HEIGHT};

/// Axis-aligned rectangle in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// True if the two boxes share a non-empty area (touching edges don't count)
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

/// Test every obstacle against the player, in spawn order.
///
/// A hit ends the run and stops the scan. Otherwise an obstacle whose top
/// edge is strictly below the player's bottom edge scores once, and the
/// effective difficulty is refreshed right away.
pub fn resolve_collisions(state: &mut RunState) {
    let player = state.player.rect;
    let mut passed = 0u32;

    for obstacle in &mut state.obstacles {
        if obstacle.rect.overlaps(&player) {
            state.phase = GamePhase::GameOver;
            break;
        }
        if !obstacle.was_counted && obstacle.rect.top() > player.bottom() {
            obstacle.was_counted = true;
            passed += 1;
        }
    }

    // Deferred only because the scan holds `obstacles` mutably; nothing in
    // the scan reads difficulty. Anything that does must award inline.
    for _ in 0..passed {
        state.award_point();
    }

    if state.phase == GamePhase::GameOver {
        state.events.push(RunEvent::Crashed { score: state.score });
        log::info!(
            "Caught! score {} at heat level {}",
            state.score,
            state.score_tier()
        );
    }
}

/// Drop obstacles that are fully below the screen
pub fn remove_offscreen(state: &mut RunState) {
    let before = state.obstacles.len();
    state
        .obstacles
        .retain(|o| o.rect.top() <= SCREEN_HEIGHT + OBSTACLE_HEIGHT);
    let removed = before - state.obstacles.len();
    if removed > 0 {
        log::trace!("Removed {} offscreen obstacles", removed);
    }
}
