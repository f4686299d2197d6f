//! Run state and core simulation types
//!
//! All state a run needs lives here, so a run can be cloned, serialized
//! and resumed without losing determinism.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::difficulty;
use super::layout::{
    initial_player_rect, lane_at, player_lane_center, road_left_bound, road_right_bound, start_lane,
};
use super::tick::LaneMove;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Driving
    Running,
    /// Caught; waiting for a restart
    GameOver,
}

/// Things that happened during the last tick, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunEvent {
    Restarted,
    LaneChanged { lane: usize },
    Spawned { lane: usize },
    Passed { score: u32 },
    TierUp { tier: u32 },
    Crashed { score: u32 },
}

/// The player's car
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    /// Lane the car is anchored to
    pub lane: usize,
    /// Fine offset from the lane anchor (px)
    pub strafe_offset: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            rect: initial_player_rect(),
            lane: start_lane(),
            strafe_offset: 0.0,
        }
    }
}

impl Player {
    /// Hop one lane, clamped to the road. Fine offset never carries over.
    ///
    /// Returns true if the lane actually changed.
    pub fn shift_lane(&mut self, step: LaneMove) -> bool {
        let lane = match step {
            LaneMove::Left => self.lane.saturating_sub(1),
            LaneMove::Right => (self.lane + 1).min(LANE_COUNT - 1),
        };
        let changed = lane != self.lane;
        self.lane = lane;
        self.strafe_offset = 0.0;
        changed
    }

    /// Apply held strafe input (`direction` in -1..=1) and re-place the car
    pub fn steer(&mut self, direction: f32, elapsed_ms: f32, strafe_speed: f32) {
        self.strafe_offset += direction * strafe_speed * elapsed_ms;
        self.sync_position();
    }

    /// Place the rect at lane anchor + offset, clamped to the road.
    ///
    /// When clamped, the offset is rewritten so releasing the key doesn't
    /// snap the car back.
    pub fn sync_position(&mut self) {
        let anchor = player_lane_center(self.lane);
        let x = anchor + self.strafe_offset;
        let clamped = x.clamp(road_left_bound(), road_right_bound());
        if clamped != x {
            self.strafe_offset = clamped - anchor;
        }
        self.rect.pos.x = anchor + self.strafe_offset;
    }
}

/// A traffic car
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub rect: Rect,
    /// Lane it was spawned in
    pub lane: usize,
    /// Own downward speed, fixed at spawn (px/ms)
    pub speed: f32,
    /// Set once the car has been scored
    pub was_counted: bool,
}

impl Obstacle {
    /// Obstacle with its top-left at `pos`; the lane is taken from `pos.x`
    pub fn new(pos: Vec2, speed: f32) -> Self {
        Self::in_lane(lane_at(pos.x), pos, speed)
    }

    pub fn in_lane(lane: usize, pos: Vec2, speed: f32) -> Self {
        Self {
            rect: Rect::new(pos, Vec2::new(OBSTACLE_WIDTH, OBSTACLE_HEIGHT)),
            lane,
            speed,
            was_counted: false,
        }
    }

    /// Move down by own speed plus the shared difficulty bonus
    #[inline]
    pub fn advance(&mut self, speed_bonus: f32, elapsed_ms: f32) {
        self.rect.pos.y += (self.speed + speed_bonus) * elapsed_ms;
    }
}

/// Read-only view handed to the renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub player: Rect,
    pub player_lane: usize,
    /// Obstacle rects in spawn order
    pub obstacles: Vec<Rect>,
    pub score: u32,
    pub effective_difficulty: f32,
    /// HUD pace readout (1.0 at the start of a run)
    pub pace: f32,
    /// HUD heat level
    pub score_tier: u32,
    pub is_over: bool,
    /// Lane marker scroll (cosmetic)
    pub scroll_offset: f32,
}

/// Complete run state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Balance table, kept across restarts
    pub tuning: Tuning,
    pub(super) rng: Pcg32,
    pub phase: GamePhase,
    pub player: Player,
    /// Live traffic in spawn order
    pub obstacles: Vec<Obstacle>,
    pub score: u32,
    /// Ms since the last spawn
    pub time_since_spawn: f32,
    /// Time-accumulated base difficulty
    pub difficulty: f32,
    /// Base difficulty plus heat bonus, kept current with `score`
    pub effective_difficulty: f32,
    /// Lane marker scroll (cosmetic)
    pub scroll_offset: f32,
    /// Ticks processed in this run
    pub ticks: u64,
    /// Events from the most recent tick
    #[serde(skip)]
    pub events: Vec<RunEvent>,
}

impl RunState {
    /// Fresh run with default balance
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Fresh run with a custom balance table
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        log::info!("Starting run with seed {}", seed);
        if let Err(e) = tuning.validate() {
            log::warn!("Running with unvalidated tuning: {e}");
        }
        Self {
            seed,
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Running,
            player: Player::default(),
            obstacles: Vec::new(),
            score: 0,
            time_since_spawn: 0.0,
            difficulty: 0.0,
            effective_difficulty: 0.0,
            scroll_offset: 0.0,
            ticks: 0,
            events: Vec::new(),
        }
    }

    /// Replace the whole run with a fresh one seeded from this run's RNG
    pub fn restart(&mut self) {
        let seed = self.rng.random::<u64>();
        let tuning = self.tuning.clone();
        *self = Self::with_tuning(seed, tuning);
        self.events.push(RunEvent::Restarted);
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Current heat level
    #[inline]
    pub fn score_tier(&self) -> u32 {
        difficulty::score_tier(self.score, &self.tuning)
    }

    /// Recompute the effective difficulty from base difficulty and score
    pub fn refresh_difficulty(&mut self) {
        self.effective_difficulty = difficulty::effective(self.difficulty, self.score, &self.tuning);
    }

    /// Score one passed obstacle and pick up any heat change immediately
    pub fn award_point(&mut self) {
        let tier_before = self.score_tier();
        self.score += 1;
        self.refresh_difficulty();
        self.events.push(RunEvent::Passed { score: self.score });

        let tier = self.score_tier();
        if tier > tier_before {
            log::debug!("Heat level {} at score {}", tier, self.score);
            self.events.push(RunEvent::TierUp { tier });
        }
    }

    /// Build the render view
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            player: self.player.rect,
            player_lane: self.player.lane,
            obstacles: self.obstacles.iter().map(|o| o.rect).collect(),
            score: self.score,
            effective_difficulty: self.effective_difficulty,
            pace: 1.0 + self.effective_difficulty,
            score_tier: self.score_tier(),
            is_over: self.is_over(),
            scroll_offset: self.scroll_offset,
        }
    }
}
