//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Elapsed time and input arrive from the caller
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod difficulty;
pub mod layout;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Rect, remove_offscreen, resolve_collisions};
pub use layout::{
    initial_player_rect, lane_at, lane_center, obstacle_lane_center, player_lane_center,
    road_left_bound, road_right_bound,
};
pub use spawner::{maybe_spawn, spawn_obstacle};
pub use state::{GamePhase, Obstacle, Player, RunEvent, RunState, Snapshot};
pub use tick::{LaneMove, TickInput, step, tick};
