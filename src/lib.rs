//! Lane Escape - an endless lane-dodging arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (lanes, traffic, collisions, scoring)
//! - `tuning`: Data-driven game balance
//! - `logging`: Logger setup for binaries and tools

pub mod logging;
pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Duration of one frame at the 60 FPS the legacy rates were tuned for (ms)
    pub const REFERENCE_FRAME_MS: f32 = 16.666;

    /// Screen dimensions
    pub const SCREEN_WIDTH: f32 = 480.0;
    pub const SCREEN_HEIGHT: f32 = 680.0;

    /// Road layout
    pub const ROAD_MARGIN: f32 = 80.0;
    pub const LANE_COUNT: usize = 4;
    pub const LANE_WIDTH: f32 = (SCREEN_WIDTH - ROAD_MARGIN * 2.0) / LANE_COUNT as f32;
    /// Gap kept between the player and the road edge
    pub const ROAD_INSET: f32 = 6.0;

    /// Player car (65% of a lane, whole pixels)
    pub const PLAYER_WIDTH: f32 = 52.0;
    pub const PLAYER_HEIGHT: f32 = 80.0;
    /// Distance between the player's bottom edge and the screen bottom
    pub const PLAYER_BOTTOM_GAP: f32 = 20.0;

    /// Traffic car (60% of a lane)
    pub const OBSTACLE_WIDTH: f32 = 48.0;
    pub const OBSTACLE_HEIGHT: f32 = 90.0;
}
