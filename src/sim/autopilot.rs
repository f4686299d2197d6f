//! Idle/demo driver
//!
//! Reads a snapshot and picks the lane with the most open road ahead.
//! Lives outside `tick` so the simulation never depends on it.

use super::layout::lane_at;
use super::state::Snapshot;
use super::tick::{LaneMove, TickInput};
use crate::consts::LANE_COUNT;

/// Open road (px) above the player that counts as safe enough to stay put
const COMFORT_GAP: f32 = 260.0;
/// Clearance a neighbouring lane needs before hopping into it
const HOP_GAP: f32 = 24.0;

/// Distance from the player's top edge to the nearest unpassed obstacle
/// in each lane (negative when one is alongside)
fn lane_clearance(snapshot: &Snapshot) -> [f32; LANE_COUNT] {
    let mut clearance = [f32::INFINITY; LANE_COUNT];
    let player = &snapshot.player;
    for rect in &snapshot.obstacles {
        if rect.top() > player.bottom() {
            continue;
        }
        let lane = lane_at(rect.left() + rect.size.x / 2.0);
        let gap = player.top() - rect.bottom();
        clearance[lane] = clearance[lane].min(gap);
    }
    clearance
}

/// Input for the next tick
pub fn drive(snapshot: &Snapshot) -> TickInput {
    if snapshot.is_over {
        return TickInput::restart();
    }

    let clearance = lane_clearance(snapshot);
    let current = snapshot.player_lane.min(LANE_COUNT - 1);
    if clearance[current] >= COMFORT_GAP {
        return TickInput::default();
    }

    // Widest lane wins; ties go to the closest one
    let mut target = current;
    for lane in 0..LANE_COUNT {
        let better = clearance[lane] > clearance[target]
            || (clearance[lane] == clearance[target]
                && lane.abs_diff(current) < target.abs_diff(current));
        if better {
            target = lane;
        }
    }
    if target == current {
        return TickInput::default();
    }

    let (step, next) = if target < current {
        (LaneMove::Left, current - 1)
    } else {
        (LaneMove::Right, current + 1)
    };
    if clearance[next] < HOP_GAP {
        return TickInput::default();
    }
    log::trace!("autopilot: lane {} -> {}", current, next);
    TickInput::lane_move(step)
}
