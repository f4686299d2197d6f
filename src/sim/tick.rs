//! Variable-timestep simulation tick
//!
//! Advances a run by the real time elapsed since the last frame. The
//! order of the steps below is fixed; replays depend on it.

use serde::{Deserialize, Serialize};

use super::collision::{remove_offscreen, resolve_collisions};
use super::difficulty;
use super::spawner::maybe_spawn;
use super::state::{RunEvent, RunState};

/// One discrete lane hop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaneMove {
    Left,
    Right,
}

/// Input for a single tick, with edge events already extracted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    /// Lane hops pressed since the last tick, in press order
    pub lane_moves: Vec<LaneMove>,
    /// Strafe-left key held
    pub strafe_left: bool,
    /// Strafe-right key held
    pub strafe_right: bool,
    /// Restart pressed (only honoured after a crash)
    pub restart: bool,
}

impl TickInput {
    pub fn lane_move(step: LaneMove) -> Self {
        Self {
            lane_moves: vec![step],
            ..Default::default()
        }
    }

    pub fn restart() -> Self {
        Self {
            restart: true,
            ..Default::default()
        }
    }

    /// Held strafe as -1, 0 or 1
    fn strafe_direction(&self) -> f32 {
        f32::from(i8::from(self.strafe_right) - i8::from(self.strafe_left))
    }
}

/// Advance the run by `elapsed_ms` of real time
pub fn tick(state: &mut RunState, input: &TickInput, elapsed_ms: f32) {
    // Timing glitches advance nothing
    let elapsed_ms = if elapsed_ms.is_finite() {
        elapsed_ms.max(0.0)
    } else {
        0.0
    };
    state.events.clear();

    // Background keeps scrolling, even after a crash
    state.scroll_offset += state.tuning.scroll_speed * elapsed_ms;
    state.difficulty = difficulty::advance_base(state.difficulty, elapsed_ms, &state.tuning);
    state.refresh_difficulty();

    if input.restart && state.is_over() {
        state.restart();
    }
    if state.is_over() {
        return;
    }
    state.ticks += 1;

    // Player
    for &step in &input.lane_moves {
        if state.player.shift_lane(step) {
            state.events.push(RunEvent::LaneChanged {
                lane: state.player.lane,
            });
        }
    }
    state
        .player
        .steer(input.strafe_direction(), elapsed_ms, state.tuning.strafe_speed);

    // Spawner
    let (spawned, time_since_spawn) = maybe_spawn(
        state.time_since_spawn,
        elapsed_ms,
        state.effective_difficulty,
        &state.tuning,
        &mut state.rng,
    );
    state.time_since_spawn = time_since_spawn;
    if let Some(obstacle) = spawned {
        log::debug!(
            "Spawned obstacle in lane {} at speed {:.3}px/ms",
            obstacle.lane,
            obstacle.speed
        );
        state.events.push(RunEvent::Spawned {
            lane: obstacle.lane,
        });
        state.obstacles.push(obstacle);
    }

    // Traffic
    let speed_bonus = difficulty::speed_bonus(state.effective_difficulty, &state.tuning);
    for obstacle in &mut state.obstacles {
        obstacle.advance(speed_bonus, elapsed_ms);
    }

    resolve_collisions(state);
    remove_offscreen(state);

    log::trace!(
        "tick {}: score {} difficulty {:.3} obstacles {}",
        state.ticks,
        state.score,
        state.effective_difficulty,
        state.obstacles.len()
    );
}

/// Value-in, value-out form of [`tick`] for adapters that own the state
pub fn step(mut state: RunState, input: &TickInput, elapsed_ms: f32) -> RunState {
    tick(&mut state, input, elapsed_ms);
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::layout::{
        obstacle_lane_center, player_lane_center, road_left_bound, road_right_bound,
    };
    use crate::sim::state::{GamePhase, Obstacle};
    use glam::Vec2;
    use proptest::prelude::*;

    const FRAME_MS: f32 = 16.0;

    #[test]
    fn test_passing_obstacle_scores() {
        let mut state = RunState::new(1);
        let bottom = state.player.rect.bottom();
        let speed = state.tuning.min_speed;
        state.obstacles.push(Obstacle::new(
            Vec2::new(obstacle_lane_center(0), bottom - 1.0),
            speed,
        ));

        tick(&mut state, &TickInput::default(), FRAME_MS);
        assert_eq!(state.score, 1);
        assert!(state.obstacles[0].was_counted);
        assert!(!state.is_over());
    }

    #[test]
    fn test_overlap_ends_run() {
        let mut state = RunState::new(1);
        let pos = state.player.rect.pos;
        state.obstacles.push(Obstacle::new(pos, 0.0));

        tick(&mut state, &TickInput::default(), FRAME_MS);
        assert!(state.is_over());
        assert_eq!(state.score, 0);
        assert_eq!(state.events.last(), Some(&RunEvent::Crashed { score: 0 }));
    }

    #[test]
    fn test_three_right_moves_from_lane_one() {
        let mut state = RunState::new(1);
        state.player.lane = 1;
        state.player.sync_position();

        for _ in 0..3 {
            tick(&mut state, &TickInput::lane_move(LaneMove::Right), FRAME_MS);
            assert_eq!(state.player.strafe_offset, 0.0);
        }
        assert_eq!(state.player.lane, 3);
        assert_eq!(state.player.rect.left(), player_lane_center(3));
    }

    #[test]
    fn test_lane_move_resets_strafe() {
        let mut state = RunState::new(1);
        let held = TickInput {
            strafe_right: true,
            ..Default::default()
        };
        tick(&mut state, &held, FRAME_MS);
        assert!(state.player.strafe_offset > 0.0);

        tick(&mut state, &TickInput::lane_move(LaneMove::Left), FRAME_MS);
        assert_eq!(state.player.lane, 1);
        assert_eq!(state.player.strafe_offset, 0.0);
        assert_eq!(state.events, vec![RunEvent::LaneChanged { lane: 1 }]);
    }

    #[test]
    fn test_several_moves_in_one_tick() {
        let mut state = RunState::new(1);
        let input = TickInput {
            lane_moves: vec![LaneMove::Left, LaneMove::Left, LaneMove::Left, LaneMove::Right],
            ..Default::default()
        };
        tick(&mut state, &input, FRAME_MS);
        assert_eq!(state.player.lane, 1);
    }

    #[test]
    fn test_game_over_freezes_play() {
        let mut state = RunState::new(3);
        state.phase = GamePhase::GameOver;
        state.score = 4;
        state.time_since_spawn = 10_000.0;
        state.obstacles.push(Obstacle::new(
            Vec2::new(obstacle_lane_center(0), 100.0),
            0.3,
        ));
        let obstacles = state.obstacles.clone();
        let player = state.player.clone();

        let input = TickInput {
            lane_moves: vec![LaneMove::Left],
            strafe_left: true,
            ..Default::default()
        };
        for _ in 0..10 {
            tick(&mut state, &input, FRAME_MS);
        }

        assert_eq!(state.obstacles, obstacles);
        assert_eq!(state.player, player);
        assert_eq!(state.score, 4);
        assert!(state.events.is_empty());
        // Background still moves
        assert!(state.scroll_offset > 0.0);
        assert!(state.difficulty > 0.0);
    }

    #[test]
    fn test_restart_only_after_crash() {
        let mut state = RunState::new(3);
        state.score = 2;
        tick(&mut state, &TickInput::restart(), FRAME_MS);
        assert_eq!(state.score, 2);
        assert_eq!(state.seed, 3);

        state.phase = GamePhase::GameOver;
        tick(&mut state, &TickInput::restart(), FRAME_MS);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.events.first(), Some(&RunEvent::Restarted));
    }

    #[test]
    fn test_non_positive_elapsed_is_noop() {
        let mut state = RunState::new(3);
        state.obstacles.push(Obstacle::new(
            Vec2::new(obstacle_lane_center(0), 100.0),
            0.3,
        ));
        let before = state.obstacles.clone();

        for ms in [0.0, -16.0, f32::NAN] {
            tick(&mut state, &TickInput::default(), ms);
        }
        assert_eq!(state.obstacles, before);
        assert_eq!(state.scroll_offset, 0.0);
        assert_eq!(state.difficulty, 0.0);
        assert_eq!(state.time_since_spawn, 0.0);
    }

    #[test]
    fn test_spawns_after_interval() {
        let mut state = RunState::new(8);
        let mut spawned = 0;
        // 900ms at zero difficulty; difficulty creeps the interval down a touch
        for _ in 0..57 {
            tick(&mut state, &TickInput::default(), FRAME_MS);
            spawned += state
                .events
                .iter()
                .filter(|e| matches!(e, RunEvent::Spawned { .. }))
                .count();
        }
        assert_eq!(spawned, 1);
        assert_eq!(state.obstacles.len(), 1);
        assert!(state.obstacles[0].rect.top() > -OBSTACLE_HEIGHT);
    }

    #[test]
    fn test_offscreen_obstacle_removed() {
        let mut state = RunState::new(3);
        state.obstacles.push(Obstacle::new(
            Vec2::new(obstacle_lane_center(0), SCREEN_HEIGHT + OBSTACLE_HEIGHT - 1.0),
            0.3,
        ));
        tick(&mut state, &TickInput::default(), FRAME_MS);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_tier_bonus_speeds_traffic() {
        let mut slow = RunState::new(3);
        let mut fast = RunState::new(3);
        fast.score = 20;
        fast.refresh_difficulty();
        for state in [&mut slow, &mut fast] {
            state.obstacles.push(Obstacle::new(
                Vec2::new(obstacle_lane_center(0), 0.0),
                0.2,
            ));
            tick(state, &TickInput::default(), FRAME_MS);
        }
        assert!(fast.obstacles[0].rect.top() > slow.obstacles[0].rect.top());
    }

    #[test]
    fn test_determinism() {
        // Two runs with the same seed and inputs must agree exactly
        let mut state1 = RunState::new(99999);
        let mut state2 = RunState::new(99999);

        let inputs = [
            TickInput::lane_move(LaneMove::Left),
            TickInput {
                strafe_right: true,
                ..Default::default()
            },
            TickInput::default(),
            TickInput::lane_move(LaneMove::Right),
        ];

        for i in 0..600 {
            let input = &inputs[i % inputs.len()];
            tick(&mut state1, input, FRAME_MS);
            tick(&mut state2, input, FRAME_MS);
        }

        assert_eq!(state1.snapshot(), state2.snapshot());
    }

    #[test]
    fn test_step_matches_tick() {
        let mut a = RunState::new(5);
        let b = step(RunState::new(5), &TickInput::default(), FRAME_MS);
        tick(&mut a, &TickInput::default(), FRAME_MS);
        assert_eq!(a.snapshot(), b.snapshot());
    }

    /// A lane-0 field the player (lane 2) never touches
    fn passing_field() -> RunState {
        let mut state = RunState::new(11);
        let x = obstacle_lane_center(0);
        let speed = state.tuning.min_speed;
        // Clears the player's bottom edge within 600ms
        state.obstacles.push(Obstacle::new(Vec2::new(x, 600.0), speed));
        // Stays well above it
        state.obstacles.push(Obstacle::new(Vec2::new(x, 300.0), speed));
        state
    }

    proptest! {
        #[test]
        fn prop_score_independent_of_tick_size(chunks in 1usize..120) {
            let total_ms = 600.0;
            let mut coarse = passing_field();
            tick(&mut coarse, &TickInput::default(), total_ms);

            let mut fine = passing_field();
            for _ in 0..chunks {
                tick(&mut fine, &TickInput::default(), total_ms / chunks as f32);
            }

            prop_assert_eq!(coarse.score, 1);
            prop_assert_eq!(fine.score, coarse.score);
            prop_assert!(fine.obstacles[0].was_counted);
            prop_assert!(!fine.obstacles[1].was_counted);
        }

        #[test]
        fn prop_lane_stays_on_road(moves in prop::collection::vec(any::<bool>(), 0..40)) {
            let mut state = RunState::new(1);
            let mut expected = state.player.lane;
            for right in moves {
                let step = if right { LaneMove::Right } else { LaneMove::Left };
                expected = if right { (expected + 1).min(LANE_COUNT - 1) } else { expected.saturating_sub(1) };
                state.player.shift_lane(step);
                prop_assert_eq!(state.player.lane, expected);
                prop_assert_eq!(state.player.strafe_offset, 0.0);
            }
        }

        #[test]
        fn prop_player_inside_road(
            frames in prop::collection::vec(
                (0u8..4, any::<bool>(), any::<bool>(), 0.0f32..200.0),
                1..80,
            )
        ) {
            let mut state = RunState::new(21);
            for (hop, left, right, ms) in frames {
                let lane_moves = match hop {
                    1 => vec![LaneMove::Left],
                    2 => vec![LaneMove::Right],
                    _ => Vec::new(),
                };
                let input = TickInput { lane_moves, strafe_left: left, strafe_right: right, restart: false };
                tick(&mut state, &input, ms);

                let x = state.player.rect.left();
                prop_assert!(x >= road_left_bound() && x <= road_right_bound());
                prop_assert_eq!(player_lane_center(state.player.lane) + state.player.strafe_offset, x);
            }
        }

        #[test]
        fn prop_base_difficulty_never_drops(frames in prop::collection::vec(-50.0f32..200.0, 1..100)) {
            let mut state = RunState::new(4);
            let mut last = state.difficulty;
            for ms in frames {
                tick(&mut state, &TickInput::default(), ms);
                prop_assert!(state.difficulty >= last);
                last = state.difficulty;
            }
        }

        #[test]
        fn prop_crash_is_terminal(frames in prop::collection::vec(0.0f32..100.0, 1..50)) {
            let mut state = RunState::new(4);
            let pos = state.player.rect.pos;
            state.obstacles.push(Obstacle::new(pos, 0.0));
            tick(&mut state, &TickInput::default(), 16.0);
            prop_assert!(state.is_over());

            let score = state.score;
            let obstacles = state.obstacles.clone();
            for ms in frames {
                let input = TickInput { strafe_right: true, lane_moves: vec![LaneMove::Left], ..Default::default() };
                tick(&mut state, &input, ms);
                prop_assert!(state.is_over());
                prop_assert_eq!(state.score, score);
                prop_assert_eq!(&state.obstacles, &obstacles);
            }
        }
    }
}
