//! Fixed timestep simulation tick
//!
//! One call advances the match by one 60 Hz step: ball motion with wall
//! reflection, paddle-band collision and scoring, then the opponent tracker.
//! The difficulty ramp is a separate operation fired on its own schedule.

use super::state::MatchState;
use crate::consts::*;

/// Advance the match by one fixed timestep. No-op once the match is over.
pub fn tick(state: &mut MatchState) {
    if state.game_over {
        return;
    }

    move_ball(state);
    // The tracker still runs on the tick that ends the match; the entry
    // guard freezes everything from the next tick on.
    track_opponent(state);
}

/// One difficulty ramp firing. Scheduled every 10 seconds of real time,
/// independent of the tick cadence, and keeps firing after game over.
/// There is no upper bound on the multiplier.
pub fn ramp(state: &mut MatchState) {
    state.speed_multiplier += RAMP_INCREMENT;
}

/// Ball kinematics and band collisions for one tick
fn move_ball(state: &mut MatchState) {
    let m = state.speed_multiplier;

    // Horizontal: reflect off the side walls. On a wall tick the X position
    // is held and only the sign flips; the bounce lands next tick.
    let candidate_x = state.ball_pos.x + state.ball_vel.x * m;
    if candidate_x <= 0.0 || candidate_x >= FIELD_WIDTH - BALL_SIZE {
        state.ball_vel.x = -state.ball_vel.x;
    } else {
        state.ball_pos.x = candidate_x;
    }

    // Vertical: band checks use the X just updated above.
    let candidate_y = state.ball_pos.y + state.ball_vel.y * m;
    if candidate_y <= PADDLE_HEIGHT {
        // Opponent band. A miss here is NOT a point for the player: the
        // ball sails through the top and stays in free flight. Intentional
        // asymmetry with the bottom band.
        if spans_overlap(state.ball_pos.x, state.opponent_x) {
            state.ball_vel.y = state.ball_vel.y.abs();
            state.ball_pos.y = PADDLE_HEIGHT;
        } else {
            state.ball_pos.y = candidate_y;
        }
    } else if candidate_y >= FIELD_HEIGHT - PADDLE_HEIGHT - BALL_SIZE {
        // Player band, then the floor.
        if spans_overlap(state.ball_pos.x, state.player_x) {
            state.ball_vel.y = -state.ball_vel.y.abs();
            state.score += 1;
            state.ball_pos.y = FIELD_HEIGHT - PADDLE_HEIGHT - BALL_SIZE;
        } else if candidate_y >= FIELD_HEIGHT - BALL_SIZE {
            state.game_over = true;
            state.ball_pos.y = FIELD_HEIGHT - BALL_SIZE;
        } else {
            state.ball_pos.y = candidate_y;
        }
    } else {
        state.ball_pos.y = candidate_y;
    }
}

/// Proportional tracker with a speed cap: the opponent chases the X that
/// centers its paddle on the ball, moving at most `OPPONENT_STEP * m` per
/// tick, so it lags the ball whenever the gap exceeds the step.
fn track_opponent(state: &mut MatchState) {
    let target = state.ball_pos.x - (PADDLE_WIDTH - BALL_SIZE) / 2.0;
    let diff = target - state.opponent_x;
    let step = OPPONENT_STEP * state.speed_multiplier;

    state.opponent_x =
        (state.opponent_x + diff.signum() * diff.abs().min(step)).clamp(0.0, PADDLE_MAX_X);
}

/// Horizontal overlap between the ball box and a paddle box
#[inline]
fn spans_overlap(ball_x: f32, paddle_x: f32) -> bool {
    ball_x + BALL_SIZE > paddle_x && ball_x < paddle_x + PADDLE_WIDTH
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input;
    use glam::Vec2;
    use proptest::prelude::*;

    const EPS: f32 = 1e-4;

    /// Player-band Y threshold
    const RETURN_Y: f32 = FIELD_HEIGHT - PADDLE_HEIGHT - BALL_SIZE;
    /// Floor Y
    const FLOOR_Y: f32 = FIELD_HEIGHT - BALL_SIZE;

    #[test]
    fn test_left_wall_reflection() {
        let mut state = MatchState::new();
        state.ball_pos = Vec2::new(0.0, 160.0);
        state.ball_vel = Vec2::new(-2.0, -2.0);

        tick(&mut state);
        // Sign flips, X holds for this tick - no overshoot past the wall
        assert_eq!(state.ball_vel.x, 2.0);
        assert_eq!(state.ball_pos.x, 0.0);
        assert_eq!(state.ball_pos.y, 158.0);
    }

    #[test]
    fn test_right_wall_reflection() {
        let mut state = MatchState::new();
        state.ball_pos = Vec2::new(FIELD_WIDTH - BALL_SIZE, 160.0);
        state.ball_vel = Vec2::new(2.0, 2.0);

        tick(&mut state);
        assert_eq!(state.ball_vel.x, -2.0);
        assert_eq!(state.ball_pos.x, FIELD_WIDTH - BALL_SIZE);
    }

    #[test]
    fn test_player_return_scores() {
        let mut state = MatchState::new();
        state.player_x = 150.0;
        state.ball_pos = Vec2::new(160.0, RETURN_Y - 1.0);
        state.ball_vel = Vec2::new(0.0, 2.0);

        tick(&mut state);
        assert_eq!(state.score, 1);
        assert_eq!(state.ball_vel.y, -2.0);
        assert_eq!(state.ball_pos.y, RETURN_Y);
        assert!(!state.game_over);
    }

    #[test]
    fn test_missed_return_falls_through_band() {
        // No paddle under the ball, but still above the floor threshold:
        // the ball keeps falling through the band.
        let mut state = MatchState::new();
        state.player_x = 0.0;
        state.ball_pos = Vec2::new(300.0, RETURN_Y + 1.0);
        state.ball_vel = Vec2::new(0.0, 2.0);

        tick(&mut state);
        assert!(!state.game_over);
        assert_eq!(state.score, 0);
        assert_eq!(state.ball_pos.y, RETURN_Y + 3.0);
    }

    #[test]
    fn test_floor_ends_match() {
        let mut state = MatchState::new();
        state.player_x = 0.0;
        state.ball_pos = Vec2::new(300.0, FLOOR_Y - 1.0);
        state.ball_vel = Vec2::new(0.0, 2.0);

        tick(&mut state);
        assert!(state.game_over);
        assert_eq!(state.ball_pos.y, FLOOR_Y);

        // Terminal state is frozen until reset
        let frozen = state.clone();
        tick(&mut state);
        tick(&mut state);
        assert_eq!(state, frozen);

        state.reset();
        assert_eq!(state, MatchState::new());
    }

    #[test]
    fn test_opponent_block_redirects_down() {
        let mut state = MatchState::new();
        state.opponent_x = 150.0;
        state.ball_pos = Vec2::new(160.0, PADDLE_HEIGHT + 1.0);
        state.ball_vel = Vec2::new(0.0, -2.0);

        tick(&mut state);
        assert_eq!(state.ball_vel.y, 2.0);
        assert_eq!(state.ball_pos.y, PADDLE_HEIGHT);
    }

    #[test]
    fn test_opponent_miss_passes_through() {
        // The top band never scores or ends the match: a miss leaves the
        // ball in free flight past the top edge.
        let mut state = MatchState::new();
        state.opponent_x = 0.0;
        state.ball_pos = Vec2::new(300.0, PADDLE_HEIGHT + 1.0);
        state.ball_vel = Vec2::new(0.0, -2.0);

        tick(&mut state);
        assert_eq!(state.ball_vel.y, -2.0);
        assert_eq!(state.ball_pos.y, PADDLE_HEIGHT - 1.0);
        assert!(!state.game_over);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_multiplier_scales_displacement() {
        let mut state = MatchState::new();
        state.ball_pos = Vec2::new(100.0, 160.0);
        state.ball_vel = Vec2::new(2.0, -2.0);
        state.speed_multiplier = 2.0;

        tick(&mut state);
        assert_eq!(state.ball_pos.x, 104.0);
        assert_eq!(state.ball_pos.y, 156.0);
    }

    #[test]
    fn test_ramp_is_monotone_and_ignores_game_over() {
        let mut state = MatchState::new();
        state.game_over = true;

        for n in 1..=30 {
            ramp(&mut state);
            assert!((state.speed_multiplier - (1.0 + 0.1 * n as f32)).abs() < EPS);
        }
    }

    #[test]
    fn test_tracker_converges_within_diff_over_step_ticks() {
        let mut state = MatchState::new();
        state.opponent_x = 0.0;
        // Stationary ball: drive the tracker directly
        state.ball_pos = Vec2::new(308.0, 160.0);

        let target = state.ball_pos.x - (PADDLE_WIDTH - BALL_SIZE) / 2.0;
        let mut gap = (target - state.opponent_x).abs();
        let ticks_needed = (gap / OPPONENT_STEP).ceil() as u32;

        for _ in 0..ticks_needed {
            track_opponent(&mut state);
            let new_gap = (target - state.opponent_x).abs();
            assert!(new_gap <= gap);
            gap = new_gap;
        }
        assert!(gap < EPS);
    }

    #[test]
    fn test_tracker_lags_fast_ball() {
        let mut state = MatchState::new();
        state.opponent_x = 0.0;
        state.ball_pos = Vec2::new(300.0, 160.0);

        track_opponent(&mut state);
        assert_eq!(state.opponent_x, OPPONENT_STEP);
    }

    proptest! {
        /// Bounds invariant: for any pointer input stream, paddles stay in
        /// the field and the ball box stays inside it until the match ends.
        #[test]
        fn prop_bounds_hold(pointer_xs in proptest::collection::vec(-50.0f32..450.0, 1..64)) {
            let mut state = MatchState::new();

            for px in pointer_xs.iter().cycle().take(2000) {
                state.set_player_x(input::paddle_from_pointer(*px));
                tick(&mut state);

                prop_assert!((0.0..=PADDLE_MAX_X).contains(&state.player_x));
                prop_assert!((0.0..=PADDLE_MAX_X).contains(&state.opponent_x));
                prop_assert!((0.0..=FIELD_WIDTH - BALL_SIZE).contains(&state.ball_pos.x));
                prop_assert!((0.0..=FIELD_HEIGHT - BALL_SIZE).contains(&state.ball_pos.y));

                if state.game_over {
                    break;
                }
            }
        }
    }
}
