//! Bundled default simulation engine
//!
//! Straight Pong physics behind the [`Engine`] boundary: paddle motion
//! with clamping, ball integration, paddle/edge/goal collision
//! classification, and a bounded "chaos" jitter on every rebound so
//! rallies don't settle into loops. All randomness comes from a `Pcg32`
//! seeded by the session seed and the tick counter, so `advance` is
//! deterministic given identical inputs.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::engine::{Engine, GameState, SpecialEvent};

/// Default two-player Pong engine.
pub struct DuelSim {
    seed: u64,
}

impl DuelSim {
    /// Create an engine for one session with the given seed.
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    fn rng_at(&self, step: u64) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed.wrapping_add(step))
    }
}

impl Engine for DuelSim {
    fn init(&mut self) {
        log::info!("simulation engine ready (seed {})", self.seed);
    }

    fn initial_state(&mut self) -> GameState {
        let mut rng = self.rng_at(0);
        GameState {
            p1_paddle: chaos(&mut rng, BASE_HEIGHT / 2.0),
            p2_paddle: chaos(&mut rng, BASE_HEIGHT / 2.0),
            p1_lives: MAX_LIVES,
            p2_lives: MAX_LIVES,
            ball: Vec2::new(BASE_WIDTH / 2.0, BASE_HEIGHT / 2.0),
            ball_vel: Vec2::splat(BALL_BASE_SPEED),
            step: 0,
            last_special_event: None,
        }
    }

    fn advance(&mut self, state: &GameState, p1_delta: i32, p2_delta: i32) -> GameState {
        let mut rng = self.rng_at(state.step);
        let mut next = state.clone();
        next.step += 1;

        next.p1_paddle = (state.p1_paddle + p1_delta as f32).clamp(0.0, BASE_HEIGHT);
        next.p2_paddle = (state.p2_paddle + p2_delta as f32).clamp(0.0, BASE_HEIGHT);

        next.ball = state.ball + state.ball_vel;

        let left_hit = next.ball.x - BALL_RADIUS < PADDLE_WIDTH
            && (next.ball.y - next.p1_paddle).abs() * 2.0 < PADDLE_HEIGHT;
        let right_hit = next.ball.x + BALL_RADIUS > BASE_WIDTH - PADDLE_WIDTH
            && (next.ball.y - next.p2_paddle).abs() * 2.0 < PADDLE_HEIGHT;
        let top_hit = next.ball.y < 0.0;
        let bottom_hit = next.ball.y > BASE_HEIGHT;

        if left_hit || right_hit {
            next.ball_vel.x = chaos(&mut rng, -state.ball_vel.x);
            next.ball_vel.y = chaos(&mut rng, next.ball_vel.y);
            next.last_special_event = Some(SpecialEvent::PaddleCollision);

            // Snap the ball back out of the paddle
            next.ball.x = if left_hit {
                PADDLE_WIDTH * 2.0
            } else {
                BASE_WIDTH - PADDLE_WIDTH * 2.0
            };
        } else if top_hit || bottom_hit {
            next.ball_vel.y = chaos(&mut rng, -next.ball_vel.y);
            next.ball_vel.x = chaos(&mut rng, next.ball_vel.x);
            next.last_special_event = Some(SpecialEvent::EdgeCollision);

            next.ball.y = if top_hit { 0.0 } else { BASE_HEIGHT };
        } else if next.ball.x <= 5.0 || next.ball.x > BASE_WIDTH {
            if next.ball.x <= 5.0 {
                next.p1_lives = next.p1_lives.saturating_sub(1);
            } else {
                next.p2_lives = next.p2_lives.saturating_sub(1);
            }

            // Re-serve from (roughly) the center
            next.ball.x = chaos(&mut rng, BASE_WIDTH / 2.0);
            next.ball.y = chaos(&mut rng, BASE_HEIGHT / 2.0);
            next.ball_vel = Vec2::splat(BALL_BASE_SPEED);
            next.last_special_event = Some(SpecialEvent::PlayerDie);
        } else {
            next.last_special_event = None;
        }

        next
    }
}

/// Nudge a value by up to 20% of its magnitude. Values too small to
/// jitter meaningfully pass through unchanged.
fn chaos(rng: &mut Pcg32, value: f32) -> f32 {
    if value.abs() <= 2.0 {
        return value;
    }
    let spread = value.abs() * 0.2;
    value + rng.random_range(-spread..=spread)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mid_state() -> GameState {
        GameState {
            p1_paddle: 300.0,
            p2_paddle: 300.0,
            p1_lives: MAX_LIVES,
            p2_lives: MAX_LIVES,
            ball: Vec2::new(600.0, 300.0),
            ball_vel: Vec2::new(6.0, 6.0),
            step: 0,
            last_special_event: None,
        }
    }

    #[test]
    fn test_quiet_tick_has_no_event() {
        let mut sim = DuelSim::new(1);
        let s0 = mid_state();
        let s1 = sim.advance(&s0, 0, 0);

        assert_eq!(s1.step, 1);
        assert_eq!(s1.last_special_event, None);
        assert_eq!(s1.ball, Vec2::new(606.0, 306.0));
        // Input state untouched
        assert_eq!(s0.ball, Vec2::new(600.0, 300.0));
    }

    #[test]
    fn test_paddles_clamped_to_field() {
        let mut sim = DuelSim::new(1);
        let mut s0 = mid_state();
        s0.p1_paddle = 5.0;
        s0.p2_paddle = 595.0;

        let s1 = sim.advance(&s0, -100, 100);
        assert_eq!(s1.p1_paddle, 0.0);
        assert_eq!(s1.p2_paddle, BASE_HEIGHT);
    }

    #[test]
    fn test_paddle_collision_reflects_ball() {
        let mut sim = DuelSim::new(7);
        let mut s0 = mid_state();
        s0.p1_paddle = 100.0;
        s0.ball = Vec2::new(25.0, 100.0);
        s0.ball_vel = Vec2::new(-6.0, 0.0);

        let s1 = sim.advance(&s0, 0, 0);
        assert_eq!(s1.last_special_event, Some(SpecialEvent::PaddleCollision));
        // Snapped clear of the paddle, moving back toward the field
        assert_eq!(s1.ball.x, PADDLE_WIDTH * 2.0);
        assert!(s1.ball_vel.x > 0.0);
        // Jitter is bounded to 20%
        assert!(s1.ball_vel.x >= 4.8 && s1.ball_vel.x <= 7.2);
    }

    #[test]
    fn test_edge_collision_reflects_ball() {
        let mut sim = DuelSim::new(7);
        let mut s0 = mid_state();
        s0.ball = Vec2::new(600.0, 4.0);
        s0.ball_vel = Vec2::new(6.0, -6.0);

        let s1 = sim.advance(&s0, 0, 0);
        assert_eq!(s1.last_special_event, Some(SpecialEvent::EdgeCollision));
        assert_eq!(s1.ball.y, 0.0);
        assert!(s1.ball_vel.y > 0.0);
    }

    #[test]
    fn test_missed_ball_costs_a_life_and_reserves() {
        let mut sim = DuelSim::new(7);
        let mut s0 = mid_state();
        // Ball heading past P1 well clear of the paddle
        s0.ball = Vec2::new(8.0, 100.0);
        s0.ball_vel = Vec2::new(-6.0, 0.0);

        let s1 = sim.advance(&s0, 0, 0);
        assert_eq!(s1.last_special_event, Some(SpecialEvent::PlayerDie));
        assert_eq!(s1.p1_lives, MAX_LIVES - 1);
        assert_eq!(s1.p2_lives, MAX_LIVES);
        // Re-served near the center at base speed
        assert!(s1.ball.x >= 480.0 && s1.ball.x <= 720.0);
        assert!(s1.ball.y >= 240.0 && s1.ball.y <= 360.0);
        assert_eq!(s1.ball_vel, Vec2::splat(BALL_BASE_SPEED));
    }

    #[test]
    fn test_advance_is_deterministic() {
        let mut a = DuelSim::new(99999);
        let mut b = DuelSim::new(99999);

        let mut sa = a.initial_state();
        let mut sb = b.initial_state();
        for (dp1, dp2) in [(10, 0), (0, -10), (-10, 10), (0, 0)] {
            sa = a.advance(&sa, dp1, dp2);
            sb = b.advance(&sb, dp1, dp2);
        }

        assert_eq!(sa.ball, sb.ball);
        assert_eq!(sa.ball_vel, sb.ball_vel);
        assert_eq!(sa.p1_paddle, sb.p1_paddle);
        assert_eq!(sa.step, sb.step);
    }
}
