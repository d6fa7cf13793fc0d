//! Frame composition and canvas painting
//!
//! [`compose`] reduces the current state and phase to a [`Frame`]
//! snapshot; the canvas painter draws whatever it is handed. Both are
//! strictly readers - the render side never touches game state.

use glam::Vec2;

use crate::controller::LoopPhase;
use crate::engine::GameState;

#[cfg(target_arch = "wasm32")]
use crate::consts::*;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
#[cfg(target_arch = "wasm32")]
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Everything one frame draws.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    /// Terminal card: the game-over message alone
    GameOver,
    /// Live table
    Table {
        p1_paddle: f32,
        p2_paddle: f32,
        p1_lives: u32,
        p2_lives: u32,
        /// Ball position while playing; `None` shows the ready message
        ball: Option<Vec2>,
    },
}

/// Compose the frame for the current state and phase.
pub fn compose(state: &GameState, phase: LoopPhase) -> Frame {
    match phase {
        LoopPhase::Finished => Frame::GameOver,
        LoopPhase::Playing | LoopPhase::Paused => Frame::Table {
            p1_paddle: state.p1_paddle,
            p2_paddle: state.p2_paddle,
            p1_lives: state.p1_lives,
            p2_lives: state.p2_lives,
            ball: (phase == LoopPhase::Playing).then_some(state.ball),
        },
    }
}

/// Draws frames onto the 2D canvas.
#[cfg(target_arch = "wasm32")]
pub struct CanvasPainter {
    ctx: CanvasRenderingContext2d,
}

#[cfg(target_arch = "wasm32")]
impl CanvasPainter {
    pub fn new(canvas: &HtmlCanvasElement) -> Self {
        let ctx = canvas
            .get_context("2d")
            .expect("2d context unavailable")
            .expect("2d context unavailable")
            .dyn_into::<CanvasRenderingContext2d>()
            .expect("not a 2d context");
        Self { ctx }
    }

    /// Clear the surface and draw one frame. Text/arc failures are
    /// cosmetic and ignored.
    pub fn paint(&self, frame: &Frame) {
        let ctx = &self.ctx;
        ctx.clear_rect(0.0, 0.0, BASE_WIDTH as f64, BASE_HEIGHT as f64);

        match frame {
            Frame::GameOver => {
                ctx.set_font("48px sans-serif");
                ctx.set_fill_style_str("rgb(196, 235, 101)");
                ctx.set_text_align("center");
                let _ = ctx.fill_text(
                    "Game Over!",
                    (BASE_WIDTH / 2.0) as f64,
                    (BASE_HEIGHT / 2.0) as f64,
                );
            }
            Frame::Table {
                p1_paddle,
                p2_paddle,
                p1_lives,
                p2_lives,
                ball,
            } => {
                ctx.set_fill_style_str("rgb(160, 61, 217)");
                ctx.fill_rect(
                    0.0,
                    (p1_paddle - PADDLE_HEIGHT / 2.0) as f64,
                    PADDLE_WIDTH as f64,
                    PADDLE_HEIGHT as f64,
                );
                ctx.fill_rect(
                    (BASE_WIDTH - PADDLE_WIDTH) as f64,
                    (p2_paddle - PADDLE_HEIGHT / 2.0) as f64,
                    PADDLE_WIDTH as f64,
                    PADDLE_HEIGHT as f64,
                );

                match ball {
                    Some(pos) => {
                        ctx.set_fill_style_str("white");
                        ctx.begin_path();
                        let _ = ctx.arc(
                            pos.x as f64,
                            pos.y as f64,
                            BALL_RADIUS as f64,
                            0.0,
                            std::f64::consts::TAU,
                        );
                        ctx.fill();
                    }
                    None => {
                        ctx.set_font("48px sans-serif");
                        ctx.set_fill_style_str("rgb(96, 235, 101)");
                        ctx.set_text_align("center");
                        let _ = ctx.fill_text(
                            "Get Ready!",
                            (BASE_WIDTH / 2.0) as f64,
                            (BASE_HEIGHT / 2.0) as f64,
                        );
                    }
                }

                ctx.set_font("20px sans-serif");
                ctx.set_fill_style_str("rgb(255, 255, 20)");
                ctx.set_text_align("left");
                let _ = ctx.fill_text(&"❤️ ".repeat(*p1_lives as usize), 0.0, 30.0);
                ctx.set_text_align("right");
                let _ = ctx.fill_text(&"❤️ ".repeat(*p2_lives as usize), BASE_WIDTH as f64, 30.0);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> GameState {
        GameState {
            p1_paddle: 250.0,
            p2_paddle: 350.0,
            p1_lives: 3,
            p2_lives: 2,
            ball: Vec2::new(640.0, 280.0),
            ball_vel: Vec2::new(6.0, -6.0),
            step: 42,
            last_special_event: None,
        }
    }

    #[test]
    fn test_playing_frame_shows_ball() {
        let frame = compose(&state(), LoopPhase::Playing);
        assert_eq!(
            frame,
            Frame::Table {
                p1_paddle: 250.0,
                p2_paddle: 350.0,
                p1_lives: 3,
                p2_lives: 2,
                ball: Some(Vec2::new(640.0, 280.0)),
            }
        );
    }

    #[test]
    fn test_paused_frame_hides_ball() {
        let frame = compose(&state(), LoopPhase::Paused);
        match frame {
            Frame::Table { ball, p1_lives, .. } => {
                assert_eq!(ball, None);
                // Paddles and lives still drawn while waiting
                assert_eq!(p1_lives, 3);
            }
            other => panic!("expected a table frame, got {:?}", other),
        }
    }

    #[test]
    fn test_finished_frame_is_message_only() {
        assert_eq!(compose(&state(), LoopPhase::Finished), Frame::GameOver);
    }
}
