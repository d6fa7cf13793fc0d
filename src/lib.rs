//! Pong Duel - a two-player Pong client
//!
//! Core modules:
//! - `engine`: Simulation engine boundary (state types + `Engine` trait)
//! - `sim`: Bundled default engine (deterministic ball/paddle physics)
//! - `input`: Held-key tracking and per-tick paddle deltas
//! - `controller`: Fixed-tick game loop and pause/resume/finish machine
//! - `audio`: Event-to-cue mapping and sound playback
//! - `render`: Frame composition and canvas painting

pub mod audio;
pub mod controller;
pub mod engine;
pub mod input;
pub mod render;
pub mod settings;
pub mod sim;

pub use controller::{GameLoop, LoopPhase, TickOutcome};
pub use engine::{Engine, GameState, SpecialEvent};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Simulation tick period in milliseconds (100 Hz)
    pub const TICK_DELAY_MS: i32 = 10;
    /// Delay before play resumes after a lost life, in milliseconds
    pub const PAUSE_TIMEOUT_MS: i32 = 2000;

    /// Logical playfield dimensions
    pub const BASE_WIDTH: f32 = 1200.0;
    pub const BASE_HEIGHT: f32 = 600.0;

    /// Paddle dimensions - paddles sit flush against the side walls
    pub const PADDLE_WIDTH: f32 = 10.0;
    pub const PADDLE_HEIGHT: f32 = 100.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    /// Ball speed at serve, per axis (units per tick)
    pub const BALL_BASE_SPEED: f32 = 6.0;

    /// Vertical distance a held movement key moves a paddle per tick
    pub const PADDLE_STEP: i32 = 10;

    /// Lives each player starts with
    pub const MAX_LIVES: u32 = 5;
}
