//! Simulation engine boundary
//!
//! The game loop drives the simulation through the narrow [`Engine`]
//! trait and never looks inside it. Tests substitute a scripted engine;
//! the shipped binary plugs in [`crate::sim::DuelSim`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Out-of-band event reported by the engine for a single tick.
///
/// Serialized as SCREAMING_SNAKE_CASE tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpecialEvent {
    /// Ball bounced off the top or bottom wall
    EdgeCollision,
    /// Ball got past a paddle and a life was lost
    PlayerDie,
    /// Ball bounced off a paddle
    PaddleCollision,
}

/// Complete game state for one tick.
///
/// Immutable per tick: [`Engine::advance`] builds a fresh value and the
/// controller swaps it in whole. Nothing outside the engine mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Vertical center of each paddle
    pub p1_paddle: f32,
    pub p2_paddle: f32,
    /// Remaining lives per player
    pub p1_lives: u32,
    pub p2_lives: u32,
    /// Ball center position
    pub ball: Vec2,
    /// Ball velocity (units per tick)
    pub ball_vel: Vec2,
    /// Tick counter since session start
    pub step: u64,
    /// Event produced by the most recent tick, if any
    pub last_special_event: Option<SpecialEvent>,
}

impl GameState {
    /// True once either player has run out of lives.
    pub fn out_of_lives(&self) -> bool {
        self.p1_lives == 0 || self.p2_lives == 0
    }
}

/// The external simulation boundary: three operations, nothing else.
///
/// `advance` is a pure transition from the controller's point of view -
/// it returns a new state, leaves the input untouched, and is
/// deterministic given identical inputs. Engine faults are fatal to the
/// session and propagate as panics; there is no partial state to
/// recover to.
pub trait Engine {
    /// One-time bootstrap, called once before the first tick.
    fn init(&mut self);

    /// Produce the starting state for a session. Called once.
    fn initial_state(&mut self) -> GameState;

    /// Advance `state` by one tick given both paddle deltas.
    fn advance(&mut self, state: &GameState, p1_delta: i32, p2_delta: i32) -> GameState;
}
