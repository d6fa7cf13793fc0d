//! Fixed-tick game loop controller
//!
//! Owns the authoritative [`GameState`] and the session's phase machine.
//! Each tick samples input, advances the engine, swaps in the new state
//! whole, and classifies the engine's event into a phase decision. The
//! host scheduler acts on the returned [`TickOutcome`]: stop ticking on
//! a pause or finish, arm the resume timer on a pause, feed the audio
//! dispatcher either way.

use crate::engine::{Engine, GameState, SpecialEvent};
use crate::input::InputAggregator;

/// Phase of one session's loop machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopPhase {
    /// Live gameplay; the tick scheduler is running
    Playing,
    /// A life was just lost; ticking stopped, resume pending
    Paused,
    /// Either player is out of lives. Terminal.
    Finished,
}

/// What one tick produced, for the host scheduler and audio dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    /// Event the engine reported for this tick, if any
    pub event: Option<SpecialEvent>,
    /// Phase after classifying the event
    pub phase: LoopPhase,
}

/// The game loop: engine, current state, phase, and input, all owned
/// by the single writer.
pub struct GameLoop<E> {
    engine: E,
    state: GameState,
    phase: LoopPhase,
    input: InputAggregator,
}

impl<E: Engine> GameLoop<E> {
    /// Start a session: fetch the starting state, run the engine's
    /// one-time bootstrap, and enter `Playing`.
    pub fn new(mut engine: E) -> Self {
        let state = engine.initial_state();
        engine.init();
        Self {
            engine,
            state,
            phase: LoopPhase::Playing,
            input: InputAggregator::new(),
        }
    }

    /// Latest committed state. Readers (renderer, dispatcher) see either
    /// the previous or the new value, never a partial one.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> LoopPhase {
        self.phase
    }

    pub fn key_down(&mut self, key: &str) {
        self.input.key_down(key);
    }

    pub fn key_up(&mut self, key: &str) {
        self.input.key_up(key);
    }

    /// Advance the session by one tick.
    ///
    /// Sampling happens before the advance; the deltas are consumed by
    /// exactly this one advance regardless of what event comes back.
    /// Once `Finished`, ticking is a no-op - the phase is absorbing.
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase == LoopPhase::Finished {
            return TickOutcome {
                event: None,
                phase: LoopPhase::Finished,
            };
        }

        let deltas = self.input.sample();
        self.state = self.engine.advance(&self.state, deltas.p1, deltas.p2);

        let event = self.state.last_special_event;
        if event == Some(SpecialEvent::PlayerDie) {
            if self.state.out_of_lives() {
                // Terminal takes priority over the pause-and-resume cycle
                self.phase = LoopPhase::Finished;
                log::info!(
                    "game over at step {}: P1 {} lives, P2 {} lives",
                    self.state.step,
                    self.state.p1_lives,
                    self.state.p2_lives
                );
            } else {
                self.phase = LoopPhase::Paused;
                log::debug!(
                    "life lost at step {}: P1 {} lives, P2 {} lives",
                    self.state.step,
                    self.state.p1_lives,
                    self.state.p2_lives
                );
            }
        }

        TickOutcome {
            event,
            phase: self.phase,
        }
    }

    /// Resume-timer callback: re-enter play after a non-terminal death.
    /// Does nothing in any other phase.
    pub fn resume(&mut self) {
        if self.phase == LoopPhase::Paused {
            self.phase = LoopPhase::Playing;
            log::debug!("resuming play at step {}", self.state.step);
        }
    }
}
