//! Held-key tracking and per-tick paddle deltas
//!
//! Key handlers flip held-state as events arrive (last event wins, no
//! queuing); once per tick the controller calls [`InputAggregator::sample`]
//! to turn whatever is held right now into one delta per paddle.

use std::collections::HashSet;

use crate::consts::PADDLE_STEP;

/// Movement key assignments for both players.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    pub p1_up: String,
    pub p1_down: String,
    pub p2_up: String,
    pub p2_down: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            p1_up: "w".to_string(),
            p1_down: "s".to_string(),
            p2_up: "i".to_string(),
            p2_down: "k".to_string(),
        }
    }
}

/// Paddle deltas for one tick. Produced fresh by each [`sample`] call,
/// consumed by exactly one engine advance, then discarded.
///
/// [`sample`]: InputAggregator::sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputDeltas {
    pub p1: i32,
    pub p2: i32,
}

/// Tracks currently-held keys for one session.
#[derive(Debug, Default)]
pub struct InputAggregator {
    bindings: KeyBindings,
    held: HashSet<String>,
}

impl InputAggregator {
    /// Aggregator with the default W/S and I/K bindings.
    pub fn new() -> Self {
        Self::with_bindings(KeyBindings::default())
    }

    pub fn with_bindings(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            held: HashSet::new(),
        }
    }

    pub fn key_down(&mut self, key: &str) {
        self.held.insert(key.to_string());
    }

    pub fn key_up(&mut self, key: &str) {
        self.held.remove(key);
    }

    /// Convert the held keys into one delta per paddle.
    ///
    /// Each player's axis is evaluated independently, up key first, so
    /// holding both directions moves the paddle up. Reads only; the
    /// held table is mutated solely by the key handlers.
    pub fn sample(&self) -> InputDeltas {
        InputDeltas {
            p1: self.axis(&self.bindings.p1_up, &self.bindings.p1_down),
            p2: self.axis(&self.bindings.p2_up, &self.bindings.p2_down),
        }
    }

    fn axis(&self, up: &str, down: &str) -> i32 {
        if self.held.contains(up) {
            -PADDLE_STEP
        } else if self.held.contains(down) {
            PADDLE_STEP
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_idle_sample_is_zero() {
        let input = InputAggregator::new();
        assert_eq!(input.sample(), InputDeltas::default());
    }

    #[test]
    fn test_held_keys_move_paddles() {
        let mut input = InputAggregator::new();
        input.key_down("w");
        input.key_down("k");

        let deltas = input.sample();
        assert_eq!(deltas.p1, -PADDLE_STEP);
        assert_eq!(deltas.p2, PADDLE_STEP);
    }

    #[test]
    fn test_release_stops_movement() {
        let mut input = InputAggregator::new();
        input.key_down("s");
        assert_eq!(input.sample().p1, PADDLE_STEP);

        input.key_up("s");
        assert_eq!(input.sample().p1, 0);
    }

    #[test]
    fn test_sampling_does_not_accumulate() {
        let mut input = InputAggregator::new();
        input.key_down("w");

        // One step's worth per sample, however often it is read
        assert_eq!(input.sample().p1, -PADDLE_STEP);
        assert_eq!(input.sample().p1, -PADDLE_STEP);
    }

    #[test]
    fn test_up_wins_simultaneous_hold() {
        let mut input = InputAggregator::new();
        input.key_down("w");
        input.key_down("s");
        assert_eq!(input.sample().p1, -PADDLE_STEP);

        input.key_down("i");
        input.key_down("k");
        assert_eq!(input.sample().p2, -PADDLE_STEP);
    }

    #[test]
    fn test_unbound_keys_are_ignored() {
        let mut input = InputAggregator::new();
        input.key_down("x");
        input.key_down(" ");
        assert_eq!(input.sample(), InputDeltas::default());
    }

    #[test]
    fn test_custom_bindings() {
        let mut input = InputAggregator::with_bindings(KeyBindings {
            p1_up: "ArrowUp".to_string(),
            p1_down: "ArrowDown".to_string(),
            ..Default::default()
        });
        input.key_down("ArrowUp");
        assert_eq!(input.sample().p1, -PADDLE_STEP);
    }

    proptest! {
        #[test]
        fn test_up_priority_for_any_held_combination(
            s_held in any::<bool>(),
            i_held in any::<bool>(),
            k_held in any::<bool>(),
        ) {
            let mut input = InputAggregator::new();
            input.key_down("w");
            if s_held { input.key_down("s"); }
            if i_held { input.key_down("i"); }
            if k_held { input.key_down("k"); }

            // P1 up is held: its delta is the up step no matter what
            // else is down
            prop_assert_eq!(input.sample().p1, -PADDLE_STEP);
        }

        #[test]
        fn test_player_axes_are_independent(
            w_held in any::<bool>(),
            s_held in any::<bool>(),
        ) {
            let mut input = InputAggregator::new();
            if w_held { input.key_down("w"); }
            if s_held { input.key_down("s"); }
            input.key_down("k");

            // P2's delta never depends on P1's keys
            prop_assert_eq!(input.sample().p2, PADDLE_STEP);
        }
    }
}
