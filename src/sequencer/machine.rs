//! Timer-driven stage machine.
//!
//! The sequencer owns the [`SequenceState`] and at most one pending timer.
//! Only three transitions touch the state:
//! - `start`: cancel any pending timer, go to stage 0, schedule the first advance
//! - `tick` (driven by `on_timer`): below the final stage advance by one;
//!   at the final stage stop without changing the stage
//! - `reset`: cancel the timer and return to `{stage 0, not running}`
//!
//! Timer fires that do not match the pending timer are dropped, so a
//! fire left over from an earlier sequence can never advance a new one.

use crate::config::VisualizerConfig;
use crate::error::{Result, VectorscopeError};
use crate::sequencer::clock::{Clock, TimerId};
use crate::sequencer::stage::{Reveal, MAX_FINAL_STAGE, MIN_FINAL_STAGE};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Position of the active sequence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceState {
    pub current_stage: u8,
    pub running: bool,
}

/// Outcome of one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// Moved to the contained stage.
    Advanced(u8),
    /// Was at the final stage; the sequence stopped.
    Finished,
    /// Nothing to do: not running, or the fire was stale.
    Idle,
}

/// Finite-state reveal sequencer.
#[derive(Debug)]
pub struct AnimationSequencer {
    final_stage: u8,
    interval: Duration,
    state: SequenceState,
    timer: Option<TimerId>,
}

impl AnimationSequencer {
    pub fn new(final_stage: u8, interval: Duration) -> Result<Self> {
        if !(MIN_FINAL_STAGE..=MAX_FINAL_STAGE).contains(&final_stage) {
            return Err(VectorscopeError::InvalidConfig(format!(
                "final_stage must be {} or {}, got {}",
                MIN_FINAL_STAGE, MAX_FINAL_STAGE, final_stage
            )));
        }
        if interval.is_zero() {
            return Err(VectorscopeError::InvalidConfig(
                "interval must be positive".to_string(),
            ));
        }

        Ok(Self {
            final_stage,
            interval,
            state: SequenceState::default(),
            timer: None,
        })
    }

    pub fn from_config(config: &VisualizerConfig) -> Result<Self> {
        config.validate()?;
        Self::new(config.final_stage, config.interval())
    }

    pub fn state(&self) -> SequenceState {
        self.state
    }

    pub fn current_stage(&self) -> u8 {
        self.state.current_stage
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn final_stage(&self) -> u8 {
        self.final_stage
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// The pending advancement timer, if any.
    pub fn active_timer(&self) -> Option<TimerId> {
        self.timer
    }

    /// Layers visible at the current stage.
    pub fn reveal(&self) -> Reveal {
        Reveal::at(self.state.current_stage, self.final_stage)
    }

    /// Begin a new sequence at stage 0.
    pub fn start(&mut self, clock: &mut dyn Clock) {
        self.cancel_timer(clock);
        self.state = SequenceState {
            current_stage: 0,
            running: true,
        };
        self.timer = Some(clock.schedule(self.interval));
        tracing::debug!(final_stage = self.final_stage, "sequence started");
    }

    /// Stop and return to `{stage 0, not running}`.
    pub fn reset(&mut self, clock: &mut dyn Clock) {
        self.cancel_timer(clock);
        self.state = SequenceState::default();
    }

    /// Apply one transition without touching any timer.
    pub fn tick(&mut self) -> Tick {
        if !self.state.running {
            return Tick::Idle;
        }
        if self.state.current_stage < self.final_stage {
            self.state.current_stage += 1;
            Tick::Advanced(self.state.current_stage)
        } else {
            self.state.running = false;
            Tick::Finished
        }
    }

    /// Handle a fired timer: tick, then schedule the next advance while
    /// the sequence is still running.
    pub fn on_timer(&mut self, id: TimerId, clock: &mut dyn Clock) -> Tick {
        if self.timer != Some(id) {
            tracing::warn!(timer = id.raw(), "ignoring stale sequencer timer");
            return Tick::Idle;
        }
        self.timer = None;

        let outcome = self.tick();
        if self.state.running {
            self.timer = Some(clock.schedule(self.interval));
        }
        tracing::debug!(stage = self.state.current_stage, ?outcome, "sequencer tick");
        outcome
    }

    fn cancel_timer(&mut self, clock: &mut dyn Clock) {
        if let Some(id) = self.timer.take() {
            clock.cancel(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequencer::clock::ManualClock;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    const INTERVAL: Duration = Duration::from_millis(1500);

    fn fire(seq: &mut AnimationSequencer, clock: &mut ManualClock) -> Vec<Tick> {
        let mut ticks = Vec::new();
        for id in clock.advance(INTERVAL) {
            ticks.push(seq.on_timer(id, clock));
        }
        ticks
    }

    #[test]
    fn test_initial_state() {
        let seq = AnimationSequencer::new(5, INTERVAL).unwrap();
        assert_eq!(seq.state(), SequenceState { current_stage: 0, running: false });
        assert!(seq.active_timer().is_none());
    }

    #[test]
    fn test_reduced_variant_stops_after_final_tick() {
        let mut clock = ManualClock::new();
        let mut seq = AnimationSequencer::new(4, INTERVAL).unwrap();
        seq.start(&mut clock);
        assert_eq!(seq.current_stage(), 0);

        for expected in 1..=4 {
            assert_eq!(fire(&mut seq, &mut clock), vec![Tick::Advanced(expected)]);
        }
        assert!(seq.is_running());

        assert_eq!(fire(&mut seq, &mut clock), vec![Tick::Finished]);
        assert_eq!(seq.state(), SequenceState { current_stage: 4, running: false });
        assert!(seq.active_timer().is_none());
        assert_eq!(clock.pending(), 0);

        // sixth interval: nothing scheduled, nothing changes
        assert!(fire(&mut seq, &mut clock).is_empty());
        assert_eq!(seq.tick(), Tick::Idle);
        assert_eq!(seq.current_stage(), 4);
    }

    #[test]
    fn test_full_variant_reaches_neighbor_stage() {
        let mut clock = ManualClock::new();
        let mut seq = AnimationSequencer::new(5, INTERVAL).unwrap();
        seq.start(&mut clock);

        let ticks: Vec<Tick> = (0..7).flat_map(|_| fire(&mut seq, &mut clock)).collect();
        assert_eq!(
            ticks,
            vec![
                Tick::Advanced(1),
                Tick::Advanced(2),
                Tick::Advanced(3),
                Tick::Advanced(4),
                Tick::Advanced(5),
                Tick::Finished,
            ]
        );
        assert!(seq.reveal().neighbors);
    }

    #[test]
    fn test_no_advance_before_interval() {
        let mut clock = ManualClock::new();
        let mut seq = AnimationSequencer::new(5, INTERVAL).unwrap();
        seq.start(&mut clock);

        assert!(clock.advance(INTERVAL - Duration::from_millis(1)).is_empty());
        assert_eq!(seq.current_stage(), 0);
    }

    #[test]
    fn test_reset_at_any_stage() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..20 {
            let mut clock = ManualClock::new();
            let mut seq = AnimationSequencer::new(5, INTERVAL).unwrap();
            seq.start(&mut clock);

            let stage: u8 = rng.gen_range(1..=6);
            for _ in 0..stage {
                fire(&mut seq, &mut clock);
            }

            seq.reset(&mut clock);
            assert_eq!(seq.state(), SequenceState { current_stage: 0, running: false });
            assert!(seq.active_timer().is_none());
            assert_eq!(clock.pending(), 0);
        }
    }

    #[test]
    fn test_restart_cancels_previous_timer() {
        let mut clock = ManualClock::new();
        let mut seq = AnimationSequencer::new(5, INTERVAL).unwrap();
        seq.start(&mut clock);
        fire(&mut seq, &mut clock);
        fire(&mut seq, &mut clock);
        let old = seq.active_timer().unwrap();

        seq.start(&mut clock);
        assert_eq!(seq.current_stage(), 0);
        assert_eq!(clock.pending(), 1);
        assert_ne!(seq.active_timer(), Some(old));

        // a fire carrying the old id is ignored
        assert_eq!(seq.on_timer(old, &mut clock), Tick::Idle);
        assert_eq!(seq.current_stage(), 0);
    }

    #[test]
    fn test_rejects_bad_configuration() {
        assert!(AnimationSequencer::new(3, INTERVAL).is_err());
        assert!(AnimationSequencer::new(6, INTERVAL).is_err());
        assert!(AnimationSequencer::new(5, Duration::ZERO).is_err());
        assert!(AnimationSequencer::from_config(&VisualizerConfig::reduced()).is_ok());
    }
}
