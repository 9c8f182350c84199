//! The controller pairing one evaluation with one reveal sequence.
//!
//! [`Visualizer`] owns the only mutable state in the crate: the active
//! [`VectorOperationResult`], its neighbor list and the sequencer. Renderers
//! never touch that state; they subscribe with
//! [`on_stage_change`](Visualizer::on_stage_change) and paint from the
//! [`StageUpdate`] they receive.

use crate::config::VisualizerConfig;
use crate::error::Result;
use crate::kernel::{
    EmbeddingStore, Expression, ExpressionEvaluator, NeighborEntry, NeighborRanker, Vector,
    VectorOperationResult,
};
use crate::sequencer::stage::RESULT_STAGE;
use crate::sequencer::{
    AnimationSequencer, Clock, ManualClock, Reveal, SequenceState, Tick, TimerId, WallClock,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// A neighbor ready to fade in after `delay`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StagedNeighbor {
    pub entry: NeighborEntry,
    pub delay: Duration,
}

/// What a renderer needs to paint one stage.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StageUpdate {
    pub stage: u8,
    pub running: bool,
    pub reveal: Reveal,
    /// The active evaluation; `None` after a clear.
    pub revealed_result: Option<Arc<VectorOperationResult>>,
    /// Empty until the neighbor stage.
    pub revealed_neighbors: Vec<StagedNeighbor>,
}

type Listener = Box<dyn FnMut(&StageUpdate)>;

/// Single owner of the evaluation, neighbor list and sequence.
pub struct Visualizer<C: Clock> {
    store: EmbeddingStore,
    config: VisualizerConfig,
    clock: C,
    sequencer: AnimationSequencer,
    current: Option<Arc<VectorOperationResult>>,
    neighbors: Option<Vec<NeighborEntry>>,
    neighbor_queries: u64,
    listeners: Vec<Listener>,
}

impl<C: Clock> Visualizer<C> {
    pub fn new(store: EmbeddingStore, config: VisualizerConfig, clock: C) -> Result<Self> {
        let sequencer = AnimationSequencer::from_config(&config)?;
        Ok(Self {
            store,
            config,
            clock,
            sequencer,
            current: None,
            neighbors: None,
            neighbor_queries: 0,
            listeners: Vec::new(),
        })
    }

    pub fn store(&self) -> &EmbeddingStore {
        &self.store
    }

    pub fn config(&self) -> &VisualizerConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn state(&self) -> SequenceState {
        self.sequencer.state()
    }

    /// The active evaluation, if any.
    pub fn result(&self) -> Option<&VectorOperationResult> {
        self.current.as_deref()
    }

    /// Neighbors of the active result, once the result stage was reached.
    pub fn neighbors(&self) -> Option<&[NeighborEntry]> {
        self.neighbors.as_deref()
    }

    /// How many neighbor queries have run over this visualizer's lifetime.
    pub fn neighbor_queries(&self) -> u64 {
        self.neighbor_queries
    }

    /// Pure evaluation against the owned store; the sequence is untouched.
    pub fn evaluate(&self, expr: &Expression) -> Result<VectorOperationResult> {
        ExpressionEvaluator::evaluate(expr, &self.store)
    }

    /// Direct neighbor query against the owned store.
    pub fn nearest(&self, vector: &Vector, k: usize) -> Result<Vec<NeighborEntry>> {
        NeighborRanker::nearest(vector, &self.store, k)
    }

    /// Register a stage-change subscriber.
    pub fn on_stage_change(&mut self, listener: impl FnMut(&StageUpdate) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Evaluate `expr` and start a fresh reveal sequence for it.
    ///
    /// A rejected expression returns the error and changes nothing. An
    /// accepted one replaces the previous sequence entirely: its timer is
    /// cancelled and its result and neighbors are dropped before stage 0
    /// is announced.
    pub fn submit(&mut self, expr: &Expression) -> Result<()> {
        let operation = match self.evaluate(expr) {
            Ok(op) => op,
            Err(e) => {
                tracing::warn!(expression = %expr, error = %e, "expression rejected");
                return Err(e);
            }
        };

        self.discard();
        self.current = Some(Arc::new(operation));
        self.sequencer.start(&mut self.clock);
        self.notify();
        Ok(())
    }

    /// Stop the sequence and drop the result and neighbors.
    pub fn clear(&mut self) {
        self.discard();
        self.notify();
    }

    /// Route a fired timer to the sequencer.
    ///
    /// On entering the result stage the neighbor list is computed, once
    /// per submitted expression. Subscribers hear every advance and the
    /// final tick that stops the sequence.
    pub fn on_timer(&mut self, id: TimerId) -> Result<Tick> {
        let tick = self.sequencer.on_timer(id, &mut self.clock);

        match tick {
            Tick::Advanced(stage) => {
                if stage >= RESULT_STAGE && self.neighbors.is_none() {
                    if let Some(op) = self.current.clone() {
                        let ranked = NeighborRanker::nearest(
                            &op.result_vector,
                            &self.store,
                            self.config.neighbor_count,
                        )?;
                        self.neighbor_queries += 1;
                        self.neighbors = Some(ranked);
                    }
                }
                self.notify();
            }
            Tick::Finished => self.notify(),
            Tick::Idle => {}
        }
        Ok(tick)
    }

    /// The update a subscriber would receive right now.
    pub fn snapshot(&self) -> StageUpdate {
        let state = self.sequencer.state();
        let reveal = match self.current {
            Some(_) => self.sequencer.reveal(),
            None => Reveal::hidden(),
        };

        let revealed_neighbors = match (&self.neighbors, reveal.neighbors) {
            (Some(list), true) => {
                let step = self.config.neighbor_stagger();
                list.iter()
                    .enumerate()
                    .map(|(i, entry)| StagedNeighbor {
                        entry: entry.clone(),
                        delay: step * i as u32,
                    })
                    .collect()
            }
            _ => Vec::new(),
        };

        StageUpdate {
            stage: state.current_stage,
            running: state.running,
            reveal,
            revealed_result: self.current.clone(),
            revealed_neighbors,
        }
    }

    fn discard(&mut self) {
        self.sequencer.reset(&mut self.clock);
        self.current = None;
        self.neighbors = None;
    }

    fn notify(&mut self) {
        if self.listeners.is_empty() {
            return;
        }
        let update = self.snapshot();
        for listener in self.listeners.iter_mut() {
            listener(&update);
        }
    }
}

impl Visualizer<ManualClock> {
    /// Advance the manual clock by `by`, delivering every timer that comes
    /// due on the way, including ones scheduled while handling a fire.
    pub fn advance(&mut self, by: Duration) -> Result<Vec<Tick>> {
        let until = self.clock.now() + by;
        let mut ticks = Vec::new();
        while let Some(id) = self.clock.step(until) {
            ticks.push(self.on_timer(id)?);
        }
        Ok(ticks)
    }
}

impl Visualizer<WallClock> {
    /// Deliver every timer that is due by now.
    pub fn poll(&mut self) -> Result<Vec<Tick>> {
        let mut ticks = Vec::new();
        for id in self.clock.poll() {
            ticks.push(self.on_timer(id)?);
        }
        Ok(ticks)
    }

    /// Time until the next pending advance.
    pub fn until_next(&self) -> Option<Duration> {
        self.clock.until_next()
    }
}
