//! # Vectorscope: Staged Word-Embedding Arithmetic
//!
//! Vectorscope evaluates analogy expressions such as `king - queen + prince`
//! over a word-embedding store, ranks the nearest words to the result, and
//! sequences a timed, stage-by-stage reveal of the computation for a
//! renderer to paint.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::time::Duration;
//! use vectorscope::{datasets, Expression, ManualClock, Visualizer, VisualizerConfig};
//!
//! let mut vis = Visualizer::new(
//!     datasets::royalty(),
//!     VisualizerConfig::default(),
//!     ManualClock::new(),
//! )?;
//!
//! vis.on_stage_change(|update| println!("stage {}", update.stage));
//! let expr: Expression = "king - queen + prince".parse()?;
//! vis.submit(&expr)?;
//!
//! // Four intervals later the result marker is up and neighbors are ranked
//! vis.advance(Duration::from_millis(1500 * 4))?;
//! assert_eq!(vis.state().current_stage, 4);
//! assert_eq!(vis.neighbors().unwrap()[0].word, "king");
//! # Ok::<(), vectorscope::VectorscopeError>(())
//! ```
//!
//! ## Core Concepts
//!
//! - **Direction vector**: `word1 op1 word2`, a semantic offset
//! - **Base vector**: the embedding the direction is applied to
//! - **Result vector**: `base op2 direction`
//! - **Stage**: one cumulative reveal step; see [`sequencer::stage`]

pub mod config;
pub mod error;
pub mod highlevel;
pub mod kernel;
pub mod sequencer;

// Re-exports for convenience
pub use config::VisualizerConfig;
pub use error::{Result, VectorscopeError};
pub use highlevel::{StageUpdate, StagedNeighbor, Visualizer};
pub use kernel::datasets;
pub use kernel::{
    Algebra, EmbeddingStore, Expression, ExpressionBuilder, ExpressionEvaluator, Metric,
    NeighborEntry, NeighborRanker, Operator, Similarity, Vector, VectorOperationResult,
};
pub use sequencer::{
    AnimationSequencer, Clock, ManualClock, Reveal, SequenceState, Tick, TimerId, WallClock,
};
