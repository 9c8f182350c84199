//! High-level controller.
//!
//! This layer provides [`Visualizer`], which owns an
//! [`EmbeddingStore`](crate::kernel::EmbeddingStore), the active evaluation
//! and an [`AnimationSequencer`](crate::sequencer::AnimationSequencer), and
//! publishes [`StageUpdate`]s to renderers.
//!
//! For evaluation or ranking without a reveal sequence, use the
//! [`kernel`](crate::kernel) directly.

pub mod visualizer;

pub use visualizer::{StageUpdate, StagedNeighbor, Visualizer};
