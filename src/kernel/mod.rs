//! Kernel layer: embeddings, algebra and ranking.
//!
//! The kernel holds the pure, deterministic parts of Vectorscope:
//! - Dense embedding vectors ([`Vector`])
//! - Element-wise arithmetic ([`Algebra`])
//! - Distance metrics ([`Similarity`])
//! - The word → vector mapping ([`EmbeddingStore`]) and built-in [`datasets`]
//! - k-nearest-neighbor ranking ([`NeighborRanker`])
//! - Expression parsing and evaluation ([`ExpressionEvaluator`])
//!
//! This layer has no dependency on [`sequencer`](crate::sequencer) or
//! [`highlevel`](crate::highlevel).
//!
//! # Example
//!
//! ```rust
//! use vectorscope::kernel::{datasets, Expression, ExpressionEvaluator, NeighborRanker};
//!
//! let store = datasets::royalty();
//! let expr: Expression = "king - man + woman".parse().unwrap();
//! let op = ExpressionEvaluator::evaluate(&expr, &store).unwrap();
//! let nearest = NeighborRanker::nearest(&op.result_vector, &store, 3).unwrap();
//! assert_eq!(nearest[0].rank, 1);
//! ```

pub mod algebra;
pub mod datasets;
pub mod expression;
pub mod ranker;
pub mod similarity;
pub mod store;
pub mod vector;

pub use algebra::{Algebra, Operator};
pub use expression::{Expression, ExpressionBuilder, ExpressionEvaluator, VectorOperationResult};
pub use ranker::{NeighborEntry, NeighborRanker};
pub use similarity::{Metric, Similarity};
pub use store::EmbeddingStore;
pub use vector::Vector;
