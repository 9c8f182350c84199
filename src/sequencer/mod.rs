//! Sequencer layer: staged reveal driven by an injected clock.
//!
//! - [`Clock`] — schedule/cancel capability, with [`ManualClock`] for
//!   tests and [`WallClock`] for real time
//! - [`Reveal`] — which layers are visible at a stage
//! - [`AnimationSequencer`] — the stage machine itself
//!
//! Depends only on the crate config; the kernel knows nothing about it.

pub mod clock;
pub mod machine;
pub mod stage;

pub use clock::{Clock, ManualClock, TimerId, WallClock};
pub use machine::{AnimationSequencer, SequenceState, Tick};
pub use stage::Reveal;
