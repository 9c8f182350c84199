//! Stage table for the reveal sequence.
//!
//! | stage | newly revealed |
//! |-------|----------------|
//! | 0 | source word markers |
//! | 1 | direction arrow between word1 and word2 |
//! | 2 | base marker |
//! | 3 | transformed arrow on the base; the original arrow fades |
//! | 4 | result marker, neighbor query runs |
//! | 5 | neighbor markers, staggered fade-in |
//!
//! Stages are cumulative: nothing revealed is hidden again before a reset.
//! With a final stage of 4 the neighbors come in together with the result.

use serde::{Deserialize, Serialize};

pub const DIRECTION_STAGE: u8 = 1;
pub const BASE_STAGE: u8 = 2;
pub const TRANSFORM_STAGE: u8 = 3;
pub const RESULT_STAGE: u8 = 4;
pub const NEIGHBOR_STAGE: u8 = 5;

/// Smallest supported final stage (reduced variant).
pub const MIN_FINAL_STAGE: u8 = RESULT_STAGE;
/// Largest supported final stage (full variant).
pub const MAX_FINAL_STAGE: u8 = NEIGHBOR_STAGE;

/// Stage at which neighbors become visible for a given final stage.
pub fn neighbor_stage(final_stage: u8) -> u8 {
    final_stage.min(NEIGHBOR_STAGE)
}

/// Which visual layers are visible at a stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reveal {
    pub source_markers: bool,
    pub direction_arrow: bool,
    /// The original direction arrow is fading out.
    pub direction_arrow_fading: bool,
    pub base_marker: bool,
    pub transformed_arrow: bool,
    pub result_marker: bool,
    pub neighbors: bool,
}

impl Reveal {
    /// Nothing on screen: no active sequence.
    pub fn hidden() -> Self {
        Self::default()
    }

    /// Visible layers at `stage` of a sequence ending at `final_stage`.
    pub fn at(stage: u8, final_stage: u8) -> Self {
        Self {
            source_markers: true,
            direction_arrow: stage >= DIRECTION_STAGE,
            direction_arrow_fading: stage >= TRANSFORM_STAGE,
            base_marker: stage >= BASE_STAGE,
            transformed_arrow: stage >= TRANSFORM_STAGE,
            result_marker: stage >= RESULT_STAGE,
            neighbors: stage >= neighbor_stage(final_stage),
        }
    }

    /// Count of layers visible, for monotonicity checks.
    pub fn layer_count(&self) -> usize {
        [
            self.source_markers,
            self.direction_arrow,
            self.direction_arrow_fading,
            self.base_marker,
            self.transformed_arrow,
            self.result_marker,
            self.neighbors,
        ]
        .iter()
        .filter(|&&on| on)
        .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_zero_shows_only_sources() {
        let r = Reveal::at(0, 5);
        assert!(r.source_markers);
        assert_eq!(r.layer_count(), 1);
        assert_eq!(Reveal::hidden().layer_count(), 0);
    }

    #[test]
    fn test_stages_are_cumulative() {
        for final_stage in [MIN_FINAL_STAGE, MAX_FINAL_STAGE] {
            for stage in 1..=final_stage {
                let before = Reveal::at(stage - 1, final_stage);
                let after = Reveal::at(stage, final_stage);
                assert!(after.layer_count() > before.layer_count());
            }
        }
    }

    #[test]
    fn test_transform_stage_fades_direction() {
        let r = Reveal::at(TRANSFORM_STAGE, 5);
        assert!(r.direction_arrow && r.direction_arrow_fading);
        assert!(r.transformed_arrow);
        assert!(!r.result_marker);
    }

    #[test]
    fn test_neighbor_stage_per_variant() {
        assert!(!Reveal::at(RESULT_STAGE, 5).neighbors);
        assert!(Reveal::at(NEIGHBOR_STAGE, 5).neighbors);
        assert!(Reveal::at(RESULT_STAGE, 4).neighbors);
    }
}
