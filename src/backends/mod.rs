//! Background classification algorithms
//!
//! - Threshold classifier (per-pixel whiteness test)
//! - Flood fill segmenter (corner-seeded, 4-connected)

pub mod flood_fill;
pub mod threshold;

// Test utilities for segmenter testing
#[cfg(test)]
pub(crate) mod test_utils;

pub use self::flood_fill::{corner_seeds, Direction, FloodFillSegmenter, VisitedSet};
pub use self::threshold::ThresholdClassifier;
