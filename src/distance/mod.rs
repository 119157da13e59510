//! Distance matrices.
//!
//! Provides the dense cost matrix every solver consumes.

mod matrix;

pub use matrix::DistanceMatrix;
