//! Domain model types shared by every solver.
//!
//! Provides planar points (for the hull variant), tours with an explicit
//! closing-node convention, and the [`TourSolver`] trait that all five
//! algorithms implement.

mod point;
mod solver;
mod tour;

pub use point::Point;
pub use solver::{SolverKind, TourSolver};
pub use tour::{Closure, Tour};

pub(crate) use tour::{cycle_cost, path_cost};
