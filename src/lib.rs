//! # tsp-solvers
//!
//! Traveling salesman solvers with different optimality/performance
//! trade-offs, all behind the [`TourSolver`](models::TourSolver) trait so
//! they can be compared on the same input.
//!
//! ## Modules
//!
//! - [`models`] — Tour, Point, and the `TourSolver` contract
//! - [`distance`] — Dense distance matrix
//! - [`exact`] — Brute force and Held-Karp (optimal)
//! - [`constructive`] — Nearest neighbor, MST double-tree, convex-hull insertion
//! - [`tsplib`] — TSPLIB coordinate instances and random instance generation
//! - [`benchmark`] — Run several solvers on one instance and report results
//! - [`error`] — Crate error type

pub mod benchmark;
pub mod constructive;
pub mod distance;
pub mod error;
pub mod exact;
pub mod models;
pub mod tsplib;

pub use error::{Result, TspError};
