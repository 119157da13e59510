//! Shared solver contract.

use serde::{Deserialize, Serialize};

use super::Tour;
use crate::constructive::{ConvexHullInsertion, NearestNeighbor, SpanningTreeApproximation};
use crate::distance::DistanceMatrix;
use crate::error::Result;
use crate::exact::{BruteForce, HeldKarp};

/// A TSP algorithm that computes and stores one tour per `solve` call.
///
/// A solver starts empty. Each call to [`solve`](TourSolver::solve) discards
/// the previous result before computing a new one, so a failed call leaves
/// the solver empty.
///
/// # Examples
///
/// ```
/// use tsp_solvers::distance::DistanceMatrix;
/// use tsp_solvers::models::TourSolver;
/// use tsp_solvers::exact::HeldKarp;
///
/// let dm = DistanceMatrix::from_rows(vec![
///     vec![0.0, 10.0, 15.0, 20.0],
///     vec![10.0, 0.0, 35.0, 25.0],
///     vec![15.0, 35.0, 0.0, 30.0],
///     vec![20.0, 25.0, 30.0, 0.0],
/// ]).unwrap();
///
/// let mut solver = HeldKarp::new();
/// assert!(solver.tour().is_none());
/// solver.solve(&dm).unwrap();
/// assert_eq!(solver.cost(), Some(80.0));
/// ```
pub trait TourSolver: Send {
    /// Computes and stores a tour for `distances`.
    fn solve(&mut self, distances: &DistanceMatrix) -> Result<()>;

    /// The stored tour, if `solve` has succeeded.
    fn tour(&self) -> Option<&Tour>;

    /// The stored tour cost, if `solve` has succeeded.
    fn cost(&self) -> Option<f64>;

    /// Short algorithm name.
    fn name(&self) -> &'static str;

    /// Asymptotic running time.
    fn complexity(&self) -> &'static str;

    /// Largest instance a benchmark should hand to this solver.
    ///
    /// Advisory only; `solve` does not enforce it.
    fn max_dimension(&self) -> Option<usize> {
        None
    }
}

/// Identifies one of the five solver variants.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum SolverKind {
    BruteForce,
    HeldKarp,
    NearestNeighbor,
    SpanningTree,
    ConvexHull,
}

impl SolverKind {
    /// All variants, exact methods first.
    pub const ALL: [SolverKind; 5] = [
        SolverKind::BruteForce,
        SolverKind::HeldKarp,
        SolverKind::NearestNeighbor,
        SolverKind::SpanningTree,
        SolverKind::ConvexHull,
    ];

    /// Creates an empty solver of this kind.
    pub fn create(self) -> Box<dyn TourSolver> {
        match self {
            SolverKind::BruteForce => Box::new(BruteForce::new()),
            SolverKind::HeldKarp => Box::new(HeldKarp::new()),
            SolverKind::NearestNeighbor => Box::new(NearestNeighbor::new()),
            SolverKind::SpanningTree => Box::new(SpanningTreeApproximation::new()),
            SolverKind::ConvexHull => Box::new(ConvexHullInsertion::new()),
        }
    }
}
