//! Exhaustive permutation search.
//!
//! # Algorithm
//!
//! Node 0 is fixed as the start (a cycle's cost does not depend on where it
//! is entered), and all (n−1)! orderings of the remaining nodes are
//! enumerated in lexicographic order. The first ordering reaching the
//! minimum cyclic cost wins; reflections are not collapsed.
//!
//! # Complexity
//!
//! O(n!·n) time, O(n) auxiliary space. Practical only for n ≲ 10.

use log::debug;

use crate::distance::DistanceMatrix;
use crate::error::Result;
use crate::models::{cycle_cost, Closure, Tour, TourSolver};

/// Finds an optimal tour by trying every permutation.
///
/// The tour starts at node 0 and closes implicitly.
///
/// # Examples
///
/// ```
/// use tsp_solvers::distance::DistanceMatrix;
/// use tsp_solvers::exact::brute_force;
///
/// let dm = DistanceMatrix::from_rows(vec![
///     vec![0.0, 10.0, 15.0, 20.0],
///     vec![10.0, 0.0, 35.0, 25.0],
///     vec![15.0, 35.0, 0.0, 30.0],
///     vec![20.0, 25.0, 30.0, 0.0],
/// ]).unwrap();
/// let (tour, cost) = brute_force(&dm).unwrap();
/// assert_eq!(tour.nodes(), &[0, 1, 3, 2]);
/// assert_eq!(cost, 80.0);
/// ```
pub fn brute_force(distances: &DistanceMatrix) -> Result<(Tour, f64)> {
    distances.validate()?;
    let n = distances.size();

    let mut order: Vec<usize> = (0..n).collect();
    let mut best = order.clone();
    let mut best_cost = f64::INFINITY;

    loop {
        let cost = cycle_cost(&order, distances);
        if cost < best_cost {
            best_cost = cost;
            best.copy_from_slice(&order);
        }
        if !next_permutation(&mut order[1..]) {
            break;
        }
    }

    debug!("brute_force: n={n} cost={best_cost}");
    Ok((Tour::new(best, Closure::Implicit), best_cost))
}

/// Rearranges `items` into the next lexicographically greater permutation.
///
/// Returns `false` (leaving `items` sorted ascending) once the last
/// permutation has been passed.
pub(crate) fn next_permutation(items: &mut [usize]) -> bool {
    if items.len() < 2 {
        return false;
    }
    let Some(pivot) = (0..items.len() - 1).rev().find(|&i| items[i] < items[i + 1]) else {
        items.reverse();
        return false;
    };
    let successor = (pivot + 1..items.len())
        .rev()
        .find(|&j| items[j] > items[pivot])
        .unwrap_or(pivot + 1);
    items.swap(pivot, successor);
    items[pivot + 1..].reverse();
    true
}

/// [`TourSolver`] wrapper around [`brute_force`].
#[derive(Debug, Clone, Default)]
pub struct BruteForce {
    tour: Option<Tour>,
    cost: Option<f64>,
}

impl BruteForce {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TourSolver for BruteForce {
    fn solve(&mut self, distances: &DistanceMatrix) -> Result<()> {
        self.tour = None;
        self.cost = None;
        let (tour, cost) = brute_force(distances)?;
        self.tour = Some(tour);
        self.cost = Some(cost);
        Ok(())
    }

    fn tour(&self) -> Option<&Tour> {
        self.tour.as_ref()
    }

    fn cost(&self) -> Option<f64> {
        self.cost
    }

    fn name(&self) -> &'static str {
        "BruteForce"
    }

    fn complexity(&self) -> &'static str {
        "O(n!·n)"
    }

    fn max_dimension(&self) -> Option<usize> {
        Some(12)
    }
}
