//! Held-Karp bitmask dynamic programming.
//!
//! # Algorithm
//!
//! A state is `(p, m)`: the salesman stands at node `p` having visited the
//! node set `m` (which always contains the start node 0). Then
//!
//! ```text
//! dp(p, full) = d[p][0]
//! dp(p, m)    = min over nxt ∉ m of d[p][nxt] + dp(nxt, m | bit(nxt))
//! ```
//!
//! and the optimum is `dp(0, {0})`. States are filled bottom-up in order of
//! decreasing mask, so every successor state is ready before it is read.
//! Candidates are scanned in ascending node order with a strict `<`, so the
//! lowest-index successor wins ties. A parallel choice table records the
//! winning successor of every state, and the tour is rebuilt by following
//! choices from `(0, {0})`.
//!
//! # Limits
//!
//! Masks are 64-bit but the structural ceiling is [`MAX_NODES`] = 32 nodes.
//! The practical ceiling is memory: the tables hold n·2ⁿ⁻¹ states
//! (≈ 9 bytes each), about 90 MB at n = 20 and 36 GB at n = 30. Allocation
//! failure is reported as [`TspError::ResourceExhausted`].
//!
//! # Complexity
//!
//! O(n²·2ⁿ) time, O(n·2ⁿ) memory.
//!
//! # Reference
//!
//! Held, M. & Karp, R.M. (1962). "A Dynamic Programming Approach to
//! Sequencing Problems", *J. SIAM* 10(1), 196-210.

use log::debug;

use crate::distance::DistanceMatrix;
use crate::error::{Result, TspError};
use crate::models::{Closure, Tour, TourSolver};

/// Largest instance the visited-set bitmask can address.
pub const MAX_NODES: usize = 32;

const NO_CHOICE: u8 = u8::MAX;

/// Finds an optimal tour with the Held-Karp recurrence.
///
/// The tour starts at node 0 and lists it again at the end.
///
/// # Errors
///
/// [`TspError::InvalidInput`] if the matrix has 0 or more than
/// [`MAX_NODES`] nodes or invalid entries, [`TspError::ResourceExhausted`]
/// if the state tables cannot be allocated.
///
/// # Examples
///
/// ```
/// use tsp_solvers::distance::DistanceMatrix;
/// use tsp_solvers::exact::held_karp;
///
/// let dm = DistanceMatrix::from_rows(vec![
///     vec![0.0, 10.0, 15.0, 20.0],
///     vec![10.0, 0.0, 35.0, 25.0],
///     vec![15.0, 35.0, 0.0, 30.0],
///     vec![20.0, 25.0, 30.0, 0.0],
/// ]).unwrap();
/// let (tour, cost) = held_karp(&dm).unwrap();
/// assert_eq!(tour.nodes(), &[0, 1, 3, 2, 0]);
/// assert_eq!(cost, 80.0);
/// ```
pub fn held_karp(distances: &DistanceMatrix) -> Result<(Tour, f64)> {
    let n = distances.size();
    if n == 0 || n > MAX_NODES {
        return Err(TspError::invalid_input(format!(
            "held-karp needs between 1 and {MAX_NODES} nodes, got {n}"
        )));
    }
    distances.validate()?;

    if n == 1 {
        let cost = distances.get(0, 0);
        return Ok((Tour::new(vec![0, 0], Closure::Explicit), cost));
    }

    let table = StateTable::compute(distances)?;
    let cost = table.cost(0, 1);
    let tour = table.reconstruct();

    debug!("held_karp: n={n} states={} cost={cost}", table.costs.len());
    Ok((Tour::new(tour, Closure::Explicit), cost))
}

/// Dense `(node, mask)` tables.
///
/// Bit 0 is set in every reachable mask, so masks are stored shifted right
/// by one: state `(p, m)` lives at `(m >> 1) * n + p`.
struct StateTable {
    n: usize,
    costs: Vec<f64>,
    choices: Vec<u8>,
}

impl StateTable {
    fn compute(distances: &DistanceMatrix) -> Result<Self> {
        let n = distances.size();
        let groups = 1usize << (n - 1);
        let states = groups
            .checked_mul(n)
            .ok_or(TspError::ResourceExhausted { nodes: n, states: usize::MAX })?;

        let mut costs = Vec::new();
        let mut choices = Vec::new();
        costs
            .try_reserve_exact(states)
            .and_then(|_| choices.try_reserve_exact(states))
            .map_err(|_| TspError::ResourceExhausted { nodes: n, states })?;
        costs.resize(states, f64::INFINITY);
        choices.resize(states, NO_CHOICE);

        let mut table = Self { n, costs, choices };
        let full: u64 = (1u64 << n) - 1;

        // The full mask (group `groups - 1`) is the base case and never stored
        for group in (0..groups - 1).rev() {
            let mask = ((group as u64) << 1) | 1;
            for p in 0..n {
                if mask & (1 << p) == 0 || (p == 0 && mask != 1) {
                    continue;
                }

                let mut best = f64::INFINITY;
                let mut choice = NO_CHOICE;
                for nxt in 1..n {
                    let bit = 1u64 << nxt;
                    if mask & bit != 0 {
                        continue;
                    }
                    let next_mask = mask | bit;
                    let rest = if next_mask == full {
                        distances.get(nxt, 0)
                    } else {
                        table.cost(nxt, next_mask)
                    };
                    let candidate = distances.get(p, nxt) + rest;
                    if candidate < best {
                        best = candidate;
                        choice = nxt as u8;
                    }
                }

                let idx = table.index(p, mask);
                table.costs[idx] = best;
                table.choices[idx] = choice;
            }
        }

        Ok(table)
    }

    fn index(&self, node: usize, mask: u64) -> usize {
        (mask >> 1) as usize * self.n + node
    }

    fn cost(&self, node: usize, mask: u64) -> f64 {
        self.costs[self.index(node, mask)]
    }

    /// Follows recorded choices from `(0, {0})`, closing back at node 0.
    ///
    /// # Panics
    ///
    /// Panics if a visited state has no recorded successor. That cannot
    /// happen for a table built by [`StateTable::compute`].
    fn reconstruct(&self) -> Vec<usize> {
        let mut tour = Vec::with_capacity(self.n + 1);
        tour.push(0);

        let mut p = 0usize;
        let mut mask = 1u64;
        for _ in 1..self.n {
            let choice = self.choices[self.index(p, mask)];
            assert!(
                choice != NO_CHOICE,
                "held_karp: state (node {p}, mask {mask:#b}) has no recorded successor"
            );
            p = choice as usize;
            mask |= 1 << p;
            tour.push(p);
        }

        tour.push(0);
        tour
    }
}

/// [`TourSolver`] wrapper around [`held_karp`].
#[derive(Debug, Clone, Default)]
pub struct HeldKarp {
    tour: Option<Tour>,
    cost: Option<f64>,
}

impl HeldKarp {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TourSolver for HeldKarp {
    fn solve(&mut self, distances: &DistanceMatrix) -> Result<()> {
        self.tour = None;
        self.cost = None;
        let (tour, cost) = held_karp(distances)?;
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
        "HeldKarp"
    }

    fn complexity(&self) -> &'static str {
        "O(n²·2ⁿ)"
    }

    fn max_dimension(&self) -> Option<usize> {
        Some(20)
    }
}
