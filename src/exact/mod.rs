//! Exact solvers that always return an optimal tour.
//!
//! - [`brute_force`] — Exhaustive permutation search, O(n!·n)
//! - [`held_karp`] — Bitmask dynamic programming (Held & Karp, 1962), O(n²·2ⁿ)

mod brute_force;
mod held_karp;

pub use brute_force::{brute_force, BruteForce};
pub use held_karp::{held_karp, HeldKarp, MAX_NODES};
