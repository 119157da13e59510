//! Constructive heuristics that build a single tour without search.
//!
//! - [`nearest_neighbor`] — Greedy nearest-neighbor walk, O(n²)
//! - [`spanning_tree_tour`] — Prim MST + preorder shortcut (double tree), O(n² log n)
//! - [`convex_hull_insertion`] — Graham-scan hull with an interior MST chain spliced in

/// Largest instance the benchmark hands to a constructive heuristic.
///
/// The dense matrix alone is 8·n² bytes, about 65 GB at this size.
pub const HEURISTIC_MAX_DIMENSION: usize = 90_000;

mod convex_hull;
mod heap;
mod nearest_neighbor;
mod spanning_tree;

pub use convex_hull::{
    convex_hull_insertion, convex_hull_insertion_with_points, graham_scan, ConvexHullInsertion,
};
pub use nearest_neighbor::{nearest_neighbor, NearestNeighbor};
pub use spanning_tree::{prim_mst, spanning_tree_tour, SpanningTree, SpanningTreeApproximation};
