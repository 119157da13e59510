//! Convex-hull insertion heuristic.
//!
//! # Algorithm
//!
//! 1. Compute the convex hull of the node coordinates with a Graham scan.
//!    Collinear boundary points are left off the hull.
//! 2. Connect the remaining (interior) nodes with Prim's algorithm.
//! 3. Pick the cheapest hull → interior edge; its interior end is where the
//!    interior tree is entered.
//! 4. Walk the interior tree depth-first from that node to get a chain.
//! 5. Splice the whole chain into the hull cycle after the hull node
//!    `prev` that minimizes `d(prev, first) + d(last, next) − d(prev, next)`.
//!
//! The tour starts at the hull anchor (lowest y, then lowest x), not
//! necessarily node 0, and lists the anchor again at the end.
//!
//! # Coordinates
//!
//! With no explicit points, columns 0 and 1 of each matrix row are read as
//! that node's `(x, y)`. This only makes sense when the caller encoded
//! coordinates there; use [`ConvexHullInsertion::with_points`] otherwise.
//!
//! # Complexity
//!
//! O(n log n) hull, O(k² log k) interior tree for k interior nodes, O(h·k)
//! bridge search and O(h) splice search for h hull nodes.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::debug;

use super::heap::MinEntry;
use crate::distance::DistanceMatrix;
use crate::error::{Result, TspError};
use crate::models::{path_cost, Closure, Point, Tour, TourSolver};

/// Returns the indices of the convex hull of `points` in counter-clockwise
/// order, starting from the lowest (then leftmost) point.
///
/// Fewer than three points are returned as-is, in input order.
///
/// # Examples
///
/// ```
/// use tsp_solvers::models::Point;
/// use tsp_solvers::constructive::graham_scan;
///
/// let points = vec![
///     Point::new(0.0, 2.0),
///     Point::new(1.0, 1.0),
///     Point::new(0.0, 0.0),
///     Point::new(2.0, 0.0),
///     Point::new(2.0, 2.0),
/// ];
/// assert_eq!(graham_scan(&points), vec![2, 3, 4, 0]);
/// ```
pub fn graham_scan(points: &[Point]) -> Vec<usize> {
    let n = points.len();
    if n < 3 {
        return (0..n).collect();
    }

    let mut anchor = 0;
    for i in 1..n {
        let (p, a) = (&points[i], &points[anchor]);
        if p.y < a.y || (p.y == a.y && p.x < a.x) {
            anchor = i;
        }
    }

    let origin = points[anchor];
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&i, &j| {
        if i == j {
            return Ordering::Equal;
        }
        if i == anchor {
            return Ordering::Less;
        }
        if j == anchor {
            return Ordering::Greater;
        }
        let (pi, pj) = (&points[i], &points[j]);
        origin
            .angle_to(pi)
            .partial_cmp(&origin.angle_to(pj))
            .unwrap_or(Ordering::Equal)
            .then_with(|| {
                origin
                    .squared_distance_to(pi)
                    .partial_cmp(&origin.squared_distance_to(pj))
                    .unwrap_or(Ordering::Equal)
            })
    });

    let mut hull = vec![order[0], order[1]];
    for &c in &order[2..] {
        while hull.len() >= 2 {
            let top = hull[hull.len() - 1];
            let below = hull[hull.len() - 2];
            if points[below].cross(&points[top], &points[c]) > 0.0 {
                break;
            }
            hull.pop();
        }
        hull.push(c);
    }
    hull
}

/// Prim's algorithm restricted to `nodes`, starting from `nodes[0]`.
///
/// Returns the tree edges in the order they were added.
fn interior_tree(distances: &DistanceMatrix, nodes: &[usize]) -> Vec<(usize, usize)> {
    let Some(&first) = nodes.first() else {
        return Vec::new();
    };

    let mut in_tree = vec![false; distances.size()];
    let mut edges = Vec::with_capacity(nodes.len() - 1);
    let mut heap = BinaryHeap::new();

    in_tree[first] = true;
    for &v in &nodes[1..] {
        heap.push(MinEntry::new(distances.get(first, v), (first, v)));
    }

    while edges.len() + 1 < nodes.len() {
        let Some(entry) = heap.pop() else {
            break;
        };
        let (u, v) = entry.key;
        if in_tree[v] {
            continue;
        }
        in_tree[v] = true;
        edges.push((u, v));

        for &w in nodes {
            if !in_tree[w] {
                heap.push(MinEntry::new(distances.get(v, w), (v, w)));
            }
        }
    }
    edges
}

/// Cheapest `(hull, interior)` edge; the first one found wins ties.
fn best_bridge(
    distances: &DistanceMatrix,
    hull: &[usize],
    interior: &[usize],
) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize, f64)> = None;
    for &h in hull {
        for &i in interior {
            let d = distances.get(h, i);
            if best.map_or(true, |(_, _, bd)| d < bd) {
                best = Some((h, i, d));
            }
        }
    }
    best.map(|(h, i, _)| (h, i))
}

/// Depth-first walk of the tree `edges` from `start`, neighbours in the
/// order the edges were added.
fn tree_chain(edges: &[(usize, usize)], start: usize, n: usize) -> Vec<usize> {
    let mut adjacency = vec![Vec::new(); n];
    for &(u, v) in edges {
        adjacency[u].push(v);
        adjacency[v].push(u);
    }

    let mut chain = Vec::with_capacity(edges.len() + 1);
    let mut visited = vec![false; n];
    let mut stack = vec![start];
    while let Some(v) = stack.pop() {
        if visited[v] {
            continue;
        }
        visited[v] = true;
        chain.push(v);
        stack.extend(adjacency[v].iter().rev().filter(|&&u| !visited[u]));
    }
    chain
}

/// Position in `hull` at which inserting `chain` adds the least cost.
fn best_splice(distances: &DistanceMatrix, hull: &[usize], chain: &[usize]) -> usize {
    let (Some(&first), Some(&last)) = (chain.first(), chain.last()) else {
        return hull.len();
    };

    let mut best_pos = 0;
    let mut best_delta = f64::INFINITY;
    for i in 0..hull.len() {
        let prev = hull[i];
        let next = hull[(i + 1) % hull.len()];
        let delta =
            distances.get(prev, first) + distances.get(last, next) - distances.get(prev, next);
        if delta < best_delta {
            best_delta = delta;
            best_pos = i + 1;
        }
    }
    best_pos
}

/// Builds the hull-insertion tour for already-validated input.
fn insertion_tour(distances: &DistanceMatrix, points: &[Point]) -> Vec<usize> {
    let n = distances.size();
    let hull = graham_scan(points);

    let mut on_hull = vec![false; n];
    for &h in &hull {
        on_hull[h] = true;
    }
    let interior: Vec<usize> = (0..n).filter(|&v| !on_hull[v]).collect();

    let mut tour = hull.clone();
    if let Some((_, attach)) = best_bridge(distances, &hull, &interior) {
        let edges = interior_tree(distances, &interior);
        let chain = tree_chain(&edges, attach, n);
        let pos = best_splice(distances, &hull, &chain);
        tour.splice(pos..pos, chain);
        debug!(
            "convex_hull: hull={} interior={} splice_at={pos}",
            hull.len(),
            interior.len()
        );
    }

    if let Some(&start) = tour.first() {
        tour.push(start);
    }
    tour
}

/// Constructs a tour by convex-hull insertion, reading coordinates from
/// columns 0 and 1 of the matrix.
///
/// For fewer than three nodes the coordinates are not read and the tour is
/// the nodes in index order.
///
/// # Examples
///
/// ```
/// use tsp_solvers::distance::DistanceMatrix;
/// use tsp_solvers::constructive::convex_hull_insertion;
///
/// let dm = DistanceMatrix::from_rows(vec![
///     vec![0.0, 10.0, 15.0, 20.0],
///     vec![10.0, 0.0, 35.0, 25.0],
///     vec![15.0, 35.0, 0.0, 30.0],
///     vec![20.0, 25.0, 30.0, 0.0],
/// ]).unwrap();
/// let (tour, cost) = convex_hull_insertion(&dm).unwrap();
/// assert_eq!(tour.nodes(), &[1, 3, 2, 0, 1]);
/// assert_eq!(cost, 80.0);
/// ```
pub fn convex_hull_insertion(distances: &DistanceMatrix) -> Result<(Tour, f64)> {
    distances.validate()?;
    let n = distances.size();
    let points: Vec<Point> = if n >= 3 {
        (0..n).map(|i| distances.coordinate(i)).collect()
    } else {
        vec![Point::new(0.0, 0.0); n]
    };
    finish(distances, &points)
}

/// Constructs a tour by convex-hull insertion using explicit coordinates.
///
/// # Errors
///
/// [`TspError::InvalidInput`] if `points` does not have one finite point
/// per matrix node, or the matrix is invalid.
pub fn convex_hull_insertion_with_points(
    distances: &DistanceMatrix,
    points: &[Point],
) -> Result<(Tour, f64)> {
    distances.validate()?;
    if points.len() != distances.size() {
        return Err(TspError::invalid_input(format!(
            "{} points given for a {}-node matrix",
            points.len(),
            distances.size()
        )));
    }
    if let Some(i) = points.iter().position(|p| !p.x.is_finite() || !p.y.is_finite()) {
        return Err(TspError::invalid_input(format!(
            "point {i} has non-finite coordinates"
        )));
    }
    finish(distances, points)
}

fn finish(distances: &DistanceMatrix, points: &[Point]) -> Result<(Tour, f64)> {
    let nodes = insertion_tour(distances, points);
    let cost = path_cost(&nodes, distances);
    debug!("convex_hull: n={} cost={cost}", distances.size());
    Ok((Tour::new(nodes, Closure::Explicit), cost))
}

/// [`TourSolver`] wrapper around convex-hull insertion.
///
/// By default node coordinates come from matrix columns 0 and 1; see
/// [`with_points`](ConvexHullInsertion::with_points).
#[derive(Debug, Clone, Default)]
pub struct ConvexHullInsertion {
    points: Option<Vec<Point>>,
    tour: Option<Tour>,
    cost: Option<f64>,
}

impl ConvexHullInsertion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses explicit coordinates instead of the matrix coordinate channel.
    pub fn with_points(mut self, points: Vec<Point>) -> Self {
        self.points = Some(points);
        self
    }
}

impl TourSolver for ConvexHullInsertion {
    fn solve(&mut self, distances: &DistanceMatrix) -> Result<()> {
        self.tour = None;
        self.cost = None;
        let (tour, cost) = match &self.points {
            Some(points) => convex_hull_insertion_with_points(distances, points)?,
            None => convex_hull_insertion(distances)?,
        };
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
        "ConvexHull"
    }

    fn complexity(&self) -> &'static str {
        "O(n² log n)"
    }

    fn max_dimension(&self) -> Option<usize> {
        Some(super::HEURISTIC_MAX_DIMENSION)
    }
}
