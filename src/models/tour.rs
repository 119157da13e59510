//! Tour type and closing-node conventions.

use serde::{Deserialize, Serialize};

use crate::distance::DistanceMatrix;

/// How a tour records its return edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Closure {
    /// The edge from the last listed node back to the first is implied.
    Implicit,
    /// The start node is listed again at the end.
    Explicit,
}

/// An ordered, cyclic sequence of node indices.
///
/// Each solver keeps its own closing convention, recorded in [`Closure`].
/// Use [`Tour::open_nodes`] or [`Tour::canonical`] when comparing tours
/// produced by different solvers.
///
/// # Examples
///
/// ```
/// use tsp_solvers::models::{Closure, Tour};
///
/// let closed = Tour::new(vec![0, 2, 1, 0], Closure::Explicit);
/// let open = Tour::new(vec![1, 0, 2], Closure::Implicit);
/// assert_eq!(closed.open_nodes(), &[0, 2, 1]);
/// assert_eq!(closed.canonical(), open.canonical());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tour {
    nodes: Vec<usize>,
    closure: Closure,
}

impl Tour {
    pub fn new(nodes: Vec<usize>, closure: Closure) -> Self {
        Self { nodes, closure }
    }

    /// Node sequence as the solver produced it.
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    pub fn closure(&self) -> Closure {
        self.closure
    }

    /// Node sequence without the repeated trailing start node.
    pub fn open_nodes(&self) -> &[usize] {
        match self.closure {
            Closure::Explicit if self.nodes.len() > 1 => &self.nodes[..self.nodes.len() - 1],
            _ => &self.nodes,
        }
    }

    /// Number of distinct stops.
    pub fn len(&self) -> usize {
        self.open_nodes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Sum of `d[t[i]][t[(i + 1) % len]]` over the open node sequence.
    pub fn cycle_cost(&self, distances: &DistanceMatrix) -> f64 {
        cycle_cost(self.open_nodes(), distances)
    }

    /// Returns `true` if the open node sequence is a permutation of `0..n`.
    pub fn is_permutation(&self, n: usize) -> bool {
        let open = self.open_nodes();
        if open.len() != n {
            return false;
        }
        let mut seen = vec![false; n];
        for &v in open {
            if v >= n || seen[v] {
                return false;
            }
            seen[v] = true;
        }
        true
    }

    /// Rotation- and reflection-normalized node order.
    ///
    /// Starts at the smallest node index; of the two directions around the
    /// cycle, the one whose second node is smaller is kept.
    pub fn canonical(&self) -> Vec<usize> {
        let open = self.open_nodes();
        let Some(start) = open
            .iter()
            .enumerate()
            .min_by_key(|&(_, &v)| v)
            .map(|(i, _)| i)
        else {
            return Vec::new();
        };

        let mut rotated: Vec<usize> = open[start..].iter().chain(&open[..start]).copied().collect();
        if rotated.len() > 2 && rotated[rotated.len() - 1] < rotated[1] {
            rotated[1..].reverse();
        }
        rotated
    }
}

/// Cyclic cost of a node sequence: every consecutive pair plus last → first.
pub(crate) fn cycle_cost(order: &[usize], distances: &DistanceMatrix) -> f64 {
    let n = order.len();
    (0..n)
        .map(|i| distances.get(order[i], order[(i + 1) % n]))
        .sum()
}

/// Cost of walking a node sequence once, without an implied return edge.
pub(crate) fn path_cost(order: &[usize], distances: &DistanceMatrix) -> f64 {
    order
        .windows(2)
        .map(|w| distances.get(w[0], w[1]))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> DistanceMatrix {
        DistanceMatrix::from_rows(vec![
            vec![0.0, 1.0, 2.0, 1.0],
            vec![1.0, 0.0, 1.0, 2.0],
            vec![2.0, 1.0, 0.0, 1.0],
            vec![1.0, 2.0, 1.0, 0.0],
        ])
        .expect("valid")
    }

    #[test]
    fn test_open_nodes_strip_only_explicit() {
        let t = Tour::new(vec![0, 1, 2, 0], Closure::Explicit);
        assert_eq!(t.open_nodes(), &[0, 1, 2]);
        assert_eq!(t.len(), 3);

        let t = Tour::new(vec![0, 1, 2], Closure::Implicit);
        assert_eq!(t.open_nodes(), &[0, 1, 2]);
    }

    #[test]
    fn test_single_node_explicit() {
        let t = Tour::new(vec![0, 0], Closure::Explicit);
        assert_eq!(t.open_nodes(), &[0]);
        assert!(t.is_permutation(1));
    }

    #[test]
    fn test_cycle_cost_same_for_both_conventions() {
        let dm = square();
        let a = Tour::new(vec![0, 1, 2, 3], Closure::Implicit);
        let b = Tour::new(vec![0, 1, 2, 3, 0], Closure::Explicit);
        assert!((a.cycle_cost(&dm) - 4.0).abs() < 1e-10);
        assert!((b.cycle_cost(&dm) - 4.0).abs() < 1e-10);
        assert!((path_cost(b.nodes(), &dm) - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_is_permutation() {
        assert!(Tour::new(vec![2, 0, 1], Closure::Implicit).is_permutation(3));
        assert!(!Tour::new(vec![0, 0, 1], Closure::Implicit).is_permutation(3));
        assert!(!Tour::new(vec![0, 1], Closure::Implicit).is_permutation(3));
        assert!(!Tour::new(vec![0, 1, 5], Closure::Implicit).is_permutation(3));
    }

    #[test]
    fn test_canonical_rotation_and_reflection() {
        let a = Tour::new(vec![2, 3, 0, 1], Closure::Implicit);
        let b = Tour::new(vec![0, 3, 2, 1, 0], Closure::Explicit);
        assert_eq!(a.canonical(), vec![0, 1, 2, 3]);
        assert_eq!(b.canonical(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_canonical_empty() {
        assert!(Tour::new(vec![], Closure::Implicit).canonical().is_empty());
    }
}
