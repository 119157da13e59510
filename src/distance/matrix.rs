//! Dense distance matrix.

use crate::error::{Result, TspError};
use crate::models::Point;

/// A dense n×n distance matrix stored in row-major order.
///
/// Entry `(i, j)` is the cost of traveling from node `i` to node `j`.
/// Diagonal entries are not read by the heuristics.
///
/// # Examples
///
/// ```
/// use tsp_solvers::models::Point;
/// use tsp_solvers::distance::DistanceMatrix;
///
/// let points = vec![
///     Point::new(0.0, 0.0),
///     Point::new(3.0, 4.0),
///     Point::new(6.0, 8.0),
/// ];
/// let dm = DistanceMatrix::from_points(&points);
/// assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Computes a Euclidean distance matrix from point coordinates.
    pub fn from_points(points: &[Point]) -> Self {
        let n = points.len();
        let mut dm = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = points[i].distance_to(&points[j]);
                dm.set(i, j, d);
                dm.set(j, i, d);
            }
        }
        dm
    }

    /// Builds a matrix from nested rows, validating shape and entries.
    ///
    /// Fails with [`TspError::InvalidInput`] if there are no rows, any row
    /// length differs from the row count, or any entry is negative or
    /// non-finite.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n = rows.len();
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != n) {
            return Err(TspError::invalid_input(format!(
                "row {i} has {} entries, expected {n}",
                row.len()
            )));
        }
        let dm = Self {
            data: rows.into_iter().flatten().collect(),
            size: n,
        };
        dm.validate()?;
        Ok(dm)
    }

    /// Creates a distance matrix from an explicit row-major n×n grid.
    ///
    /// Returns `None` if the data length doesn't match `size * size`.
    pub fn from_data(size: usize, data: Vec<f64>) -> Option<Self> {
        if data.len() != size * size {
            return None;
        }
        Some(Self { data, size })
    }

    /// Returns the distance from node `from` to node `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the distance from node `from` to node `to`.
    pub fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of nodes in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Row `i` as a slice.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.size..(i + 1) * self.size]
    }

    /// Copies the matrix out as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.size).map(|i| self.row(i).to_vec()).collect()
    }

    /// Checks the solver preconditions: at least one node, every entry
    /// finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(TspError::invalid_input("distance matrix is empty"));
        }
        if let Some(pos) = self.data.iter().position(|d| !d.is_finite() || *d < 0.0) {
            let (i, j) = (pos / self.size, pos % self.size);
            return Err(TspError::invalid_input(format!(
                "entry ({i}, {j}) = {} is not a finite non-negative cost",
                self.data[pos]
            )));
        }
        Ok(())
    }

    /// Reads columns 0 and 1 of row `i` as planar coordinates.
    ///
    /// This is the input channel used by
    /// [`ConvexHullInsertion`](crate::constructive::ConvexHullInsertion) when
    /// no explicit points are supplied. It is only meaningful when the caller
    /// encoded coordinates there.
    ///
    /// # Panics
    ///
    /// Panics if the matrix has fewer than two columns.
    pub fn coordinate(&self, i: usize) -> Point {
        Point::new(self.get(i, 0), self.get(i, 1))
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Returns the nearest neighbor of `from` among the given candidates.
    ///
    /// Scans left to right with a strict `<`, so the first candidate wins
    /// ties. Returns `None` if `candidates` is empty.
    pub fn nearest_neighbor(&self, from: usize, candidates: &[usize]) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for &c in candidates {
            let d = self.get(from, c);
            if best.map_or(true, |(_, bd)| d < bd) {
                best = Some((c, d));
            }
        }
        best.map(|(c, _)| c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_points() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(3.0, 4.0),
            Point::new(0.0, 8.0),
        ]
    }

    #[test]
    fn test_from_points() {
        let dm = DistanceMatrix::from_points(&sample_points());
        assert_eq!(dm.size(), 3);
        assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
        assert!((dm.get(0, 2) - 8.0).abs() < 1e-10);
        assert!((dm.get(0, 0)).abs() < 1e-10);
        assert!(dm.is_symmetric(1e-10));
    }

    #[test]
    fn test_from_rows() {
        let dm = DistanceMatrix::from_rows(vec![vec![0.0, 5.0], vec![7.0, 0.0]]).expect("valid");
        assert_eq!(dm.get(0, 1), 5.0);
        assert_eq!(dm.get(1, 0), 7.0);
        assert_eq!(dm.row(1), &[7.0, 0.0]);
        assert_eq!(dm.to_rows(), vec![vec![0.0, 5.0], vec![7.0, 0.0]]);
        assert!(!dm.is_symmetric(1e-10));
    }

    #[test]
    fn test_from_rows_rejects_bad_shape() {
        assert!(matches!(
            DistanceMatrix::from_rows(vec![]),
            Err(TspError::InvalidInput(_))
        ));
        assert!(matches!(
            DistanceMatrix::from_rows(vec![vec![0.0, 1.0], vec![1.0]]),
            Err(TspError::InvalidInput(_))
        ));
        assert!(matches!(
            DistanceMatrix::from_rows(vec![vec![0.0, 1.0, 2.0], vec![1.0, 0.0, 3.0]]),
            Err(TspError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_from_rows_rejects_bad_entries() {
        let err = DistanceMatrix::from_rows(vec![vec![0.0, -1.0], vec![1.0, 0.0]])
            .expect_err("negative entry");
        assert!(err.to_string().contains("(0, 1)"));
        assert!(DistanceMatrix::from_rows(vec![vec![0.0, f64::NAN], vec![1.0, 0.0]]).is_err());
        assert!(DistanceMatrix::from_rows(vec![vec![0.0, 1.0], vec![f64::INFINITY, 0.0]]).is_err());
    }

    #[test]
    fn test_from_data() {
        let dm = DistanceMatrix::from_data(2, vec![0.0, 5.0, 5.0, 0.0]).expect("valid");
        assert_eq!(dm.get(0, 1), 5.0);
        assert!(DistanceMatrix::from_data(2, vec![0.0, 1.0, 2.0]).is_none());
    }

    #[test]
    fn test_validate_after_set() {
        let mut dm = DistanceMatrix::new(3);
        assert!(dm.validate().is_ok());
        dm.set(2, 1, -0.5);
        assert!(dm.validate().is_err());
        assert!(DistanceMatrix::new(0).validate().is_err());
    }

    #[test]
    fn test_coordinate_channel() {
        let dm = DistanceMatrix::from_rows(vec![
            vec![1.0, 2.0, 9.0],
            vec![3.0, 4.0, 9.0],
            vec![5.0, 6.0, 9.0],
        ])
        .expect("valid");
        assert_eq!(dm.coordinate(1), Point::new(3.0, 4.0));
    }

    #[test]
    fn test_nearest_neighbor() {
        let dm = DistanceMatrix::from_points(&sample_points());
        assert_eq!(dm.nearest_neighbor(0, &[1, 2]), Some(1));
        assert_eq!(dm.nearest_neighbor(0, &[2]), Some(2));
        assert_eq!(dm.nearest_neighbor(0, &[]), None);
    }

    #[test]
    fn test_nearest_neighbor_tie_keeps_first() {
        let dm = DistanceMatrix::new(3);
        assert_eq!(dm.nearest_neighbor(0, &[2, 1]), Some(2));
    }
}
