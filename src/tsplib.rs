//! TSPLIB instance loading and generation.
//!
//! Supports the coordinate subset of the format used for Euclidean
//! benchmarks:
//!
//! ```text
//! NAME : sample_5
//! COMMENT : Sample TSP instance with 5 cities
//! TYPE : TSP
//! DIMENSION : 5
//! EDGE_WEIGHT_TYPE : EUC_2D
//! NODE_COORD_SECTION
//! 1 12 40
//! ...
//! EOF
//! ```
//!
//! Distances are unrounded Euclidean lengths, so costs can differ slightly
//! from published EUC_2D optima, which round every edge.

use std::path::Path;

use log::warn;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::distance::DistanceMatrix;
use crate::error::{Result, TspError};
use crate::models::Point;

/// Side length of the square grid used by [`TsplibInstance::random`].
pub const RANDOM_GRID: u32 = 1000;

/// A parsed TSPLIB coordinate instance.
///
/// # Examples
///
/// ```
/// use tsp_solvers::tsplib::TsplibInstance;
///
/// let text = "NAME : tri\nDIMENSION : 3\nNODE_COORD_SECTION\n1 0 0\n2 3 0\n3 0 4\nEOF\n";
/// let instance = TsplibInstance::parse(text).unwrap();
/// assert_eq!(instance.dimension(), 3);
/// assert!((instance.tour_cost(&[0, 1, 2]) - 12.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TsplibInstance {
    pub name: String,
    pub comment: Option<String>,
    pub edge_weight_type: Option<String>,
    pub points: Vec<Point>,
}

impl TsplibInstance {
    /// Parses TSPLIB text.
    ///
    /// # Errors
    ///
    /// [`TspError::Parse`] if `DIMENSION` or `NODE_COORD_SECTION` is
    /// missing, a coordinate line is malformed, or the number of coordinates
    /// differs from `DIMENSION`.
    pub fn parse(text: &str) -> Result<Self> {
        let mut name = String::new();
        let mut comment = None;
        let mut edge_weight_type = None;
        let mut dimension: Option<usize> = None;
        let mut points = Vec::new();
        let mut in_coords = false;
        let mut seen_coords = false;
        let mut last_line = 0;

        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            last_line = line_no;
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            if line == "EOF" {
                break;
            }

            if in_coords {
                points.push(parse_coordinate(line, line_no)?);
                continue;
            }

            if line.starts_with("NODE_COORD_SECTION") {
                in_coords = true;
                seen_coords = true;
                continue;
            }

            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let value = value.trim();
            match key.trim() {
                "NAME" => name = value.to_string(),
                "COMMENT" => comment = Some(value.to_string()),
                "EDGE_WEIGHT_TYPE" => edge_weight_type = Some(value.to_string()),
                "DIMENSION" => {
                    let d = value.parse().map_err(|_| {
                        TspError::parse(line_no, format!("invalid DIMENSION `{value}`"))
                    })?;
                    dimension = Some(d);
                }
                _ => {}
            }
        }

        let dimension =
            dimension.ok_or_else(|| TspError::parse(last_line, "DIMENSION not found"))?;
        if !seen_coords {
            return Err(TspError::parse(last_line, "NODE_COORD_SECTION not found"));
        }
        if points.len() != dimension {
            return Err(TspError::parse(
                last_line,
                format!("expected {dimension} coordinates, found {}", points.len()),
            ));
        }
        if let Some(kind) = edge_weight_type.as_deref().filter(|k| *k != "EUC_2D") {
            warn!("tsplib: EDGE_WEIGHT_TYPE {kind} treated as unrounded Euclidean");
        }

        Ok(Self {
            name,
            comment,
            edge_weight_type,
            points,
        })
    }

    /// Reads and parses a TSPLIB file.
    ///
    /// An instance without a `NAME` is named after the file stem.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let mut instance = Self::parse(&text)?;
        if instance.name.is_empty() {
            instance.name = dataset_name(path);
        }
        Ok(instance)
    }

    /// Generates `n` cities with integer coordinates uniformly drawn from
    /// `[0, 1000)`.
    pub fn random(n: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let points = (0..n)
            .map(|_| {
                Point::new(
                    f64::from(rng.random_range(0..RANDOM_GRID)),
                    f64::from(rng.random_range(0..RANDOM_GRID)),
                )
            })
            .collect();
        Self {
            name: random_name(n),
            comment: Some(format!("Sample TSP instance with {n} cities")),
            edge_weight_type: Some("EUC_2D".to_string()),
            points,
        }
    }

    /// Number of cities.
    pub fn dimension(&self) -> usize {
        self.points.len()
    }

    /// Symmetric Euclidean distance matrix with a zero diagonal.
    pub fn distance_matrix(&self) -> DistanceMatrix {
        DistanceMatrix::from_points(&self.points)
    }

    /// Cyclic Euclidean length of `tour`, computed from the coordinates.
    pub fn tour_cost(&self, tour: &[usize]) -> f64 {
        let n = tour.len();
        (0..n)
            .map(|i| self.points[tour[i]].distance_to(&self.points[tour[(i + 1) % n]]))
            .sum()
    }

    /// Renders the instance as TSPLIB text.
    pub fn to_tsplib_string(&self) -> String {
        let comment = self
            .comment
            .as_ref()
            .map(|c| format!("COMMENT : {c}\n"))
            .unwrap_or_default();
        let coords: String = self
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| format!("{} {} {}\n", i + 1, p.x, p.y))
            .collect();
        format!(
            "NAME : {}\n{comment}TYPE : TSP\nDIMENSION : {}\nEDGE_WEIGHT_TYPE : {}\nNODE_COORD_SECTION\n{coords}EOF\n",
            self.name,
            self.dimension(),
            self.edge_weight_type.as_deref().unwrap_or("EUC_2D"),
        )
    }
}

/// Name given to [`TsplibInstance::random`] instances.
pub(crate) fn random_name(n: usize) -> String {
    format!("sample_{n}")
}

/// Dataset name derived from a file path: the file stem, or empty.
pub fn dataset_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// `NAME` and `DIMENSION` read from the header alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsplibHeader {
    /// Empty when the header has no `NAME`.
    pub name: String,
    pub dimension: usize,
}

/// Scans the header up to `NODE_COORD_SECTION` without touching coordinates.
///
/// # Errors
///
/// [`TspError::Parse`] if `DIMENSION` is missing or not a number.
pub fn read_header(text: &str) -> Result<TsplibHeader> {
    let mut name = String::new();
    let mut dimension = None;
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.starts_with("NODE_COORD_SECTION") {
            break;
        }
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        match key.trim() {
            "NAME" => name = value.to_string(),
            "DIMENSION" => {
                let d = value.parse().map_err(|_| {
                    TspError::parse(idx + 1, format!("invalid DIMENSION `{value}`"))
                })?;
                dimension = Some(d);
            }
            _ => {}
        }
    }
    let dimension = dimension
        .ok_or_else(|| TspError::parse(text.lines().count(), "DIMENSION not found"))?;
    Ok(TsplibHeader { name, dimension })
}

/// Scans the header for `DIMENSION` without parsing coordinates.
pub fn read_dimension(text: &str) -> Result<usize> {
    read_header(text).map(|h| h.dimension)
}

fn parse_coordinate(line: &str, line_no: usize) -> Result<Point> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [id, x, y] = fields.as_slice() else {
        return Err(TspError::parse(line_no, "expected `id x y`"));
    };
    id.parse::<usize>()
        .map_err(|_| TspError::parse(line_no, format!("invalid node id `{id}`")))?;
    let x: f64 = x
        .parse()
        .map_err(|_| TspError::parse(line_no, format!("invalid x coordinate `{x}`")))?;
    let y: f64 = y
        .parse()
        .map_err(|_| TspError::parse(line_no, format!("invalid y coordinate `{y}`")))?;
    if !x.is_finite() || !y.is_finite() {
        return Err(TspError::parse(line_no, "coordinates must be finite"));
    }
    Ok(Point::new(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
NAME : square
COMMENT : unit square
TYPE : TSP
DIMENSION : 4
EDGE_WEIGHT_TYPE : EUC_2D
NODE_COORD_SECTION
1 0 0
2 1 0
3 1 1
4 0 1
EOF
";

    #[test]
    fn test_parse_sample() {
        let inst = TsplibInstance::parse(SAMPLE).expect("parses");
        assert_eq!(inst.name, "square");
        assert_eq!(inst.comment.as_deref(), Some("unit square"));
        assert_eq!(inst.edge_weight_type.as_deref(), Some("EUC_2D"));
        assert_eq!(inst.dimension(), 4);
        assert_eq!(inst.points[2], Point::new(1.0, 1.0));
    }

    #[test]
    fn test_distance_matrix() {
        let inst = TsplibInstance::parse(SAMPLE).expect("parses");
        let dm = inst.distance_matrix();
        assert_eq!(dm.size(), 4);
        assert!(dm.is_symmetric(1e-12));
        assert!((dm.get(0, 2) - 2f64.sqrt()).abs() < 1e-12);
        assert!((inst.tour_cost(&[0, 1, 2, 3]) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_parse_without_eof_and_with_floats() {
        let text = "DIMENSION: 2\nNODE_COORD_SECTION\n1 -1.5 2.25\n2 3e1 0\n";
        let inst = TsplibInstance::parse(text).expect("parses");
        assert_eq!(inst.points, vec![Point::new(-1.5, 2.25), Point::new(30.0, 0.0)]);
        assert!(inst.name.is_empty());
    }

    #[test]
    fn test_missing_dimension() {
        let err = TsplibInstance::parse("NAME : x\nNODE_COORD_SECTION\n1 0 0\n").expect_err("fails");
        assert!(err.to_string().contains("DIMENSION not found"));
    }

    #[test]
    fn test_missing_section() {
        let err = TsplibInstance::parse("DIMENSION : 1\n").expect_err("fails");
        assert!(err.to_string().contains("NODE_COORD_SECTION"));
    }

    #[test]
    fn test_count_mismatch() {
        let err = TsplibInstance::parse("DIMENSION : 3\nNODE_COORD_SECTION\n1 0 0\n2 1 1\nEOF\n")
            .expect_err("fails");
        assert!(err.to_string().contains("expected 3 coordinates, found 2"));
    }

    #[test]
    fn test_malformed_line_reports_line_number() {
        let err = TsplibInstance::parse("DIMENSION : 2\nNODE_COORD_SECTION\n1 0 0\n2 abc 1\n")
            .expect_err("fails");
        match err {
            TspError::Parse { line, message } => {
                assert_eq!(line, 4);
                assert!(message.contains("abc"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_read_dimension() {
        assert_eq!(read_dimension(SAMPLE).expect("found"), 4);
        assert!(read_dimension("NAME : x\n").is_err());
        assert!(read_dimension("DIMENSION : many\n").is_err());
    }

    #[test]
    fn test_read_header_ignores_coordinates() {
        let text = "NAME : huge\nDIMENSION : 100000\nNODE_COORD_SECTION\n1 not a coordinate\n";
        let header = read_header(text).expect("header");
        assert_eq!(header.name, "huge");
        assert_eq!(header.dimension, 100_000);

        let header = read_header("DIMENSION : 3\n").expect("header");
        assert!(header.name.is_empty());
    }

    #[test]
    fn test_dataset_name() {
        assert_eq!(dataset_name(Path::new("/data/a280.tsp")), "a280");
        assert_eq!(dataset_name(Path::new("/")), "");
    }

    #[test]
    fn test_tsplib_text_layout() {
        let inst = TsplibInstance {
            name: "pair".to_string(),
            comment: None,
            edge_weight_type: None,
            points: vec![Point::new(0.0, 0.0), Point::new(1.5, 2.0)],
        };
        assert_eq!(
            inst.to_tsplib_string(),
            "NAME : pair\nTYPE : TSP\nDIMENSION : 2\nEDGE_WEIGHT_TYPE : EUC_2D\nNODE_COORD_SECTION\n1 0 0\n2 1.5 2\nEOF\n"
        );
    }

    #[test]
    fn test_random_is_seeded() {
        let a = TsplibInstance::random(20, 7);
        let b = TsplibInstance::random(20, 7);
        assert_eq!(a, b);
        assert_eq!(a.name, "sample_20");
        assert!(a
            .points
            .iter()
            .all(|p| (0.0..1000.0).contains(&p.x) && (0.0..1000.0).contains(&p.y)));
        assert_eq!(a.points.iter().filter(|p| p.x.fract() != 0.0).count(), 0);
    }

    #[test]
    fn test_tsplib_text_roundtrip() {
        let inst = TsplibInstance::random(6, 3);
        let text = inst.to_tsplib_string();
        assert!(text.starts_with("NAME : sample_6\n"));
        assert!(text.ends_with("EOF\n"));
        assert_eq!(TsplibInstance::parse(&text).expect("parses"), inst);
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = TsplibInstance::from_path("/nonexistent/none.tsp").expect_err("fails");
        assert!(matches!(err, TspError::Io(_)));
    }
}
