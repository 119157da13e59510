//! Side-by-side comparison of solvers on one instance.
//!
//! Each selected solver is run once on the same matrix; the outcome is one
//! [`BenchmarkRecord`] per solver, including failures and skips. Instance
//! sizes are checked against every ceiling before the matrix is built, so a
//! dataset no selected solver accepts is never loaded.

use std::collections::BTreeMap;
use std::time::Instant;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::constructive::ConvexHullInsertion;
use crate::distance::DistanceMatrix;
use crate::error::Result;
use crate::models::{Point, SolverKind, TourSolver};
use crate::tsplib::{random_name, read_header, TsplibInstance};

/// Published optimal tour lengths for well-known TSPLIB instances.
pub fn known_optimum(dataset: &str) -> Option<f64> {
    match dataset {
        "a280" => Some(2579.0),
        "xql662" => Some(2513.0),
        "kz9976" => Some(106_188.0),
        _ => None,
    }
}

/// Which solvers to run and how large an instance each may receive.
///
/// # Examples
///
/// ```
/// use tsp_solvers::benchmark::BenchmarkConfig;
/// use tsp_solvers::models::SolverKind;
///
/// let config = BenchmarkConfig::default()
///     .with_algorithms(vec![SolverKind::HeldKarp, SolverKind::NearestNeighbor])
///     .with_max_dimension(SolverKind::HeldKarp, 16);
/// assert_eq!(config.algorithms.len(), 2);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkConfig {
    /// Solvers to run, in order.
    pub algorithms: Vec<SolverKind>,
    /// Per-solver dimension ceilings overriding the solver's own default.
    #[serde(default)]
    pub max_dimensions: BTreeMap<SolverKind, usize>,
    /// Optimal cost used for approximation ratios, if not a known dataset.
    #[serde(default)]
    pub ground_truth: Option<f64>,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            algorithms: SolverKind::ALL.to_vec(),
            max_dimensions: BTreeMap::new(),
            ground_truth: None,
        }
    }
}

impl BenchmarkConfig {
    pub fn with_algorithms(mut self, algorithms: Vec<SolverKind>) -> Self {
        self.algorithms = algorithms;
        self
    }

    pub fn with_max_dimension(mut self, kind: SolverKind, max: usize) -> Self {
        self.max_dimensions.insert(kind, max);
        self
    }

    pub fn with_ground_truth(mut self, optimum: f64) -> Self {
        self.ground_truth = Some(optimum);
        self
    }

    /// Dimension ceiling for `kind`: the configured override, else the
    /// solver's own [`max_dimension`](TourSolver::max_dimension).
    pub fn ceiling(&self, kind: SolverKind) -> Option<usize> {
        self.max_dimensions
            .get(&kind)
            .copied()
            .or_else(|| kind.create().max_dimension())
    }

    /// Returns `true` if at least one selected solver accepts `n` nodes.
    pub fn accepts_any(&self, n: usize) -> bool {
        self.algorithms
            .iter()
            .any(|&kind| self.exceeded(kind, n).is_none())
    }

    /// The ceiling `n` is above, if any.
    fn exceeded(&self, kind: SolverKind, n: usize) -> Option<usize> {
        self.ceiling(kind).filter(|&max| n > max)
    }
}

/// Outcome of running one solver on one dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRecord {
    pub algorithm: String,
    pub dataset: String,
    pub dimension: usize,
    pub runtime_secs: Option<f64>,
    pub tour_cost: Option<f64>,
    pub tour: Option<Vec<usize>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ground_truth: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approximation_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BenchmarkRecord {
    fn empty(algorithm: &str, dataset: &str, dimension: usize) -> Self {
        Self {
            algorithm: algorithm.to_string(),
            dataset: dataset.to_string(),
            dimension,
            runtime_secs: None,
            tour_cost: None,
            tour: None,
            ground_truth: None,
            approximation_ratio: None,
            skipped: None,
            error: None,
        }
    }

    /// Returns `true` if the solver ran and produced a tour.
    pub fn is_success(&self) -> bool {
        self.tour_cost.is_some()
    }
}

fn skipped_record(kind: SolverKind, dataset: &str, n: usize, max: usize) -> BenchmarkRecord {
    let name = kind.create().name();
    info!("benchmark: skipping {name} on {dataset} (n={n} > max {max})");
    let mut record = BenchmarkRecord::empty(name, dataset, n);
    record.skipped = Some(format!("dimension {n} exceeds limit {max}"));
    record
}

/// One skipped record per selected solver, for instances no solver accepts.
fn skip_all(dataset: &str, n: usize, config: &BenchmarkConfig) -> Vec<BenchmarkRecord> {
    config
        .algorithms
        .iter()
        .filter_map(|&kind| {
            config
                .exceeded(kind, n)
                .map(|max| skipped_record(kind, dataset, n, max))
        })
        .collect()
}

/// Benchmarks a TSPLIB instance given as text.
///
/// The header is read first; when no selected solver accepts the declared
/// dimension, the coordinates are never parsed and every record is a skip.
/// `fallback_name` names the dataset when the header has no `NAME`.
///
/// # Errors
///
/// [`TspError::Parse`](crate::TspError::Parse) for malformed TSPLIB text.
pub fn benchmark_tsplib(
    text: &str,
    fallback_name: &str,
    config: &BenchmarkConfig,
) -> Result<Vec<BenchmarkRecord>> {
    let header = read_header(text)?;
    let dataset = if header.name.is_empty() {
        fallback_name.to_string()
    } else {
        header.name
    };
    if !config.accepts_any(header.dimension) {
        return Ok(skip_all(&dataset, header.dimension, config));
    }

    let mut instance = TsplibInstance::parse(text)?;
    instance.name = dataset;
    Ok(benchmark_instance(&instance, config))
}

/// Benchmarks a random instance, generating it only if some solver accepts
/// `n` nodes.
pub fn benchmark_generated(n: usize, seed: u64, config: &BenchmarkConfig) -> Vec<BenchmarkRecord> {
    if !config.accepts_any(n) {
        return skip_all(&random_name(n), n, config);
    }
    benchmark_instance(&TsplibInstance::random(n, seed), config)
}

fn benchmark_instance(instance: &TsplibInstance, config: &BenchmarkConfig) -> Vec<BenchmarkRecord> {
    info!(
        "processing {} (dimension {})",
        instance.name,
        instance.dimension()
    );
    run_benchmark(
        &instance.name,
        &instance.distance_matrix(),
        Some(&instance.points),
        config,
    )
}

/// Runs every configured solver on `distances` and collects the results.
///
/// Solvers whose dimension ceiling is below the instance size are reported
/// as skipped. A solver error is recorded and the run continues. When
/// `points` is given, the convex-hull solver uses them instead of reading
/// coordinates from the matrix.
pub fn run_benchmark(
    dataset: &str,
    distances: &DistanceMatrix,
    points: Option<&[Point]>,
    config: &BenchmarkConfig,
) -> Vec<BenchmarkRecord> {
    let n = distances.size();
    let ground_truth = config.ground_truth.or_else(|| known_optimum(dataset));

    config
        .algorithms
        .iter()
        .map(|&kind| {
            if let Some(max) = config.exceeded(kind, n) {
                return skipped_record(kind, dataset, n, max);
            }
            let mut solver: Box<dyn TourSolver> = match (kind, points) {
                (SolverKind::ConvexHull, Some(points)) => {
                    Box::new(ConvexHullInsertion::new().with_points(points.to_vec()))
                }
                _ => kind.create(),
            };
            let mut record = BenchmarkRecord::empty(solver.name(), dataset, n);

            let start = Instant::now();
            let outcome = solver.solve(distances);
            let elapsed = start.elapsed().as_secs_f64();

            match outcome {
                Ok(()) => {
                    record.runtime_secs = Some(elapsed);
                    record.tour_cost = solver.cost();
                    record.tour = solver.tour().map(|t| t.nodes().to_vec());
                    if let (Some(cost), Some(opt)) = (record.tour_cost, ground_truth) {
                        record.ground_truth = Some(opt);
                        record.approximation_ratio = Some(cost / opt);
                    }
                    info!(
                        "benchmark: {} on {dataset} n={n} cost={:.2} runtime={elapsed:.4}s",
                        solver.name(),
                        record.tour_cost.unwrap_or(f64::NAN)
                    );
                }
                Err(e) => {
                    warn!("benchmark: {} failed on {dataset}: {e}", solver.name());
                    record.error = Some(e.to_string());
                }
            }
            record
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_optimum() {
        assert_eq!(known_optimum("a280"), Some(2579.0));
        assert_eq!(known_optimum("sample_10"), None);
    }

    #[test]
    fn test_all_solvers_run_on_small_instance() {
        let inst = TsplibInstance::random(7, 11);
        let dm = inst.distance_matrix();
        let records = run_benchmark(
            &inst.name,
            &dm,
            Some(&inst.points),
            &BenchmarkConfig::default(),
        );
        assert_eq!(records.len(), 5);
        assert!(records.iter().all(|r| r.is_success()));
        assert!(records.iter().all(|r| r.dimension == 7));

        let optimum = records[1].tour_cost.expect("held-karp cost");
        for r in &records[2..] {
            assert!(r.tour_cost.expect("cost") >= optimum - 1e-9);
        }
    }

    #[test]
    fn test_skips_above_ceiling() {
        let inst = TsplibInstance::random(14, 1);
        let dm = inst.distance_matrix();
        let config = BenchmarkConfig::default()
            .with_algorithms(vec![SolverKind::BruteForce, SolverKind::NearestNeighbor]);
        let records = run_benchmark("sample_14", &dm, None, &config);
        assert!(records[0].skipped.is_some());
        assert!(records[0].tour.is_none());
        assert!(records[1].is_success());
    }

    #[test]
    fn test_override_ceiling() {
        let inst = TsplibInstance::random(6, 2);
        let dm = inst.distance_matrix();
        let config = BenchmarkConfig::default()
            .with_algorithms(vec![SolverKind::HeldKarp])
            .with_max_dimension(SolverKind::HeldKarp, 5);
        let records = run_benchmark("sample_6", &dm, None, &config);
        assert!(records[0].skipped.is_some());
    }

    #[test]
    fn test_error_is_recorded() {
        let config = BenchmarkConfig::default()
            .with_algorithms(vec![SolverKind::HeldKarp])
            .with_max_dimension(SolverKind::HeldKarp, 100);
        let records = run_benchmark("too_big", &DistanceMatrix::new(40), None, &config);
        assert!(records[0]
            .error
            .as_deref()
            .is_some_and(|e| e.contains("between 1 and 32")));
    }

    #[test]
    fn test_ground_truth_ratio() {
        let dm = DistanceMatrix::from_rows(vec![
            vec![0.0, 10.0, 15.0, 20.0],
            vec![10.0, 0.0, 35.0, 25.0],
            vec![15.0, 35.0, 0.0, 30.0],
            vec![20.0, 25.0, 30.0, 0.0],
        ])
        .expect("valid");
        let config = BenchmarkConfig::default()
            .with_algorithms(vec![SolverKind::SpanningTree])
            .with_ground_truth(80.0);
        let records = run_benchmark("textbook", &dm, None, &config);
        assert_eq!(records[0].ground_truth, Some(80.0));
        assert_eq!(records[0].approximation_ratio, Some(95.0 / 80.0));
    }

    #[test]
    fn test_record_json_omits_empty_fields() {
        let record = BenchmarkRecord::empty("HeldKarp", "x", 3);
        let json = serde_json::to_value(&record).expect("serializes");
        assert!(json.get("error").is_none());
        assert!(json.get("skipped").is_none());
        assert_eq!(json["algorithm"], "HeldKarp");
    }

    #[test]
    fn test_config_from_json() {
        let unknown = serde_json::from_str::<BenchmarkConfig>(r#"{"algorithms": ["two_opt"]}"#);
        assert!(unknown.is_err());

        let config: BenchmarkConfig =
            serde_json::from_str(r#"{"algorithms": ["held_karp", "convex_hull"]}"#)
                .expect("parses");
        assert_eq!(
            config.algorithms,
            vec![SolverKind::HeldKarp, SolverKind::ConvexHull]
        );
        assert!(config.max_dimensions.is_empty());
        assert!(config.ground_truth.is_none());
    }

    #[test]
    fn test_config_json_roundtrip_with_ceilings() {
        let config = BenchmarkConfig::default().with_max_dimension(SolverKind::BruteForce, 9);
        let json = serde_json::to_string(&config).expect("serializes");
        assert!(json.contains(r#""brute_force":9"#));
        let back: BenchmarkConfig = serde_json::from_str(&json).expect("parses");
        assert_eq!(back.max_dimensions.get(&SolverKind::BruteForce), Some(&9));
    }

    #[test]
    fn test_default_ceilings() {
        let config = BenchmarkConfig::default();
        assert_eq!(config.ceiling(SolverKind::BruteForce), Some(12));
        assert_eq!(config.ceiling(SolverKind::NearestNeighbor), Some(90_000));
        let config = config.with_max_dimension(SolverKind::NearestNeighbor, 100_000);
        assert_eq!(config.ceiling(SolverKind::NearestNeighbor), Some(100_000));
    }

    #[test]
    fn test_accepts_any() {
        let config = BenchmarkConfig::default();
        assert!(config.accepts_any(90_000));
        assert!(!config.accepts_any(90_001));

        let bf_only = BenchmarkConfig::default().with_algorithms(vec![SolverKind::BruteForce]);
        assert!(bf_only.accepts_any(12));
        assert!(!bf_only.accepts_any(13));
        assert!(!BenchmarkConfig::default()
            .with_algorithms(Vec::new())
            .accepts_any(1));
    }

    #[test]
    fn test_oversized_file_only_skips() {
        // No coordinates follow the section marker, so parsing would fail
        let text = "NAME : mona-lisa100K\nDIMENSION : 100000\nNODE_COORD_SECTION\n";
        let records =
            benchmark_tsplib(text, "unused", &BenchmarkConfig::default()).expect("header only");
        assert_eq!(records.len(), 5);
        for r in &records {
            assert_eq!(r.dataset, "mona-lisa100K");
            assert_eq!(r.dimension, 100_000);
            assert!(r.skipped.is_some());
            assert!(r.tour.is_none() && r.error.is_none());
        }

        let bf_only = BenchmarkConfig::default().with_algorithms(vec![SolverKind::BruteForce]);
        let records = benchmark_tsplib(text, "unused", &bf_only).expect("header only");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].algorithm, "BruteForce");
        assert!(records[0].skipped.is_some());
    }

    #[test]
    fn test_oversized_generated_only_skips() {
        let bf_only = BenchmarkConfig::default().with_algorithms(vec![SolverKind::BruteForce]);
        let records = benchmark_generated(1_000_000, 1, &bf_only);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].dataset, "sample_1000000");
        assert!(records[0].skipped.is_some());
    }

    #[test]
    fn test_benchmark_tsplib_runs_accepted_solvers() {
        let text = "DIMENSION : 4\nNODE_COORD_SECTION\n1 0 0\n2 1 0\n3 1 1\n4 0 1\nEOF\n";
        let records = benchmark_tsplib(text, "square", &BenchmarkConfig::default()).expect("parses");
        assert_eq!(records.len(), 5);
        for r in &records {
            assert_eq!(r.dataset, "square");
            assert!((r.tour_cost.expect("cost") - 4.0).abs() < 1e-10);
        }
    }

    #[test]
    fn test_benchmark_tsplib_rejects_bad_coordinates() {
        let text = "DIMENSION : 2\nNODE_COORD_SECTION\n1 0 0\n2 x 1\n";
        let err = benchmark_tsplib(text, "bad", &BenchmarkConfig::default()).expect_err("fails");
        assert!(matches!(err, crate::TspError::Parse { line: 4, .. }));
    }

    #[test]
    fn test_benchmark_generated_small() {
        let config = BenchmarkConfig::default().with_algorithms(vec![SolverKind::HeldKarp]);
        let records = benchmark_generated(6, 3, &config);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].dataset, "sample_6");
        assert!(records[0].is_success());
    }
}
