//! Monte Carlo estimate of the chord-intersection probability.
//!
//! One trial draws two random chords of the polygon. Each chord joins a
//! uniform point on one edge to a uniform point on a different edge. The trial
//! is a hit when the chords cross at a single point strictly inside the
//! polygon.
//!
//! Trials are split into fixed-size chunks that run in parallel. Every chunk
//! owns an RNG seeded from `(seed, sides, chunk)` through a fixed SplitMix64
//! mix, so a run is reproducible for a given seed whatever the thread count.

use std::time::Instant;

use geo::Line;
use log::{debug, info};
use rand::prelude::*;
use rand::rngs::StdRng;
use rayon::prelude::*;

use crate::domain::{SimConfig, SimulationRow};
use crate::error::AppError;
use crate::sim::polygon::RegularPolygon;

/// Trials per parallel work unit.
const CHUNK_TRIALS: u64 = 1 << 16;

/// Two-sided 95% normal quantile.
const Z_95: f64 = 1.959_963_984_540_054;

/// Draw one chord: endpoints on two distinct, uniformly chosen edges.
pub fn random_chord<R: Rng>(polygon: &RegularPolygon, rng: &mut R) -> Line<f64> {
    let n = polygon.sides();
    let first = rng.gen_range(0..n);
    // Uniform over the other n - 1 edges.
    let second = (first + 1 + rng.gen_range(0..n - 1)) % n;

    let a = polygon.point_on_edge(first, rng.r#gen::<f64>());
    let b = polygon.point_on_edge(second, rng.r#gen::<f64>());
    Line::new(a, b)
}

/// Whether two chords cross strictly inside the polygon.
pub fn chords_intersect_inside(polygon: &RegularPolygon, chord1: Line<f64>, chord2: Line<f64>) -> bool {
    polygon.interior_crossing(chord1, chord2).is_some()
}

/// Run one trial.
pub fn run_trial<R: Rng>(polygon: &RegularPolygon, rng: &mut R) -> bool {
    let chord1 = random_chord(polygon, rng);
    let chord2 = random_chord(polygon, rng);
    chords_intersect_inside(polygon, chord1, chord2)
}

/// Count hits over `iterations` trials for an `sides`-gon.
pub fn count_hits(sides: usize, iterations: u64, seed: u64) -> Result<u64, AppError> {
    let polygon = RegularPolygon::new(sides)?;
    let chunks = iterations.div_ceil(CHUNK_TRIALS);

    let hits: u64 = (0..chunks)
        .into_par_iter()
        .map(|chunk| {
            let start = chunk * CHUNK_TRIALS;
            let len = CHUNK_TRIALS.min(iterations - start);
            let mut rng = StdRng::seed_from_u64(chunk_seed(seed, sides, chunk));
            (0..len).filter(|_| run_trial(&polygon, &mut rng)).count() as u64
        })
        .sum();

    Ok(hits)
}

/// 95% Wilson score interval for `hits / trials`, clipped to `[0, 1]`.
pub fn wilson_interval(hits: u64, trials: u64) -> (f64, f64) {
    if trials == 0 {
        return (0.0, 1.0);
    }
    let n = trials as f64;
    let p = hits as f64 / n;
    let z2 = Z_95 * Z_95;

    let denom = 1.0 + z2 / n;
    let center = (p + z2 / (2.0 * n)) / denom;
    let half = Z_95 * (p * (1.0 - p) / n + z2 / (4.0 * n * n)).sqrt() / denom;

    ((center - half).max(0.0), (center + half).min(1.0))
}

/// Estimate one `n`.
pub fn simulate_sides(sides: usize, iterations: u64, seed: u64) -> Result<SimulationRow, AppError> {
    let hits = count_hits(sides, iterations, seed)?;
    let (ci_lower, ci_upper) = wilson_interval(hits, iterations);
    Ok(SimulationRow {
        n: sides,
        iterations,
        hits,
        probability: hits as f64 / iterations as f64,
        ci_lower,
        ci_upper,
    })
}

/// Estimate every `n` in `[n_min, n_max]`.
pub fn run_simulation(config: &SimConfig) -> Result<Vec<SimulationRow>, AppError> {
    if config.n_min < 3 {
        return Err(AppError::new(2, format!("--n-min must be >= 3, got {}.", config.n_min)));
    }
    if config.n_max < config.n_min {
        return Err(AppError::new(
            2,
            format!("--n-max ({}) must be >= --n-min ({}).", config.n_max, config.n_min),
        ));
    }
    if config.iterations == 0 {
        return Err(AppError::new(2, "--iterations must be > 0."));
    }

    info!(
        "simulating n = {}..={} with {} trials each (seed {}, {} threads)",
        config.n_min,
        config.n_max,
        config.iterations,
        config.seed,
        rayon::current_num_threads()
    );

    let mut rows = Vec::with_capacity(config.n_max - config.n_min + 1);
    for sides in config.n_min..=config.n_max {
        let started = Instant::now();
        let row = simulate_sides(sides, config.iterations, config.seed)?;
        info!(
            "n = {sides}: p = {:.8} [{:.8}, {:.8}] in {:.2?}",
            row.probability,
            row.ci_lower,
            row.ci_upper,
            started.elapsed()
        );
        rows.push(row);
    }

    Ok(rows)
}

fn chunk_seed(seed: u64, sides: usize, chunk: u64) -> u64 {
    let s = splitmix64(splitmix64(splitmix64(seed) ^ sides as u64) ^ chunk);
    debug!("chunk seed n={sides} chunk={chunk}: {s:#018x}");
    s
}

/// One SplitMix64 step (Steele, Lea, Flood 2014).
fn splitmix64(x: u64) -> u64 {
    let mut z = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use geo::Coord;

    use super::*;

    #[test]
    fn chords_use_distinct_edges() {
        let poly = RegularPolygon::new(3).unwrap();
        let on_edge = |e: usize, p: &Coord<f64>| {
            let edge = poly.edge(e);
            let ab = edge.delta();
            let ap = *p - edge.start;
            (ab.x * ap.y - ab.y * ap.x).abs() < 1e-9
        };

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let chord = random_chord(&poly, &mut rng);
            let (a, b) = (chord.start, chord.end);
            assert!((0..3).any(|e| on_edge(e, &a)));
            assert!((0..3).any(|e| on_edge(e, &b)));
            assert!(!(0..3).any(|e| on_edge(e, &a) && on_edge(e, &b)));
        }
    }

    #[test]
    fn diameters_of_square_cross_inside() {
        let square = RegularPolygon::new(4).unwrap();
        let c1 = Line::new(square.point_on_edge(0, 0.5), square.point_on_edge(2, 0.5));
        let c2 = Line::new(square.point_on_edge(1, 0.5), square.point_on_edge(3, 0.5));
        assert!(chords_intersect_inside(&square, c1, c2));

        // Chords meeting only at a shared boundary point do not count.
        let v = square.vertices()[1];
        let c3 = Line::new(v, square.point_on_edge(2, 0.5));
        let c4 = Line::new(v, square.point_on_edge(3, 0.5));
        assert!(!chords_intersect_inside(&square, c3, c4));
    }

    #[test]
    fn counts_are_deterministic_for_a_seed() {
        let a = count_hits(5, 10_000, 42).unwrap();
        let b = count_hits(5, 10_000, 42).unwrap();
        assert_eq!(a, b);
        assert!(a <= 10_000);
    }

    #[test]
    fn estimates_land_in_plausible_ranges() {
        let triangle = simulate_sides(3, 20_000, 1).unwrap();
        assert!((0.47..0.53).contains(&triangle.probability), "{triangle:?}");

        let square = simulate_sides(4, 20_000, 1).unwrap();
        assert!((0.44..0.50).contains(&square.probability), "{square:?}");
        assert!(square.ci_lower <= square.probability && square.probability <= square.ci_upper);
    }

    #[test]
    fn chunk_seeds_are_fixed_values() {
        // Reference output of SplitMix64 from a zero state.
        assert_eq!(splitmix64(0), 0xE220_A839_7B1D_CDAF);
        assert_eq!(chunk_seed(42, 5, 0), chunk_seed(42, 5, 0));
        assert_ne!(chunk_seed(42, 5, 0), chunk_seed(42, 5, 1));
        assert_ne!(chunk_seed(42, 5, 0), chunk_seed(42, 6, 0));
        assert_ne!(chunk_seed(42, 5, 0), chunk_seed(43, 5, 0));
    }

    #[test]
    fn wilson_interval_properties() {
        let (lo, hi) = wilson_interval(500, 1000);
        assert!((lo + hi - 1.0).abs() < 1e-12, "symmetric around 1/2");
        assert!((hi - lo - 2.0 * 0.0309).abs() < 1e-3);

        let (lo, hi) = wilson_interval(0, 100);
        assert!(lo < 1e-12);
        assert!(hi > 0.0 && hi < 0.05);

        let (lo, hi) = wilson_interval(100, 100);
        assert!(lo > 0.95);
        assert!(hi <= 1.0);
    }

    #[test]
    fn run_simulation_validates_config() {
        let mut config = SimConfig {
            n_min: 2,
            n_max: 4,
            iterations: 10,
            seed: 0,
            output: "unused.csv".into(),
        };
        assert_eq!(run_simulation(&config).unwrap_err().exit_code(), 2);

        config.n_min = 5;
        assert!(run_simulation(&config).is_err());

        config.n_min = 3;
        config.iterations = 0;
        assert!(run_simulation(&config).is_err());

        config.iterations = 100;
        let rows = run_simulation(&config).unwrap();
        assert_eq!(rows.iter().map(|r| r.n).collect::<Vec<_>>(), vec![3, 4]);
    }
}
