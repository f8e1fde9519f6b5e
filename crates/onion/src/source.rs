//! Point sources: seeded random clouds and the two-column text format.
//!
//! Text format: one point per line, `x y` separated by whitespace. Lines with
//! fewer or more than two tokens are skipped silently; a two-token line whose
//! tokens are not numbers fails the whole read.

use std::fs;
use std::io::Write;
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::SourceError;
use crate::geom::Point;

/// Random cloud parameters (uniform in an axis-aligned box).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RandomCfg {
    pub count: usize,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
}

impl Default for RandomCfg {
    fn default() -> Self {
        Self {
            count: 20,
            x_range: (0.0, 100.0),
            y_range: (0.0, 100.0),
        }
    }
}

/// Draw `cfg.count` points, reproducible from `seed`. Reversed bounds are
/// swapped; an empty range pins the coordinate.
pub fn random_points(cfg: RandomCfg, seed: u64) -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..cfg.count)
        .map(|_| Point::new(sample(&mut rng, cfg.x_range), sample(&mut rng, cfg.y_range)))
        .collect()
}

fn sample<R: Rng>(rng: &mut R, (a, b): (f64, f64)) -> f64 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    if lo == hi {
        lo
    } else {
        rng.gen_range(lo..hi)
    }
}

/// Parse the two-column format.
pub fn parse_points(text: &str) -> Result<Vec<Point>, SourceError> {
    let mut out = Vec::new();
    for (k, line) in text.lines().enumerate() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let [x, y] = tokens.as_slice() else {
            continue;
        };
        let parse = |t: &str| {
            t.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| SourceError::Parse {
                    line: k + 1,
                    token: t.to_string(),
                })
        };
        out.push(Point::new(parse(*x)?, parse(*y)?));
    }
    Ok(out)
}

/// Read and parse a point file.
pub fn read_points(path: impl AsRef<Path>) -> Result<Vec<Point>, SourceError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_points(&text)
}

/// `read_points`, logging the failure and yielding no points instead.
pub fn read_points_or_empty(path: impl AsRef<Path>) -> Vec<Point> {
    read_points(path).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "point file unreadable; using no points");
        Vec::new()
    })
}

/// Write points in the two-column format.
pub fn write_points(path: impl AsRef<Path>, points: &[Point]) -> Result<(), SourceError> {
    let path = path.as_ref();
    let io_err = |source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut file = fs::File::create(path).map_err(io_err)?;
    for p in points {
        writeln!(file, "{} {}", p.x, p.y).map_err(io_err)?;
    }
    Ok(())
}
